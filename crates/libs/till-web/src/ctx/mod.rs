//! Request context management for web handlers.
//!
//! The gate in [`resolver`] stores a [`CtxResult`] in the request extensions.
//! Handlers pick it up through the [`Ctx`] extractor (rejects unauthenticated
//! requests) or the [`PrincipalId`] extractor (yields `0` for them).

use serde::{Deserialize, Serialize};
use till_models::principal::PrincipalKind;

pub mod resolver;

/// Identity bound to an authenticated request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ctx {
    /// The authenticated principal.
    pub principal_id: i64,
    /// Which namespace the principal lives in.
    pub kind: PrincipalKind,
}

impl Ctx {
    /// Creates a new request context.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use till_models::principal::PrincipalKind;
    /// use till_web::ctx::Ctx;
    ///
    /// let ctx = Ctx::new(42, PrincipalKind::Customer);
    /// assert_eq!(ctx.principal_id, 42);
    /// ```
    pub fn new(principal_id: i64, kind: PrincipalKind) -> Self {
        Self { principal_id, kind }
    }
}

/// Why a request carries no identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unauthenticated {
    TokenMissing,
    TokenNotFound,
    TokenExpired,
}

/// Gate outcome stored in the request extensions.
pub type CtxResult = std::result::Result<Ctx, Unauthenticated>;

/// Principal id of the request, `0` when no identity was resolved.
///
/// For routes that admit anonymous callers and make their own decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipalId(pub i64);

impl PrincipalId {
    pub const ANONYMOUS: PrincipalId = PrincipalId(0);

    pub fn is_anonymous(self) -> bool {
        self == Self::ANONYMOUS
    }
}

impl From<&CtxResult> for PrincipalId {
    fn from(value: &CtxResult) -> Self {
        match value {
            Ok(ctx) => PrincipalId(ctx.principal_id),
            Err(_) => PrincipalId::ANONYMOUS,
        }
    }
}
