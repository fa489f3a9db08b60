//! Authorization gate: resolves bearer tokens into request context.

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::Response,
};
use headers::{Authorization, HeaderMapExt, authorization::Bearer};
use till_models::principal::PrincipalKind;
use tracing::{debug, error};

use crate::{
    ctx::{Ctx, CtxResult, PrincipalId, Unauthenticated},
    prelude::*,
    session::SessionService,
};

/// Turns a bearer token into an identity.
///
/// Implementations report unknown tokens as [`Error::TokenNotFound`] and
/// expired ones as [`Error::TokenExpired`]; anything else is treated as an
/// infrastructure fault by the gate. Calls may block on the store.
pub trait Resolve: Send + Sync + 'static {
    fn resolve(&self, token: &str) -> Result<Ctx>;
}

/// Resolves both principal kinds.
impl Resolve for SessionService {
    fn resolve(&self, token: &str) -> Result<Ctx> {
        SessionService::resolve(self, token)
    }
}

/// Resolver restricted to one principal kind.
///
/// A token issued to another kind is reported as not found, so a customer
/// token never opens manager routes.
#[derive(Clone, Debug)]
pub struct KindResolver {
    service: SessionService,
    kind: PrincipalKind,
}

impl KindResolver {
    pub fn new(service: SessionService, kind: PrincipalKind) -> Self {
        Self { service, kind }
    }

    pub fn kind(&self) -> PrincipalKind {
        self.kind
    }
}

impl Resolve for KindResolver {
    fn resolve(&self, token: &str) -> Result<Ctx> {
        let ctx = self.service.resolve(token)?;
        if ctx.kind != self.kind {
            debug!(
                "Rejecting {} token presented to {} routes",
                ctx.kind, self.kind
            );
            return Err(Error::TokenNotFound);
        }
        Ok(ctx)
    }
}

/// Reads the token from `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().trim().to_string())
        .filter(|token| !token.is_empty())
}

/// Middleware resolving the request context from the bearer token.
///
/// Never rejects for a missing, unknown or expired token: the outcome is put in
/// the request extensions as a [`CtxResult`] and each route decides through its
/// extractors or [`crate::mw_auth::mw_require_auth`]. A resolver fault aborts
/// the request with an internal error.
///
/// # Examples
///
/// ```rust,no_run
/// use axum::{Router, middleware};
/// use till_models::principal::PrincipalKind;
/// use till_web::{
///     ctx::resolver::{KindResolver, mw_ctx_resolver},
///     session::SessionService,
/// };
///
/// fn routes(service: &SessionService) -> Router {
///     Router::new().layer(middleware::from_fn_with_state(
///         service.resolver(PrincipalKind::Customer),
///         mw_ctx_resolver::<KindResolver>,
///     ))
/// }
/// ```
pub async fn mw_ctx_resolver<R>(
    State(resolver): State<R>,
    headers: HeaderMap,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response>
where
    R: Resolve + Clone,
{
    let ctx: CtxResult = match bearer_token(&headers) {
        None => Err(Unauthenticated::TokenMissing),
        Some(token) => {
            match tokio::task::spawn_blocking(move || resolver.resolve(&token)).await? {
                Ok(ctx) => Ok(ctx),
                Err(Error::TokenNotFound) => Err(Unauthenticated::TokenNotFound),
                Err(Error::TokenExpired) => Err(Unauthenticated::TokenExpired),
                Err(err) => {
                    error!("Failed to resolve session token: {err}");
                    return Err(err);
                }
            }
        }
    };

    req.extensions_mut().insert(ctx);
    Ok(next.run(req).await)
}

impl<S: Send + Sync> FromRequestParts<S> for Ctx {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        Ok(parts
            .extensions
            .get::<CtxResult>()
            .ok_or(Error::CtxMissing)?
            .clone()?)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for PrincipalId {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        Ok(parts
            .extensions
            .get::<CtxResult>()
            .ok_or(Error::CtxMissing)?
            .into())
    }
}
