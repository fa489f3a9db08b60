//! Route policy middleware.
//!
//! The gate in [`crate::ctx::resolver`] never rejects on its own. Routes that
//! need an identity add [`mw_require_auth`] as a route layer.

use axum::{extract::Request, middleware::Next, response::Response};

use crate::{ctx::Ctx, prelude::*};

/// Middleware that requires an authenticated principal for a route.
///
/// Missing, unknown and expired tokens are all answered with the same
/// `401 Unauthorized`.
///
/// # Examples
///
/// ```rust,no_run
/// use axum::{Router, routing::get};
/// use till_web::mw_auth::mw_require_auth;
///
/// let app: Router<()> = Router::new()
///     .route("/protected", get(protected_handler))
///     .route_layer(axum::middleware::from_fn(mw_require_auth));
///
/// async fn protected_handler() -> &'static str {
///     "This requires authentication"
/// }
/// ```
pub async fn mw_require_auth(ctx: Result<Ctx>, req: Request, next: Next) -> Result<Response> {
    ctx?;
    Ok(next.run(req).await)
}
