use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware,
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use till_auth::auth_body::AuthBody;
use till_models::principal::PrincipalKind;
use till_web::{
    ctx::{
        Ctx, PrincipalId,
        resolver::{KindResolver, bearer_token, mw_ctx_resolver},
    },
    error::Error as WebError,
    mw_auth::mw_require_auth,
    prelude::Result as WebResult,
    principal::{LoginRequest, PrincipalApi, RegisterRequest},
    session::{Profile, SessionService},
};
use tokio::{net::TcpListener, task::JoinHandle};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::{error, info};

use crate::{prelude::*, state::ApiState};

pub const CUSTOMERS: &str = "/api/customers";
pub const MANAGERS: &str = "/api/managers";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhoAmI {
    pub principal_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revoked {
    pub revoked: usize,
}

/// Builds the HTTP API for both principal kinds.
pub fn router(session: SessionService) -> Router {
    Router::new()
        .nest(CUSTOMERS, kind_routes(&session, PrincipalKind::Customer))
        .nest(MANAGERS, kind_routes(&session, PrincipalKind::Manager))
        .layer(
            TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()),
        )
        .layer(CorsLayer::permissive())
}

/// Routes of one principal kind, behind a gate that only accepts its tokens.
fn kind_routes(session: &SessionService, kind: PrincipalKind) -> Router {
    Router::new()
        .route("/token", delete(revoke_token))
        .route("/tokens", delete(revoke_tokens))
        .route("/me", get(me))
        .route_layer(middleware::from_fn(mw_require_auth))
        .route("/", post(register))
        .route("/token", post(login))
        .route("/whoami", get(whoami))
        .layer(middleware::from_fn_with_state(
            session.resolver(kind),
            mw_ctx_resolver::<KindResolver>,
        ))
        .with_state(ApiState::new(session.clone(), kind))
}

/// Binds `listener` to the API and serves it on a background task.
pub async fn setup_api(
    listener: TcpListener,
    session: SessionService,
) -> Result<JoinHandle<Result<()>>> {
    info!("Listening on {}", listener.local_addr()?);
    let app = router(session);
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await?;
        Ok(())
    });
    Ok(handle)
}

/// Waits until `shutdown` resolves or the API task ends, whichever comes first.
///
/// The API task only ends on failure, so its end is reported as an error.
pub async fn run_until<F>(api_handle: JoinHandle<Result<()>>, shutdown: F) -> Result<()>
where
    F: Future<Output = std::io::Result<()>>,
{
    tokio::select! {
        result = api_handle => {
            error!("API server stopped: {:?}", result);
            result??;
            Err(Error::ServerStopped)
        }
        result = shutdown => {
            result?;
            info!("Shutting down");
            Ok(())
        }
    }
}

async fn register(
    State(state): State<ApiState>,
    Json(payload): Json<RegisterRequest>,
) -> WebResult<(StatusCode, Json<PrincipalApi>)> {
    let principal = state
        .run(move |session, kind| {
            let profile = Profile { name: payload.name };
            session.register(kind, &payload.login, &payload.password, profile)
        })
        .await?;
    Ok((StatusCode::CREATED, Json(principal.into())))
}

async fn login(
    State(state): State<ApiState>,
    Json(payload): Json<LoginRequest>,
) -> WebResult<Json<AuthBody>> {
    let body = state
        .run(move |session, kind| session.authenticate(kind, &payload.login, &payload.password))
        .await?;
    Ok(Json(body))
}

async fn revoke_token(
    State(state): State<ApiState>,
    headers: HeaderMap,
) -> WebResult<StatusCode> {
    let token = bearer_token(&headers).ok_or(WebError::TokenMissing)?;
    state
        .run(move |session, _| session.revoke(&token))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn revoke_tokens(State(state): State<ApiState>, ctx: Ctx) -> WebResult<Json<Revoked>> {
    let revoked = state
        .run(move |session, kind| session.revoke_all(kind, ctx.principal_id))
        .await?;
    Ok(Json(Revoked { revoked }))
}

async fn me(State(state): State<ApiState>, ctx: Ctx) -> WebResult<Json<PrincipalApi>> {
    let principal = state
        .run(move |session, kind| session.principal(kind, ctx.principal_id))
        .await?;
    Ok(Json(principal.into()))
}

async fn whoami(id: PrincipalId) -> Json<WhoAmI> {
    Json(WhoAmI { principal_id: id.0 })
}
