//! Main Crate Error

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;
use tracing::{debug, error};

use crate::ctx::Unauthenticated;

/// Every way a session operation can fail.
///
/// Validation and "not found" kinds are meant for the caller; everything that
/// [`Error::is_internal`] reports is an infrastructure fault whose details stay
/// in the server log.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Models(#[from] till_models::error::Error),

    #[error(transparent)]
    Auth(#[from] till_auth::error::Error),

    #[error(transparent)]
    Join(#[from] tokio::task::JoinError),

    #[error("Login already registered")]
    LoginTaken,

    #[error("Wrong Credentials")]
    InvalidCredentials,

    #[error("Missing Credentials")]
    MissingCredentials,

    #[error("Token Missing")]
    TokenMissing,

    #[error("Token Not Found")]
    TokenNotFound,

    #[error("Token Expired")]
    TokenExpired,

    #[error("Principal Not Found")]
    PrincipalNotFound,

    #[error("Auth Token Creation")]
    AuthTokenCreation,

    #[error("Context Missing")]
    CtxMissing,
}

impl Error {
    /// Whether this is an infrastructure fault rather than a caller mistake.
    pub fn is_internal(&self) -> bool {
        match self {
            Error::Models(_) | Error::Join(_) | Error::AuthTokenCreation | Error::CtxMissing => {
                true
            }
            Error::Auth(err) => matches!(
                err,
                till_auth::error::Error::EntropyUnavailable(_)
                    | till_auth::error::Error::HashCost(_)
                    | till_auth::error::Error::PasswordHash(_)
            ),
            Error::LoginTaken
            | Error::InvalidCredentials
            | Error::MissingCredentials
            | Error::TokenMissing
            | Error::TokenNotFound
            | Error::TokenExpired
            | Error::PrincipalNotFound => false,
        }
    }
}

impl From<Unauthenticated> for Error {
    fn from(value: Unauthenticated) -> Self {
        match value {
            Unauthenticated::TokenMissing => Error::TokenMissing,
            Unauthenticated::TokenNotFound => Error::TokenNotFound,
            Unauthenticated::TokenExpired => Error::TokenExpired,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        if self.is_internal() {
            error!("Creating API error response for error: {:?}", self);
        } else {
            debug!("Creating API error response for error: {:?}", self);
        }

        let (status, message) = match self {
            Error::LoginTaken => (StatusCode::CONFLICT, "Login already registered"),
            Error::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials"),
            Error::MissingCredentials => (StatusCode::BAD_REQUEST, "Missing credentials"),
            Error::TokenMissing | Error::TokenNotFound | Error::TokenExpired => {
                (StatusCode::UNAUTHORIZED, "Authentication required")
            }
            Error::PrincipalNotFound => (StatusCode::NOT_FOUND, "Principal not found"),
            Error::Auth(till_auth::error::Error::InputTooLong { .. }) => {
                (StatusCode::BAD_REQUEST, "Input too long")
            }
            Error::Auth(till_auth::error::Error::PasswordTooShort { .. }) => {
                (StatusCode::BAD_REQUEST, "Password too short")
            }
            Error::Auth(_)
            | Error::Models(_)
            | Error::Join(_)
            | Error::AuthTokenCreation
            | Error::CtxMissing => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };

        let body = Json(json!({
            "error": {
                "message": message,
                "status": status.as_u16()
            }
        }));
        (status, body).into_response()
    }
}
