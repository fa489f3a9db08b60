//! Authentication response structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CONNECTION_TOKEN_TYPE;

/// Authentication response with an opaque access token.
///
/// # JSON Format
///
/// ```json
/// {
///   "access_token": "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08",
///   "token_type": "Bearer",
///   "expires_at": "2026-10-20T12:00:00Z"
/// }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthBody {
    /// The access token.
    pub access_token: String,
    /// The token type (always "Bearer").
    pub token_type: String,
    /// When the token stops resolving; `None` for tokens without expiry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl AuthBody {
    /// Creates a new authentication response.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use till_auth::auth_body::AuthBody;
    ///
    /// let response = AuthBody::new("some_token".to_string(), None);
    /// assert_eq!(response.token_type, "Bearer");
    /// ```
    pub fn new(access_token: String, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            access_token,
            token_type: String::from(CONNECTION_TOKEN_TYPE),
            expires_at,
        }
    }
}
