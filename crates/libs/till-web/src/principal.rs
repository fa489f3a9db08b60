//! Request and response bodies for principal endpoints.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use till_models::principal::{Principal, PrincipalKind};

#[derive(Deserialize, Clone)]
pub struct RegisterRequest {
    pub login: String,
    pub password: String,
    #[serde(default)]
    pub name: String,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .finish()
    }
}

#[derive(Deserialize, Clone)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Public view of a [`Principal`]. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrincipalApi {
    pub id: i64,
    pub kind: PrincipalKind,
    pub login: String,
    pub name: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Principal> for PrincipalApi {
    fn from(value: Principal) -> Self {
        Self {
            id: value.id,
            kind: value.kind,
            login: value.login,
            name: value.name,
            active: value.active,
            created_at: value.created_at,
        }
    }
}

impl fmt::Display for PrincipalApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.kind, self.login, self.id)
    }
}
