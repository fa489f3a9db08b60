//! Credential primitives for the till backend.
//!
//! - [`secret_hash`]: salted, adaptive argon2id password hashing and verification
//! - [`session_token`]: opaque bearer token generation and store digests
//! - [`auth_body`]: the response handed back after a successful login

pub mod auth_body;
pub mod error;
pub mod prelude;
pub mod secret_hash;
pub mod session_token;
pub mod sha256;

pub const CONNECTION_TOKEN_TYPE: &str = "Bearer";
