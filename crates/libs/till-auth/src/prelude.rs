//! Common types and utilities.

/// Credential error type.
pub use crate::error::Error;

/// Credential result type.
pub type Result<T> = core::result::Result<T, Error>;
