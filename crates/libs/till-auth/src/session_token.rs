//! Opaque session token generation.
//!
//! A token is 32 bytes from the operating system CSPRNG, hex encoded. It carries
//! no structure; everything known about a session lives in the token store, keyed
//! by [`token_digest`] so the raw token is never persisted.

use rand::{RngCore, rngs::OsRng};
use tracing::error;

use crate::{prelude::*, sha256::generate_hash};

/// Random bytes per token (256 bits).
pub const TOKEN_BYTES: usize = 32;

/// Length of an encoded token.
pub const TOKEN_LEN: usize = TOKEN_BYTES * 2;

/// Generates a new session token.
///
/// Never falls back to a weaker source: if the OS randomness source cannot fill
/// the buffer the call fails with [`Error::EntropyUnavailable`].
///
/// # Examples
///
/// ```rust
/// use till_auth::session_token::{TOKEN_LEN, generate_token};
///
/// let token = generate_token().unwrap();
/// assert_eq!(token.len(), TOKEN_LEN);
/// ```
pub fn generate_token() -> Result<String> {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.try_fill_bytes(&mut bytes).map_err(|err| {
        error!("OS randomness source failed: {err}");
        Error::EntropyUnavailable(err.to_string())
    })?;
    Ok(hex::encode(bytes))
}

/// Returns whether `token` has the shape produced by [`generate_token`].
///
/// Lets callers discard garbage before touching the store.
pub fn is_well_formed(token: &str) -> bool {
    token.len() == TOKEN_LEN && token.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Digest under which a token is persisted.
pub fn token_digest(token: &str) -> String {
    generate_hash(token)
}
