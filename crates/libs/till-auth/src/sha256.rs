//! SHA-256 hashing for token digests.

use sha2::{Digest, Sha256};

/// Generates a SHA-256 hash of the provided string.
///
/// Returns a 64-character lowercase hexadecimal string.
///
/// # Examples
///
/// ```rust
/// use till_auth::sha256::generate_hash;
///
/// let hash = generate_hash("Hello, world!");
/// assert_eq!(hash.len(), 64);
/// ```
pub fn generate_hash(payload: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(payload.as_bytes());
    hex::encode(hasher.finalize())
}
