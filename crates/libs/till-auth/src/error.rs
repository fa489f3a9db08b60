//! Credential error types.

/// Errors raised while hashing secrets or minting tokens.
#[derive(Debug, thiserror::Error, Clone)]
pub enum Error {
    /// The secret exceeds [`crate::secret_hash::MAX_SECRET_LEN`] bytes.
    #[error("Input longer than {max} bytes")]
    InputTooLong { max: usize },

    /// The secret is shorter than the configured minimum.
    #[error("Password shorter than {min} bytes")]
    PasswordTooShort { min: usize },

    /// The operating system randomness source failed to fill the buffer.
    #[error("Entropy source unavailable: {0}")]
    EntropyUnavailable(String),

    /// The configured argon2 work factor is invalid.
    #[error("Invalid hash cost {0}")]
    HashCost(argon2::Error),

    #[error("Error hashing password {0}")]
    PasswordHash(argon2::password_hash::Error),
}
