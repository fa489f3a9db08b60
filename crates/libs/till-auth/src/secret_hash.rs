//! Secure password hashing and verification using Argon2.
//!
//! Hashes are PHC strings (`$argon2id$v=19$m=..,t=..,p=..$salt$hash`) that embed
//! their own salt and work factor, so verification always uses the parameters the
//! hash was produced with, while new hashes pick up the currently configured
//! [`HashCost`].
//!
//! # Examples
//!
//! ```rust
//! use till_auth::secret_hash::{HashCost, SecretHasher};
//!
//! let hasher = SecretHasher::new(HashCost::minimal()).unwrap();
//! let hash = hasher.hash("user_password_123").unwrap();
//!
//! assert!(hasher.verify(&hash, "user_password_123").unwrap());
//! assert!(!hasher.verify(&hash, "wrong_password").unwrap());
//! ```

use std::fmt;

use argon2::{
    Algorithm, Argon2, Params, PasswordHasher, PasswordVerifier, Version,
    password_hash::{self, PasswordHash, SaltString},
};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Longest secret accepted for hashing, in bytes.
pub const MAX_SECRET_LEN: usize = 256;

/// Argon2id work factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashCost {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of passes.
    pub iterations: u32,
    /// Degree of parallelism.
    pub parallelism: u32,
}

impl Default for HashCost {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl HashCost {
    /// The cheapest cost argon2 accepts. Only meant for tests.
    pub const fn minimal() -> Self {
        Self {
            memory_kib: 32,
            iterations: 1,
            parallelism: 1,
        }
    }
}

/// Salted argon2id hasher bound to a fixed work factor.
#[derive(Clone)]
pub struct SecretHasher {
    argon2: Argon2<'static>,
}

impl fmt::Debug for SecretHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretHasher")
            .field("params", self.argon2.params())
            .finish()
    }
}

impl SecretHasher {
    /// Creates a hasher for the given work factor.
    ///
    /// Fails with [`Error::HashCost`] when argon2 rejects the parameters.
    pub fn new(cost: HashCost) -> Result<Self> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(Error::HashCost)?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Generates a secure hash for the provided secret.
    ///
    /// A fresh random salt is drawn for every call, so hashing the same secret
    /// twice yields two different strings.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - PHC hash string ready for storage
    /// * `Err(Error::InputTooLong)` - the secret exceeds [`MAX_SECRET_LEN`]
    /// * `Err(Error)` - Password hashing errors
    pub fn hash(&self, secret: &str) -> Result<String> {
        if secret.len() > MAX_SECRET_LEN {
            return Err(Error::InputTooLong {
                max: MAX_SECRET_LEN,
            });
        }
        let salt = SaltString::generate(&mut OsRng);
        Ok(self
            .argon2
            .hash_password(secret.as_bytes(), &salt)?
            .to_string())
    }

    /// Verifies a secret against a stored hash.
    ///
    /// The digest comparison inside argon2 is constant time. An error is only
    /// returned when `hash` cannot be parsed as an argon2 PHC string.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - Secret matches the hash
    /// * `Ok(false)` - Secret does not match the hash
    /// * `Err(Error)` - Malformed hash
    pub fn verify(&self, hash: &str, secret: &str) -> Result<bool> {
        let hash = PasswordHash::new(hash)?;
        if secret.len() > MAX_SECRET_LEN {
            return Ok(false);
        }

        match self.argon2.verify_password(secret.as_bytes(), &hash) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}

impl From<password_hash::Error> for Error {
    fn from(value: password_hash::Error) -> Self {
        Self::PasswordHash(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> SecretHasher {
        SecretHasher::new(HashCost::minimal()).unwrap()
    }

    #[test]
    fn hash_then_verify() {
        let hasher = hasher();
        for secret in ["s3cret", "correct horse battery staple", "пароль", " "] {
            let hash = hasher.hash(secret).unwrap();
            assert_ne!(hash, secret);
            assert!(hasher.verify(&hash, secret).unwrap());
        }
    }

    #[test]
    fn different_secret_fails() {
        let hasher = hasher();
        let hash = hasher.hash("first-secret").unwrap();
        assert!(!hasher.verify(&hash, "second-secret").unwrap());
        assert!(!hasher.verify(&hash, "first-secreT").unwrap());
        assert!(!hasher.verify(&hash, "").unwrap());
    }

    #[test]
    fn salts_are_unique() {
        let hasher = hasher();
        let first = hasher.hash("same").unwrap();
        let second = hasher.hash("same").unwrap();
        assert_ne!(first, second);
        assert!(hasher.verify(&first, "same").unwrap());
        assert!(hasher.verify(&second, "same").unwrap());
    }

    #[test]
    fn embeds_cost() {
        let hash = hasher().hash("cost").unwrap();
        assert!(hash.starts_with("$argon2id$v=19$m=32,t=1,p=1$"));
    }

    #[test]
    fn verify_uses_embedded_cost() {
        let cheap = hasher().hash("portable").unwrap();
        let other = SecretHasher::new(HashCost {
            memory_kib: 64,
            iterations: 2,
            parallelism: 1,
        })
        .unwrap();
        assert!(other.verify(&cheap, "portable").unwrap());
    }

    #[test]
    fn too_long_rejected() {
        let secret = "a".repeat(MAX_SECRET_LEN + 1);
        assert!(matches!(
            hasher().hash(&secret),
            Err(Error::InputTooLong { max: MAX_SECRET_LEN })
        ));

        let at_limit = "a".repeat(MAX_SECRET_LEN);
        let hash = hasher().hash(&at_limit).unwrap();
        assert!(hasher().verify(&hash, &at_limit).unwrap());
        assert!(!hasher().verify(&hash, &secret).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(matches!(
            hasher().verify("plaintext", "plaintext"),
            Err(Error::PasswordHash(_))
        ));
    }

    #[test]
    fn invalid_cost_is_an_error() {
        let cost = HashCost {
            memory_kib: 1,
            iterations: 0,
            parallelism: 1,
        };
        assert!(matches!(SecretHasher::new(cost), Err(Error::HashCost(_))));
    }
}
