//! Database configuration management.

use std::fmt::Display;

/// Default number of pooled connections.
pub const DEFAULT_POOL_SIZE: u32 = 10;

/// Database connection configuration.
#[derive(Clone)]
pub struct DbConfig {
    /// PostgreSQL database URL.
    pub database_url: String,
    /// Maximum number of pooled connections.
    pub pool_size: u32,
}

impl DbConfig {
    /// Creates a configuration for `database_url` with the default pool size.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            pool_size: DEFAULT_POOL_SIZE,
        }
    }

    /// Create database configuration from environment variables.
    ///
    /// Reads the `DATABASE_URL` environment variable; `None` when it is unset.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use till_models::db::config::DbConfig;
    ///
    /// let config = DbConfig::from_env();
    /// ```
    pub fn from_env() -> Option<Self> {
        std::env::var("DATABASE_URL").ok().map(Self::new)
    }
}

impl Display for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "REDACTED")
    }
}

impl std::fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConfig")
            .field("database_url", &"REDACTED")
            .field("pool_size", &self.pool_size)
            .finish()
    }
}
