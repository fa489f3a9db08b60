//! Database error types.

/// Database operation errors.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Database connection pool error.
    #[error(transparent)]
    R2D2(#[from] diesel::r2d2::PoolError),

    /// Diesel ORM operation error.
    #[error(transparent)]
    Diesel(#[from] diesel::result::Error),

    /// Pending migrations could not be applied.
    #[error("Failed to run database migrations: {0}")]
    Migration(String),

    /// A uniqueness constraint rejected the write.
    #[error("Record already exists")]
    Conflict,

    /// A stored principal kind has no matching variant.
    #[error("Unknown principal kind {0}")]
    UnknownKind(i32),
}
