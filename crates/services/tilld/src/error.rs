//! Error types for the till daemon.

/// Errors that stop the daemon or one of its commands.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Auth(#[from] till_auth::error::Error),

    #[error(transparent)]
    Model(#[from] till_models::error::Error),

    #[error(transparent)]
    Web(#[from] till_web::error::Error),

    #[error(transparent)]
    Join(#[from] tokio::task::JoinError),

    #[error("No database configured, nothing to purge")]
    NoDatabase,

    #[error("API server stopped unexpectedly")]
    ServerStopped,

    #[error("Token lifetime of {0} seconds is out of range")]
    InvalidTokenTtl(u64),
}
