//! Till daemon (tilld)
//!
//! Serves registration, login and session endpoints for customers under
//! `/api/customers` and managers under `/api/managers`. Principals and
//! sessions live in PostgreSQL, or in memory when no database is configured.

use till_models::{
    db::{config::DbConfig, connection::DbConnection},
    store::MemoryStore,
};
use till_web::session::SessionService;
use tracing::{info, warn};

use crate::{config::ServerConfig, prelude::*};

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod prelude;
pub mod state;

/// Connects the configured store and builds the session service on top of it.
///
/// PostgreSQL stores get their pending migrations applied first.
pub fn build_session(config: &ServerConfig) -> Result<SessionService> {
    let session_config = config.session_config()?;
    let session = match &config.database_url {
        Some(url) => {
            let db_config = DbConfig::new(url.as_str());
            info!("Connecting to {db_config}");
            let connection = DbConnection::new(&db_config)?.setup()?;
            SessionService::from_store(connection, session_config)?
        }
        None => {
            warn!("No database configured, sessions will not survive a restart");
            SessionService::from_store(MemoryStore::new(), session_config)?
        }
    };
    Ok(session)
}

/// Deletes expired sessions from the configured database.
///
/// The in-memory store starts empty on every run, so purging requires a
/// database and fails with [`Error::NoDatabase`] without one.
pub fn purge_expired(config: &ServerConfig) -> Result<usize> {
    if config.database_url.is_none() {
        return Err(Error::NoDatabase);
    }
    Ok(build_session(config)?.purge_expired()?)
}
