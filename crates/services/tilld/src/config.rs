//! Daemon configuration.
//!
//! Values come from defaults, then the optional TOML file, then the command
//! line (or its environment variables), each layer overriding the previous one.

use std::{fmt, net::SocketAddr, path::Path};

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use till_auth::secret_hash::HashCost;
use till_web::session::{DEFAULT_MIN_PASSWORD_LEN, SessionConfig};

use crate::{cli::Cli, prelude::*};

pub const DEFAULT_BIND: SocketAddr =
    SocketAddr::V4(std::net::SocketAddrV4::new(std::net::Ipv4Addr::LOCALHOST, 9999));

pub const DEFAULT_TOKEN_TTL_SECS: u64 = 24 * 60 * 60;

#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// `None` keeps principals and sessions in memory.
    pub database_url: Option<String>,
    pub session: SessionSection,
    pub hash: HashCost,
}

/// The `[session]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionSection {
    /// Token lifetime in seconds, `0` for tokens that never expire.
    pub token_ttl_secs: u64,
    pub min_password_len: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND,
            database_url: None,
            session: SessionSection::default(),
            hash: HashCost::default(),
        }
    }
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            min_password_len: DEFAULT_MIN_PASSWORD_LEN,
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(file_path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(file_path)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML string.
    pub fn from_toml(value: &str) -> Result<Self> {
        Ok(toml::from_str(value)?)
    }

    /// Builds the effective configuration for a command line.
    pub fn load(cli: &Cli) -> Result<Self> {
        let config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(config.with_overrides(cli))
    }

    /// Applies the values given on the command line.
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(bind) = cli.bind {
            self.bind = bind;
        }
        if let Some(database_url) = &cli.database_url {
            self.database_url = Some(database_url.clone());
        }
        self
    }

    pub fn session_config(&self) -> Result<SessionConfig> {
        Ok(SessionConfig {
            token_ttl: self.session.token_ttl()?,
            min_password_len: self.session.min_password_len,
            hash_cost: self.hash,
        })
    }
}

impl SessionSection {
    pub fn token_ttl(&self) -> Result<Option<TimeDelta>> {
        if self.token_ttl_secs == 0 {
            return Ok(None);
        }
        i64::try_from(self.token_ttl_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .map(Some)
            .ok_or(Error::InvalidTokenTtl(self.token_ttl_secs))
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bind", &self.bind)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "REDACTED"),
            )
            .field("session", &self.session)
            .field("hash", &self.hash)
            .finish()
    }
}

impl fmt::Display for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "bind = {}", self.bind)?;
        match self.database_url {
            Some(_) => writeln!(f, "store = postgres (REDACTED)")?,
            None => writeln!(f, "store = memory")?,
        }
        match self.session.token_ttl_secs {
            0 => writeln!(f, "token ttl = never expires")?,
            secs => writeln!(f, "token ttl = {secs}s")?,
        }
        writeln!(
            f,
            "min password length = {}",
            self.session.min_password_len
        )?;
        write!(
            f,
            "argon2id m={}KiB t={} p={}",
            self.hash.memory_kib, self.hash.iterations, self.hash.parallelism
        )
    }
}
