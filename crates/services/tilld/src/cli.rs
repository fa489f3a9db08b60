//! Command-line interface for the till daemon.

use std::{net::SocketAddr, path::PathBuf};

use clap::{Parser, Subcommand};

/// Command-line interface for the till daemon.
#[derive(Parser, Debug, Default)]
#[command(name = "tilld")]
#[command(about = "Till - customer and manager session service")]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "TILLD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address the HTTP API listens on
    #[arg(short, long, env = "TILLD_BIND")]
    pub bind: Option<SocketAddr>,

    /// PostgreSQL url; principals and sessions stay in memory without one
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the till daemon.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Commands {
    /// Serve the HTTP API until interrupted (default)
    #[default]
    Serve,
    /// Print the effective configuration
    Config,
    /// Delete expired sessions from the store and exit
    Purge,
}
