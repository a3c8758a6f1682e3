//! Server configuration loaded from environment variables and CLI flags.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::db::Database;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;

/// Where the SQLite database lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DatabaseLocation {
    /// The platform data directory (see [`Database::default_path`]).
    Default,
    Path(PathBuf),
    /// Nothing survives a restart. Useful for demos and tests.
    Memory,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind (from RETRO_BOARD_HOST)
    pub host: String,
    /// Port to bind (from RETRO_BOARD_PORT)
    pub port: u16,
    /// Database file (from RETRO_BOARD_DATABASE)
    pub database: DatabaseLocation,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key/value source. Unparseable values fall
    /// back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("RETRO_BOARD_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = lookup("RETRO_BOARD_PORT")
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let database = match lookup("RETRO_BOARD_DATABASE") {
            Some(path) if path == ":memory:" => DatabaseLocation::Memory,
            Some(path) if !path.trim().is_empty() => DatabaseLocation::Path(PathBuf::from(path)),
            _ => DatabaseLocation::Default,
        };

        Self {
            host,
            port,
            database,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Open the configured database and bring its schema up to date.
    pub fn open_database(&self) -> Result<Database> {
        let db = match &self.database {
            DatabaseLocation::Default => Database::open_default(),
            DatabaseLocation::Path(path) => Database::open(path.clone()),
            DatabaseLocation::Memory => Database::open_memory(),
        }
        .context("Failed to open database")?;

        db.migrate().context("Failed to run migrations")?;
        Ok(db)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database: DatabaseLocation::Default,
        }
    }
}
