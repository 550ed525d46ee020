//! Service configuration, read once from the environment at startup.
//!
//! | variable           | default                  |
//! |--------------------|--------------------------|
//! | `DATABASE_URL`     | AWS default endpoint     |
//! | `DATABASE_NAME`    | `chess-archive`          |
//! | `PORT`             | `8000`                   |
//! | `LOG_LEVEL`        | `info`                   |
//! | `CHESSCOM_API_URL` | `https://api.chess.com`  |
//! | `LICHESS_API_URL`  | `https://lichess.org`    |
//!
//! `DATABASE_URL=memory` keeps games in process memory instead of DynamoDB.

use std::str::FromStr;

use shared::clients::chesscom_client::CHESSCOM_BASE_URL;
use shared::clients::lichess_client::LICHESS_BASE_URL;
use thiserror::Error;
use tracing::Level;

pub const MEMORY_DATABASE_URL: &str = "memory";
const DEFAULT_DATABASE_NAME: &str = "chess-archive";
const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid PORT: {0}")]
    InvalidPort(String),
    #[error("Invalid LOG_LEVEL: {0}")]
    InvalidLogLevel(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    pub port: u16,
    pub log_level: Level,
    pub chesscom_api_url: String,
    pub lichess_api_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match get("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port))?,
            None => DEFAULT_PORT,
        };

        let log_level = match get("LOG_LEVEL") {
            Some(level) => {
                Level::from_str(level.trim()).map_err(|_| ConfigError::InvalidLogLevel(level))?
            }
            None => Level::INFO,
        };

        Ok(Config {
            database_url: get("DATABASE_URL"),
            database_name: get("DATABASE_NAME"),
            port,
            log_level,
            chesscom_api_url: get("CHESSCOM_API_URL")
                .unwrap_or_else(|| CHESSCOM_BASE_URL.to_string()),
            lichess_api_url: get("LICHESS_API_URL").unwrap_or_else(|| LICHESS_BASE_URL.to_string()),
        })
    }

    pub fn database_name_or_default(&self) -> &str {
        self.database_name.as_deref().unwrap_or(DEFAULT_DATABASE_NAME)
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database_url.as_deref() == Some(MEMORY_DATABASE_URL)
    }
}
