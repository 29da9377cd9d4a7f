//! Runtime configuration
//!
//! Values come from the process environment, optionally seeded from a
//! `.env` file by `main`.

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATABASE_URL: &str = "shorturls.db";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORT value {value:?}: {source}")]
    InvalidPort {
        value: String,
        source: std::num::ParseIntError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Listening port
    pub port: u16,
    /// Path of the redb database file
    pub database_url: String,
    /// Prefix of generated short URLs
    pub base_url: String,
}

impl Config {
    /// Reads `PORT`, `DATABASE_URL` and `BASE_URL`.
    ///
    /// - `PORT` - Server port number (default: 3000)
    /// - `DATABASE_URL` - Path to database file (default: "shorturls.db")
    /// - `BASE_URL` - Short URL prefix (default: "http://localhost:{PORT}")
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidPort { value, source })?,
            None => DEFAULT_PORT,
        };

        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let base_url = lookup("BASE_URL")
            .unwrap_or_else(|| format!("http://localhost:{}", port))
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            port,
            database_url,
            base_url,
        })
    }
}
