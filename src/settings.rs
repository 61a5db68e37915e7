//! Process settings from environment variables.

use crate::error::ConfigError;
use regex::Regex;
use std::net::SocketAddr;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/listboard";
pub const DEFAULT_SCHEMA: &str = "public";
pub const DEFAULT_BIND: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// `DATABASE_URL`
    pub database_url: String,
    /// `LISTBOARD_SCHEMA`: schema holding the account and listing tables.
    pub db_schema: String,
    /// `LISTBOARD_BIND`
    pub bind_addr: SocketAddr,
    /// `LISTBOARD_MAX_CONNECTIONS`
    pub max_connections: u32,
}

impl Settings {
    /// Read `.env` if present, then the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());

        let db_schema = get("LISTBOARD_SCHEMA").unwrap_or_else(|| DEFAULT_SCHEMA.into());
        let ident = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,62}$").map_err(|e| ConfigError::Invalid {
            key: "LISTBOARD_SCHEMA",
            message: e.to_string(),
        })?;
        if !ident.is_match(&db_schema) {
            return Err(ConfigError::Invalid {
                key: "LISTBOARD_SCHEMA",
                message: format!("'{}' is not a valid identifier", db_schema),
            });
        }

        let bind = get("LISTBOARD_BIND").unwrap_or_else(|| DEFAULT_BIND.into());
        let bind_addr = bind.parse().map_err(|_| ConfigError::Invalid {
            key: "LISTBOARD_BIND",
            message: format!("'{}' is not a socket address", bind),
        })?;

        let max_connections = match get("LISTBOARD_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ConfigError::Invalid {
                    key: "LISTBOARD_MAX_CONNECTIONS",
                    message: format!("'{}' is not a positive integer", raw),
                })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Settings {
            database_url,
            db_schema,
            bind_addr,
            max_connections,
        })
    }
}
