use std::net::SocketAddr;

use thiserror::Error;

use crate::external::alphavantage::DEFAULT_BASE_URL;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub api_key: String,
    pub provider_base_url: String,
    pub bind_addr: SocketAddr,
    pub db_max_connections: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        // AV_API_KEY is the older name for the same key.
        let api_key = lookup("ALPHAVANTAGE_API_KEY")
            .or_else(|| lookup("AV_API_KEY"))
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::Missing("ALPHAVANTAGE_API_KEY"))?;

        let provider_base_url = lookup("ALPHAVANTAGE_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let bind_addr = match lookup("BIND_ADDR") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::Invalid { name: "BIND_ADDR", value })?,
            None => SocketAddr::from(([0, 0, 0, 0], 8080)),
        };

        let db_max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::Invalid { name: "DB_MAX_CONNECTIONS", value })?,
            None => 10,
        };

        Ok(Self {
            database_url,
            api_key,
            provider_base_url,
            bind_addr,
            db_max_connections,
        })
    }
}
