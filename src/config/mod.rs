//! Configuration module for the league admin backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const ENV_API_PSK: &str = "LEAGUE_API_PSK";
pub const ENV_DB_PATH: &str = "LEAGUE_DB_PATH";
pub const ENV_SESSION_CACHE_PATH: &str = "LEAGUE_SESSION_CACHE_PATH";
pub const ENV_BIND_ADDR: &str = "LEAGUE_BIND_ADDR";
pub const ENV_LOG_LEVEL: &str = "LEAGUE_LOG_LEVEL";

/// Configuration errors surfaced at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid LEAGUE_BIND_ADDR format: {0}")]
    InvalidBindAddr(String),
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pre-shared key for API authentication (required in production)
    pub api_psk: Option<String>,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Snapshot of the last signed-in user
    pub session_cache_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables, reading `.env` first.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_psk = lookup(ENV_API_PSK).filter(|psk| !psk.is_empty());

        let db_path = lookup(ENV_DB_PATH)
            .unwrap_or_else(|| "./data/league.sqlite".to_string())
            .into();

        let session_cache_path = lookup(ENV_SESSION_CACHE_PATH)
            .unwrap_or_else(|| "./data/session.json".to_string())
            .into();

        let raw_addr = lookup(ENV_BIND_ADDR).unwrap_or_else(|| "127.0.0.1:8080".to_string());
        let bind_addr = raw_addr
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr(raw_addr.clone()))?;

        let log_level = lookup(ENV_LOG_LEVEL).unwrap_or_else(|| "info".to_string());

        Ok(Self {
            api_psk,
            db_path,
            session_cache_path,
            bind_addr,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_config() {
        let config = config_from(&[]).unwrap();

        assert!(config.api_psk.is_none());
        assert_eq!(config.db_path, PathBuf::from("./data/league.sqlite"));
        assert_eq!(config.session_cache_path, PathBuf::from("./data/session.json"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_overrides_and_empty_psk() {
        let config = config_from(&[
            (ENV_API_PSK, ""),
            (ENV_DB_PATH, "/tmp/league.sqlite"),
            (ENV_BIND_ADDR, "0.0.0.0:9000"),
        ])
        .unwrap();

        assert!(config.api_psk.is_none());
        assert_eq!(config.db_path, PathBuf::from("/tmp/league.sqlite"));
        assert_eq!(config.bind_addr.port(), 9000);
    }

    #[test]
    fn test_invalid_bind_addr() {
        let err = config_from(&[(ENV_BIND_ADDR, "localhost")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBindAddr(ref addr) if addr == "localhost"));
    }
}
