//! Configuration module for the Sitesmith backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pre-shared operator key for the admin API (required in production)
    pub operator_key: Option<String>,
    /// Path to the SQLite file backing the document store
    pub db_path: PathBuf,
    /// Directory holding uploaded assets (brand logos, slides, product images)
    pub assets_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let operator_key = env::var("SITESMITH_OPERATOR_KEY").ok();

        let db_path = env::var("SITESMITH_DB_PATH")
            .unwrap_or_else(|_| "./data/app.sqlite".to_string())
            .into();

        let assets_path = env::var("SITESMITH_ASSETS_PATH")
            .unwrap_or_else(|_| "./data/assets".to_string())
            .into();

        let bind_addr = env::var("SITESMITH_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid SITESMITH_BIND_ADDR format");

        let log_level = env::var("SITESMITH_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            operator_key,
            db_path,
            assets_path,
            bind_addr,
            log_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("SITESMITH_OPERATOR_KEY");
        env::remove_var("SITESMITH_DB_PATH");
        env::remove_var("SITESMITH_ASSETS_PATH");
        env::remove_var("SITESMITH_BIND_ADDR");
        env::remove_var("SITESMITH_LOG_LEVEL");

        let config = Config::from_env();

        assert!(config.operator_key.is_none());
        assert_eq!(config.db_path, PathBuf::from("./data/app.sqlite"));
        assert_eq!(config.assets_path, PathBuf::from("./data/assets"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
    }
}
