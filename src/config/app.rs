//! Application configuration read from environment variables.
//!
//! `.env` is loaded by `main` before this runs, so values may come from either
//! the file or the real environment.

use super::database::DEFAULT_DATABASE_URL;
use crate::errors::{Error, Result};
use std::path::PathBuf;

/// Runtime settings for the API process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `SeaORM` connection string (`DATABASE_URL`)
    pub database_url: String,
    /// Interface to bind (`HOST`)
    pub host: String,
    /// Port to bind (`PORT`)
    pub port: u16,
    /// Allowed CORS origins (`CORS_ORIGINS`, comma separated, `*` for any)
    pub cors_origins: Vec<String>,
    /// Run the seed loader before serving (`SEED_ON_STARTUP`)
    pub seed_on_startup: bool,
    /// Alternative seed dataset (`SEED_DATA_PATH`)
    pub seed_data_path: Option<PathBuf>,
}

impl AppConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// # Errors
    /// Returns `Error::Config` if `PORT` or `SEED_ON_STARTUP` cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url =
            non_empty(lookup("DATABASE_URL")).unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let host = non_empty(lookup("HOST")).unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match non_empty(lookup("PORT")) {
            Some(raw) => raw.parse::<u16>().map_err(|e| Error::Config {
                message: format!("Invalid PORT '{raw}': {e}"),
            })?,
            None => 8001,
        };

        let cors_origins = non_empty(lookup("CORS_ORIGINS")).map_or_else(
            || vec!["*".to_string()],
            |raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(ToString::to_string)
                    .collect()
            },
        );

        let seed_on_startup = match non_empty(lookup("SEED_ON_STARTUP")) {
            Some(raw) => parse_bool(&raw).ok_or_else(|| Error::Config {
                message: format!("Invalid SEED_ON_STARTUP '{raw}': expected true or false"),
            })?,
            None => false,
        };

        let seed_data_path = non_empty(lookup("SEED_DATA_PATH")).map(PathBuf::from);

        Ok(Self {
            database_url,
            host,
            port,
            cors_origins,
            seed_on_startup,
            seed_data_path,
        })
    }

    /// `host:port` string for the TCP listener.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// True when any origin may call the API.
    #[must_use]
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|origin| origin == "*")
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.bind_address(), "0.0.0.0:8001");
        assert!(config.allows_any_origin());
        assert!(!config.seed_on_startup);
        assert!(config.seed_data_path.is_none());
    }

    #[test]
    fn test_explicit_values() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("CORS_ORIGINS", "https://dryfruto.com, http://localhost:3000,"),
            ("SEED_ON_STARTUP", "yes"),
            ("SEED_DATA_PATH", "seed/custom.toml"),
        ]))
        .unwrap();

        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.bind_address(), "127.0.0.1:9000");
        assert_eq!(
            config.cors_origins,
            vec!["https://dryfruto.com", "http://localhost:3000"]
        );
        assert!(!config.allows_any_origin());
        assert!(config.seed_on_startup);
        assert_eq!(
            config.seed_data_path,
            Some(PathBuf::from("seed/custom.toml"))
        );
    }

    #[test]
    fn test_invalid_port_is_config_error() {
        let result = AppConfig::from_lookup(lookup_from(&[("PORT", "eighty")]));
        assert!(matches!(result, Err(Error::Config { message: _ })));
    }

    #[test]
    fn test_invalid_seed_flag_is_config_error() {
        let result = AppConfig::from_lookup(lookup_from(&[("SEED_ON_STARTUP", "maybe")]));
        assert!(matches!(result, Err(Error::Config { message: _ })));
    }
}
