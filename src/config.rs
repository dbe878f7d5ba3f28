use std::env;
use std::str::FromStr;

use thiserror::Error;

pub const DEFAULT_ROLE_HEADER: &str = "X-User-Roles";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has invalid value `{value}`")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    pub role_header: String,
    pub seed_hotels: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let seed_hotels = lookup("SEED_HOTELS")
            .map(|names| {
                names
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            database_url,
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&lookup, "PORT", 8080)?,
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 5)?,
            role_header: lookup("AUTH_ROLE_HEADER")
                .unwrap_or_else(|| DEFAULT_ROLE_HEADER.to_string()),
            seed_hotels,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let config = config_from(&[("DATABASE_URL", "sqlite::memory:")]).unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.role_header, DEFAULT_ROLE_HEADER);
        assert!(config.seed_hotels.is_empty());
    }

    #[test]
    fn database_url_is_required() {
        assert_eq!(
            config_from(&[]).unwrap_err(),
            ConfigError::Missing("DATABASE_URL")
        );
    }

    #[test]
    fn invalid_port_is_reported() {
        let err = config_from(&[("DATABASE_URL", "sqlite::memory:"), ("PORT", "http")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "PORT",
                value: "http".to_string()
            }
        );
    }

    #[test]
    fn seed_hotels_are_split_and_trimmed() {
        let config = config_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("SEED_HOTELS", "Plaza, Grand ,,Riviera"),
        ])
        .unwrap();

        assert_eq!(config.seed_hotels, vec!["Plaza", "Grand", "Riviera"]);
    }
}
