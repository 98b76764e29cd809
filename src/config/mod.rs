use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::apply_security_headers;

/// `DATABASE_URL` value that selects the in-process store.
pub const MEMORY_DATABASE_URL: &str = "memory";

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/cleanup";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_STATEMENT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SERVER_PORT: u16 = 3001;
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub statement_timeout: Duration,
    pub server_port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub include_hsts: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Missing keys take
    /// their default and unparseable numbers fall back with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let origins =
            lookup("CORS_ALLOWED_ORIGINS").unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string());
        let include_hsts = lookup("RUST_ENV")
            .map(|v| v.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        Self {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            max_connections: parsed(&lookup, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS),
            statement_timeout: Duration::from_secs(parsed(
                &lookup,
                "STATEMENT_TIMEOUT_SECS",
                DEFAULT_STATEMENT_TIMEOUT_SECS,
            )),
            server_port: parsed(&lookup, "SERVER_PORT", DEFAULT_SERVER_PORT),
            cors_allowed_origins: origins
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_owned)
                .collect(),
            include_hsts,
        }
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database_url == MEMORY_DATABASE_URL
    }
}

fn parsed<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, fallback = %default, "Invalid config value");
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.statement_timeout, Duration::from_secs(30));
        assert_eq!(config.server_port, 3001);
        assert_eq!(config.cors_allowed_origins.len(), 2);
        assert!(!config.include_hsts);
        assert!(!config.uses_memory_store());
    }

    #[test]
    fn test_invalid_numbers_fall_back() {
        let config = config(&[("SERVER_PORT", "not-a-port"), ("DATABASE_MAX_CONNECTIONS", "12")]);
        assert_eq!(config.server_port, 3001);
        assert_eq!(config.max_connections, 12);
    }

    #[test]
    fn test_production_enables_hsts_and_memory_url_is_detected() {
        let config = config(&[
            ("RUST_ENV", "Production"),
            ("DATABASE_URL", "memory"),
            ("CORS_ALLOWED_ORIGINS", " https://cleanup.example , ,"),
        ]);
        assert!(config.include_hsts);
        assert!(config.uses_memory_store());
        assert_eq!(config.cors_allowed_origins, vec!["https://cleanup.example"]);
    }
}
