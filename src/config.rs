//! Startup configuration, built once from the environment and passed down
//! explicitly. Nothing reads the environment after startup.

use crate::error::ConfigError;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::time::Duration;

const POOL_MAX_CONNECTIONS: u32 = 5;
const POOL_MIN_CONNECTIONS: u32 = 0;
const POOL_ACQUIRE_TIMEOUT: Duration = Duration::from_millis(30_000);
const POOL_IDLE_TIMEOUT: Duration = Duration::from_millis(10_000);

#[derive(Clone, Debug)]
pub struct DbConfig {
    pub host: String,
    pub user: String,
    pub password: String,
    pub name: String,
    pub port: u16,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub db: DbConfig,
    pub listen_port: u16,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(AppConfig {
            db: DbConfig {
                host: require(&lookup, "DB_HOST")?,
                user: require(&lookup, "DB_USER")?,
                password: require(&lookup, "DB_PASSWORD")?,
                name: require(&lookup, "DB_NAME")?,
                port: require_port(&lookup, "DB_PORT")?,
            },
            listen_port: require_port(&lookup, "APP_PORT")?,
        })
    }
}

impl DbConfig {
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
    }

    /// Pool tuning: max 5, min 0, acquire 30s, idle 10s.
    pub fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(POOL_MAX_CONNECTIONS)
            .min_connections(POOL_MIN_CONNECTIONS)
            .acquire_timeout(POOL_ACQUIRE_TIMEOUT)
            .idle_timeout(POOL_IDLE_TIMEOUT)
    }
}

fn require(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<String, ConfigError> {
    lookup(var)
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingVar(var))
}

fn require_port(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<u16, ConfigError> {
    let raw = require(lookup, var)?;
    raw.parse()
        .map_err(|_| ConfigError::InvalidValue { var, value: raw })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("DB_HOST", "localhost"),
            ("DB_USER", "postgres"),
            ("DB_PASSWORD", "secret"),
            ("DB_NAME", "consultants"),
            ("DB_PORT", "5432"),
            ("APP_PORT", "8080"),
        ])
    }

    fn lookup_in(vars: HashMap<&'static str, &'static str>) -> impl Fn(&str) -> Option<String> {
        move |var| vars.get(var).map(|v| v.to_string())
    }

    #[test]
    fn builds_from_complete_environment() {
        let config = AppConfig::from_lookup(lookup_in(vars())).unwrap();
        assert_eq!(config.db.host, "localhost");
        assert_eq!(config.db.port, 5432);
        assert_eq!(config.listen_port, 8080);
    }

    #[test]
    fn missing_variable_is_an_error() {
        let mut vars = vars();
        vars.remove("DB_PASSWORD");
        let err = AppConfig::from_lookup(lookup_in(vars)).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("DB_PASSWORD")));
    }

    #[test]
    fn empty_variable_counts_as_missing() {
        let mut vars = vars();
        vars.insert("DB_HOST", "");
        let err = AppConfig::from_lookup(lookup_in(vars)).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("DB_HOST")));
    }

    #[test]
    fn non_numeric_port_is_an_error() {
        let mut vars = vars();
        vars.insert("APP_PORT", "not-a-port");
        let err = AppConfig::from_lookup(lookup_in(vars)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { var: "APP_PORT", .. }));
    }

    #[test]
    fn connect_options_carry_all_fields() {
        let config = AppConfig::from_lookup(lookup_in(vars())).unwrap();
        let opts = config.db.connect_options();
        assert_eq!(opts.get_host(), "localhost");
        assert_eq!(opts.get_port(), 5432);
        assert_eq!(opts.get_username(), "postgres");
        assert_eq!(opts.get_database(), Some("consultants"));
    }
}
