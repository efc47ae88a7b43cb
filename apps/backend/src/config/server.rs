use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::AppError;

/// Process configuration read from `TRUCO_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// How long a match whose seats are all disconnected survives.
    pub abandon_grace: Duration,
    /// Interval between websocket pings.
    pub heartbeat_interval: Duration,
    /// Silence after which a websocket is considered dead.
    pub client_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            abandon_grace: Duration::from_secs(60),
            heartbeat_interval: Duration::from_secs(20),
            client_timeout: Duration::from_secs(40),
        }
    }
}

impl ServerConfig {
    /// Read from the process environment. Unset variables take defaults.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read through an arbitrary lookup, e.g. a map in tests.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let defaults = Self::default();
        let config = Self {
            host: lookup("TRUCO_HOST").unwrap_or(defaults.host),
            port: parse_var(&lookup, "TRUCO_PORT")?.unwrap_or(defaults.port),
            abandon_grace: secs_var(&lookup, "TRUCO_ABANDON_GRACE_SECS")?
                .unwrap_or(defaults.abandon_grace),
            heartbeat_interval: secs_var(&lookup, "TRUCO_HEARTBEAT_SECS")?
                .unwrap_or(defaults.heartbeat_interval),
            client_timeout: secs_var(&lookup, "TRUCO_CLIENT_TIMEOUT_SECS")?
                .unwrap_or(defaults.client_timeout),
        };

        if config.client_timeout <= config.heartbeat_interval {
            return Err(AppError::config(format!(
                "TRUCO_CLIENT_TIMEOUT_SECS ({}) must exceed TRUCO_HEARTBEAT_SECS ({})",
                config.client_timeout.as_secs(),
                config.heartbeat_interval.as_secs()
            )));
        }
        Ok(config)
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Result<Option<T>, AppError> {
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| {
            AppError::config(format!("Environment variable '{name}' has invalid value '{raw}'"))
        }),
    }
}

fn secs_var(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Result<Option<Duration>, AppError> {
    Ok(parse_var::<u64>(lookup, name)?.map(Duration::from_secs))
}
