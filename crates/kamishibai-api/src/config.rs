//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use kamishibai_navigation::application::engine::Messages;

use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_FADE_IN_MS: u64 = 400;

/// Player server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Scenario document to present (`SCENARIO_PATH`).
    pub scenario_path: PathBuf,
    /// Bind host (`HOST`).
    pub host: String,
    /// Bind port (`PORT`).
    pub port: u16,
    /// Delay before a fade-in counts as finished (`FADE_IN_MS`).
    pub fade_in: Duration,
    /// Fixed seed for random jumps (`RNG_SEED`); OS entropy when absent.
    pub rng_seed: Option<u64>,
    /// Notification texts (`MSG_SCENARIO_NOT_FOUND`, `MSG_UNEXPECTED_ERROR`).
    pub messages: Messages,
}

impl Config {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `SCENARIO_PATH` is unset or a numeric
    /// variable does not parse.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// Same as [`Config::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let scenario_path = lookup("SCENARIO_PATH")
            .map(PathBuf::from)
            .ok_or_else(|| {
                AppError::Config("SCENARIO_PATH environment variable must be set".into())
            })?;
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let fade_in = Duration::from_millis(parse_or(&lookup, "FADE_IN_MS", DEFAULT_FADE_IN_MS)?);
        let rng_seed = lookup("RNG_SEED")
            .map(|raw| {
                raw.parse::<u64>()
                    .map_err(|e| AppError::Config(format!("RNG_SEED must be a valid u64: {e}")))
            })
            .transpose()?;

        let defaults = Messages::default();
        let messages = Messages {
            scenario_not_found: lookup("MSG_SCENARIO_NOT_FOUND")
                .unwrap_or(defaults.scenario_not_found),
            unexpected_error: lookup("MSG_UNEXPECTED_ERROR").unwrap_or(defaults.unexpected_error),
        };

        Ok(Self {
            scenario_path,
            host,
            port,
            fade_in,
            rng_seed,
            messages,
        })
    }

    /// The socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `host` and `port` do not form an address.
    pub fn addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .parse()
            .map_err(|e| AppError::Config(format!("{key} must be a valid number: {e}"))),
        None => Ok(default),
    }
}
