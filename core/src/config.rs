//! Runtime configuration read from the environment.

use std::env;

use thiserror::Error;

pub const DEFAULT_API_BASE: &str = "http://localhost:5000";
pub const DEFAULT_USER_ID: i64 = 1;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Backend base URL, without trailing slash.
    pub api_base: String,
    /// Identity new todos are created under.
    pub user_id: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            user_id: DEFAULT_USER_ID,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// `TODO_API_BASE` wins; otherwise `APP_HOST`/`APP_PORT` build the URL
    /// when either is set; otherwise the default base.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_base = match lookup("TODO_API_BASE") {
            Some(base) => base,
            None => {
                let host = lookup("APP_HOST");
                let port = lookup("APP_PORT");
                if host.is_none() && port.is_none() {
                    DEFAULT_API_BASE.to_string()
                } else {
                    let port = match port {
                        Some(port) => parse::<u16>("APP_PORT", port)?,
                        None => 5000,
                    };
                    format!(
                        "http://{}:{port}",
                        host.unwrap_or_else(|| "localhost".to_string())
                    )
                }
            }
        };
        let user_id = match lookup("TODO_USER_ID") {
            Some(raw) => parse("TODO_USER_ID", raw)?,
            None => DEFAULT_USER_ID,
        };
        Ok(Config {
            api_base: api_base.trim_end_matches('/').to_string(),
            user_id,
        })
    }
}

fn parse<V: std::str::FromStr>(key: &'static str, raw: String) -> Result<V, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value: raw })
}
