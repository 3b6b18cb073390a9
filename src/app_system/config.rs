use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use reqwest::Url;
use thiserror::Error;
use tracing::info;

use crate::domain::Credentials;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime settings for one page session, read from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: Url,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub channel_buffer: usize,
    pub credentials: Option<Credentials>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `load` passes the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_base_url = normalize_base(try_load(&lookup, "CANTEEN_API_BASE_URL", "http://127.0.0.1:5000/")?);
        let request_timeout = Duration::from_secs(try_load(&lookup, "CANTEEN_REQUEST_TIMEOUT_SECS", "15")?);
        let connect_timeout = Duration::from_secs(try_load(&lookup, "CANTEEN_CONNECT_TIMEOUT_SECS", "5")?);
        let channel_buffer: usize = try_load(&lookup, "CANTEEN_CHANNEL_BUFFER", "32")?;
        if channel_buffer == 0 {
            return Err(ConfigError::Invalid {
                key: "CANTEEN_CHANNEL_BUFFER",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        let credentials = match (lookup("CANTEEN_EMAIL"), lookup("CANTEEN_PASSWORD")) {
            (Some(email), Some(password)) => Some(Credentials::new(email, password)),
            _ => None,
        };

        Ok(Self {
            api_base_url,
            request_timeout,
            connect_timeout,
            channel_buffer,
            credentials,
        })
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    let parsed = value.trim().parse::<T>();
    parsed.map_err(|e| ConfigError::Invalid {
        key,
        reason: e.to_string(),
        value,
    })
}

/// Endpoints are joined onto the base, which only works if its path ends in `/`.
fn normalize_base(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
