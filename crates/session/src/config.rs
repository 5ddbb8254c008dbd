//! Session configuration, read from the environment.
//!
//! | Variable | Default |
//! |---|---|
//! | `SUPPLYHUB_SYNC_MODE` | `mock` (`mock` or `http`) |
//! | `SUPPLYHUB_API_URL` | `http://localhost:8000` |
//! | `SUPPLYHUB_API_TOKEN` | unset |
//! | `SUPPLYHUB_SYNC_TIMEOUT_MS` | `5000` |
//! | `SUPPLYHUB_LOCALE` | `ru-RU` |
//! | `SUPPLYHUB_CURRENCY` | `KZT` |
//! | `SUPPLYHUB_PRICE_DIGITS` | `0` |

use std::time::Duration;

use supplyhub_catalog::CurrencyFormat;
use thiserror::Error;

pub const SYNC_MODE_ENV: &str = "SUPPLYHUB_SYNC_MODE";
pub const API_URL_ENV: &str = "SUPPLYHUB_API_URL";
pub const API_TOKEN_ENV: &str = "SUPPLYHUB_API_TOKEN";
pub const SYNC_TIMEOUT_ENV: &str = "SUPPLYHUB_SYNC_TIMEOUT_MS";
pub const LOCALE_ENV: &str = "SUPPLYHUB_LOCALE";
pub const CURRENCY_ENV: &str = "SUPPLYHUB_CURRENCY";
pub const PRICE_DIGITS_ENV: &str = "SUPPLYHUB_PRICE_DIGITS";

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_SYNC_TIMEOUT: Duration = Duration::from_millis(5000);

/// Where catalog changes go after being applied locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncMode {
    /// Keep everything local.
    #[default]
    Mock,
    /// Push changes to the REST API, best effort.
    Http,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: unknown sync mode {value:?} (expected \"mock\" or \"http\")")]
    SyncMode { var: &'static str, value: String },
    #[error("{var}: expected a non-negative integer, got {value:?}")]
    Number { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub sync_mode: SyncMode,
    pub api_url: String,
    pub api_token: Option<String>,
    pub sync_timeout: Duration,
    pub currency: CurrencyFormat,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sync_mode: SyncMode::default(),
            api_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            sync_timeout: DEFAULT_SYNC_TIMEOUT,
            currency: CurrencyFormat::default(),
        }
    }
}

impl SessionConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let sync_mode = match get(SYNC_MODE_ENV) {
            None => defaults.sync_mode,
            Some(value) => match value.to_ascii_lowercase().as_str() {
                "mock" => SyncMode::Mock,
                "http" => SyncMode::Http,
                _ => {
                    return Err(ConfigError::SyncMode {
                        var: SYNC_MODE_ENV,
                        value,
                    });
                }
            },
        };

        let api_url = get(API_URL_ENV).unwrap_or_else(|| {
            if sync_mode == SyncMode::Http {
                tracing::warn!("{API_URL_ENV} not set; using {DEFAULT_API_URL}");
            }
            defaults.api_url.clone()
        });

        let sync_timeout = match get(SYNC_TIMEOUT_ENV) {
            None => defaults.sync_timeout,
            Some(value) => Duration::from_millis(parse_number(SYNC_TIMEOUT_ENV, value)?),
        };

        let max_fraction_digits = match get(PRICE_DIGITS_ENV) {
            None => defaults.currency.max_fraction_digits,
            Some(value) => {
                let digits = parse_number(PRICE_DIGITS_ENV, value.clone())?;
                u32::try_from(digits).map_err(|_| ConfigError::Number {
                    var: PRICE_DIGITS_ENV,
                    value,
                })?
            }
        };

        Ok(Self {
            sync_mode,
            api_url,
            api_token: get(API_TOKEN_ENV),
            sync_timeout,
            currency: CurrencyFormat {
                locale: get(LOCALE_ENV).unwrap_or(defaults.currency.locale),
                currency_code: get(CURRENCY_ENV).unwrap_or(defaults.currency.currency_code),
                max_fraction_digits,
            },
        })
    }
}

fn parse_number(var: &'static str, value: String) -> Result<u64, ConfigError> {
    value
        .parse::<u64>()
        .map_err(|_| ConfigError::Number { var, value })
}
