//! Client configuration.
//!
//! A [`ZainpayConfig`] bundles the [`Mode`] and the bearer credential. It can
//! be built in code or loaded from the process environment:
//!
//! - `ZAINPAY_API_KEY` - bearer credential (required)
//! - `ZAINPAY_MODE` - `sandbox` (default, alias `test`) or `live` (alias
//!   `production`), case-insensitive
//! - `ZAINPAY_BASE_URL` - overrides the host; selects [`Mode::Custom`]

use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::mode::{Mode, ModeParseError};

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "ZAINPAY_API_KEY";

/// Environment variable selecting the mode.
pub const MODE_ENV: &str = "ZAINPAY_MODE";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "ZAINPAY_BASE_URL";

/// Errors raised while loading a [`ZainpayConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is unset or empty.
    #[error("environment variable `{0}` is not set")]
    MissingVar(&'static str),

    /// The mode string is not recognised.
    #[error(transparent)]
    InvalidMode(#[from] ModeParseError),

    /// The base URL override does not parse, or cannot carry a path
    /// (e.g. `mailto:`).
    #[error("invalid base URL `{value}`: {source}")]
    InvalidBaseUrl {
        /// The rejected value.
        value: String,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },
}

/// Mode, credential and transport settings shared by all resource clients.
#[derive(Clone, Deserialize)]
pub struct ZainpayConfig {
    /// Target environment.
    #[serde(default)]
    pub mode: Mode,

    /// Bearer credential sent as `Authorization: Bearer <api_key>`.
    pub api_key: String,

    /// Per-request timeout. `None` keeps the HTTP client's default.
    #[serde(default)]
    pub timeout: Option<Duration>,
}

impl ZainpayConfig {
    /// Creates a config for the given mode and API key.
    pub fn new(mode: Mode, api_key: impl Into<String>) -> Self {
        Self {
            mode,
            api_key: api_key.into(),
            timeout: None,
        }
    }

    /// Shorthand for a sandbox config.
    pub fn sandbox(api_key: impl Into<String>) -> Self {
        Self::new(Mode::Sandbox, api_key)
    }

    /// Shorthand for a live config.
    pub fn live(api_key: impl Into<String>) -> Self {
        Self::new(Mode::Live, api_key)
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Loads the config from `ZAINPAY_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the API key is missing or the mode or
    /// base URL cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads the config through an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get(API_KEY_ENV).ok_or(ConfigError::MissingVar(API_KEY_ENV))?;
        let mode = match (get(BASE_URL_ENV), get(MODE_ENV)) {
            (Some(value), _) => {
                let base = match Url::parse(&value) {
                    Ok(base) if base.cannot_be_a_base() => {
                        return Err(ConfigError::InvalidBaseUrl {
                            value,
                            source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
                        });
                    }
                    Ok(base) => base,
                    Err(source) => return Err(ConfigError::InvalidBaseUrl { value, source }),
                };
                Mode::Custom(base)
            }
            (None, Some(mode)) => mode.parse()?,
            (None, None) => Mode::default(),
        };

        Ok(Self::new(mode, api_key))
    }
}

impl fmt::Debug for ZainpayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZainpayConfig")
            .field("mode", &self.mode)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}
