//! API environment selection.
//!
//! A [`Mode`] decides which host every request is sent to. It is fixed when a
//! resource client is built and read, never written, on every call.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

/// Base URL of the sandbox (test) environment.
pub const SANDBOX_BASE_URL: &str = "https://sandbox.zainpay.ng/";

/// Base URL of the live (production) environment.
pub const LIVE_BASE_URL: &str = "https://api.zainpay.ng/";

/// Which Zainpay environment requests are sent to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Test environment with sandbox credentials.
    #[default]
    Sandbox,
    /// Production environment.
    Live,
    /// Any other host, e.g. a proxy or a local mock server.
    Custom(Url),
}

impl Mode {
    /// Resolves the base URL requests are prefixed with.
    ///
    /// # Panics
    ///
    /// Never in practice: the built-in base URLs are valid constants.
    #[must_use]
    pub fn base_url(&self) -> Url {
        match self {
            Self::Sandbox => Url::parse(SANDBOX_BASE_URL).expect("valid sandbox URL"),
            Self::Live => Url::parse(LIVE_BASE_URL).expect("valid live URL"),
            Self::Custom(url) => url.clone(),
        }
    }

    /// Returns `true` for [`Mode::Live`].
    #[must_use]
    pub const fn is_live(&self) -> bool {
        matches!(self, Self::Live)
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sandbox => f.write_str("sandbox"),
            Self::Live => f.write_str("live"),
            Self::Custom(url) => write!(f, "custom({url})"),
        }
    }
}

/// Error returned when a string names no known [`Mode`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid mode `{0}`: expected `sandbox` or `live`")]
pub struct ModeParseError(pub String);

/// Parses `sandbox` (or `test`) and `live` (or `production`), ignoring case
/// and surrounding whitespace. [`Mode::Custom`] cannot be parsed; build it from
/// a [`Url`].
impl FromStr for Mode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandbox" | "test" => Ok(Self::Sandbox),
            "live" | "production" => Ok(Self::Live),
            _ => Err(ModeParseError(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_per_mode() {
        assert_eq!(Mode::Sandbox.base_url().as_str(), SANDBOX_BASE_URL);
        assert_eq!(Mode::Live.base_url().as_str(), LIVE_BASE_URL);
        let custom = Url::parse("http://127.0.0.1:8080/").unwrap();
        assert_eq!(Mode::Custom(custom.clone()).base_url(), custom);
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("sandbox".parse::<Mode>().unwrap(), Mode::Sandbox);
        assert_eq!(" LIVE ".parse::<Mode>().unwrap(), Mode::Live);
        assert_eq!("Test".parse::<Mode>().unwrap(), Mode::Sandbox);
        assert_eq!("production".parse::<Mode>().unwrap(), Mode::Live);
        assert!("staging".parse::<Mode>().is_err());
    }

    #[test]
    fn test_mode_serde() {
        assert_eq!(serde_json::to_string(&Mode::Live).unwrap(), "\"live\"");
        let mode: Mode = serde_json::from_str("\"sandbox\"").unwrap();
        assert_eq!(mode, Mode::Sandbox);
    }
}
