//! Error types for the Zainpay client.
//!
//! Only three things can go wrong inside this crate: a required input was
//! empty, a URL could not be assembled, or the executor failed to complete
//! the exchange. A completed exchange with a non-2xx status is *not* an
//! error; it comes back as a normal [`Response`](crate::Response).

use std::error::Error as StdError;

/// Boxed error used to carry executor-specific transport failures.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Errors returned by resource-client operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ZainpayError {
    /// A required input was empty. Raised before any request is sent.
    #[error("missing required field `{field}`")]
    MissingField {
        /// Wire name of the offending field.
        field: &'static str,
    },

    /// URL assembly failed.
    #[error("URL error: {context}: {source}")]
    Url {
        /// Human-readable context.
        context: &'static str,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },

    /// The request payload could not be serialized to JSON.
    #[error("failed to serialize request body: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The executor could not complete the HTTP exchange.
    #[error("transport error: {context}: {source}")]
    Transport {
        /// Human-readable context (e.g. `"GET virtual-account/wallet/balance"`).
        context: String,
        /// The underlying executor error.
        #[source]
        source: BoxError,
    },

    /// Non-2xx status, produced only by [`Response::error_for_status`](crate::Response::error_for_status).
    #[error("unexpected HTTP status {status}: {body}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The decoded response body.
        body: serde_json::Value,
    },
}

impl ZainpayError {
    /// Wraps an executor failure as a [`ZainpayError::Transport`].
    pub fn transport(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Transport {
            context: context.into(),
            source: source.into(),
        }
    }

    /// Returns `true` if the error was raised locally, before any I/O.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. } | Self::Url { .. } | Self::Serialize(_)
        )
    }
}

/// Returns `value` unchanged, or [`ZainpayError::MissingField`] if it is empty.
///
/// # Errors
///
/// Returns [`ZainpayError::MissingField`] when `value` is empty.
pub fn require<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ZainpayError> {
    if value.is_empty() {
        Err(ZainpayError::MissingField { field })
    } else {
        Ok(value)
    }
}
