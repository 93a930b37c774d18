//! Error types for the HTTP transport layer.

use zainpay::ConfigError;

/// Errors raised by [`ReqwestExecutor`](crate::ReqwestExecutor).
///
/// At the [`RequestExecutor`](zainpay::RequestExecutor) boundary these are
/// wrapped in [`zainpay::ZainpayError::Transport`]; use
/// [`std::error::Error::source`] to get them back.
#[derive(Debug, thiserror::Error)]
pub enum HttpExecutorError {
    /// The API key cannot be used as a header value.
    #[error("API key contains characters that are not valid in an HTTP header")]
    InvalidCredential(#[source] reqwest::header::InvalidHeaderValue),

    /// The underlying `reqwest::Client` could not be built.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// HTTP transport error.
    #[error("HTTP error: {context}: {source}")]
    Http {
        /// Human-readable context.
        context: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// Failed to read the response body.
    #[error("failed to read response body: {context}: {source}")]
    ResponseBodyRead {
        /// Human-readable context.
        context: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
}

impl HttpExecutorError {
    /// Returns `true` if the request timed out.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Http { source, .. } | Self::ResponseBodyRead { source, .. } => {
                source.is_timeout()
            }
            Self::InvalidCredential(_) | Self::ClientBuild(_) => false,
        }
    }

    /// Returns `true` if the connection could not be established.
    #[must_use]
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Http { source, .. } if source.is_connect())
    }
}

/// Errors raised while building a [`ZainpayClient`](crate::ZainpayClient).
#[derive(Debug, thiserror::Error)]
pub enum ClientInitError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The executor could not be built.
    #[error(transparent)]
    Executor(#[from] HttpExecutorError),
}
