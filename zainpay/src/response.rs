//! The value returned by every operation.
//!
//! Zainpay wraps payloads in a common envelope:
//!
//! ```json
//! { "code": "00", "description": "successful", "status": "200 OK", "data": { } }
//! ```
//!
//! [`Response`] does not enforce that shape; the envelope accessors simply
//! return `None` when a field is missing.

use serde_json::Value;

use crate::error::ZainpayError;

/// Provider code for a successful call.
pub const SUCCESS_CODE: &str = "00";

/// Status and decoded body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    status: u16,
    body: Value,
}

impl Response {
    /// Creates a response from an already decoded body.
    #[must_use]
    pub const fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Creates a response from raw body text.
    ///
    /// Empty bodies decode to `null`; bodies that are not JSON are kept as a
    /// JSON string.
    #[must_use]
    pub fn from_text(status: u16, text: &str) -> Self {
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_owned()))
        };
        Self::new(status, body)
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Decoded body.
    #[must_use]
    pub const fn body(&self) -> &Value {
        &self.body
    }

    /// Consumes the response, returning the body.
    #[must_use]
    pub fn into_body(self) -> Value {
        self.body
    }

    /// `true` for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Envelope `code`, e.g. `"00"`.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.body.get("code").and_then(Value::as_str)
    }

    /// Envelope `description`.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.body.get("description").and_then(Value::as_str)
    }

    /// Envelope `data`.
    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        self.body.get("data")
    }

    /// `true` when the status is 2xx and the envelope code is `"00"`.
    #[must_use]
    pub fn has_succeeded(&self) -> bool {
        self.is_success() && self.code() == Some(SUCCESS_CODE)
    }

    /// Turns a non-2xx response into [`ZainpayError::Status`].
    ///
    /// # Errors
    ///
    /// Returns [`ZainpayError::Status`] when [`Self::is_success`] is `false`.
    pub fn error_for_status(self) -> Result<Self, ZainpayError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ZainpayError::Status {
                status: self.status,
                body: self.body,
            })
        }
    }
}
