//! Request descriptions.
//!
//! An [`ApiRequest`] is plain data: method, fully resolved URL and optional
//! JSON body. Resource clients build them; a
//! [`RequestExecutor`](crate::RequestExecutor) sends them.

use std::fmt::{Display, Formatter};

use url::Url;

use crate::error::ZainpayError;
use crate::filter::FilterParams;

/// HTTP methods used by the Zainpay API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PATCH`
    Patch,
}

impl Method {
    /// Upper-case method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request ready to be executed.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL including path and query string.
    pub url: Url,
    /// JSON body for `POST` / `PATCH`.
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    /// A `GET` request with optional query parameters.
    #[must_use]
    pub fn get(mut url: Url, query: Option<&FilterParams>) -> Self {
        if let Some(params) = query.filter(|p| !p.is_empty()) {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params.iter() {
                pairs.append_pair(key, &value.to_string());
            }
        }
        Self {
            method: Method::Get,
            url,
            body: None,
        }
    }

    /// A `POST` request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ZainpayError::Serialize`] if `body` fails to serialize.
    pub fn post<T: serde::Serialize + ?Sized>(url: Url, body: &T) -> Result<Self, ZainpayError> {
        Ok(Self {
            method: Method::Post,
            url,
            body: Some(serde_json::to_value(body)?),
        })
    }

    /// A `PATCH` request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ZainpayError::Serialize`] if `body` fails to serialize.
    pub fn patch<T: serde::Serialize + ?Sized>(url: Url, body: &T) -> Result<Self, ZainpayError> {
        Ok(Self {
            method: Method::Patch,
            url,
            body: Some(serde_json::to_value(body)?),
        })
    }

    /// Short label used in logs and error contexts, e.g. `GET /zainbox/accounts/balance/X`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.method, self.url.path())
    }
}

/// A path template such as `virtual-account/wallet/balance/{accountNumber}`.
///
/// Each `/`-separated piece is either a literal or a `{name}` placeholder.
/// Placeholder values become exactly one percent-encoded URL segment, so a
/// value containing `/` or `?` cannot change the shape of the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathTemplate(&'static str);

impl PathTemplate {
    /// Wraps a literal template.
    #[must_use]
    pub const fn new(template: &'static str) -> Self {
        Self(template)
    }

    /// The raw template text.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }

    /// Resolves the template against `base`.
    ///
    /// Segments already present on `base` are kept; a trailing empty segment
    /// (from a trailing `/`) is dropped first.
    ///
    /// # Errors
    ///
    /// - [`ZainpayError::Url`] if `base` cannot carry a path.
    /// - [`ZainpayError::MissingField`] if a placeholder has no value, or its
    ///   value is empty.
    pub fn render(&self, base: &Url, params: &[(&'static str, &str)]) -> Result<Url, ZainpayError> {
        let mut resolved = base.clone();
        resolved.set_query(None);
        resolved.set_fragment(None);
        {
            let mut segments = resolved.path_segments_mut().map_err(|()| ZainpayError::Url {
                context: "base URL cannot be a base",
                source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
            })?;
            segments.pop_if_empty();
            for piece in self.0.split('/').filter(|p| !p.is_empty()) {
                match piece.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
                    Some(name) => {
                        let (field, value) = params
                            .iter()
                            .find(|(k, _)| *k == name)
                            .copied()
                            .ok_or(ZainpayError::MissingField { field: name })?;
                        segments.push(crate::error::require(field, value)?);
                    }
                    None => {
                        segments.push(piece);
                    }
                }
            }
        }
        Ok(resolved)
    }
}

impl Display for PathTemplate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}
