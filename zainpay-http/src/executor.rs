//! A [`RequestExecutor`] backed by `reqwest`.
//!
//! Every request carries `Authorization: Bearer <api key>` plus JSON
//! `Content-Type` and `Accept` headers. Bodies are sent as JSON. The response
//! is returned whatever its status; only transport failures become errors.
//!
//! Timeouts, TLS, redirects and connection pooling are whatever the
//! underlying `reqwest::Client` is configured with.

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::Client;
use zainpay::{ApiRequest, BoxFuture, Method, RequestExecutor, Response, ZainpayConfig, ZainpayError};

#[cfg(feature = "telemetry")]
use tracing::{Instrument, Span};

use crate::error::HttpExecutorError;

/// Sends [`ApiRequest`]s with `reqwest`.
#[derive(Clone)]
pub struct ReqwestExecutor {
    client: Client,
    headers: HeaderMap,
}

impl std::fmt::Debug for ReqwestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestExecutor")
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}

impl ReqwestExecutor {
    /// Creates an executor with a default `reqwest::Client`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpExecutorError::InvalidCredential`] if `api_key` is not a
    /// valid header value.
    pub fn new(api_key: &str) -> Result<Self, HttpExecutorError> {
        Ok(Self {
            client: Client::new(),
            headers: default_headers(api_key)?,
        })
    }

    /// Creates an executor from a [`ZainpayConfig`], applying its timeout.
    ///
    /// # Errors
    ///
    /// Returns [`HttpExecutorError`] if the key is not a valid header value or
    /// the client cannot be built.
    pub fn from_config(config: &ZainpayConfig) -> Result<Self, HttpExecutorError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build().map_err(HttpExecutorError::ClientBuild)?,
            headers: default_headers(&config.api_key)?,
        })
    }

    /// Replaces the underlying `reqwest::Client`.
    #[must_use]
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Performs one exchange.
    async fn send(&self, request: ApiRequest) -> Result<Response, HttpExecutorError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
        };
        let mut req = self
            .client
            .request(method, request.url)
            .headers(self.headers.clone());
        if let Some(body) = &request.body {
            req = req.json(body);
        }

        let http_response = req.send().await.map_err(|source| HttpExecutorError::Http {
            context: "send request",
            source,
        })?;
        let status = http_response.status().as_u16();
        let text = http_response
            .text()
            .await
            .map_err(|source| HttpExecutorError::ResponseBodyRead {
                context: "read body",
                source,
            })?;

        #[cfg(feature = "telemetry")]
        Span::current().record("http.status_code", status);

        Ok(Response::from_text(status, &text))
    }
}

impl RequestExecutor for ReqwestExecutor {
    fn execute(&self, request: ApiRequest) -> BoxFuture<'_, Result<Response, ZainpayError>> {
        let label = request.label();

        #[cfg(feature = "telemetry")]
        let span = tracing::info_span!(
            "zainpay.http.execute",
            http.method = %request.method,
            url.path = %request.url.path(),
            http.status_code = tracing::field::Empty,
            otel.status_code = tracing::field::Empty,
        );

        let fut = async move {
            let result = self.send(request).await;
            record_result_on_span(&result);
            result.map_err(|e| ZainpayError::transport(label, e))
        };

        #[cfg(feature = "telemetry")]
        let fut = fut.instrument(span);

        Box::pin(fut)
    }
}

/// Builds the headers attached to every request.
fn default_headers(api_key: &str) -> Result<HeaderMap, HttpExecutorError> {
    let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
        .map_err(HttpExecutorError::InvalidCredential)?;
    auth.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, auth);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    Ok(headers)
}

/// Records the outcome of an exchange on the current span.
#[cfg(feature = "telemetry")]
fn record_result_on_span(result: &Result<Response, HttpExecutorError>) {
    let span = Span::current();
    match result {
        Ok(_) => {
            span.record("otel.status_code", "OK");
        }
        Err(err) => {
            span.record("otel.status_code", "ERROR");
            tracing::event!(tracing::Level::ERROR, error = %err, "Request to Zainpay failed");
        }
    }
}

/// Noop if telemetry feature is off.
#[cfg(not(feature = "telemetry"))]
fn record_result_on_span(_result: &Result<Response, HttpExecutorError>) {}
