//! Shared `get` / `post` / `patch` primitives for resource clients.
//!
//! A [`Requester`] owns the executor and the [`Mode`]. The base URL is
//! resolved from the mode on every call, joined with a [`PathTemplate`], and
//! the resulting [`ApiRequest`] is handed to the executor.

use serde::Serialize;

use crate::error::ZainpayError;
use crate::executor::RequestExecutor;
use crate::filter::FilterParams;
use crate::mode::Mode;
use crate::request::{ApiRequest, PathTemplate};
use crate::response::Response;

/// Path parameters as `(placeholder, value)` pairs.
pub type PathParams<'a> = &'a [(&'static str, &'a str)];

/// Request primitives shared by every resource client.
#[derive(Debug, Clone)]
pub struct Requester<E> {
    executor: E,
    mode: Mode,
}

impl<E: RequestExecutor> Requester<E> {
    /// Creates a requester for `mode`.
    pub const fn new(executor: E, mode: Mode) -> Self {
        Self { executor, mode }
    }

    /// The mode requests are sent to.
    pub const fn mode(&self) -> &Mode {
        &self.mode
    }

    /// The underlying executor.
    pub const fn executor(&self) -> &E {
        &self.executor
    }

    /// Sends a `GET`, appending `query` when given.
    ///
    /// # Errors
    ///
    /// Local validation errors, or whatever the executor reports.
    pub async fn get(
        &self,
        template: PathTemplate,
        params: PathParams<'_>,
        query: Option<&FilterParams>,
    ) -> Result<Response, ZainpayError> {
        let url = template.render(&self.mode.base_url(), params)?;
        self.executor.execute(ApiRequest::get(url, query)).await
    }

    /// Sends a `POST` with a JSON body.
    ///
    /// # Errors
    ///
    /// Local validation errors, or whatever the executor reports.
    pub async fn post<T: Serialize + Sync + ?Sized>(
        &self,
        template: PathTemplate,
        params: PathParams<'_>,
        body: &T,
    ) -> Result<Response, ZainpayError> {
        let url = template.render(&self.mode.base_url(), params)?;
        self.executor.execute(ApiRequest::post(url, body)?).await
    }

    /// Sends a `PATCH` with a JSON body.
    ///
    /// # Errors
    ///
    /// Local validation errors, or whatever the executor reports.
    pub async fn patch<T: Serialize + Sync + ?Sized>(
        &self,
        template: PathTemplate,
        params: PathParams<'_>,
        body: &T,
    ) -> Result<Response, ZainpayError> {
        let url = template.render(&self.mode.base_url(), params)?;
        self.executor.execute(ApiRequest::patch(url, body)?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::testing::RecordingExecutor;
    use crate::request::Method;
    use serde_json::json;

    const BALANCE: PathTemplate = PathTemplate::new("virtual-account/wallet/balance/{accountNumber}");

    #[tokio::test]
    async fn test_mode_selects_host() {
        let executor = RecordingExecutor::new();
        let sandbox = Requester::new(executor.clone(), Mode::Sandbox);
        let live = Requester::new(executor.clone(), Mode::Live);

        sandbox
            .get(BALANCE, &[("accountNumber", "111")], None)
            .await
            .unwrap();
        live.get(BALANCE, &[("accountNumber", "111")], None)
            .await
            .unwrap();

        let hosts: Vec<_> = executor
            .requests()
            .iter()
            .map(|r| r.url.host_str().unwrap().to_owned())
            .collect();
        assert_eq!(hosts, ["sandbox.zainpay.ng", "api.zainpay.ng"]);
    }

    #[tokio::test]
    async fn test_validation_happens_before_execution() {
        let executor = RecordingExecutor::new();
        let requester = Requester::new(executor.clone(), Mode::Sandbox);

        let err = requester
            .get(BALANCE, &[("accountNumber", "")], None)
            .await
            .unwrap_err();
        assert!(err.is_local());
        assert!(executor.requests().is_empty());
    }

    #[tokio::test]
    async fn test_unusable_base_url_is_a_local_error() {
        let base = url::Url::parse("mailto:ops@example.com").unwrap();
        let requester = Requester::new(RecordingExecutor::new(), Mode::Custom(base));

        let err = requester
            .get(BALANCE, &[("accountNumber", "7966884043")], None)
            .await
            .unwrap_err();
        assert!(matches!(err, ZainpayError::Url { .. }));
        assert!(err.is_local());
        assert!(requester.executor().requests().is_empty());
    }

    #[tokio::test]
    async fn test_patch_carries_body() {
        let executor = RecordingExecutor::new();
        let requester = Requester::new(executor.clone(), Mode::Live);
        requester
            .patch(
                PathTemplate::new("virtual-account/change/account/status"),
                &[],
                &json!({"status": true}),
            )
            .await
            .unwrap();

        let request = executor.last();
        assert_eq!(request.method, Method::Patch);
        assert_eq!(request.body, Some(json!({"status": true})));
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let executor = RecordingExecutor::failing("operation timed out");
        let requester = Requester::new(executor, Mode::Sandbox);
        let err = requester
            .get(BALANCE, &[("accountNumber", "1")], None)
            .await
            .unwrap_err();
        assert!(matches!(err, ZainpayError::Transport { .. }));
    }
}
