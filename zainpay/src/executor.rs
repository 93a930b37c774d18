//! The seam between resource clients and the network.
//!
//! Resource clients never talk HTTP themselves. They hold a
//! [`RequestExecutor`] by composition and hand it one [`ApiRequest`] per
//! operation. The `zainpay-http` crate provides the `reqwest` implementation.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::ZainpayError;
use crate::request::ApiRequest;
use crate::response::Response;

/// A pinned, boxed, `Send` future.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Sends an [`ApiRequest`] and returns the [`Response`].
///
/// Implementations attach the bearer credential and JSON content headers.
/// Any completed exchange, whatever its status, resolves to `Ok(Response)`;
/// only transport failures resolve to [`ZainpayError::Transport`].
/// Implementations must not retry.
pub trait RequestExecutor: Send + Sync {
    /// Executes a single HTTP exchange.
    fn execute(&self, request: ApiRequest) -> BoxFuture<'_, Result<Response, ZainpayError>>;
}

impl<T: RequestExecutor + ?Sized> RequestExecutor for Arc<T> {
    fn execute(&self, request: ApiRequest) -> BoxFuture<'_, Result<Response, ZainpayError>> {
        (**self).execute(request)
    }
}

impl<T: RequestExecutor + ?Sized> RequestExecutor for Box<T> {
    fn execute(&self, request: ApiRequest) -> BoxFuture<'_, Result<Response, ZainpayError>> {
        (**self).execute(request)
    }
}
