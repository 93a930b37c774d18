//! HTTP transport for the Zainpay payment API client.
//!
//! Provides a `reqwest`-backed [`zainpay::RequestExecutor`] and a
//! [`ZainpayClient`] that wires it into every resource client.
//!
//! # Modules
//!
//! - [`executor`] - [`ReqwestExecutor`], bearer auth and JSON content negotiation
//! - [`client`] - [`ZainpayClient`] facade built from a [`zainpay::ZainpayConfig`]
//! - [`error`] - HTTP transport error types
//!
//! # Feature Flags
//!
//! - `telemetry` - Opens a `tracing` span per HTTP exchange

pub mod client;
pub mod error;
pub mod executor;

pub use client::{HttpCard, HttpVirtualAccount, ZainpayClient};
pub use error::{ClientInitError, HttpExecutorError};
pub use executor::ReqwestExecutor;
