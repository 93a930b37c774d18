#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types and resource clients for the Zainpay payment API.
//!
//! This crate knows how to turn each documented Zainpay operation into an
//! HTTP request: method, URL, path parameters, query string and JSON body.
//! It does not perform I/O. Requests are handed to a [`RequestExecutor`],
//! which the `zainpay-http` crate implements on top of `reqwest`.
//!
//! # Modules
//!
//! - [`card`] - Card payment initialization, verification and reconciliation
//! - [`virtual_account`] - Virtual account lifecycle, balances and deposits
//! - [`filter`] - Optional query-string filters
//! - [`requester`] - Shared `get` / `post` / `patch` primitives
//! - [`request`] - Request descriptions and path templates
//! - [`response`] - The uniform response value
//! - [`executor`] - The transport seam
//! - [`mode`] / [`config`] - Environment selection and credentials
//! - [`error`] - Error types
//!
//! # Feature Flags
//!
//! - `telemetry` - Wraps every operation in a `tracing` span

pub mod card;
pub mod config;
pub mod error;
pub mod executor;
pub mod filter;
pub mod mode;
pub mod request;
pub mod requester;
pub mod response;
pub mod virtual_account;

pub use card::{Card, InitializeCardPayment};
pub use config::{ConfigError, ZainpayConfig};
pub use error::ZainpayError;
pub use executor::{BoxFuture, RequestExecutor};
pub use filter::{CardHistoryFilter, FilterParams, TransactionFilter};
pub use mode::Mode;
pub use request::{ApiRequest, Method, PathTemplate};
pub use requester::Requester;
pub use response::Response;
pub use virtual_account::{CreateVirtualAccount, DepositVerification, VirtualAccount};
