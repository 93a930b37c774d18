//! One-stop client built from a [`ZainpayConfig`].
//!
//! [`ZainpayClient`] shares a single [`ReqwestExecutor`] between the card and
//! virtual account clients, so both use the same connection pool, credential
//! and mode.

use std::sync::Arc;

use zainpay::{Card, VirtualAccount, ZainpayConfig};

use crate::error::{ClientInitError, HttpExecutorError};
use crate::executor::ReqwestExecutor;

/// Card client sharing a `reqwest` executor.
pub type HttpCard = Card<Arc<ReqwestExecutor>>;

/// Virtual account client sharing a `reqwest` executor.
pub type HttpVirtualAccount = VirtualAccount<Arc<ReqwestExecutor>>;

/// All Zainpay resource clients behind one configuration.
///
/// # Example
///
/// ```no_run
/// use zainpay::{Mode, ZainpayConfig};
/// use zainpay_http::ZainpayClient;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ZainpayClient::new(&ZainpayConfig::new(Mode::Sandbox, "sk_test_..."))?;
/// let response = client.virtual_account().balance("7966884043").await?;
/// if response.has_succeeded() {
///     println!("{}", response.body());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ZainpayClient {
    card: HttpCard,
    virtual_account: HttpVirtualAccount,
}

impl ZainpayClient {
    /// Builds the clients from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpExecutorError`] if the API key is not a valid header
    /// value or the HTTP client cannot be built.
    pub fn new(config: &ZainpayConfig) -> Result<Self, HttpExecutorError> {
        let executor = Arc::new(ReqwestExecutor::from_config(config)?);
        Ok(Self::with_executor(executor, config))
    }

    /// Builds the clients from `ZAINPAY_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ClientInitError`] if the configuration is missing or invalid.
    pub fn from_env() -> Result<Self, ClientInitError> {
        let config = ZainpayConfig::from_env()?;
        Ok(Self::new(&config)?)
    }

    /// Builds the clients around an existing executor.
    #[must_use]
    pub fn with_executor(executor: Arc<ReqwestExecutor>, config: &ZainpayConfig) -> Self {
        Self {
            card: Card::new(Arc::clone(&executor), config.mode.clone()),
            virtual_account: VirtualAccount::new(executor, config.mode.clone()),
        }
    }

    /// Card payment operations.
    #[must_use]
    pub const fn card(&self) -> &HttpCard {
        &self.card
    }

    /// Virtual account operations.
    #[must_use]
    pub const fn virtual_account(&self) -> &HttpVirtualAccount {
        &self.virtual_account
    }
}
