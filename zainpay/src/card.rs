//! Card payments.
//!
//! Each method maps to exactly one Zainpay endpoint and returns the
//! [`Response`] untouched.

use serde::{Deserialize, Serialize};

use crate::error::{ZainpayError, require};
use crate::executor::RequestExecutor;
use crate::mode::Mode;
use crate::request::PathTemplate;
use crate::requester::Requester;
use crate::response::Response;

const INITIALIZE_PAYMENT: PathTemplate = PathTemplate::new("zainbox/card/initialize/payment");
const VERIFY_PAYMENT: PathTemplate =
    PathTemplate::new("virtual-account/wallet/deposit/verify/{txnRef}");
const VERIFY_PAYMENT_V2: PathTemplate =
    PathTemplate::new("virtual-account/wallet/deposit/verify/v2/{txnRef}");
const RECONCILE_PAYMENT: PathTemplate = PathTemplate::new("transaction/reconcile/card-payment");

/// Input for [`Card::initialize_payment`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeCardPayment {
    /// Amount in kobo, as a string.
    pub amount: String,
    /// Merchant-generated transaction reference.
    pub txn_ref: String,
    /// Payer email address.
    pub email_address: String,
    /// Payer phone number.
    pub mobile_number: String,
    /// Zainbox that receives the funds.
    pub zainbox_code: String,
    /// Where the payer is redirected after the card flow.
    pub call_back_url: String,
}

impl InitializeCardPayment {
    fn validate(&self) -> Result<(), ZainpayError> {
        require("amount", &self.amount)?;
        require("txnRef", &self.txn_ref)?;
        require("emailAddress", &self.email_address)?;
        require("mobileNumber", &self.mobile_number)?;
        require("zainboxCode", &self.zainbox_code)?;
        require("callBackUrl", &self.call_back_url)?;
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReconcileCardPayment<'a> {
    txn_ref: &'a str,
}

/// Client for the card payment endpoints.
#[derive(Debug, Clone)]
pub struct Card<E> {
    requester: Requester<E>,
}

impl<E: RequestExecutor> Card<E> {
    /// Creates a card client sending through `executor` to `mode`.
    pub const fn new(executor: E, mode: Mode) -> Self {
        Self {
            requester: Requester::new(executor, mode),
        }
    }

    /// The mode requests are sent to.
    pub const fn mode(&self) -> &Mode {
        self.requester.mode()
    }

    /// Starts a card payment and returns the hosted payment URL in `data`.
    ///
    /// `POST zainbox/card/initialize/payment`
    ///
    /// # Errors
    ///
    /// [`ZainpayError::MissingField`] for an empty input, or any transport error.
    #[cfg_attr(
        feature = "telemetry",
        tracing::instrument(name = "zainpay.card.initialize_payment", skip_all, fields(txn_ref = %payment.txn_ref), err)
    )]
    pub async fn initialize_payment(
        &self,
        payment: &InitializeCardPayment,
    ) -> Result<Response, ZainpayError> {
        payment.validate()?;
        self.requester.post(INITIALIZE_PAYMENT, &[], payment).await
    }

    /// Looks up a card payment by transaction reference.
    ///
    /// `GET virtual-account/wallet/deposit/verify/{txnRef}`
    ///
    /// # Errors
    ///
    /// [`ZainpayError::MissingField`] for an empty reference, or any transport error.
    #[cfg_attr(
        feature = "telemetry",
        tracing::instrument(name = "zainpay.card.verify_payment", skip(self), err)
    )]
    pub async fn verify_payment(&self, txn_ref: &str) -> Result<Response, ZainpayError> {
        self.requester
            .get(VERIFY_PAYMENT, &[("txnRef", txn_ref)], None)
            .await
    }

    /// Looks up a card payment through the v2 verification endpoint.
    ///
    /// `GET virtual-account/wallet/deposit/verify/v2/{txnRef}`
    ///
    /// # Errors
    ///
    /// [`ZainpayError::MissingField`] for an empty reference, or any transport error.
    #[cfg_attr(
        feature = "telemetry",
        tracing::instrument(name = "zainpay.card.verify_payment_v2", skip(self), err)
    )]
    pub async fn verify_payment_v2(&self, txn_ref: &str) -> Result<Response, ZainpayError> {
        self.requester
            .get(VERIFY_PAYMENT_V2, &[("txnRef", txn_ref)], None)
            .await
    }

    /// Asks Zainpay to re-check a card payment whose outcome never arrived.
    ///
    /// `POST transaction/reconcile/card-payment`
    ///
    /// # Errors
    ///
    /// [`ZainpayError::MissingField`] for an empty reference, or any transport error.
    #[cfg_attr(
        feature = "telemetry",
        tracing::instrument(name = "zainpay.card.reconcile_payment", skip(self), err)
    )]
    pub async fn reconcile_payment(&self, txn_ref: &str) -> Result<Response, ZainpayError> {
        let body = ReconcileCardPayment {
            txn_ref: require("txnRef", txn_ref)?,
        };
        self.requester.post(RECONCILE_PAYMENT, &[], &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::testing::RecordingExecutor;
    use crate::request::Method;
    use serde_json::json;
    use std::sync::Arc;

    fn card() -> (Arc<RecordingExecutor>, Card<Arc<RecordingExecutor>>) {
        let executor = RecordingExecutor::new();
        (executor.clone(), Card::new(executor, Mode::Sandbox))
    }

    fn payment() -> InitializeCardPayment {
        InitializeCardPayment {
            amount: "10000".into(),
            txn_ref: "Q6166237864".into(),
            email_address: "buyer@example.com".into(),
            mobile_number: "08000000000".into(),
            zainbox_code: "THbfnDvK5o".into(),
            call_back_url: "https://merchant.example/callback".into(),
        }
    }

    #[tokio::test]
    async fn test_initialize_payment_request() {
        let (executor, card) = card();
        card.initialize_payment(&payment()).await.unwrap();

        let request = executor.last();
        assert_eq!(request.method, Method::Post);
        assert_eq!(
            request.url.as_str(),
            "https://sandbox.zainpay.ng/zainbox/card/initialize/payment"
        );
        assert_eq!(
            request.body.unwrap(),
            json!({
                "amount": "10000",
                "txnRef": "Q6166237864",
                "emailAddress": "buyer@example.com",
                "mobileNumber": "08000000000",
                "zainboxCode": "THbfnDvK5o",
                "callBackUrl": "https://merchant.example/callback"
            })
        );
    }

    #[tokio::test]
    async fn test_initialize_payment_rejects_empty_field() {
        let (executor, card) = card();
        let mut input = payment();
        input.email_address.clear();

        let err = card.initialize_payment(&input).await.unwrap_err();
        assert!(matches!(
            err,
            ZainpayError::MissingField {
                field: "emailAddress"
            }
        ));
        assert!(executor.requests().is_empty());
    }

    #[tokio::test]
    async fn test_verify_payment_v1_and_v2_are_distinct() {
        let (executor, card) = card();
        card.verify_payment("REF-1").await.unwrap();
        card.verify_payment_v2("REF-1").await.unwrap();

        let paths: Vec<_> = executor
            .requests()
            .iter()
            .map(|r| r.url.path().to_owned())
            .collect();
        assert_eq!(
            paths,
            [
                "/virtual-account/wallet/deposit/verify/REF-1",
                "/virtual-account/wallet/deposit/verify/v2/REF-1"
            ]
        );
    }

    #[tokio::test]
    async fn test_verify_twice_issues_two_requests() {
        let (executor, card) = card();
        let first = card.verify_payment("REF-2").await.unwrap();
        let second = card.verify_payment("REF-2").await.unwrap();

        assert_eq!(executor.requests().len(), 2);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_reconcile_payment_body() {
        let (executor, card) = card();
        card.reconcile_payment("Q6166237864").await.unwrap();

        let request = executor.last();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url.path(), "/transaction/reconcile/card-payment");
        assert_eq!(request.body.unwrap(), json!({"txnRef": "Q6166237864"}));
    }

    #[tokio::test]
    async fn test_transport_failure_returns_no_response() {
        let card = Card::new(RecordingExecutor::failing("timed out"), Mode::Live);
        let err = card.verify_payment("REF-3").await.unwrap_err();
        assert!(matches!(err, ZainpayError::Transport { .. }));
    }
}
