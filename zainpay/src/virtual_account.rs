//! Virtual accounts: creation, status, balances, transactions and deposit
//! verification.

use serde::{Deserialize, Serialize};

use crate::error::{ZainpayError, require};
use crate::executor::RequestExecutor;
use crate::filter::TransactionFilter;
use crate::mode::Mode;
use crate::request::PathTemplate;
use crate::requester::Requester;
use crate::response::Response;

const BALANCE: PathTemplate = PathTemplate::new("virtual-account/wallet/balance/{accountNumber}");
const TRANSACTIONS: PathTemplate =
    PathTemplate::new("virtual-account/wallet/transactions/{accountNumber}/{count}");
const VERIFY_TRANSFER: PathTemplate =
    PathTemplate::new("virtual-account/wallet/transaction/verify/{txnRef}");
const VERIFY_DEPOSIT: PathTemplate =
    PathTemplate::new("virtual-account/wallet/deposit/verify/{txnRef}");
const VERIFY_DEPOSIT_V2: PathTemplate =
    PathTemplate::new("virtual-account/wallet/deposit/verify/v2/{txnRef}");
const CREATE: PathTemplate = PathTemplate::new("virtual-account/create/request");
const CHANGE_STATUS: PathTemplate = PathTemplate::new("virtual-account/change/account/status");
const ZAINBOX_BALANCES: PathTemplate =
    PathTemplate::new("zainbox/accounts/balance/{zainboxCode}");
const RECONCILE_DEPOSIT: PathTemplate = PathTemplate::new("transaction/reconcile/bank-deposit");

/// Partner bank that issues the virtual accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BankType {
    /// Wema Bank, the only issuer the API accepts.
    #[serde(rename = "wemaBank")]
    WemaBank,
}

/// How [`VirtualAccount::reconcile_bank_deposit`] identifies a deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DepositVerification {
    /// By the receiving virtual account number.
    #[serde(rename = "depositAccountNumber")]
    AccountNumber,
    /// By the bank session id.
    #[serde(rename = "depositReferenceNumber")]
    ReferenceNumber,
}

/// Input for [`VirtualAccount::create`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVirtualAccount {
    /// Account holder first name.
    pub first_name: String,
    /// Account holder surname.
    pub surname: String,
    /// Account holder email.
    pub email: String,
    /// Account holder phone number.
    #[serde(rename = "mobileNumber")]
    pub mobile: String,
    /// Date of birth, `DD-MM-YYYY`.
    pub dob: String,
    /// `M` or `F`.
    pub gender: String,
    /// Postal address.
    pub address: String,
    /// Honorific, e.g. `Mr`.
    pub title: String,
    /// State of residence.
    pub state: String,
    /// Zainbox the account is mapped to.
    pub zainbox_code: String,
}

impl CreateVirtualAccount {
    fn validate(&self) -> Result<(), ZainpayError> {
        require("firstName", &self.first_name)?;
        require("surname", &self.surname)?;
        require("email", &self.email)?;
        require("mobileNumber", &self.mobile)?;
        require("dob", &self.dob)?;
        require("gender", &self.gender)?;
        require("address", &self.address)?;
        require("title", &self.title)?;
        require("state", &self.state)?;
        require("zainboxCode", &self.zainbox_code)?;
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateVirtualAccountBody<'a> {
    bank_type: BankType,
    #[serde(flatten)]
    account: &'a CreateVirtualAccount,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChangeStatusBody<'a> {
    zainbox_code: &'a str,
    account_number: &'a str,
    status: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReconcileDepositBody<'a> {
    bank_type: BankType,
    verification_type: DepositVerification,
    verification_value: &'a str,
}

/// Client for the virtual account endpoints.
#[derive(Debug, Clone)]
pub struct VirtualAccount<E> {
    requester: Requester<E>,
}

impl<E: RequestExecutor> VirtualAccount<E> {
    /// Creates a virtual account client sending through `executor` to `mode`.
    pub const fn new(executor: E, mode: Mode) -> Self {
        Self {
            requester: Requester::new(executor, mode),
        }
    }

    /// The mode requests are sent to.
    pub const fn mode(&self) -> &Mode {
        self.requester.mode()
    }

    /// Current wallet balance of a virtual account.
    ///
    /// `GET virtual-account/wallet/balance/{accountNumber}`
    ///
    /// # Errors
    ///
    /// [`ZainpayError::MissingField`] for an empty account number, or any transport error.
    #[cfg_attr(
        feature = "telemetry",
        tracing::instrument(name = "zainpay.virtual_account.balance", skip(self), err)
    )]
    pub async fn balance(&self, account_number: &str) -> Result<Response, ZainpayError> {
        self.requester
            .get(BALANCE, &[("accountNumber", account_number)], None)
            .await
    }

    /// Lists the latest `count` wallet transactions of an account.
    ///
    /// `GET virtual-account/wallet/transactions/{accountNumber}/{count}`
    ///
    /// `count` is a path segment and is sent as given. The filter's own
    /// `account_number` is not forwarded; the path already names the account.
    ///
    /// # Errors
    ///
    /// [`ZainpayError::MissingField`] for an empty account number, or any transport error.
    #[cfg_attr(
        feature = "telemetry",
        tracing::instrument(name = "zainpay.virtual_account.transaction_list", skip(self, filter), err)
    )]
    pub async fn transaction_list(
        &self,
        account_number: &str,
        count: u32,
        filter: &TransactionFilter,
    ) -> Result<Response, ZainpayError> {
        let count = count.to_string();
        let query = TransactionFilter {
            account_number: None,
            ..filter.clone()
        }
        .to_params();
        self.requester
            .get(
                TRANSACTIONS,
                &[("accountNumber", account_number), ("count", count.as_str())],
                Some(&query),
            )
            .await
    }

    /// Verifies a funds transfer by the reference returned when it was posted.
    ///
    /// `GET virtual-account/wallet/transaction/verify/{txnRef}`
    ///
    /// # Errors
    ///
    /// [`ZainpayError::MissingField`] for an empty reference, or any transport error.
    #[cfg_attr(
        feature = "telemetry",
        tracing::instrument(name = "zainpay.virtual_account.verify_transfer", skip(self), err)
    )]
    pub async fn verify_transfer(&self, txn_ref: &str) -> Result<Response, ZainpayError> {
        self.requester
            .get(VERIFY_TRANSFER, &[("txnRef", txn_ref)], None)
            .await
    }

    /// Verifies a deposit into a virtual account.
    ///
    /// `GET virtual-account/wallet/deposit/verify/{txnRef}`
    ///
    /// # Errors
    ///
    /// [`ZainpayError::MissingField`] for an empty reference, or any transport error.
    #[cfg_attr(
        feature = "telemetry",
        tracing::instrument(name = "zainpay.virtual_account.verify_deposit", skip(self), err)
    )]
    pub async fn verify_deposit(&self, txn_ref: &str) -> Result<Response, ZainpayError> {
        self.requester
            .get(VERIFY_DEPOSIT, &[("txnRef", txn_ref)], None)
            .await
    }

    /// Verifies a deposit through the v2 endpoint.
    ///
    /// `GET virtual-account/wallet/deposit/verify/v2/{txnRef}`
    ///
    /// # Errors
    ///
    /// [`ZainpayError::MissingField`] for an empty reference, or any transport error.
    #[cfg_attr(
        feature = "telemetry",
        tracing::instrument(name = "zainpay.virtual_account.verify_deposit_v2", skip(self), err)
    )]
    pub async fn verify_deposit_v2(&self, txn_ref: &str) -> Result<Response, ZainpayError> {
        self.requester
            .get(VERIFY_DEPOSIT_V2, &[("txnRef", txn_ref)], None)
            .await
    }

    /// Creates a virtual account and maps it to a zainbox.
    ///
    /// `POST virtual-account/create/request`. The body always carries
    /// `bankType: "wemaBank"`.
    ///
    /// # Errors
    ///
    /// [`ZainpayError::MissingField`] for an empty input, or any transport error.
    #[cfg_attr(
        feature = "telemetry",
        tracing::instrument(
            name = "zainpay.virtual_account.create",
            skip_all,
            fields(zainbox_code = %account.zainbox_code),
            err
        )
    )]
    pub async fn create(&self, account: &CreateVirtualAccount) -> Result<Response, ZainpayError> {
        account.validate()?;
        let body = CreateVirtualAccountBody {
            bank_type: BankType::WemaBank,
            account,
        };
        self.requester.post(CREATE, &[], &body).await
    }

    /// Activates (`true`) or deactivates (`false`) a virtual account.
    ///
    /// `PATCH virtual-account/change/account/status`
    ///
    /// # Errors
    ///
    /// [`ZainpayError::MissingField`] for an empty input, or any transport error.
    #[cfg_attr(
        feature = "telemetry",
        tracing::instrument(name = "zainpay.virtual_account.change_status", skip(self), err)
    )]
    pub async fn change_status(
        &self,
        zainbox_code: &str,
        account_number: &str,
        status: bool,
    ) -> Result<Response, ZainpayError> {
        let body = ChangeStatusBody {
            zainbox_code: require("zainboxCode", zainbox_code)?,
            account_number: require("accountNumber", account_number)?,
            status,
        };
        self.requester.patch(CHANGE_STATUS, &[], &body).await
    }

    /// Balances of every virtual account in a zainbox.
    ///
    /// `GET zainbox/accounts/balance/{zainboxCode}`
    ///
    /// # Errors
    ///
    /// [`ZainpayError::MissingField`] for an empty zainbox code, or any transport error.
    #[cfg_attr(
        feature = "telemetry",
        tracing::instrument(name = "zainpay.virtual_account.zainbox_accounts_balance", skip(self), err)
    )]
    pub async fn zainbox_accounts_balance(
        &self,
        zainbox_code: &str,
    ) -> Result<Response, ZainpayError> {
        self.requester
            .get(ZAINBOX_BALANCES, &[("zainboxCode", zainbox_code)], None)
            .await
    }

    /// Asks Zainpay to re-check a bank deposit whose notification never arrived.
    ///
    /// `POST transaction/reconcile/bank-deposit`. The body always carries
    /// `bankType: "wemaBank"`. `value` is the account number or the session
    /// id, matching `verification`.
    ///
    /// # Errors
    ///
    /// [`ZainpayError::MissingField`] for an empty value, or any transport error.
    #[cfg_attr(
        feature = "telemetry",
        tracing::instrument(name = "zainpay.virtual_account.reconcile_bank_deposit", skip(self), err)
    )]
    pub async fn reconcile_bank_deposit(
        &self,
        verification: DepositVerification,
        value: &str,
    ) -> Result<Response, ZainpayError> {
        let body = ReconcileDepositBody {
            bank_type: BankType::WemaBank,
            verification_type: verification,
            verification_value: require("verificationValue", value)?,
        };
        self.requester.post(RECONCILE_DEPOSIT, &[], &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::testing::RecordingExecutor;
    use crate::request::Method;
    use serde_json::json;
    use std::sync::Arc;

    fn client() -> (Arc<RecordingExecutor>, VirtualAccount<Arc<RecordingExecutor>>) {
        let executor = RecordingExecutor::new();
        (executor.clone(), VirtualAccount::new(executor, Mode::Sandbox))
    }

    fn new_account() -> CreateVirtualAccount {
        CreateVirtualAccount {
            first_name: "Ada".into(),
            surname: "Obi".into(),
            email: "ada@example.com".into(),
            mobile: "08012345678".into(),
            dob: "12-08-1990".into(),
            gender: "F".into(),
            address: "1 Marina Road".into(),
            title: "Mrs".into(),
            state: "Lagos".into(),
            zainbox_code: "THbfnDvK5o".into(),
        }
    }

    #[tokio::test]
    async fn test_balance_path() {
        let (executor, va) = client();
        va.balance("7966884043").await.unwrap();

        let request = executor.last();
        assert_eq!(request.method, Method::Get);
        assert_eq!(
            request.url.as_str(),
            "https://sandbox.zainpay.ng/virtual-account/wallet/balance/7966884043"
        );
        assert!(request.body.is_none());
    }

    #[tokio::test]
    async fn test_transaction_list_without_filters() {
        let (executor, va) = client();
        va.transaction_list("1234567890", 20, &TransactionFilter::new())
            .await
            .unwrap();

        let request = executor.last();
        assert_eq!(
            request.url.path(),
            "/virtual-account/wallet/transactions/1234567890/20"
        );
        assert!(request.url.query().is_none());
    }

    #[tokio::test]
    async fn test_transaction_list_with_filters() {
        let (executor, va) = client();
        let filter = TransactionFilter::new()
            .account_number("ignored")
            .txn_type("deposit")
            .payment_channel("")
            .date_from("2024-01-01")
            .date_to("2024-01-31");
        va.transaction_list("1234567890", 5, &filter).await.unwrap();

        let request = executor.last();
        assert_eq!(
            request.url.path(),
            "/virtual-account/wallet/transactions/1234567890/5"
        );
        assert_eq!(
            request.url.query(),
            Some("txnType=deposit&dateFrom=2024-01-01&dateTo=2024-01-31")
        );
    }

    #[tokio::test]
    async fn test_verify_endpoints() {
        let (executor, va) = client();
        va.verify_transfer("T-1").await.unwrap();
        va.verify_deposit("D-1").await.unwrap();
        va.verify_deposit_v2("D-1").await.unwrap();

        let paths: Vec<_> = executor
            .requests()
            .iter()
            .map(|r| r.url.path().to_owned())
            .collect();
        assert_eq!(
            paths,
            [
                "/virtual-account/wallet/transaction/verify/T-1",
                "/virtual-account/wallet/deposit/verify/D-1",
                "/virtual-account/wallet/deposit/verify/v2/D-1"
            ]
        );
    }

    #[tokio::test]
    async fn test_create_injects_bank_type() {
        let (executor, va) = client();
        va.create(&new_account()).await.unwrap();

        let request = executor.last();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url.path(), "/virtual-account/create/request");
        assert_eq!(
            request.body.unwrap(),
            json!({
                "bankType": "wemaBank",
                "firstName": "Ada",
                "surname": "Obi",
                "email": "ada@example.com",
                "mobileNumber": "08012345678",
                "dob": "12-08-1990",
                "gender": "F",
                "address": "1 Marina Road",
                "title": "Mrs",
                "state": "Lagos",
                "zainboxCode": "THbfnDvK5o"
            })
        );
    }

    #[tokio::test]
    async fn test_create_rejects_empty_zainbox() {
        let (executor, va) = client();
        let mut account = new_account();
        account.zainbox_code = String::new();

        let err = va.create(&account).await.unwrap_err();
        assert!(matches!(
            err,
            ZainpayError::MissingField {
                field: "zainboxCode"
            }
        ));
        assert!(executor.requests().is_empty());
    }

    #[tokio::test]
    async fn test_change_status_patch() {
        let (executor, va) = client();
        va.change_status("THbfnDvK5o", "7966884043", false)
            .await
            .unwrap();

        let request = executor.last();
        assert_eq!(request.method, Method::Patch);
        assert_eq!(
            request.url.as_str(),
            "https://sandbox.zainpay.ng/virtual-account/change/account/status"
        );
        assert_eq!(
            request.body.unwrap(),
            json!({"zainboxCode": "THbfnDvK5o", "accountNumber": "7966884043", "status": false})
        );
    }

    #[tokio::test]
    async fn test_zainbox_accounts_balance_path() {
        let (executor, va) = client();
        va.zainbox_accounts_balance("THbfnDvK5o").await.unwrap();
        assert_eq!(
            executor.last().url.as_str(),
            "https://sandbox.zainpay.ng/zainbox/accounts/balance/THbfnDvK5o"
        );
    }

    #[tokio::test]
    async fn test_reconcile_bank_deposit_body() {
        let (executor, va) = client();
        va.reconcile_bank_deposit(DepositVerification::ReferenceNumber, "000013230")
            .await
            .unwrap();

        let request = executor.last();
        assert_eq!(request.url.path(), "/transaction/reconcile/bank-deposit");
        assert_eq!(
            request.body.unwrap(),
            json!({
                "bankType": "wemaBank",
                "verificationType": "depositReferenceNumber",
                "verificationValue": "000013230"
            })
        );
    }

    #[tokio::test]
    async fn test_live_mode_uses_live_host() {
        let executor = RecordingExecutor::new();
        let va = VirtualAccount::new(executor.clone(), Mode::Live);
        va.balance("1").await.unwrap();
        assert_eq!(executor.last().url.host_str(), Some("api.zainpay.ng"));
    }
}
