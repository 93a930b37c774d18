//! Optional query-string filters.
//!
//! Filters are built from optional inputs and keep only the ones that are
//! present. `None` and the empty string both count as absent. The one
//! exception is the card-history `count`, which resolves to
//! [`DEFAULT_HISTORY_COUNT`] when absent instead of being dropped.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Page size used by [`CardHistoryFilter`] when no count is given.
pub const DEFAULT_HISTORY_COUNT: u32 = 20;

/// A single filter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// A string value, sent unchanged.
    Text(String),
    /// An integer value.
    Number(u32),
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(s) => serializer.serialize_str(s),
            Self::Number(n) => serializer.serialize_u32(*n),
        }
    }
}

/// Ordered mapping from parameter name to value.
///
/// Serializes as a JSON object in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterParams(Vec<(&'static str, ParamValue)>);

impl FilterParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Adds `key` if `value` is present and non-empty.
    pub fn push_text(&mut self, key: &'static str, value: Option<&str>) {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.0.push((key, ParamValue::Text(value.to_owned())));
        }
    }

    /// Adds `key` unconditionally.
    pub fn push_number(&mut self, key: &'static str, value: u32) {
        self.0.push((key, ParamValue::Number(value)));
    }

    /// Looks up a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no parameter is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (*k, v))
    }
}

impl Serialize for FilterParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Filter for wallet transaction listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Virtual account number.
    ///
    /// Not sent by [`VirtualAccount::transaction_list`](crate::VirtualAccount::transaction_list),
    /// which takes the account number as a path segment.
    pub account_number: Option<String>,
    /// Transaction type, e.g. `deposit` or `transfer`.
    pub txn_type: Option<String>,
    /// Payment channel, e.g. `card` or `bank`.
    pub payment_channel: Option<String>,
    /// Inclusive start date (`YYYY-MM-DD`).
    pub date_from: Option<String>,
    /// Inclusive end date (`YYYY-MM-DD`).
    pub date_to: Option<String>,
}

impl TransactionFilter {
    /// Creates an empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the account number.
    ///
    /// Ignored by [`VirtualAccount::transaction_list`](crate::VirtualAccount::transaction_list).
    #[must_use]
    pub fn account_number(mut self, value: impl Into<String>) -> Self {
        self.account_number = Some(value.into());
        self
    }

    /// Sets the transaction type.
    #[must_use]
    pub fn txn_type(mut self, value: impl Into<String>) -> Self {
        self.txn_type = Some(value.into());
        self
    }

    /// Sets the payment channel.
    #[must_use]
    pub fn payment_channel(mut self, value: impl Into<String>) -> Self {
        self.payment_channel = Some(value.into());
        self
    }

    /// Sets the start date.
    #[must_use]
    pub fn date_from(mut self, value: impl Into<String>) -> Self {
        self.date_from = Some(value.into());
        self
    }

    /// Sets the end date.
    #[must_use]
    pub fn date_to(mut self, value: impl Into<String>) -> Self {
        self.date_to = Some(value.into());
        self
    }

    /// Builds the parameter set, dropping absent fields.
    #[must_use]
    pub fn to_params(&self) -> FilterParams {
        let mut params = FilterParams::new();
        params.push_text("accountNumber", self.account_number.as_deref());
        params.push_text("txnType", self.txn_type.as_deref());
        params.push_text("paymentChannel", self.payment_channel.as_deref());
        params.push_text("dateFrom", self.date_from.as_deref());
        params.push_text("dateTo", self.date_to.as_deref());
        params
    }
}

/// Filter for card transaction history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardHistoryFilter {
    /// Zainbox the cards belong to.
    pub zainbox_code: Option<String>,
    /// Page size. Absent or zero resolves to [`DEFAULT_HISTORY_COUNT`].
    pub count: Option<u32>,
    /// Inclusive start date (`YYYY-MM-DD`).
    pub date_from: Option<String>,
    /// Inclusive end date (`YYYY-MM-DD`).
    pub date_to: Option<String>,
}

impl CardHistoryFilter {
    /// Creates an empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the zainbox code.
    #[must_use]
    pub fn zainbox_code(mut self, value: impl Into<String>) -> Self {
        self.zainbox_code = Some(value.into());
        self
    }

    /// Sets the page size.
    #[must_use]
    pub const fn count(mut self, value: u32) -> Self {
        self.count = Some(value);
        self
    }

    /// Sets the start date.
    #[must_use]
    pub fn date_from(mut self, value: impl Into<String>) -> Self {
        self.date_from = Some(value.into());
        self
    }

    /// Sets the end date.
    #[must_use]
    pub fn date_to(mut self, value: impl Into<String>) -> Self {
        self.date_to = Some(value.into());
        self
    }

    /// The page size that will be sent.
    #[must_use]
    pub fn effective_count(&self) -> u32 {
        self.count
            .filter(|&c| c != 0)
            .unwrap_or(DEFAULT_HISTORY_COUNT)
    }

    /// Builds the parameter set. `count` is always present.
    #[must_use]
    pub fn to_params(&self) -> FilterParams {
        let mut params = FilterParams::new();
        params.push_text("zainboxCode", self.zainbox_code.as_deref());
        params.push_number("count", self.effective_count());
        params.push_text("dateFrom", self.date_from.as_deref());
        params.push_text("dateTo", self.date_to.as_deref());
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transaction_filter_empty() {
        assert!(TransactionFilter::new().to_params().is_empty());
    }

    #[test]
    fn test_transaction_filter_empty_strings_are_absent() {
        let filter = TransactionFilter {
            account_number: Some(String::new()),
            txn_type: Some("deposit".into()),
            payment_channel: Some(String::new()),
            date_from: None,
            date_to: Some("2024-01-31".into()),
        };
        let params = filter.to_params();
        assert_eq!(params.len(), 2);
        assert!(!params.contains("accountNumber"));
        assert!(!params.contains("paymentChannel"));
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"txnType": "deposit", "dateTo": "2024-01-31"})
        );
    }

    #[test]
    fn test_transaction_filter_keeps_declaration_order() {
        let params = TransactionFilter::new()
            .date_to("2024-02-01")
            .account_number("1234567890")
            .payment_channel("card")
            .to_params();
        let keys: Vec<_> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["accountNumber", "paymentChannel", "dateTo"]);
    }

    #[test]
    fn test_card_history_defaults_count() {
        let params = CardHistoryFilter {
            zainbox_code: None,
            count: None,
            date_from: Some("2024-01-01".into()),
            date_to: Some("2024-01-31".into()),
        }
        .to_params();
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"count": 20, "dateFrom": "2024-01-01", "dateTo": "2024-01-31"})
        );
    }

    #[test]
    fn test_card_history_zero_count_is_absent() {
        let filter = CardHistoryFilter::new().count(0);
        assert_eq!(filter.effective_count(), DEFAULT_HISTORY_COUNT);
        assert_eq!(
            filter.to_params().get("count"),
            Some(&ParamValue::Number(20))
        );
    }

    #[test]
    fn test_card_history_explicit_values() {
        let params = CardHistoryFilter::new()
            .zainbox_code("THbfnDvK5o")
            .count(50)
            .to_params();
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"zainboxCode": "THbfnDvK5o", "count": 50})
        );
    }
}
