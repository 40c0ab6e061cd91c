use crate::core::errors::ExchangeError;
use crate::core::types::Params;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Depth and trade list size sent when the caller gives none
pub const DEFAULT_LIST_LIMIT: u32 = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeType {
    Buy,
    Sell,
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => f.write_str("buy"),
            Self::Sell => f.write_str("sell"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => f.write_str("ASC"),
            Self::Desc => f.write_str("DESC"),
        }
    }
}

/// Limit order for the `Trade` method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    pub pair: String,
    #[serde(rename = "type")]
    pub trade_type: TradeType,
    pub rate: Decimal,
    pub amount: Decimal,
}

impl PlaceOrderRequest {
    pub fn new(
        pair: impl Into<String>,
        trade_type: TradeType,
        rate: Decimal,
        amount: Decimal,
    ) -> Self {
        Self {
            pair: pair.into(),
            trade_type,
            rate,
            amount,
        }
    }

    pub fn to_params(&self) -> Result<Params, ExchangeError> {
        let mut params = Params::new();
        params.insert("pair", require_pair(&self.pair)?);
        params.insert("type", self.trade_type);
        params.insert("rate", require_positive(self.rate, "rate")?);
        params.insert("amount", require_positive(self.amount, "amount")?);
        Ok(params)
    }
}

/// Filters for the `TradeHistory` method.
///
/// Only fields that were set are sent; the exchange applies its own
/// defaults (`from=0`, `count=1000`, `order=DESC`, ...) to the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeHistoryQuery {
    pub pair: String,
    pub from: Option<u64>,
    pub count: Option<u64>,
    pub from_id: Option<u64>,
    pub end_id: Option<u64>,
    pub order: Option<SortOrder>,
    pub since: Option<u64>,
    pub end: Option<u64>,
}

impl TradeHistoryQuery {
    pub fn new(pair: impl Into<String>) -> Self {
        Self {
            pair: pair.into(),
            ..Self::default()
        }
    }

    /// Index of the first trade to return
    #[must_use]
    pub const fn from_offset(mut self, from: u64) -> Self {
        self.from = Some(from);
        self
    }

    #[must_use]
    pub const fn count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }

    #[must_use]
    pub const fn from_id(mut self, from_id: u64) -> Self {
        self.from_id = Some(from_id);
        self
    }

    #[must_use]
    pub const fn end_id(mut self, end_id: u64) -> Self {
        self.end_id = Some(end_id);
        self
    }

    #[must_use]
    pub const fn order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Unix seconds
    #[must_use]
    pub const fn since(mut self, since: u64) -> Self {
        self.since = Some(since);
        self
    }

    /// Unix seconds
    #[must_use]
    pub const fn end(mut self, end: u64) -> Self {
        self.end = Some(end);
        self
    }

    pub fn to_params(&self) -> Result<Params, ExchangeError> {
        let mut params = Params::new();
        params.insert("pair", require_pair(&self.pair)?);

        let optional = [
            ("from", self.from),
            ("count", self.count),
            ("from_id", self.from_id),
            ("end_id", self.end_id),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                params.insert(key, value);
            }
        }
        if let Some(order) = self.order {
            params.insert("order", order);
        }
        if let (Some(since), Some(end)) = (self.since, self.end) {
            if since > end {
                return Err(ExchangeError::invalid_argument(
                    "since",
                    format!("{} is after end {}", since, end),
                ));
            }
        }
        if let Some(since) = self.since {
            params.insert("since", since);
        }
        if let Some(end) = self.end {
            params.insert("end", end);
        }
        Ok(params)
    }
}

/// Non-empty value of a required string parameter
pub(crate) fn require<'a>(value: &'a str, name: &'static str) -> Result<&'a str, ExchangeError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ExchangeError::MissingParameter(name))
    } else {
        Ok(trimmed)
    }
}

/// Pair names end up in URL paths, so only `[A-Za-z0-9_-]` is accepted.
/// Several pairs may be joined with `-`.
pub(crate) fn require_pair(pair: &str) -> Result<&str, ExchangeError> {
    let pair = require(pair, "pair")?;
    if let Some(bad) = pair
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
    {
        return Err(ExchangeError::invalid_argument(
            "pair",
            format!("unexpected character '{}' in '{}'", bad, pair),
        ));
    }
    Ok(pair)
}

/// Zero counts as absent; negative values are rejected
pub(crate) fn require_positive(value: Decimal, name: &'static str) -> Result<Decimal, ExchangeError> {
    if value.is_zero() {
        Err(ExchangeError::MissingParameter(name))
    } else if value.is_sign_negative() {
        Err(ExchangeError::invalid_argument(
            name,
            format!("must be positive, got {}", value),
        ))
    } else {
        Ok(value.normalize())
    }
}

pub(crate) fn require_id(value: u64, name: &'static str) -> Result<u64, ExchangeError> {
    if value == 0 {
        Err(ExchangeError::MissingParameter(name))
    } else {
        Ok(value)
    }
}

pub(crate) fn list_limit(limit: Option<u32>) -> Result<u32, ExchangeError> {
    match limit.unwrap_or(DEFAULT_LIST_LIMIT) {
        0 => Err(ExchangeError::invalid_argument("limit", "must be at least 1")),
        limit => Ok(limit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::ErrorKind;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_place_order_params_in_declared_order() {
        let order = PlaceOrderRequest::new("ltc_btc", TradeType::Sell, dec("0.01500"), dec("2"));
        let params = order.to_params().unwrap();
        assert_eq!(params.to_query_string(), "pair=ltc_btc&type=sell&rate=0.015&amount=2");
    }

    #[test]
    fn test_place_order_validation() {
        let missing_pair = PlaceOrderRequest::new(" ", TradeType::Buy, dec("1"), dec("1"));
        assert!(matches!(
            missing_pair.to_params(),
            Err(ExchangeError::MissingParameter("pair"))
        ));

        let zero_rate = PlaceOrderRequest::new("ltc_btc", TradeType::Buy, Decimal::ZERO, dec("1"));
        assert!(matches!(
            zero_rate.to_params(),
            Err(ExchangeError::MissingParameter("rate"))
        ));

        let negative = PlaceOrderRequest::new("ltc_btc", TradeType::Buy, dec("1"), dec("-1"));
        assert_eq!(
            negative.to_params().unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
    }

    #[test]
    fn test_trade_history_sends_only_set_fields() {
        let query = TradeHistoryQuery::new("doge_btc")
            .count(50)
            .order(SortOrder::Asc)
            .since(1_600_000_000);
        assert_eq!(
            query.to_params().unwrap().to_query_string(),
            "pair=doge_btc&count=50&order=ASC&since=1600000000"
        );
    }

    #[test]
    fn test_trade_history_rejects_inverted_range() {
        let query = TradeHistoryQuery::new("doge_btc").since(20).end(10);
        assert_eq!(query.to_params().unwrap_err().kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_pair_validation() {
        assert_eq!(require_pair("ltc_btc-nmc_btc").unwrap(), "ltc_btc-nmc_btc");
        assert!(matches!(require_pair(""), Err(ExchangeError::MissingParameter("pair"))));
        assert_eq!(
            require_pair("ltc/btc").unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
    }

    #[test]
    fn test_list_limit_default() {
        assert_eq!(list_limit(None).unwrap(), 150);
        assert_eq!(list_limit(Some(20)).unwrap(), 20);
        assert!(list_limit(Some(0)).is_err());
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(TradeType::Buy.to_string(), "buy");
        assert_eq!(SortOrder::default().to_string(), "DESC");
        assert_eq!(serde_json::to_value(SortOrder::Asc).unwrap(), "ASC");
    }
}
