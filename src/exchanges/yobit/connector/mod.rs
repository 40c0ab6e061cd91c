use crate::core::kernel::ReqwestRest;
use crate::core::traits::{PrivateApi, PublicApi};
use crate::exchanges::yobit::rest::YobitRest;

pub mod account;
pub mod market_data;
pub mod trading;

/// YoBit endpoint façade.
///
/// Market data methods live in [`market_data`], order management in
/// [`trading`] and balances/funds in [`account`]. Every method validates its
/// arguments before anything is sent and returns the exchange payload as
/// `serde_json::Value`.
#[derive(Debug)]
pub struct YobitConnector<A = YobitRest<ReqwestRest>> {
    pub(crate) api: A,
}

impl<A: PublicApi + PrivateApi> YobitConnector<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Whether private methods can be called
    pub fn can_sign(&self) -> bool {
        self.api.can_sign()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::ExchangeError;
    use crate::core::types::Params;
    use crate::exchanges::yobit::types::{PlaceOrderRequest, TradeHistoryQuery, TradeType};
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use serde_json::{json, Value};
    use std::str::FromStr;
    use std::sync::Mutex;

    #[derive(Debug, PartialEq, Eq)]
    enum Call {
        Public(String, String),
        Private(String, String),
    }

    #[derive(Default)]
    struct FakeApi {
        signing: bool,
        calls: Mutex<Vec<Call>>,
    }

    impl FakeApi {
        fn signing() -> Self {
            Self {
                signing: true,
                ..Self::default()
            }
        }

        fn calls(&self) -> std::sync::MutexGuard<'_, Vec<Call>> {
            self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl PublicApi for FakeApi {
        async fn public_request(&self, method: &str, params: Params) -> Result<Value, ExchangeError> {
            self.calls()
                .push(Call::Public(method.to_string(), params.to_query_string()));
            Ok(json!({"success": true}))
        }
    }

    #[async_trait]
    impl PrivateApi for FakeApi {
        fn can_sign(&self) -> bool {
            self.signing
        }

        async fn private_request(&self, method: &str, params: Params) -> Result<Value, ExchangeError> {
            if !self.signing {
                return Err(ExchangeError::MissingCredentials);
            }
            self.calls()
                .push(Call::Private(method.to_string(), params.to_query_string()));
            Ok(json!({"success": 1, "return": {}}))
        }
    }

    fn public(method: &str, query: &str) -> Call {
        Call::Public(method.to_string(), query.to_string())
    }

    fn private(method: &str, query: &str) -> Call {
        Call::Private(method.to_string(), query.to_string())
    }

    #[tokio::test]
    async fn test_market_data_paths() {
        let connector = YobitConnector::new(FakeApi::default());
        connector.get_info().await.unwrap();
        connector.get_ticker("ltc_btc").await.unwrap();
        connector.get_depth("ltc_btc", None).await.unwrap();
        connector.get_trades("ltc_btc-doge_btc", Some(20)).await.unwrap();

        assert_eq!(
            *connector.api().calls(),
            vec![
                public("info", ""),
                public("ticker/ltc_btc", ""),
                public("depth/ltc_btc", "limit=150"),
                public("trades/ltc_btc-doge_btc", "limit=20"),
            ]
        );
    }

    #[tokio::test]
    async fn test_trading_methods() {
        let connector = YobitConnector::new(FakeApi::signing());
        let order = PlaceOrderRequest::new(
            "ltc_btc",
            TradeType::Buy,
            Decimal::from_str("0.0105").unwrap(),
            Decimal::from(3),
        );
        connector.place_order(&order).await.unwrap();
        connector.cancel_order(42).await.unwrap();
        connector.get_active_orders("ltc_btc").await.unwrap();
        connector.get_order_info(42).await.unwrap();
        connector
            .get_trade_history(&TradeHistoryQuery::new("ltc_btc").count(10))
            .await
            .unwrap();

        assert_eq!(
            *connector.api().calls(),
            vec![
                private("Trade", "pair=ltc_btc&type=buy&rate=0.0105&amount=3"),
                private("CancelOrder", "order_id=42"),
                private("ActiveOrders", "pair=ltc_btc"),
                private("OrderInfo", "order_id=42"),
                private("TradeHistory", "pair=ltc_btc&count=10"),
            ]
        );
    }

    #[tokio::test]
    async fn test_account_methods() {
        let connector = YobitConnector::new(FakeApi::signing());
        connector.get_account_info().await.unwrap();
        connector.get_deposit_address("BTC", false).await.unwrap();
        connector.get_deposit_address("BTC", true).await.unwrap();
        connector
            .withdraw("LTC", Decimal::from_str("1.50").unwrap(), "LaddressXYZ")
            .await
            .unwrap();

        assert_eq!(
            *connector.api().calls(),
            vec![
                private("getInfo", ""),
                private("GetDepositAddress", "coinName=BTC&need_new=0"),
                private("GetDepositAddress", "coinName=BTC&need_new=1"),
                private("WithdrawCoinsToAddress", "coinName=LTC&amount=1.5&address=LaddressXYZ"),
            ]
        );
    }

    #[tokio::test]
    async fn test_validation_happens_before_any_request() {
        let connector = YobitConnector::new(FakeApi::signing());

        assert!(matches!(
            connector.get_ticker("").await,
            Err(ExchangeError::MissingParameter("pair"))
        ));
        assert!(matches!(
            connector.cancel_order(0).await,
            Err(ExchangeError::MissingParameter("order_id"))
        ));
        assert!(matches!(
            connector.get_deposit_address("  ", true).await,
            Err(ExchangeError::MissingParameter("coinName"))
        ));
        assert!(matches!(
            connector.withdraw("LTC", Decimal::ONE, "").await,
            Err(ExchangeError::MissingParameter("address"))
        ));
        assert!(matches!(
            connector.withdraw("LTC", Decimal::ZERO, "addr").await,
            Err(ExchangeError::MissingParameter("amount"))
        ));
        assert!(matches!(
            connector.get_depth("ltc_btc", Some(0)).await,
            Err(ExchangeError::InvalidArgument { name: "limit", .. })
        ));

        assert!(connector.api().calls().is_empty());
    }

    #[tokio::test]
    async fn test_private_call_without_credentials() {
        let connector = YobitConnector::new(FakeApi::default());
        assert!(!connector.can_sign());
        let err = connector.get_account_info().await.unwrap_err();
        assert!(matches!(err, ExchangeError::MissingCredentials));
    }
}
