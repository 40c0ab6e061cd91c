use super::YobitConnector;
use crate::core::errors::ExchangeError;
use crate::core::traits::{PrivateApi, PublicApi};
use crate::core::types::Params;
use crate::exchanges::yobit::types::{require_id, require_pair, PlaceOrderRequest, TradeHistoryQuery};
use serde_json::Value;
use tracing::instrument;

impl<A: PublicApi + PrivateApi> YobitConnector<A> {
    #[instrument(skip(self), fields(exchange = "yobit", pair = %order.pair))]
    pub async fn place_order(&self, order: &PlaceOrderRequest) -> Result<Value, ExchangeError> {
        let params = order.to_params()?;
        self.api.private_request("Trade", params).await
    }

    #[instrument(skip(self), fields(exchange = "yobit"))]
    pub async fn cancel_order(&self, order_id: u64) -> Result<Value, ExchangeError> {
        let params = Params::new().with("order_id", require_id(order_id, "order_id")?);
        self.api.private_request("CancelOrder", params).await
    }

    #[instrument(skip(self), fields(exchange = "yobit"))]
    pub async fn get_active_orders(&self, pair: &str) -> Result<Value, ExchangeError> {
        let params = Params::new().with("pair", require_pair(pair)?);
        self.api.private_request("ActiveOrders", params).await
    }

    #[instrument(skip(self), fields(exchange = "yobit"))]
    pub async fn get_order_info(&self, order_id: u64) -> Result<Value, ExchangeError> {
        let params = Params::new().with("order_id", require_id(order_id, "order_id")?);
        self.api.private_request("OrderInfo", params).await
    }

    #[instrument(skip(self), fields(exchange = "yobit", pair = %query.pair))]
    pub async fn get_trade_history(&self, query: &TradeHistoryQuery) -> Result<Value, ExchangeError> {
        let params = query.to_params()?;
        self.api.private_request("TradeHistory", params).await
    }
}
