use super::YobitConnector;
use crate::core::errors::ExchangeError;
use crate::core::traits::{PrivateApi, PublicApi};
use crate::core::types::Params;
use crate::exchanges::yobit::types::{list_limit, require_pair};
use serde_json::Value;
use tracing::instrument;

/// Public market data
impl<A: PublicApi + PrivateApi> YobitConnector<A> {
    /// Server time and the list of pairs with their limits and fees
    #[instrument(skip(self), fields(exchange = "yobit"))]
    pub async fn get_info(&self) -> Result<Value, ExchangeError> {
        self.api.public_request("info", Params::new()).await
    }

    /// 24h statistics for one or more `-`-joined pairs
    #[instrument(skip(self), fields(exchange = "yobit"))]
    pub async fn get_ticker(&self, pair: &str) -> Result<Value, ExchangeError> {
        let pair = require_pair(pair)?;
        self.api
            .public_request(&format!("ticker/{}", pair), Params::new())
            .await
    }

    /// Open asks and bids; `limit` defaults to 150
    #[instrument(skip(self), fields(exchange = "yobit"))]
    pub async fn get_depth(&self, pair: &str, limit: Option<u32>) -> Result<Value, ExchangeError> {
        let pair = require_pair(pair)?;
        let params = Params::new().with("limit", list_limit(limit)?);
        self.api
            .public_request(&format!("depth/{}", pair), params)
            .await
    }

    /// Most recent trades; `limit` defaults to 150
    #[instrument(skip(self), fields(exchange = "yobit"))]
    pub async fn get_trades(&self, pair: &str, limit: Option<u32>) -> Result<Value, ExchangeError> {
        let pair = require_pair(pair)?;
        let params = Params::new().with("limit", list_limit(limit)?);
        self.api
            .public_request(&format!("trades/{}", pair), params)
            .await
    }
}
