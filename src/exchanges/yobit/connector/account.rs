use super::YobitConnector;
use crate::core::errors::ExchangeError;
use crate::core::traits::{PrivateApi, PublicApi};
use crate::core::types::Params;
use crate::exchanges::yobit::types::{require, require_positive};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::instrument;

impl<A: PublicApi + PrivateApi> YobitConnector<A> {
    /// Balances, API key rights and open order counts
    #[instrument(skip(self), fields(exchange = "yobit"))]
    pub async fn get_account_info(&self) -> Result<Value, ExchangeError> {
        self.api.private_request("getInfo", Params::new()).await
    }

    /// Deposit address for a coin; `force_new` asks the exchange for a fresh one
    #[instrument(skip(self), fields(exchange = "yobit"))]
    pub async fn get_deposit_address(
        &self,
        coin_name: &str,
        force_new: bool,
    ) -> Result<Value, ExchangeError> {
        let params = Params::new()
            .with("coinName", require(coin_name, "coinName")?)
            .with("need_new", u8::from(force_new));
        self.api.private_request("GetDepositAddress", params).await
    }

    #[instrument(skip(self, address), fields(exchange = "yobit"))]
    pub async fn withdraw(
        &self,
        coin_name: &str,
        amount: Decimal,
        address: &str,
    ) -> Result<Value, ExchangeError> {
        let params = Params::new()
            .with("coinName", require(coin_name, "coinName")?)
            .with("amount", require_positive(amount, "amount")?)
            .with("address", require(address, "address")?);
        self.api.private_request("WithdrawCoinsToAddress", params).await
    }
}
