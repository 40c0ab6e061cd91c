//! Asynchronous client for the YoBit exchange HTTP API.
//!
//! ```rust,no_run
//! use yobit_client::{ExchangeConfig, YobitBuilder};
//!
//! # async fn example() -> yobit_client::Result<()> {
//! let config = ExchangeConfig::new("api_key".to_string(), "secret".to_string());
//! let yobit = YobitBuilder::new(config).build()?;
//!
//! let ticker = yobit.get_ticker("ltc_btc").await?;
//! let balances = yobit.get_account_info().await?;
//! println!("{} {}", ticker["ltc_btc"]["last"], balances["return"]["funds"]);
//! # Ok(())
//! # }
//! ```
pub mod core;
pub mod exchanges;

pub use core::{
    config::ExchangeConfig,
    errors::{ErrorKind, ExchangeError, Result},
    kernel::RetryPolicy,
    types::{Params, RequestDescriptor},
};
pub use exchanges::yobit::{
    PlaceOrderRequest, SortOrder, TradeHistoryQuery, TradeType, YobitBuilder, YobitConnector,
};
