//! Exchange-agnostic request machinery.
//!
//! A private call flows through the kernel in this order:
//!
//! 1. [`NonceGenerator`] issues the next nonce for the call
//! 2. a [`Signer`] turns the finished parameter set into `Key`/`Sign` headers
//! 3. [`RequestExecutor`] sends the descriptor through a [`Transport`],
//!    retrying 5xx answers according to its [`RetryPolicy`]
//! 4. [`Classifier`] maps every attempt to success, retry, or a normalized
//!    [`ExchangeError`](crate::core::errors::ExchangeError)
//!
//! Public calls skip the first two steps.
//!
//! ```rust,no_run
//! use yobit_client::core::kernel::*;
//! use yobit_client::core::types::{Params, RequestDescriptor};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let rest = RestClientBuilder::new(RestClientConfig::default()).build()?;
//! let executor = RequestExecutor::new(rest).with_policy(RetryPolicy::default().with_max_attempts(3));
//!
//! let descriptor = RequestDescriptor::get("info", "https://yobit.net/api/3/info", Params::new());
//! let info = executor.execute(&descriptor).await?;
//! println!("{}", info["server_time"]);
//! # Ok(())
//! # }
//! ```
pub mod classify;
pub mod executor;
pub mod nonce;
pub mod rest;
pub mod retry;
pub mod signer;

pub use classify::{Classifier, CodeDescriber, Outcome};
pub use executor::RequestExecutor;
pub use nonce::{NonceGenerator, MAX_NONCE};
pub use rest::{
    RawResponse, ReqwestRest, RestClientBuilder, RestClientConfig, Transport, TransportError,
};
pub use retry::{RetryPolicy, RetryState};
pub use signer::{HmacSigner, Signer};
