use crate::core::errors::ExchangeError;
use crate::core::types::Params;
use async_trait::async_trait;
use serde_json::Value;

/// Unauthenticated GET calls against the public API
#[async_trait]
pub trait PublicApi: Send + Sync {
    /// Call `method` (a path below the public API root) with query parameters
    async fn public_request(&self, method: &str, params: Params) -> Result<Value, ExchangeError>;
}

/// Signed POST calls against the trading API
#[async_trait]
pub trait PrivateApi: Send + Sync {
    /// Whether credentials are configured; without them every call fails
    /// with [`ExchangeError::MissingCredentials`]
    fn can_sign(&self) -> bool;

    /// Call `method` with body parameters; nonce and method are appended
    /// after `params` before signing
    async fn private_request(&self, method: &str, params: Params)
        -> Result<Value, ExchangeError>;
}
