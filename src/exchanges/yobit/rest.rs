use crate::core::errors::ExchangeError;
use crate::core::kernel::{NonceGenerator, RequestExecutor, Signer, Transport};
use crate::core::traits::{PrivateApi, PublicApi};
use crate::core::types::{Params, RequestDescriptor};
use crate::exchanges::yobit::{PRIVATE_API_PATH, PUBLIC_API_PATH};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

/// Signing state, present only when both key and secret are configured
struct SigningContext {
    signer: Arc<dyn Signer>,
    nonce: NonceGenerator,
}

/// Public and private request paths for YoBit on top of a [`RequestExecutor`]
pub struct YobitRest<T: Transport> {
    executor: RequestExecutor<T>,
    server: String,
    timeout: Duration,
    signing: Option<SigningContext>,
}

impl<T: Transport> std::fmt::Debug for YobitRest<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YobitRest")
            .field("server", &self.server)
            .field("timeout", &self.timeout)
            .field("can_sign", &self.signing.is_some())
            .finish_non_exhaustive()
    }
}

impl<T: Transport> YobitRest<T> {
    pub fn new(executor: RequestExecutor<T>, server: impl Into<String>, timeout: Duration) -> Self {
        Self {
            executor,
            server: server.into().trim_end_matches('/').to_string(),
            timeout,
            signing: None,
        }
    }

    /// Enable private calls with the given signer and nonce source
    #[must_use]
    pub fn with_signing(mut self, signer: Arc<dyn Signer>, nonce: NonceGenerator) -> Self {
        self.signing = Some(SigningContext { signer, nonce });
        self
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn executor(&self) -> &RequestExecutor<T> {
        &self.executor
    }

    /// Last nonce handed out, if this client can sign
    pub fn last_nonce(&self) -> Option<u64> {
        self.signing.as_ref().map(|ctx| ctx.nonce.current())
    }

    pub fn public_url(&self, method: &str) -> String {
        format!("{}/{}/{}", self.server, PUBLIC_API_PATH, method)
    }

    pub fn private_url(&self) -> String {
        format!("{}/{}", self.server, PRIVATE_API_PATH)
    }

    /// Assemble the signed descriptor for a private call.
    ///
    /// `nonce` then `method` are appended after the caller's parameters and
    /// the signature covers the whole set in that order. Headers are built
    /// fresh for every call.
    pub fn signed_descriptor(
        &self,
        method: &str,
        mut params: Params,
    ) -> Result<RequestDescriptor, ExchangeError> {
        let ctx = self
            .signing
            .as_ref()
            .ok_or(ExchangeError::MissingCredentials)?;

        params.insert("nonce", ctx.nonce.next()?);
        params.insert("method", method);
        let headers = ctx.signer.sign_request(&params)?;

        let mut descriptor = RequestDescriptor::post_form(method, self.private_url(), params)
            .with_timeout(self.timeout);
        descriptor.headers = headers;
        Ok(descriptor)
    }
}

#[async_trait]
impl<T: Transport> PublicApi for YobitRest<T> {
    #[instrument(skip_all, fields(exchange = "yobit", method = %method))]
    async fn public_request(&self, method: &str, params: Params) -> Result<Value, ExchangeError> {
        let descriptor = RequestDescriptor::get(method, self.public_url(method), params)
            .with_timeout(self.timeout);
        self.executor.execute(&descriptor).await
    }
}

#[async_trait]
impl<T: Transport> PrivateApi for YobitRest<T> {
    fn can_sign(&self) -> bool {
        self.signing.is_some()
    }

    #[instrument(skip_all, fields(exchange = "yobit", method = %method))]
    async fn private_request(&self, method: &str, params: Params) -> Result<Value, ExchangeError> {
        let descriptor = self.signed_descriptor(method, params)?;
        self.executor.execute(&descriptor).await
    }
}
