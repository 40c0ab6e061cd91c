use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{
    Classifier, HmacSigner, NonceGenerator, RequestExecutor, ReqwestRest, RestClientBuilder,
    RestClientConfig, Transport,
};
use crate::exchanges::yobit::{connector::YobitConnector, error_codes, rest::YobitRest};
use secrecy::Secret;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Wires configuration, transport, signer and nonce source into a
/// [`YobitConnector`].
///
/// Private calls are enabled only when both keys are configured; otherwise
/// the connector serves public endpoints and rejects private ones with
/// [`ExchangeError::MissingCredentials`].
#[derive(Debug, Clone)]
pub struct YobitBuilder {
    config: ExchangeConfig,
    cancel: Option<CancellationToken>,
}

impl YobitBuilder {
    pub fn new(config: ExchangeConfig) -> Self {
        Self {
            config,
            cancel: None,
        }
    }

    /// Abort in-flight requests and retry waits when `token` is cancelled
    #[must_use]
    pub fn with_cancellation_token(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Build on top of the default reqwest transport
    pub fn build(self) -> Result<YobitConnector, ExchangeError> {
        let rest = RestClientBuilder::new(RestClientConfig::from_exchange_config(&self.config))
            .build()?;
        self.with_transport(rest)
    }

    /// Build on top of a caller supplied transport
    pub fn with_transport<T: Transport>(
        self,
        transport: T,
    ) -> Result<YobitConnector<YobitRest<T>>, ExchangeError> {
        let config = self.config;

        let mut executor = RequestExecutor::new(transport)
            .with_policy(config.retry.clone())
            .with_classifier(Classifier::new(error_codes::describe))
            .with_verbose(config.verbose);
        if let Some(token) = self.cancel {
            executor = executor.with_cancellation(token);
        }

        let mut rest = YobitRest::new(executor, config.server_url(), config.timeout());
        if let (Some(api_key), Some(secret_key)) = (config.api_key(), config.secret_key()) {
            let nonce = NonceGenerator::from_api_key(api_key);
            let signer = HmacSigner::new(
                Secret::new(api_key.to_string()),
                Secret::new(secret_key.to_string()),
            );
            rest = rest.with_signing(Arc::new(signer), nonce);
        }

        tracing::debug!(
            server = rest.server(),
            can_sign = config.has_credentials(),
            "yobit connector ready"
        );
        Ok(YobitConnector::new(rest))
    }
}

/// Build a connector with the default transport
pub fn build_connector(config: ExchangeConfig) -> Result<YobitConnector, ExchangeError> {
    YobitBuilder::new(config).build()
}

/// Build a connector that only serves public market data
pub fn build_public_connector() -> Result<YobitConnector<YobitRest<ReqwestRest>>, ExchangeError> {
    build_connector(ExchangeConfig::read_only())
}
