use crate::core::config::{ExchangeConfig, DEFAULT_TIMEOUT_MS, DEFAULT_USER_AGENT};
use crate::core::errors::{BoxError, ExchangeError};
use crate::core::types::RequestDescriptor;
use async_trait::async_trait;
use reqwest::{Client, Method};
use std::time::Duration;
use thiserror::Error;
use tracing::{instrument, trace};

/// Status line and raw body of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Failure below HTTP: connection refused, timeout, broken body stream
#[derive(Error, Debug)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
    pub timeout: bool,
    pub connect: bool,
    #[source]
    pub source: Option<BoxError>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timeout: false,
            connect: false,
            source: None,
        }
    }

    #[must_use]
    pub const fn timed_out(mut self) -> Self {
        self.timeout = true;
        self
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let timeout = err.is_timeout();
        let connect = err.is_connect();
        let message = if timeout {
            format!("request timed out: {}", err)
        } else if connect {
            format!("connection failed: {}", err)
        } else {
            format!("request failed: {}", err)
        };
        Self {
            message,
            timeout,
            connect,
            source: Some(Box::new(err)),
        }
    }
}

impl From<TransportError> for ExchangeError {
    fn from(err: TransportError) -> Self {
        Self::Network {
            message: err.message,
            source: err.source,
        }
    }
}

/// HTTP transport used by the executor.
///
/// One call is one attempt; retries are the executor's business.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request described by `descriptor` and return the raw response.
    ///
    /// GET parameters travel in the query string, anything else as a
    /// form-encoded body.
    async fn send(&self, descriptor: &RequestDescriptor) -> Result<RawResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn send(&self, descriptor: &RequestDescriptor) -> Result<RawResponse, TransportError> {
        (**self).send(descriptor).await
    }
}

/// Configuration for the REST client
#[derive(Clone, Debug)]
pub struct RestClientConfig {
    /// Default timeout when a descriptor does not override it
    pub timeout: Duration,
    /// User agent string to include in requests
    pub user_agent: String,
}

impl Default for RestClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl RestClientConfig {
    pub fn from_exchange_config(config: &ExchangeConfig) -> Self {
        Self {
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}

/// Builder for creating REST client instances
pub struct RestClientBuilder {
    config: RestClientConfig,
}

impl RestClientBuilder {
    pub fn new(config: RestClientConfig) -> Self {
        Self { config }
    }

    pub fn build(self) -> Result<ReqwestRest, ExchangeError> {
        let client = Client::builder()
            .timeout(self.config.timeout)
            .user_agent(&self.config.user_agent)
            .build()
            .map_err(|e| {
                ExchangeError::Configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(ReqwestRest {
            client,
            config: self.config,
        })
    }
}

/// `Transport` implementation on top of reqwest
#[derive(Clone)]
pub struct ReqwestRest {
    client: Client,
    config: RestClientConfig,
}

impl std::fmt::Debug for ReqwestRest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestRest")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ReqwestRest {
    pub fn new(config: RestClientConfig) -> Result<Self, ExchangeError> {
        RestClientBuilder::new(config).build()
    }

    pub fn config(&self) -> &RestClientConfig {
        &self.config
    }
}

#[async_trait]
impl Transport for ReqwestRest {
    #[instrument(skip(self, descriptor), fields(method = %descriptor.verb, url = %descriptor.url))]
    async fn send(&self, descriptor: &RequestDescriptor) -> Result<RawResponse, TransportError> {
        let mut request = self
            .client
            .request(descriptor.verb.clone(), &descriptor.url)
            .timeout(descriptor.timeout);

        for (name, value) in &descriptor.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        request = if descriptor.verb == Method::GET {
            request.query(descriptor.params.as_pairs())
        } else {
            request.form(descriptor.params.as_pairs())
        };

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            let mut err = TransportError::from(e);
            err.message = format!("failed to read response body: {}", err.message);
            err
        })?;

        trace!(status, body = %body, "Response received");
        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Params;

    #[test]
    fn test_builder_uses_exchange_config() {
        let exchange = ExchangeConfig::read_only().timeout_ms(1_500);
        let rest = RestClientBuilder::new(RestClientConfig::from_exchange_config(&exchange))
            .build()
            .unwrap();
        assert_eq!(rest.config().timeout, Duration::from_millis(1_500));
        assert_eq!(rest.config().user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_transport_error_maps_to_network() {
        let err: ExchangeError = TransportError::new("connection refused").into();
        assert_eq!(err.kind(), crate::core::errors::ErrorKind::Network);
        assert!(err.to_string().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let rest = ReqwestRest::new(RestClientConfig::default()).unwrap();
        // Port 9 (discard) on localhost is expected to refuse connections
        let descriptor = RequestDescriptor::get("info", "http://127.0.0.1:9/api/3/info", Params::new())
            .with_timeout(Duration::from_secs(2));
        let err = rest.send(&descriptor).await.unwrap_err();
        assert!(err.source.is_some());
    }
}
