use crate::core::errors::ExchangeError;
use crate::core::kernel::classify::{Classifier, Outcome};
use crate::core::kernel::retry::RetryPolicy;
use crate::core::kernel::rest::Transport;
use crate::core::types::RequestDescriptor;
use serde_json::Value;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// Runs request descriptors against a transport with retry-on-5xx.
///
/// Every attempt replays the same descriptor: the signature and nonce
/// computed for the first attempt are reused, never regenerated.
pub struct RequestExecutor<T: Transport> {
    transport: T,
    policy: RetryPolicy,
    classifier: Classifier,
    verbose: bool,
    cancel: Option<CancellationToken>,
}

impl<T: Transport> std::fmt::Debug for RequestExecutor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("policy", &self.policy)
            .field("verbose", &self.verbose)
            .field("cancellable", &self.cancel.is_some())
            .finish_non_exhaustive()
    }
}

impl<T: Transport> RequestExecutor<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            policy: RetryPolicy::default(),
            classifier: Classifier::default(),
            verbose: false,
            cancel: None,
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Execute a request until it succeeds, fails terminally, or exhausts retries
    #[instrument(skip(self, descriptor), fields(method = %descriptor.method_name, verb = %descriptor.verb))]
    pub async fn execute(&self, descriptor: &RequestDescriptor) -> Result<Value, ExchangeError> {
        let mut retry = self.policy.start();

        loop {
            self.log_attempt(descriptor, retry.attempt() + 1, retry.max_attempts());

            let result = match &self.cancel {
                Some(token) => tokio::select! {
                    biased;
                    () = token.cancelled() => return Err(ExchangeError::Cancelled),
                    result = self.transport.send(descriptor) => result,
                },
                None => self.transport.send(descriptor).await,
            };
            retry.record_attempt();

            match self.classifier.classify(result, descriptor, retry.can_retry()) {
                Outcome::Success(value) => return Ok(value),
                Outcome::Failure(err) => {
                    debug!(error = %err, attempts = retry.attempt(), "Request failed");
                    return Err(err);
                }
                Outcome::Retry { status } => {
                    let Some(delay) = retry.next_delay() else {
                        return Err(ExchangeError::HttpStatus {
                            status,
                            message: format!("{} gave up", descriptor.describe()),
                        });
                    };
                    warn!(
                        status,
                        attempt = retry.attempt(),
                        max_attempts = retry.max_attempts(),
                        delay_ms = delay.as_millis(),
                        "Server error, retrying"
                    );
                    self.wait(delay).await?;
                }
            }
        }
    }

    async fn wait(&self, delay: Duration) -> Result<(), ExchangeError> {
        match &self.cancel {
            Some(token) => tokio::select! {
                biased;
                () = token.cancelled() => Err(ExchangeError::Cancelled),
                () = tokio::time::sleep(delay) => Ok(()),
            },
            None => {
                tokio::time::sleep(delay).await;
                Ok(())
            }
        }
    }

    fn log_attempt(&self, descriptor: &RequestDescriptor, attempt: u32, max_attempts: u32) {
        if self.verbose {
            info!(
                url = %descriptor.url,
                params = %descriptor.params,
                attempt,
                max_attempts,
                "Sending request"
            );
        } else {
            debug!(url = %descriptor.url, attempt, max_attempts, "Sending request");
        }
    }
}
