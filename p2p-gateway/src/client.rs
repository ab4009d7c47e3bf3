//! Live gateway client.
//!
//! Each attempt is a single transport exchange raced against the caller's
//! cancellation token. Transient failures (timeouts, network errors, 5xx)
//! are retried with exponential backoff up to the policy's attempt count;
//! everything else is returned as soon as it is classified.

use p2p_types::{
    CancellationToken, TransferFailure, TransferGateway, TransferOutcome, TransferRequest,
    classify_reply, classify_transport_error, validate,
};

use crate::cancelled_failure;
use crate::config::{ConfigError, GatewayConfig};
use crate::retry::{RetryPolicy, Sleeper, TokioSleeper};
use crate::transport::{HttpTransport, Transport};

pub struct GatewayClient<T = HttpTransport, S = TokioSleeper> {
    transport: T,
    sleeper: S,
    policy: RetryPolicy,
}

impl GatewayClient<HttpTransport, TokioSleeper> {
    /// Builds the reqwest-backed client from configuration.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, ConfigError> {
        let transport = HttpTransport::new(config)?;
        tracing::info!(url = transport.url(), "Gateway client configured");
        Ok(Self::new(transport, TokioSleeper, config.retry_policy()))
    }
}

impl<T: Transport, S: Sleeper> GatewayClient<T, S> {
    pub fn new(transport: T, sleeper: S, policy: RetryPolicy) -> Self {
        Self {
            transport,
            sleeper,
            policy,
        }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    async fn attempt(&self, request: &TransferRequest, cancel: &CancellationToken) -> TransferOutcome {
        let reference = request.reference_id.as_deref();
        tokio::select! {
            biased;
            _ = cancel.cancelled() => cancelled_failure(reference).into(),
            result = self.transport.post_transfer(request) => match result {
                Ok(reply) => classify_reply(&reply, reference),
                Err(e) => {
                    tracing::warn!(error = %e, "Gateway transport error");
                    classify_transport_error(&e, reference).into()
                }
            },
        }
    }
}

#[async_trait::async_trait]
impl<T: Transport, S: Sleeper> TransferGateway for GatewayClient<T, S> {
    #[tracing::instrument(skip_all, fields(reference_id = ?request.reference_id))]
    async fn submit(&self, request: &TransferRequest, cancel: &CancellationToken) -> TransferOutcome {
        let reference = request.reference_id.as_deref();

        let violations = validate(request);
        if !violations.is_empty() {
            tracing::info!(violations = violations.len(), "Invalid request not sent to gateway");
            return TransferFailure::from_violations(&violations, reference.map(String::from))
                .into();
        }

        let max_attempts = self.policy.max_attempts();
        let mut attempt = 1;

        loop {
            let failure = match self.attempt(request, cancel).await {
                TransferOutcome::Success(receipt) => {
                    tracing::info!(
                        transaction_id = %receipt.transaction_id,
                        attempt,
                        "Transfer accepted by gateway"
                    );
                    return receipt.into();
                }
                TransferOutcome::Failure(failure) => failure,
            };

            if !failure.transient || cancel.is_cancelled() {
                tracing::info!(code = %failure.code, attempt, "Transfer rejected");
                return failure.into();
            }

            if attempt >= max_attempts {
                tracing::warn!(code = %failure.code, attempt, "Gateway retries exhausted");
                let failure = if attempt > 1 {
                    failure.with_detail("attempts", attempt)
                } else {
                    failure
                };
                return failure.into();
            }

            let delay = self.policy.backoff_after(attempt);
            tracing::warn!(
                code = %failure.code,
                attempt,
                delay_ms = delay.as_millis() as u64,
                "Transient gateway failure, backing off"
            );

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return cancelled_failure(reference).into(),
                _ = self.sleeper.sleep(delay) => {}
            }
            attempt += 1;
        }
    }
}
