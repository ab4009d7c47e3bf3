//! Payment gateway port.
//!
//! Implemented by the live HTTP client and by the scenario-driven mock.

use tokio_util::sync::CancellationToken;

use crate::domain::{TransferOutcome, TransferRequest};

/// Executes a transfer against a payment gateway.
///
/// Implementations never return transport errors: every failure mode is
/// classified into a [`TransferOutcome::Failure`] before returning.
/// Triggering `cancel` must abort any wait or in-flight call promptly and
/// yield a System/`TIMEOUT_ERROR` failure.
#[async_trait::async_trait]
pub trait TransferGateway: Send + Sync + 'static {
    /// Submits a normalized, already validated request.
    async fn submit(&self, request: &TransferRequest, cancel: &CancellationToken)
    -> TransferOutcome;
}
