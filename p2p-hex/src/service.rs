//! Transfer Application Service
//!
//! Orchestrates a transfer through the gateway port: normalize, validate,
//! submit, return a classified outcome. Contains NO infrastructure logic.

use std::sync::Arc;

use chrono::Utc;
use p2p_types::dto::ValidationReport;
use p2p_types::{
    CancellationToken, TransferFailure, TransferGateway, TransferLimits, TransferOutcome,
    TransferRequest, TransferState, validate,
};
use rust_decimal::Decimal;

/// Application service for P2P transfers.
///
/// Generic over `G: TransferGateway` - the live client or the mock engine
/// is injected at construction time.
pub struct TransferService<G: TransferGateway> {
    gateway: Arc<G>,
}

impl<G: TransferGateway> TransferService<G> {
    /// Creates a new transfer service with the given gateway.
    pub fn new(gateway: G) -> Self {
        Self {
            gateway: Arc::new(gateway),
        }
    }

    /// Returns a reference to the underlying gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Transfers
    // ─────────────────────────────────────────────────────────────────────────────

    /// Executes an EUR transfer between two tax ids.
    pub async fn execute(
        &self,
        sender_tax_id: &str,
        recipient_tax_id: &str,
        amount: Decimal,
        description: Option<String>,
        reference_id: Option<String>,
        cancel: &CancellationToken,
    ) -> TransferOutcome {
        let request = TransferRequest::new(sender_tax_id, recipient_tax_id, amount)
            .with_description(description)
            .with_reference_id(reference_id);
        self.submit(request, cancel).await
    }

    /// Normalizes, validates and submits a request.
    ///
    /// Invalid requests never reach the gateway: they fail with
    /// `VALIDATION_ERROR` and the full violation list in `details.violations`.
    #[tracing::instrument(
        skip_all,
        fields(reference_id = ?request.reference_id, amount = %request.amount)
    )]
    pub async fn submit(&self, request: TransferRequest, cancel: &CancellationToken) -> TransferOutcome {
        let request = request.normalized();
        let mut state = TransferState::Created;

        let violations = validate(&request);
        if !violations.is_empty() {
            advance(&mut state, TransferState::Failed);
            tracing::info!(violations = violations.len(), "Transfer rejected by validation");
            return TransferFailure::from_violations(&violations, request.reference_id).into();
        }
        advance(&mut state, TransferState::Validated);

        advance(&mut state, TransferState::Submitted);
        let outcome = self.dispatch(request, cancel).await;

        match &outcome {
            TransferOutcome::Success(receipt) => {
                advance(&mut state, TransferState::Succeeded);
                tracing::info!(transaction_id = %receipt.transaction_id, "Transfer completed");
            }
            TransferOutcome::Failure(failure) => {
                advance(&mut state, TransferState::Failed);
                tracing::info!(kind = %failure.kind, code = %failure.code, "Transfer failed");
            }
        }
        outcome
    }

    /// Runs the gateway call on its own task. A panic inside the gateway is
    /// reported as a bare `SYSTEM_ERROR`; dropping this future cancels the
    /// submission.
    async fn dispatch(&self, request: TransferRequest, cancel: &CancellationToken) -> TransferOutcome {
        let reference_id = request.reference_id.clone();
        let gateway = Arc::clone(&self.gateway);
        let token = cancel.child_token();
        let _cancel_on_drop = token.clone().drop_guard();

        let handle = tokio::spawn(async move { gateway.submit(&request, &token).await });

        match handle.await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error = %e, "Gateway task failed");
                TransferFailure::internal(reference_id).into()
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────────

    /// Validates a request without submitting it.
    pub fn validate(&self, request: TransferRequest) -> ValidationReport {
        let request = request.normalized();
        let errors: Vec<String> = validate(&request).iter().map(ToString::to_string).collect();

        ValidationReport {
            is_valid: errors.is_empty(),
            errors,
            timestamp: Utc::now(),
            reference_id: request.reference_id,
        }
    }

    /// Published transfer limits.
    pub fn limits(&self) -> TransferLimits {
        TransferLimits::current()
    }
}

fn advance(state: &mut TransferState, next: TransferState) {
    debug_assert!(
        state.can_transition_to(next),
        "illegal transition {} -> {}",
        state,
        next
    );
    tracing::debug!(from = %state, to = %next, "Transfer state changed");
    *state = next;
}
