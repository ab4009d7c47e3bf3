//! Per-request lifecycle.

use std::fmt;

/// Lifecycle of a single transfer request.
///
/// `Created → Validated → Submitted → Succeeded | Failed`, or
/// `Created → Failed` when validation rejects the request. Retries happen
/// inside `Submitted` and are not states of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferState {
    Created,
    Validated,
    Submitted,
    Succeeded,
    Failed,
}

impl TransferState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransferState::Succeeded | TransferState::Failed)
    }

    pub fn can_transition_to(&self, next: TransferState) -> bool {
        use TransferState::*;
        matches!(
            (self, next),
            (Created, Validated)
                | (Created, Failed)
                | (Validated, Submitted)
                | (Submitted, Succeeded)
                | (Submitted, Failed)
        )
    }
}

impl fmt::Display for TransferState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
