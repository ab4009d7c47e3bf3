//! Terminal result of a transfer attempt.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::error::{ErrorCode, ErrorKind};
use crate::validation::Violation;

/// Tax identifier plus settlement account of one side of a transfer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct ParticipantInfo {
    #[schema(example = "RSSMRA85M01H501Z")]
    pub tax_id: String,
    #[serde(default)]
    #[schema(example = "IT60X0542811101000000123456")]
    pub account_iban: String,
}

impl ParticipantInfo {
    pub fn new(tax_id: impl Into<String>, account_iban: impl Into<String>) -> Self {
        Self {
            tax_id: tax_id.into(),
            account_iban: account_iban.into(),
        }
    }
}

/// Details of an executed transfer.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferReceipt {
    pub transaction_id: String,
    pub timestamp: DateTime<Utc>,
    pub amount: Decimal,
    pub currency: String,
    pub sender: ParticipantInfo,
    pub recipient: ParticipantInfo,
    pub fee_amount: Decimal,
    pub fee_currency: String,
    pub execution_date: DateTime<Utc>,
    pub reference_id: Option<String>,
}

/// A classified, terminal failure.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferFailure {
    pub kind: ErrorKind,
    pub code: ErrorCode,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub reference_id: Option<String>,
    pub details: Option<Map<String, Value>>,
    /// Set by classification; only transient failures are retried.
    pub transient: bool,
}

impl TransferFailure {
    pub fn new(
        kind: ErrorKind,
        code: ErrorCode,
        message: impl Into<String>,
        reference_id: Option<String>,
    ) -> Self {
        Self {
            kind,
            code,
            message: message.into(),
            timestamp: Utc::now(),
            reference_id,
            details: None,
            transient: false,
        }
    }

    /// Failure of the code's own kind with its default message.
    pub fn from_code(code: ErrorCode, reference_id: Option<String>) -> Self {
        Self::new(code.kind(), code, code.default_message(), reference_id)
    }

    /// Generic system failure exposing nothing about its cause.
    pub fn internal(reference_id: Option<String>) -> Self {
        Self::from_code(ErrorCode::SystemError, reference_id)
    }

    /// Locally rejected request: `VALIDATION_ERROR`, the violation messages
    /// joined with "; ", and the full list in `details.violations`.
    pub fn from_violations(violations: &[Violation], reference_id: Option<String>) -> Self {
        let message = violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");

        Self::new(
            ErrorKind::Validation,
            ErrorCode::ValidationError,
            message,
            reference_id,
        )
        .with_detail(
            "violations",
            violations.iter().map(Violation::to_json).collect::<Vec<_>>(),
        )
    }

    pub fn with_details(mut self, details: Map<String, Value>) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_detail(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(Map::new)
            .insert(key.to_string(), value.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn transient(mut self, transient: bool) -> Self {
        self.transient = transient;
        self
    }
}

/// Outcome of a transfer: exactly one of success or failure.
#[derive(Debug, Clone, PartialEq)]
pub enum TransferOutcome {
    Success(TransferReceipt),
    Failure(TransferFailure),
}

impl TransferOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, TransferOutcome::Success(_))
    }

    pub fn receipt(&self) -> Option<&TransferReceipt> {
        match self {
            TransferOutcome::Success(receipt) => Some(receipt),
            TransferOutcome::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&TransferFailure> {
        match self {
            TransferOutcome::Success(_) => None,
            TransferOutcome::Failure(failure) => Some(failure),
        }
    }

    pub fn reference_id(&self) -> Option<&str> {
        match self {
            TransferOutcome::Success(receipt) => receipt.reference_id.as_deref(),
            TransferOutcome::Failure(failure) => failure.reference_id.as_deref(),
        }
    }
}

impl From<TransferFailure> for TransferOutcome {
    fn from(failure: TransferFailure) -> Self {
        TransferOutcome::Failure(failure)
    }
}

impl From<TransferReceipt> for TransferOutcome {
    fn from(receipt: TransferReceipt) -> Self {
        TransferOutcome::Success(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_uses_code_kind_and_default_message() {
        let failure = TransferFailure::from_code(ErrorCode::AccountBlocked, Some("R1".into()));
        assert_eq!(failure.kind, ErrorKind::BusinessLogic);
        assert_eq!(failure.message, ErrorCode::AccountBlocked.default_message());
        assert!(!failure.transient);
    }

    #[test]
    fn test_internal_failure_has_no_details() {
        let failure = TransferFailure::internal(None);
        assert_eq!(failure.code, ErrorCode::SystemError);
        assert_eq!(failure.kind, ErrorKind::System);
        assert!(failure.details.is_none());
    }

    #[test]
    fn test_from_violations() {
        use crate::validation::{AmountProblem, Violation};

        let failure = TransferFailure::from_violations(
            &[
                Violation::SameAccount,
                Violation::InvalidAmount(AmountProblem::AboveMaximum),
            ],
            Some("R3".into()),
        );
        assert_eq!(failure.kind, ErrorKind::Validation);
        assert_eq!(failure.code, ErrorCode::ValidationError);
        assert_eq!(
            failure.message,
            "sender_tax_id and recipient_tax_id must be different; amount cannot exceed 5000.00"
        );
        let details = failure.details.unwrap();
        assert_eq!(details["violations"][1]["code"], "INVALID_AMOUNT");
        assert!(!failure.transient);
    }

    #[test]
    fn test_with_detail_accumulates() {
        let failure = TransferFailure::internal(None)
            .with_detail("http_status", 503)
            .with_detail("attempts", 3);
        let details = failure.details.unwrap();
        assert_eq!(details["http_status"], 503);
        assert_eq!(details["attempts"], 3);
    }

    #[test]
    fn test_outcome_accessors() {
        let outcome: TransferOutcome =
            TransferFailure::from_code(ErrorCode::TimeoutError, Some("R2".into())).into();
        assert!(!outcome.is_success());
        assert!(outcome.receipt().is_none());
        assert_eq!(outcome.reference_id(), Some("R2"));
    }
}
