//! Error taxonomy for P2P transfers.
//!
//! Three top-level kinds, each owning a closed set of codes. Codes travel on
//! the wire as SCREAMING_SNAKE_CASE strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Top-level classification of a failed transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Caller error; never retried.
    Validation,
    /// A domain rule was violated by the gateway/ledger; never retried.
    BusinessLogic,
    /// Infrastructure failure; retried at the gateway layer when transient.
    System,
}

impl ErrorKind {
    /// HTTP status used on the caller-facing surface.
    pub fn http_status(&self) -> u16 {
        match self {
            ErrorKind::Validation => 400,
            ErrorKind::BusinessLogic => 422,
            ErrorKind::System => 500,
        }
    }

    /// Code used when a reply of this kind carries no recognisable code.
    pub fn generic_code(&self) -> ErrorCode {
        match self {
            ErrorKind::Validation => ErrorCode::ValidationError,
            ErrorKind::BusinessLogic => ErrorCode::UnknownError,
            ErrorKind::System => ErrorCode::SystemError,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Validation => "validation",
            ErrorKind::BusinessLogic => "business_logic",
            ErrorKind::System => "system",
        };
        f.write_str(name)
    }
}

/// Closed catalog of error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation (400)
    InvalidTaxId,
    InvalidAmount,
    MissingRequiredField,
    InvalidCurrency,
    DescriptionTooLong,
    /// Aggregate code for a locally rejected request.
    ValidationError,

    // Business logic (422)
    SenderNotFound,
    RecipientNotFound,
    InsufficientFunds,
    AccountBlocked,
    SameAccountTransfer,
    DailyLimitExceeded,
    DuplicateReference,

    // System (500)
    SystemError,
    TimeoutError,
    NetworkError,
    DeserializationError,
    UnknownError,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 18] = [
        ErrorCode::InvalidTaxId,
        ErrorCode::InvalidAmount,
        ErrorCode::MissingRequiredField,
        ErrorCode::InvalidCurrency,
        ErrorCode::DescriptionTooLong,
        ErrorCode::ValidationError,
        ErrorCode::SenderNotFound,
        ErrorCode::RecipientNotFound,
        ErrorCode::InsufficientFunds,
        ErrorCode::AccountBlocked,
        ErrorCode::SameAccountTransfer,
        ErrorCode::DailyLimitExceeded,
        ErrorCode::DuplicateReference,
        ErrorCode::SystemError,
        ErrorCode::TimeoutError,
        ErrorCode::NetworkError,
        ErrorCode::DeserializationError,
        ErrorCode::UnknownError,
    ];

    /// The kind this code belongs to.
    pub fn kind(&self) -> ErrorKind {
        use ErrorCode::*;
        match self {
            InvalidTaxId | InvalidAmount | MissingRequiredField | InvalidCurrency
            | DescriptionTooLong | ValidationError => ErrorKind::Validation,
            SenderNotFound | RecipientNotFound | InsufficientFunds | AccountBlocked
            | SameAccountTransfer | DailyLimitExceeded | DuplicateReference => {
                ErrorKind::BusinessLogic
            }
            SystemError | TimeoutError | NetworkError | DeserializationError | UnknownError => {
                ErrorKind::System
            }
        }
    }

    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        use ErrorCode::*;
        match self {
            InvalidTaxId => "INVALID_TAX_ID",
            InvalidAmount => "INVALID_AMOUNT",
            MissingRequiredField => "MISSING_REQUIRED_FIELD",
            InvalidCurrency => "INVALID_CURRENCY",
            DescriptionTooLong => "DESCRIPTION_TOO_LONG",
            ValidationError => "VALIDATION_ERROR",
            SenderNotFound => "SENDER_NOT_FOUND",
            RecipientNotFound => "RECIPIENT_NOT_FOUND",
            InsufficientFunds => "INSUFFICIENT_FUNDS",
            AccountBlocked => "ACCOUNT_BLOCKED",
            SameAccountTransfer => "SAME_ACCOUNT_TRANSFER",
            DailyLimitExceeded => "DAILY_LIMIT_EXCEEDED",
            DuplicateReference => "DUPLICATE_REFERENCE",
            SystemError => "SYSTEM_ERROR",
            TimeoutError => "TIMEOUT_ERROR",
            NetworkError => "NETWORK_ERROR",
            DeserializationError => "DESERIALIZATION_ERROR",
            UnknownError => "UNKNOWN_ERROR",
        }
    }

    /// Human-readable message used when the gateway supplies none.
    pub fn default_message(&self) -> &'static str {
        use ErrorCode::*;
        match self {
            InvalidTaxId => "Tax identifier does not match the Italian fiscal code format",
            InvalidAmount => "Amount must be between 0.01 and 5000.00 EUR",
            MissingRequiredField => "One or more required fields are missing",
            InvalidCurrency => "Only EUR is currently supported",
            DescriptionTooLong => "Description cannot exceed 140 characters",
            ValidationError => "The transfer request is not valid",
            SenderNotFound => "Sender tax identifier is not linked to any account",
            RecipientNotFound => "Recipient tax identifier is not linked to any account",
            InsufficientFunds => "Sender does not have sufficient funds for this transfer",
            AccountBlocked => "Sender or recipient account is temporarily blocked",
            SameAccountTransfer => "Cannot transfer funds to the same account",
            DailyLimitExceeded => "Daily P2P transfer limit (10000.00 EUR) exceeded",
            DuplicateReference => "Reference id has already been used in the last 24 hours",
            SystemError => "Temporary system error, please retry later",
            TimeoutError => "The transfer took too long, please check its status",
            NetworkError => "Could not connect to the payment gateway",
            DeserializationError => "The payment gateway returned an unreadable response",
            UnknownError => "Unknown error returned by the payment gateway",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        ErrorCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str() == wanted)
            .ok_or_else(|| format!("Unknown error code: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_code_round_trips_through_its_wire_name() {
        for code in ErrorCode::ALL {
            assert_eq!(code.as_str().parse::<ErrorCode>().unwrap(), code);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            "insufficient_funds".parse::<ErrorCode>().unwrap(),
            ErrorCode::InsufficientFunds
        );
    }

    #[test]
    fn test_unknown_code_is_rejected() {
        assert!("NOT_A_CODE".parse::<ErrorCode>().is_err());
    }

    #[test]
    fn test_code_kinds() {
        assert_eq!(ErrorCode::InvalidTaxId.kind(), ErrorKind::Validation);
        assert_eq!(ErrorCode::ValidationError.kind(), ErrorKind::Validation);
        assert_eq!(ErrorCode::DuplicateReference.kind(), ErrorKind::BusinessLogic);
        assert_eq!(ErrorCode::SameAccountTransfer.kind(), ErrorKind::BusinessLogic);
        assert_eq!(ErrorCode::DeserializationError.kind(), ErrorKind::System);
    }

    #[test]
    fn test_kind_http_status() {
        assert_eq!(ErrorKind::Validation.http_status(), 400);
        assert_eq!(ErrorKind::BusinessLogic.http_status(), 422);
        assert_eq!(ErrorKind::System.http_status(), 500);
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&ErrorCode::DailyLimitExceeded).unwrap();
        assert_eq!(json, "\"DAILY_LIMIT_EXCEEDED\"");
        let kind = serde_json::to_string(&ErrorKind::BusinessLogic).unwrap();
        assert_eq!(kind, "\"business_logic\"");
    }
}
