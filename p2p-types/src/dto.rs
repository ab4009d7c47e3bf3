//! Data Transfer Objects (DTOs) for the gateway contract and the API.
//!
//! The gateway and the caller-facing API share the same snake_case shapes:
//! the request is [`TransferRequest`](crate::TransferRequest), success is
//! [`TransferResponse`], failure is [`TransferErrorResponse`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::domain::{ParticipantInfo, TransferFailure, TransferReceipt};

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";

// ─────────────────────────────────────────────────────────────────────────────
// Transfer DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Fee charged for a transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FeeInfo {
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 0.0)]
    pub amount: Decimal,
    #[schema(example = "EUR")]
    pub currency: String,
}

/// Successful transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TransferResponse {
    #[schema(example = "success")]
    pub status: String,
    #[schema(example = "TXN_BA_20250610_123456789")]
    pub transaction_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 150.5)]
    pub amount: Decimal,
    #[schema(example = "EUR")]
    pub currency: String,
    pub sender: ParticipantInfo,
    pub recipient: ParticipantInfo,
    pub fees: FeeInfo,
    pub execution_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "TXN_001")]
    pub reference_id: Option<String>,
}

impl From<&TransferReceipt> for TransferResponse {
    fn from(receipt: &TransferReceipt) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            transaction_id: receipt.transaction_id.clone(),
            timestamp: receipt.timestamp,
            amount: receipt.amount,
            currency: receipt.currency.clone(),
            sender: receipt.sender.clone(),
            recipient: receipt.recipient.clone(),
            fees: FeeInfo {
                amount: receipt.fee_amount,
                currency: receipt.fee_currency.clone(),
            },
            execution_date: receipt.execution_date,
            reference_id: receipt.reference_id.clone(),
        }
    }
}

impl TransferResponse {
    /// Converts into a receipt, falling back to the request's reference id
    /// when the gateway omits it.
    pub fn into_receipt(self, request_reference_id: Option<&str>) -> TransferReceipt {
        TransferReceipt {
            transaction_id: self.transaction_id,
            timestamp: self.timestamp,
            amount: self.amount,
            currency: self.currency,
            sender: self.sender,
            recipient: self.recipient,
            fee_amount: self.fees.amount,
            fee_currency: self.fees.currency,
            execution_date: self.execution_date,
            reference_id: self
                .reference_id
                .or_else(|| request_reference_id.map(String::from)),
        }
    }
}

/// Failed transfer, carried at HTTP 400 / 422 / 500.
///
/// Every field defaults so that partial gateway payloads still parse.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct TransferErrorResponse {
    #[serde(default)]
    #[schema(example = "error")]
    pub status: String,
    #[serde(default)]
    #[schema(example = "INSUFFICIENT_FUNDS")]
    pub error_code: String,
    #[serde(default)]
    pub error_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<Map<String, Value>>,
}

impl From<&TransferFailure> for TransferErrorResponse {
    fn from(failure: &TransferFailure) -> Self {
        Self {
            status: STATUS_ERROR.to_string(),
            error_code: failure.code.as_str().to_string(),
            error_message: failure.message.clone(),
            timestamp: Some(failure.timestamp),
            reference_id: failure.reference_id.clone(),
            details: failure.details.clone(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Validation / service DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Result of a validation-only check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ValidationReport {
    pub is_valid: bool,
    #[schema(example = json!(["amount cannot exceed 5000.00"]))]
    pub errors: Vec<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
}

/// Liveness payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
    #[schema(example = "P2P Banking Service")]
    pub service: String,
    pub timestamp: DateTime<Utc>,
    #[schema(example = "1.0.0")]
    pub version: String,
}

impl HealthResponse {
    pub fn healthy(version: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            service: "P2P Banking Service".to_string(),
            timestamp: Utc::now(),
            version: version.into(),
        }
    }
}
