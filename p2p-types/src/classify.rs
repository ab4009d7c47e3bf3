//! Classification of raw gateway outcomes.
//!
//! Turns an HTTP status plus body, or a transport-level error, into a
//! [`TransferOutcome`]. Never fails: anything unexpected becomes a System
//! failure with the most specific code available.

use crate::domain::{TransferFailure, TransferOutcome};
use crate::dto::{TransferErrorResponse, TransferResponse};
use crate::error::{ErrorCode, ErrorKind};

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReply {
    pub status: u16,
    pub body: String,
}

impl RawReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Exchange that produced no HTTP reply at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("Gateway request timed out")]
    Timeout,

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Transport error: {0}")]
    Other(String),
}

/// Classifies a reply. 2xx bodies must parse as a success payload.
pub fn classify_reply(reply: &RawReply, reference_id: Option<&str>) -> TransferOutcome {
    let reference = reference_id.map(String::from);

    if (200..300).contains(&reply.status) {
        return match serde_json::from_str::<TransferResponse>(&reply.body) {
            Ok(resp) => TransferOutcome::Success(resp.into_receipt(reference_id)),
            Err(e) => TransferFailure::from_code(ErrorCode::DeserializationError, reference)
                .with_detail("http_status", reply.status)
                .with_detail("reason", e.to_string())
                .into(),
        };
    }

    let kind = match reply.status {
        400 => Some(ErrorKind::Validation),
        422 => Some(ErrorKind::BusinessLogic),
        500 => Some(ErrorKind::System),
        _ => None,
    };
    let transient = (500..600).contains(&reply.status);
    let payload = serde_json::from_str::<TransferErrorResponse>(&reply.body).ok();

    let failure = match kind {
        Some(kind) => from_payload(kind, payload, reference),
        None => {
            let message = payload
                .map(|p| p.error_message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| format!("Gateway replied with HTTP {}", reply.status));
            TransferFailure::new(ErrorKind::System, ErrorCode::UnknownError, message, reference)
        }
    };

    failure
        .with_detail("http_status", reply.status)
        .transient(transient)
        .into()
}

/// Resolves code, message and details from an error payload, falling back
/// to the kind's generic code when the payload is missing, unrecognised, or
/// names a code of a different kind than the status implies.
fn from_payload(
    kind: ErrorKind,
    payload: Option<TransferErrorResponse>,
    reference: Option<String>,
) -> TransferFailure {
    let Some(payload) = payload else {
        let code = kind.generic_code();
        return TransferFailure::new(kind, code, code.default_message(), reference);
    };

    let parsed = payload
        .error_code
        .parse::<ErrorCode>()
        .ok()
        .filter(|code| code.kind() == kind);
    let code = parsed.unwrap_or_else(|| kind.generic_code());
    let message = if payload.error_message.is_empty() {
        code.default_message().to_string()
    } else {
        payload.error_message
    };

    let mut failure = TransferFailure::new(kind, code, message, payload.reference_id.or(reference));
    if let Some(timestamp) = payload.timestamp {
        failure = failure.with_timestamp(timestamp);
    }
    if let Some(details) = payload.details {
        failure = failure.with_details(details);
    }
    if parsed.is_none() && !payload.error_code.is_empty() {
        failure = failure.with_detail("gateway_error_code", payload.error_code);
    }
    failure
}

/// Classifies a transport-level error.
pub fn classify_transport_error(
    error: &TransportError,
    reference_id: Option<&str>,
) -> TransferFailure {
    let reference = reference_id.map(String::from);
    match error {
        TransportError::Timeout => {
            TransferFailure::from_code(ErrorCode::TimeoutError, reference).transient(true)
        }
        TransportError::Connection(_) => {
            TransferFailure::from_code(ErrorCode::NetworkError, reference).transient(true)
        }
        TransportError::Other(_) => TransferFailure::from_code(ErrorCode::UnknownError, reference),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(outcome: TransferOutcome) -> TransferFailure {
        match outcome {
            TransferOutcome::Failure(f) => f,
            TransferOutcome::Success(r) => panic!("expected failure, got {:?}", r),
        }
    }

    fn error_body(code: &str) -> String {
        format!(
            r#"{{"status":"error","error_code":"{}","error_message":"gateway says no","timestamp":"2025-06-10T12:00:00Z","details":{{"available_balance":10.0}}}}"#,
            code
        )
    }

    #[test]
    fn test_400_uses_payload_code() {
        let f = failure(classify_reply(&RawReply::new(400, error_body("INVALID_TAX_ID")), None));
        assert_eq!(f.kind, ErrorKind::Validation);
        assert_eq!(f.code, ErrorCode::InvalidTaxId);
        assert_eq!(f.message, "gateway says no");
        assert!(!f.transient);
    }

    #[test]
    fn test_400_without_payload_defaults_to_generic_validation() {
        let f = failure(classify_reply(&RawReply::new(400, "<html>oops</html>"), Some("R1")));
        assert_eq!(f.kind, ErrorKind::Validation);
        assert_eq!(f.code, ErrorCode::ValidationError);
        assert_eq!(f.reference_id.as_deref(), Some("R1"));
    }

    #[test]
    fn test_422_is_business_logic_with_details() {
        let f = failure(classify_reply(
            &RawReply::new(422, error_body("INSUFFICIENT_FUNDS")),
            Some("TXN_001"),
        ));
        assert_eq!(f.kind, ErrorKind::BusinessLogic);
        assert_eq!(f.code, ErrorCode::InsufficientFunds);
        let details = f.details.unwrap();
        assert_eq!(details["available_balance"], 10.0);
        assert_eq!(details["http_status"], 422);
        assert!(!f.transient);
    }

    #[test]
    fn test_422_with_unknown_code_keeps_raw_code() {
        let f = failure(classify_reply(&RawReply::new(422, error_body("KYC_PENDING")), None));
        assert_eq!(f.kind, ErrorKind::BusinessLogic);
        assert_eq!(f.code, ErrorCode::UnknownError);
        assert_eq!(f.details.unwrap()["gateway_error_code"], "KYC_PENDING");
    }

    #[test]
    fn test_500_with_foreign_code_falls_back_to_system_error() {
        let f = failure(classify_reply(
            &RawReply::new(500, error_body("INSUFFICIENT_FUNDS")),
            None,
        ));
        assert_eq!(f.kind, ErrorKind::System);
        assert_eq!(f.code, ErrorCode::SystemError);
        assert!(f.transient);
        let details = f.details.unwrap();
        assert_eq!(details["gateway_error_code"], "INSUFFICIENT_FUNDS");
        assert_eq!(details["http_status"], 500);
    }

    #[test]
    fn test_422_with_system_code_falls_back_to_unknown() {
        let f = failure(classify_reply(&RawReply::new(422, error_body("TIMEOUT_ERROR")), None));
        assert_eq!(f.kind, ErrorKind::BusinessLogic);
        assert_eq!(f.code, ErrorCode::UnknownError);
        assert!(!f.transient);
        assert_eq!(f.details.unwrap()["gateway_error_code"], "TIMEOUT_ERROR");
    }

    #[test]
    fn test_500_is_transient_system() {
        let f = failure(classify_reply(&RawReply::new(500, ""), None));
        assert_eq!(f.kind, ErrorKind::System);
        assert_eq!(f.code, ErrorCode::SystemError);
        assert!(f.transient);
    }

    #[test]
    fn test_other_statuses() {
        let unavailable = failure(classify_reply(&RawReply::new(503, ""), None));
        assert_eq!(unavailable.code, ErrorCode::UnknownError);
        assert!(unavailable.transient);

        let not_found = failure(classify_reply(&RawReply::new(404, ""), None));
        assert_eq!(not_found.kind, ErrorKind::System);
        assert_eq!(not_found.code, ErrorCode::UnknownError);
        assert!(!not_found.transient);
    }

    #[test]
    fn test_unparseable_success_is_deserialization_error() {
        let f = failure(classify_reply(&RawReply::new(200, "{\"status\":"), None));
        assert_eq!(f.kind, ErrorKind::System);
        assert_eq!(f.code, ErrorCode::DeserializationError);
        assert!(!f.transient);
    }

    #[test]
    fn test_transport_errors() {
        let timeout = classify_transport_error(&TransportError::Timeout, None);
        assert_eq!(timeout.code, ErrorCode::TimeoutError);
        assert!(timeout.transient);

        let network = classify_transport_error(&TransportError::Connection("refused".into()), None);
        assert_eq!(network.code, ErrorCode::NetworkError);
        assert!(network.transient);

        let other = classify_transport_error(&TransportError::Other("tls".into()), None);
        assert_eq!(other.code, ErrorCode::UnknownError);
        assert!(!other.transient);
    }
}
