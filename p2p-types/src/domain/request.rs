//! Transfer request as submitted to the gateway.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::limits::DEFAULT_CURRENCY;

/// A single P2P transfer request.
///
/// Constructed per call and normalized before validation. Serializes to the
/// gateway's snake_case wire contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TransferRequest {
    /// Sender's Italian fiscal code
    #[serde(default)]
    #[schema(example = "RSSMRA85M01H501Z")]
    pub sender_tax_id: String,
    /// Recipient's Italian fiscal code
    #[serde(default)]
    #[schema(example = "VRDRBT90A41F205X")]
    pub recipient_tax_id: String,
    /// Amount in EUR, at most two decimals
    #[serde(default, with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 150.5)]
    pub amount: Decimal,
    #[serde(default = "default_currency")]
    #[schema(example = "EUR")]
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Rimborso cena")]
    pub description: Option<String>,
    /// Caller-supplied idempotency key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "TXN_001")]
    pub reference_id: Option<String>,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl TransferRequest {
    /// Creates an EUR request without description or reference id.
    pub fn new(
        sender_tax_id: impl Into<String>,
        recipient_tax_id: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            sender_tax_id: sender_tax_id.into(),
            recipient_tax_id: recipient_tax_id.into(),
            amount,
            currency: default_currency(),
            description: None,
            reference_id: None,
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn with_reference_id(mut self, reference_id: Option<String>) -> Self {
        self.reference_id = reference_id;
        self
    }

    /// Trims and upper-cases the tax ids and currency. A blank currency falls
    /// back to EUR; blank optional fields become `None`.
    pub fn normalized(self) -> Self {
        Self {
            sender_tax_id: self.sender_tax_id.trim().to_uppercase(),
            recipient_tax_id: self.recipient_tax_id.trim().to_uppercase(),
            amount: self.amount,
            currency: match self.currency.trim() {
                "" => default_currency(),
                c => c.to_uppercase(),
            },
            description: non_blank(self.description),
            reference_id: non_blank(self.reference_id),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_normalization() {
        let req = TransferRequest::new(" rssmra85m01h501z ", "vrdrbt90a41f205x", dec!(10))
            .with_currency(" eur ")
            .with_description(Some("   ".into()))
            .with_reference_id(Some(" TXN_001 ".into()))
            .normalized();

        assert_eq!(req.sender_tax_id, "RSSMRA85M01H501Z");
        assert_eq!(req.recipient_tax_id, "VRDRBT90A41F205X");
        assert_eq!(req.currency, "EUR");
        assert_eq!(req.description, None);
        assert_eq!(req.reference_id.as_deref(), Some("TXN_001"));
    }

    #[test]
    fn test_blank_currency_defaults_to_eur() {
        let req = TransferRequest::new("A", "B", dec!(1))
            .with_currency("")
            .normalized();
        assert_eq!(req.currency, "EUR");
    }

    #[test]
    fn test_wire_format_is_snake_case_with_numeric_amount() {
        let req = TransferRequest::new("RSSMRA85M01H501Z", "VRDRBT90A41F205X", dec!(150.50))
            .with_reference_id(Some("TXN_001".into()));
        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(json["sender_tax_id"], "RSSMRA85M01H501Z");
        assert_eq!(json["amount"], serde_json::json!(150.5));
        assert_eq!(json["currency"], "EUR");
        assert_eq!(json["reference_id"], "TXN_001");
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_missing_fields_deserialize_as_blank() {
        let req: TransferRequest =
            serde_json::from_str(r#"{"recipient_tax_id": "VRDRBT90A41F205X"}"#).unwrap();
        assert_eq!(req.sender_tax_id, "");
        assert_eq!(req.amount, Decimal::ZERO);
        assert_eq!(req.currency, "EUR");
    }
}
