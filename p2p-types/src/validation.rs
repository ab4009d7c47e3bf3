//! Validation rules for transfer requests.
//!
//! Every rule is evaluated; all violations are reported in a fixed order:
//! required fields, tax-id format (sender then recipient), same account,
//! amount, currency, description, reference id.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::domain::TransferRequest;
use crate::domain::limits::{
    AMOUNT_DECIMALS, MAX_AMOUNT, MAX_DESCRIPTION_LENGTH, MAX_REFERENCE_ID_LENGTH, MIN_AMOUNT,
    SUPPORTED_CURRENCIES, TAX_ID_LENGTH,
};
use crate::error::ErrorCode;

static TAX_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z]{6}[0-9]{2}[A-Z][0-9]{2}[A-Z][0-9]{3}[A-Z]$")
        .expect("Invalid tax id regex")
});

static REFERENCE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid reference id regex"));

/// Which side of the transfer a tax id belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Party {
    Sender,
    Recipient,
}

impl Party {
    fn field(&self) -> &'static str {
        match self {
            Party::Sender => "sender_tax_id",
            Party::Recipient => "recipient_tax_id",
        }
    }
}

/// Why an amount was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountProblem {
    NotPositive,
    BelowMinimum,
    AboveMaximum,
    TooManyDecimals,
}

/// A single broken rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    MissingField(Party),
    InvalidTaxId(Party),
    SameAccount,
    InvalidAmount(AmountProblem),
    UnsupportedCurrency(String),
    DescriptionTooLong(usize),
    ReferenceIdTooLong(usize),
    ReferenceIdCharset,
}

impl Violation {
    /// Taxonomy code reported for this violation.
    pub fn code(&self) -> ErrorCode {
        match self {
            Violation::MissingField(_) => ErrorCode::MissingRequiredField,
            Violation::InvalidTaxId(_) => ErrorCode::InvalidTaxId,
            Violation::SameAccount => ErrorCode::SameAccountTransfer,
            Violation::InvalidAmount(_) => ErrorCode::InvalidAmount,
            Violation::UnsupportedCurrency(_) => ErrorCode::InvalidCurrency,
            Violation::DescriptionTooLong(_) => ErrorCode::DescriptionTooLong,
            Violation::ReferenceIdTooLong(_) | Violation::ReferenceIdCharset => {
                ErrorCode::ValidationError
            }
        }
    }

    /// Name of the offending request field.
    pub fn field(&self) -> &'static str {
        match self {
            Violation::MissingField(party) | Violation::InvalidTaxId(party) => party.field(),
            Violation::SameAccount => "recipient_tax_id",
            Violation::InvalidAmount(_) => "amount",
            Violation::UnsupportedCurrency(_) => "currency",
            Violation::DescriptionTooLong(_) => "description",
            Violation::ReferenceIdTooLong(_) | Violation::ReferenceIdCharset => "reference_id",
        }
    }

    /// Structured form used in failure details.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "field": self.field(),
            "code": self.code(),
            "message": self.to_string(),
        })
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::MissingField(party) => write!(f, "{} is required", party.field()),
            Violation::InvalidTaxId(party) => {
                write!(f, "{} is not a valid Italian fiscal code", party.field())
            }
            Violation::SameAccount => {
                write!(f, "sender_tax_id and recipient_tax_id must be different")
            }
            Violation::InvalidAmount(AmountProblem::NotPositive) => {
                write!(f, "amount must be greater than zero")
            }
            Violation::InvalidAmount(AmountProblem::BelowMinimum) => {
                write!(f, "amount must be at least {}", MIN_AMOUNT)
            }
            Violation::InvalidAmount(AmountProblem::AboveMaximum) => {
                write!(f, "amount cannot exceed {}", MAX_AMOUNT)
            }
            Violation::InvalidAmount(AmountProblem::TooManyDecimals) => {
                write!(f, "amount can have at most {} decimal places", AMOUNT_DECIMALS)
            }
            Violation::UnsupportedCurrency(currency) => {
                write!(f, "currency {} is not supported, only EUR is accepted", currency)
            }
            Violation::DescriptionTooLong(len) => write!(
                f,
                "description cannot exceed {} characters (got {})",
                MAX_DESCRIPTION_LENGTH, len
            ),
            Violation::ReferenceIdTooLong(len) => write!(
                f,
                "reference_id cannot exceed {} characters (got {})",
                MAX_REFERENCE_ID_LENGTH, len
            ),
            Violation::ReferenceIdCharset => write!(
                f,
                "reference_id may only contain letters, digits, underscores and hyphens"
            ),
        }
    }
}

/// Checks a tax id against the 16-character fiscal code pattern (case-insensitive).
pub fn is_valid_tax_id(tax_id: &str) -> bool {
    let tax_id = tax_id.trim();
    tax_id.chars().count() == TAX_ID_LENGTH && TAX_ID.is_match(&tax_id.to_uppercase())
}

/// Checks an optional reference id's length and charset.
pub fn is_valid_reference_id(reference_id: &str) -> bool {
    reference_id.chars().count() <= MAX_REFERENCE_ID_LENGTH && REFERENCE_ID.is_match(reference_id)
}

fn check_amount(amount: Decimal) -> Option<AmountProblem> {
    if amount <= Decimal::ZERO {
        Some(AmountProblem::NotPositive)
    } else if amount < MIN_AMOUNT {
        Some(AmountProblem::BelowMinimum)
    } else if amount > MAX_AMOUNT {
        Some(AmountProblem::AboveMaximum)
    } else if amount.normalize().scale() > AMOUNT_DECIMALS {
        Some(AmountProblem::TooManyDecimals)
    } else {
        None
    }
}

/// Validates a request. Pure and total: an empty result means valid.
///
/// Expects a normalized request; comparisons are still case-insensitive so
/// an un-normalized request is judged the same way.
pub fn validate(request: &TransferRequest) -> Vec<Violation> {
    let mut violations = Vec::new();

    let sender = request.sender_tax_id.trim();
    let recipient = request.recipient_tax_id.trim();

    if sender.is_empty() {
        violations.push(Violation::MissingField(Party::Sender));
    }
    if recipient.is_empty() {
        violations.push(Violation::MissingField(Party::Recipient));
    }

    if !sender.is_empty() && !is_valid_tax_id(sender) {
        violations.push(Violation::InvalidTaxId(Party::Sender));
    }
    if !recipient.is_empty() && !is_valid_tax_id(recipient) {
        violations.push(Violation::InvalidTaxId(Party::Recipient));
    }

    if !sender.is_empty() && sender.eq_ignore_ascii_case(recipient) {
        violations.push(Violation::SameAccount);
    }

    if let Some(problem) = check_amount(request.amount) {
        violations.push(Violation::InvalidAmount(problem));
    }

    let currency = request.currency.trim();
    if !currency.is_empty()
        && !SUPPORTED_CURRENCIES
            .iter()
            .any(|c| c.eq_ignore_ascii_case(currency))
    {
        violations.push(Violation::UnsupportedCurrency(currency.to_string()));
    }

    if let Some(description) = &request.description {
        let len = description.chars().count();
        if len > MAX_DESCRIPTION_LENGTH {
            violations.push(Violation::DescriptionTooLong(len));
        }
    }

    if let Some(reference_id) = request.reference_id.as_deref().map(str::trim) {
        let len = reference_id.chars().count();
        if len > MAX_REFERENCE_ID_LENGTH {
            violations.push(Violation::ReferenceIdTooLong(len));
        } else if !reference_id.is_empty() && !REFERENCE_ID.is_match(reference_id) {
            violations.push(Violation::ReferenceIdCharset);
        }
    }

    violations
}
