//! Operating limits for P2P transfers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Smallest transferable amount (0.01).
pub const MIN_AMOUNT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);
/// Largest single transfer (5000.00).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(500_000, 0, 0, false, 2);
/// Per-sender daily cap, enforced by the gateway (10000.00).
pub const DAILY_LIMIT: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 2);
pub const MAX_DAILY_TRANSACTIONS: u32 = 50;
pub const MAX_DESCRIPTION_LENGTH: usize = 140;
pub const MAX_REFERENCE_ID_LENGTH: usize = 50;
pub const TAX_ID_LENGTH: usize = 16;
pub const AMOUNT_DECIMALS: u32 = 2;
pub const DEFAULT_CURRENCY: &str = "EUR";
pub const SUPPORTED_CURRENCIES: [&str; 1] = [DEFAULT_CURRENCY];

/// Snapshot of the limits, as published to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TransferLimits {
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 0.01)]
    pub min_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 5000.0)]
    pub max_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 10000.0)]
    pub daily_limit: Decimal,
    pub max_daily_transactions: u32,
    pub max_description_length: usize,
    pub max_reference_id_length: usize,
    pub supported_currencies: Vec<String>,
}

impl TransferLimits {
    pub fn current() -> Self {
        Self {
            min_amount: MIN_AMOUNT,
            max_amount: MAX_AMOUNT,
            daily_limit: DAILY_LIMIT,
            max_daily_transactions: MAX_DAILY_TRANSACTIONS,
            max_description_length: MAX_DESCRIPTION_LENGTH,
            max_reference_id_length: MAX_REFERENCE_ID_LENGTH,
            supported_currencies: SUPPORTED_CURRENCIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}
