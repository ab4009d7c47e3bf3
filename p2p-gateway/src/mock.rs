//! Scenario-driven stand-in for the payment gateway.
//!
//! The scenario is picked from the last character of the recipient's tax
//! id, so the same request always gets the same outcome:
//!
//! | last char | scenario                   |
//! |-----------|----------------------------|
//! | `t`       | `error_insufficient_funds` |
//! | `u`       | `error_account_blocked`    |
//! | `v`       | `error_invalid_account`    |
//! | `z`       | `slow_response`            |
//! | other     | the default scenario       |

use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;
use p2p_types::{
    CancellationToken, ErrorCode, ParticipantInfo, TransferFailure, TransferGateway,
    TransferOutcome, TransferReceipt, TransferRequest,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cancelled_failure;
use crate::retry::{Sleeper, TokioSleeper};

pub const SUCCESS: &str = "success";
pub const INSUFFICIENT_FUNDS: &str = "error_insufficient_funds";
pub const ACCOUNT_BLOCKED: &str = "error_account_blocked";
pub const INVALID_ACCOUNT: &str = "error_invalid_account";
pub const SLOW_RESPONSE: &str = "slow_response";

// ─────────────────────────────────────────────────────────────────────────────
// Scenario table
// ─────────────────────────────────────────────────────────────────────────────

/// Predetermined outcome for a mocked transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockScenario {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<ErrorCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default)]
    pub delay_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mock_transaction_id: Option<String>,
}

impl MockScenario {
    pub fn success() -> Self {
        Self {
            success: true,
            error_code: None,
            error_message: None,
            delay_ms: 0,
            mock_transaction_id: None,
        }
    }

    pub fn failure(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_code: Some(code),
            error_message: Some(message.into()),
            ..Self::success()
        }
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn with_transaction_id(mut self, transaction_id: impl Into<String>) -> Self {
        self.mock_transaction_id = Some(transaction_id.into());
        self
    }
}

/// Named scenarios plus the name used when no trigger matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockScenarios {
    #[serde(default = "default_scenario_name")]
    pub default_scenario: String,
    #[serde(default)]
    pub scenarios: HashMap<String, MockScenario>,
}

fn default_scenario_name() -> String {
    SUCCESS.to_string()
}

impl Default for MockScenarios {
    fn default() -> Self {
        let scenarios = HashMap::from([
            (SUCCESS.to_string(), MockScenario::success()),
            (
                INSUFFICIENT_FUNDS.to_string(),
                MockScenario::failure(
                    ErrorCode::InsufficientFunds,
                    "Insufficient funds in sender account",
                ),
            ),
            (
                ACCOUNT_BLOCKED.to_string(),
                MockScenario::failure(ErrorCode::AccountBlocked, "Sender account is blocked"),
            ),
            (
                INVALID_ACCOUNT.to_string(),
                MockScenario::failure(
                    ErrorCode::RecipientNotFound,
                    "Recipient account not found",
                ),
            ),
            (SLOW_RESPONSE.to_string(), MockScenario::success().with_delay(3000)),
        ]);

        Self {
            default_scenario: default_scenario_name(),
            scenarios,
        }
    }
}

impl MockScenarios {
    /// Parses a scenario table. Missing built-in scenarios are filled in
    /// from the default table.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut parsed: Self = serde_json::from_str(json)?;
        for (name, scenario) in Self::default().scenarios {
            parsed.scenarios.entry(name).or_insert(scenario);
        }
        Ok(parsed)
    }

    pub fn with_default_scenario(mut self, name: impl Into<String>) -> Self {
        self.default_scenario = name.into();
        self
    }

    /// Name of the scenario triggered by the recipient's tax id.
    pub fn scenario_name_for<'a>(&'a self, request: &TransferRequest) -> &'a str {
        let last = request
            .recipient_tax_id
            .trim()
            .chars()
            .last()
            .map(|c| c.to_ascii_lowercase());

        match last {
            Some('t') => INSUFFICIENT_FUNDS,
            Some('u') => ACCOUNT_BLOCKED,
            Some('v') => INVALID_ACCOUNT,
            Some('z') => SLOW_RESPONSE,
            _ => self.default_scenario.as_str(),
        }
    }

    /// Looks up a scenario, falling back to the default scenario and then
    /// to plain success.
    pub fn resolve(&self, name: &str) -> MockScenario {
        self.scenarios
            .get(name)
            .or_else(|| self.scenarios.get(&self.default_scenario))
            .cloned()
            .unwrap_or_else(MockScenario::success)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Gateway
// ─────────────────────────────────────────────────────────────────────────────

pub struct MockGateway<S = TokioSleeper> {
    scenarios: MockScenarios,
    sleeper: S,
}

impl MockGateway<TokioSleeper> {
    pub fn new(scenarios: MockScenarios) -> Self {
        Self::with_sleeper(scenarios, TokioSleeper)
    }
}

impl Default for MockGateway<TokioSleeper> {
    fn default() -> Self {
        Self::new(MockScenarios::default())
    }
}

impl<S: Sleeper> MockGateway<S> {
    pub fn with_sleeper(scenarios: MockScenarios, sleeper: S) -> Self {
        Self { scenarios, sleeper }
    }

    pub fn scenarios(&self) -> &MockScenarios {
        &self.scenarios
    }
}

#[async_trait::async_trait]
impl<S: Sleeper> TransferGateway for MockGateway<S> {
    #[tracing::instrument(skip_all, fields(reference_id = ?request.reference_id))]
    async fn submit(&self, request: &TransferRequest, cancel: &CancellationToken) -> TransferOutcome {
        let reference = request.reference_id.as_deref();
        let name = self.scenarios.scenario_name_for(request);
        let scenario = self.scenarios.resolve(name);
        tracing::debug!(scenario = name, "Mock gateway scenario selected");

        if scenario.delay_ms > 0 {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return cancelled_failure(reference).into(),
                _ = self.sleeper.sleep(Duration::from_millis(scenario.delay_ms)) => {}
            }
        }

        if !scenario.success {
            let code = scenario.error_code.unwrap_or(ErrorCode::SystemError);
            let message = scenario
                .error_message
                .unwrap_or_else(|| code.default_message().to_string());
            return TransferFailure::new(code.kind(), code, message, reference.map(String::from))
                .with_detail("scenario", name)
                .into();
        }

        let now = Utc::now();
        let transaction_id = scenario.mock_transaction_id.unwrap_or_else(|| {
            format!(
                "MOCK_{}_{}",
                now.format("%Y%m%d"),
                uuid::Uuid::new_v4().simple()
            )
        });

        TransferReceipt {
            transaction_id,
            timestamp: now,
            amount: request.amount,
            currency: request.currency.clone(),
            sender: ParticipantInfo::new(&request.sender_tax_id, ""),
            recipient: ParticipantInfo::new(&request.recipient_tax_id, ""),
            fee_amount: Decimal::ZERO,
            fee_currency: request.currency.clone(),
            execution_date: now,
            reference_id: reference.map(String::from),
        }
        .into()
    }
}
