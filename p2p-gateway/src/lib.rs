//! # P2P Gateway
//!
//! Outbound adapters implementing the [`TransferGateway`](p2p_types::TransferGateway) port.
//!
//! ## Architecture
//!
//! - `transport` - One HTTP exchange with the payment gateway (reqwest)
//! - `retry` - Backoff schedule and the injectable sleeper
//! - `client` - `GatewayClient`: classification + explicit retry loop
//! - `mock` - `MockGateway`: deterministic scenario engine, no network
//! - `active` - `ActiveGateway`: live or mock, chosen by configuration

pub mod active;
pub mod client;
pub mod config;
pub mod mock;
pub mod retry;
pub mod transport;

pub use active::{ActiveGateway, build_gateway};
pub use client::GatewayClient;
pub use config::{ConfigError, GatewayConfig, GatewayMode};
pub use mock::{MockGateway, MockScenario, MockScenarios};
pub use retry::{RetryPolicy, Sleeper, TokioSleeper};
pub use transport::{HttpTransport, Transport};

use p2p_types::{ErrorCode, TransferFailure};

/// Failure reported when the caller's cancellation signal fires.
pub(crate) fn cancelled_failure(reference_id: Option<&str>) -> TransferFailure {
    TransferFailure::from_code(ErrorCode::TimeoutError, reference_id.map(String::from))
        .with_detail("cancelled", true)
}
