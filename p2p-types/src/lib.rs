//! # P2P Types
//!
//! Domain types and port traits for the P2P transfer orchestration service.
//! This crate has ZERO external IO dependencies - only data structures,
//! validation rules, the error taxonomy and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Transfer request, outcome, limits and lifecycle state
//! - `validation` - Field-level and cross-field rules (pure, total)
//! - `error` - Error kinds and the closed catalog of error codes
//! - `classify` - Mapping of raw gateway replies into classified outcomes
//! - `ports/` - Trait definitions that gateway adapters must implement
//! - `dto` - Wire contracts (gateway-facing and caller-facing)

pub mod classify;
pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;
pub mod validation;

// Re-export commonly used types
pub use classify::{RawReply, TransportError, classify_reply, classify_transport_error};
pub use domain::{
    ParticipantInfo, TransferFailure, TransferLimits, TransferOutcome, TransferReceipt,
    TransferRequest, TransferState,
};
pub use error::{ErrorCode, ErrorKind};
pub use ports::TransferGateway;
pub use validation::{Violation, validate};

/// Cancellation signal threaded through every suspending call.
pub use tokio_util::sync::CancellationToken;
