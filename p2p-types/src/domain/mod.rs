//! Domain models for P2P transfers.

pub mod limits;
pub mod outcome;
pub mod request;
pub mod state;

pub use limits::TransferLimits;
pub use outcome::{ParticipantInfo, TransferFailure, TransferOutcome, TransferReceipt};
pub use request::TransferRequest;
pub use state::TransferState;
