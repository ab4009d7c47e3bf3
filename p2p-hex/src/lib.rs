//! # P2P Hex
//!
//! Application service layer and HTTP adapter for P2P transfers.
//!
//! ## Architecture
//!
//! - `service` - Application service (validate, submit, classify)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `openapi` - OpenAPI document served at `/api-docs/openapi.json`
//!
//! The service is generic over `G: TransferGateway`, allowing the live
//! gateway client or the mock scenario engine to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;


pub use service::TransferService;
