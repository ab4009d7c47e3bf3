//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server that drives the transfer service.

pub mod handlers;
mod server;

pub use server::HttpServer;
