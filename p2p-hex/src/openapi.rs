//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use p2p_types::dto::{
    FeeInfo, HealthResponse, TransferErrorResponse, TransferResponse, ValidationReport,
};
use p2p_types::{ErrorCode, ErrorKind, ParticipantInfo, TransferLimits, TransferRequest};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/p2p/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
async fn health() {}

/// Submit a P2P transfer
#[utoipa::path(
    post,
    path = "/api/p2p/transfer",
    tag = "transfers",
    request_body = TransferRequest,
    responses(
        (status = 200, description = "Transfer executed", body = TransferResponse),
        (status = 400, description = "Validation failed", body = TransferErrorResponse),
        (status = 422, description = "Rejected by business rules", body = TransferErrorResponse),
        (status = 500, description = "System failure", body = TransferErrorResponse)
    )
)]
async fn transfer() {}

/// Validate a transfer without submitting it
#[utoipa::path(
    post,
    path = "/api/p2p/validate",
    tag = "transfers",
    request_body = TransferRequest,
    responses(
        (status = 200, description = "Validation report", body = ValidationReport)
    )
)]
async fn validate() {}

/// Transfer limits
#[utoipa::path(
    get,
    path = "/api/p2p/limits",
    tag = "transfers",
    responses(
        (status = 200, description = "Current limits", body = TransferLimits)
    )
)]
async fn limits() {}

/// OpenAPI documentation for the P2P transfer API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "P2P Transfer Service API",
        version = "1.0.0",
        description = "Person-to-person EUR transfers between Italian fiscal codes.\n\nFailures carry an `error_code` from a closed catalog. Validation errors are returned with HTTP 400, business-rule rejections with 422 and system failures with 500.",
        license(name = "MIT"),
    ),
    paths(health, transfer, validate, limits),
    components(
        schemas(
            TransferRequest,
            TransferResponse,
            TransferErrorResponse,
            ParticipantInfo,
            FeeInfo,
            ValidationReport,
            TransferLimits,
            HealthResponse,
            ErrorCode,
            ErrorKind,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "transfers", description = "Transfer submission and validation"),
    )
)]
pub struct ApiDoc;
