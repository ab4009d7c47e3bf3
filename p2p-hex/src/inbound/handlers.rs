//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use p2p_types::dto::{HealthResponse, TransferErrorResponse, TransferResponse, ValidationReport};
use p2p_types::{
    CancellationToken, ErrorCode, TransferFailure, TransferGateway, TransferOutcome,
    TransferRequest,
};

use crate::TransferService;

/// Application state shared across handlers.
pub struct AppState<G: TransferGateway> {
    pub service: TransferService<G>,
}

/// Wrapper to implement IntoResponse for TransferFailure (orphan rule workaround).
pub struct ApiError(pub TransferFailure);

impl From<TransferFailure> for ApiError {
    fn from(failure: TransferFailure) -> Self {
        ApiError(failure)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.kind.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(TransferErrorResponse::from(&self.0))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(
            TransferFailure::from_code(ErrorCode::ValidationError, None)
                .with_detail("reason", rejection.body_text()),
        )
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}

/// Submit a transfer.
///
/// The request is cancelled if the client goes away before it completes.
/// Unreadable bodies are answered in the error shape at 400.
#[tracing::instrument(skip_all)]
pub async fn transfer<G: TransferGateway>(
    State(state): State<Arc<AppState<G>>>,
    payload: Result<Json<TransferRequest>, JsonRejection>,
) -> Result<Json<TransferResponse>, ApiError> {
    let Json(req) = payload?;
    let cancel = CancellationToken::new();
    match state.service.submit(req, &cancel).await {
        TransferOutcome::Success(receipt) => Ok(Json(TransferResponse::from(&receipt))),
        TransferOutcome::Failure(failure) => Err(failure.into()),
    }
}

/// Validate a transfer without submitting it.
#[tracing::instrument(skip_all)]
pub async fn validate<G: TransferGateway>(
    State(state): State<Arc<AppState<G>>>,
    payload: Result<Json<TransferRequest>, JsonRejection>,
) -> Result<Json<ValidationReport>, ApiError> {
    let Json(req) = payload?;
    Ok(Json(state.service.validate(req)))
}

/// Published transfer limits.
pub async fn limits<G: TransferGateway>(State(state): State<Arc<AppState<G>>>) -> impl IntoResponse {
    Json(state.service.limits())
}
