//! # P2P Client SDK
//!
//! A typed Rust client for the P2P transfer API.

use p2p_types::dto::{HealthResponse, TransferErrorResponse, TransferResponse, ValidationReport};
use p2p_types::{TransferLimits, TransferRequest};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} {code} - {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// The API's error code, if the server answered with one.
    pub fn code(&self) -> Option<&str> {
        match self {
            ClientError::Api { code, .. } if !code.is_empty() => Some(code),
            _ => None,
        }
    }
}

/// P2P transfer API client.
pub struct P2pClient {
    base_url: String,
    http: Client,
}

impl P2pClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Fetches the health payload.
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        self.get("/api/p2p/health").await
    }

    /// Fetches the published transfer limits.
    pub async fn limits(&self) -> Result<TransferLimits, ClientError> {
        self.get("/api/p2p/limits").await
    }

    /// Validates a transfer without submitting it.
    pub async fn validate(&self, req: &TransferRequest) -> Result<ValidationReport, ClientError> {
        self.post("/api/p2p/validate", req).await
    }

    /// Submits a transfer.
    pub async fn transfer(&self, req: &TransferRequest) -> Result<TransferResponse, ClientError> {
        self.post("/api/p2p/transfer", req).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        let body = resp.text().await?;
        if status.is_success() {
            return Ok(serde_json::from_str(&body)?);
        }

        Err(match serde_json::from_str::<TransferErrorResponse>(&body) {
            Ok(err) if !err.error_code.is_empty() => ClientError::Api {
                status: status.as_u16(),
                code: err.error_code,
                message: err.error_message,
            },
            _ => ClientError::Api {
                status: status.as_u16(),
                code: String::new(),
                message: body,
            },
        })
    }
}
