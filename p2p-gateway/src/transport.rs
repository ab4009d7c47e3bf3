//! Single HTTP exchange with the payment gateway.

use p2p_types::{RawReply, TransferRequest, TransportError};
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::config::{ConfigError, GatewayConfig};

/// Sends one transfer request and returns the raw reply. No retries, no
/// classification.
#[async_trait::async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn post_transfer(&self, request: &TransferRequest) -> Result<RawReply, TransportError>;
}

#[async_trait::async_trait]
impl<T: Transport> Transport for std::sync::Arc<T> {
    async fn post_transfer(&self, request: &TransferRequest) -> Result<RawReply, TransportError> {
        self.as_ref().post_transfer(request).await
    }
}

/// reqwest-backed transport with a per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
    url: String,
    api_key: Option<String>,
}

impl HttpTransport {
    pub fn new(config: &GatewayConfig) -> Result<Self, ConfigError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("p2p-gateway/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            url: config.transfer_url()?,
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn post_transfer(&self, request: &TransferRequest) -> Result<RawReply, TransportError> {
        let mut req = self
            .http
            .post(&self.url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(request);

        if let Some(key) = &self.api_key {
            req = req.header("X-API-Key", key);
        }

        let resp = req.send().await.map_err(map_reqwest_error)?;
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(map_reqwest_error)?;

        tracing::debug!(status, bytes = body.len(), "Gateway replied");
        Ok(RawReply { status, body })
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_connect() || e.is_request() || e.is_body() {
        TransportError::Connection(e.to_string())
    } else {
        TransportError::Other(e.to_string())
    }
}
