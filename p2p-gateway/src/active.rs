//! Runtime selection between the live and the mock gateway.

use p2p_types::{CancellationToken, TransferGateway, TransferOutcome, TransferRequest};

use crate::client::GatewayClient;
use crate::config::{ConfigError, GatewayConfig, GatewayMode};
use crate::mock::{MockGateway, MockScenarios};

/// Gateway adapter chosen at startup.
pub enum ActiveGateway {
    Live(GatewayClient),
    Mock(MockGateway),
}

impl ActiveGateway {
    pub fn mode(&self) -> GatewayMode {
        match self {
            Self::Live(_) => GatewayMode::Live,
            Self::Mock(_) => GatewayMode::Mock,
        }
    }
}

#[async_trait::async_trait]
impl TransferGateway for ActiveGateway {
    async fn submit(&self, request: &TransferRequest, cancel: &CancellationToken) -> TransferOutcome {
        match self {
            Self::Live(gateway) => gateway.submit(request, cancel).await,
            Self::Mock(gateway) => gateway.submit(request, cancel).await,
        }
    }
}

/// Builds the gateway for `mode`. `scenarios` is only used in mock mode.
pub fn build_gateway(
    mode: GatewayMode,
    config: &GatewayConfig,
    scenarios: MockScenarios,
) -> Result<ActiveGateway, ConfigError> {
    let gateway = match mode {
        GatewayMode::Live => ActiveGateway::Live(GatewayClient::from_config(config)?),
        GatewayMode::Mock => ActiveGateway::Mock(MockGateway::new(scenarios)),
    };
    tracing::info!(mode = %gateway.mode(), "Transfer gateway ready");
    Ok(gateway)
}
