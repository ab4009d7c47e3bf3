//! Configuration loading from environment.

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use p2p_gateway::{GatewayConfig, GatewayMode, MockScenarios};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" | "plain" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Application configuration.
#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub gateway_mode: GatewayMode,
    pub gateway: GatewayConfig,
    pub mock_scenarios_path: Option<PathBuf>,
    pub mock_default_scenario: Option<String>,
    pub log_format: LogFormat,
    pub otlp_endpoint: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = GatewayConfig::default();
        let var = |key: &str| get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let gateway = GatewayConfig {
            base_url: var("GATEWAY_BASE_URL").unwrap_or(defaults.base_url),
            api_version: var("GATEWAY_API_VERSION").unwrap_or(defaults.api_version),
            api_key: var("GATEWAY_API_KEY"),
            timeout: Duration::from_secs(parse_or(&var, "GATEWAY_TIMEOUT_SECS", 30)?),
            enable_retry: parse_bool_or(&var, "GATEWAY_ENABLE_RETRY", defaults.enable_retry)?,
            max_retry_attempts: parse_or(
                &var,
                "GATEWAY_MAX_RETRY_ATTEMPTS",
                defaults.max_retry_attempts,
            )?,
            retry_delay: Duration::from_millis(parse_or(&var, "GATEWAY_RETRY_DELAY_MS", 1000)?),
        };

        let gateway_mode = match var("GATEWAY_MODE") {
            Some(mode) => mode.parse::<GatewayMode>().context("GATEWAY_MODE")?,
            None => GatewayMode::default(),
        };

        if gateway_mode == GatewayMode::Live {
            gateway.transfer_url().context("GATEWAY_BASE_URL")?;
        }

        Ok(Self {
            port: parse_or(&var, "PORT", 3000)?,
            gateway_mode,
            gateway,
            mock_scenarios_path: var("MOCK_SCENARIOS_PATH").map(PathBuf::from),
            mock_default_scenario: var("MOCK_DEFAULT_SCENARIO"),
            log_format: parse_or(&var, "LOG_FORMAT", LogFormat::Pretty)?,
            otlp_endpoint: var("OTEL_EXPORTER_OTLP_ENDPOINT"),
        })
    }

    /// Scenario table handed to `build_gateway`. The scenario file is only
    /// read in mock mode; the live gateway never consults it.
    pub fn gateway_scenarios(&self) -> anyhow::Result<MockScenarios> {
        match self.gateway_mode {
            GatewayMode::Mock => self.mock_scenarios(),
            GatewayMode::Live => Ok(MockScenarios::default()),
        }
    }

    /// Scenario table for the mock gateway: the configured file, or the
    /// built-in table.
    pub fn mock_scenarios(&self) -> anyhow::Result<MockScenarios> {
        let scenarios = match &self.mock_scenarios_path {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                MockScenarios::from_json(&json)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            None => MockScenarios::default(),
        };

        Ok(match &self.mock_default_scenario {
            Some(name) => scenarios.with_default_scenario(name),
            None => scenarios,
        })
    }
}

fn parse_or<T>(var: impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match var(key) {
        Some(raw) => raw
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid {}='{}': {}", key, raw, e)),
        None => Ok(default),
    }
}

fn parse_bool_or(
    var: impl Fn(&str) -> Option<String>,
    key: &str,
    default: bool,
) -> anyhow::Result<bool> {
    match var(key).map(|v| v.to_ascii_lowercase()) {
        Some(v) if matches!(v.as_str(), "true" | "1" | "yes" | "on") => Ok(true),
        Some(v) if matches!(v.as_str(), "false" | "0" | "no" | "off") => Ok(false),
        Some(v) => anyhow::bail!("invalid {}='{}': expected true or false", key, v),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.gateway_mode, GatewayMode::Mock);
        assert_eq!(config.gateway, GatewayConfig::default());
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.mock_scenarios_path.is_none());
        assert!(config.otlp_endpoint.is_none());
    }

    #[test]
    fn test_live_gateway_settings() {
        let config = load(&[
            ("PORT", "8080"),
            ("GATEWAY_MODE", "live"),
            ("GATEWAY_BASE_URL", "https://api.bancaalfa.example"),
            ("GATEWAY_API_KEY", "secret"),
            ("GATEWAY_TIMEOUT_SECS", "5"),
            ("GATEWAY_ENABLE_RETRY", "false"),
            ("GATEWAY_RETRY_DELAY_MS", "250"),
            ("LOG_FORMAT", "json"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.gateway_mode, GatewayMode::Live);
        assert_eq!(config.gateway.api_key.as_deref(), Some("secret"));
        assert_eq!(config.gateway.timeout, Duration::from_secs(5));
        assert_eq!(config.gateway.retry_delay, Duration::from_millis(250));
        assert_eq!(config.gateway.retry_policy().max_attempts(), 1);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(load(&[("PORT", "eighty")]).is_err());
        assert!(load(&[("GATEWAY_MODE", "sandbox")]).is_err());
        assert!(load(&[("GATEWAY_ENABLE_RETRY", "maybe")]).is_err());
        assert!(load(&[("GATEWAY_MODE", "live"), ("GATEWAY_BASE_URL", "ftp://x")]).is_err());
        assert!(load(&[("LOG_FORMAT", "xml")]).is_err());
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = load(&[("PORT", "  "), ("GATEWAY_API_KEY", "")]).unwrap();
        assert_eq!(config.port, 3000);
        assert!(config.gateway.api_key.is_none());
    }

    #[test]
    fn test_mock_default_scenario_override() {
        let config = load(&[("MOCK_DEFAULT_SCENARIO", "error_account_blocked")]).unwrap();
        let scenarios = config.mock_scenarios().unwrap();
        assert_eq!(scenarios.default_scenario, "error_account_blocked");
    }

    #[test]
    fn test_missing_scenarios_file_is_error() {
        let config = load(&[("MOCK_SCENARIOS_PATH", "/nonexistent/scenarios.json")]).unwrap();
        assert!(config.mock_scenarios().is_err());
    }

    #[test]
    fn test_live_mode_ignores_stale_scenarios_file() {
        let config = load(&[
            ("GATEWAY_MODE", "live"),
            ("MOCK_SCENARIOS_PATH", "/nonexistent/scenarios.json"),
        ])
        .unwrap();
        assert!(config.gateway_scenarios().is_ok());

        let mock = load(&[("MOCK_SCENARIOS_PATH", "/nonexistent/scenarios.json")]).unwrap();
        assert!(mock.gateway_scenarios().is_err());
    }

    #[test]
    fn test_scenarios_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scenarios.json");
        std::fs::write(
            &path,
            r#"{"default_scenario": "error_account_blocked", "scenarios": {}}"#,
        )
        .unwrap();

        let config = load(&[("MOCK_SCENARIOS_PATH", path.to_str().unwrap())]).unwrap();
        let scenarios = config.mock_scenarios().unwrap();
        assert_eq!(scenarios.default_scenario, "error_account_blocked");
        assert!(scenarios.scenarios.contains_key("success"));
    }
}
