#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::ports::EndpointProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_placeholders, validate_url, Validate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_IP_ENDPOINT: &str = "https://api.ipify.org/?format=json";
pub const DEFAULT_GEO_ENDPOINT: &str = "https://freegeoip.app/json/{ip}";
pub const DEFAULT_FLYOVER_ENDPOINT: &str =
    "http://api.open-notify.org/iss-pass.json?lat={latitude}&lon={longitude}";

/// 三個上游服務的 URL 模板
///
/// Placeholders: `{ip}` in `geo_endpoint`, `{latitude}` and `{longitude}` in
/// `flyover_endpoint`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub ip_endpoint: String,
    pub geo_endpoint: String,
    pub flyover_endpoint: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            ip_endpoint: DEFAULT_IP_ENDPOINT.to_string(),
            geo_endpoint: DEFAULT_GEO_ENDPOINT.to_string(),
            flyover_endpoint: DEFAULT_FLYOVER_ENDPOINT.to_string(),
        }
    }
}

impl EndpointProvider for EndpointConfig {
    fn ip_endpoint(&self) -> &str {
        &self.ip_endpoint
    }

    fn geo_endpoint(&self) -> &str {
        &self.geo_endpoint
    }

    fn flyover_endpoint(&self) -> &str {
        &self.flyover_endpoint
    }
}

impl Validate for EndpointConfig {
    fn validate(&self) -> Result<()> {
        validate_url("ip_endpoint", &self.ip_endpoint)?;

        validate_placeholders("geo_endpoint", &self.geo_endpoint, &["ip"])?;
        validate_url("geo_endpoint", &self.geo_endpoint.replace("{ip}", "0.0.0.0"))?;

        validate_placeholders(
            "flyover_endpoint",
            &self.flyover_endpoint,
            &["latitude", "longitude"],
        )?;
        let sample = self
            .flyover_endpoint
            .replace("{latitude}", "0")
            .replace("{longitude}", "0");
        validate_url("flyover_endpoint", &sample)?;

        Ok(())
    }
}
