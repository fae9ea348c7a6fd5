use crate::config::EndpointConfig;
use crate::utils::error::{Result, SpotterError};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub endpoints: Option<EndpointsSection>,
}

/// `[endpoints]` 區塊；未填的欄位沿用預設 URL
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EndpointsSection {
    pub ip_endpoint: Option<String>,
    pub geo_endpoint: Option<String>,
    pub flyover_endpoint: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SpotterError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| SpotterError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn to_endpoint_config(&self) -> EndpointConfig {
        let mut config = EndpointConfig::default();

        if let Some(section) = &self.endpoints {
            if let Some(ip) = &section.ip_endpoint {
                config.ip_endpoint = ip.clone();
            }
            if let Some(geo) = &section.geo_endpoint {
                config.geo_endpoint = geo.clone();
            }
            if let Some(flyover) = &section.flyover_endpoint {
                config.flyover_endpoint = flyover.clone();
            }
        }

        config
    }
}
