use crate::config::toml_config::TomlConfig;
use crate::config::EndpointConfig;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "iss-spotter")]
#[command(about = "Prints the next ISS passes over your current location")]
pub struct CliConfig {
    #[arg(long, help = "TOML file with an [endpoints] table")]
    pub config: Option<String>,

    #[arg(long, help = "Public IP lookup URL")]
    pub ip_endpoint: Option<String>,

    #[arg(long, help = "Geo-IP URL template, must contain {ip}")]
    pub geo_endpoint: Option<String>,

    #[arg(long, help = "Pass prediction URL template, must contain {latitude} and {longitude}")]
    pub flyover_endpoint: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    /// 預設值 < TOML 檔案 < 命令列參數
    pub fn resolve_endpoints(&self) -> Result<EndpointConfig> {
        let mut endpoints = match &self.config {
            Some(path) => TomlConfig::from_file(path)?.to_endpoint_config(),
            None => EndpointConfig::default(),
        };

        if let Some(ip) = &self.ip_endpoint {
            endpoints.ip_endpoint = ip.clone();
        }
        if let Some(geo) = &self.geo_endpoint {
            endpoints.geo_endpoint = geo.clone();
        }
        if let Some(flyover) = &self.flyover_endpoint {
            endpoints.flyover_endpoint = flyover.clone();
        }

        endpoints.validate()?;
        Ok(endpoints)
    }
}
