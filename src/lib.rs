pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use config::{toml_config::TomlConfig, EndpointConfig};
pub use crate::core::{next_iss_times_for_my_location, HttpSpotter, IssSpotter};
pub use domain::model::{Coordinates, FlyOver};
pub use utils::error::{Result, SpotterError, Stage};
