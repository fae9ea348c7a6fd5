use clap::Parser;
use iss_spotter::utils::{format::format_flyovers, logger};
use iss_spotter::{CliConfig, HttpSpotter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose, config.json_logs);

    tracing::info!("Starting iss-spotter CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let endpoints = match config.resolve_endpoints() {
        Ok(endpoints) => endpoints,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    };

    let spotter = HttpSpotter::from_endpoints(&endpoints);

    match spotter.next_iss_times().await {
        Ok(passes) => {
            for line in format_flyovers(&passes, &chrono::Local) {
                println!("{}", line);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Lookup failed: {} (Category: {:?}, Stage: {:?})",
                e,
                e.category(),
                e.stage()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
