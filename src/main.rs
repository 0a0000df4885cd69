use std::path::Path;

use anyhow::Context;
use clap::Parser;

use cyberkit::cli::{self, Args};
use cyberkit::{logging, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    if Path::new(".env").exists() {
        dotenvy::dotenv().ok();
    }

    let args = Args::parse();
    let (config, warnings) = Config::load();

    logging::init(&config).context("Failed to initialise logging")?;
    for warning in &warnings {
        log::warn!("{}", warning);
    }
    log::debug!("Loaded config: {:?}", config);

    match args.command {
        Some(command) => cli::handlers::run(command, config, args.json).await,
        None => {
            log::info!("🔒 Starting CyberKit API (no command given)");
            cli::handlers::handle_serve(config, None).await
        }
    }
}
