mod app;
mod components;
mod config;
mod data;
mod error;
mod events;
mod logging;
mod state;
mod theme;
mod utils;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};

use crate::app::App;
use crate::config::Config;
use crate::data::Services;
use crate::data::artifacts::ArtifactStore;
use crate::data::nft::NftService;
use crate::data::registry::Registry;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // A missing .env is fine; settings may come from the environment or flags.
    let _ = dotenvy::dotenv();
    let config = Config::parse();

    let log_path = logging::init(&config.log_dir)?;
    eprintln!("Logging to {}", log_path.display());

    let nft = NftService::new(&config.rpc_url, &config.private_key)
        .wrap_err("PRIVATE_KEY is not a valid hex private key")?;
    tracing::info!("signing as {} via {}", nft.address(), nft.rpc_url());

    let registry = Registry::new(config.registry);
    let deployed = registry.list();
    match &deployed {
        Ok(list) => tracing::info!(
            "{} deployed contracts in {}",
            list.len(),
            registry.path().display()
        ),
        Err(e) => tracing::error!("{e}"),
    }

    let store = ArtifactStore::new(config.artifacts_dir, Some(config.template.clone()));
    let contracts = store.available().unwrap_or_else(|e| {
        tracing::warn!("{e}");
        // the build template may still be deployable without an artifact directory
        match ArtifactStore::template(&config.template) {
            Ok(template) => vec![template],
            Err(e) => {
                tracing::warn!("{e}");
                Vec::new()
            }
        }
    });
    tracing::info!("{} deployable contracts", contracts.len());

    let services = Services::new(nft, registry, config.addresses);
    let mut app = App::new(
        services,
        config.password,
        contracts,
        deployed,
        config.tick_rate_ms,
    );

    // Initialize terminal
    let terminal = ratatui::init();
    let result = app.run(terminal).await;

    // Restore terminal
    ratatui::restore();

    result
}
