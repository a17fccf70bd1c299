//! nps entry point.
//!
//! Boots the interactive park explorer. Menu text goes to stdout; logging
//! (including the cache "Using cache"/"Fetching" signals) goes to stderr.

use std::sync::Arc;

use anyhow::Result;
use nps_client::{FetchClient, FetchConfig, PlacesClient, PlacesConfig, SiteDirectory};
use nps_core::{AppConfig, CacheStore};
use tracing_subscriber::EnvFilter;

mod controller;
mod input;
mod prompt;
mod render;

use controller::Controller;
use render::Screen;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let config = AppConfig::load()?;
    tracing::debug!(base_url = %config.base_url, cache = %config.cache_path.display(), "configuration loaded");

    let fetcher = Arc::new(FetchClient::new(FetchConfig::from(&config))?);
    let directory = SiteDirectory::new(fetcher.clone(), &config.base_url)?;
    let places = PlacesConfig::try_from(&config).and_then(|c| PlacesClient::new(fetcher.clone(), c));
    if let Err(e) = &places {
        tracing::warn!(error = %e, "nearby search disabled");
    }

    let cache = CacheStore::load(&config.cache_path);

    let mut controller = Controller::new(directory, places, cache, prompt::detect(), Screen::stdout());
    controller.run().await?;

    let stats = controller.cache_stats();
    tracing::debug!(hits = stats.hits, misses = stats.misses, "session finished");

    Ok(())
}
