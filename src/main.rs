//! Application entry point for podcastr.
//!
//! Builds the episode page once, prints it, then keeps it revalidated.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use dotenv::dotenv;
use log::debug;
use log::info;
use podcastr::config::Config;
use podcastr::logging::setup_logging;
use podcastr::service::episode_page_service::EpisodePageService;
use podcastr::source::episode_api::EpisodeApi;
use podcastr::task::page_revalidator::PageRevalidator;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let init_start = Instant::now();
    let config = load_config()?;
    let service = setup_service(&config)?;
    let revalidator = PageRevalidator::new(service, config.revalidate_interval);

    render_initial_page(&revalidator).await?;
    revalidator.clone().start()?;

    run(init_start, revalidator).await
}

fn load_config() -> Result<Config> {
    debug!("Loading configuration...");
    let mut config = Config::new();
    config.load()?;
    setup_logging(&config)?;
    info!("Starting podcastr...");
    Ok(config)
}

fn setup_service(config: &Config) -> Result<Arc<EpisodePageService>> {
    debug!("Setting up EpisodePageService for {}...", config.api_url);
    let source = Arc::new(EpisodeApi::new(&config.api_url, config.requests_per_minute)?);
    Ok(Arc::new(EpisodePageService::new(
        source,
        config.page_limit,
        config.latest_count,
    )))
}

async fn render_initial_page(revalidator: &PageRevalidator) -> Result<()> {
    let page = revalidator.revalidate().await?;
    println!("{}", serde_json::to_string_pretty(page.as_ref())?);
    Ok(())
}

async fn run(init_start: Instant, revalidator: Arc<PageRevalidator>) -> Result<()> {
    info!(
        "podcastr is up in {:.2}s. Press Ctrl+C to stop.",
        init_start.elapsed().as_secs_f64()
    );

    tokio::signal::ctrl_c().await?;
    info!("Ctrl+C received, shutting down.");
    revalidator.stop()?;

    Ok(())
}
