use crate::config::Config;
use crate::pipeline::{RegionAggregator, ValuationService};
use crate::provider::ZillowProvider;
use crate::router::handle;
use astra::Server;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod domain;
mod errors;
mod model;
mod pipeline;
mod provider;
mod responses;
mod router;
mod spreadsheets;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("listing_valuation=info")),
        )
        .init();

    // 1️⃣ Configuration
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("configuration error: {e}");
            std::process::exit(1);
        }
    };

    // 2️⃣ Provider + pipeline
    let provider = match ZillowProvider::new(
        config.api_key.clone(),
        config.api_host.clone(),
        config.provider_timeout,
    ) {
        Ok(p) => p,
        Err(e) => {
            error!("provider client init failed: {e}");
            std::process::exit(1);
        }
    };
    let aggregator = RegionAggregator::new(Arc::new(provider), config.min_listings);
    let service = ValuationService::new(aggregator, config.analysis_settings());

    // 3️⃣ Serve
    info!(addr = %config.bind_addr, workers = config.max_workers, "starting server");
    let server = Server::bind(&config.bind_addr).max_workers(config.max_workers);

    let result = server.serve(move |req, _info| match handle(req, &service) {
        Ok(resp) => resp,
        Err(err) => templates::html_error_response(err),
    });

    if let Err(e) = result {
        error!("server ended with error: {e}");
    }

    info!("server shut down cleanly");
}
