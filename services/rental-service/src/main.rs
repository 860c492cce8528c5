//! Rental Service
//!
//! Serves `/bonjour` and `/bonjour-php`. The upstream URL is injected at
//! runtime via `PHP_SERVICE_URL` (or `--upstream-url`).

use anyhow::{Context, Result};
use clap::Parser;
use rental_service::{router, AppState, Config, HttpNameSource};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let subscriber = tracing_subscriber::fmt().with_env_filter(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    );
    if config.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    info!("Starting Rental Service");

    let names = HttpNameSource::new(config.upstream_url.clone(), config.upstream_timeout())?;
    info!("Upstream name service: {}", names.url());

    let app = router(AppState::new(names));

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    info!("Rental Service listening on {}", config.listen_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
