//! Profile Analytics Service — Binary Entrypoint
//! Boots the Axum HTTP server: analytics API, forwarding proxy, /metrics.

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use leet_profile_analyzer::aggregate::Aggregator;
use leet_profile_analyzer::api::{self, AppState};
use leet_profile_analyzer::config::UpstreamConfig;
use leet_profile_analyzer::metrics::Metrics;
use leet_profile_analyzer::proxy;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("leet_profile_analyzer=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    init_tracing();

    let cfg = UpstreamConfig::load().context("loading upstream config")?;
    tracing::info!(base_url = %cfg.base_url, page_limit = cfg.page_limit, "upstream configured");

    let metrics = Metrics::init(cfg.page_limit);

    let state = AppState::new(Aggregator::from_config(&cfg));
    let app = api::router(state)
        .merge(proxy::router(&cfg))
        .merge(metrics.router());

    let port: u16 = std::env::var("PORT")
        .ok()
        .map(|p| p.parse().context("PORT must be an integer"))
        .transpose()?
        .unwrap_or(4000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app).await.context("serving http")?;
    Ok(())
}
