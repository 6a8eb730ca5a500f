// =============================================================================
// Squeeze Alert — Main Entry Point
// =============================================================================
//
// Serves the squeeze indicator over HTTP together with the dashboard's static
// files. Configuration comes from a JSON file (see `RuntimeConfig`) with
// environment overrides.
// =============================================================================

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use squeeze_alert::api;
use squeeze_alert::app_state::AppState;
use squeeze_alert::runtime_config::RuntimeConfig;

const DEFAULT_CONFIG_PATH: &str = "squeeze_config.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path =
        std::env::var("SQUEEZE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());

    let mut config = RuntimeConfig::load_or_init(&config_path).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        RuntimeConfig::default()
    });

    if let Ok(addr) = std::env::var("SQUEEZE_BIND_ADDR") {
        config.bind_addr = addr;
    }

    // ── 2. Shared state ──────────────────────────────────────────────────
    let bind_addr = config.bind_addr.clone();
    let state = Arc::new(AppState::new(config).context("invalid squeeze parameters")?);

    let params = state.indicator.params();
    info!(
        bb_length = params.bb_length,
        bb_mult = params.bb_mult,
        kc_length = params.kc_length,
        kc_mult = params.kc_mult,
        use_true_range = params.use_true_range,
        min_volatility = params.min_volatility,
        atr_window = params.atr_window(),
        containment = ?params.containment,
        "Squeeze parameters"
    );

    // ── 3. HTTP server ───────────────────────────────────────────────────
    let app = api::router(state);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    info!(addr = %bind_addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Squeeze Alert shut down complete.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl+C, running until killed");
        std::future::pending::<()>().await;
    }
    warn!("Shutdown signal received, stopping gracefully");
}
