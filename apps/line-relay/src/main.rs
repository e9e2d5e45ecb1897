use std::sync::Arc;

use anyhow::{Context, Result};
use line_relay::{AppState, LineClient, RelayConfig, router};
use line_relay_telemetry::{TelemetryConfig, init_telemetry};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let telemetry = TelemetryConfig::from_env("line-relay", env!("CARGO_PKG_VERSION"));
    init_telemetry(&telemetry)?;

    let config = RelayConfig::from_env()?;
    if !config.has_access_token() {
        warn!("ACCESS_TOKEN is not set; the messaging API will reject outbound calls");
    }

    let client = LineClient::new(&config).context("failed to build messaging api client")?;
    let app = router(AppState::new(Arc::new(client)));

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!(addr = %config.bind, api_base = %config.api_base, "line-relay listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to install ctrl-c handler");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
