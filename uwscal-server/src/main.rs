mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;
use uwscal_core::config::UwscalConfig;

use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = UwscalConfig::load()?;
    let state = AppState::load(&config).await?;

    let app = routes::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, data = %config.data_path().display(), "uwscal-server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
