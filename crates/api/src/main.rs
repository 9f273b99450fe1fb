//! Scheduling broker server binary

use std::net::SocketAddr;

use anyhow::Result;
use tracing::info;

use slotbroker_api::{routes, AppState, Settings};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    slotbroker_api::logging::init();

    let settings = Settings::from_env()?;
    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    let state = AppState::from_settings(&settings);

    let app = routes::router(state);

    info!(%addr, "slotbroker-server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
