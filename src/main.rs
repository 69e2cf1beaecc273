use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;

use doe_resource_server::logging::init_tracing;
use doe_resource_server::router::init_router;
use doe_resource_server::state::init_app_state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    init_tracing().context("Failed to create logs directory")?;

    let state = init_app_state().await?;
    let addr = state.server_config.addr.clone();
    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(addr = %addr, "Server running");
    info!("Scalar UI available at http://{addr}/scalar");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
