use announce_api::ApiContext;
use announce_core::AppConfig;
use announce_core::utils::logging::init_tracing;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the process environment still applies
    dotenvy::dotenv().ok();

    init_tracing();

    info!("Starting announcement server");

    let config = AppConfig::from_env()?;
    let bind_addr = config.bind_addr.clone();

    let ctx = ApiContext::new(config).await?;
    let app = announce_api::router(ctx);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(addr = %bind_addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
