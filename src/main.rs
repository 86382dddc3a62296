use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use storefront_catalog::{create_api_router, AppState, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let bind_address = config.bind_address.clone();
    let state = Arc::new(AppState::new(config)?);

    let app = create_api_router(state.clone());

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!(
        address = %listener.local_addr()?,
        product_api = %state.config.product_api_url,
        "Running"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
