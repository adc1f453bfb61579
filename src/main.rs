use std::sync::Arc;

use anyhow::Context;
use rfa_chat::{
    config::AppConfig,
    routes,
    services::provider::OpenAiChatClient,
    state::AppState,
};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env().context("loading configuration")?;
    info!(provider = ?config.provider, "provider configured");

    let client = OpenAiChatClient::new(config.provider.clone()).context("building provider client")?;
    let state = Arc::new(AppState::new(Arc::new(client)));

    let cors = CorsLayer::very_permissive();

    let app = routes::create_router(&config.server.static_dir)
        .with_state(state)
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(config.server.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.server.bind_addr))?;

    info!(addr = %config.server.bind_addr, static_dir = %config.server.static_dir.display(), "rfa chat listening");
    axum::serve(listener, app).await.context("server failed")?;
    Ok(())
}
