use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use lcscrape_client::{BrowserRendererFactory, GraphqlProfileApi, HttpFetcher};
use lcscrape_core::ProfileService;
use lcscrape_server::routes;
use lcscrape_server::state::SharedScraper;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("lcscrape=info".parse()?))
        .with_target(false)
        .init();

    let port = std::env::var("LCSCRAPE_PORT").unwrap_or_else(|_| "8000".to_string());
    let addr = format!("0.0.0.0:{port}");

    let service = ProfileService::new(
        BrowserRendererFactory::new(),
        HttpFetcher::new()?,
        GraphqlProfileApi::new()?,
    );
    let state: SharedScraper = Arc::new(service);

    let app = routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    tracing::info!("Starting server on {addr}");
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C handler");
    tracing::info!("Shutdown signal received");
}
