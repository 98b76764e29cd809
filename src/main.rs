use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use cleanup_server::config::Config;
use cleanup_server::routes::create_routes;
use cleanup_server::state::AppState;
use cleanup_server::store::{MemoryStore, PgStore, Store};

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env();

    let store: Arc<dyn Store> = if config.uses_memory_store() {
        tracing::warn!("Using the in-memory store; data is lost on shutdown");
        Arc::new(MemoryStore::new())
    } else {
        let store = PgStore::connect(&config)
            .await
            .expect("Failed to connect to database");
        tracing::info!("Successfully connected to database");
        Arc::new(store)
    };

    let app: Router = create_routes(AppState::new(store), &config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("Server running at http://{}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app).await.expect("Server failed");
}
