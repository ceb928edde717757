#![forbid(unsafe_code)]

use catalogo_server::{
    bind_addr_from_env, build_router, ApiConfig, AppState, StoreConfig, SupabaseBackend,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let store_config = match StoreConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("startup aborted: {e}");
            std::process::exit(2);
        }
    };
    let backend = match SupabaseBackend::new(&store_config) {
        Ok(backend) => backend,
        Err(e) => {
            error!("startup aborted: {e}");
            std::process::exit(2);
        }
    };

    let state = AppState::with_config(Arc::new(backend), ApiConfig::default());
    let app = build_router(state);

    let addr = bind_addr_from_env();
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("failed to bind {addr}: {e}");
            std::process::exit(2);
        }
    };
    info!(%addr, store = %store_config.base_url, "catalog API listening");

    if let Err(e) = axum::serve(listener, app).await {
        error!("server exited with error: {e}");
        std::process::exit(1);
    }
}
