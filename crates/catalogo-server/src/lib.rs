#![forbid(unsafe_code)]

use async_trait::async_trait;
use axum::extract::DefaultBodyLimit;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, patch, post};
use axum::Router;
use catalogo_api::NewProduto;
use catalogo_model::{AppSettings, Produto};
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};
use std::sync::atomic::AtomicU64;
use std::sync::Arc;

mod config;
mod http;
mod middleware;
mod store;

pub use config::{bind_addr_from_env, ApiConfig, MissingEnv, StoreConfig};
pub use store::fake::{FakeStore, UploadedImage};
pub use store::supabase::SupabaseBackend;

pub const CRATE_NAME: &str = "catalogo-server";

/// Failure reported by a [`CatalogStore`] backend. `NotFound` is the
/// one case the handlers map to a dedicated status; everything else is
/// an upstream failure surfaced as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    NotFound,
    Upstream(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => f.write_str("row not found"),
            Self::Upstream(message) => f.write_str(message),
        }
    }
}

impl std::error::Error for StoreError {}

/// Boundary to the hosted data/storage service. One implementation
/// talks to Supabase over REST ([`SupabaseBackend`]); tests use the
/// in-memory [`FakeStore`].
#[async_trait]
pub trait CatalogStore: Send + Sync + 'static {
    fn backend_tag(&self) -> &'static str;

    /// All rows newest first; `only_active` additionally filters to
    /// `ativo = true` for the public listing.
    async fn list_products(&self, only_active: bool) -> Result<Vec<Produto>, StoreError>;

    async fn insert_product(&self, novo: &NewProduto) -> Result<Produto, StoreError>;

    /// Applies the given column map to one row. A patch that matches
    /// no row is reported as [`StoreError::NotFound`].
    async fn update_product(
        &self,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<Produto, StoreError>;

    /// Hard delete. Deleting an id that no longer exists is not an
    /// error; the row is gone either way.
    async fn delete_product(&self, id: &str) -> Result<(), StoreError>;

    /// Upserts the raw bytes under `path` in the image bucket and
    /// returns the public URL. Bytes are forwarded unchanged.
    async fn upload_image(
        &self,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StoreError>;

    async fn fetch_settings(&self) -> Result<AppSettings, StoreError>;

    async fn update_settings(&self, fields: Map<String, Value>)
        -> Result<AppSettings, StoreError>;
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
    pub api: ApiConfig,
    pub request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self::with_config(store, ApiConfig::default())
    }

    #[must_use]
    pub fn with_config(store: Arc<dyn CatalogStore>, api: ApiConfig) -> Self {
        Self {
            store,
            api,
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(http::handlers::health_handler))
        .route(
            "/products",
            get(http::handlers::list_products_handler).post(http::handlers::create_product_handler),
        )
        .route(
            "/products/:id",
            patch(http::handlers::patch_product_handler)
                .delete(http::handlers::delete_product_handler),
        )
        .route("/products/:id/ativo", patch(http::handlers::set_ativo_handler))
        .route("/products/:id/image", post(http::handlers::upload_image_handler))
        .route("/admin/products", get(http::handlers::admin_products_handler))
        .route(
            "/settings",
            get(http::handlers::settings_handler).patch(http::handlers::patch_settings_handler),
        )
        .layer(from_fn(middleware::cors::cors_middleware))
        .layer(from_fn_with_state(
            state.clone(),
            middleware::request_tracing::request_tracing_middleware,
        ))
        .layer(DefaultBodyLimit::max(state.api.max_body_bytes))
        .with_state(state)
}
