//! HTTP layer for the embedding gateway.
//!
//! Wires the embedding client and the vector store behind the public
//! routes, applies the bearer-token guard to the protected ones, and
//! serves generated API documentation.

use std::sync::Arc;

pub mod core;
pub mod docs;
pub mod error_handler;
pub mod middleware_layer;
pub mod routes;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tokio::signal;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use embedding_service::OpenAiEmbedder;
use vector_store::ChromaStore;

use crate::core::app_state::AppState;
use crate::core::config::GatewayConfig;
use crate::docs::ApiDoc;
use crate::error_handler::AppError;
use crate::middleware_layer::auth::require_bearer;
use crate::middleware_layer::json_extractor::json_error_mapper;
use crate::routes::collection::collection_info_route::collection_info;
use crate::routes::service::health_route::health;
use crate::routes::service::root_route::root;
use crate::routes::upsert::upsert_text_route::upsert_text;

/// Builds the full router for the given shared state.
///
/// Exposed separately from [`start`] so integration tests can drive the
/// router with fake clients instead of live network dependencies.
pub fn create_app(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route("/upsert-text", post(upsert_text))
        .route("/collection-info", get(collection_info))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_bearer,
        ));

    // Swagger UI plus the OpenAPI document it reads. The guard is
    // applied only when DOCS_REQUIRE_AUTH is set (default true).
    let mut docs: Router<Arc<AppState>> =
        Router::new().merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    if state.config.docs_require_auth {
        docs = docs.route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_bearer,
        ));
    }

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(protected)
        .merge(docs)
        .layer(middleware::from_fn(json_error_mapper))
        .with_state(state)
}

/// Loads configuration, connects the external clients and serves the API.
///
/// Configuration errors are fatal: the listener is never bound when a
/// required variable is missing.
pub async fn start() -> Result<(), AppError> {
    let config = GatewayConfig::from_env()?;

    let embedder = OpenAiEmbedder::new(config.embed_config())?;
    let store = ChromaStore::connect(&config.store_config()).await?;

    let addr = config.bind_addr.clone();
    let state = Arc::new(AppState::new(config, Arc::new(embedder), Arc::new(store)));
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(AppError::Bind)?;
    info!("server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    Ok(())
}

/// Resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("failed to listen for shutdown signal");
}
