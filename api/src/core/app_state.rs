use std::sync::Arc;

use embedding_service::EmbeddingsProvider;
use vector_store::VectorStore;

use crate::core::config::GatewayConfig;

/// Shared state for all HTTP handlers.
///
/// The client handles are trait objects so tests can inject fakes
/// without a real network dependency.
#[derive(Clone)]
pub struct AppState {
    /// Read-only gateway configuration.
    pub config: GatewayConfig,
    /// Embedding provider handle, reused across requests.
    pub embedder: Arc<dyn EmbeddingsProvider>,
    /// Vector store handle, reused across requests.
    pub store: Arc<dyn VectorStore>,
}

impl AppState {
    pub fn new(
        config: GatewayConfig,
        embedder: Arc<dyn EmbeddingsProvider>,
        store: Arc<dyn VectorStore>,
    ) -> Self {
        Self {
            config,
            embedder,
            store,
        }
    }
}
