use axum::Json;
use chrono::Utc;
use serde_json::{Value, json};

/// Liveness probe. Reports the process as healthy without touching
/// the upstream services, so probes stay cheap and side-effect free.
#[utoipa::path(
    get,
    path = "/health",
    tag = "service",
    responses((status = 200, description = "Service is alive")),
)]
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
        "services": {
            "embedding_provider": "configured",
            "vector_store": "configured",
        },
    }))
}
