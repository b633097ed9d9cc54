use axum::Json;
use serde_json::{Value, json};

/// Service banner with the endpoint catalogue.
#[utoipa::path(
    get,
    path = "/",
    tag = "service",
    responses((status = 200, description = "Service description")),
)]
pub async fn root() -> Json<Value> {
    Json(json!({
        "name": "embed-gateway",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "upsert_text": "POST /upsert-text",
            "collection_info": "GET /collection-info",
            "health": "GET /health",
            "docs": "GET /docs",
        },
    }))
}
