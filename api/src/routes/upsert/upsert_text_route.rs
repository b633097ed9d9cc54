use std::{sync::Arc, time::Instant};

use axum::{Json, extract::State};
use tracing::{debug, info};
use uuid::Uuid;

use vector_store::{StoreRecord, normalize_metadata};

use crate::core::app_state::AppState;
use crate::error_handler::{AppError, AppResult};
use crate::routes::upsert::upsert_request::UpsertTextRequest;
use crate::routes::upsert::upsert_response::UpsertTextResponse;

/// Embeds one text and upserts it into the collection.
///
/// The embedding and storage calls run sequentially: the upsert
/// consumes the embedding output, so there is nothing to overlap.
/// Either failure aborts the request with an error response.
#[utoipa::path(
    post,
    path = "/upsert-text",
    tag = "documents",
    request_body = UpsertTextRequest,
    responses(
        (status = 200, description = "Document embedded and stored", body = UpsertTextResponse),
        (status = 400, description = "Text is missing or empty"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 502, description = "Embedding provider or vector store failed"),
    ),
    security(("bearer_token" = []))
)]
pub async fn upsert_text(
    State(state): State<Arc<AppState>>,
    Json(body): Json<UpsertTextRequest>,
) -> AppResult<Json<UpsertTextResponse>> {
    let started = Instant::now();

    if body.text.trim().is_empty() {
        return Err(AppError::Validation("text content cannot be empty".into()));
    }

    let id = body
        .id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let metadata = body.metadata.unwrap_or_default();
    let normalized = normalize_metadata(&metadata);
    if !normalized.conversions.is_empty() {
        debug!(
            converted = normalized.conversions.len(),
            "metadata keys coerced to scalar types"
        );
    }

    let embedding = state.embedder.embed(&body.text).await?;

    let record = StoreRecord {
        id: id.clone(),
        embedding,
        document: body.text,
        metadata: normalized.into_fields(),
    };
    state.store.upsert(&record).await?;

    let processing_time_ms = started.elapsed().as_millis() as u64;
    info!(
        id = %id,
        collection = %state.store.collection_name(),
        latency_ms = processing_time_ms,
        "upserted document"
    );

    Ok(Json(UpsertTextResponse {
        status: "success".into(),
        documents_upserted: 1,
        ids: vec![id],
        processing_time_ms,
    }))
}
