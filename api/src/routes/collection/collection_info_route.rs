use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::Utc;
use tracing::debug;

use crate::core::app_state::AppState;
use crate::error_handler::AppResult;
use crate::routes::collection::collection_info_response::CollectionInfoResponse;

/// Number of sample records returned alongside the count.
const SAMPLE_LIMIT: usize = 5;

/// Returns aggregate collection statistics with a bounded sample.
#[utoipa::path(
    get,
    path = "/collection-info",
    tag = "collection",
    responses(
        (status = 200, description = "Collection statistics", body = CollectionInfoResponse),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 502, description = "Vector store failed"),
    ),
    security(("bearer_token" = []))
)]
pub async fn collection_info(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<CollectionInfoResponse>> {
    let stats = state.store.describe(SAMPLE_LIMIT).await?;
    debug!(
        collection = %stats.collection_name,
        count = stats.document_count,
        "collection described"
    );

    Ok(Json(CollectionInfoResponse {
        collection_name: stats.collection_name,
        document_count: stats.document_count,
        sample_documents: stats.sample_documents,
        timestamp: Utc::now().to_rfc3339(),
    }))
}
