use serde::Serialize;
use utoipa::ToSchema;

/// Response body for `POST /upsert-text`.
#[derive(Debug, Serialize, ToSchema)]
pub struct UpsertTextResponse {
    /// Always `success` for a 2xx response.
    pub status: String,
    /// Number of documents written (one per request).
    pub documents_upserted: usize,
    /// Identifiers actually stored.
    pub ids: Vec<String>,
    /// Wall-clock time for the whole operation in milliseconds.
    pub processing_time_ms: u64,
}
