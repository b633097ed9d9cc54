use serde::Deserialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Request body for `POST /upsert-text`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpsertTextRequest {
    /// Text to embed and store. Must be non-empty.
    pub text: String,
    /// Optional metadata; values are normalized to store-safe scalars.
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<Map<String, Value>>,
    /// Optional document id; a UUID is generated when absent.
    pub id: Option<String>,
}
