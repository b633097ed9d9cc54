use serde::Serialize;
use utoipa::ToSchema;

use vector_store::SampleDocument;

/// Response body for `GET /collection-info`.
#[derive(Debug, Serialize, ToSchema)]
pub struct CollectionInfoResponse {
    pub collection_name: String,
    pub document_count: u64,
    /// Bounded sample of stored records.
    #[schema(value_type = Vec<Object>)]
    pub sample_documents: Vec<SampleDocument>,
    /// RFC3339 timestamp of when the stats were read.
    pub timestamp: String,
}
