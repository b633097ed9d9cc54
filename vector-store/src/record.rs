//! Record and statistics types exchanged with the store.

use serde::Serialize;
use serde_json::{Map, Value};

/// A single document prepared for upsert.
///
/// `metadata` is expected to be normalized already: values must be
/// scalars (string, integer, float, boolean, null).
#[derive(Clone, Debug)]
pub struct StoreRecord {
    /// Unique document id; upserting the same id replaces the record.
    pub id: String,
    /// Embedding vector produced by the provider.
    pub embedding: Vec<f32>,
    /// Original document text.
    pub document: String,
    /// Store-safe metadata fields.
    pub metadata: Map<String, Value>,
}

/// Aggregate collection statistics with a bounded sample.
#[derive(Clone, Debug, Serialize)]
pub struct CollectionStats {
    pub collection_name: String,
    pub document_count: u64,
    pub sample_documents: Vec<SampleDocument>,
}

/// One sampled record returned by a describe call.
#[derive(Clone, Debug, Serialize)]
pub struct SampleDocument {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}
