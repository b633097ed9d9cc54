//! Chroma-backed vector storage.
//!
//! This crate concentrates all interaction with the remote vector
//! database behind a minimal surface: upsert one record by id, and
//! describe the collection (count plus a bounded sample). It also owns
//! metadata normalization, since the store only accepts scalar
//! metadata values.

pub mod chroma;
pub mod config;
pub mod errors;
pub mod normalize;
pub mod record;

pub use chroma::ChromaStore;
pub use config::StoreConfig;
pub use errors::StoreError;
pub use normalize::{MetadataConversion, NormalizedMetadata, normalize_metadata};
pub use record::{CollectionStats, SampleDocument, StoreRecord};

use std::{future::Future, pin::Pin};

/// Remote vector store interface.
///
/// Implement this trait to plug in another backend, or a fake in tests.
/// Async is required because real stores perform HTTP requests.
pub trait VectorStore: Send + Sync {
    /// Name of the target collection.
    fn collection_name(&self) -> &str;

    /// Inserts or replaces one record keyed by its id.
    fn upsert<'a>(
        &'a self,
        record: &'a StoreRecord,
    ) -> Pin<Box<dyn Future<Output = Result<(), StoreError>> + Send + 'a>>;

    /// Returns aggregate collection statistics with up to
    /// `sample_limit` sample records.
    fn describe<'a>(
        &'a self,
        sample_limit: usize,
    ) -> Pin<Box<dyn Future<Output = Result<CollectionStats, StoreError>> + Send + 'a>>;
}
