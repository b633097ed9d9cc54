//! Thin adapter around the Chroma REST API to isolate remote calls.
//!
//! This facade concentrates all Chroma interactions behind a minimal
//! API, keeping the rest of the application decoupled from the wire
//! format. The authenticated client and the resolved collection id are
//! built once at startup and reused for every request.

use std::{
    future::Future,
    pin::Pin,
    time::{Duration, Instant},
};

use reqwest::header;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::VectorStore;
use crate::config::StoreConfig;
use crate::errors::{StoreError, make_snippet};
use crate::record::{CollectionStats, SampleDocument, StoreRecord};

/// A facade over the Chroma HTTP API.
///
/// Encapsulates the underlying client, the API base URL, and the
/// target collection (name + resolved id).
pub struct ChromaStore {
    client: reqwest::Client,
    base: String,
    collection: String,
    collection_id: String,
}

impl ChromaStore {
    /// Connects to the remote store and resolves the collection id.
    ///
    /// The collection is fetched by name and created when missing,
    /// matching upsert-only usage: a fresh deployment starts with an
    /// empty collection instead of failing.
    ///
    /// # Errors
    /// - [`StoreError::Config`] for invalid configuration
    /// - [`StoreError::Transport`] for client/network failures
    /// - [`StoreError::Status`] when the remote rejects the request
    pub async fn connect(cfg: &StoreConfig) -> Result<Self, StoreError> {
        cfg.validate()?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", cfg.bearer_token))
                .map_err(|e| StoreError::Config(format!("invalid bearer token header: {e}")))?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(30));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let base = format!("{}/api/v1", cfg.url.trim_end_matches('/'));
        let collection_id = resolve_collection(&client, &base, &cfg.collection).await?;

        info!(
            collection = %cfg.collection,
            collection_id = %collection_id,
            endpoint = %cfg.url,
            timeout_secs = timeout.as_secs(),
            "ChromaStore connected"
        );

        Ok(Self {
            client,
            base,
            collection: cfg.collection.clone(),
            collection_id,
        })
    }
}

impl VectorStore for ChromaStore {
    fn collection_name(&self) -> &str {
        &self.collection
    }

    fn upsert<'a>(
        &'a self,
        record: &'a StoreRecord,
    ) -> Pin<Box<dyn Future<Output = Result<(), StoreError>> + Send + 'a>> {
        Box::pin(async move {
            let started = Instant::now();
            let url = format!("{}/collections/{}/upsert", self.base, self.collection_id);

            let body = UpsertPayload {
                ids: vec![record.id.as_str()],
                embeddings: vec![record.embedding.as_slice()],
                documents: vec![record.document.as_str()],
                metadatas: vec![&record.metadata],
            };

            let resp = self.client.post(&url).json(&body).send().await?;
            ok_or_status(resp).await?;

            debug!(
                id = %record.id,
                collection = %self.collection,
                latency_ms = started.elapsed().as_millis(),
                "upserted one document"
            );

            Ok(())
        })
    }

    fn describe<'a>(
        &'a self,
        sample_limit: usize,
    ) -> Pin<Box<dyn Future<Output = Result<CollectionStats, StoreError>> + Send + 'a>>
    {
        Box::pin(async move {
            let count_url = format!("{}/collections/{}/count", self.base, self.collection_id);
            let resp = ok_or_status(self.client.get(&count_url).send().await?).await?;
            let document_count: u64 = resp
                .json()
                .await
                .map_err(|e| StoreError::Decode(format!("count response: {e}")))?;

            let get_url = format!("{}/collections/{}/get", self.base, self.collection_id);
            let body = GetPayload {
                limit: sample_limit,
                include: &["documents", "metadatas"],
            };
            let resp = ok_or_status(self.client.post(&get_url).json(&body).send().await?).await?;
            let page: GetResponse = resp
                .json()
                .await
                .map_err(|e| StoreError::Decode(format!("get response: {e}")))?;

            let mut documents = page.documents.into_iter();
            let mut metadatas = page.metadatas.into_iter();
            let sample_documents = page
                .ids
                .into_iter()
                .map(|id| SampleDocument {
                    id,
                    document: documents.next().flatten(),
                    metadata: metadatas.next().flatten(),
                })
                .collect();

            Ok(CollectionStats {
                collection_name: self.collection.clone(),
                document_count,
                sample_documents,
            })
        })
    }
}

/// Fetches the collection by name, creating it when missing.
async fn resolve_collection(
    client: &reqwest::Client,
    base: &str,
    name: &str,
) -> Result<String, StoreError> {
    let url = format!("{base}/collections/{name}");
    let resp = client.get(&url).send().await?;
    if resp.status().is_success() {
        let handle: CollectionHandle = resp
            .json()
            .await
            .map_err(|e| StoreError::Decode(format!("collection response: {e}")))?;
        debug!(collection = %name, id = %handle.id, "collection already exists");
        return Ok(handle.id);
    }

    warn!(
        collection = %name,
        status = %resp.status(),
        "collection not found, will be created"
    );

    let url = format!("{base}/collections");
    let body = CreateCollectionRequest {
        name,
        get_or_create: true,
    };
    let resp = ok_or_status(client.post(&url).json(&body).send().await?).await?;
    let handle: CollectionHandle = resp
        .json()
        .await
        .map_err(|e| StoreError::Decode(format!("create collection response: {e}")))?;

    info!(collection = %name, id = %handle.id, "collection created");
    Ok(handle.id)
}

/// Passes successful responses through; maps everything else to
/// [`StoreError::Status`] with a trimmed body snippet.
async fn ok_or_status(resp: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status();
    let url = resp.url().to_string();
    let text = resp.text().await.unwrap_or_default();
    Err(StoreError::Status {
        status,
        url,
        snippet: make_snippet(&text),
    })
}

/* ===========================================================================
HTTP payloads
======================================================================== */

#[derive(Debug, Deserialize)]
struct CollectionHandle {
    id: String,
}

#[derive(Debug, Serialize)]
struct CreateCollectionRequest<'a> {
    name: &'a str,
    get_or_create: bool,
}

/// Batch upsert body; this service always sends batches of one.
#[derive(Debug, Serialize)]
struct UpsertPayload<'a> {
    ids: Vec<&'a str>,
    embeddings: Vec<&'a [f32]>,
    documents: Vec<&'a str>,
    metadatas: Vec<&'a Map<String, Value>>,
}

#[derive(Debug, Serialize)]
struct GetPayload<'a> {
    limit: usize,
    include: &'a [&'a str],
}

#[derive(Debug, Deserialize)]
struct GetResponse {
    ids: Vec<String>,
    #[serde(default)]
    documents: Vec<Option<String>>,
    #[serde(default)]
    metadatas: Vec<Option<Value>>,
}
