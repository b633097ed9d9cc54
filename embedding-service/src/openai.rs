//! OpenAI embeddings client.
//!
//! Minimal, non-streaming client around the OpenAI REST API:
//! - POST {endpoint}/v1/embeddings — embeddings retrieval
//!
//! Constructor validation:
//! - `cfg.api_key` must be non-empty
//! - `cfg.endpoint` must start with http:// or https://
//! - `cfg.model` must be non-empty
//!
//! No retries or backoff beyond the client's own timeout: provider
//! failures propagate to the caller as [`EmbedError`].

use std::{
    future::Future,
    pin::Pin,
    time::{Duration, Instant},
};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::EmbeddingsProvider;
use crate::error_handler::{EmbedError, make_snippet};

/// Configuration for the OpenAI embeddings backend.
#[derive(Clone, Debug)]
pub struct EmbedConfig {
    /// API key used for bearer authentication.
    pub api_key: String,
    /// Embedding model identifier (e.g. `text-embedding-ada-002`).
    pub model: String,
    /// API base URL, e.g. `https://api.openai.com`.
    pub endpoint: String,
    /// Request timeout in seconds (60 when `None`).
    pub timeout_secs: Option<u64>,
}

/// Thin client for the OpenAI embeddings API.
///
/// Keeps a preconfigured `reqwest::Client` (timeout + bearer default
/// headers) and the resolved request URL for the process lifetime.
#[derive(Debug)]
pub struct OpenAiEmbedder {
    client: reqwest::Client,
    cfg: EmbedConfig,
    url_embeddings: String,
}

impl OpenAiEmbedder {
    /// Creates a new embedder from the given config.
    ///
    /// # Errors
    /// - [`EmbedError::Config`] if the API key, model or endpoint is invalid
    /// - [`EmbedError::Transport`] if the HTTP client cannot be built
    pub fn new(cfg: EmbedConfig) -> Result<Self, EmbedError> {
        if cfg.api_key.trim().is_empty() {
            return Err(EmbedError::Config("api key must not be empty".into()));
        }

        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(EmbedError::Config(format!(
                "invalid endpoint: {}",
                cfg.endpoint
            )));
        }

        if cfg.model.trim().is_empty() {
            return Err(EmbedError::Config("model must not be empty".into()));
        }

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(60));

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", cfg.api_key))
                .map_err(|e| EmbedError::Config(format!("invalid API key header: {e}")))?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let url_embeddings = format!("{}/v1/embeddings", endpoint.trim_end_matches('/'));

        info!(
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = timeout.as_secs(),
            "OpenAiEmbedder initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_embeddings,
        })
    }

    /// Retrieves a single embeddings vector via `/v1/embeddings`.
    ///
    /// # Errors
    /// - [`EmbedError::Status`] for non-2xx responses
    /// - [`EmbedError::Transport`] for client/network failures
    /// - [`EmbedError::Decode`] if the JSON cannot be parsed or `data` is empty
    pub async fn embed_text(&self, input: &str) -> Result<Vec<f32>, EmbedError> {
        let started = Instant::now();
        let body = EmbeddingsRequest {
            model: &self.cfg.model,
            input,
        };

        debug!(
            model = %self.cfg.model,
            input_len = input.len(),
            "POST {}", self.url_embeddings
        );

        let resp = self
            .client
            .post(&self.url_embeddings)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_embeddings.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %status,
                %url,
                %snippet,
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis(),
                "embeddings request returned non-success status"
            );

            return Err(EmbedError::Status {
                status,
                url,
                snippet,
            });
        }

        let out: EmbeddingsResponse = match resp.json().await {
            Ok(v) => v,
            Err(e) => {
                error!(
                    error = %e,
                    model = %self.cfg.model,
                    latency_ms = started.elapsed().as_millis(),
                    "failed to decode /v1/embeddings response"
                );
                return Err(EmbedError::Decode(format!(
                    "serde error: {e}; expected `data[0].embedding`"
                )));
            }
        };

        let first = out
            .data
            .into_iter()
            .next()
            .ok_or_else(|| EmbedError::Decode("empty `data` in embeddings response".into()))?;

        debug!(
            model = %self.cfg.model,
            dimension = first.embedding.len(),
            latency_ms = started.elapsed().as_millis(),
            "embeddings completed"
        );

        Ok(first.embedding)
    }
}

impl EmbeddingsProvider for OpenAiEmbedder {
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, EmbedError>> + Send + 'a>> {
        Box::pin(self.embed_text(text))
    }
}

/* ===========================================================================
HTTP payloads
======================================================================== */

/// Request body for `/v1/embeddings`.
#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a str,
}

/// Response body for `/v1/embeddings`.
#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingItem>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingItem {
    embedding: Vec<f32>,
}
