//! Unified error handling for the embedding client.

use reqwest::StatusCode;
use thiserror::Error;

/// Top-level error for embedding operations.
#[derive(Debug, Error)]
pub enum EmbedError {
    /// Invalid provider configuration (startup).
    #[error("config error: {0}")]
    Config(String),

    /// Underlying HTTP transport error.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Provider returned a non-successful HTTP status.
    #[error("embedding provider returned HTTP {status} from {url}: {snippet}")]
    Status {
        status: StatusCode,
        url: String,
        snippet: String,
    },

    /// Response payload could not be decoded as expected.
    #[error("decode error: {0}")]
    Decode(String),
}

/// Trims a response body down to a short, log-safe snippet.
pub fn make_snippet(text: &str) -> String {
    const MAX_LEN: usize = 240;
    let trimmed = text.trim();
    if trimmed.len() <= MAX_LEN {
        return trimmed.to_string();
    }
    let mut cut = MAX_LEN;
    while !trimmed.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &trimmed[..cut])
}
