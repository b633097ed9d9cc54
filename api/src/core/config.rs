//! Environment-driven gateway configuration.
//!
//! Loaded once at process start and injected into the HTTP layer and
//! clients; nothing reads the environment after startup.

use std::env;

use thiserror::Error;

use embedding_service::EmbedConfig;
use vector_store::StoreConfig;

/// Error enum for environment/config-driven setup.
///
/// Keep this focused: only errors that realistically happen at config
/// load time.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is missing or empty.
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A number failed to parse (like ports, limits, timeouts).
    #[error("invalid number in {var}: {reason}")]
    InvalidNumber {
        var: &'static str,
        reason: &'static str,
    },

    /// A boolean flag had an unrecognized value.
    #[error("invalid boolean in {0}: expected true/false/1/0/yes/no")]
    InvalidBool(&'static str),
}

/// Full gateway configuration, loaded once at startup.
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    /// Socket address the HTTP server binds to.
    pub bind_addr: String,
    /// OpenAI API key.
    pub openai_api_key: String,
    /// Embedding model identifier.
    pub embedding_model: String,
    /// OpenAI API base URL.
    pub openai_api_base: String,
    /// Optional embedding request timeout in seconds.
    pub embedding_timeout_secs: Option<u64>,
    /// Chroma endpoint URL.
    pub chroma_url: String,
    /// Chroma bearer token.
    pub chroma_bearer_token: String,
    /// Target collection name.
    pub chroma_collection: String,
    /// Optional store request timeout in seconds.
    pub store_timeout_secs: Option<u64>,
    /// Static bearer token protecting the API.
    pub api_bearer_token: String,
    /// Whether the docs routes require the bearer token (default true).
    pub docs_require_auth: bool,
}

impl GatewayConfig {
    /// Loads the configuration from the process environment.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] when a required variable is absent or
    /// a numeric/boolean variable cannot be parsed. Callers treat this
    /// as fatal: the server must not start with an incomplete config.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            bind_addr: env_or("API_ADDRESS", "0.0.0.0:8088"),
            openai_api_key: must_env("OPENAI_API_KEY")?,
            embedding_model: env_or("OPENAI_EMBEDDING_MODEL", "text-embedding-ada-002"),
            openai_api_base: env_or("OPENAI_API_BASE", "https://api.openai.com"),
            embedding_timeout_secs: env_opt_u64("EMBEDDING_TIMEOUT_SECS")?,
            chroma_url: must_env("CHROMA_REMOTE_URL")?,
            chroma_bearer_token: must_env("CHROMA_BEARER_TOKEN")?,
            chroma_collection: must_env("CHROMA_COLLECTION_NAME")?,
            store_timeout_secs: env_opt_u64("STORE_TIMEOUT_SECS")?,
            api_bearer_token: must_env("API_BEARER_TOKEN")?,
            docs_require_auth: env_bool("DOCS_REQUIRE_AUTH", true)?,
        })
    }

    /// Embedding client slice of the configuration.
    pub fn embed_config(&self) -> EmbedConfig {
        EmbedConfig {
            api_key: self.openai_api_key.clone(),
            model: self.embedding_model.clone(),
            endpoint: self.openai_api_base.clone(),
            timeout_secs: self.embedding_timeout_secs,
        }
    }

    /// Vector store slice of the configuration.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            url: self.chroma_url.clone(),
            bearer_token: self.chroma_bearer_token.clone(),
            collection: self.chroma_collection.clone(),
            timeout_secs: self.store_timeout_secs,
        }
    }
}

/// Fetches a required, non-empty environment variable.
fn must_env(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingVar(name)),
    }
}

/// Fetches an environment variable, falling back to a default.
fn env_or(name: &str, default: &str) -> String {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}

/// Parses an optional `u64` from env (`Ok(None)` if unset/empty).
fn env_opt_u64(name: &'static str) -> Result<Option<u64>, ConfigError> {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => {
            v.parse::<u64>()
                .map(Some)
                .map_err(|_| ConfigError::InvalidNumber {
                    var: name,
                    reason: "expected u64",
                })
        }
        _ => Ok(None),
    }
}

/// Parses a boolean flag from env, falling back to a default.
fn env_bool(name: &'static str, default: bool) -> Result<bool, ConfigError> {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => {
            parse_bool(&v).ok_or(ConfigError::InvalidBool(name))
        }
        _ => Ok(default),
    }
}

/// Recognizes the usual spellings of a boolean flag.
fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
