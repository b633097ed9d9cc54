use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use embedding_service::EmbedError;
use vector_store::StoreError;

use crate::core::config::ConfigError;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Config(#[from] ConfigError),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request handling ---
    #[error("bad request: {0}")]
    Validation(String),

    /// Missing or invalid bearer token. Deliberately carries no detail
    /// about which check failed.
    #[error("missing or invalid bearer token")]
    Unauthorized,

    /// Embedding provider call failed.
    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbedError),

    /// Vector store call failed.
    #[error("vector store failed: {0}")]
    Store(#[from] StoreError),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            // startup-only
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Bind(_) | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,

            // 4xx
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,

            // upstream dependencies
            AppError::Embedding(_) | AppError::Store(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::Validation(_) => "BAD_REQUEST",
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::Embedding(_) => "EMBEDDING_FAILED",
            AppError::Store(_) => "STORE_FAILED",
        }
    }
}

/// Error body sent to clients: a status marker, a stable code and a
/// human-readable message. Internal detail stays in the logs.
#[derive(Serialize)]
struct ErrorBody<'a> {
    status: &'a str,
    error: &'a str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            status: "error",
            error: self.error_code(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;
