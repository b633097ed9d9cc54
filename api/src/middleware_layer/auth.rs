//! Static bearer-token authentication guard.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::core::app_state::AppState;
use crate::error_handler::AppError;

/// Rejects requests whose `Authorization: Bearer <token>` header does
/// not match the configured API token.
///
/// The 401 response is identical for a missing, malformed or mismatched
/// header, so callers learn nothing about which check failed.
pub async fn require_bearer(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let provided = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    match provided {
        Some(token) if token == state.config.api_bearer_token => next.run(req).await,
        _ => {
            debug!(path = %req.uri().path(), "rejected request without valid bearer token");
            AppError::Unauthorized.into_response()
        }
    }
}
