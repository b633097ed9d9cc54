//! Maps axum's built-in extractor rejections onto the error contract.
//!
//! Malformed JSON bodies and wrong content types produce plain-text
//! 400/415/422 responses from axum's `Json` extractor. This middleware
//! rewraps those into the same `{status, error, message}` body the rest
//! of the API emits. Responses that are already JSON pass through
//! untouched.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::Response,
};
use serde_json::json;

async fn take_body(res: Response) -> (axum::http::response::Parts, Bytes) {
    let (parts, body) = res.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();
    (parts, bytes)
}

pub async fn json_error_mapper(req: Request, next: Next) -> Response {
    let res = next.run(req).await;
    let status = res.status();

    let code = match status {
        StatusCode::BAD_REQUEST => "BAD_REQUEST",
        StatusCode::UNPROCESSABLE_ENTITY => "UNPROCESSABLE_ENTITY",
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "UNSUPPORTED_MEDIA_TYPE",
        _ => return res,
    };

    // Already on the JSON contract (e.g. produced by AppError).
    let is_json = res
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.as_bytes().starts_with(b"application/json"))
        .unwrap_or(false);
    if is_json {
        return res;
    }

    let (mut parts, bytes) = take_body(res).await;
    let original = String::from_utf8_lossy(&bytes);

    let envelope = json!({
        "status": "error",
        "error": code,
        "message": original.trim(),
    });
    let body = serde_json::to_vec(&envelope).unwrap_or_else(|_| bytes.to_vec());

    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    // Stale length from the original body would corrupt the response.
    parts.headers.remove(header::CONTENT_LENGTH);

    Response::from_parts(parts, Body::from(body))
}
