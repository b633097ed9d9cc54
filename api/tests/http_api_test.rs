use std::{
    future::Future,
    pin::Pin,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use api::core::app_state::AppState;
use api::core::config::GatewayConfig;
use api::create_app;
use embedding_service::{EmbedError, EmbeddingsProvider};
use vector_store::{CollectionStats, SampleDocument, StoreError, StoreRecord, VectorStore};

const TOKEN: &str = "test-token";

struct FakeEmbedder {
    calls: AtomicUsize,
    fail: bool,
}

impl FakeEmbedder {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }
}

impl EmbeddingsProvider for FakeEmbedder {
    fn embed<'a>(
        &'a self,
        _text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, EmbedError>> + Send + 'a>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let fail = self.fail;
        Box::pin(async move {
            if fail {
                Err(EmbedError::Decode("provider returned no embedding".into()))
            } else {
                Ok(vec![0.1, 0.2, 0.3])
            }
        })
    }
}

struct FakeStore {
    upserts: AtomicUsize,
    fail: bool,
    records: Mutex<Vec<StoreRecord>>,
}

impl FakeStore {
    fn new() -> Self {
        Self {
            upserts: AtomicUsize::new(0),
            fail: false,
            records: Mutex::new(Vec::new()),
        }
    }
}

impl VectorStore for FakeStore {
    fn collection_name(&self) -> &str {
        "test-collection"
    }

    fn upsert<'a>(
        &'a self,
        record: &'a StoreRecord,
    ) -> Pin<Box<dyn Future<Output = Result<(), StoreError>> + Send + 'a>> {
        self.upserts.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            if self.fail {
                return Err(StoreError::Decode("store unavailable".into()));
            }
            let mut records = self.records.lock().unwrap();
            if let Some(existing) = records.iter_mut().find(|r| r.id == record.id) {
                *existing = record.clone();
            } else {
                records.push(record.clone());
            }
            Ok(())
        })
    }

    fn describe<'a>(
        &'a self,
        sample_limit: usize,
    ) -> Pin<Box<dyn Future<Output = Result<CollectionStats, StoreError>> + Send + 'a>> {
        Box::pin(async move {
            let records = self.records.lock().unwrap();
            Ok(CollectionStats {
                collection_name: self.collection_name().to_string(),
                document_count: records.len() as u64,
                sample_documents: records
                    .iter()
                    .take(sample_limit)
                    .map(|r| SampleDocument {
                        id: r.id.clone(),
                        document: Some(r.document.clone()),
                        metadata: Some(Value::Object(r.metadata.clone())),
                    })
                    .collect(),
            })
        })
    }
}

fn test_config(docs_require_auth: bool) -> GatewayConfig {
    GatewayConfig {
        bind_addr: "127.0.0.1:0".into(),
        openai_api_key: "sk-test".into(),
        embedding_model: "text-embedding-ada-002".into(),
        openai_api_base: "https://api.openai.com".into(),
        embedding_timeout_secs: None,
        chroma_url: "http://localhost:8000".into(),
        chroma_bearer_token: "chroma-token".into(),
        chroma_collection: "test-collection".into(),
        store_timeout_secs: None,
        api_bearer_token: TOKEN.into(),
        docs_require_auth,
    }
}

struct TestApp {
    app: axum::Router,
    embedder: Arc<FakeEmbedder>,
    store: Arc<FakeStore>,
}

fn build_app(embedder: FakeEmbedder, store: FakeStore, docs_require_auth: bool) -> TestApp {
    let embedder = Arc::new(embedder);
    let store = Arc::new(store);
    let state = Arc::new(AppState::new(
        test_config(docs_require_auth),
        embedder.clone(),
        store.clone(),
    ));
    TestApp {
        app: create_app(state),
        embedder,
        store,
    }
}

fn default_app() -> TestApp {
    build_app(FakeEmbedder::new(), FakeStore::new(), true)
}

fn post_json(uri: &str, body: &Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .uri(uri)
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri).method("GET");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn health_is_public_and_touches_no_clients() {
    let test = default_app();

    let response = test.app.oneshot(get("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = read_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["timestamp"].is_string());
    assert_eq!(json["services"]["embedding_provider"], "configured");
    assert_eq!(json["services"]["vector_store"], "configured");

    assert_eq!(test.embedder.calls.load(Ordering::SeqCst), 0);
    assert_eq!(test.store.upserts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn root_lists_endpoints() {
    let test = default_app();

    let response = test.app.oneshot(get("/", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = read_json(response).await;
    assert_eq!(json["name"], "embed-gateway");
    assert_eq!(json["endpoints"]["upsert_text"], "POST /upsert-text");
    assert_eq!(json["endpoints"]["health"], "GET /health");
}

#[tokio::test]
async fn upsert_without_token_is_rejected_before_any_work() {
    let test = default_app();

    let body = json!({"text": "hello"});
    let response = test
        .app
        .oneshot(post_json("/upsert-text", &body, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = read_json(response).await;
    assert_eq!(json["status"], "error");
    assert_eq!(json["error"], "UNAUTHORIZED");

    assert_eq!(test.embedder.calls.load(Ordering::SeqCst), 0);
    assert_eq!(test.store.upserts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn upsert_with_wrong_token_is_rejected() {
    let test = default_app();

    let body = json!({"text": "hello"});
    let response = test
        .app
        .oneshot(post_json("/upsert-text", &body, Some("not-the-token")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(test.embedder.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn upsert_happy_path_embeds_once_and_stores_once() {
    let test = default_app();

    let body = json!({
        "text": "the quick brown fox",
        "id": "doc-1",
        "metadata": {"source": "unit"}
    });
    let response = test
        .app
        .oneshot(post_json("/upsert-text", &body, Some(TOKEN)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = read_json(response).await;
    assert_eq!(json["status"], "success");
    assert_eq!(json["documents_upserted"], 1);
    assert_eq!(json["ids"], json!(["doc-1"]));
    assert!(json["processing_time_ms"].is_number());

    assert_eq!(test.embedder.calls.load(Ordering::SeqCst), 1);
    assert_eq!(test.store.upserts.load(Ordering::SeqCst), 1);

    let records = test.store.records.lock().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "doc-1");
    assert_eq!(records[0].document, "the quick brown fox");
    assert_eq!(records[0].metadata["source"], "unit");
}

#[tokio::test]
async fn upsert_generates_distinct_ids_when_none_given() {
    let test = default_app();

    let body = json!({"text": "first"});
    let first = test
        .app
        .clone()
        .oneshot(post_json("/upsert-text", &body, Some(TOKEN)))
        .await
        .unwrap();
    let body = json!({"text": "second"});
    let second = test
        .app
        .oneshot(post_json("/upsert-text", &body, Some(TOKEN)))
        .await
        .unwrap();

    let first = read_json(first).await;
    let second = read_json(second).await;
    let id_a = first["ids"][0].as_str().unwrap();
    let id_b = second["ids"][0].as_str().unwrap();
    assert!(!id_a.is_empty());
    assert_ne!(id_a, id_b);
}

#[tokio::test]
async fn upsert_flattens_list_metadata_and_records_conversions() {
    let test = default_app();

    let body = json!({
        "text": "tagged document",
        "id": "doc-tags",
        "metadata": {"tags": ["a", "b"], "nested": {"k": 1}}
    });
    let response = test
        .app
        .oneshot(post_json("/upsert-text", &body, Some(TOKEN)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let records = test.store.records.lock().unwrap();
    assert_eq!(records[0].metadata["tags"], "a, b");
    assert_eq!(records[0].metadata["nested"], "{\"k\":1}");
    let summary = records[0].metadata["_metadata_conversions"].as_str().unwrap();
    assert!(summary.contains("tags"));
    assert!(summary.contains("nested"));
}

#[tokio::test]
async fn upsert_same_id_twice_replaces_the_record() {
    let test = default_app();

    let body = json!({"text": "version one", "id": "doc-x"});
    let response = test
        .app
        .clone()
        .oneshot(post_json("/upsert-text", &body, Some(TOKEN)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json!({"text": "version two", "id": "doc-x"});
    let response = test
        .app
        .oneshot(post_json("/upsert-text", &body, Some(TOKEN)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let records = test.store.records.lock().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].document, "version two");
}

#[tokio::test]
async fn upsert_empty_text_is_rejected_without_side_effects() {
    let test = default_app();

    let body = json!({"text": "   "});
    let response = test
        .app
        .oneshot(post_json("/upsert-text", &body, Some(TOKEN)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = read_json(response).await;
    assert_eq!(json["status"], "error");
    assert_eq!(json["error"], "BAD_REQUEST");

    assert_eq!(test.embedder.calls.load(Ordering::SeqCst), 0);
    assert_eq!(test.store.upserts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn malformed_json_body_yields_json_error_contract() {
    let test = default_app();

    let request = Request::builder()
        .uri("/upsert-text")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"))
        .body(Body::from("{not json"))
        .unwrap();
    let response = test.app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = read_json(response).await;
    assert_eq!(json["status"], "error");
    assert!(json["message"].is_string());
}

#[tokio::test]
async fn collection_info_reports_count_and_samples() {
    let test = default_app();

    let body = json!({"text": "stored once", "id": "doc-1"});
    let response = test
        .app
        .clone()
        .oneshot(post_json("/upsert-text", &body, Some(TOKEN)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = test
        .app
        .oneshot(get("/collection-info", Some(TOKEN)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = read_json(response).await;
    assert_eq!(json["collection_name"], "test-collection");
    assert_eq!(json["document_count"], 1);
    assert_eq!(json["sample_documents"][0]["id"], "doc-1");
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn collection_info_requires_token() {
    let test = default_app();

    let response = test
        .app
        .oneshot(get("/collection-info", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn embedding_failure_maps_to_bad_gateway_and_skips_store() {
    let test = build_app(FakeEmbedder::failing(), FakeStore::new(), true);

    let body = json!({"text": "hello"});
    let response = test
        .app
        .oneshot(post_json("/upsert-text", &body, Some(TOKEN)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let json = read_json(response).await;
    assert_eq!(json["status"], "error");
    assert_eq!(json["error"], "EMBEDDING_FAILED");

    assert_eq!(test.embedder.calls.load(Ordering::SeqCst), 1);
    assert_eq!(test.store.upserts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn store_failure_maps_to_bad_gateway() {
    let store = FakeStore {
        upserts: AtomicUsize::new(0),
        fail: true,
        records: Mutex::new(Vec::new()),
    };
    let test = build_app(FakeEmbedder::new(), store, true);

    let body = json!({"text": "hello"});
    let response = test
        .app
        .oneshot(post_json("/upsert-text", &body, Some(TOKEN)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let json = read_json(response).await;
    assert_eq!(json["error"], "STORE_FAILED");
}

#[tokio::test]
async fn openapi_document_is_guarded_when_docs_auth_enabled() {
    let test = default_app();

    let response = test
        .app
        .clone()
        .oneshot(get("/api-docs/openapi.json", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = test
        .app
        .oneshot(get("/api-docs/openapi.json", Some(TOKEN)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = read_json(response).await;
    assert!(json["paths"]["/upsert-text"]["post"].is_object());
}

#[tokio::test]
async fn openapi_document_is_public_when_docs_auth_disabled() {
    let test = build_app(FakeEmbedder::new(), FakeStore::new(), false);

    let response = test
        .app
        .oneshot(get("/api-docs/openapi.json", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
