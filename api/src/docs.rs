//! OpenAPI document served under `/api-docs/openapi.json`.

use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::routes::collection::collection_info_response::CollectionInfoResponse;
use crate::routes::upsert::upsert_request::UpsertTextRequest;
use crate::routes::upsert::upsert_response::UpsertTextResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::upsert::upsert_text_route::upsert_text,
        crate::routes::collection::collection_info_route::collection_info,
        crate::routes::service::health_route::health,
        crate::routes::service::root_route::root,
    ),
    components(schemas(UpsertTextRequest, UpsertTextResponse, CollectionInfoResponse)),
    modifiers(&BearerToken),
    tags(
        (name = "documents", description = "Text ingestion endpoints"),
        (name = "collection", description = "Collection statistics"),
        (name = "service", description = "Service metadata and liveness"),
    )
)]
pub struct ApiDoc;

/// Registers the static bearer-token scheme referenced by the
/// protected paths.
pub struct BearerToken;

impl Modify for BearerToken {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(
                    HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build(),
                ),
            );
        }
    }
}
