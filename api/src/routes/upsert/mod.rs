pub mod upsert_request;
pub mod upsert_response;
pub mod upsert_text_route;
