pub mod auth;
pub mod json_extractor;
