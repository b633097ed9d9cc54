pub mod collection;
pub mod service;
pub mod upsert;
