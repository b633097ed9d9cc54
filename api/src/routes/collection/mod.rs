pub mod collection_info_response;
pub mod collection_info_route;
