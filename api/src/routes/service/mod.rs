pub mod health_route;
pub mod root_route;
