//! HTTP/REST API adapter.
//!
//! Inbound adapter serving the snapshot resource through the use case.

mod controller;
mod error;
mod freshness;
mod response;
mod server;

pub use controller::{AppState, create_router};
pub use error::ApiError;
pub use freshness::{format_http_date, parse_http_date};
pub use response::HealthResponse;
pub use server::{HttpServer, ServerError};
