//! Configuration Module
//!
//! Environment-driven configuration for the stocks service.

mod settings;

pub use settings::{ConfigError, FeedSettings, ServerSettings, ServiceConfig};
