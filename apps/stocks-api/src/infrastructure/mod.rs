//! Infrastructure Layer - Adapters and external integrations.
//!
//! This layer contains the concrete implementations of the port interfaces
//! defined in the application layer, plus the service's ambient plumbing.

/// Environment-driven configuration.
pub mod config;

/// Axum HTTP adapter (snapshot route, health, metrics).
pub mod http;

/// Prometheus metrics instrumentation.
pub mod metrics;

/// Upstream feed parsers.
pub mod parser;

/// XML and JSON renderers.
pub mod render;

/// Tracing subscriber and OpenTelemetry integration.
pub mod telemetry;

/// Upstream feed fetchers.
pub mod upstream;
