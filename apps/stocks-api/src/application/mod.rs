//! Application Layer - Use cases and port definitions.
//!
//! The request pipeline lives here and talks to the outside world only
//! through the ports, so adapters can be swapped (or faked in tests)
//! without touching it.

/// Representation formats a client can request.
pub mod format;

/// Port interfaces for the fetcher, parser and renderer.
pub mod ports;

/// The snapshot request pipeline.
pub mod use_cases;
