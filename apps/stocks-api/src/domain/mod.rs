//! Domain Layer - Quote snapshot types.
//!
//! Pure data types for a market snapshot. Nothing here performs I/O;
//! snapshots are built by the feed parser and consumed by renderers.

/// Stock quote snapshot types (stocks, stock, price).
pub mod quotes;
