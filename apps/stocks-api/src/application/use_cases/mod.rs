//! Application Use Cases
//!
//! Use cases orchestrate the ports to fulfill a request.

mod get_stocks;

pub use get_stocks::{GetStocksUseCase, StocksError, StocksOutcome};
