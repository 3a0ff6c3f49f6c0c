//! Quote snapshot model.
//!
//! A [`Stocks`] snapshot is created fresh for every request, owned by the
//! request pipeline and dropped once rendered.

mod price;
mod snapshot;
mod stock;

pub use price::Price;
pub use snapshot::Stocks;
pub use stock::Stock;
