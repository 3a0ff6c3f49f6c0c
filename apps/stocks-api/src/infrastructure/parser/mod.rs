//! Feed parser adapters.

mod pse;

pub use pse::{AS_OF_ALIAS, PseFeedParser};
