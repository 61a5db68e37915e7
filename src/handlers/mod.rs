//! HTTP handlers for entity filtering.

pub mod filter;
pub use filter::*;
