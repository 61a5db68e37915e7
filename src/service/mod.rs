//! FilterService: validated filtering and pagination over a record store.

mod executor;
pub use executor::{FilterOutput, FilterService, Page, Pagination, DEFAULT_PAGE, DEFAULT_PER_PAGE};
