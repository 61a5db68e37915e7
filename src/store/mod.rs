//! Read access to entity rows: the query capability the filter engine runs against.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::error::AppError;
use crate::filter::Predicate;
use crate::record::Record;
use crate::sql::Window;
use async_trait::async_trait;

/// A backing store that can count and fetch rows matching a predicate.
/// Rows come back ordered by id ascending.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn count(&self, predicate: &Predicate) -> Result<u64, AppError>;

    async fn fetch(&self, predicate: &Predicate, window: Option<Window>) -> Result<Vec<Record>, AppError>;
}
