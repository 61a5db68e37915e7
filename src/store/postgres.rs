//! PostgreSQL-backed store over a shared pool.

use super::RecordStore;
use crate::error::AppError;
use crate::filter::Predicate;
use crate::record::{Account, Listing, Record};
use crate::schema::EntityKind;
use crate::sql::{count_filtered, select_filtered, to_arguments, Window};
use async_trait::async_trait;
use sqlx::PgPool;

/// Request-scoped handle: borrows the pool and the schema the entity tables live in.
pub struct PgStore<'a> {
    pool: &'a PgPool,
    schema: &'a str,
}

impl<'a> PgStore<'a> {
    pub fn new(pool: &'a PgPool, schema: &'a str) -> Self {
        PgStore { pool, schema }
    }
}

#[async_trait]
impl RecordStore for PgStore<'_> {
    async fn count(&self, predicate: &Predicate) -> Result<u64, AppError> {
        let q = count_filtered(predicate, self.schema);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let n: i64 = sqlx::query_scalar_with(&q.sql, to_arguments(&q.params)?)
            .fetch_one(self.pool)
            .await?;
        Ok(u64::try_from(n).unwrap_or(0))
    }

    async fn fetch(&self, predicate: &Predicate, window: Option<Window>) -> Result<Vec<Record>, AppError> {
        let q = select_filtered(predicate, window, self.schema);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let args = to_arguments(&q.params)?;
        let rows = match predicate.entity_kind {
            EntityKind::Account => sqlx::query_as_with::<_, Account, _>(&q.sql, args)
                .fetch_all(self.pool)
                .await?
                .into_iter()
                .map(Record::from)
                .collect(),
            EntityKind::Listing => sqlx::query_as_with::<_, Listing, _>(&q.sql, args)
                .fetch_all(self.pool)
                .await?
                .into_iter()
                .map(Record::from)
                .collect(),
        };
        Ok(rows)
    }
}
