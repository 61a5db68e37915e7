//! Shared application state for all routes.

use crate::store::PgStore;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    /// Schema holding the entity tables.
    pub schema: Arc<str>,
}

impl AppState {
    pub fn new(pool: PgPool, schema: impl Into<Arc<str>>) -> Self {
        AppState {
            pool,
            schema: schema.into(),
        }
    }

    /// Store handle scoped to one request.
    pub fn store(&self) -> PgStore<'_> {
        PgStore::new(&self.pool, &self.schema)
    }
}
