//! Listboard: accounts and listings backend built around a validated filtering and pagination engine.

pub mod error;
pub mod filter;
pub mod handlers;
pub mod migration;
pub mod record;
pub mod response;
pub mod routes;
pub mod schema;
pub mod service;
pub mod settings;
pub mod sql;
pub mod state;
pub mod store;

pub use error::{AppError, ConfigError};
pub use filter::{FilterRequest, FilterValidator, Predicate, ValidatedFilter, ValidationReport};
pub use migration::{ensure_database_exists, ensure_tables};
pub use record::{Account, Listing, Projection, Record};
pub use routes::{app, common_routes, filter_routes};
pub use schema::{ColumnSpec, Comparator, EntityKind, FilterMode, Param, SchemaRegistry, ValueKind};
pub use service::{FilterOutput, FilterService, Page, Pagination};
pub use settings::Settings;
pub use state::AppState;
pub use store::{MemoryStore, PgStore, RecordStore};
