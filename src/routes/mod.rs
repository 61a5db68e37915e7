//! Route assembly.

mod common;
mod filter;

pub use common::common_routes;
pub use filter::filter_routes;

use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Every route, with request tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(filter_routes(state))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}
