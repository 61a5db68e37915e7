//! Filter route over both entity kinds.

use crate::handlers::filter;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn filter_routes(state: AppState) -> Router {
    Router::new()
        .route("/filter", get(filter))
        .with_state(state)
}
