//! Filter handler: query string in, list or page out.

use crate::error::AppError;
use crate::filter::FilterRequest;
use crate::service::{FilterService, Pagination};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use std::collections::HashMap;

fn is_truthy(raw: &str) -> bool {
    matches!(raw.to_ascii_lowercase().as_str(), "true" | "1" | "yes" | "on")
}

/// `paginate`, `page` and `per_page` from the query string; `None` when paging was not asked for.
pub fn pagination_from_params(params: &HashMap<String, String>) -> Option<Pagination> {
    let paginate = params.get("paginate").is_some_and(|v| is_truthy(v));
    paginate.then(|| {
        Pagination::from_raw(
            params.get("page").map(String::as_str),
            params.get("per_page").map(String::as_str),
        )
    })
}

pub async fn filter(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let request = FilterRequest::from_params(&params);
    let pagination = pagination_from_params(&params);
    let store = state.store();
    let out = FilterService::filter(&store, &request, pagination).await?;
    Ok(out.into_response())
}
