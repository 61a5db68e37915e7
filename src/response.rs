//! JSON success envelopes for filter results: `{"data": [...], "meta": {...}}`.

use crate::record::Projection;
use crate::service::{FilterOutput, Page};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Serialize)]
pub struct SuccessMany<T> {
    pub data: Vec<T>,
    pub meta: MetaCount,
}

#[derive(Serialize)]
pub struct MetaCount {
    pub count: u64,
}

/// Page metadata; `count` is the number of items on this page.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct MetaPage {
    pub count: u64,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
}

pub fn success_many<T: Serialize>(data: Vec<T>) -> (StatusCode, Json<SuccessMany<T>>) {
    let count = data.len() as u64;
    (
        StatusCode::OK,
        Json(SuccessMany {
            data,
            meta: MetaCount { count },
        }),
    )
}

#[derive(Serialize)]
pub struct SuccessPage {
    pub data: Vec<Projection>,
    pub meta: MetaPage,
}

pub fn success_page(page: Page) -> (StatusCode, Json<SuccessPage>) {
    let meta = MetaPage {
        count: page.items.len() as u64,
        page: page.page,
        per_page: page.per_page,
        total: page.total,
        total_pages: page.total_pages,
    };
    (StatusCode::OK, Json(SuccessPage { data: page.items, meta }))
}

impl IntoResponse for FilterOutput {
    fn into_response(self) -> Response {
        match self {
            FilterOutput::List(items) => success_many(items).into_response(),
            FilterOutput::Page(page) => success_page(page).into_response(),
        }
    }
}
