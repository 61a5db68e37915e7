//! Runs validated filters against a store and pages the results.

use crate::error::AppError;
use crate::filter::{FilterRequest, FilterValidator, Predicate};
use crate::record::{Projection, Record};
use crate::sql::Window;
use crate::store::RecordStore;
use serde::Serialize;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PER_PAGE: u64 = 10;

/// Requested page number and size, both at least 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub per_page: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl Pagination {
    /// Raw values that are absent or not a positive integer fall back to the defaults.
    pub fn from_raw(page: Option<&str>, per_page: Option<&str>) -> Self {
        Pagination {
            page: positive(page).unwrap_or(DEFAULT_PAGE),
            per_page: positive(per_page).unwrap_or(DEFAULT_PER_PAGE),
        }
    }

    pub fn offset(&self) -> u64 {
        (self.page.max(1) - 1).saturating_mul(self.per_page)
    }

    fn window(&self) -> Window {
        Window {
            offset: self.offset(),
            limit: self.per_page,
        }
    }
}

fn positive(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|s| s.parse::<u64>().ok()).filter(|n| *n > 0)
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Page {
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
    pub items: Vec<Projection>,
}

impl Page {
    pub fn new(pagination: Pagination, total: u64, items: Vec<Projection>) -> Self {
        Page {
            page: pagination.page,
            per_page: pagination.per_page,
            total,
            total_pages: total.div_ceil(pagination.per_page.max(1)),
            items,
        }
    }
}

/// Result of a filter call: every match, or one page of matches.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterOutput {
    List(Vec<Projection>),
    Page(Page),
}

pub struct FilterService;

impl FilterService {
    /// Validate, build the predicate, run it. `pagination: None` returns the full match list.
    pub async fn filter<S: RecordStore + ?Sized>(
        store: &S,
        request: &FilterRequest,
        pagination: Option<Pagination>,
    ) -> Result<FilterOutput, AppError> {
        let validated = FilterValidator::validate(request)?;
        let predicate = Predicate::build(&validated);
        tracing::debug!(
            entity_kind = %predicate.entity_kind,
            column = predicate.column.name,
            operation = ?predicate.operation,
            value = %predicate.value,
            paginate = pagination.is_some(),
            "filter"
        );
        match pagination {
            Some(p) => Ok(FilterOutput::Page(Self::page(store, &predicate, p).await?)),
            None => Ok(FilterOutput::List(Self::list(store, &predicate).await?)),
        }
    }

    pub async fn list<S: RecordStore + ?Sized>(
        store: &S,
        predicate: &Predicate,
    ) -> Result<Vec<Projection>, AppError> {
        let rows = store.fetch(predicate, None).await?;
        Ok(rows.iter().map(Record::project).collect())
    }

    /// An out-of-range page yields no items; totals still describe the whole match set.
    pub async fn page<S: RecordStore + ?Sized>(
        store: &S,
        predicate: &Predicate,
        pagination: Pagination,
    ) -> Result<Page, AppError> {
        let total = store.count(predicate).await?;
        let items = if pagination.offset() >= total {
            Vec::new()
        } else {
            store
                .fetch(predicate, Some(pagination.window()))
                .await?
                .iter()
                .map(Record::project)
                .collect()
        };
        Ok(Page::new(pagination, total, items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Account, Listing};
    use crate::schema::Param;
    use crate::store::MemoryStore;
    use chrono::{NaiveDate, NaiveDateTime};
    use serde_json::Value;

    fn test_date() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(1900, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    fn account(id: i64) -> Account {
        Account {
            id,
            name: format!("test_filter_{id}"),
            email: format!("test_filter_{id}@email.com"),
            creation_date: test_date(),
        }
    }

    fn listing(id: i64, user_id: i64) -> Listing {
        Listing {
            id,
            title: format!("test_filter_title_{id}"),
            description: format!("test_filter_description_{id}"),
            creation_date: test_date(),
            user_id,
        }
    }

    fn seeded() -> MemoryStore {
        MemoryStore::new()
            .with(account(1001))
            .with(account(1000))
            .with(listing(1001, 1000))
            .with(listing(1000, 1000))
            .with(listing(1003, 1001))
            .with(listing(1004, 1001))
    }

    fn request(fields: &[(Param, &str)]) -> FilterRequest {
        fields
            .iter()
            .fold(FilterRequest::default(), |req, (p, v)| req.with(*p, *v))
    }

    fn ids(items: &[Projection]) -> Vec<i64> {
        items.iter().map(|p| p["id"].as_i64().unwrap()).collect()
    }

    #[tokio::test]
    async fn listing_identifier_comparison_returns_ordered_matches() {
        let store = MemoryStore::new().with(listing(1001, 1)).with(listing(1000, 1));
        let req = request(&[
            (Param::EntityKind, "listing"),
            (Param::FilterMode, "column_value"),
            (Param::Column, "id"),
            (Param::Comparator, ">="),
            (Param::ColumnValue, "1000"),
        ]);
        match FilterService::filter(&store, &req, None).await.unwrap() {
            FilterOutput::List(items) => assert_eq!(ids(&items), vec![1000, 1001]),
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn search_returns_projection() {
        let req = request(&[
            (Param::EntityKind, "account"),
            (Param::FilterMode, "search_text"),
            (Param::Column, "name"),
            (Param::ColumnValue, "1000"),
            (Param::Comparator, "is"),
        ]);
        let out = FilterService::filter(&seeded(), &req, Some(Pagination::default())).await.unwrap();
        assert_eq!(
            serde_json::to_value(&out).unwrap(),
            serde_json::json!({
                "page": 1,
                "per_page": 10,
                "total": 1,
                "total_pages": 1,
                "items": [{
                    "id": 1000,
                    "name": "test_filter_1000",
                    "email": "test_filter_1000@email.com",
                    "creation_date": "1900-01-01T00:00:00"
                }]
            })
        );
    }

    #[tokio::test]
    async fn paginated_results_for_common_filters() {
        let cases: Vec<(&str, Vec<(Param, &str)>)> = vec![
            ("account", vec![(Param::FilterMode, "column_value"), (Param::Column, "id"), (Param::ColumnValue, "1000"), (Param::Comparator, ">=")]),
            ("listing", vec![(Param::FilterMode, "column_value"), (Param::Column, "id"), (Param::ColumnValue, "1000"), (Param::Comparator, ">=")]),
            ("account", vec![(Param::FilterMode, "search_text"), (Param::Column, "name"), (Param::ColumnValue, "st_f")]),
            ("listing", vec![(Param::FilterMode, "search_text"), (Param::Column, "description"), (Param::ColumnValue, "st_f")]),
            ("account", vec![(Param::FilterMode, "search_text"), (Param::Column, "email"), (Param::ColumnValue, "ST_F"), (Param::Comparator, "")]),
            ("listing", vec![(Param::FilterMode, "search_text"), (Param::Column, "title"), (Param::ColumnValue, "ilt"), (Param::Comparator, "")]),
            ("account", vec![(Param::FilterMode, "column_value"), (Param::Column, "creation_date"), (Param::ColumnValue, "1900-01-01"), (Param::Comparator, "<=")]),
            ("listing", vec![(Param::FilterMode, "column_value"), (Param::Column, "creation_date"), (Param::ColumnValue, "1900-01-01"), (Param::Comparator, "<=")]),
            ("listing", vec![(Param::FilterMode, "column_value"), (Param::Column, "user_id"), (Param::ColumnValue, "1000"), (Param::Comparator, ">=")]),
        ];
        let store = seeded();
        for (entity, fields) in cases {
            let req = request(&fields).with(Param::EntityKind, entity);
            let out = FilterService::filter(&store, &req, Some(Pagination::default())).await.unwrap();
            let FilterOutput::Page(page) = out else {
                panic!("expected page for {entity} {fields:?}");
            };
            assert_eq!((page.page, page.per_page, page.total_pages), (1, 10, 1));
            assert!(page
                .items
                .iter()
                .all(|i| i["creation_date"] == Value::from("1900-01-01T00:00:00")));
            if entity == "account" {
                assert_eq!(page.total, 2);
                assert_eq!(ids(&page.items), vec![1000, 1001]);
            } else {
                assert_eq!(page.total, 4);
                assert_eq!(ids(&page.items), vec![1000, 1001, 1003, 1004]);
            }
        }
    }

    #[tokio::test]
    async fn invalid_request_never_touches_results() {
        let req = request(&[
            (Param::EntityKind, "INVALID"),
            (Param::FilterMode, "INVALID"),
            (Param::Comparator, "INVALID"),
            (Param::Column, "INVALID"),
            (Param::ColumnValue, "INVALID"),
        ]);
        let err = FilterService::filter(&seeded(), &req, Some(Pagination::default()))
            .await
            .unwrap_err();
        let report = match err {
            AppError::InvalidFilter(report) => report,
            other => panic!("expected validation failure, got {other:?}"),
        };
        assert_eq!(report.invalid_params.len(), 4);
        assert_eq!(report.params_passed, req.params_passed());
    }

    #[tokio::test]
    async fn no_matches_is_an_empty_result() {
        let req = request(&[
            (Param::EntityKind, "account"),
            (Param::FilterMode, "column_value"),
            (Param::Column, "id"),
            (Param::ColumnValue, "5"),
            (Param::Comparator, "is"),
        ]);
        let store = seeded();
        assert_eq!(
            FilterService::filter(&store, &req, None).await.unwrap(),
            FilterOutput::List(Vec::new())
        );
        let FilterOutput::Page(page) = FilterService::filter(&store, &req, Some(Pagination::default()))
            .await
            .unwrap()
        else {
            panic!("expected page");
        };
        assert_eq!((page.total, page.total_pages), (0, 0));
        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn pages_slice_and_out_of_range_is_empty() {
        let mut store = MemoryStore::new();
        for id in 1..=7 {
            store.insert(account(id));
        }
        assert_eq!(store.len(), 7);
        let req = request(&[
            (Param::EntityKind, "account"),
            (Param::FilterMode, "column_value"),
            (Param::Column, "id"),
            (Param::ColumnValue, "0"),
            (Param::Comparator, ">"),
        ]);
        let validated = FilterValidator::validate(&req).unwrap();
        let predicate = Predicate::build(&validated);

        let page = FilterService::page(&store, &predicate, Pagination { page: 2, per_page: 3 })
            .await
            .unwrap();
        assert_eq!(ids(&page.items), vec![4, 5, 6]);
        assert_eq!((page.total, page.total_pages), (7, 3));

        let page = FilterService::page(&store, &predicate, Pagination { page: 3, per_page: 3 })
            .await
            .unwrap();
        assert_eq!(ids(&page.items), vec![7]);

        let page = FilterService::page(&store, &predicate, Pagination { page: 9, per_page: 3 })
            .await
            .unwrap();
        assert!(page.items.is_empty());
        assert_eq!((page.page, page.total, page.total_pages), (9, 7, 3));
    }

    #[tokio::test]
    async fn repeated_calls_are_identical() {
        let store = seeded();
        let req = request(&[
            (Param::EntityKind, "listing"),
            (Param::FilterMode, "search_text"),
            (Param::Column, "title"),
            (Param::ColumnValue, "TITLE_100"),
        ]);
        let first = FilterService::filter(&store, &req, Some(Pagination::from_raw(Some("1"), Some("2"))))
            .await
            .unwrap();
        let second = FilterService::filter(&store, &req, Some(Pagination::from_raw(Some("1"), Some("2"))))
            .await
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn raw_pagination_falls_back_to_defaults() {
        assert_eq!(Pagination::from_raw(None, None), Pagination::default());
        assert_eq!(
            Pagination::from_raw(Some("INVALID"), Some("INVALID")),
            Pagination { page: 1, per_page: 10 }
        );
        assert_eq!(
            Pagination::from_raw(Some("0"), Some("-3")),
            Pagination { page: 1, per_page: 10 }
        );
        assert_eq!(
            Pagination::from_raw(Some("5"), Some("100")),
            Pagination { page: 5, per_page: 100 }
        );
    }

    #[test]
    fn total_pages_is_ceiling_division() {
        for per_page in 1..=12u64 {
            for total in 0..=40u64 {
                let page = Page::new(Pagination { page: 1, per_page }, total, Vec::new());
                let expected = (total + per_page - 1) / per_page;
                assert_eq!(page.total_pages, expected, "total={total} per_page={per_page}");
                if total == 0 {
                    assert_eq!(page.total_pages, 0);
                }
            }
        }
    }

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(Pagination { page: 1, per_page: 10 }.offset(), 0);
        assert_eq!(Pagination { page: 4, per_page: 25 }.offset(), 75);
        assert_eq!(Pagination { page: u64::MAX, per_page: 10 }.offset(), u64::MAX);
    }
}
