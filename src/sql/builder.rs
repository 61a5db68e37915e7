//! Builds parameterized SELECT and COUNT for a filter predicate.

use crate::filter::{FilterValue, Operation, Predicate};
use crate::schema::EntityKind;

/// Quote identifier for PostgreSQL (safe: only from the schema registry or settings).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(table))
}

/// Rows to skip and rows to return.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub offset: u64,
    pub limit: u64,
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<FilterValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: FilterValue) -> u32 {
        let n = self.params.len() as u32 + 1;
        self.params.push(v);
        n
    }
}

/// SELECT list: every registry column of the entity, in declaration order.
fn select_column_list(kind: EntityKind) -> String {
    kind.columns()
        .iter()
        .map(|c| quoted(c.name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Escape LIKE wildcards so the needle matches literally.
fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

/// WHERE condition for the predicate; binds its operand.
fn condition(q: &mut QueryBuf, predicate: &Predicate) -> String {
    let col = quoted(predicate.column.name);
    match predicate.operation {
        Operation::Contains => {
            let needle = match &predicate.value {
                FilterValue::Text(s) => escape_like(s),
                other => escape_like(&other.to_string()),
            };
            let n = q.push_param(FilterValue::Text(needle));
            format!("{} ILIKE '%' || ${} || '%'", col, n)
        }
        Operation::Compare(cmp) => {
            let n = q.push_param(predicate.value.clone());
            if predicate.compares_dates() {
                format!("CAST({} AS DATE) {} ${}", col, cmp.sql_operator(), n)
            } else {
                format!("{} {} ${}", col, cmp.sql_operator(), n)
            }
        }
    }
}

/// SELECT matching rows ORDER BY id, with optional LIMIT/OFFSET.
pub fn select_filtered(predicate: &Predicate, window: Option<Window>, schema: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let kind = predicate.entity_kind;
    let table = qualified_table(schema, kind.table_name());
    let where_clause = condition(&mut q, predicate);
    let window_clause = window
        .map(|w| {
            format!(
                " LIMIT {} OFFSET {}",
                w.limit.min(i64::MAX as u64),
                w.offset.min(i64::MAX as u64)
            )
        })
        .unwrap_or_default();
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} ORDER BY {}{}",
        select_column_list(kind),
        table,
        where_clause,
        quoted("id"),
        window_clause
    );
    q
}

/// COUNT(*) of matching rows, ignoring any window.
pub fn count_filtered(predicate: &Predicate, schema: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let table = qualified_table(schema, predicate.entity_kind.table_name());
    let where_clause = condition(&mut q, predicate);
    q.sql = format!("SELECT COUNT(*) FROM {} WHERE {}", table, where_clause);
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Comparator;
    use chrono::NaiveDate;

    fn predicate(kind: EntityKind, column: &str, operation: Operation, value: FilterValue) -> Predicate {
        Predicate {
            entity_kind: kind,
            column: kind.column(column).unwrap(),
            operation,
            value,
        }
    }

    #[test]
    fn select_with_comparison_and_window() {
        let p = predicate(
            EntityKind::Listing,
            "id",
            Operation::Compare(Comparator::GreaterOrEqual),
            FilterValue::Int(1000),
        );
        let q = select_filtered(&p, Some(Window { offset: 20, limit: 10 }), "public");
        assert_eq!(
            q.sql,
            "SELECT \"id\", \"title\", \"description\", \"creation_date\", \"user_id\" FROM \"public\".\"listing\" \
             WHERE \"id\" >= $1 ORDER BY \"id\" LIMIT 10 OFFSET 20"
        );
        assert_eq!(q.params, vec![FilterValue::Int(1000)]);
    }

    #[test]
    fn timestamp_comparison_casts_to_date() {
        let day = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap();
        let p = predicate(
            EntityKind::Account,
            "creation_date",
            Operation::Compare(Comparator::NotEqual),
            FilterValue::Date(day),
        );
        let q = count_filtered(&p, "app");
        assert_eq!(
            q.sql,
            "SELECT COUNT(*) FROM \"app\".\"account\" WHERE CAST(\"creation_date\" AS DATE) <> $1"
        );
        assert_eq!(q.params, vec![FilterValue::Date(day)]);
    }

    #[test]
    fn contains_uses_ilike_with_escaped_needle() {
        let p = predicate(
            EntityKind::Account,
            "email",
            Operation::Contains,
            FilterValue::Text("50%_off".into()),
        );
        let q = select_filtered(&p, None, "public");
        assert!(q.sql.ends_with("WHERE \"email\" ILIKE '%' || $1 || '%' ORDER BY \"id\""));
        assert_eq!(q.params, vec![FilterValue::Text("50\\%\\_off".into())]);
    }

    #[test]
    fn identifiers_are_quoted() {
        assert_eq!(quoted("we\"ird"), "\"we\"\"ird\"");
        assert_eq!(qualified_table("s", "t"), "\"s\".\"t\"");
    }
}
