//! Store-agnostic predicate built from a validated filter.

use super::request::{FilterValue, ValidatedFilter};
use crate::schema::{ColumnSpec, Comparator, EntityKind, FilterMode, ValueKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Compare(Comparator),
    /// Case-insensitive substring match.
    Contains,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Predicate {
    pub entity_kind: EntityKind,
    pub column: &'static ColumnSpec,
    pub operation: Operation,
    pub value: FilterValue,
}

impl Predicate {
    pub fn build(filter: &ValidatedFilter) -> Self {
        let operation = match (filter.filter_mode(), filter.comparator()) {
            (FilterMode::SearchText, _) => Operation::Contains,
            (FilterMode::ColumnValue, Some(cmp)) => Operation::Compare(cmp),
            (FilterMode::ColumnValue, None) => unreachable!("validated column_value filter without comparator"),
        };
        let value = match operation {
            Operation::Contains => FilterValue::Text(filter.column_value().to_string()),
            Operation::Compare(_) => filter.column_value().clone(),
        };
        Predicate {
            entity_kind: filter.entity_kind(),
            column: filter.column(),
            operation,
            value,
        }
    }

    /// Whether the comparison is made on the date part of a timestamp column.
    pub fn compares_dates(&self) -> bool {
        self.column.kind == ValueKind::Timestamp && matches!(self.operation, Operation::Compare(_))
    }
}

impl From<&ValidatedFilter> for Predicate {
    fn from(filter: &ValidatedFilter) -> Self {
        Predicate::build(filter)
    }
}
