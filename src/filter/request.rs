//! Filter input as received (all raw strings) and as accepted by the validator (typed).

use crate::schema::{ColumnSpec, Comparator, EntityKind, FilterMode, Param};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Raw filter parameters. `None` means the key was absent; any string, even empty, is present.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterRequest {
    pub entity_kind: Option<String>,
    pub filter_mode: Option<String>,
    pub column: Option<String>,
    pub column_value: Option<String>,
    pub comparator: Option<String>,
}

impl FilterRequest {
    /// Pick the five filter fields out of a query-string map. Other keys are ignored.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let field = |p: Param| params.get(p.as_str()).cloned();
        FilterRequest {
            entity_kind: field(Param::EntityKind),
            filter_mode: field(Param::FilterMode),
            column: field(Param::Column),
            column_value: field(Param::ColumnValue),
            comparator: field(Param::Comparator),
        }
    }

    pub fn with(mut self, param: Param, value: impl Into<String>) -> Self {
        *self.slot(param) = Some(value.into());
        self
    }

    pub fn get(&self, param: Param) -> Option<&str> {
        match param {
            Param::EntityKind => self.entity_kind.as_deref(),
            Param::FilterMode => self.filter_mode.as_deref(),
            Param::Column => self.column.as_deref(),
            Param::ColumnValue => self.column_value.as_deref(),
            Param::Comparator => self.comparator.as_deref(),
        }
    }

    fn slot(&mut self, param: Param) -> &mut Option<String> {
        match param {
            Param::EntityKind => &mut self.entity_kind,
            Param::FilterMode => &mut self.filter_mode,
            Param::Column => &mut self.column,
            Param::ColumnValue => &mut self.column_value,
            Param::Comparator => &mut self.comparator,
        }
    }

    /// Present fields keyed by wire name.
    pub fn params_passed(&self) -> BTreeMap<String, String> {
        Param::ALL
            .into_iter()
            .filter_map(|p| self.get(p).map(|v| (p.as_str().to_string(), v.to_string())))
            .collect()
    }
}

/// A filter operand, typed by the column it targets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterValue {
    Int(i64),
    Text(String),
    /// Day granularity; compared against the date part of stored timestamps.
    Date(NaiveDate),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Int(n) => write!(f, "{}", n),
            FilterValue::Text(s) => f.write_str(s),
            FilterValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

/// Filter parameters that passed every check. Only the validator constructs these.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedFilter {
    pub(crate) entity_kind: EntityKind,
    pub(crate) filter_mode: FilterMode,
    pub(crate) column: &'static ColumnSpec,
    pub(crate) column_value: FilterValue,
    pub(crate) comparator: Option<Comparator>,
}

impl ValidatedFilter {
    pub fn entity_kind(&self) -> EntityKind {
        self.entity_kind
    }

    pub fn filter_mode(&self) -> FilterMode {
        self.filter_mode
    }

    pub fn column(&self) -> &'static ColumnSpec {
        self.column
    }

    pub fn column_value(&self) -> &FilterValue {
        &self.column_value
    }

    /// Always `Some` in `column_value` mode, always `None` in `search_text` mode.
    pub fn comparator(&self) -> Option<Comparator> {
        self.comparator
    }
}
