//! Closed enumerations the filter parameters are validated against.

use serde::Serialize;
use std::fmt;

/// Name of one logical filter parameter as it appears in requests and reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Param {
    EntityKind,
    FilterMode,
    Column,
    ColumnValue,
    Comparator,
}

impl Param {
    /// Order in which presence is checked and missing names are reported.
    pub const ALL: [Param; 5] = [
        Param::EntityKind,
        Param::FilterMode,
        Param::Column,
        Param::ColumnValue,
        Param::Comparator,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Param::EntityKind => "entity_kind",
            Param::FilterMode => "filter_mode",
            Param::Column => "column",
            Param::ColumnValue => "column_value",
            Param::Comparator => "comparator",
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the two filterable collections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Account,
    Listing,
}

impl EntityKind {
    pub const ALL: [EntityKind; 2] = [EntityKind::Account, EntityKind::Listing];

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Account => "account",
            EntityKind::Listing => "listing",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == raw)
    }

    /// Backing table name.
    pub fn table_name(self) -> &'static str {
        match self {
            EntityKind::Account => "account",
            EntityKind::Listing => "listing",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a column stores; decides which values and comparators are legal for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Identifier,
    Text,
    Timestamp,
    ForeignIdentifier,
}

impl ValueKind {
    /// Identifier-like columns take integer values.
    pub fn is_integer(self) -> bool {
        matches!(self, ValueKind::Identifier | ValueKind::ForeignIdentifier)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Exact or relational match on a column.
    ColumnValue,
    /// Case-insensitive substring match on a text column.
    SearchText,
}

impl FilterMode {
    pub const ALL: [FilterMode; 2] = [FilterMode::ColumnValue, FilterMode::SearchText];

    pub fn as_str(self) -> &'static str {
        match self {
            FilterMode::ColumnValue => "column_value",
            FilterMode::SearchText => "search_text",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == raw)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Comparator {
    Equal,
    NotEqual,
    LessThan,
    GreaterThan,
    GreaterOrEqual,
    LessOrEqual,
}

impl Comparator {
    pub const ALL: [Comparator; 6] = [
        Comparator::Equal,
        Comparator::NotEqual,
        Comparator::LessThan,
        Comparator::GreaterThan,
        Comparator::GreaterOrEqual,
        Comparator::LessOrEqual,
    ];

    /// Comparators that text columns accept.
    pub const EQUALITY: [Comparator; 2] = [Comparator::Equal, Comparator::NotEqual];

    pub fn as_str(self) -> &'static str {
        match self {
            Comparator::Equal => "is",
            Comparator::NotEqual => "is_not",
            Comparator::LessThan => "<",
            Comparator::GreaterThan => ">",
            Comparator::GreaterOrEqual => ">=",
            Comparator::LessOrEqual => "<=",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == raw)
    }

    pub fn is_ordering(self) -> bool {
        !Self::EQUALITY.contains(&self)
    }

    pub fn sql_operator(self) -> &'static str {
        match self {
            Comparator::Equal => "=",
            Comparator::NotEqual => "<>",
            Comparator::LessThan => "<",
            Comparator::GreaterThan => ">",
            Comparator::GreaterOrEqual => ">=",
            Comparator::LessOrEqual => "<=",
        }
    }

    /// Evaluate `lhs <op> rhs`.
    pub fn holds<T: PartialOrd + ?Sized>(self, lhs: &T, rhs: &T) -> bool {
        match self {
            Comparator::Equal => lhs == rhs,
            Comparator::NotEqual => lhs != rhs,
            Comparator::LessThan => lhs < rhs,
            Comparator::GreaterThan => lhs > rhs,
            Comparator::GreaterOrEqual => lhs >= rhs,
            Comparator::LessOrEqual => lhs <= rhs,
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
