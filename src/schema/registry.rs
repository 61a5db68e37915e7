//! Filterable columns per entity kind. Static and read-only, shared freely across requests.

use super::types::{Comparator, EntityKind, FilterMode, ValueKind};

/// Schema description of one filterable column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ValueKind,
    /// Whether `search_text` filtering may target this column.
    pub searchable: bool,
}

impl ColumnSpec {
    const fn new(name: &'static str, kind: ValueKind, searchable: bool) -> Self {
        ColumnSpec { name, kind, searchable }
    }
}

const ACCOUNT_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new("id", ValueKind::Identifier, false),
    ColumnSpec::new("name", ValueKind::Text, true),
    ColumnSpec::new("email", ValueKind::Text, true),
    ColumnSpec::new("creation_date", ValueKind::Timestamp, false),
];

const LISTING_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new("id", ValueKind::Identifier, false),
    ColumnSpec::new("title", ValueKind::Text, true),
    ColumnSpec::new("description", ValueKind::Text, true),
    ColumnSpec::new("creation_date", ValueKind::Timestamp, false),
    ColumnSpec::new("user_id", ValueKind::ForeignIdentifier, false),
];

impl EntityKind {
    /// Columns in declaration order.
    pub fn columns(self) -> &'static [ColumnSpec] {
        match self {
            EntityKind::Account => ACCOUNT_COLUMNS,
            EntityKind::Listing => LISTING_COLUMNS,
        }
    }

    pub fn column(self, name: &str) -> Option<&'static ColumnSpec> {
        self.columns().iter().find(|c| c.name == name)
    }

    pub fn column_names(self) -> Vec<&'static str> {
        self.columns().iter().map(|c| c.name).collect()
    }

    pub fn searchable_column_names(self) -> Vec<&'static str> {
        self.columns().iter().filter(|c| c.searchable).map(|c| c.name).collect()
    }
}

/// Lookup surface over both entity kinds, used for validation and for rendering valid-value lists.
pub struct SchemaRegistry;

impl SchemaRegistry {
    pub fn entity_kind_names() -> Vec<&'static str> {
        EntityKind::ALL.iter().map(|k| k.as_str()).collect()
    }

    pub fn filter_mode_names() -> Vec<&'static str> {
        FilterMode::ALL.iter().map(|m| m.as_str()).collect()
    }

    pub fn comparator_names() -> Vec<&'static str> {
        Comparator::ALL.iter().map(|c| c.as_str()).collect()
    }

    /// Union of all column names: account columns first, then listing columns not already listed.
    pub fn union_column_names() -> Vec<&'static str> {
        let mut names: Vec<&'static str> = Vec::new();
        for kind in EntityKind::ALL {
            for c in kind.columns() {
                if !names.contains(&c.name) {
                    names.push(c.name);
                }
            }
        }
        names
    }

    /// First column with this name across all entity kinds. Shared names have the same kind everywhere.
    pub fn any_column(name: &str) -> Option<&'static ColumnSpec> {
        EntityKind::ALL.iter().find_map(|k| k.column(name))
    }
}

/// Render names as `['a', 'b']` for user-facing messages.
pub fn render_list<S: AsRef<str>>(items: &[S]) -> String {
    let quoted: Vec<String> = items.iter().map(|s| format!("'{}'", s.as_ref())).collect();
    format!("[{}]", quoted.join(", "))
}
