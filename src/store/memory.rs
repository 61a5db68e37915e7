//! In-process store holding records in a vector. Evaluates predicates directly.

use super::RecordStore;
use crate::error::AppError;
use crate::filter::{FilterValue, Operation, Predicate};
use crate::record::{Field, Record};
use crate::sql::Window;
use async_trait::async_trait;

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    records: Vec<Record>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: impl Into<Record>) {
        self.records.push(record.into());
    }

    pub fn with(mut self, record: impl Into<Record>) -> Self {
        self.insert(record);
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn matching(&self, predicate: &Predicate) -> Vec<&Record> {
        let mut out: Vec<&Record> = self
            .records
            .iter()
            .filter(|r| r.kind() == predicate.entity_kind && matches(r, predicate))
            .collect();
        out.sort_by_key(|r| r.id());
        out
    }
}

fn matches(record: &Record, predicate: &Predicate) -> bool {
    let Some(field) = record.field(predicate.column.name) else {
        return false;
    };
    match (predicate.operation, field, &predicate.value) {
        (Operation::Contains, Field::Text(s), FilterValue::Text(needle)) => {
            s.to_lowercase().contains(&needle.to_lowercase())
        }
        (Operation::Compare(cmp), Field::Int(n), FilterValue::Int(v)) => cmp.holds(&n, v),
        (Operation::Compare(cmp), Field::Text(s), FilterValue::Text(v)) => cmp.holds(s, v.as_str()),
        (Operation::Compare(cmp), Field::Timestamp(ts), FilterValue::Date(day)) => cmp.holds(&ts.date(), day),
        // operand type does not fit the column
        _ => false,
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn count(&self, predicate: &Predicate) -> Result<u64, AppError> {
        Ok(self.matching(predicate).len() as u64)
    }

    async fn fetch(&self, predicate: &Predicate, window: Option<Window>) -> Result<Vec<Record>, AppError> {
        let rows = self.matching(predicate).into_iter().cloned();
        Ok(match window {
            Some(w) => rows
                .skip(usize::try_from(w.offset).unwrap_or(usize::MAX))
                .take(usize::try_from(w.limit).unwrap_or(usize::MAX))
                .collect(),
            None => rows.collect(),
        })
    }
}
