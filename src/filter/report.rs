//! Accumulated validation problems for one filter request.

use crate::schema::Param;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Every problem found in one validation pass. Never returned empty: a clean pass yields a
/// `ValidatedFilter` instead.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Error)]
#[error("invalid filter parameters ({} missing, {} invalid)", .missing_params.len(), .invalid_params.len())]
pub struct ValidationReport {
    /// Raw parameters as received, echoed back to the caller.
    pub params_passed: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_params: Vec<Param>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub invalid_params: BTreeMap<Param, String>,
}

impl ValidationReport {
    pub fn new(params_passed: BTreeMap<String, String>) -> Self {
        ValidationReport {
            params_passed,
            missing_params: Vec::new(),
            invalid_params: BTreeMap::new(),
        }
    }

    /// Append a missing field. Order-preserving; a field is listed once.
    pub fn add_missing(&mut self, param: Param) {
        if !self.missing_params.contains(&param) {
            self.missing_params.push(param);
        }
    }

    /// Record why a field is invalid. A later call for the same field supersedes the earlier one.
    pub fn add_invalid(&mut self, param: Param, explanation: impl Into<String>) {
        self.invalid_params.insert(param, explanation.into());
    }

    pub fn is_empty(&self) -> bool {
        self.missing_params.is_empty() && self.invalid_params.is_empty()
    }

    pub fn is_missing(&self, param: Param) -> bool {
        self.missing_params.contains(&param)
    }

    pub fn invalid(&self, param: Param) -> Option<&str> {
        self.invalid_params.get(&param).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passed() -> BTreeMap<String, String> {
        BTreeMap::from([("column".to_string(), "INVALID".to_string())])
    }

    #[test]
    fn missing_is_append_only_and_deduplicated() {
        let mut r = ValidationReport::new(BTreeMap::new());
        r.add_missing(Param::Column);
        r.add_missing(Param::EntityKind);
        r.add_missing(Param::Column);
        assert_eq!(r.missing_params, vec![Param::Column, Param::EntityKind]);
    }

    #[test]
    fn later_invalid_entry_supersedes() {
        let mut r = ValidationReport::new(passed());
        r.add_invalid(Param::Column, "generic");
        r.add_invalid(Param::Column, "specific");
        assert_eq!(r.invalid(Param::Column), Some("specific"));
        assert_eq!(r.invalid_params.len(), 1);
    }

    #[test]
    fn serializes_only_non_empty_sections() {
        let mut r = ValidationReport::new(passed());
        r.add_invalid(Param::Column, "bad");
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(
            v,
            serde_json::json!({
                "params_passed": {"column": "INVALID"},
                "invalid_params": {"column": "bad"}
            })
        );

        let mut r = ValidationReport::new(BTreeMap::new());
        r.add_missing(Param::ColumnValue);
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(
            v,
            serde_json::json!({"params_passed": {}, "missing_params": ["column_value"]})
        );
    }

    #[test]
    fn display_counts_problems() {
        let mut r = ValidationReport::new(BTreeMap::new());
        r.add_missing(Param::Comparator);
        assert!(!r.is_empty());
        assert_eq!(r.to_string(), "invalid filter parameters (1 missing, 0 invalid)");
    }
}
