//! Filter parameter validation. Every check runs; all problems land in one report.

use super::report::ValidationReport;
use super::request::{FilterRequest, FilterValue, ValidatedFilter};
use crate::schema::{
    render_list, ColumnSpec, Comparator, EntityKind, FilterMode, Param, SchemaRegistry, ValueKind,
};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

pub struct FilterValidator;

impl FilterValidator {
    /// Check presence, then membership of each present field, then cross-field compatibility
    /// using only the fields that survived the first two passes.
    pub fn validate(request: &FilterRequest) -> Result<ValidatedFilter, ValidationReport> {
        let mut report = ValidationReport::new(request.params_passed());

        let filter_mode_raw = request.get(Param::FilterMode);
        let comparator_exempt = filter_mode_raw.and_then(FilterMode::parse) == Some(FilterMode::SearchText);
        for param in Param::ALL {
            if request.get(param).is_none() && !(param == Param::Comparator && comparator_exempt) {
                report.add_missing(param);
            }
        }

        let entity_kind = check_member(
            &mut report,
            Param::EntityKind,
            request.get(Param::EntityKind),
            EntityKind::parse,
            &SchemaRegistry::entity_kind_names(),
        );
        let filter_mode = check_member(
            &mut report,
            Param::FilterMode,
            filter_mode_raw,
            FilterMode::parse,
            &SchemaRegistry::filter_mode_names(),
        );
        let column = resolve_column(&mut report, request.get(Param::Column), entity_kind);
        let comparator = match filter_mode {
            Some(FilterMode::SearchText) => None,
            _ => check_member(
                &mut report,
                Param::Comparator,
                request.get(Param::Comparator),
                Comparator::parse,
                &SchemaRegistry::comparator_names(),
            ),
        };

        if let (Some(kind), Some(FilterMode::SearchText), Some(raw)) =
            (entity_kind, filter_mode, request.get(Param::Column))
        {
            if !kind.column(raw).is_some_and(|c| c.searchable) {
                report.add_invalid(Param::Column, search_columns_message(kind));
            }
        }

        let column_value = match (filter_mode, column, request.get(Param::ColumnValue)) {
            (Some(FilterMode::ColumnValue), Some(spec), Some(raw)) => {
                let typed = typed_value(spec, raw);
                if typed.is_none() {
                    report.add_invalid(Param::ColumnValue, value_format_message(spec));
                }
                typed
            }
            (Some(FilterMode::SearchText), Some(_), Some(raw)) => Some(FilterValue::Text(raw.to_string())),
            _ => None,
        };

        if let (Some(FilterMode::ColumnValue), Some(spec), Some(cmp)) = (filter_mode, column, comparator) {
            if spec.kind == ValueKind::Text && cmp.is_ordering() {
                report.add_invalid(Param::Comparator, text_comparator_message(spec));
            }
        }

        if !report.is_empty() {
            tracing::debug!(
                missing = report.missing_params.len(),
                invalid = report.invalid_params.len(),
                "filter request rejected"
            );
            return Err(report);
        }

        match (entity_kind, filter_mode, column, column_value) {
            (Some(entity_kind), Some(filter_mode), Some(column), Some(column_value)) => {
                let comparator = match filter_mode {
                    FilterMode::ColumnValue => comparator,
                    FilterMode::SearchText => None,
                };
                Ok(ValidatedFilter {
                    entity_kind,
                    filter_mode,
                    column,
                    column_value,
                    comparator,
                })
            }
            _ => unreachable!("a clean report implies every field resolved"),
        }
    }
}

/// Parse a present field against its enumeration; record the valid values when it does not match.
fn check_member<T>(
    report: &mut ValidationReport,
    param: Param,
    raw: Option<&str>,
    parse: fn(&str) -> Option<T>,
    valid: &[&str],
) -> Option<T> {
    let raw = raw?;
    let parsed = parse(raw);
    if parsed.is_none() {
        report.add_invalid(param, valid_values_message(valid));
    }
    parsed
}

/// Per-entity lookup when the entity kind is known, otherwise the union of both entities.
fn resolve_column(
    report: &mut ValidationReport,
    raw: Option<&str>,
    entity_kind: Option<EntityKind>,
) -> Option<&'static ColumnSpec> {
    let raw = raw?;
    match entity_kind {
        Some(kind) => {
            let spec = kind.column(raw);
            if spec.is_none() {
                report.add_invalid(
                    Param::Column,
                    format!(
                        "For entity kind \"{}\" valid values for \"{}\" are: {}.",
                        kind,
                        Param::Column,
                        render_list(&kind.column_names())
                    ),
                );
            }
            spec
        }
        None => {
            let spec = SchemaRegistry::any_column(raw);
            if spec.is_none() {
                report.add_invalid(
                    Param::Column,
                    valid_values_message(&SchemaRegistry::union_column_names()),
                );
            }
            spec
        }
    }
}

fn typed_value(spec: &ColumnSpec, raw: &str) -> Option<FilterValue> {
    match spec.kind {
        ValueKind::Identifier | ValueKind::ForeignIdentifier => {
            if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            raw.parse().ok().map(FilterValue::Int)
        }
        ValueKind::Timestamp => {
            if !is_date_shaped(raw) {
                return None;
            }
            NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().map(FilterValue::Date)
        }
        ValueKind::Text => Some(FilterValue::Text(raw.to_string())),
    }
}

/// `YYYY-MM-DD` and nothing else; chrono alone would accept unpadded fields.
fn is_date_shaped(raw: &str) -> bool {
    static SHAPE: OnceLock<Option<Regex>> = OnceLock::new();
    SHAPE
        .get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(raw))
}

fn valid_values_message(valid: &[&str]) -> String {
    format!("Valid values are: {}", render_list(valid))
}

fn value_format_message(spec: &ColumnSpec) -> String {
    let requirement = if spec.kind.is_integer() {
        "must be a digit.".to_string()
    } else {
        "must be a date string of the following format: \"YYYY-MM-DD\".".to_string()
    };
    format!(
        "When \"{}\" is \"{}\", \"{}\" {}",
        Param::Column,
        spec.name,
        Param::ColumnValue,
        requirement
    )
}

fn text_comparator_message(spec: &ColumnSpec) -> String {
    let equality: Vec<&str> = Comparator::EQUALITY.iter().map(|c| c.as_str()).collect();
    format!(
        "When \"{}\" is \"{}\" and \"{}\" is \"{}\", valid values for \"{}\" are: {}.",
        Param::FilterMode,
        FilterMode::ColumnValue.as_str(),
        Param::Column,
        spec.name,
        Param::Comparator,
        render_list(&equality)
    )
}

fn search_columns_message(kind: EntityKind) -> String {
    format!(
        "For entity kind \"{}\" text search is available in the following columns: {}.",
        kind,
        render_list(&kind.searchable_column_names())
    )
}
