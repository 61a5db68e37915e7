//! Filter parameter handling: raw request, validation report, validator, predicate.

pub mod predicate;
pub mod report;
pub mod request;
pub mod validator;

pub use predicate::{Operation, Predicate};
pub use report::ValidationReport;
pub use request::{FilterRequest, FilterValue, ValidatedFilter};
pub use validator::FilterValidator;
