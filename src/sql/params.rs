//! Bind typed filter operands to a PostgreSQL query.

use crate::error::AppError;
use crate::filter::FilterValue;
use sqlx::postgres::PgArguments;
use sqlx::Arguments;

/// Build positional arguments, `$1..$n` in order.
pub fn to_arguments(params: &[FilterValue]) -> Result<PgArguments, AppError> {
    let mut args = PgArguments::default();
    for p in params {
        let added = match p {
            FilterValue::Int(n) => args.add(*n),
            FilterValue::Text(s) => args.add(s.clone()),
            FilterValue::Date(d) => args.add(*d),
        };
        added.map_err(|e| AppError::Db(sqlx::Error::Encode(e)))?;
    }
    Ok(args)
}
