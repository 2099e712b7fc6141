use std::sync::Arc;

use rusqlite::Statement;

use crate::error::DbError;
use crate::params::Params;
use crate::records::ResultSet;
use crate::value::Value;

/// Extract one [`Value`] from a statement row.
///
/// # Errors
/// Returns `DbError::QueryError` if the driver cannot produce the value.
pub fn extract_value(row: &rusqlite::Row, idx: usize) -> Result<Value, DbError> {
    let value: rusqlite::types::Value = row.get(idx).map_err(DbError::QueryError)?;
    match value {
        rusqlite::types::Value::Null => Ok(Value::Null),
        rusqlite::types::Value::Integer(i) => Ok(Value::Int(i)),
        rusqlite::types::Value::Real(f) => Ok(Value::Float(f)),
        rusqlite::types::Value::Text(s) => Ok(Value::Text(s)),
        rusqlite::types::Value::Blob(b) => Ok(Value::Blob(b)),
    }
}

/// Run a prepared statement and materialize every row it returns.
///
/// Column names are collected once and shared across all rows in the set.
///
/// # Errors
/// Returns `DbError::QueryError` if execution or row extraction fails.
pub fn build_result_set(stmt: &mut Statement, params: &Params) -> Result<ResultSet, DbError> {
    let column_names: Vec<String> = stmt
        .column_names()
        .iter()
        .map(std::string::ToString::to_string)
        .collect();
    let column_count = column_names.len();

    let mut result_set = ResultSet::with_capacity(8);
    result_set.set_column_names(Arc::new(column_names));

    let param_refs = params.as_refs();
    let mut rows = stmt.query(&param_refs[..]).map_err(DbError::QueryError)?;
    while let Some(row) = rows.next().map_err(DbError::QueryError)? {
        let mut values = Vec::with_capacity(column_count);
        for idx in 0..column_count {
            values.push(extract_value(row, idx)?);
        }
        result_set.add_row_values(values);
    }

    Ok(result_set)
}
