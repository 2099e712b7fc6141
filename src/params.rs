use rusqlite::ToSql;

use crate::value::Value;

/// Convert a single [`Value`] to a rusqlite value.
#[must_use]
pub fn value_to_sqlite(value: &Value) -> rusqlite::types::Value {
    match value {
        Value::Int(i) => rusqlite::types::Value::Integer(*i),
        Value::Float(f) => rusqlite::types::Value::Real(*f),
        Value::Text(s) => rusqlite::types::Value::Text(s.clone()),
        Value::Bool(b) => rusqlite::types::Value::Integer(i64::from(*b)),
        Value::Timestamp(dt) => {
            rusqlite::types::Value::Text(dt.format("%F %T%.f").to_string())
        }
        Value::Null => rusqlite::types::Value::Null,
        Value::Json(jval) => rusqlite::types::Value::Text(jval.to_string()),
        Value::Blob(bytes) => rusqlite::types::Value::Blob(bytes.clone()),
    }
}

/// Parameter container: [`Value`]s converted for statement binding.
pub struct Params(Vec<rusqlite::types::Value>);

impl Params {
    /// Convert a parameter slice into bindable SQLite values.
    #[must_use]
    pub fn convert(params: &[Value]) -> Self {
        Params(params.iter().map(value_to_sqlite).collect())
    }

    /// Borrow the underlying values.
    #[must_use]
    pub fn as_values(&self) -> &[rusqlite::types::Value] {
        &self.0
    }

    /// Build a borrowed params slice suitable for rusqlite execution.
    #[must_use]
    pub fn as_refs(&self) -> Vec<&dyn ToSql> {
        self.0.iter().map(|v| v as &dyn ToSql).collect()
    }
}
