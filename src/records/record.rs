use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::error::DbError;
use crate::value::Value;

/// One fetched row: an ordered mapping from column name to [`Value`].
///
/// Column names are unique within a record and match the originating
/// statement's result columns in order. Records own no database resource and
/// stay valid after their scope closes.
#[derive(Debug, Clone)]
pub struct Record {
    /// The column names for this row (shared across all rows in a result set)
    columns: Arc<Vec<String>>,
    /// The values for this row
    values: Vec<Value>,
    // Shared name -> index map, built once per result set.
    index: Arc<HashMap<String, usize>>,
}

impl Record {
    /// Build a standalone record. Rows coming out of a statement share their
    /// column metadata instead; this constructor is for callers assembling
    /// records by hand (tests, fixtures).
    #[must_use]
    pub fn new(columns: Arc<Vec<String>>, values: Vec<Value>) -> Self {
        let index = Arc::new(build_index(&columns));
        Self {
            columns,
            values,
            index,
        }
    }

    pub(crate) fn with_shared_index(
        columns: Arc<Vec<String>>,
        values: Vec<Value>,
        index: Arc<HashMap<String, usize>>,
    ) -> Self {
        Self {
            columns,
            values,
            index,
        }
    }

    /// Column names, in statement order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Get the index of a column by name.
    #[must_use]
    pub fn column_index(&self, column: &str) -> Option<usize> {
        if let Some(&idx) = self.index.get(column) {
            return Some(idx);
        }
        self.columns.iter().position(|col| col == column)
    }

    /// Get a value by column name.
    ///
    /// # Errors
    /// Returns `DbError::FieldNotFound` if the row has no such column. A
    /// present column holding NULL is `Ok(&Value::Null)`, not an error.
    pub fn get(&self, column: &str) -> Result<&Value, DbError> {
        self.column_index(column)
            .and_then(|idx| self.values.get(idx))
            .ok_or_else(|| DbError::FieldNotFound(column.to_string()))
    }

    /// Get a value by column position.
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Decode this record into `T`, matching `T`'s fields against columns by
    /// name. Extra columns on the record are ignored; a column `T` needs but
    /// the record lacks fails with `DecodeError` naming that column.
    ///
    /// # Errors
    /// Returns `DbError::DecodeError` on a missing column or a value of the
    /// wrong type.
    pub fn decode<T: FromRow>(&self) -> Result<T, DbError> {
        T::from_row(self).map_err(|err| match err {
            DbError::FieldNotFound(field) => {
                DbError::DecodeError(format!("missing column '{field}'"))
            }
            other => other,
        })
    }

    /// # Errors
    /// `FieldNotFound` on a missing column, `DecodeError` on a non-integer.
    pub fn int(&self, column: &str) -> Result<i64, DbError> {
        let value = self.get(column)?;
        value
            .as_int()
            .ok_or_else(|| mismatch(column, "integer", value))
    }

    /// # Errors
    /// `FieldNotFound` on a missing column, `DecodeError` on a non-float.
    pub fn float(&self, column: &str) -> Result<f64, DbError> {
        let value = self.get(column)?;
        value
            .as_float()
            .ok_or_else(|| mismatch(column, "float", value))
    }

    /// # Errors
    /// `FieldNotFound` on a missing column, `DecodeError` on non-text.
    pub fn text(&self, column: &str) -> Result<&str, DbError> {
        let value = self.get(column)?;
        value
            .as_text()
            .ok_or_else(|| mismatch(column, "text", value))
    }

    /// # Errors
    /// `FieldNotFound` on a missing column, `DecodeError` when the value is
    /// neither a boolean nor a 0/1 integer.
    pub fn bool(&self, column: &str) -> Result<bool, DbError> {
        let value = self.get(column)?;
        value
            .as_bool()
            .ok_or_else(|| mismatch(column, "boolean", value))
    }

    /// # Errors
    /// `FieldNotFound` on a missing column, `DecodeError` when the value is
    /// neither a timestamp nor text in a recognized timestamp format.
    pub fn timestamp(&self, column: &str) -> Result<NaiveDateTime, DbError> {
        let value = self.get(column)?;
        value
            .as_timestamp()
            .ok_or_else(|| mismatch(column, "timestamp", value))
    }

    /// # Errors
    /// `FieldNotFound` on a missing column, `DecodeError` on a non-blob.
    pub fn blob(&self, column: &str) -> Result<&[u8], DbError> {
        let value = self.get(column)?;
        value
            .as_blob()
            .ok_or_else(|| mismatch(column, "blob", value))
    }
}

fn mismatch(column: &str, expected: &str, value: &Value) -> DbError {
    DbError::DecodeError(format!(
        "column '{column}' is {}, expected {expected}",
        value.kind()
    ))
}

pub(crate) fn build_index(columns: &[String]) -> HashMap<String, usize> {
    columns
        .iter()
        .enumerate()
        .map(|(i, name)| (name.clone(), i))
        .collect()
}

/// Decode target for [`Record::decode`]: build `Self` from one fetched row.
///
/// Implementations read each field through the record's named accessors, so
/// missing columns surface per the decode contract:
/// ```rust
/// use sqlite_scope::{DbError, FromRow, Record};
///
/// struct Confession {
///     id: i64,
///     content: String,
/// }
///
/// impl FromRow for Confession {
///     fn from_row(record: &Record) -> Result<Self, DbError> {
///         Ok(Self {
///             id: record.int("id")?,
///             content: record.text("content")?.to_string(),
///         })
///     }
/// }
/// ```
pub trait FromRow: Sized {
    /// Build a value from one fetched row.
    ///
    /// # Errors
    /// Returns `DbError` when a required column is absent or holds a value of
    /// the wrong type.
    fn from_row(record: &Record) -> Result<Self, DbError>;
}
