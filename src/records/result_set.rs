use std::collections::HashMap;
use std::sync::Arc;

use super::record::{Record, build_index};
use crate::value::Value;

/// Rows returned by one statement, plus DML metadata.
///
/// Column names and the name -> index map are allocated once and shared by
/// every row in the set.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    /// The rows returned by the statement
    pub rows: Vec<Record>,
    /// The number of rows affected (for DML statements)
    pub rows_affected: usize,
    column_names: Option<Arc<Vec<String>>>,
    column_index: Option<Arc<HashMap<String, usize>>>,
}

impl ResultSet {
    /// Create an empty result set with a known row capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> ResultSet {
        ResultSet {
            rows: Vec::with_capacity(capacity),
            rows_affected: 0,
            column_names: None,
            column_index: None,
        }
    }

    /// Set the column names shared by all rows in this set.
    pub fn set_column_names(&mut self, column_names: Arc<Vec<String>>) {
        self.column_index = Some(Arc::new(build_index(&column_names)));
        self.column_names = Some(column_names);
    }

    /// Column names shared by this set's rows, if any row metadata exists.
    #[must_use]
    pub fn column_names(&self) -> Option<&Arc<Vec<String>>> {
        self.column_names.as_ref()
    }

    /// Append one row of values; the row shares this set's column metadata.
    /// No-op until [`set_column_names`](Self::set_column_names) has run.
    pub fn add_row_values(&mut self, values: Vec<Value>) {
        let (Some(columns), Some(index)) = (&self.column_names, &self.column_index) else {
            return;
        };
        self.rows.push(Record::with_shared_index(
            Arc::clone(columns),
            values,
            Arc::clone(index),
        ));
        self.rows_affected += 1;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
