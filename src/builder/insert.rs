use crate::error::DbError;
use crate::scope::Scope;
use crate::value::Value;

/// Builder for a parameterized INSERT over a dynamic column set.
///
/// ```rust
/// use sqlite_scope::InsertBuilder;
///
/// let (sql, params) = InsertBuilder::table("rooms")
///     .value("code", "abc123")
///     .value("name", "Room")
///     .render()?;
/// assert_eq!(sql, "INSERT INTO rooms (code, name) VALUES (?, ?)");
/// assert_eq!(params.len(), 2);
/// # Ok::<(), sqlite_scope::DbError>(())
/// ```
#[derive(Debug, Clone)]
pub struct InsertBuilder {
    table: String,
    columns: Vec<String>,
    values: Vec<Value>,
}

impl InsertBuilder {
    /// Start a builder targeting `table`.
    #[must_use]
    pub fn table(name: impl Into<String>) -> Self {
        Self {
            table: name.into(),
            columns: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Add a column/value pair. Repeating a column keeps its original
    /// position and replaces the value (last-wins).
    #[must_use]
    pub fn value(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        let column: String = column.into();
        match self.columns.iter().position(|c| c == &column) {
            Some(idx) => self.values[idx] = value.into(),
            None => {
                self.columns.push(column);
                self.values.push(value.into());
            }
        }
        self
    }

    /// Add multiple column/value pairs, in iteration order.
    #[must_use]
    pub fn values<I, C, V>(self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (C, V)>,
        C: Into<String>,
        V: Into<Value>,
    {
        pairs
            .into_iter()
            .fold(self, |builder, (column, value)| builder.value(column, value))
    }

    /// Render the statement and its ordered parameter list. Deterministic
    /// and idempotent: the same builder state renders the same output every
    /// time.
    ///
    /// # Errors
    /// Returns `DbError::BuilderError` if no column has been added.
    pub fn render(&self) -> Result<(String, Vec<Value>), DbError> {
        if self.columns.is_empty() {
            return Err(DbError::BuilderError("no columns"));
        }
        let columns = self.columns.join(", ");
        let placeholders = vec!["?"; self.values.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table, columns, placeholders
        );
        Ok((sql, self.values.clone()))
    }

    /// Render and execute on `scope`, returning the scope for chaining.
    ///
    /// # Errors
    /// Returns `DbError::BuilderError` from rendering or `DbError::
    /// QueryError` from execution.
    pub fn execute_on<'s>(&self, scope: &'s mut Scope) -> Result<&'s mut Scope, DbError> {
        let (sql, params) = self.render()?;
        scope.execute(&sql, &params)
    }
}
