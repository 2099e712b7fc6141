use crate::error::DbError;
use crate::scope::Scope;
use crate::value::Value;

/// Builder for a parameterized UPDATE with dynamic set-clauses and
/// predicates.
///
/// Predicates are AND-ed together. With no predicate the statement renders
/// unconditionally; avoiding an unintended full-table update is the caller's
/// responsibility. Parameter order is always all set-values (in `set` call
/// order) followed by all predicate values (in `where_*` call order).
///
/// ```rust
/// use sqlite_scope::{UpdateBuilder, Value};
///
/// let (sql, params) = UpdateBuilder::table("confessions")
///     .set("is_visible", 0)
///     .where_eq("id", 7)
///     .render()?;
/// assert_eq!(sql, "UPDATE confessions SET is_visible = ? WHERE id = ?");
/// assert_eq!(params, vec![Value::Int(0), Value::Int(7)]);
/// # Ok::<(), sqlite_scope::DbError>(())
/// ```
#[derive(Debug, Clone)]
pub struct UpdateBuilder {
    table: String,
    set_clauses: Vec<String>,
    set_params: Vec<Value>,
    where_clauses: Vec<String>,
    where_params: Vec<Value>,
    // First invalid call wins; surfaced from render() so chains stay
    // infallible.
    invalid: Option<&'static str>,
}

impl UpdateBuilder {
    /// Start a builder targeting `table`.
    #[must_use]
    pub fn table(name: impl Into<String>) -> Self {
        Self {
            table: name.into(),
            set_clauses: Vec::new(),
            set_params: Vec::new(),
            where_clauses: Vec::new(),
            where_params: Vec::new(),
            invalid: None,
        }
    }

    /// Append a `column = ?` set-clause.
    #[must_use]
    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        let column: String = column.into();
        self.set_clauses.push(format!("{column} = ?"));
        self.set_params.push(value.into());
        self
    }

    /// Append a raw predicate fragment with its bound values. The fragment
    /// supplies its own placeholders; use this for composite or non-equality
    /// predicates.
    #[must_use]
    pub fn where_raw<I, V>(mut self, condition: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.where_clauses.push(condition.into());
        self.where_params.extend(values.into_iter().map(Into::into));
        self
    }

    /// Append an equality predicate.
    #[must_use]
    pub fn where_eq(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        let column: String = column.into();
        self.where_raw(format!("{column} = ?"), [value.into()])
    }

    /// Append a `column IN (?, ?, ...)` predicate with one placeholder per
    /// element. An empty list is invalid SQL and fails at
    /// [`render`](Self::render) with `BuilderError("empty set")`.
    #[must_use]
    pub fn where_in<I, V>(mut self, column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            self.invalid.get_or_insert("empty set");
            return self;
        }
        let column: String = column.into();
        let placeholders = vec!["?"; values.len()].join(",");
        self.where_raw(format!("{column} IN ({placeholders})"), values)
    }

    /// Render the statement and its ordered parameter list. Deterministic
    /// and idempotent: the same builder state renders the same output every
    /// time.
    ///
    /// # Errors
    /// Returns `DbError::BuilderError` if no set-clause has been added or if
    /// an empty IN list was requested.
    pub fn render(&self) -> Result<(String, Vec<Value>), DbError> {
        if let Some(message) = self.invalid {
            return Err(DbError::BuilderError(message));
        }
        if self.set_clauses.is_empty() {
            return Err(DbError::BuilderError("no set clauses"));
        }

        let mut sql = format!("UPDATE {} SET {}", self.table, self.set_clauses.join(", "));
        if !self.where_clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.where_clauses.join(" AND "));
        }

        let mut params = self.set_params.clone();
        params.extend(self.where_params.iter().cloned());
        Ok((sql, params))
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
