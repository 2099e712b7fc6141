use std::collections::VecDeque;
use std::path::Path;

use rusqlite::Connection;
use tracing::{debug, warn};

use crate::config::DbConfig;
use crate::error::DbError;
use crate::params::Params;
use crate::query::build_result_set;
use crate::records::Record;
use crate::value::Value;

/// One connection and one statement cursor for the duration of a unit of
/// work.
///
/// A transaction is begun when the scope opens. Exactly one COMMIT (clean
/// exit) or ROLLBACK (after a failed statement) runs when the scope closes,
/// no matter how many statements ran inside it. [`Scope::run`] is the
/// preferred acquisition form; `Drop` finishes the scope on every other exit
/// path, so the connection's write lock is never held past the unit of work.
///
/// A scope is never shared across concurrent units of work. Multiple scopes
/// may target the same file; locking between them is SQLite's business.
///
/// ```no_run
/// use sqlite_scope::{Scope, Value};
///
/// # fn demo() -> Result<(), sqlite_scope::DbError> {
/// let name = Scope::run("app.sqlite3", |scope| {
///     scope.execute("SELECT name FROM rooms WHERE code = ?", &[Value::from("abc123")])?;
///     Ok(scope.fetch_one())
/// })?;
/// # let _ = name;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Scope {
    conn: Option<Connection>,
    rows: VecDeque<Record>,
    rows_affected: usize,
    last_insert_id: Option<i64>,
    failed: bool,
}

enum StatementOutcome {
    Rows(VecDeque<Record>),
    Dml {
        rows_affected: usize,
        last_insert_id: Option<i64>,
    },
}

impl Scope {
    /// Open a scope against the database file at `path` with default options.
    ///
    /// # Errors
    /// Returns `DbError::ConnectionError` if the file is unreachable or
    /// corrupt.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DbError> {
        Self::open_with(&DbConfig::new(path.as_ref()))
    }

    /// Open a scope with explicit [`DbConfig`] options.
    ///
    /// # Errors
    /// Returns `DbError::ConnectionError` if the file is unreachable or
    /// corrupt, or if the configured pragmas cannot be applied.
    pub fn open_with(config: &DbConfig) -> Result<Self, DbError> {
        let conn = Connection::open(&config.db_path).map_err(|e| {
            DbError::ConnectionError(format!(
                "failed to open {}: {e}",
                config.db_path.display()
            ))
        })?;
        if let Some(timeout) = config.busy_timeout {
            conn.busy_timeout(timeout)
                .map_err(|e| DbError::ConnectionError(format!("busy_timeout: {e}")))?;
        }
        if config.journal_wal {
            conn.execute_batch("PRAGMA journal_mode = WAL;")
                .map_err(|e| DbError::ConnectionError(format!("journal_mode: {e}")))?;
        }
        conn.execute_batch("BEGIN")
            .map_err(|e| DbError::ConnectionError(format!("begin: {e}")))?;
        debug!(path = %config.db_path.display(), "scope opened");
        Ok(Self {
            conn: Some(conn),
            rows: VecDeque::new(),
            rows_affected: 0,
            last_insert_id: None,
            failed: false,
        })
    }

    /// Run `f` against a fresh scope on `path`: commit on `Ok`, roll back on
    /// `Err`. Close problems on the error path are logged rather than
    /// returned, so the closure's error is what the caller sees.
    ///
    /// # Errors
    /// Propagates the closure's error, or the open/close error itself.
    pub fn run<P, T, F>(path: P, f: F) -> Result<T, DbError>
    where
        P: AsRef<Path>,
        F: FnOnce(&mut Scope) -> Result<T, DbError>,
    {
        Self::run_with(&DbConfig::new(path.as_ref()), f)
    }

    /// [`Scope::run`] with explicit options.
    ///
    /// # Errors
    /// Propagates the closure's error, or the open/close error itself.
    pub fn run_with<T, F>(config: &DbConfig, f: F) -> Result<T, DbError>
    where
        F: FnOnce(&mut Scope) -> Result<T, DbError>,
    {
        let mut scope = Scope::open_with(config)?;
        match f(&mut scope) {
            Ok(value) => {
                scope.close()?;
                Ok(value)
            }
            Err(err) => {
                scope.failed = true;
                if let Err(close_err) = scope.close() {
                    warn!("scope close after failure: {close_err}");
                }
                Err(err)
            }
        }
    }

    /// Run one parameterized statement, replacing the current result set.
    ///
    /// Statements with result columns materialize their rows for
    /// [`fetch_one`](Self::fetch_one)/[`fetch_all`](Self::fetch_all); other
    /// statements record [`rows_affected`](Self::rows_affected) and
    /// [`last_insert_id`](Self::last_insert_id). Returns `self` for chaining.
    ///
    /// # Errors
    /// Returns `DbError::QueryError` on malformed SQL, a constraint
    /// violation, or a type mismatch; the scope is then marked failed and
    /// will roll back at close.
    pub fn execute(&mut self, sql: &str, params: &[Value]) -> Result<&mut Self, DbError> {
        let conn = self.conn()?;
        match run_statement(conn, sql, params) {
            Ok(StatementOutcome::Rows(rows)) => {
                self.rows = rows;
                self.rows_affected = 0;
                self.last_insert_id = None;
                Ok(self)
            }
            Ok(StatementOutcome::Dml {
                rows_affected,
                last_insert_id,
            }) => {
                self.rows.clear();
                self.rows_affected = rows_affected;
                self.last_insert_id = last_insert_id;
                Ok(self)
            }
            Err(err) => {
                self.failed = true;
                Err(err)
            }
        }
    }

    /// Run a batch of statements with no parameter binding. Bootstrap flows
    /// only (schema setup), never the request path.
    ///
    /// The batch runs inside the scope's transaction; scripts must not
    /// BEGIN/COMMIT themselves.
    ///
    /// # Errors
    /// Returns `DbError::QueryError` if any statement in the batch fails; the
    /// scope is then marked failed and will roll back at close.
    pub fn execute_script(&mut self, sql: &str) -> Result<&mut Self, DbError> {
        let conn = self.conn()?;
        if let Err(err) = conn.execute_batch(sql) {
            self.failed = true;
            return Err(DbError::QueryError(err));
        }
        self.rows.clear();
        self.rows_affected = 0;
        self.last_insert_id = None;
        Ok(self)
    }

    /// Take the next row of the current result set, if any. After a DML
    /// statement there is no result set and this returns `None`.
    pub fn fetch_one(&mut self) -> Option<Record> {
        self.rows.pop_front()
    }

    /// Take all remaining rows of the current result set.
    pub fn fetch_all(&mut self) -> Vec<Record> {
        self.rows.drain(..).collect()
    }

    /// Whether the current result set still has a row to fetch.
    #[must_use]
    pub fn exists(&self) -> bool {
        !self.rows.is_empty()
    }

    /// Rowid generated by the most recent INSERT. Undefined after any other
    /// statement.
    #[must_use]
    pub fn last_insert_id(&self) -> Option<i64> {
        self.last_insert_id
    }

    /// Rows changed by the most recent UPDATE/DELETE.
    #[must_use]
    pub fn rows_affected(&self) -> usize {
        self.rows_affected
    }

    /// Mid-scope durability point: commit work so far and begin a fresh
    /// transaction for the remainder of the scope.
    ///
    /// # Errors
    /// Returns `DbError::QueryError` if the commit fails.
    pub fn commit(&mut self) -> Result<&mut Self, DbError> {
        let conn = self.conn()?;
        if let Err(err) = conn.execute_batch("COMMIT; BEGIN") {
            self.failed = true;
            return Err(DbError::QueryError(err));
        }
        Ok(self)
    }

    /// Finish the scope: COMMIT on a clean scope, ROLLBACK on a failed one,
    /// then release the connection. Idempotent; a second call is a no-op.
    ///
    /// # Errors
    /// On a clean scope, a failed commit or release surfaces here. On a
    /// failed scope, cleanup problems are logged and suppressed so they never
    /// mask the statement error that put the scope into the failed state.
    pub fn close(&mut self) -> Result<(), DbError> {
        let Some(conn) = self.conn.take() else {
            return Ok(());
        };
        self.rows.clear();

        let end = if self.failed { "ROLLBACK" } else { "COMMIT" };
        let finished = conn.execute_batch(end).map_err(DbError::QueryError);
        let released = conn
            .close()
            .map_err(|(_, e)| DbError::ConnectionError(format!("release: {e}")));
        debug!(outcome = end, "scope closed");

        if self.failed {
            if let Err(err) = finished {
                warn!("rollback on failed scope: {err}");
            }
            if let Err(err) = released {
                warn!("release on failed scope: {err}");
            }
            Ok(())
        } else {
            finished?;
            released
        }
    }

    fn conn(&self) -> Result<&Connection, DbError> {
        self.conn
            .as_ref()
            .ok_or_else(|| DbError::ConnectionError("scope is closed".to_string()))
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        if self.conn.is_none() {
            return;
        }
        // A scope dropped mid-panic must not commit the half-done work.
        if std::thread::panicking() {
            self.failed = true;
        }
        if let Err(err) = self.close() {
            warn!("scope dropped without close; cleanup failed: {err}");
        }
    }
}

fn run_statement(
    conn: &Connection,
    sql: &str,
    params: &[Value],
) -> Result<StatementOutcome, DbError> {
    let converted = Params::convert(params);
    let mut stmt = conn.prepare(sql).map_err(DbError::QueryError)?;
    if stmt.column_count() == 0 {
        let param_refs = converted.as_refs();
        let rows_affected = stmt.execute(&param_refs[..]).map_err(DbError::QueryError)?;
        let rowid = conn.last_insert_rowid();
        Ok(StatementOutcome::Dml {
            rows_affected,
            last_insert_id: (rowid != 0).then_some(rowid),
        })
    } else {
        let result_set = build_result_set(&mut stmt, &converted)?;
        Ok(StatementOutcome::Rows(result_set.rows.into()))
    }
}
