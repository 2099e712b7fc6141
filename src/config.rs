use std::path::PathBuf;
use std::time::Duration;

use crate::error::DbError;
use crate::scope::Scope;

/// Options for opening a [`Scope`].
///
/// The database path is configured once per process by the caller; a scope
/// targets exactly one storage file.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub db_path: PathBuf,
    pub busy_timeout: Option<Duration>,
    pub journal_wal: bool,
}

impl DbConfig {
    #[must_use]
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            busy_timeout: None,
            journal_wal: false,
        }
    }

    #[must_use]
    pub fn builder(db_path: impl Into<PathBuf>) -> DbConfigBuilder {
        DbConfigBuilder {
            cfg: DbConfig::new(db_path),
        }
    }
}

/// Fluent builder for [`DbConfig`].
#[derive(Debug, Clone)]
pub struct DbConfigBuilder {
    cfg: DbConfig,
}

impl DbConfigBuilder {
    /// How long a statement waits on a locked database before failing.
    #[must_use]
    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.busy_timeout = Some(timeout);
        self
    }

    /// Apply `PRAGMA journal_mode = WAL` when the scope opens.
    #[must_use]
    pub fn journal_wal(mut self, enabled: bool) -> Self {
        self.cfg.journal_wal = enabled;
        self
    }

    #[must_use]
    pub fn finish(self) -> DbConfig {
        self.cfg
    }

    /// Open a scope with these options.
    ///
    /// # Errors
    /// Returns `DbError::ConnectionError` if the database cannot be opened.
    pub fn open(self) -> Result<Scope, DbError> {
        Scope::open_with(&self.finish())
    }
}
