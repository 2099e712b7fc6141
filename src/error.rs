use thiserror::Error;

/// Errors surfaced by the scope, the builders, and row decoding.
///
/// Nothing in this crate retries or recovers internally; every error
/// propagates to the caller. `BuilderError`, `FieldNotFound`, and
/// `DecodeError` indicate a programming error at the call site rather than a
/// data problem.
#[derive(Debug, Error)]
pub enum DbError {
    /// The database file could not be opened or made usable.
    #[error("connection error: {0}")]
    ConnectionError(String),

    /// A statement failed: malformed SQL, constraint violation, type
    /// mismatch. Carries the driver's message.
    #[error("query failed: {0}")]
    QueryError(#[source] rusqlite::Error),

    /// A builder was rendered in an invalid state.
    #[error("builder error: {0}")]
    BuilderError(&'static str),

    /// A row was asked for a column it does not have. Distinct from the
    /// column being present with a NULL value.
    #[error("row has no column '{0}'")]
    FieldNotFound(String),

    /// A row could not be decoded into the requested type.
    #[error("cannot decode row: {0}")]
    DecodeError(String),
}
