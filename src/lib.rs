//! Scoped synchronous SQLite access.
//!
//! One [`Scope`] owns one connection and one statement cursor for the
//! duration of a unit of work, with a guaranteed commit-or-rollback when the
//! scope ends. Rows come back as [`Record`]s, ordered name-to-value mappings
//! that decode into caller types via [`FromRow`]. Dynamic INSERT/UPDATE
//! statements are assembled by [`InsertBuilder`] and [`UpdateBuilder`],
//! which always bind values as positional parameters.
//!
//! ```no_run
//! use sqlite_scope::{InsertBuilder, Scope};
//!
//! # fn demo() -> Result<(), sqlite_scope::DbError> {
//! Scope::run("app.sqlite3", |scope| {
//!     InsertBuilder::table("rooms")
//!         .value("code", "abc123")
//!         .value("name", "Room")
//!         .execute_on(scope)?;
//!     Ok(())
//! })?;
//! # Ok(())
//! # }
//! ```

mod builder;
mod config;
mod error;
mod params;
mod query;
mod records;
mod scope;
mod value;

pub mod prelude;

pub use builder::{InsertBuilder, UpdateBuilder};
pub use config::{DbConfig, DbConfigBuilder};
pub use error::DbError;
pub use params::{Params, value_to_sqlite};
pub use query::{build_result_set, extract_value};
pub use records::{FromRow, Record, ResultSet};
pub use scope::Scope;
pub use value::Value;
