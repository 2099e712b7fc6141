//! Convenient imports for common functionality.
//!
//! This module re-exports the most commonly used types to make it easier to
//! get started with the library.

pub use crate::builder::{InsertBuilder, UpdateBuilder};
pub use crate::config::{DbConfig, DbConfigBuilder};
pub use crate::error::DbError;
pub use crate::records::{FromRow, Record, ResultSet};
pub use crate::scope::Scope;
pub use crate::value::Value;
