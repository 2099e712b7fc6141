// Row representation and decoding.
//
// - record: one fetched row as an ordered name -> value mapping
// - result_set: rows from one statement, sharing one column-name allocation

mod record;
mod result_set;

pub use record::{FromRow, Record};
pub use result_set::ResultSet;
