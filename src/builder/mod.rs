// Fluent builders that assemble parameterized DML from dynamic column sets.
//
// Builders accumulate column/value pairs and render them into a statement
// string plus an ordered parameter list. Values are always bound as
// positional `?` parameters, never interpolated into the statement text.

mod insert;
mod update;

pub use insert::InsertBuilder;
pub use update::UpdateBuilder;
