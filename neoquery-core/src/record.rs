//! Row access for query results.
//!
//! These functions isolate the `neo4rs::Row` API so that `pluck`, batching
//! and user `FromRow` impls read columns the same way.

use neo4rs::{BoltType as Value, Row};

use crate::error::QueryError;
use crate::traits::FromValue;

/// Read a value from a [`Row`](neo4rs::Row) by column name.
///
/// Returns `None` if the column does not exist in the row.
pub fn get_value(row: &Row, key: &str) -> Option<Value> {
    row.get(key).ok()
}

/// Check whether a column exists in the row.
pub fn has_key(row: &Row, key: &str) -> bool {
    get_value(row, key).is_some()
}

/// Read and convert a column, failing with
/// [`MissingField`](QueryError::MissingField) if it is absent.
pub fn get_as<T: FromValue>(row: &Row, key: &str) -> Result<T, QueryError> {
    let value = get_value(row, key).ok_or_else(|| QueryError::missing_field(key, "row"))?;
    T::from_value(value).map_err(|e| e.with_context(format!("column '{key}'")))
}
