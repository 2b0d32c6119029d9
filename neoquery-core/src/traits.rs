//! Core traits for moving data between Rust types, builder arguments and
//! result rows.

use neo4rs::{BoltType as Value, Row};

use crate::arg::Arg;
use crate::error::QueryError;

/// Converts a single `neo4rs::BoltType` value into a Rust type.
///
/// This is what `pluck` uses to decode each returned column. Implementations
/// exist for primitives, collections and temporal types, plus an identity
/// impl for `BoltType` itself.
pub trait FromValue: Sized {
    /// Convert a [`BoltType`](neo4rs::BoltType) into `Self`.
    fn from_value(value: Value) -> Result<Self, QueryError>;
}

/// Converts one result row into a Rust type.
///
/// `Row` itself is the identity case; implement this for your own types to
/// stream them straight out of a query.
pub trait FromRow: Sized {
    fn from_row(row: Row) -> Result<Self, QueryError>;
}

impl FromRow for Row {
    fn from_row(row: Row) -> Result<Self, QueryError> {
        Ok(row)
    }
}

/// A struct whose fields become node properties.
///
/// Automatically implemented by `#[derive(Properties)]`, which also
/// implements `From<T> for Arg` so a value can be handed straight to
/// `create`, `merge` or `match_`.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Properties)]
/// #[neoquery(label = "Person")]
/// struct Person {
///     name: String,
///     age: i64,
/// }
///
/// // CREATE (:`Person` {name: $Person_name, age: $Person_age})
/// let q = Query::new().create(map! { "Person" => person })?;
/// ```
pub trait Properties: Sized {
    /// Label used when the value is turned into an argument on its own.
    const LABEL: Option<&'static str> = None;

    /// Field name and value pairs, in declaration order.
    fn into_properties(self) -> Vec<(String, Arg)>;

    /// The properties as a mapping, nested under [`LABEL`](Self::LABEL) when
    /// one is set.
    fn into_arg(self) -> Arg {
        let props = Arg::Map(
            self.into_properties()
                .into_iter()
                .map(|(k, v)| (Arg::Str(k), v))
                .collect(),
        );
        match Self::LABEL {
            Some(label) => Arg::Map(vec![(Arg::Str(label.to_owned()), props)]),
            None => props,
        }
    }
}
