//! Core building blocks for neoquery: arguments, parameters, clauses,
//! partitioning, error types and value conversions.
//!
//! This crate is not meant to be used directly. Use the [`neoquery`] facade
//! crate instead, which re-exports everything you need.
//!
//! [`neoquery`]: https://docs.rs/neoquery

pub mod arg;
pub mod clause;
pub mod error;
pub mod params;
pub mod partition;
pub mod traits;

pub mod props;
pub mod record;
pub mod value;

pub use arg::{sym, Arg};
pub use clause::{Clause, ClauseKind, ClauseOptions, Fragment};
pub use error::QueryError;
pub use params::{ParameterTable, Params};
pub use partition::partition;
pub use traits::{FromRow, FromValue, Properties};
