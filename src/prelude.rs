//! Convenience re-exports for common neoquery usage.
//!
//! ```rust
//! use neoquery::prelude::*;
//! ```
//!
//! This imports the [`Query`] builder and its options, the argument helpers
//! (`map!`, `args!`, `sym`, `Arg`), the `Properties` derive and trait, the
//! conversion traits, the session trait, batching types, [`RowStream`] and
//! the error type.

pub use crate::batches::{BatchOptions, Batches};
pub use crate::query::{Query, QueryOptions};
pub use crate::session::Session;
pub use crate::stream::RowStream;
pub use crate::Properties;
pub use neoquery_core::traits::{FromRow, FromValue, Properties as PropertiesTrait};
pub use neoquery_core::{args, map, sym, Arg, ClauseKind, QueryError};
