//! Error types for query building, execution, and value conversion.

use thiserror::Error;

/// Unified error type for all neoquery operations.
///
/// Argument-shape problems surface as [`InvalidArgument`](QueryError::InvalidArgument)
/// at the builder call that received the argument. Driver failures are passed
/// through untouched as [`Neo4j`](QueryError::Neo4j).
#[derive(Error, Debug)]
pub enum QueryError {
    /// A clause could not interpret one of its arguments.
    ///
    /// `argument` is the full argument as given, `part` the sub-value that
    /// failed (when it differs from the whole).
    #[error("Invalid argument for {keyword}.  Full arguments: {argument}{}", part_suffix(.part))]
    InvalidArgument {
        keyword: &'static str,
        argument: String,
        part: Option<String>,
    },

    /// `pluck` was called without any column.
    #[error("no columns specified for pluck")]
    MissingColumns,

    /// Batched iteration was requested with a batch size of zero.
    #[error("batch size must be greater than zero")]
    InvalidBatchSize,

    /// A general mapping error with a freeform message.
    #[error("mapping error: {0}")]
    Mapping(String),

    /// A required column was not found in a result row.
    #[error("missing field '{field}' on {struct_name}")]
    MissingField { field: String, struct_name: String },

    /// A `BoltType` variant did not match the expected Rust type.
    #[error("type mismatch: expected {expected}, got {got} ({context})")]
    TypeMismatch {
        expected: String,
        got: String,
        context: String,
    },

    /// Wraps an inner error with additional context.
    #[error("{context}: {source}")]
    Context {
        context: String,
        source: Box<QueryError>,
    },

    /// A `neo4rs::Error` from the underlying driver.
    #[error("neo4j error: {0}")]
    Neo4j(#[from] neo4rs::Error),
}

fn part_suffix(part: &Option<String>) -> String {
    match part {
        Some(p) => format!(" | Invalid part: {p}"),
        None => String::new(),
    }
}

impl QueryError {
    /// Create an [`InvalidArgument`](QueryError::InvalidArgument) error.
    pub fn invalid_argument(keyword: &'static str, argument: impl Into<String>, part: Option<String>) -> Self {
        QueryError::InvalidArgument {
            keyword,
            argument: argument.into(),
            part,
        }
    }

    /// Create a [`TypeMismatch`](QueryError::TypeMismatch) error.
    pub fn type_mismatch(expected: &str, got: &str, context: &str) -> Self {
        QueryError::TypeMismatch {
            expected: expected.to_owned(),
            got: got.to_owned(),
            context: context.to_owned(),
        }
    }

    /// Create a [`MissingField`](QueryError::MissingField) error.
    pub fn missing_field(field: &str, struct_name: &str) -> Self {
        QueryError::MissingField {
            field: field.to_owned(),
            struct_name: struct_name.to_owned(),
        }
    }

    /// Wrap this error with additional context.
    ///
    /// ```rust
    /// # use neoquery_core::QueryError;
    /// let err = QueryError::type_mismatch("Integer", "String", "i64");
    /// let wrapped = err.with_context("pluck column 'count(*)'");
    /// assert!(wrapped.to_string().contains("count(*)"));
    /// ```
    pub fn with_context(self, ctx: impl Into<String>) -> Self {
        QueryError::Context {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}
