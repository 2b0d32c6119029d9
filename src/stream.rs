//! Streaming query results with automatic type mapping.

use std::marker::PhantomData;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::stream::Stream;
use futures::StreamExt;
use neoquery_core::traits::FromRow;
use neoquery_core::QueryError;

use crate::session::Rows;

/// A typed stream of query results mapped via [`FromRow`].
///
/// Created by [`Query::stream`](crate::Query::stream). Each call to
/// [`next()`](Self::next) pulls the next row from the session and maps it
/// to `T`.
///
/// ```rust,no_run
/// # use neoquery::prelude::*;
/// # async fn example(graph: &neo4rs::Graph) -> Result<(), QueryError> {
/// let mut rows = Query::new()
///     .match_("(u:User)")?
///     .return_("u.name AS name")?
///     .stream::<neo4rs::Row, _>(graph)
///     .await?;
///
/// while let Some(row) = rows.next().await {
///     let name: String = neoquery::record::get_as(&row?, "name")?;
///     println!("{name}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct RowStream<T> {
    inner: Rows,
    _marker: PhantomData<fn() -> T>,
}

impl<T: FromRow> RowStream<T> {
    pub(crate) fn new(inner: Rows) -> Self {
        Self { inner, _marker: PhantomData }
    }

    /// Pull the next row from the stream and map it to `T`.
    ///
    /// Returns `None` when the stream is exhausted.
    pub async fn next(&mut self) -> Option<Result<T, QueryError>> {
        match self.inner.next().await {
            None => None,
            Some(Err(e)) => Some(Err(e)),
            Some(Ok(row)) => Some(T::from_row(row)),
        }
    }
}

impl<T: FromRow> Stream for RowStream<T> {
    type Item = Result<T, QueryError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner
            .poll_next_unpin(cx)
            .map(|item| item.map(|row| row.and_then(T::from_row)))
    }
}
