//! Running a query through a [`Session`] and reading its results.

use neo4rs::{BoltList, BoltType, Row};
use neoquery_core::record::get_value;
use neoquery_core::{Arg, ClauseKind, FromRow, FromValue, QueryError};
use tracing::debug;

use crate::query::Query;
use crate::session::Session;
use crate::stream::RowStream;

impl Query {
    /// Execute and stream rows mapped to `T`.
    pub async fn stream<T, S>(&self, session: &S) -> Result<RowStream<T>, QueryError>
    where
        T: FromRow,
        S: Session + ?Sized,
    {
        let cypher = self.to_cypher();
        let params = self.parameters();
        debug!(cypher = %cypher, params = params.len(), "executing query");
        let rows = session.run(cypher, params).await?;
        Ok(RowStream::new(rows))
    }

    /// Execute and collect all rows.
    pub async fn fetch_all<T, S>(&self, session: &S) -> Result<Vec<T>, QueryError>
    where
        T: FromRow,
        S: Session + ?Sized,
    {
        let mut stream = self.stream(session).await?;
        let mut out = Vec::new();
        while let Some(row) = stream.next().await {
            out.push(row?);
        }
        Ok(out)
    }

    /// Execute and return the first row, if any.
    pub async fn first<T, S>(&self, session: &S) -> Result<Option<T>, QueryError>
    where
        T: FromRow,
        S: Session + ?Sized,
    {
        let mut stream = self.stream(session).await?;
        stream.next().await.transpose()
    }

    /// Replace the `RETURN` clauses with `columns` and decode them per row.
    ///
    /// With one column each row yields that column's value. With several the
    /// values come as one list, so `T` is usually a tuple:
    ///
    /// ```rust,no_run
    /// # use neoquery::prelude::*;
    /// # async fn example(graph: &neo4rs::Graph) -> Result<(), QueryError> {
    /// let q = Query::new().match_("(n:Person)")?;
    /// let names: Vec<String> = q.pluck(graph, &["n.name"]).await?;
    /// let pairs: Vec<(String, i64)> = q.pluck(graph, &["n.name AS name", "n.age AS age"]).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn pluck<T, S>(&self, session: &S, columns: &[&str]) -> Result<Vec<T>, QueryError>
    where
        T: FromValue,
        S: Session + ?Sized,
    {
        if columns.is_empty() {
            return Err(QueryError::MissingColumns);
        }
        let returned: Vec<Arg> = columns.iter().map(|c| Arg::Str((*c).to_owned())).collect();
        let query = self.without(ClauseKind::Return).return_(returned)?;
        let keys: Vec<&str> = columns.iter().map(|c| column_key(c)).collect();

        let rows: Vec<Row> = query.fetch_all(session).await?;
        rows.iter()
            .map(|row| {
                let value = match keys.as_slice() {
                    [key] => column(row, key)?,
                    _ => BoltType::List(BoltList {
                        value: keys.iter().map(|key| column(row, key)).collect::<Result<_, _>>()?,
                    }),
                };
                T::from_value(value)
            })
            .collect()
    }

    /// `count(*)`, or `count(var)` when a variable is given.
    pub async fn count<S>(&self, session: &S, var: Option<&str>) -> Result<i64, QueryError>
    where
        S: Session + ?Sized,
    {
        let expr = format!("count({})", var.unwrap_or("*"));
        let counts: Vec<i64> = self.pluck(session, &[expr.as_str()]).await?;
        Ok(counts.into_iter().next().unwrap_or(0))
    }
}

/// Name a returned expression comes back under: its alias if it has one.
fn column_key(expr: &str) -> &str {
    match expr.to_ascii_lowercase().rfind(" as ") {
        Some(i) => expr[i + 4..].trim(),
        None => expr.trim(),
    }
}

fn column(row: &Row, key: &str) -> Result<BoltType, QueryError> {
    get_value(row, key).ok_or_else(|| QueryError::missing_field(key, "pluck row"))
}

