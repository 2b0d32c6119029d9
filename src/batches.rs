//! Paging through large result sets by a monotonically increasing key.

use neo4rs::{BoltType, Row};
use neoquery_core::clause::property_ref;
use neoquery_core::record::get_value;
use neoquery_core::{props, Arg, QueryError};
use tracing::debug;

use crate::query::Query;
use crate::session::Session;

const OFFSET_PARAM: &str = "primary_key_offset";

/// Knobs for [`Query::find_in_batches`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    /// Rows per batch. Must be non-zero.
    pub batch_size: usize,
}

impl Default for BatchOptions {
    fn default() -> Self {
        BatchOptions { batch_size: 1000 }
    }
}

/// Successive batches of a query, ordered by `var.prop`.
///
/// Each batch after the first only matches rows whose key is greater than the
/// last key seen. Iteration ends after the first short batch.
pub struct Batches<'s, S: Session + ?Sized> {
    session: &'s S,
    base: Query,
    var: String,
    prop: String,
    batch_size: usize,
    offset: Option<BoltType>,
    done: bool,
}

impl<'s, S: Session + ?Sized> Batches<'s, S> {
    /// Fetch the next batch, or `None` once the results are exhausted.
    pub async fn next_batch(&mut self) -> Result<Option<Vec<Row>>, QueryError> {
        if self.done {
            return Ok(None);
        }
        let query = match &self.offset {
            None => self.base.clone(),
            Some(offset) => self
                .base
                .where_(format!("{} > ${OFFSET_PARAM}", property_ref(&self.var, &self.prop)))?
                .params([(OFFSET_PARAM, offset.clone())]),
        };

        let rows: Vec<Row> = query.fetch_all(self.session).await?;
        debug!(rows = rows.len(), batch_size = self.batch_size, "fetched batch");
        if rows.len() < self.batch_size {
            self.done = true;
        }
        let Some(last) = rows.last() else {
            return Ok(None);
        };
        self.offset = Some(self.offset_of(last)?);
        Ok(Some(rows))
    }

    /// Key of the last row: read from the node in column `var` when there is
    /// one, else from a `var.prop` column.
    fn offset_of(&self, row: &Row) -> Result<BoltType, QueryError> {
        if let Some(BoltType::Node(node)) = get_value(row, &self.var) {
            if self.prop == "neo_id" {
                return Ok(BoltType::from(props::node_id(&node)));
            }
            if let Some(value) = props::node_prop(&node, &self.prop) {
                return Ok(value);
            }
        }
        let column = property_ref(&self.var, &self.prop);
        get_value(row, &column).ok_or_else(|| QueryError::missing_field(&column, "batch row"))
    }
}

impl Query {
    /// Iterate over the results in batches ordered by `var.prop`.
    ///
    /// Any existing `ORDER BY` is replaced. Use `"neo_id"` as `prop` to page
    /// by internal node id.
    ///
    /// ```rust,no_run
    /// # use neoquery::prelude::*;
    /// # async fn example(graph: &neo4rs::Graph) -> Result<(), QueryError> {
    /// let q = Query::new().match_("(n:Person)")?.return_("n")?;
    /// let mut batches = q.find_in_batches(graph, "n", "uuid", BatchOptions { batch_size: 500 })?;
    /// while let Some(rows) = batches.next_batch().await? {
    ///     println!("{} people", rows.len());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn find_in_batches<'s, S: Session + ?Sized>(
        &self,
        session: &'s S,
        var: &str,
        prop: &str,
        options: BatchOptions,
    ) -> Result<Batches<'s, S>, QueryError> {
        if options.batch_size == 0 {
            return Err(QueryError::InvalidBatchSize);
        }
        let order = Arg::Map(vec![(Arg::Str(var.to_owned()), Arg::Str(prop.to_owned()))]);
        let base = self.reorder(order)?.limit(options.batch_size)?;
        Ok(Batches {
            session,
            base,
            var: var.to_owned(),
            prop: prop.to_owned(),
            batch_size: options.batch_size,
            offset: None,
            done: false,
        })
    }

    /// Call `f` with every row, fetched in batches as in
    /// [`find_in_batches`](Self::find_in_batches).
    pub async fn find_each<S, F>(
        &self,
        session: &S,
        var: &str,
        prop: &str,
        options: BatchOptions,
        mut f: F,
    ) -> Result<(), QueryError>
    where
        S: Session + ?Sized,
        F: FnMut(Row) -> Result<(), QueryError>,
    {
        let mut batches = self.find_in_batches(session, var, prop, options)?;
        while let Some(rows) = batches.next_batch().await? {
            for row in rows {
                f(row)?;
            }
        }
        Ok(())
    }
}
