//! Where compiled queries are sent.

use futures::future::BoxFuture;
use futures::lock::Mutex;
use futures::stream::{self, BoxStream};
use futures::{FutureExt, StreamExt, TryStreamExt};
use neo4rs::{Graph, Row, Txn};
use neoquery_core::{Params, QueryError};

/// Rows as they come back from the server.
pub type Rows = BoxStream<'static, Result<Row, QueryError>>;

/// Anything that can run Cypher text with parameters and hand back rows.
///
/// Implemented for [`neo4rs::Graph`] and for a [`Txn`] behind a
/// [`futures::lock::Mutex`]. Implement it for a test double to exercise
/// queries without a server.
pub trait Session: Send + Sync {
    fn run<'a>(&'a self, cypher: String, params: Params) -> BoxFuture<'a, Result<Rows, QueryError>>;
}

fn to_driver_query(cypher: &str, params: Params) -> neo4rs::Query {
    let mut query = neo4rs::query(cypher);
    for (k, v) in params {
        query = query.param(&k, v);
    }
    query
}

impl Session for Graph {
    fn run<'a>(&'a self, cypher: String, params: Params) -> BoxFuture<'a, Result<Rows, QueryError>> {
        async move {
            let detached = self.execute(to_driver_query(&cypher, params)).await?;
            Ok(detached.into_stream().map_err(QueryError::from).boxed())
        }
        .boxed()
    }
}

/// Rows are read eagerly, since the transaction handle is needed to pull
/// each one.
impl Session for Mutex<Txn> {
    fn run<'a>(&'a self, cypher: String, params: Params) -> BoxFuture<'a, Result<Rows, QueryError>> {
        async move {
            let mut txn = self.lock().await;
            let mut stream = txn.execute(to_driver_query(&cypher, params)).await?;
            let mut rows = Vec::new();
            while let Some(row) = stream.next(txn.handle()).await? {
                rows.push(Ok(row));
            }
            Ok(stream::iter(rows).boxed())
        }
        .boxed()
    }
}
