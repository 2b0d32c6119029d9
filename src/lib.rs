#![doc = r#"
A composable Cypher query builder for Neo4j in Rust.

`neoquery` builds Cypher text from small clause calls, collects every literal
value as a named parameter, and runs the result through [`neo4rs`] 0.8.
Queries are immutable: each builder call returns a new query, so a base query
can be shared and extended.

# Quick start

## Build a query

```rust
use neoquery::prelude::*;

# fn main() -> Result<(), QueryError> {
let q = Query::new()
    .match_(map! { "n" => "Person" })?
    .where_(map! { "n" => map! { "age" => 30 } })?
    .return_("n")?;

assert_eq!(q.to_cypher(), "MATCH (n:`Person`) WHERE (n.age = $n_age) RETURN n");
assert_eq!(q.parameters().len(), 1);
# Ok(())
# }
```

Clauses are rendered in Cypher's canonical order no matter the order they
were added in. `with`, `with_distinct` and `call` start a new statement
segment, so clauses added after them render after them.

```rust
use neoquery::prelude::*;

# fn main() -> Result<(), QueryError> {
let q = Query::new()
    .match_("(n:Person)")?
    .with(sym("n"))?
    .order(map! { "n" => map! { "name" => "desc" } })?
    .limit(10)?
    .return_("n")?;

assert_eq!(
    q.to_cypher(),
    "MATCH (n:Person) WITH n ORDER BY n.name DESC LIMIT $limit_10 RETURN n"
);
# Ok(())
# }
```

## Arguments

Every clause method takes anything convertible into an [`Arg`]: raw text
(`&str`, `String`), bare identifiers ([`sym`]), numbers, ordered mappings
built with [`map!`], lists built with [`args!`] or `Vec`s, ranges and
regular expressions ([`Arg::regex`]).

## Placeholders and named parameters

```rust
use neoquery::prelude::*;

# fn main() -> Result<(), QueryError> {
let q = Query::new().where_(args!["q.age > ?", 30])?;
assert_eq!(q.to_cypher(), "WHERE (q.age > $question_mark_param)");

let q = Query::new().where_(args!["q.age > $age", map! { "age" => 30 }])?;
assert_eq!(q.to_cypher(), "WHERE (q.age > $age)");
# Ok(())
# }
```

## Writing data with `Properties`

```rust
use neoquery::prelude::*;

#[derive(Properties)]
#[neoquery(label = "Person")]
struct Person {
    name: String,
    age: i64,
}

# fn main() -> Result<(), QueryError> {
let q = Query::new().create(map! { "p" => Person { name: "Ann".into(), age: 41 } })?;
assert_eq!(
    q.to_cypher(),
    "CREATE (p:`Person` {name: $p_Person_name, age: $p_Person_age})"
);
# Ok(())
# }
```

## Execute queries

Anything implementing [`Session`] can run a query: a [`neo4rs::Graph`], or a
[`neo4rs::Txn`] behind a `futures::lock::Mutex`.

```rust,no_run
use neoquery::prelude::*;

# async fn example(graph: &neo4rs::Graph) -> Result<(), QueryError> {
let people = Query::new().match_("(n:Person)")?;

let total = people.count(graph, Some("n")).await?;
let names: Vec<String> = people.pluck(graph, &["n.name"]).await?;
let first: Option<neo4rs::Row> = people.return_("n")?.first(graph).await?;

let mut batches = people.return_("n")?.find_in_batches(graph, "n", "uuid", BatchOptions::default())?;
while let Some(rows) = batches.next_batch().await? {
    println!("{} rows", rows.len());
}
# Ok(())
# }
```

# Error handling

Builder calls fail with [`QueryError::InvalidArgument`] naming the clause
keyword, the full argument and the offending part. Driver failures come
back as [`QueryError::Neo4j`].

[`neo4rs`]: https://docs.rs/neo4rs
"#]

pub mod batches;
mod execute;
pub mod prelude;
pub mod query;
pub mod session;
pub mod stream;

pub use neoquery_core as core;
pub use neoquery_core::{args, map, record, sym, Arg, ClauseKind, FromRow, FromValue, ParameterTable, Params, Properties as PropertiesTrait, QueryError};
pub use neoquery_macros::Properties;

pub use batches::{BatchOptions, Batches};
pub use query::{Query, QueryOptions};
pub use session::Session;
pub use stream::RowStream;
