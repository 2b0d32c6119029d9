//! The immutable query builder.

use std::collections::HashMap;
use std::fmt;
use std::ops::BitAnd;

use neo4rs::BoltType;
use neoquery_core::{partition, Arg, Clause, ClauseKind, ClauseOptions, ParameterTable, Params, QueryError};
use tracing::trace;

/// Options that apply to a whole query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Prefix the compiled text with `CYPHER <parser>`.
    pub parser: Option<String>,
}

/// A Cypher query under construction.
///
/// Every builder method leaves `self` untouched and returns a new query, so a
/// partially built query can be shared and extended in several directions.
/// Argument problems are reported by the builder call that received them.
///
/// ```rust
/// use neoquery::prelude::*;
///
/// # fn main() -> Result<(), QueryError> {
/// let q = Query::new()
///     .match_(map! { "q" => map! { "Person" => map! { "age" => 41 } } })?
///     .return_("q")?;
/// assert_eq!(q.to_cypher(), "MATCH (q:`Person` {age: $q_Person_age}) RETURN q");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Default)]
pub struct Query {
    clauses: Vec<Option<Clause>>,
    params: ParameterTable,
    options: QueryOptions,
}

macro_rules! clause_methods {
    ($( $(#[$meta:meta])* $method:ident => $kind:ident $({ $($opt:ident),* })?; )*) => {
        $(
            $(#[$meta])*
            pub fn $method(&self, args: impl Into<Arg>) -> Result<Query, QueryError> {
                #[allow(unused_mut)]
                let mut options = ClauseOptions::default();
                $($(options.$opt = true;)*)?
                self.add_clauses(ClauseKind::$kind, args.into(), options)
            }
        )*
    };
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: QueryOptions) -> Self {
        Query { options, ..Self::default() }
    }

    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    clause_methods! {
        /// `START`. Legacy, kept for old schemas.
        start => Start;
        /// `MATCH`. Mappings describe nodes: `map!{"n" => "Person"}` is ``(n:`Person`)``.
        match_ => Match;
        optional_match => OptionalMatch;
        /// `WHERE`. Accepts raw predicates, `(text, value)` pairs with `?`
        /// placeholders, `(text, map)` pairs of named parameters, and nested
        /// mappings of `var => {prop => value}`.
        where_ => Where;
        /// `WHERE NOT(...)`.
        where_not => Where { negate };
        create => Create;
        create_unique => CreateUnique;
        merge => Merge;
        /// `SET` labels or properties, one `var.prop = $param` per property.
        set => Set;
        /// `SET var = $var_set_props`, replacing all properties at once.
        set_props => Set { set_props };
        on_create_set => OnCreateSet;
        on_match_set => OnMatchSet;
        remove => Remove;
        delete => Delete;
        detach_delete => DetachDelete;
        unwind => Unwind;
        /// `WITH`. Always opens a new statement segment.
        with => With;
        with_distinct => WithDistinct;
        return_ => Return;
        order => Order;
        order_by => Order;
        skip => Skip;
        offset => Skip;
        limit => Limit;
        /// `CALL`. Always opens a new statement segment.
        call => Call;
        using => Using;
    }

    fn add_clauses(&self, kind: ClauseKind, args: Arg, options: ClauseOptions) -> Result<Query, QueryError> {
        let mut next = self.clone();
        let clauses = Clause::from_args(kind, args, &mut next.params, options)?;
        let breaks = kind.starts_statement();
        if breaks {
            next.clauses.push(None);
        }
        next.clauses.extend(clauses.into_iter().map(Some));
        if breaks {
            next.clauses.push(None);
        }
        Ok(next)
    }

    /// Force a statement break, so later clauses render after everything
    /// so far.
    pub fn break_(&self) -> Query {
        let mut next = self.clone();
        next.clauses.push(None);
        next
    }

    /// Replace every `ORDER BY` so far.
    pub fn reorder(&self, args: impl Into<Arg>) -> Result<Query, QueryError> {
        self.without(ClauseKind::Order).order(args)
    }

    /// A copy with every clause of `kind` removed. Breaks are kept.
    pub fn without(&self, kind: ClauseKind) -> Query {
        let mut next = self.clone();
        next.clauses.retain(|c| c.as_ref().map_or(true, |c| c.kind() != kind));
        next
    }

    /// Bind named parameters for raw text clauses. Names already in use are
    /// stored under a numbered variant.
    pub fn params<K, V>(&self, params: impl IntoIterator<Item = (K, V)>) -> Query
    where
        K: Into<String>,
        V: Into<BoltType>,
    {
        let mut next = self.clone();
        next.params.add_many(params);
        next
    }

    /// `MATCH (var)` plus `WHERE ID(var) = $ID_var` for each entry.
    pub fn match_nodes<K, V>(&self, nodes: impl IntoIterator<Item = (K, V)>) -> Result<Query, QueryError>
    where
        K: Into<String>,
        V: Into<Arg>,
    {
        self.match_nodes_with(nodes, ClauseKind::Match)
    }

    /// [`match_nodes`](Self::match_nodes) with `OPTIONAL MATCH`.
    pub fn optional_match_nodes<K, V>(&self, nodes: impl IntoIterator<Item = (K, V)>) -> Result<Query, QueryError>
    where
        K: Into<String>,
        V: Into<Arg>,
    {
        self.match_nodes_with(nodes, ClauseKind::OptionalMatch)
    }

    fn match_nodes_with<K, V>(&self, nodes: impl IntoIterator<Item = (K, V)>, kind: ClauseKind) -> Result<Query, QueryError>
    where
        K: Into<String>,
        V: Into<Arg>,
    {
        let mut query = self.clone();
        for (var, node) in nodes {
            let var = var.into();
            let id_filter = Arg::Map(vec![(Arg::Str("neo_id".to_owned()), node.into())]);
            query = query
                .add_clauses(kind, Arg::Sym(var.clone()), ClauseOptions::default())?
                .where_(Arg::Map(vec![(Arg::Str(var), id_filter)]))?;
        }
        Ok(query)
    }

    /// Whether any clause of `kind` has been added.
    pub fn has_clause(&self, kind: ClauseKind) -> bool {
        self.clauses.iter().flatten().any(|c| c.kind() == kind)
    }

    /// Combine two queries: `other`'s clauses follow `self`'s.
    ///
    /// Parameters of `other` that collide with names already in `self` are
    /// renamed, and `other`'s clauses are re-pointed at the new names.
    pub fn and(&self, other: &Query) -> Query {
        let mut merged = self.clone();
        let mut renames = HashMap::new();
        for (name, value) in other.params.iter() {
            let resolved = merged.params.add(name, value.clone());
            if resolved != name {
                renames.insert(name.to_owned(), resolved);
            }
        }
        if !renames.is_empty() {
            trace!(renamed = renames.len(), "renamed colliding parameters while merging queries");
        }
        merged.clauses.extend(other.clauses.iter().map(|entry| {
            entry.clone().map(|mut clause| {
                clause.rename_params(&renames);
                clause
            })
        }));
        if merged.options.parser.is_none() {
            merged.options.parser = other.options.parser.clone();
        }
        merged
    }

    /// Compile to Cypher text.
    pub fn to_cypher(&self) -> String {
        self.render(false)
    }

    /// Compile with one clause per line and ANSI-colored keywords.
    pub fn to_cypher_pretty(&self) -> String {
        self.render(true)
    }

    fn render(&self, pretty: bool) -> String {
        let mut parts = Vec::new();
        for segment in partition(&self.clauses) {
            for kind in ClauseKind::ALL {
                let group = of_kind(&segment, kind);
                if group.is_empty() {
                    continue;
                }
                if let Some(text) = kind.render(&group, pretty) {
                    parts.push(text);
                }
            }
        }
        let body = parts.join(if pretty { "\n" } else { " " });
        match &self.options.parser {
            Some(parser) => format!("CYPHER {parser} {body}").trim().to_owned(),
            None => body,
        }
    }

    /// Parameters the compiled text refers to.
    ///
    /// Values of `LIMIT`/`SKIP` clauses overridden by a later one in the
    /// same segment are left out.
    pub fn parameters(&self) -> Params {
        let mut table = self.params.snapshot();
        for segment in partition(&self.clauses) {
            for kind in [ClauseKind::Skip, ClauseKind::Limit] {
                for name in kind.superseded_params(&of_kind(&segment, kind)) {
                    table.remove(&name);
                }
            }
        }
        table.to_map()
    }

    /// Every parameter registered so far, in registration order.
    pub fn parameter_table(&self) -> &ParameterTable {
        &self.params
    }

    /// `<self> UNION <other>`, or `UNION ALL` when `all` is set.
    pub fn union_cypher(&self, other: &Query, all: bool) -> String {
        format!(
            "{} UNION{} {}",
            self.to_cypher(),
            if all { " ALL" } else { "" },
            other.to_cypher()
        )
    }
}

fn of_kind<'a>(segment: &[&'a Clause], kind: ClauseKind) -> Vec<&'a Clause> {
    segment.iter().copied().filter(|c| c.kind() == kind).collect()
}

impl BitAnd<&Query> for &Query {
    type Output = Query;

    fn bitand(self, rhs: &Query) -> Query {
        self.and(rhs)
    }
}

impl BitAnd for Query {
    type Output = Query;

    fn bitand(self, rhs: Query) -> Query {
        self.and(&rhs)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_cypher())
    }
}

impl fmt::Debug for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("cypher", &self.to_cypher())
            .field("params", &self.params)
            .finish()
    }
}
