//! Clause variants and their argument interpreters.
//!
//! A [`Clause`] is one application of a Cypher keyword. It is interpreted
//! eagerly when it is built: literal values are registered in the query's
//! [`ParameterTable`] and the clause keeps only [`Fragment`]s of Cypher text
//! that refer to those parameters by name. Rendering a clause later is a pure
//! function of its fragments.

mod pattern;
mod predicate;
mod projection;
mod update;

pub use predicate::parameterize_key;
pub use projection::property_ref;

use std::collections::HashMap;

use neo4rs::BoltType;

use crate::arg::Arg;
use crate::error::QueryError;
use crate::params::ParameterTable;

const COMMA_SPACE: &str = ", ";
const AND: &str = " AND ";
const PRETTY_NEW_LINE: &str = "\n  ";

mod ansi {
    pub const CLEAR: &str = "\x1b[0m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
}

/// Every keyword a query can carry, in the order kinds are rendered inside
/// one statement segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClauseKind {
    Start,
    Match,
    OptionalMatch,
    Call,
    Using,
    Where,
    Create,
    /// Legacy alias; renders as `MERGE`.
    CreateUnique,
    Merge,
    Set,
    OnCreateSet,
    OnMatchSet,
    Remove,
    Unwind,
    Delete,
    DetachDelete,
    With,
    WithDistinct,
    Return,
    Order,
    Skip,
    Limit,
}

impl ClauseKind {
    /// Canonical render order.
    pub const ALL: [ClauseKind; 22] = [
        ClauseKind::Start,
        ClauseKind::Match,
        ClauseKind::OptionalMatch,
        ClauseKind::Call,
        ClauseKind::Using,
        ClauseKind::Where,
        ClauseKind::Create,
        ClauseKind::CreateUnique,
        ClauseKind::Merge,
        ClauseKind::Set,
        ClauseKind::OnCreateSet,
        ClauseKind::OnMatchSet,
        ClauseKind::Remove,
        ClauseKind::Unwind,
        ClauseKind::Delete,
        ClauseKind::DetachDelete,
        ClauseKind::With,
        ClauseKind::WithDistinct,
        ClauseKind::Return,
        ClauseKind::Order,
        ClauseKind::Skip,
        ClauseKind::Limit,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            ClauseKind::Start => "START",
            ClauseKind::Match => "MATCH",
            ClauseKind::OptionalMatch => "OPTIONAL MATCH",
            ClauseKind::Call => "CALL",
            ClauseKind::Using => "USING",
            ClauseKind::Where => "WHERE",
            ClauseKind::Create => "CREATE",
            ClauseKind::CreateUnique | ClauseKind::Merge => "MERGE",
            ClauseKind::Set => "SET",
            ClauseKind::OnCreateSet => "ON CREATE SET",
            ClauseKind::OnMatchSet => "ON MATCH SET",
            ClauseKind::Remove => "REMOVE",
            ClauseKind::Unwind => "UNWIND",
            ClauseKind::Delete => "DELETE",
            ClauseKind::DetachDelete => "DETACH DELETE",
            ClauseKind::With => "WITH",
            ClauseKind::WithDistinct => "WITH DISTINCT",
            ClauseKind::Return => "RETURN",
            ClauseKind::Order => "ORDER BY",
            ClauseKind::Skip => "SKIP",
            ClauseKind::Limit => "LIMIT",
        }
    }

    /// Separator between clauses of this kind inside one segment.
    fn join(self) -> &'static str {
        match self {
            ClauseKind::Where => AND,
            ClauseKind::Call => " CALL ",
            ClauseKind::Using => " USING ",
            ClauseKind::CreateUnique | ClauseKind::Merge => " MERGE ",
            ClauseKind::Unwind => " UNWIND ",
            ClauseKind::Skip | ClauseKind::Limit => "",
            _ => COMMA_SPACE,
        }
    }

    fn color(self) -> &'static str {
        match self {
            ClauseKind::Create => ansi::GREEN,
            ClauseKind::CreateUnique | ClauseKind::Merge => ansi::MAGENTA,
            ClauseKind::Delete | ClauseKind::DetachDelete => ansi::RED,
            ClauseKind::Set | ClauseKind::OnCreateSet | ClauseKind::OnMatchSet => ansi::YELLOW,
            _ => ansi::CYAN,
        }
    }

    /// Kinds that always open a fresh statement segment.
    pub fn starts_statement(self) -> bool {
        matches!(self, ClauseKind::With | ClauseKind::WithDistinct | ClauseKind::Call)
    }

    pub fn is_with(self) -> bool {
        matches!(self, ClauseKind::With | ClauseKind::WithDistinct)
    }

    /// `ORDER BY`, `SKIP` and `LIMIT`.
    pub fn is_paging(self) -> bool {
        matches!(self, ClauseKind::Order | ClauseKind::Skip | ClauseKind::Limit)
    }

    /// Render all clauses of this kind from one segment, e.g.
    /// `MATCH (n), (m)`. Returns `None` when they contribute no text.
    pub fn render(self, clauses: &[&Clause], pretty: bool) -> Option<String> {
        let strings: Vec<String> = match self {
            ClauseKind::Where => clauses
                .iter()
                .flat_map(|clause| {
                    clause
                        .fragments
                        .iter()
                        .map(Fragment::render)
                        .filter(|s| !s.is_empty())
                        .map(move |s| {
                            let wrapped = if paren_surrounded(&s) { s } else { format!("({s})") };
                            if clause.negated {
                                format!("NOT{wrapped}")
                            } else {
                                wrapped
                            }
                        })
                })
                .collect(),
            // only the last LIMIT/SKIP of a segment takes effect
            ClauseKind::Skip | ClauseKind::Limit => clauses
                .last()
                .map(|clause| clause.fragments.iter().map(Fragment::render).collect())
                .unwrap_or_default(),
            _ => clauses
                .iter()
                .flat_map(|clause| clause.fragments.iter().map(Fragment::render))
                .filter(|s| !s.is_empty())
                .collect(),
        };

        let join = if pretty {
            format!("{}{PRETTY_NEW_LINE}", self.join())
        } else {
            self.join().to_owned()
        };
        let joined = strings.join(&join);
        let body = joined.trim();
        if body.is_empty() {
            return None;
        }
        let body = if pretty && strings.len() > 1 {
            format!("{PRETTY_NEW_LINE}{body}")
        } else {
            body.to_owned()
        };
        let keyword = if pretty {
            format!("{}{}{}", self.color(), self.keyword(), ansi::CLEAR)
        } else {
            self.keyword().to_owned()
        };
        Some(format!("{keyword} {body}"))
    }

    /// Auto-generated `limit_<n>` / `skip_<n>` parameters of every clause but
    /// the last one in `clauses`. Those values are never rendered.
    pub fn superseded_params(self, clauses: &[&Clause]) -> Vec<String> {
        let prefix = match self {
            ClauseKind::Limit => "limit_",
            ClauseKind::Skip => "skip_",
            _ => return Vec::new(),
        };
        let Some((_, earlier)) = clauses.split_last() else {
            return Vec::new();
        };
        earlier
            .iter()
            .flat_map(|clause| clause.params_added.iter())
            .filter(|name| {
                name.strip_prefix(prefix)
                    .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
            })
            .cloned()
            .collect()
    }
}

fn paren_surrounded(s: &str) -> bool {
    let t = s.trim();
    t.len() >= 3 && t.starts_with('(') && t.ends_with(')')
}

// ---------------------------------------------------------------------------
// Fragments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum Piece {
    Text(String),
    Param(String),
}

/// A piece of Cypher text with structured references to named parameters.
///
/// Keeping parameter references structured lets a query re-point them when
/// two queries with colliding parameter names are combined.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fragment {
    pieces: Vec<Piece>,
}

impl Fragment {
    pub fn text(s: impl Into<String>) -> Self {
        Fragment { pieces: vec![Piece::Text(s.into())] }
    }

    /// A bare `$name` reference.
    pub fn param(name: impl Into<String>) -> Self {
        Fragment { pieces: vec![Piece::Param(name.into())] }
    }

    pub fn then_text(mut self, s: &str) -> Self {
        match self.pieces.last_mut() {
            Some(Piece::Text(t)) => t.push_str(s),
            _ => self.pieces.push(Piece::Text(s.to_owned())),
        }
        self
    }

    pub fn then_param(mut self, name: &str) -> Self {
        self.pieces.push(Piece::Param(name.to_owned()));
        self
    }

    pub fn then(mut self, other: Fragment) -> Self {
        for piece in other.pieces {
            self = match piece {
                Piece::Text(t) => self.then_text(&t),
                Piece::Param(p) => self.then_param(&p),
            };
        }
        self
    }

    pub fn join(parts: impl IntoIterator<Item = Fragment>, separator: &str) -> Self {
        let mut out = Fragment::default();
        for (i, part) in parts.into_iter().enumerate() {
            if i > 0 {
                out = out.then_text(separator);
            }
            out = out.then(part);
        }
        out
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Text(t) => out.push_str(t),
                Piece::Param(p) => {
                    out.push('$');
                    out.push_str(p);
                }
            }
        }
        out
    }

    /// Names of the parameters referenced by this fragment.
    pub fn params(&self) -> impl Iterator<Item = &str> {
        self.pieces.iter().filter_map(|piece| match piece {
            Piece::Param(p) => Some(p.as_str()),
            Piece::Text(_) => None,
        })
    }

    fn rename(&mut self, renames: &HashMap<String, String>) {
        for piece in &mut self.pieces {
            if let Piece::Param(p) = piece {
                if let Some(new_name) = renames.get(p.as_str()) {
                    *p = new_name.clone();
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Clauses
// ---------------------------------------------------------------------------

/// Per-clause switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClauseOptions {
    /// Wrap each `WHERE` fragment in `NOT(...)`.
    pub negate: bool,
    /// `SET var = $param` with the whole mapping as one value.
    pub set_props: bool,
}

/// One interpreted keyword application.
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    kind: ClauseKind,
    fragments: Vec<Fragment>,
    negated: bool,
    params_added: Vec<String>,
}

impl Clause {
    /// Interpret a (possibly list-valued) builder argument into clauses.
    ///
    /// Lists are flattened so each element becomes its own clause. Blank
    /// elements contribute nothing.
    pub fn from_args(
        kind: ClauseKind,
        args: Arg,
        params: &mut ParameterTable,
        options: ClauseOptions,
    ) -> Result<Vec<Clause>, QueryError> {
        if kind == ClauseKind::Where {
            if let Some(clause) = predicate::from_placeholder_args(&args, params, options)? {
                return Ok(vec![clause]);
            }
        }
        let mut clauses = Vec::new();
        for arg in args.flatten() {
            if let Some(clause) = Clause::from_arg(kind, &arg, params, options)? {
                clauses.push(clause);
            }
        }
        Ok(clauses)
    }

    /// Interpret one argument. Returns `Ok(None)` for blank arguments.
    pub fn from_arg(
        kind: ClauseKind,
        arg: &Arg,
        params: &mut ParameterTable,
        options: ClauseOptions,
    ) -> Result<Option<Clause>, QueryError> {
        if arg.is_blank() {
            // nil still overrides an earlier LIMIT/SKIP, rendering nothing
            if matches!(arg, Arg::Nil) && matches!(kind, ClauseKind::Skip | ClauseKind::Limit) {
                return Ok(Some(Scope::new(kind, arg, params, options).finish(Vec::new())));
            }
            return Ok(None);
        }
        let mut scope = Scope::new(kind, arg, params, options);
        let fragments = interpret(&mut scope)?;
        Ok(Some(scope.finish(fragments)))
    }

    pub fn kind(&self) -> ClauseKind {
        self.kind
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Parameter names this clause registered, in registration order.
    pub fn params_added(&self) -> &[String] {
        &self.params_added
    }

    /// Re-point parameter references after a rename.
    pub fn rename_params(&mut self, renames: &HashMap<String, String>) {
        for fragment in &mut self.fragments {
            fragment.rename(renames);
        }
        for name in &mut self.params_added {
            if let Some(new_name) = renames.get(name.as_str()) {
                *name = new_name.clone();
            }
        }
    }
}

/// Interpretation state for one clause under construction.
pub(crate) struct Scope<'a> {
    kind: ClauseKind,
    arg: &'a Arg,
    params: &'a mut ParameterTable,
    options: ClauseOptions,
    added: Vec<String>,
}

impl<'a> Scope<'a> {
    fn new(kind: ClauseKind, arg: &'a Arg, params: &'a mut ParameterTable, options: ClauseOptions) -> Self {
        Scope { kind, arg, params, options, added: Vec::new() }
    }

    fn add_param(&mut self, name: &str, value: BoltType) -> String {
        let resolved = self.params.add(name, value);
        self.added.push(resolved.clone());
        resolved
    }

    fn param_value(&self, value: &Arg) -> Result<BoltType, QueryError> {
        value.to_param().ok_or_else(|| self.invalid(value))
    }

    fn invalid(&self, part: &Arg) -> QueryError {
        let part = (part != self.arg).then(|| part.to_string());
        QueryError::invalid_argument(self.kind.keyword(), self.arg.to_string(), part)
    }

    fn whole_object(&self) -> bool {
        self.kind == ClauseKind::Set && self.options.set_props
    }

    fn finish(self, fragments: Vec<Fragment>) -> Clause {
        Clause {
            kind: self.kind,
            fragments,
            negated: self.kind == ClauseKind::Where && self.options.negate,
            params_added: self.added,
        }
    }
}

/// Key of a mapping entry as text. Label lists join with `_`.
fn key_text(scope: &Scope<'_>, key: &Arg) -> Result<String, QueryError> {
    match key {
        Arg::List(keys) => Ok(keys
            .iter()
            .map(|k| key_text(scope, k))
            .collect::<Result<Vec<_>, _>>()?
            .join("_")),
        other => other.to_text().ok_or_else(|| scope.invalid(other)),
    }
}

fn interpret(scope: &mut Scope<'_>) -> Result<Vec<Fragment>, QueryError> {
    use ClauseKind::*;

    let arg = scope.arg;
    match (scope.kind, arg) {
        (Limit | Skip, _) => projection::paging(scope).map(|f| vec![f]),
        (_, Arg::Str(s)) => Ok(vec![Fragment::text(s.as_str())]),
        (Match | OptionalMatch, Arg::Sym(s)) => Ok(vec![Fragment::text(format!("({s})"))]),
        (Create | CreateUnique | Merge, Arg::Sym(s)) => Ok(vec![Fragment::text(format!("(:{s})"))]),
        (Start | With | WithDistinct | Delete | DetachDelete | Order | Return, Arg::Sym(s)) => {
            Ok(vec![Fragment::text(s.as_str())])
        }
        (Create | CreateUnique | Merge, Arg::Map(pairs)) => pattern::create_from_map(scope, pairs),
        (_, Arg::Map(pairs)) => {
            let mut fragments = Vec::new();
            for (key, value) in pairs {
                fragments.extend(from_key_and_value(scope, key, value)?);
            }
            Ok(fragments)
        }
        _ => Err(scope.invalid(arg)),
    }
}

fn from_key_and_value(scope: &mut Scope<'_>, key: &Arg, value: &Arg) -> Result<Vec<Fragment>, QueryError> {
    use ClauseKind::*;

    match scope.kind {
        Match | OptionalMatch => Ok(vec![pattern::node(scope, key, value, pattern::Prefer::Var)?]),
        Where => {
            let key = key_text(scope, key)?;
            Ok(vec![predicate::pair(scope, &key, value, &[])?])
        }
        Set | OnCreateSet | OnMatchSet => update::set_pair(scope, key, value),
        Remove => update::remove_pair(scope, key, value),
        Start => projection::start_pair(scope, key, value).map(|f| vec![f]),
        With | WithDistinct => projection::with_pair(scope, key, value).map(|f| vec![f]),
        Order => projection::order_pair(scope, key, value),
        Return => projection::return_pair(scope, key, value).map(|f| vec![f]),
        Unwind => projection::unwind_pair(scope, key, value).map(|f| vec![f]),
        Call | Using | Delete | DetachDelete | Create | CreateUnique | Merge | Skip | Limit => {
            Err(scope.invalid(scope.arg))
        }
    }
}
