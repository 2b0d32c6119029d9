//! `WHERE` predicates, and the `key = $param` form `SET` shares with them.

use neo4rs::BoltType;

use super::{key_text, Clause, ClauseKind, ClauseOptions, Fragment, Scope, AND};
use crate::arg::Arg;
use crate::error::QueryError;
use crate::params::ParameterTable;

const QUESTION_MARK_PARAM: &str = "question_mark_param";

/// One `key => value` predicate. `previous` holds the enclosing keys of
/// nested mappings and feeds the generated parameter name.
pub(super) fn pair(scope: &mut Scope<'_>, key: &str, value: &Arg, previous: &[String]) -> Result<Fragment, QueryError> {
    match value {
        Arg::Map(pairs) => nested(scope, key, pairs, previous),
        Arg::Nil => Ok(Fragment::text(format!("{key} IS NULL"))),
        Arg::Regex { pattern, case_insensitive } => {
            let pattern = if *case_insensitive { format!("(?i){pattern}") } else { pattern.clone() };
            let name = scope.add_param(&param_name(previous, key), BoltType::from(pattern));
            Ok(Fragment::text(format!("{key} =~ ")).then_param(&name))
        }
        _ => key_value(scope, key, value, previous, false),
    }
}

fn nested(scope: &mut Scope<'_>, key: &str, pairs: &[(Arg, Arg)], previous: &[String]) -> Result<Fragment, QueryError> {
    let mut path = previous.to_vec();
    path.push(key.to_owned());

    let mut parts = Vec::with_capacity(pairs.len());
    for (k, v) in pairs {
        let k = key_text(scope, k)?;
        if k == "neo_id" {
            let ids = neo_ids(scope, v)?;
            parts.push(key_value(scope, &format!("ID({key})"), &ids, &[], false)?);
        } else {
            parts.push(Fragment::text(format!("{key}.")).then(pair(scope, &k, v, &path)?));
        }
    }
    Ok(Fragment::join(parts, AND))
}

/// Node ids are always compared as integers.
fn neo_ids(scope: &Scope<'_>, value: &Arg) -> Result<Arg, QueryError> {
    let items: Vec<&Arg> = match value {
        Arg::List(xs) => xs.iter().collect(),
        other => vec![other],
    };
    let ids = items
        .into_iter()
        .map(|item| {
            let id = match item {
                Arg::Int(i) => Some(*i),
                Arg::Str(s) => s.trim().parse().ok(),
                Arg::Value(BoltType::Integer(i)) => Some(i.value),
                Arg::Value(BoltType::Node(n)) => Some(n.id.value),
                _ => None,
            };
            id.map(Arg::Int).ok_or_else(|| scope.invalid(item))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Arg::List(ids))
}

/// `key = $param`, or `key IN $param` for list values outside of `SET`.
///
/// A one-element list collapses to its element. Ranges expand to a pair of
/// bounds.
pub(super) fn key_value(
    scope: &mut Scope<'_>,
    key: &str,
    value: &Arg,
    previous: &[String],
    is_set: bool,
) -> Result<Fragment, QueryError> {
    let param = param_name(previous, key);

    if let Arg::Range { start, end, exclusive } = value {
        if is_set {
            return Err(scope.invalid(value));
        }
        let min = scope.param_value(start)?;
        let max = scope.param_value(end)?;
        let min_name = scope.add_param(&format!("{param}_range_min"), min);
        let max_name = scope.add_param(&format!("{param}_range_max"), max);
        let bound = match previous.last() {
            Some(parent) => format!("{parent}.{key}"),
            None => key.to_owned(),
        };
        let op = if *exclusive { "<" } else { "<=" };
        return Ok(Fragment::text(format!("{key} >= "))
            .then_param(&min_name)
            .then_text(&format!(" AND {bound} {op} "))
            .then_param(&max_name));
    }

    let value = match value {
        Arg::List(xs) if !is_set && xs.len() == 1 => &xs[0],
        other => other,
    };
    let op = if matches!(value, Arg::List(_)) && !is_set { "IN" } else { "=" };
    let bolt = scope.param_value(value)?;
    let name = scope.add_param(&param, bolt);
    Ok(Fragment::text(format!("{key} {op} ")).then_param(&name))
}

fn param_name(previous: &[String], key: &str) -> String {
    let mut path = previous.join("_");
    if !path.is_empty() {
        path.push('_');
    }
    path.push_str(key);
    parameterize_key(&path)
}

/// Squeeze every run of non-alphanumerics to `_` and trim `_` at both ends.
///
/// ```rust
/// use neoquery_core::clause::parameterize_key;
///
/// assert_eq!(parameterize_key("ID(q)"), "ID_q");
/// assert_eq!(parameterize_key("setter_n.`name`"), "setter_n_name");
/// ```
pub fn parameterize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut in_run = false;
    for c in key.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }
    out.trim_matches('_').to_owned()
}

/// `where_(("q.age > ?", 30))` and `where_(("q.age > $age", map!{"age" => 30}))`.
///
/// Returns `Ok(None)` when `args` is not one of these forms and should be
/// interpreted argument by argument.
pub(super) fn from_placeholder_args(
    args: &Arg,
    params: &mut ParameterTable,
    options: ClauseOptions,
) -> Result<Option<Clause>, QueryError> {
    let items: Vec<&Arg> = match args {
        Arg::List(xs) => xs.iter().collect(),
        other => vec![other],
    };
    let Some(Arg::Str(text)) = items.first().copied() else {
        return Ok(None);
    };
    let bound = items.get(1).copied();
    let marks = placeholder_positions(text);
    if marks.is_empty() && !matches!(bound, Some(Arg::Map(_))) {
        return Ok(None);
    }

    let mut scope = Scope::new(ClauseKind::Where, args, params, options);
    let fragment = match bound {
        Some(Arg::Map(pairs)) => {
            for (k, v) in pairs {
                let name = key_text(&scope, k)?;
                let value = scope.param_value(v)?;
                scope.add_param(&name, value);
            }
            Fragment::text(text.as_str())
        }
        _ => {
            let value = scope.param_value(bound.unwrap_or(&Arg::Nil))?;
            let name = scope.add_param(QUESTION_MARK_PARAM, value);
            substitute(text, &marks, &name)
        }
    };
    Ok(Some(scope.finish(vec![fragment])))
}

/// Byte offsets of `?` placeholders standing alone: preceded by start, `(`
/// or whitespace and followed by end, `)` or whitespace.
fn placeholder_positions(text: &str) -> Vec<usize> {
    text.char_indices()
        .filter(|&(i, c)| {
            c == '?'
                && text[..i].chars().next_back().map_or(true, |p| p == '(' || p.is_whitespace())
                && text[i + 1..].chars().next().map_or(true, |n| n == ')' || n.is_whitespace())
        })
        .map(|(i, _)| i)
        .collect()
}

fn substitute(text: &str, marks: &[usize], name: &str) -> Fragment {
    let mut out = Fragment::text("");
    let mut last = 0;
    for &i in marks {
        out = out.then_text(&text[last..i]).then_param(name);
        last = i + 1;
    }
    out.then_text(&text[last..])
}
