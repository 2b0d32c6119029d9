//! Node patterns for `MATCH`, `CREATE` and `MERGE`.

use super::{key_text, Fragment, Scope};
use crate::arg::Arg;
use crate::error::QueryError;

/// What a bare mapping key stands for when the value alone does not decide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Prefer {
    /// `MATCH` reads `n: {...}` as a variable.
    Var,
    /// `CREATE` reads `Person: {...}` as a label.
    Label,
}

/// `CREATE`/`MERGE` with a mapping argument.
///
/// A mapping with nested mappings describes one node per entry; a flat
/// mapping is an anonymous node with those properties.
pub(super) fn create_from_map(scope: &mut Scope<'_>, pairs: &[(Arg, Arg)]) -> Result<Vec<Fragment>, QueryError> {
    if has_nested(pairs) {
        pairs
            .iter()
            .map(|(key, value)| node(scope, key, value, Prefer::Label))
            .collect()
    } else {
        let props = attributes(scope, pairs, "")?;
        Ok(vec![Fragment::text("(").then(props).then_text(")")])
    }
}

/// `(var:Label {prop: $param})` for one mapping entry.
pub(super) fn node(scope: &mut Scope<'_>, key: &Arg, value: &Arg, prefer: Prefer) -> Result<Fragment, QueryError> {
    let key_str = key_text(scope, key)?;

    let (var, label, props, prefix) = match value {
        Arg::Str(_) | Arg::Sym(_) | Arg::Nil | Arg::List(_) => (Some(key_str.as_str()), Some(value), None, key_str.clone()),
        Arg::Map(pairs) => {
            let nested = has_nested(pairs);
            let key_is_var = nested || prefer == Prefer::Var;
            let (label, props) = match pairs.as_slice() {
                [(label, Arg::Map(inner))] => (Some(label), inner.as_slice()),
                _ if !key_is_var => (Some(key), pairs.as_slice()),
                _ => (None, pairs.as_slice()),
            };
            let prefix = if nested {
                let keys = pairs
                    .iter()
                    .map(|(k, _)| key_text(scope, k))
                    .collect::<Result<Vec<_>, _>>()?;
                format!("{key_str}_{}", keys.join("_"))
            } else {
                key_str.clone()
            };
            (key_is_var.then_some(key_str.as_str()), label, Some(props), prefix)
        }
        other => return Err(scope.invalid(other)),
    };

    let label = match label {
        Some(label) => format_label(scope, label)?,
        None => String::new(),
    };
    let mut out = Fragment::text(format!("({}{label}", var.unwrap_or_default()));
    if let Some(props) = props {
        out = out.then(attributes(scope, props, &format!("{prefix}_"))?);
    }
    Ok(out.then_text(")"))
}

fn has_nested(pairs: &[(Arg, Arg)]) -> bool {
    pairs.iter().any(|(_, v)| matches!(v, Arg::Map(_)))
}

/// `:Label` text. Lists concatenate; labels are backquoted unless they
/// contain a space or already start with `:`.
fn format_label(scope: &Scope<'_>, label: &Arg) -> Result<String, QueryError> {
    match label {
        Arg::Nil => Ok(String::new()),
        Arg::List(labels) => Ok(labels
            .iter()
            .map(|l| format_label(scope, l))
            .collect::<Result<Vec<_>, _>>()?
            .concat()),
        other => {
            let text = other.to_text().ok_or_else(|| scope.invalid(other))?;
            let text = text.trim();
            Ok(if text.is_empty() || text.starts_with(':') {
                text.to_owned()
            } else if text.contains(' ') {
                format!(":{text}")
            } else {
                format!(":`{text}`")
            })
        }
    }
}

/// ` {name: $prefix_name, ...}`.
fn attributes(scope: &mut Scope<'_>, pairs: &[(Arg, Arg)], prefix: &str) -> Result<Fragment, QueryError> {
    let mut parts = Vec::with_capacity(pairs.len());
    for (key, value) in pairs {
        let key = key_text(scope, key)?;
        if let Arg::Str(s) = value {
            if is_inline_map(s) {
                parts.push(Fragment::text(format!("{key}: {s}")));
                continue;
            }
        }
        let bolt = scope.param_value(value)?;
        let name = scope.add_param(&collapse_colons(&format!("{prefix}{key}")), bolt);
        parts.push(Fragment::text(format!("{key}: ")).then_param(&name));
    }
    Ok(Fragment::text(" {").then(Fragment::join(parts, ", ")).then_text("}"))
}

/// `{...}` text is a Cypher map literal and is inlined as-is.
fn is_inline_map(s: &str) -> bool {
    s.len() >= 3 && s.starts_with('{') && s.ends_with('}')
}

fn collapse_colons(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_run = false;
    for c in name.chars() {
        if c == ':' {
            if !in_run {
                out.push('_');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}
