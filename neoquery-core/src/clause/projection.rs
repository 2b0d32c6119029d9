//! `START`, `WITH`, `ORDER BY`, `RETURN`, `UNWIND`, `SKIP` and `LIMIT`.

use neo4rs::BoltType;

use super::{key_text, Fragment, Scope};
use crate::arg::Arg;
use crate::error::QueryError;

/// `$limit_<n>` / `$skip_<n>`.
pub(super) fn paging(scope: &mut Scope<'_>) -> Result<Fragment, QueryError> {
    let arg = scope.arg;
    let n = match arg {
        Arg::Int(n) => *n,
        Arg::Str(s) => s.trim().parse::<i64>().map_err(|_| scope.invalid(arg))?,
        _ => return Err(scope.invalid(arg)),
    };
    let prefix = scope.kind.keyword().to_lowercase();
    let name = scope.add_param(&format!("{prefix}_{n}"), BoltType::from(n));
    Ok(Fragment::param(name))
}

/// `var.prop`, or `ID(var)` for the `neo_id` pseudo-property.
pub fn property_ref(var: &str, prop: &str) -> String {
    if prop == "neo_id" {
        format!("ID({var})")
    } else {
        format!("{var}.{prop}")
    }
}

fn text_of(scope: &Scope<'_>, value: &Arg) -> Result<String, QueryError> {
    value.as_text().map(str::to_owned).ok_or_else(|| scope.invalid(value))
}

pub(super) fn start_pair(scope: &Scope<'_>, key: &Arg, value: &Arg) -> Result<Fragment, QueryError> {
    let key = key_text(scope, key)?;
    let value = text_of(scope, value)?;
    Ok(Fragment::text(format!("{key} = {value}")))
}

pub(super) fn with_pair(scope: &Scope<'_>, key: &Arg, value: &Arg) -> Result<Fragment, QueryError> {
    let key = key_text(scope, key)?;
    let value = value.to_text().ok_or_else(|| scope.invalid(value))?;
    Ok(Fragment::text(format!("{value} AS {key}")))
}

pub(super) fn order_pair(scope: &Scope<'_>, key: &Arg, value: &Arg) -> Result<Vec<Fragment>, QueryError> {
    let key = key_text(scope, key)?;
    order_value(scope, &key, value)
}

fn order_value(scope: &Scope<'_>, key: &str, value: &Arg) -> Result<Vec<Fragment>, QueryError> {
    match value {
        Arg::Str(prop) | Arg::Sym(prop) => Ok(vec![Fragment::text(property_ref(key, prop))]),
        Arg::List(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Arg::Map(_) => out.extend(order_value(scope, key, item)?),
                    _ => out.push(Fragment::text(property_ref(key, &text_of(scope, item)?))),
                }
            }
            Ok(out)
        }
        Arg::Map(pairs) => pairs
            .iter()
            .map(|(prop, direction)| {
                let prop = key_text(scope, prop)?;
                let direction = text_of(scope, direction)?;
                Ok(Fragment::text(format!("{} {}", property_ref(key, &prop), direction.to_uppercase())))
            })
            .collect(),
        other => Err(scope.invalid(other)),
    }
}

pub(super) fn return_pair(scope: &Scope<'_>, key: &Arg, value: &Arg) -> Result<Fragment, QueryError> {
    let key = key_text(scope, key)?;
    return_value(scope, &key, value)
}

fn return_value(scope: &Scope<'_>, key: &str, value: &Arg) -> Result<Fragment, QueryError> {
    match value {
        Arg::Str(prop) | Arg::Sym(prop) => Ok(Fragment::text(property_ref(key, prop))),
        Arg::List(items) => {
            let parts = items
                .iter()
                .map(|item| return_value(scope, key, item))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Fragment::join(parts, ", "))
        }
        other => Err(scope.invalid(other)),
    }
}

pub(super) fn unwind_pair(scope: &Scope<'_>, key: &Arg, value: &Arg) -> Result<Fragment, QueryError> {
    let key = key_text(scope, key)?;
    let source = match value {
        Arg::Str(s) | Arg::Sym(s) => s.clone(),
        Arg::List(_) => value.to_cypher_literal().ok_or_else(|| scope.invalid(value))?,
        other => return Err(scope.invalid(other)),
    };
    Ok(Fragment::text(format!("{source} AS {key}")))
}
