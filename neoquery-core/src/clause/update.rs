//! `SET`, `ON CREATE SET`, `ON MATCH SET` and `REMOVE`.

use super::{key_text, predicate, Fragment, Scope};
use crate::arg::Arg;
use crate::error::QueryError;

pub(super) fn set_pair(scope: &mut Scope<'_>, key: &Arg, value: &Arg) -> Result<Vec<Fragment>, QueryError> {
    let key = key_text(scope, key)?;
    set_value(scope, &key, value)
}

fn set_value(scope: &mut Scope<'_>, key: &str, value: &Arg) -> Result<Vec<Fragment>, QueryError> {
    match value {
        Arg::Str(label) | Arg::Sym(label) => Ok(vec![Fragment::text(format!("{key}:`{label}`"))]),
        Arg::Map(_) if scope.whole_object() => {
            let props = scope.param_value(value)?;
            let name = scope.add_param(&format!("{key}_set_props"), props);
            Ok(vec![Fragment::text(format!("{key} = ")).then_param(&name)])
        }
        Arg::Map(props) => {
            let setter = ["setter".to_owned()];
            let mut out = Vec::with_capacity(props.len());
            for (prop, v) in props {
                let prop = key_text(scope, prop)?;
                out.push(predicate::key_value(scope, &format!("{key}.`{prop}`"), v, &setter, true)?);
            }
            Ok(out)
        }
        Arg::List(items) => {
            let mut out = Vec::new();
            for item in items {
                out.extend(set_value(scope, key, item)?);
            }
            Ok(out)
        }
        Arg::Nil => Ok(Vec::new()),
        other => Err(scope.invalid(other)),
    }
}

pub(super) fn remove_pair(scope: &mut Scope<'_>, key: &Arg, value: &Arg) -> Result<Vec<Fragment>, QueryError> {
    let key = key_text(scope, key)?;
    remove_value(scope, &key, value)
}

fn remove_value(scope: &Scope<'_>, key: &str, value: &Arg) -> Result<Vec<Fragment>, QueryError> {
    match value {
        Arg::Str(s) => Ok(vec![Fragment::text(match s.strip_prefix(':') {
            Some(label) => format!("{key}:`{label}`"),
            None => format!("{key}.{s}"),
        })]),
        Arg::Sym(label) => Ok(vec![Fragment::text(format!("{key}:`{label}`"))]),
        Arg::List(items) => {
            let mut out = Vec::new();
            for item in items {
                out.extend(remove_value(scope, key, item)?);
            }
            Ok(out)
        }
        other => Err(scope.invalid(other)),
    }
}
