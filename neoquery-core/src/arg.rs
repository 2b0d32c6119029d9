//! Builder arguments.
//!
//! Every clause method on a query accepts an [`Arg`]. The variants mirror the
//! argument shapes Cypher builders are usually fed: raw text, bare
//! identifiers, literal values, ordered mappings and lists, plus the two
//! predicate-only shapes (regular expressions and ranges).
//!
//! ```rust
//! use neoquery_core::{args, map, sym, Arg};
//!
//! // (n:`Person` {name: $n_Person_name})
//! let pattern = map! { "n" => map! { "Person" => map! { "name" => "Brian" } } };
//!
//! // several arguments at once, e.g. `delete("n", :o)`
//! let targets = args!["n", sym("o")];
//! assert!(matches!(targets, Arg::List(ref xs) if xs.len() == 2));
//! # let _ = pattern;
//! ```

use std::fmt;

use neo4rs::{BoltList, BoltMap, BoltNull, BoltString, BoltType};

/// A single builder argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// Absence of a value. Renders as `IS NULL` in predicates, contributes
    /// nothing elsewhere.
    Nil,
    /// Raw Cypher text at the top level, a string value inside mappings.
    Str(String),
    /// A bare identifier (`n` rather than `"n"`).
    Sym(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(Vec<Arg>),
    /// Ordered key/value pairs. Keys are arguments too so a list of labels
    /// can be used as a key.
    Map(Vec<(Arg, Arg)>),
    Regex {
        pattern: String,
        case_insensitive: bool,
    },
    Range {
        start: Box<Arg>,
        end: Box<Arg>,
        exclusive: bool,
    },
    /// An opaque driver value, passed through as a parameter.
    Value(BoltType),
}

/// Shorthand for [`Arg::Sym`].
pub fn sym(name: impl Into<String>) -> Arg {
    Arg::Sym(name.into())
}

/// Build an [`Arg::Map`] from `key => value` pairs, preserving their order.
#[macro_export]
macro_rules! map {
    () => {
        $crate::Arg::Map(::std::vec::Vec::new())
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::Arg::Map(::std::vec![$(($crate::Arg::from($key), $crate::Arg::from($value))),+])
    };
}

/// Build an [`Arg::List`] of heterogeneous arguments.
#[macro_export]
macro_rules! args {
    ($($value:expr),* $(,)?) => {
        $crate::Arg::List(::std::vec![$($crate::Arg::from($value)),*])
    };
}

impl Arg {
    /// A regular expression matched with `=~`.
    pub fn regex(pattern: impl Into<String>) -> Self {
        Arg::Regex { pattern: pattern.into(), case_insensitive: false }
    }

    /// A case-insensitive regular expression; rendered with an inline `(?i)`.
    pub fn regex_ci(pattern: impl Into<String>) -> Self {
        Arg::Regex { pattern: pattern.into(), case_insensitive: true }
    }

    /// Wrap any driver value.
    pub fn value(value: impl Into<BoltType>) -> Self {
        Arg::Value(value.into())
    }

    /// Build a mapping from an iterator of pairs.
    pub fn map<K: Into<Arg>, V: Into<Arg>>(pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        Arg::Map(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// `true` for arguments that contribute nothing: `Nil`, empty text,
    /// empty lists and empty mappings.
    pub fn is_blank(&self) -> bool {
        match self {
            Arg::Nil => true,
            Arg::Str(s) => s.is_empty(),
            Arg::List(xs) => xs.is_empty(),
            Arg::Map(pairs) => pairs.is_empty(),
            _ => false,
        }
    }

    /// Text of a string or identifier.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Arg::Str(s) | Arg::Sym(s) => Some(s),
            _ => None,
        }
    }

    /// Plain textual form of scalar arguments, the way they would be
    /// interpolated into Cypher text.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Arg::Str(s) | Arg::Sym(s) => Some(s.clone()),
            Arg::Int(i) => Some(i.to_string()),
            Arg::Float(f) => Some(format!("{f:?}")),
            Arg::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Recursively splice nested lists into one flat argument sequence.
    pub fn flatten(self) -> Vec<Arg> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(self, out: &mut Vec<Arg>) {
        match self {
            Arg::List(xs) => xs.into_iter().for_each(|x| x.flatten_into(out)),
            other => out.push(other),
        }
    }

    /// Convert to a parameter value.
    ///
    /// Returns `None` for regular expressions and ranges, which only have a
    /// meaning inside predicates.
    pub fn to_param(&self) -> Option<BoltType> {
        Some(match self {
            Arg::Nil => BoltType::Null(BoltNull),
            Arg::Str(s) | Arg::Sym(s) => BoltType::from(s.as_str()),
            Arg::Int(i) => BoltType::from(*i),
            Arg::Float(f) => BoltType::from(*f),
            Arg::Bool(b) => BoltType::from(*b),
            Arg::List(xs) => {
                let value = xs.iter().map(Arg::to_param).collect::<Option<Vec<_>>>()?;
                BoltType::List(BoltList { value })
            }
            Arg::Map(pairs) => {
                let mut map = BoltMap::new();
                for (k, v) in pairs {
                    map.put(BoltString::from(k.to_text()?.as_str()), v.to_param()?);
                }
                BoltType::Map(map)
            }
            Arg::Value(v) => v.clone(),
            Arg::Regex { .. } | Arg::Range { .. } => return None,
        })
    }

    /// Inline Cypher literal for list-valued `UNWIND` sources.
    pub fn to_cypher_literal(&self) -> Option<String> {
        Some(match self {
            Arg::Nil => "null".to_owned(),
            Arg::Str(s) | Arg::Sym(s) => format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\"")),
            Arg::Int(_) | Arg::Float(_) | Arg::Bool(_) => self.to_text()?,
            Arg::List(xs) => {
                let items = xs.iter().map(Arg::to_cypher_literal).collect::<Option<Vec<_>>>()?;
                format!("[{}]", items.join(", "))
            }
            Arg::Map(pairs) => {
                let mut items = Vec::with_capacity(pairs.len());
                for (k, v) in pairs {
                    items.push(format!("{}: {}", k.to_text()?, v.to_cypher_literal()?));
                }
                format!("{{{}}}", items.join(", "))
            }
            _ => return None,
        })
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Nil => f.write_str("nil"),
            Arg::Str(s) => write!(f, "{s:?}"),
            Arg::Sym(s) => write!(f, ":{s}"),
            Arg::Int(i) => write!(f, "{i}"),
            Arg::Float(x) => write!(f, "{x:?}"),
            Arg::Bool(b) => write!(f, "{b}"),
            Arg::List(xs) => {
                f.write_str("[")?;
                for (i, x) in xs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{x}")?;
                }
                f.write_str("]")
            }
            Arg::Map(pairs) => {
                f.write_str("{")?;
                for (i, (k, v)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k} => {v}")?;
                }
                f.write_str("}")
            }
            Arg::Regex { pattern, case_insensitive } => {
                write!(f, "/{pattern}/{}", if *case_insensitive { "i" } else { "" })
            }
            Arg::Range { start, end, exclusive } => {
                write!(f, "{start}{}{end}", if *exclusive { "..." } else { ".." })
            }
            Arg::Value(v) => write!(f, "{v:?}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Arg {
            fn from(value: $t) -> Self {
                Arg::Int(value as i64)
            }
        })*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32, isize);

macro_rules! impl_from_wide_uint {
    ($($t:ty),*) => {
        $(impl From<$t> for Arg {
            /// Values past `i64::MAX` become floats.
            fn from(value: $t) -> Self {
                i64::try_from(value).map_or(Arg::Float(value as f64), Arg::Int)
            }
        })*
    };
}

impl_from_wide_uint!(u64, usize);

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Arg::Float(value)
    }
}

impl From<f32> for Arg {
    fn from(value: f32) -> Self {
        Arg::Float(value as f64)
    }
}

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Arg::Bool(value)
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Str(value.to_owned())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Str(value)
    }
}

impl From<&String> for Arg {
    fn from(value: &String) -> Self {
        Arg::Str(value.clone())
    }
}

impl<T: Into<Arg>> From<Option<T>> for Arg {
    fn from(value: Option<T>) -> Self {
        value.map_or(Arg::Nil, Into::into)
    }
}

impl<T: Into<Arg>> From<Vec<T>> for Arg {
    fn from(value: Vec<T>) -> Self {
        Arg::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Arg>, const N: usize> From<[T; N]> for Arg {
    fn from(value: [T; N]) -> Self {
        Arg::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Arg>> From<std::ops::Range<T>> for Arg {
    fn from(value: std::ops::Range<T>) -> Self {
        Arg::Range {
            start: Box::new(value.start.into()),
            end: Box::new(value.end.into()),
            exclusive: true,
        }
    }
}

impl<T: Into<Arg>> From<std::ops::RangeInclusive<T>> for Arg {
    fn from(value: std::ops::RangeInclusive<T>) -> Self {
        let (start, end) = value.into_inner();
        Arg::Range {
            start: Box::new(start.into()),
            end: Box::new(end.into()),
            exclusive: false,
        }
    }
}

impl From<BoltType> for Arg {
    fn from(value: BoltType) -> Self {
        Arg::Value(value)
    }
}

impl From<bytes::Bytes> for Arg {
    fn from(value: bytes::Bytes) -> Self {
        Arg::Value(BoltType::Bytes(neo4rs::BoltBytes::new(value)))
    }
}

impl From<chrono::NaiveDate> for Arg {
    fn from(value: chrono::NaiveDate) -> Self {
        Arg::Value(value.into())
    }
}

impl From<chrono::NaiveDateTime> for Arg {
    fn from(value: chrono::NaiveDateTime) -> Self {
        Arg::Value(value.into())
    }
}

impl From<chrono::DateTime<chrono::FixedOffset>> for Arg {
    fn from(value: chrono::DateTime<chrono::FixedOffset>) -> Self {
        Arg::Value(value.into())
    }
}
