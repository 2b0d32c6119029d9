//! Value conversion from `neo4rs::BoltType` into Rust types.
//!
//! This module contains all [`FromValue`] implementations.

use std::collections::HashMap;

use neo4rs::BoltType as Value;

use crate::error::QueryError;
use crate::traits::FromValue;

/// Returns a human-readable name for a [`neo4rs::BoltType`] variant.
///
/// Used in error messages to describe the actual type received when a
/// conversion fails.
pub fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null(_) => "Null",
        Value::Boolean(_) => "Boolean",
        Value::Integer(_) => "Integer",
        Value::Float(_) => "Float",
        Value::String(_) => "String",
        Value::Bytes(_) => "Bytes",
        Value::List(_) => "List",
        Value::Map(_) => "Map",
        Value::Node(_) => "Node",
        Value::Relation(_) => "Relationship",
        Value::UnboundedRelation(_) => "UnboundedRelationship",
        Value::Path(_) => "Path",
        Value::Point2D(_) => "Point2D",
        Value::Point3D(_) => "Point3D",
        Value::Duration(_) => "Duration",
        Value::Date(_) => "Date",
        Value::Time(_) => "Time",
        Value::LocalTime(_) => "LocalTime",
        Value::LocalDateTime(_) => "LocalDateTime",
        Value::DateTime(_) => "DateTime",
        Value::DateTimeZoneId(_) => "DateTimeZoneId",
    }
}

/// Raw values pass through untouched.
impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self, QueryError> {
        Ok(value)
    }
}

impl FromValue for neo4rs::BoltNode {
    fn from_value(value: Value) -> Result<Self, QueryError> {
        match value {
            Value::Node(n) => Ok(n),
            other => Err(QueryError::type_mismatch("Node", type_name(&other), "BoltNode")),
        }
    }
}

// ---------------------------------------------------------------------------
// Primitives
// ---------------------------------------------------------------------------

macro_rules! impl_from_val_num {
    ($t:ty, $pat:ident) => {
        impl FromValue for $t {
            fn from_value(value: Value) -> Result<Self, QueryError> {
                match value {
                    Value::$pat(v) => Ok(v.value as $t),
                    other => Err(QueryError::type_mismatch(
                        stringify!($pat),
                        type_name(&other),
                        stringify!($t),
                    )),
                }
            }
        }
    };
}

impl_from_val_num!(i64, Integer);
impl_from_val_num!(i32, Integer);
impl_from_val_num!(u64, Integer);
impl_from_val_num!(u32, Integer);
impl_from_val_num!(i16, Integer);
impl_from_val_num!(u16, Integer);
impl_from_val_num!(i8, Integer);
impl_from_val_num!(u8, Integer);
impl_from_val_num!(f64, Float);
impl_from_val_num!(f32, Float);

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self, QueryError> {
        match value {
            Value::String(s) => Ok(s.to_string()),
            other => Err(QueryError::type_mismatch("String", type_name(&other), "String")),
        }
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self, QueryError> {
        match value {
            Value::Boolean(b) => Ok(b.value),
            other => Err(QueryError::type_mismatch("Boolean", type_name(&other), "bool")),
        }
    }
}

// ---------------------------------------------------------------------------
// Collections
// ---------------------------------------------------------------------------

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Value) -> Result<Self, QueryError> {
        match value {
            Value::List(xs) => xs.value.into_iter().map(T::from_value).collect(),
            other => Err(QueryError::type_mismatch("List", type_name(&other), "Vec<T>")),
        }
    }
}

/// `null` maps to `None`, anything else to `Some(T)`.
impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, QueryError> {
        match value {
            Value::Null(_) => Ok(None),
            other => Ok(Some(T::from_value(other)?)),
        }
    }
}

impl<V: FromValue> FromValue for HashMap<String, V> {
    fn from_value(value: Value) -> Result<Self, QueryError> {
        match value {
            Value::Map(m) => {
                let mut out = HashMap::with_capacity(m.value.len());
                for (k, v) in m.value {
                    out.insert(k.to_string(), V::from_value(v)?);
                }
                Ok(out)
            }
            other => Err(QueryError::type_mismatch("Map", type_name(&other), "HashMap<String, V>")),
        }
    }
}

// ---------------------------------------------------------------------------
// Tuples: a multi-column pluck yields one list per row
// ---------------------------------------------------------------------------

fn next_item(items: &mut impl Iterator<Item = Value>) -> Result<Value, QueryError> {
    items
        .next()
        .ok_or_else(|| QueryError::Mapping("tuple arity does not match list length".to_owned()))
}

macro_rules! impl_from_val_tuple {
    ($len:literal; $($name:ident),+) => {
        impl<$($name: FromValue),+> FromValue for ($($name,)+) {
            fn from_value(value: Value) -> Result<Self, QueryError> {
                match value {
                    Value::List(xs) if xs.value.len() == $len => {
                        let mut items = xs.value.into_iter();
                        Ok(($($name::from_value(next_item(&mut items)?)?,)+))
                    }
                    other => Err(QueryError::type_mismatch(
                        concat!("List[", $len, "]"),
                        type_name(&other),
                        "tuple",
                    )),
                }
            }
        }
    };
}

impl_from_val_tuple!(2; A, B);
impl_from_val_tuple!(3; A, B, C);
impl_from_val_tuple!(4; A, B, C, D);

// ---------------------------------------------------------------------------
// Temporal types (chrono)
// ---------------------------------------------------------------------------

impl FromValue for chrono::NaiveDate {
    fn from_value(value: Value) -> Result<Self, QueryError> {
        match value {
            Value::Date(d) => d
                .try_into()
                .map_err(|e: neo4rs::Error| QueryError::Mapping(format!("BoltDate -> NaiveDate: {e}"))),
            other => Err(QueryError::type_mismatch("Date", type_name(&other), "NaiveDate")),
        }
    }
}

impl FromValue for chrono::NaiveTime {
    fn from_value(value: Value) -> Result<Self, QueryError> {
        match value {
            Value::LocalTime(t) => Ok(t.into()),
            other => Err(QueryError::type_mismatch("LocalTime", type_name(&other), "NaiveTime")),
        }
    }
}

impl FromValue for chrono::NaiveDateTime {
    fn from_value(value: Value) -> Result<Self, QueryError> {
        match value {
            Value::LocalDateTime(dt) => dt.try_into().map_err(|e: neo4rs::Error| {
                QueryError::Mapping(format!("BoltLocalDateTime -> NaiveDateTime: {e}"))
            }),
            other => Err(QueryError::type_mismatch("LocalDateTime", type_name(&other), "NaiveDateTime")),
        }
    }
}

/// Accepts both `DateTime` (fixed offset) and `DateTimeZoneId` (zone name).
impl FromValue for chrono::DateTime<chrono::FixedOffset> {
    fn from_value(value: Value) -> Result<Self, QueryError> {
        match value {
            Value::DateTime(dt) => dt.try_into().map_err(|e: neo4rs::Error| {
                QueryError::Mapping(format!("BoltDateTime -> DateTime<FixedOffset>: {e}"))
            }),
            Value::DateTimeZoneId(dt) => (&dt).try_into().map_err(|e: neo4rs::Error| {
                QueryError::Mapping(format!("BoltDateTimeZoneId -> DateTime<FixedOffset>: {e}"))
            }),
            other => Err(QueryError::type_mismatch("DateTime", type_name(&other), "DateTime<FixedOffset>")),
        }
    }
}

impl FromValue for std::time::Duration {
    fn from_value(value: Value) -> Result<Self, QueryError> {
        match value {
            Value::Duration(d) => Ok(d.into()),
            other => Err(QueryError::type_mismatch("Duration", type_name(&other), "std::time::Duration")),
        }
    }
}
