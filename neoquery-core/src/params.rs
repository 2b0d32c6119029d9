//! The parameter namespace of a query.

use std::collections::HashMap;

use indexmap::IndexMap;
use neo4rs::BoltType;

/// Materialized parameter set handed to the driver.
pub type Params = HashMap<String, BoltType>;

/// Named query parameters with collision-free naming.
///
/// Adding a name that is already taken stores the value under the first free
/// numbered variant (`key`, `key2`, `key3`, ...) and returns the name that was
/// actually used, so generated Cypher can refer to it.
///
/// ```rust
/// use neoquery_core::ParameterTable;
///
/// let mut table = ParameterTable::new();
/// assert_eq!(table.add("foo", 1_i64), "foo");
/// assert_eq!(table.add("foo", 2_i64), "foo2");
/// assert_eq!(table.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterTable {
    entries: IndexMap<String, BoltType>,
}

impl ParameterTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `name`, or under its first free numbered variant.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<BoltType>) -> String {
        let resolved = self.free_name(name.into());
        self.entries.insert(resolved.clone(), value.into());
        resolved
    }

    /// [`add`](Self::add) each pair in order; returns the resolved names in
    /// the same order.
    pub fn add_many<K, V>(&mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Vec<String>
    where
        K: Into<String>,
        V: Into<BoltType>,
    {
        pairs.into_iter().map(|(k, v)| self.add(k, v)).collect()
    }

    /// Drop `name` if present.
    pub fn remove(&mut self, name: &str) {
        self.entries.shift_remove(name);
    }

    /// An independent copy; later changes to either side are not shared.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    pub fn get(&self, name: &str) -> Option<&BoltType> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BoltType)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn to_map(&self) -> Params {
        self.entries.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    fn free_name(&self, name: String) -> String {
        if !self.entries.contains_key(&name) {
            return name;
        }
        let mut i = 2;
        loop {
            let candidate = format!("{name}{i}");
            if !self.entries.contains_key(&candidate) {
                return candidate;
            }
            i += 1;
        }
    }
}
