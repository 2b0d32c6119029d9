//! Property access for nodes returned in result rows.

use neo4rs::BoltType as Value;

/// Read a property from a [`BoltNode`](neo4rs::BoltNode) by key.
///
/// Returns `None` if the property does not exist on the node.
pub fn node_prop(node: &neo4rs::BoltNode, key: &str) -> Option<Value> {
    node.get::<Value>(key).ok()
}

/// Internal id of a node, as matched by `ID(n)`.
pub fn node_id(node: &neo4rs::BoltNode) -> i64 {
    node.id.value
}
