//! Recursive merge of configuration trees.
//!
//! Overlaying one node onto another works key by key:
//! - Both sides hold a node: the incoming node is merged into the existing
//!   one in place.
//! - The incoming key is a list index (`"0"`, `"17"`): it is renumbered to the
//!   next positional slot of the target and appended.
//! - Anything else: the incoming value overwrites the target entry.
//!
//! Positional counters start at the target's size when a level is entered
//! and are never shared between levels.

use super::ConfigNode;
use crate::key::is_list_index;
use crate::value::Value;
use tracing::{debug, trace};

impl ConfigNode {
    /// Overlay `other` onto this node and return it.
    ///
    /// Named keys in `other` take precedence; list-index keys are appended
    /// after the existing entries instead of replacing them. Subtrees taken
    /// from `other` are copied, so later edits to either tree stay local.
    ///
    /// To merge a node with itself, merge a clone:
    ///
    /// ```
    /// use config_node::ConfigNode;
    ///
    /// let mut node = ConfigNode::from_sequence(["a"]);
    /// let snapshot = node.clone();
    /// node.merge(&snapshot);
    /// assert_eq!(node.len(), 2);
    /// ```
    pub fn merge(&mut self, other: &ConfigNode) -> &mut Self {
        other.merge_into(self)
    }

    /// Overlay this node's entries onto `target` and return `target`.
    ///
    /// This is the receiving side of [`ConfigNode::merge`]: when both trees
    /// hold a node under the same key, the incoming child is merged into the
    /// existing child through this method.
    pub fn merge_into<'t>(&self, target: &'t mut ConfigNode) -> &'t mut ConfigNode {
        self.merge_level(target, 0);
        target
    }

    fn merge_level(&self, target: &mut ConfigNode, depth: usize) {
        let mut counter = target.len();

        for (key, value) in &self.entries {
            if let (Value::Node(incoming), Some(Value::Node(existing))) =
                (value, target.entries.get_mut(key))
            {
                trace!(key = %key, depth, "descending into nested node");
                incoming.merge_level(existing, depth + 1);
                continue;
            }

            if is_list_index(key) {
                trace!(key = %key, renumbered = counter, depth, "appending positional entry");
                target.insert(counter, value.clone());
                counter += 1;
            } else {
                target.insert(key.as_str(), value.clone());
            }
        }
    }

    /// Fold [`ConfigNode::merge`] over `layers`, lowest precedence first.
    pub fn merge_all<I>(layers: I) -> ConfigNode
    where
        I: IntoIterator<Item = ConfigNode>,
    {
        let mut layers = layers.into_iter();
        let Some(mut merged) = layers.next() else {
            return ConfigNode::new();
        };

        let mut count = 1;
        for layer in layers {
            merged.merge(&layer);
            count += 1;
        }

        debug!(layers = count, entries = merged.len(), "merged configuration layers");
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(value: serde_json::Value) -> ConfigNode {
        ConfigNode::from_json(value).unwrap()
    }

    #[test]
    fn test_deep_merge_combines_children() {
        let mut target = node(json!({"a": {"x": 1}}));
        target.merge(&node(json!({"a": {"y": 2}})));
        assert_eq!(target.to_json(), json!({"a": {"x": 1, "y": 2}}));
    }

    #[test]
    fn test_named_key_overwrites() {
        let mut target = node(json!({"a": 1}));
        target.merge(&node(json!({"a": 2})));
        assert_eq!(target.to_json(), json!({"a": 2}));
    }

    #[test]
    fn test_list_index_is_renumbered() {
        let mut target = node(json!({"0": "x", "1": "y"}));
        target.merge(&node(json!({"0": "z"})));
        assert_eq!(target.len(), 3);
        assert_eq!(target.to_json(), json!({"0": "x", "1": "y", "2": "z"}));
    }

    #[test]
    fn test_scalar_replaced_by_node() {
        let mut target = node(json!({"a": 1}));
        target.merge(&node(json!({"a": {"x": 1}})));
        assert_eq!(target.to_json(), json!({"a": {"x": 1}}));
    }

    #[test]
    fn test_node_replaced_by_scalar() {
        let mut target = node(json!({"a": {"x": 1}}));
        target.merge(&node(json!({"a": "flat"})));
        assert_eq!(target.to_json(), json!({"a": "flat"}));
    }

    #[test]
    fn test_lists_are_replaced() {
        let mut target = node(json!({"items": [1, 2, 3]}));
        target.merge(&node(json!({"items": [4]})));
        assert_eq!(target.to_json(), json!({"items": [4]}));
    }

    #[test]
    fn test_counter_is_per_level() {
        // The root has three entries, the nested list node only one; the
        // nested append must land on "1", not "3".
        let mut target = node(json!({"a": 1, "b": 2, "list": {"0": "first"}}));
        target.merge(&node(json!({"list": {"0": "second"}})));
        assert_eq!(
            target.to_json(),
            json!({"a": 1, "b": 2, "list": {"0": "first", "1": "second"}})
        );
    }

    #[test]
    fn test_counter_snapshot_taken_once() {
        let mut target = node(json!({"0": "a"}));
        target.merge(&node(json!({"0": "b", "1": "c", "name": "n"})));
        assert_eq!(
            target.to_json(),
            json!({"0": "a", "1": "b", "2": "c", "name": "n"})
        );
    }

    #[test]
    fn test_renumbered_key_can_land_on_existing_slot() {
        // Renumbering starts at the target's size, not at its highest index.
        let mut target = node(json!({"1": "kept?"}));
        target.merge(&node(json!({"0": "incoming"})));
        assert_eq!(target.to_json(), json!({"1": "incoming"}));
    }

    #[test]
    fn test_matching_list_index_nodes_deep_merge() {
        let mut target = node(json!({"0": {"a": 1}}));
        target.merge(&node(json!({"0": {"b": 2}})));
        assert_eq!(target.to_json(), json!({"0": {"a": 1, "b": 2}}));
    }

    #[test]
    fn test_merged_subtree_is_copied() {
        let mut target = ConfigNode::new();
        let mut other = node(json!({"sub": {"x": 1}}));
        target.merge(&other);

        other.node_mut("sub").unwrap().insert("x", 99);
        assert_eq!(target.lookup(["sub", "x"]).and_then(Value::as_i64), Some(1));
    }

    #[test]
    fn test_deep_merge_mutates_existing_child() {
        let mut target = node(json!({"sub": {"x": 1}}));
        target.merge(&node(json!({"sub": {"y": 2}})));
        let sub = target.node("sub").unwrap();
        assert_eq!(sub.len(), 2);
    }

    #[test]
    fn test_self_merge_via_snapshot() {
        let mut target = node(json!({"0": "a", "1": "b", "name": "n"}));
        let snapshot = target.clone();
        target.merge(&snapshot);
        assert_eq!(
            target.to_json(),
            json!({"0": "a", "1": "b", "name": "n", "3": "a", "4": "b"})
        );
    }

    #[test]
    fn test_merge_into_returns_target() {
        let other = node(json!({"k": "v"}));
        let mut target = ConfigNode::new();
        let returned = other.merge_into(&mut target);
        assert_eq!(returned.len(), 1);
    }

    #[test]
    fn test_merge_all_folds_in_order() {
        let merged = ConfigNode::merge_all([
            node(json!({"a": 1, "nested": {"x": 1}})),
            node(json!({"b": 2, "nested": {"y": 2}})),
            node(json!({"a": 3})),
        ]);
        assert_eq!(
            merged.to_json(),
            json!({"a": 3, "nested": {"x": 1, "y": 2}, "b": 2})
        );
    }

    #[test]
    fn test_merge_all_empty() {
        assert!(ConfigNode::merge_all(Vec::new()).is_empty());
    }
}
