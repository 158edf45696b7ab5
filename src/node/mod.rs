//! The configuration tree node.
//!
//! A [`ConfigNode`] owns an insertion-ordered mapping from string keys to
//! [`Value`]s. Nested mappings are always stored as child nodes, never as raw
//! maps, so every level of the tree answers the same API.
//!
//! - Construction goes through [`ConfigNode::insert`] for every pair.
//! - Plain assignment replaces an entry outright; combining trees is the job
//!   of [`ConfigNode::merge`] (see the `merge` submodule).
//! - [`ConfigNode::to_plain`] turns the tree back into plain `serde_json` data.

mod flatten;
mod merge;
mod serde_impl;

use crate::error::{NodeError, Result};
use crate::key::ToKey;
use crate::value::{Value, YamlKey};
use indexmap::IndexMap;

/// A node in a configuration tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigNode {
    entries: IndexMap<String, Value>,
}

impl ConfigNode {
    /// Create an empty node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a node keyed `"0"`, `"1"`, ... from a sequence, the shape an
    /// array literal takes in a configuration file.
    pub fn from_sequence<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut node = Self::new();
        for item in items {
            node.push(item);
        }
        node
    }

    /// Build a node from parsed JSON.
    ///
    /// `null` yields an empty node. Any other non-object is rejected.
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Object(map) => Ok(map.into_iter().collect()),
            serde_json::Value::Null => Ok(Self::new()),
            other => Err(NodeError::NotAMapping {
                found: Value::from(other).kind(),
            }),
        }
    }

    /// Build a node from parsed YAML.
    ///
    /// Non-string mapping keys are coerced to strings. `null` yields an empty
    /// node, a tagged mapping is accepted with its tag dropped.
    pub fn from_yaml(value: serde_yaml::Value) -> Result<Self> {
        match value {
            serde_yaml::Value::Mapping(map) => {
                Ok(map.into_iter().map(|(k, v)| (YamlKey(k), v)).collect())
            }
            serde_yaml::Value::Null => Ok(Self::new()),
            serde_yaml::Value::Tagged(tagged) => Self::from_yaml(tagged.value),
            other => Err(NodeError::NotAMapping {
                found: Value::from(other).kind(),
            }),
        }
    }

    /// Whether an entry exists for `key`, even one holding [`Value::Null`].
    pub fn contains_key<K: ToKey>(&self, key: K) -> bool {
        self.entries.contains_key(key.to_key().as_str())
    }

    /// The value stored at `key`, or `None` if there is no such entry.
    pub fn get<K: ToKey>(&self, key: K) -> Option<&Value> {
        self.entries.get(key.to_key().as_str())
    }

    pub fn get_mut<K: ToKey>(&mut self, key: K) -> Option<&mut Value> {
        self.entries.get_mut(key.to_key().as_str())
    }

    /// The value stored at `key`, or `default` if there is no such entry.
    ///
    /// A stored [`Value::Null`] is returned as-is: a present-but-empty entry
    /// is not the same as a missing one.
    pub fn get_or<'a, K: ToKey>(&'a self, key: K, default: &'a Value) -> &'a Value {
        self.get(key).unwrap_or(default)
    }

    /// The child node at `key`, if that entry exists and is a node.
    pub fn node<K: ToKey>(&self, key: K) -> Option<&ConfigNode> {
        self.get(key).and_then(Value::as_node)
    }

    pub fn node_mut<K: ToKey>(&mut self, key: K) -> Option<&mut ConfigNode> {
        self.get_mut(key).and_then(Value::as_node_mut)
    }

    /// Store `value` at `key`, replacing whatever was there.
    ///
    /// No merging happens here, even if both the old and the new value are
    /// nodes. Returns the previous value.
    pub fn insert<K: ToKey, V: Into<Value>>(&mut self, key: K, value: V) -> Option<Value> {
        self.entries.insert(key.to_key(), value.into())
    }

    /// Append `value` at the next positional key, `stringify(len())`.
    pub fn push<V: Into<Value>>(&mut self, value: V) -> Option<Value> {
        let key = self.len();
        self.insert(key, value)
    }

    /// Remove the entry at `key`, keeping the order of the others.
    /// Removing a missing key is a no-op.
    pub fn remove<K: ToKey>(&mut self, key: K) -> Option<Value> {
        self.entries.shift_remove(key.to_key().as_str())
    }

    /// Number of direct entries. Nested entries are not counted.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Walk nested nodes along `path` and return the value at its end.
    ///
    /// Returns `None` when a segment is missing or when the walk would have
    /// to descend into something that is not a node. An empty path yields
    /// `None` as well, since the node itself is not a [`Value`].
    pub fn lookup<I, K>(&self, path: I) -> Option<&Value>
    where
        I: IntoIterator<Item = K>,
        K: ToKey,
    {
        let mut segments = path.into_iter();
        let mut current = self.get(segments.next()?)?;
        for segment in segments {
            current = current.as_node()?.get(segment)?;
        }
        Some(current)
    }

    pub fn lookup_mut<I, K>(&mut self, path: I) -> Option<&mut Value>
    where
        I: IntoIterator<Item = K>,
        K: ToKey,
    {
        let mut segments = path.into_iter();
        let mut current = self.get_mut(segments.next()?)?;
        for segment in segments {
            current = current.as_node_mut()?.get_mut(segment)?;
        }
        Some(current)
    }

    /// Iterate over direct entries in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.entries.iter()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.entries.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.entries.values()
    }
}

impl<K: ToKey, V: Into<Value>> FromIterator<(K, V)> for ConfigNode {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut node = Self::new();
        for (key, value) in iter {
            node.insert(key, value);
        }
        node
    }
}

impl<K: ToKey, V: Into<Value>> Extend<(K, V)> for ConfigNode {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a> IntoIterator for &'a ConfigNode {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for ConfigNode {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl TryFrom<serde_json::Value> for ConfigNode {
    type Error = NodeError;

    fn try_from(value: serde_json::Value) -> Result<Self> {
        Self::from_json(value)
    }
}

impl TryFrom<serde_yaml::Value> for ConfigNode {
    type Error = NodeError;

    fn try_from(value: serde_yaml::Value) -> Result<Self> {
        Self::from_yaml(value)
    }
}
