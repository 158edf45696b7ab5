//! Conversion of a tree back into plain data.

use super::ConfigNode;
use crate::error::Result;
use crate::value::Value;
use serde::de::DeserializeOwned;
use serde_json::Map;

impl ConfigNode {
    /// Copy the tree into a plain JSON map, turning every child node into a
    /// nested object. The node itself is left untouched.
    pub fn to_plain(&self) -> Map<String, serde_json::Value> {
        self.entries
            .iter()
            .map(|(key, value)| (key.clone(), value.to_json()))
            .collect()
    }

    /// [`ConfigNode::to_plain`] wrapped as a JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(self.to_plain())
    }

    /// Flatten the tree and deserialize it into `T`.
    ///
    /// Typically used after merging layers, to populate a settings struct.
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.to_json())?)
    }
}

impl Value {
    /// Flatten into a plain JSON value.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Value::Number(n.clone()),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Node(node) => node.to_json(),
        }
    }
}

impl From<ConfigNode> for serde_json::Value {
    fn from(node: ConfigNode) -> Self {
        node.to_json()
    }
}

impl From<&ConfigNode> for serde_json::Value {
    fn from(node: &ConfigNode) -> Self {
        node.to_json()
    }
}
