//! Tier-ordered layering of configuration trees.
//!
//! A [`LayeredConfig`] collects already-parsed nodes tagged with the tier
//! they came from and resolves them into one effective tree by merging from
//! the lowest tier to the highest. Layers within the same tier keep the order
//! they were pushed in.

use crate::key::ToKey;
use crate::node::ConfigNode;
use crate::value::Value;
use tracing::warn;

/// Where a layer came from. Later tiers take precedence over earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfigTier {
    /// Values shipped with the application.
    Defaults,
    /// Settings checked in next to the project.
    Project,
    /// Per-user settings, e.g. under the home directory.
    User,
    /// One-off overrides such as `--set key=value` flags.
    Override,
}

impl ConfigTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigTier::Defaults => "defaults",
            ConfigTier::Project => "project",
            ConfigTier::User => "user",
            ConfigTier::Override => "override",
        }
    }
}

impl std::fmt::Display for ConfigTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One contributing configuration tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub tier: ConfigTier,
    /// Free-form label, usually the file the tree was parsed from.
    pub name: String,
    pub node: ConfigNode,
}

/// An ordered stack of configuration layers.
#[derive(Debug, Clone, Default)]
pub struct LayeredConfig {
    layers: Vec<Layer>,
}

impl LayeredConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer. It lands after every layer of the same or a lower tier.
    pub fn push(
        &mut self,
        tier: ConfigTier,
        name: impl Into<String>,
        node: ConfigNode,
    ) -> &mut Self {
        let name = name.into();

        if self.layers.iter().any(|l| l.tier == tier && l.name == name) {
            warn!(tier = %tier, name = %name, "duplicate configuration layer");
        }

        let index = self.layers.partition_point(|l| l.tier <= tier);
        self.layers.insert(index, Layer { tier, name, node });
        self
    }

    /// Builder-style [`LayeredConfig::push`].
    pub fn with_layer(
        mut self,
        tier: ConfigTier,
        name: impl Into<String>,
        node: ConfigNode,
    ) -> Self {
        self.push(tier, name, node);
        self
    }

    /// Layers in merge order, lowest precedence first.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Merge every layer into a fresh effective tree.
    ///
    /// The lowest layer is the base, so its own positional keys are kept as
    /// they are; every later layer is merged on top of it.
    pub fn resolve(&self) -> ConfigNode {
        ConfigNode::merge_all(self.layers.iter().map(|l| l.node.clone()))
    }

    /// The layer whose value `path` resolves to after merging.
    ///
    /// Layers are searched from the highest precedence down. A layer that
    /// puts a non-node somewhere along the path hides every lower layer, so
    /// the search stops there with `None`. List-index keys are appended
    /// rather than overridden during merge, so their origin is only
    /// meaningful for the layer that defined them.
    pub fn origin_of<I, K>(&self, path: I) -> Option<&Layer>
    where
        I: IntoIterator<Item = K>,
        K: ToKey,
    {
        let path: Vec<String> = path.into_iter().map(|k| k.to_key()).collect();
        for layer in self.layers.iter().rev() {
            match path_state(&layer.node, &path) {
                PathState::Defined => return Some(layer),
                PathState::Shadowed => return None,
                PathState::Absent => {}
            }
        }
        None
    }

    /// Resolve and look up `path` in one step.
    pub fn get<I, K>(&self, path: I) -> Option<Value>
    where
        I: IntoIterator<Item = K>,
        K: ToKey,
    {
        self.resolve().lookup(path).cloned()
    }
}

enum PathState {
    /// Every segment exists.
    Defined,
    /// A proper prefix of the path holds a non-node value.
    Shadowed,
    Absent,
}

fn path_state(node: &ConfigNode, path: &[String]) -> PathState {
    let Some((last, parents)) = path.split_last() else {
        return PathState::Absent;
    };

    let mut current = node;
    for segment in parents {
        match current.get(segment) {
            Some(Value::Node(child)) => current = child,
            Some(_) => return PathState::Shadowed,
            None => return PathState::Absent,
        }
    }

    if current.contains_key(last) {
        PathState::Defined
    } else {
        PathState::Absent
    }
}
