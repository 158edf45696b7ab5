//! Nested configuration trees with list-aware recursive merge.
//!
//! A [`ConfigNode`] wraps already-parsed hierarchical data (from JSON, YAML
//! or any other serde format) and offers keyed access, defaulted reads,
//! flattening back to plain data, and a merge that combines two trees:
//! nested nodes are merged in place, named keys are overridden, and
//! list-style integer keys are appended instead of clobbered.
//!
//! ```
//! use config_node::ConfigNode;
//! use serde_json::json;
//!
//! let mut base = ConfigNode::from_json(json!({
//!     "server": {"host": "localhost", "port": 8080},
//!     "plugins": {"0": "auth"}
//! }))?;
//! let overlay = ConfigNode::from_json(json!({
//!     "server": {"port": 9000},
//!     "plugins": {"0": "metrics"}
//! }))?;
//!
//! base.merge(&overlay);
//! assert_eq!(
//!     base.to_json(),
//!     json!({
//!         "server": {"host": "localhost", "port": 9000},
//!         "plugins": {"0": "auth", "1": "metrics"}
//!     })
//! );
//! # Ok::<(), config_node::NodeError>(())
//! ```

pub mod error;
pub mod key;
pub mod layers;
pub mod node;
pub mod value;

pub use error::{NodeError, Result};
pub use key::{ToKey, is_list_index};
pub use layers::{ConfigTier, Layer, LayeredConfig};
pub use node::ConfigNode;
pub use value::Value;
