//! Error types for boundary conversions.
//!
//! Node access and merging never fail. Errors only arise where raw input
//! crosses into the tree and turns out not to be mapping-shaped, or where a
//! flattened tree is deserialized into a typed structure.

use thiserror::Error;

/// Errors raised when converting into or out of a [`ConfigNode`](crate::ConfigNode).
#[derive(Debug, Error)]
pub enum NodeError {
    /// The root of the input was not a mapping.
    #[error("expected a mapping at the configuration root, found {found}")]
    NotAMapping {
        /// Shape of the value that was supplied instead.
        found: &'static str,
    },

    /// The flattened tree did not match the requested type.
    #[error("failed to deserialize configuration: {0}")]
    Deserialize(#[from] serde_json::Error),
}

/// Result type for node conversions.
pub type Result<T> = std::result::Result<T, NodeError>;
