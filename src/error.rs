//! Error types for tree mutation.
//!
//! Read accessors report absence through `Option` or a sentinel and never
//! produce an [`Error`]; only mutation entry points do.

use crate::tree::{NodeId, NodeKind};

/// Result type for tree mutation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for tree mutation operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The id is out of range, or the node was deleted
    #[error("node {0} is not part of this document")]
    NoSuchNode(NodeId),

    /// The operation requires an element node
    #[error("node {0} is not an element")]
    NotAnElement(NodeId),

    /// The node holds a different payload than the operation expects
    #[error("node {node} is a {found:?} node, expected {expected:?}")]
    KindMismatch {
        /// Node the operation was applied to
        node: NodeId,
        /// Kind the operation requires
        expected: NodeKind,
        /// Kind actually stored
        found: NodeKind,
    },

    /// The move would make the node an ancestor of itself
    #[error("appending node {0} here would make it its own ancestor")]
    CircularStructure(NodeId),

    /// The element name does not carry the CDATA marker prefix
    #[error("node {0} is not a CDATA element")]
    NotCdata(NodeId),
}

/// Returned by [`Document::set_attr_owned`](crate::Document::set_attr_owned)
/// when the target node cannot take the value. Ownership of the value passes
/// to the table only on success; on failure it travels back to the caller
/// inside this error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("attribute value was not stored")]
pub struct ValueNotStored {
    /// The value handed back to the caller
    pub value: Option<String>,
}
