//! Typed read access
//!
//! The typed getters share one fallback rule: when the node itself is not
//! the requested kind but is an element whose *first* child is exactly that
//! kind, the child's value is returned instead. Callers can thus treat "an
//! element wrapping a single typed child" and "a bare typed node" the same
//! way. CDATA and element-name access apply to the node directly, with no
//! fallback.
//!
//! All getters are read-only and tolerate an id that does not resolve by
//! reporting an absent result.

use std::any::Any;

use super::document::Document;
use super::node::{Node, NodeId, NodeKind, NodeValue, CDATA_PREFIX};

impl Document {
    /// Resolve to a node of the requested kind: the node itself, or its
    /// first child when the node is an element.
    fn value_node(&self, node: NodeId, kind: NodeKind) -> Option<&Node> {
        let n = self.get(node)?;
        if n.kind() == kind {
            return Some(n);
        }
        if n.is_element() {
            let child = self.get(n.first_child?)?;
            if child.kind() == kind {
                return Some(child);
            }
        }
        None
    }

    /// Get the text value for a node or its first child, together with the
    /// preceding-whitespace flag
    pub fn text(&self, node: NodeId) -> Option<(&str, bool)> {
        match &self.value_node(node, NodeKind::Text)?.value {
            NodeValue::Text {
                whitespace,
                content,
            } => Some((content.as_str(), *whitespace)),
            _ => None,
        }
    }

    /// Get the integer value for a node or its first child.
    ///
    /// Returns 0 when the node (or its first child) is not an integer node,
    /// which is indistinguishable from a stored zero. Callers that need the
    /// distinction should check [`kind_of`](Document::kind_of) first.
    pub fn integer(&self, node: NodeId) -> i64 {
        match self.value_node(node, NodeKind::Integer).map(|n| &n.value) {
            Some(NodeValue::Integer(value)) => *value,
            _ => 0,
        }
    }

    /// Get the opaque string value for a node or its first child
    pub fn opaque(&self, node: NodeId) -> Option<&str> {
        match &self.value_node(node, NodeKind::Opaque)?.value {
            NodeValue::Opaque(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Get the custom payload for a node or its first child; the caller
    /// downcasts to the concrete type
    pub fn custom(&self, node: NodeId) -> Option<&dyn Any> {
        match &self.value_node(node, NodeKind::Custom)?.value {
            NodeValue::Custom(data) => Some(data.as_ref()),
            _ => None,
        }
    }

    /// Get the value of a CDATA section: the element name after the marker
    /// prefix. Applies to the node itself only, never to a child.
    pub fn cdata(&self, node: NodeId) -> Option<&str> {
        self.element_name(node)?.strip_prefix(CDATA_PREFIX)
    }

    /// Get the name of an element node; `None` for any other kind
    pub fn element_name(&self, node: NodeId) -> Option<&str> {
        Some(self.get(node)?.as_element()?.name.as_str())
    }

    /// First child of an element node
    pub fn first_child(&self, node: NodeId) -> Option<NodeId> {
        let n = self.get(node)?;
        if n.is_element() {
            n.first_child
        } else {
            None
        }
    }

    /// Last child of an element node
    pub fn last_child(&self, node: NodeId) -> Option<NodeId> {
        let n = self.get(node)?;
        if n.is_element() {
            n.last_child
        } else {
            None
        }
    }

    /// Next sibling under the same parent
    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.get(node)?.next_sibling
    }

    /// Previous sibling under the same parent
    pub fn prev_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.get(node)?.prev_sibling
    }

    /// Parent node; `None` for a root
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node)?.parent
    }

    /// Kind of the node; [`NodeKind::Ignore`] for an id that does not
    /// resolve
    pub fn kind_of(&self, node: NodeId) -> NodeKind {
        self.get(node).map_or(NodeKind::Ignore, Node::kind)
    }

    /// Caller-owned user data attached to the node
    pub fn user_data(&self, node: NodeId) -> Option<&dyn Any> {
        self.get(node)?.user_data.as_deref()
    }
}
