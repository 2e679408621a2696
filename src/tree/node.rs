//! Node representation
//!
//! Uses NodeId (u32) for compact, cache-friendly node references. Each node
//! carries exactly one typed payload plus its structural links.

use std::any::Any;
use std::fmt;

/// Compact node identifier (index into the document arena)
pub type NodeId = u32;

/// Reserved name prefix marking an element as a CDATA section.
///
/// The text of the section is the remainder of the element name after this
/// prefix.
pub const CDATA_PREFIX: &str = "![CDATA[";

/// Kind of node payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Sentinel for an id that does not resolve to a live node; never stored
    Ignore,
    /// Element with a name and an attribute table
    Element,
    /// Signed integer value
    Integer,
    /// Opaque string, stored verbatim
    Opaque,
    /// Text content with a preceding-whitespace flag
    Text,
    /// Caller-defined payload
    Custom,
}

/// Element payload: name plus attribute table
#[derive(Debug)]
pub struct Element {
    pub(crate) name: String,
    /// Ordered entries with unique names; empty until the first insert
    pub(crate) attrs: Vec<Attr>,
}

impl Element {
    /// The element name (includes the CDATA marker for CDATA sections)
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// One attribute entry: name plus owned-or-absent value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    /// Attribute name, unique within its table
    pub name: String,
    /// Attribute value; `None` is a stored absent value, distinct from `""`
    pub value: Option<String>,
}

/// Typed node payload; each variant carries exactly its own fields
pub enum NodeValue {
    /// Element with name and attributes
    Element(Element),
    /// Text content
    Text {
        /// True when the text was preceded by whitespace in the source
        whitespace: bool,
        /// The text itself
        content: String,
    },
    /// Signed integer value
    Integer(i64),
    /// Opaque string, stored verbatim
    Opaque(String),
    /// Caller-defined payload; dropped with the node
    Custom(Box<dyn Any>),
}

impl fmt::Debug for NodeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeValue::Element(element) => f.debug_tuple("Element").field(element).finish(),
            NodeValue::Text {
                whitespace,
                content,
            } => f
                .debug_struct("Text")
                .field("whitespace", whitespace)
                .field("content", content)
                .finish(),
            NodeValue::Integer(value) => f.debug_tuple("Integer").field(value).finish(),
            NodeValue::Opaque(value) => f.debug_tuple("Opaque").field(value).finish(),
            NodeValue::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// A node in the arena: payload, structural links, and a user-data slot
pub struct Node {
    pub(crate) value: NodeValue,
    pub(crate) parent: Option<NodeId>,
    /// Consistent only for elements; every other kind has no children
    pub(crate) first_child: Option<NodeId>,
    pub(crate) last_child: Option<NodeId>,
    pub(crate) prev_sibling: Option<NodeId>,
    pub(crate) next_sibling: Option<NodeId>,
    /// Opaque caller payload; the tree never interprets it
    pub(crate) user_data: Option<Box<dyn Any>>,
}

impl Node {
    /// Create a node with no links
    pub(crate) fn detached(value: NodeValue) -> Self {
        Node {
            value,
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
            user_data: None,
        }
    }

    /// Kind tag of the stored payload
    pub fn kind(&self) -> NodeKind {
        match &self.value {
            NodeValue::Element(_) => NodeKind::Element,
            NodeValue::Text { .. } => NodeKind::Text,
            NodeValue::Integer(_) => NodeKind::Integer,
            NodeValue::Opaque(_) => NodeKind::Opaque,
            NodeValue::Custom(_) => NodeKind::Custom,
        }
    }

    /// Check if this is an element node
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.value, NodeValue::Element(_))
    }

    /// The typed payload
    pub fn value(&self) -> &NodeValue {
        &self.value
    }

    pub(crate) fn as_element(&self) -> Option<&Element> {
        match &self.value {
            NodeValue::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn as_element_mut(&mut self) -> Option<&mut Element> {
        match &mut self.value {
            NodeValue::Element(element) => Some(element),
            _ => None,
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", &self.value)
            .field("parent", &self.parent)
            .field("first_child", &self.first_child)
            .field("last_child", &self.last_child)
            .field("prev_sibling", &self.prev_sibling)
            .field("next_sibling", &self.next_sibling)
            .field("user_data", &self.user_data.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_per_variant() {
        let element = Node::detached(NodeValue::Element(Element {
            name: "root".to_owned(),
            attrs: Vec::new(),
        }));
        assert_eq!(element.kind(), NodeKind::Element);
        assert!(element.is_element());

        let text = Node::detached(NodeValue::Text {
            whitespace: true,
            content: "hi".to_owned(),
        });
        assert_eq!(text.kind(), NodeKind::Text);
        assert!(!text.is_element());

        assert_eq!(Node::detached(NodeValue::Integer(3)).kind(), NodeKind::Integer);
        assert_eq!(
            Node::detached(NodeValue::Opaque("raw".to_owned())).kind(),
            NodeKind::Opaque
        );
        assert_eq!(
            Node::detached(NodeValue::Custom(Box::new(0u8))).kind(),
            NodeKind::Custom
        );
    }

    #[test]
    fn test_detached_has_no_links() {
        let node = Node::detached(NodeValue::Integer(1));
        assert!(node.parent.is_none());
        assert!(node.first_child.is_none());
        assert!(node.last_child.is_none());
        assert!(node.prev_sibling.is_none());
        assert!(node.next_sibling.is_none());
        assert!(node.user_data.is_none());
    }
}
