//! ArborXML - mutable in-memory XML node trees
//!
//! A small library for building and inspecting markup documents as typed
//! node trees:
//! - Arena storage: a [`Document`] owns every node, [`NodeId`] handles navigate
//! - Tagged payloads: element, text, integer, opaque string, custom data
//! - Attribute tables on elements: ordered entries, unique names
//! - Typed getters with an element-or-first-child fallback rule
//!
//! Parsing and serialization are out of scope; trees are built through the
//! [`Document`] constructors and mutated in place. Read accessors never
//! panic on an id that no longer resolves - they report an absent result.

mod error;
mod tree;

pub use error::{Error, Result, ValueNotStored};
pub use tree::{
    Attr, Children, Descendants, Document, Element, Node, NodeId, NodeKind, NodeValue,
    CDATA_PREFIX,
};
