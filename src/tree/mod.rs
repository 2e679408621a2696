//! Tree module - arena-based mutable node tree
//!
//! Implements the document representation using:
//! - Arena allocation for nodes, with a free list for deleted slots
//! - NodeId (u32) indices for cache-friendly traversal
//! - A tagged payload per node (element, text, integer, opaque, custom)
//! - Per-element attribute tables with ordered, unique names
//!
//! The `Document` API is split by concern: node lifecycle and linking in
//! `document`, attribute tables in `attrs`, typed read access in `get`,
//! typed mutation in `set`.

mod attrs;
mod document;
mod get;
mod node;
mod set;

pub use document::{Children, Descendants, Document};
pub use node::{Attr, Element, Node, NodeId, NodeKind, NodeValue, CDATA_PREFIX};
