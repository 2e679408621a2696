//! Attribute tables for element nodes
//!
//! Each element owns an ordered table of (name, value) entries with unique,
//! case-sensitively matched names. The table allocates nothing until the
//! first insert, grows one slot per append, and releases its backing
//! storage when the last entry is deleted.
//!
//! Every operation tolerates an id that does not resolve or a node of the
//! wrong kind: lookups report absence, mutations are a no-op.

use std::fmt::{self, Write};

use tracing::error;

use crate::error::ValueNotStored;

use super::document::Document;
use super::node::{Attr, NodeId};

impl Document {
    /// Look up an attribute value by exact name match.
    ///
    /// Returns `None` when the node is not a live element, the attribute
    /// does not exist, or the attribute was stored with an absent value
    /// (use [`attr_by_index`](Document::attr_by_index) to tell the last
    /// two apart).
    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        let element = self.get(node)?.as_element()?;
        element
            .attrs
            .iter()
            .find(|attr| attr.name == name)?
            .value
            .as_deref()
    }

    /// Get the attribute entry at a 0-based position, in insertion order.
    ///
    /// Returns `None` out of range. The value side is `None` for a stored
    /// absent value.
    pub fn attr_by_index(&self, node: NodeId, idx: usize) -> Option<(&str, Option<&str>)> {
        let element = self.get(node)?.as_element()?;
        let attr = element.attrs.get(idx)?;
        Some((attr.name.as_str(), attr.value.as_deref()))
    }

    /// Number of attributes; 0 for anything that is not a live element
    pub fn attr_count(&self, node: NodeId) -> usize {
        self.get(node)
            .and_then(|n| n.as_element())
            .map_or(0, |element| element.attrs.len())
    }

    /// Set an attribute, copying the value.
    ///
    /// Replaces the value in place when the name already exists (insertion
    /// order is unchanged), appends a new entry otherwise. `None` stores an
    /// absent value, distinct from an empty string. Does nothing when the
    /// node is not a live element.
    pub fn set_attr(&mut self, node: NodeId, name: &str, value: Option<&str>) {
        // the copy is dropped again if the node turns out not to take it
        let _ = self.set_attr_owned(node, name, value.map(str::to_owned));
    }

    /// Set an attribute, taking ownership of the value.
    ///
    /// Same replace-or-append semantics as [`set_attr`](Document::set_attr).
    /// Ownership of `value` passes to the table only on success; when the
    /// node is not a live element the value is handed back inside the
    /// [`ValueNotStored`] error.
    pub fn set_attr_owned(
        &mut self,
        node: NodeId,
        name: &str,
        value: Option<String>,
    ) -> Result<(), ValueNotStored> {
        let Some(element) = self.get_mut(node).and_then(|n| n.as_element_mut()) else {
            return Err(ValueNotStored { value });
        };
        if let Some(slot) = element.attrs.iter_mut().find(|attr| attr.name == name) {
            // old value dropped in place, slot keeps its position
            slot.value = value;
            return Ok(());
        }
        // grow one slot at a time; attribute tables stay short
        element.attrs.reserve_exact(1);
        element.attrs.push(Attr {
            name: name.to_owned(),
            value,
        });
        Ok(())
    }

    /// Set an attribute from a format template, e.g.
    /// `doc.set_attr_fmt(node, "count", format_args!("{n}"))`.
    ///
    /// When formatting fails the failure is reported through the `tracing`
    /// sink and the table is left unmodified.
    pub fn set_attr_fmt(&mut self, node: NodeId, name: &str, args: fmt::Arguments<'_>) {
        if self.get(node).is_none_or(|n| !n.is_element()) {
            return;
        }
        let mut value = String::new();
        if value.write_fmt(args).is_err() {
            let element = self.element_name(node).unwrap_or_default();
            error!(attribute = name, element, "unable to format attribute value");
            return;
        }
        let _ = self.set_attr_owned(node, name, Some(value));
    }

    /// Delete an attribute by exact name match.
    ///
    /// Remaining entries keep their relative order; the backing storage is
    /// released once the table empties. No-op when the attribute does not
    /// exist or the node is not a live element.
    pub fn delete_attr(&mut self, node: NodeId, name: &str) {
        let Some(element) = self.get_mut(node).and_then(|n| n.as_element_mut()) else {
            return;
        };
        let Some(pos) = element.attrs.iter().position(|attr| attr.name == name) else {
            return;
        };
        element.attrs.remove(pos);
        if element.attrs.is_empty() {
            // release the backing storage, not just the entries
            element.attrs = Vec::new();
        }
    }
}
