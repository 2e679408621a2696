//! Typed value mutation
//!
//! Unlike the read accessors, the mutation path never falls back to a
//! child: the node itself must already be of the kind being written, and a
//! mismatch is reported as an error rather than silently ignored.

use std::any::Any;

use crate::error::{Error, Result};

use super::document::Document;
use super::node::{NodeId, NodeKind, NodeValue, CDATA_PREFIX};

impl Document {
    /// Payload of `node` after checking it is live and of `expected` kind
    fn expect_kind(&mut self, node: NodeId, expected: NodeKind) -> Result<&mut NodeValue> {
        let found = self.kind_of(node);
        if found == NodeKind::Ignore {
            return Err(Error::NoSuchNode(node));
        }
        if found != expected {
            return Err(Error::KindMismatch {
                node,
                expected,
                found,
            });
        }
        match self.get_mut(node) {
            Some(n) => Ok(&mut n.value),
            None => Err(Error::NoSuchNode(node)),
        }
    }

    /// Rename an element node
    pub fn set_element_name(&mut self, node: NodeId, name: &str) -> Result<()> {
        if let NodeValue::Element(element) = self.expect_kind(node, NodeKind::Element)? {
            element.name = name.to_owned();
        }
        Ok(())
    }

    /// Replace the content of a text node
    pub fn set_text(&mut self, node: NodeId, whitespace: bool, content: &str) -> Result<()> {
        if let NodeValue::Text {
            whitespace: flag,
            content: slot,
        } = self.expect_kind(node, NodeKind::Text)?
        {
            *flag = whitespace;
            *slot = content.to_owned();
        }
        Ok(())
    }

    /// Replace the value of an integer node
    pub fn set_integer(&mut self, node: NodeId, value: i64) -> Result<()> {
        if let NodeValue::Integer(slot) = self.expect_kind(node, NodeKind::Integer)? {
            *slot = value;
        }
        Ok(())
    }

    /// Replace the value of an opaque node
    pub fn set_opaque(&mut self, node: NodeId, value: &str) -> Result<()> {
        if let NodeValue::Opaque(slot) = self.expect_kind(node, NodeKind::Opaque)? {
            *slot = value.to_owned();
        }
        Ok(())
    }

    /// Replace the payload of a custom node; the old payload is dropped
    pub fn set_custom(&mut self, node: NodeId, data: Box<dyn Any>) -> Result<()> {
        if let NodeValue::Custom(slot) = self.expect_kind(node, NodeKind::Custom)? {
            *slot = data;
        }
        Ok(())
    }

    /// Rewrite the value of a CDATA section.
    ///
    /// The node must already be an element carrying the CDATA marker; the
    /// text after the marker is replaced with `data`.
    pub fn set_cdata(&mut self, node: NodeId, data: &str) -> Result<()> {
        match self.element_name(node) {
            None => {
                return Err(match self.get(node) {
                    None => Error::NoSuchNode(node),
                    Some(_) => Error::NotAnElement(node),
                })
            }
            Some(name) if !name.starts_with(CDATA_PREFIX) => {
                return Err(Error::NotCdata(node))
            }
            Some(_) => {}
        }
        if let Some(NodeValue::Element(element)) = self.get_mut(node).map(|n| &mut n.value) {
            element.name = format!("{CDATA_PREFIX}{data}");
        }
        Ok(())
    }

    /// Attach caller-owned user data to any live node, replacing what was
    /// there. The tree never interprets the payload.
    pub fn set_user_data(&mut self, node: NodeId, data: Box<dyn Any>) -> Result<()> {
        match self.get_mut(node) {
            Some(n) => {
                n.user_data = Some(data);
                Ok(())
            }
            None => Err(Error::NoSuchNode(node)),
        }
    }
}
