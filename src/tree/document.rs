//! Document - arena storage plus node lifecycle and linking
//!
//! A `Document` owns every node and hands out `NodeId` handles. Slots freed
//! by `delete` go on a free list and are reused by later allocations, so a
//! stale id may either stop resolving or come to name a different node;
//! callers must not hold ids across a `delete` of that subtree.

use std::any::Any;

use crate::error::{Error, Result};

use super::node::{Element, Node, NodeId, NodeValue, CDATA_PREFIX};

/// Arena of nodes. May hold any number of disjoint trees at once.
#[derive(Debug, Default)]
pub struct Document {
    nodes: Vec<Option<Node>>,
    free: Vec<NodeId>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Document {
            nodes: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Get a node by id; `None` for an id that does not resolve
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id as usize)?.as_ref()
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id as usize)?.as_mut()
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    /// Check if the document holds no nodes
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn alloc(&mut self, value: NodeValue) -> NodeId {
        let node = Node::detached(value);
        match self.free.pop() {
            Some(id) => {
                self.nodes[id as usize] = Some(node);
                id
            }
            None => {
                let id = self.nodes.len() as NodeId;
                self.nodes.push(Some(node));
                id
            }
        }
    }

    /// Append the new node when a usable parent was named; a parent that
    /// does not resolve or is not an element leaves the node detached.
    fn attach(&mut self, parent: Option<NodeId>, child: NodeId) {
        if let Some(parent) = parent {
            let _ = self.append_child(parent, child);
        }
    }

    /// Create an element node, appended under `parent` when given
    pub fn new_element(&mut self, parent: Option<NodeId>, name: impl Into<String>) -> NodeId {
        let id = self.alloc(NodeValue::Element(Element {
            name: name.into(),
            attrs: Vec::new(),
        }));
        self.attach(parent, id);
        id
    }

    /// Create a text node; `whitespace` records whether the text was
    /// preceded by whitespace in the source
    pub fn new_text(
        &mut self,
        parent: Option<NodeId>,
        whitespace: bool,
        content: impl Into<String>,
    ) -> NodeId {
        let id = self.alloc(NodeValue::Text {
            whitespace,
            content: content.into(),
        });
        self.attach(parent, id);
        id
    }

    /// Create an integer node
    pub fn new_integer(&mut self, parent: Option<NodeId>, value: i64) -> NodeId {
        let id = self.alloc(NodeValue::Integer(value));
        self.attach(parent, id);
        id
    }

    /// Create an opaque string node
    pub fn new_opaque(&mut self, parent: Option<NodeId>, value: impl Into<String>) -> NodeId {
        let id = self.alloc(NodeValue::Opaque(value.into()));
        self.attach(parent, id);
        id
    }

    /// Create a custom node owning a caller-defined payload
    pub fn new_custom(&mut self, parent: Option<NodeId>, data: Box<dyn Any>) -> NodeId {
        let id = self.alloc(NodeValue::Custom(data));
        self.attach(parent, id);
        id
    }

    /// Create a CDATA section: an element whose name is the marker prefix
    /// followed by `data`
    pub fn new_cdata(&mut self, parent: Option<NodeId>, data: &str) -> NodeId {
        self.new_element(parent, format!("{CDATA_PREFIX}{data}"))
    }

    /// Link `child` as the last child of `parent`, unlinking it from any
    /// current parent first.
    ///
    /// Fails when either id does not resolve, `parent` is not an element,
    /// or the move would make `child` its own ancestor.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if self.get(child).is_none() {
            return Err(Error::NoSuchNode(child));
        }
        match self.get(parent) {
            None => return Err(Error::NoSuchNode(parent)),
            Some(node) if !node.is_element() => return Err(Error::NotAnElement(parent)),
            Some(_) => {}
        }
        let mut cursor = Some(parent);
        while let Some(id) = cursor {
            if id == child {
                return Err(Error::CircularStructure(child));
            }
            cursor = self.get(id).and_then(|n| n.parent);
        }

        self.remove(child);
        let last = self.get(parent).and_then(|n| n.last_child);
        if let Some(last) = last {
            if let Some(node) = self.get_mut(last) {
                node.next_sibling = Some(child);
            }
        }
        if let Some(node) = self.get_mut(child) {
            node.parent = Some(parent);
            node.prev_sibling = last;
            node.next_sibling = None;
        }
        if let Some(node) = self.get_mut(parent) {
            if node.first_child.is_none() {
                node.first_child = Some(child);
            }
            node.last_child = Some(child);
        }
        Ok(())
    }

    /// Unlink a node from its parent and siblings without freeing it.
    /// No-op for an id that does not resolve or a parentless node.
    pub fn remove(&mut self, node: NodeId) {
        let Some((parent, prev, next)) = self
            .get(node)
            .map(|n| (n.parent, n.prev_sibling, n.next_sibling))
        else {
            return;
        };
        if let Some(prev) = prev {
            if let Some(n) = self.get_mut(prev) {
                n.next_sibling = next;
            }
        } else if let Some(parent) = parent {
            if let Some(n) = self.get_mut(parent) {
                n.first_child = next;
            }
        }
        if let Some(next) = next {
            if let Some(n) = self.get_mut(next) {
                n.prev_sibling = prev;
            }
        } else if let Some(parent) = parent {
            if let Some(n) = self.get_mut(parent) {
                n.last_child = prev;
            }
        }
        if let Some(n) = self.get_mut(node) {
            n.parent = None;
            n.prev_sibling = None;
            n.next_sibling = None;
        }
    }

    /// Unlink a node and free it together with its whole subtree.
    ///
    /// Freeing a slot drops its payload, so an element's attribute table is
    /// released in full here. Freed ids go on the free list for reuse.
    pub fn delete(&mut self, node: NodeId) {
        self.remove(node);
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            let Some(slot) = self.nodes.get_mut(id as usize) else {
                continue;
            };
            let Some(freed) = slot.take() else {
                continue;
            };
            let mut child = freed.first_child;
            while let Some(c) = child {
                stack.push(c);
                child = self.get(c).and_then(|n| n.next_sibling);
            }
            self.free.push(id);
        }
    }

    /// Iterate over the children of a node
    pub fn children(&self, id: NodeId) -> Children<'_> {
        let first = self.get(id).and_then(|n| n.first_child);
        Children {
            doc: self,
            next: first,
        }
    }

    /// Iterate over all descendants of a node in document order
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack = Vec::new();
        if let Some(node) = self.get(id) {
            let mut child = node.last_child;
            while let Some(c) = child {
                stack.push(c);
                child = self.get(c).and_then(|n| n.prev_sibling);
            }
        }
        Descendants { doc: self, stack }
    }
}

/// Iterator over child nodes
pub struct Children<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl<'a> Iterator for Children<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.doc.get(current).and_then(|n| n.next_sibling);
        Some(current)
    }
}

/// Iterator over descendant nodes
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        if let Some(node) = self.doc.get(current) {
            let mut child = node.last_child;
            while let Some(id) = child {
                self.stack.push(id);
                child = self.doc.get(id).and_then(|n| n.prev_sibling);
            }
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::node::NodeKind;

    #[test]
    fn test_append_maintains_links() {
        let mut doc = Document::new();
        let root = doc.new_element(None, "root");
        let a = doc.new_text(Some(root), false, "a");
        let b = doc.new_text(Some(root), false, "b");

        assert_eq!(doc.first_child(root), Some(a));
        assert_eq!(doc.last_child(root), Some(b));
        assert_eq!(doc.next_sibling(a), Some(b));
        assert_eq!(doc.prev_sibling(b), Some(a));
        assert_eq!(doc.parent(a), Some(root));
        assert_eq!(doc.parent(b), Some(root));
        assert_eq!(doc.next_sibling(b), None);
        assert_eq!(doc.prev_sibling(a), None);
    }

    #[test]
    fn test_remove_unlinks_without_freeing() {
        let mut doc = Document::new();
        let root = doc.new_element(None, "root");
        let a = doc.new_text(Some(root), false, "a");
        let b = doc.new_text(Some(root), false, "b");
        let c = doc.new_text(Some(root), false, "c");

        doc.remove(b);

        assert_eq!(doc.children(root).collect::<Vec<_>>(), vec![a, c]);
        assert_eq!(doc.next_sibling(a), Some(c));
        assert_eq!(doc.prev_sibling(c), Some(a));
        // still alive, just detached
        assert_eq!(doc.kind_of(b), NodeKind::Text);
        assert_eq!(doc.parent(b), None);
    }

    #[test]
    fn test_delete_frees_subtree() {
        let mut doc = Document::new();
        let root = doc.new_element(None, "root");
        let branch = doc.new_element(Some(root), "branch");
        let leaf = doc.new_text(Some(branch), false, "leaf");

        doc.delete(branch);

        assert_eq!(doc.kind_of(branch), NodeKind::Ignore);
        assert_eq!(doc.kind_of(leaf), NodeKind::Ignore);
        assert_eq!(doc.first_child(root), None);
        assert_eq!(doc.last_child(root), None);
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_freed_slots_are_reused() {
        let mut doc = Document::new();
        let root = doc.new_element(None, "root");
        let old = doc.new_integer(Some(root), 1);
        doc.delete(old);

        let fresh = doc.new_integer(Some(root), 2);
        assert_eq!(fresh, old);
        assert_eq!(doc.integer(fresh), 2);
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_append_rejects_cycles() {
        let mut doc = Document::new();
        let outer = doc.new_element(None, "outer");
        let inner = doc.new_element(Some(outer), "inner");

        assert_eq!(
            doc.append_child(inner, outer),
            Err(Error::CircularStructure(outer))
        );
        assert_eq!(
            doc.append_child(outer, outer),
            Err(Error::CircularStructure(outer))
        );
        // structure untouched
        assert_eq!(doc.parent(inner), Some(outer));
        assert_eq!(doc.parent(outer), None);
    }

    #[test]
    fn test_append_requires_element_parent() {
        let mut doc = Document::new();
        let text = doc.new_text(None, false, "t");
        let child = doc.new_integer(None, 1);

        assert_eq!(doc.append_child(text, child), Err(Error::NotAnElement(text)));
        assert_eq!(doc.append_child(99, child), Err(Error::NoSuchNode(99)));
        assert_eq!(doc.append_child(text, 99), Err(Error::NoSuchNode(99)));
    }

    #[test]
    fn test_append_reparents() {
        let mut doc = Document::new();
        let first = doc.new_element(None, "first");
        let second = doc.new_element(None, "second");
        let child = doc.new_text(Some(first), false, "t");

        doc.append_child(second, child).unwrap();

        assert_eq!(doc.children(first).count(), 0);
        assert_eq!(doc.last_child(first), None);
        assert_eq!(doc.parent(child), Some(second));
        assert_eq!(doc.first_child(second), Some(child));
    }

    #[test]
    fn test_bad_parent_leaves_node_detached() {
        let mut doc = Document::new();
        let text = doc.new_text(None, false, "t");
        let orphan = doc.new_integer(Some(text), 5);
        assert_eq!(doc.parent(orphan), None);

        let orphan2 = doc.new_integer(Some(1234), 6);
        assert_eq!(doc.parent(orphan2), None);
        assert_eq!(doc.integer(orphan2), 6);
    }

    #[test]
    fn test_descendants_in_document_order() {
        let mut doc = Document::new();
        let root = doc.new_element(None, "root");
        let a = doc.new_element(Some(root), "a");
        let b = doc.new_text(Some(a), false, "b");
        let c = doc.new_element(Some(root), "c");

        assert_eq!(doc.descendants(root).collect::<Vec<_>>(), vec![a, b, c]);
        assert_eq!(doc.children(root).collect::<Vec<_>>(), vec![a, c]);
    }
}
