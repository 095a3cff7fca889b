use crate::error::PropagationError;
use crate::selector::Selector;
use crate::value::Value;
use std::fmt;
use std::ops::Index;

/// Handle to a node inside a [`NodeChain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One hop of a resolved path.
#[derive(Debug, Clone)]
pub struct Node {
    selector: Selector,
    pub(crate) value: Value,
    parent: Option<NodeId>,
    was_freshly_created: bool,
    pub(crate) has_been_propagated: bool,
    /// Set while the value has been swapped out (by the caller or by sequence
    /// growth) and the new storage has not been written into the parent yet.
    pub(crate) replaced: bool,
}

impl Node {
    fn new(selector: Selector, value: Value, parent: Option<NodeId>, created: bool) -> Self {
        Node {
            selector,
            value,
            parent,
            was_freshly_created: created,
            has_been_propagated: false,
            replaced: false,
        }
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// True if this node stands for a slot that did not exist before the
    /// path was resolved.
    pub fn was_freshly_created(&self) -> bool {
        self.was_freshly_created
    }

    /// True once this node's current value is already reflected in its
    /// parent, so writing it upward again would be redundant.
    pub fn has_been_propagated(&self) -> bool {
        self.has_been_propagated
    }
}

/// Arena owning the nodes of one resolved path.
///
/// The root is created with the chain; every other node is pushed under an
/// existing node, so parents always precede their children and the chain
/// cannot contain a cycle. A pushed node reads its value out of its parent's
/// value, so a container it holds is the same storage the parent holds.
///
/// Ids are only meaningful for the chain that issued them. Methods taking a
/// [`NodeId`] panic when it is out of range for this chain.
#[derive(Debug, Clone)]
pub struct NodeChain {
    nodes: Vec<Node>,
}

impl NodeChain {
    pub fn new(root_value: Value) -> Self {
        NodeChain {
            nodes: vec![Node::new(Selector::Root, root_value, None, false)],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// The most recently pushed node (the root for a fresh chain).
    pub fn leaf(&self) -> NodeId {
        NodeId(self.nodes.len() - 1)
    }

    /// The document as currently held by the root node.
    pub fn root_value(&self) -> &Value {
        &self.nodes[0].value
    }

    pub fn into_root_value(mut self) -> Value {
        self.nodes.swap_remove(0).value
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Add the node `selector` reaches from `parent`.
    ///
    /// The value is read out of the parent's current value. A slot that does
    /// not exist (missing key, index out of bounds, `NextAvailableIndex`, or a
    /// parent of the wrong kind) becomes a freshly created null node, to be
    /// filled with [`NodeChain::set_value`]. `Dynamic` and `Root` selectors
    /// cannot be read here and also produce a fresh null node; use
    /// [`NodeChain::push_match`] for a predicate match.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is out of range for this chain.
    pub fn push(&mut self, parent: NodeId, selector: Selector) -> NodeId {
        let found = read_slot(&self.nodes[parent.0].value, &selector);
        self.push_node(parent, selector, found)
    }

    /// Add the node for a predicate selector that matched element `index` of
    /// the parent's sequence. The predicate itself is not evaluated.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is out of range for this chain.
    pub fn push_match(
        &mut self,
        parent: NodeId,
        predicate: impl Into<String>,
        index: usize,
    ) -> NodeId {
        let found = self.nodes[parent.0].value.at(index);
        self.push_node(parent, Selector::dynamic(predicate), found)
    }

    fn push_node(&mut self, parent: NodeId, selector: Selector, found: Option<Value>) -> NodeId {
        let node = match found {
            Some(value) => Node::new(selector, value, Some(parent), false),
            None => Node::new(selector, Value::Null, Some(parent), true),
        };
        self.nodes.push(node);
        self.leaf()
    }

    /// Overwrite a node's value. This starts a new edit, so the node is no
    /// longer considered propagated.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range for this chain.
    pub fn set_value(&mut self, id: NodeId, value: Value) {
        let node = &mut self.nodes[id.0];
        node.value = value;
        node.has_been_propagated = false;
        node.replaced = true;
    }

    /// Walk from `id` up to the root, both included.
    ///
    /// The iterator panics if `id` is out of range for this chain.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            chain: self,
            next: Some(id),
        }
    }

    /// Number of hops between `id` and the root.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range for this chain.
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).count() - 1
    }

    /// Write the value of `leaf` back up to the root.
    /// See [`crate::propagate::propagate`].
    ///
    /// # Panics
    ///
    /// Panics if `leaf` is out of range for this chain.
    pub fn propagate(&mut self, leaf: NodeId) -> Result<(), PropagationError> {
        crate::propagate::propagate(self, leaf)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }
}

/// Read the slot `selector` names in `parent`. Containers come back as
/// handles sharing the parent's storage.
fn read_slot(parent: &Value, selector: &Selector) -> Option<Value> {
    match selector {
        Selector::Property(name) => parent.get(name),
        Selector::Index(index) => usize::try_from(*index).ok().and_then(|i| parent.at(i)),
        Selector::NextAvailableIndex | Selector::Dynamic(_) | Selector::Root => None,
    }
}

/// # Panics
///
/// Panics if `id` is out of range for this chain.
impl Index<NodeId> for NodeChain {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

/// Iterator over a node and its ancestors, nearest first.
pub struct Ancestors<'a> {
    chain: &'a NodeChain,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.chain[id].parent;
        Some(id)
    }
}
