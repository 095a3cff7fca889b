//! Write-back of an edited leaf value through the ancestors of a node chain.
//!
//! Mapping keys and existing sequence slots are written through the shared
//! container handle the parent already holds, so the grandparent sees the
//! change without being rewritten. Growing a sequence produces new storage
//! that only the parent has been given; that replacement is itself an edit
//! and keeps travelling upward.

use crate::error::PropagationError;
use crate::node::{NodeChain, NodeId};
use crate::selector::Selector;
use crate::value::{Sequence, Value};
use log::{debug, trace};

/// What a single hop did to the parent's value.
enum Write {
    /// The parent's container was changed in place; its identity is unchanged.
    InPlace,
    /// The parent must now hold this new sequence instead of its old one.
    Grown(Sequence),
}

/// What a completed walk did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WalkSummary {
    /// Parent links followed, equal to the depth of the leaf.
    pub hops: usize,
    /// Hops that wrote into the parent's value.
    pub writes: usize,
}

/// Propagate the value of `leaf` up to the root of `chain`.
///
/// Walks `leaf -> parent -> ... -> root`. At each hop the node's value is
/// written into its parent unless the node is already reflected there and
/// is not a freshly created slot. The walk always continues to the root.
/// On error, hops below the failing one stay committed.
///
/// # Panics
///
/// Panics if `leaf` is out of range for `chain`.
pub fn propagate(chain: &mut NodeChain, leaf: NodeId) -> Result<(), PropagationError> {
    propagate_summary(chain, leaf).map(|_| ())
}

/// Same as [`propagate`], reporting how many hops and writes the walk took.
pub fn propagate_summary(
    chain: &mut NodeChain,
    leaf: NodeId,
) -> Result<WalkSummary, PropagationError> {
    debug!("propagating {} (node {})", chain[leaf].selector(), leaf);

    let mut summary = WalkSummary::default();
    let mut current = leaf;
    while let Some(parent) = chain[current].parent() {
        let node = &chain[current];
        if !node.has_been_propagated() || node.was_freshly_created() {
            propagate_value(chain, current, parent)?;
            summary.writes += 1;
        } else {
            trace!(
                "node {} ({}) already reflected in node {}",
                current,
                node.selector(),
                parent
            );
        }
        current = parent;
        summary.hops += 1;
    }

    debug!(
        "reached root from node {} after {} hops, {} writes",
        leaf, summary.hops, summary.writes
    );
    Ok(summary)
}

/// Write the value of node `id` into the value of its parent.
fn propagate_value(chain: &mut NodeChain, id: NodeId, parent: NodeId) -> Result<(), PropagationError> {
    let node = &chain[id];
    let value = node.value().clone();
    let previous = chain[parent].value();

    let write = match node.selector() {
        Selector::Property(name) => {
            let map = match previous {
                Value::Mapping(map) => map,
                other => return Err(mismatch(id, node.selector(), other)),
            };
            map.insert(name.as_str(), value);
            Write::InPlace
        }
        Selector::Index(index) => {
            let seq = expect_sequence(id, node.selector(), previous)?;
            match usize::try_from(*index) {
                Ok(slot) if slot < seq.len() => {
                    seq.set(slot, value);
                    Write::InPlace
                }
                _ => Write::Grown(seq.appended(value)),
            }
        }
        Selector::NextAvailableIndex => {
            let seq = expect_sequence(id, node.selector(), previous)?;
            Write::Grown(seq.appended(value))
        }
        Selector::Dynamic(_) | Selector::Root => {
            return Err(PropagationError::UnsupportedSelector {
                node: id,
                selector: node.selector().clone(),
            })
        }
    };

    match write {
        Write::InPlace => {
            trace!("node {} written in place into node {}", id, parent);
            // A parent holding replaced storage still has to reach its own parent.
            let parent_node = chain.node_mut(parent);
            if !parent_node.replaced {
                parent_node.has_been_propagated = true;
            }
        }
        Write::Grown(seq) => {
            trace!(
                "node {} appended, node {} now holds {} elements",
                id,
                parent,
                seq.len()
            );
            let parent_node = chain.node_mut(parent);
            parent_node.value = Value::Sequence(seq);
            parent_node.has_been_propagated = false;
            parent_node.replaced = true;
        }
    }
    let node = chain.node_mut(id);
    node.has_been_propagated = true;
    node.replaced = false;
    Ok(())
}

fn expect_sequence<'a>(
    id: NodeId,
    selector: &Selector,
    previous: &'a Value,
) -> Result<&'a Sequence, PropagationError> {
    match previous {
        Value::Sequence(seq) => Ok(seq),
        other => Err(mismatch(id, selector, other)),
    }
}

fn mismatch(id: NodeId, selector: &Selector, previous: &Value) -> PropagationError {
    if previous.is_null() {
        PropagationError::InvalidPreviousValue {
            node: id,
            selector: selector.clone(),
        }
    } else {
        PropagationError::UnsupportedTypeForSelector {
            node: id,
            selector: selector.clone(),
            kind: previous.kind(),
        }
    }
}
