use crate::node::NodeId;
use crate::selector::Selector;
use crate::value::Kind;
use thiserror::Error;

/// Why a write-back walk stopped.
///
/// Each variant names the hop that failed: the node being written upward and
/// its selector. Hops below it have already been committed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropagationError {
    /// The parent holds null where a container was expected.
    #[error("could not propagate value: previous value of {selector} (node {node}) is null")]
    InvalidPreviousValue { node: NodeId, selector: Selector },

    /// The parent holds a value of the wrong kind for this selector.
    #[error("could not propagate value: selector {selector} (node {node}) cannot write into a {kind}")]
    UnsupportedTypeForSelector {
        node: NodeId,
        selector: Selector,
        kind: Kind,
    },

    /// The selector has no write-back semantics.
    #[error("could not propagate value: unsupported selector {selector} (node {node})")]
    UnsupportedSelector { node: NodeId, selector: Selector },
}

impl PropagationError {
    /// The node whose value could not be written into its parent.
    pub fn node(&self) -> NodeId {
        match self {
            PropagationError::InvalidPreviousValue { node, .. }
            | PropagationError::UnsupportedTypeForSelector { node, .. }
            | PropagationError::UnsupportedSelector { node, .. } => *node,
        }
    }

    pub fn selector(&self) -> &Selector {
        match self {
            PropagationError::InvalidPreviousValue { selector, .. }
            | PropagationError::UnsupportedTypeForSelector { selector, .. }
            | PropagationError::UnsupportedSelector { selector, .. } => selector,
        }
    }
}
