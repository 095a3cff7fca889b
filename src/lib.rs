pub mod error;
pub mod json;
pub mod node;
pub mod propagate;
pub mod selector;
pub mod value;

pub use error::PropagationError;
pub use node::{Node, NodeChain, NodeId};
pub use propagate::{propagate, propagate_summary, WalkSummary};
pub use selector::Selector;
pub use value::{Kind, Mapping, Sequence, Value};

// ── Core API ───────────────────────────────────────────────────────

/// The result of an edit applied through [`set_and_propagate`].
pub struct EditResult {
    /// The document held by the root once the walk ended, including any
    /// hops committed before a failure.
    pub value: Value,
    pub error: Option<PropagationError>,
}

/// Overwrite the value of `leaf` and write it back to the root, consuming
/// the chain and returning the updated document.
///
/// A failed walk leaves lower hops committed. Callers that need the edit to
/// be all-or-nothing should keep a [`Value::deep_clone`] of the document.
pub fn set_and_propagate(mut chain: NodeChain, leaf: NodeId, value: Value) -> EditResult {
    chain.set_value(leaf, value);
    let error = chain.propagate(leaf).err();
    EditResult {
        value: chain.into_root_value(),
        error,
    }
}
