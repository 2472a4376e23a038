use syntree::TreeError;

use crate::Pass;

/// Reordering errors.
#[derive(Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum ReorderError {
    /// A pass computed a relocation that does not fit the children of a node.
    #[error("{pass} pass cannot reorder the children of {label:?}")]
    Structural {
        pass: Pass,
        label: String,
        #[source]
        source: TreeError,
    },

    /// A node could not be found while walking the tree.
    #[error("no node at path {path:?}")]
    DanglingPath { path: Vec<usize> },

    /// The tree is deeper than the reorderer accepts.
    #[error("tree depth {depth} exceeds the maximum depth of {max_depth}")]
    TooDeep { depth: usize, max_depth: usize },

    /// Unknown rule name.
    #[error("unknown rule {value:?}, expected one of: {expected}")]
    UnknownRule { value: String, expected: String },
}
