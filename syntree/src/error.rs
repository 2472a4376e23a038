use thiserror::Error;

/// Tree manipulation error.
#[derive(Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum TreeError {
    #[error("source index {from:?} is out of bounds for a node with {len:?} children")]
    FromOutOfBounds { from: usize, len: usize },

    #[error("target index {to:?} is out of bounds for a node with {len:?} children")]
    ToOutOfBounds { to: usize, len: usize },
}
