use std::io;

use thiserror::Error;

/// Bracketed tree IO error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IOError {
    /// Error in file IO.
    #[error("error reading trees")]
    IO(#[from] io::Error),

    /// Bracketed tree parsing error.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Bracketed tree parsing errors.
#[derive(Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum ParseError {
    /// The input does not contain a tree.
    #[error("no tree found")]
    MissingTree,

    /// A bracket without a label and without children: `()`.
    #[error("empty bracket in: {value:?}")]
    EmptyBracket { value: String },

    /// A closing bracket that does not close any node.
    #[error("closing bracket without opening bracket in: {value:?}")]
    UnexpectedClosingBracket { value: String },

    /// A token that is not part of a tree.
    #[error("token outside of a tree: {value:?}")]
    TokenOutsideTree { value: String },

    /// Input ended before all brackets were closed.
    #[error("tree is not terminated: {value:?}")]
    UnterminatedTree { value: String },

    /// Input remains after the tree.
    #[error("content after the tree: {value:?}")]
    TrailingContent { value: String },
}
