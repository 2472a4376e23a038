pub mod error;
pub use crate::error::TreeError;

pub mod sentence;

pub mod tree;
