//! Serialization of trees to token sequences.

use std::fmt;

use crate::tree::Node;

/// The sentence spanned by a tree.
///
/// Formats the terminals of the tree from left to right. Every token is
/// followed by a single space, including the last token. Record separators
/// (such as newlines) are left to the caller.
///
/// ```
/// use syntree::sentence::LeafSentence;
/// use syntree::tree::Node;
///
/// let tree = Node::with_children(
///     "S",
///     vec![Node::preterminal("PPER", "Er"), Node::preterminal("VVFIN", "schläft")],
/// );
/// assert_eq!(LeafSentence(&tree).to_string(), "Er schläft ");
/// ```
pub struct LeafSentence<'a>(pub &'a Node);

impl<'a> fmt::Display for LeafSentence<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for leaf in self.0.leaves() {
            write!(f, "{} ", leaf.label())?;
        }

        Ok(())
    }
}
