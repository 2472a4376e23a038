use syntree::tree::Node;

/// Find the verbal head among the children of a node.
///
/// The head is the leftmost child that is a pre-terminal with a verbal
/// part-of-speech tag (a tag starting with `V`). Only the direct children
/// are considered.
pub fn find_head(children: &[Node]) -> Option<usize> {
    children
        .iter()
        .position(|child| child.label().starts_with('V') && child.is_preterminal())
}
