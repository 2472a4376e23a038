//! Ordered constituency trees.

use std::mem;

use crate::error::TreeError;
use crate::sentence::LeafSentence;

/// Constituency tree node.
///
/// A node has a label and an ordered list of children. The label is a
/// phrasal category (e.g. `S`, `VP`) or part-of-speech tag for inner nodes
/// and the token itself for terminals. The order of the children is the
/// linear order of the span that the node dominates.
///
/// A node owns its children, so a `Node` is also a complete (sub)tree.
/// Cloning and dropping a tree do not recurse, so they work for trees of
/// any depth.
#[derive(Debug, Eq, Hash, PartialEq)]
pub struct Node {
    label: String,
    children: Vec<Node>,
}

impl Node {
    /// Construct a terminal node.
    ///
    /// ```
    /// use syntree::tree::Node;
    ///
    /// let token = Node::new("Haus");
    /// assert!(token.is_terminal());
    /// ```
    pub fn new(label: impl Into<String>) -> Self {
        Node {
            label: label.into(),
            children: Vec::new(),
        }
    }

    /// Construct a node with the given children.
    pub fn with_children(label: impl Into<String>, children: impl Into<Vec<Node>>) -> Self {
        Node {
            label: label.into(),
            children: children.into(),
        }
    }

    /// Construct a pre-terminal: a part-of-speech tag dominating a token.
    pub fn preterminal(tag: impl Into<String>, token: impl Into<String>) -> Self {
        Node::with_children(tag, vec![Node::new(token)])
    }

    /// Get the label of the node.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Replace the label of the node.
    ///
    /// Returns the old label.
    pub fn set_label(&mut self, label: impl Into<String>) -> String {
        mem::replace(&mut self.label, label.into())
    }

    /// Get the children of the node.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Get the children of the node mutably.
    ///
    /// The child list can be spliced freely. Reordering children should
    /// preferably be done with [`relocate`].
    pub fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    /// Unwrap the children of the node.
    pub fn into_children(mut self) -> Vec<Node> {
        mem::take(&mut self.children)
    }

    /// Returns `true` if the node is a terminal (token).
    pub fn is_terminal(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns `true` if the node is a pre-terminal.
    ///
    /// A pre-terminal has exactly one child, which is a terminal.
    pub fn is_preterminal(&self) -> bool {
        match self.children.as_slice() {
            [child] => child.is_terminal(),
            _ => false,
        }
    }

    /// Get an iterator over the terminals of the tree, from left to right.
    pub fn leaves(&self) -> Leaves {
        Leaves { stack: vec![self] }
    }

    /// Get the number of nodes in the tree, including this node.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }

        count
    }

    /// Get the depth of the tree.
    ///
    /// This is the number of edges on the longest path from this node to
    /// a terminal, so the depth of a terminal is 0.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self, 0)];
        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            stack.extend(node.children.iter().map(|child| (child, depth + 1)));
        }

        max_depth
    }

    /// Get the sentence that is spanned by the tree.
    ///
    /// See [`LeafSentence`] for the format.
    pub fn sentence(&self) -> String {
        LeafSentence(self).to_string()
    }
}

impl Clone for Node {
    fn clone(&self) -> Self {
        // Nodes are completed in post-order, so the children of a node are
        // the last entries of `done` when the node itself is completed.
        let mut done: Vec<Node> = Vec::new();
        let mut stack: Vec<_> = self.children.iter().rev().map(|child| (child, false)).collect();

        while let Some((node, expanded)) = stack.pop() {
            if expanded {
                let children = done.split_off(done.len() - node.children.len());
                done.push(Node {
                    label: node.label.clone(),
                    children,
                });
            } else {
                stack.push((node, true));
                stack.extend(node.children.iter().rev().map(|child| (child, false)));
            }
        }

        Node {
            label: self.label.clone(),
            children: done,
        }
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Depth-first iterator over the terminals of a tree.
pub struct Leaves<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            if node.is_terminal() {
                return Some(node);
            }

            self.stack.extend(node.children.iter().rev());
        }

        None
    }
}

impl<'a> IntoIterator for &'a Node {
    type Item = &'a Node;
    type IntoIter = Leaves<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.leaves()
    }
}

/// Move the element at `from` to `to`.
///
/// The element is removed and then reinserted, so it ends up at index
/// `to` when `to <= from` and at index `to - 1` when `to > from`. Moving
/// an element to its own index is a no-op.
///
/// Both indices must be valid indices of `children`, otherwise an error
/// is returned and `children` is left untouched.
///
/// ```
/// use syntree::tree::relocate;
///
/// let mut children = vec!["NP", "ADV", "VVFIN"];
/// relocate(&mut children, 2, 0).unwrap();
/// assert_eq!(children, ["VVFIN", "NP", "ADV"]);
///
/// relocate(&mut children, 0, 2).unwrap();
/// assert_eq!(children, ["NP", "VVFIN", "ADV"]);
/// ```
pub fn relocate<T>(children: &mut [T], from: usize, to: usize) -> Result<(), TreeError> {
    let len = children.len();

    if from >= len {
        return Err(TreeError::FromOutOfBounds { from, len });
    }

    if to >= len {
        return Err(TreeError::ToOutOfBounds { to, len });
    }

    if to < from {
        children[to..=from].rotate_right(1);
    } else if to > from {
        children[from..to].rotate_left(1);
    }

    Ok(())
}

/// Move the element at `from` such that it directly follows the element
/// at `anchor`.
///
/// This is `relocate(children, from, anchor + 1)`, except that it also
/// works when `anchor` is the last element.
pub fn move_after<T>(children: &mut [T], from: usize, anchor: usize) -> Result<(), TreeError> {
    let len = children.len();

    if from >= len {
        return Err(TreeError::FromOutOfBounds { from, len });
    }

    if anchor >= len {
        return Err(TreeError::ToOutOfBounds { to: anchor, len });
    }

    if from == anchor {
        return Ok(());
    }

    if from > anchor || anchor + 1 < len {
        relocate(children, from, anchor + 1)
    } else {
        // The anchor is the last element: place the element before the
        // anchor and then move the anchor in front of it.
        relocate(children, from, anchor)?;
        relocate(children, anchor, anchor - 1)
    }
}
