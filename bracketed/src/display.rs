use std::fmt;

use syntree::tree::Node;

/// Bracketed notation of a tree.
///
/// Terminals are written as-is, other nodes as their label followed by
/// their children, separated by spaces and enclosed in brackets.
///
/// ```
/// use bracketed::display::BracketedTree;
/// use syntree::tree::Node;
///
/// let tree = Node::with_children("NP", vec![
///     Node::preterminal("ART", "das"),
///     Node::preterminal("NN", "Haus"),
/// ]);
/// assert_eq!(BracketedTree(&tree).to_string(), "(NP (ART das) (NN Haus))");
/// ```
pub struct BracketedTree<'a>(pub &'a Node);

enum Item<'a> {
    Node(&'a Node),
    Close,
}

impl<'a> fmt::Display for BracketedTree<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut stack = vec![Item::Node(self.0)];
        let mut first = true;

        while let Some(item) = stack.pop() {
            match item {
                Item::Close => write!(f, ")")?,
                Item::Node(node) => {
                    if !first {
                        write!(f, " ")?;
                    }
                    first = false;

                    if node.is_terminal() {
                        write!(f, "{}", node.label())?;
                        continue;
                    }

                    write!(f, "({}", node.label())?;
                    stack.push(Item::Close);
                    stack.extend(node.children().iter().rev().map(Item::Node));
                }
            }
        }

        Ok(())
    }
}
