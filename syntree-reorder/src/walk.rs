use syntree::tree::Node;

use crate::ReorderError;

/// Order in which a pass visits the nodes of a tree.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Traversal {
    /// Visit the children of a node before the node itself.
    ///
    /// A node is visited when its subtrees are already transformed.
    BottomUp,

    /// Visit a node before its children.
    ///
    /// The children that are visited are the children of the node after
    /// it was transformed.
    TopDown,
}

enum Visit {
    Enter(Vec<usize>),
    Exit(Vec<usize>),
}

/// Visit every node of `root` in the given order.
///
/// Nodes are addressed by their child index paths from the root and kept
/// on an explicit work list, so the depth of the tree is not bounded by
/// the call stack. `visit` may reorder or splice the children of the node
/// that it is given, but must not touch other parts of the tree.
pub(crate) fn walk<F>(
    root: &mut Node,
    traversal: Traversal,
    mut visit: F,
) -> Result<(), ReorderError>
where
    F: FnMut(&mut Node) -> Result<(), ReorderError>,
{
    let mut work = vec![Visit::Enter(Vec::new())];

    while let Some(item) = work.pop() {
        match item {
            Visit::Enter(path) => {
                let node = node_at_mut(root, &path)?;

                if traversal == Traversal::TopDown {
                    visit(&mut *node)?;
                }

                let n_children = node.children().len();

                if traversal == Traversal::BottomUp {
                    work.push(Visit::Exit(path.clone()));
                }

                work.extend((0..n_children).rev().map(|idx| {
                    let mut child_path = Vec::with_capacity(path.len() + 1);
                    child_path.extend_from_slice(&path);
                    child_path.push(idx);
                    Visit::Enter(child_path)
                }));
            }
            Visit::Exit(path) => visit(node_at_mut(root, &path)?)?,
        }
    }

    Ok(())
}

fn node_at_mut<'a>(root: &'a mut Node, path: &[usize]) -> Result<&'a mut Node, ReorderError> {
    path.iter().try_fold(root, |node, &idx| {
        node.children_mut()
            .get_mut(idx)
            .ok_or_else(|| ReorderError::DanglingPath {
                path: path.to_vec(),
            })
    })
}

#[cfg(test)]
mod tests {
    use syntree::tree::Node;

    use super::{walk, Traversal};

    fn tree() -> Node {
        Node::with_children(
            "S",
            vec![
                Node::with_children("NP", vec![Node::preterminal("NN", "Hunde")]),
                Node::preterminal("VVFIN", "bellen"),
            ],
        )
    }

    fn visit_order(traversal: Traversal) -> Vec<String> {
        let mut tree = tree();
        let mut order = Vec::new();
        walk(&mut tree, traversal, |node| {
            order.push(node.label().to_owned());
            Ok(())
        })
        .unwrap();
        order
    }

    #[test]
    fn bottom_up_order() {
        assert_eq!(
            visit_order(Traversal::BottomUp),
            ["Hunde", "NN", "NP", "bellen", "VVFIN", "S"]
        );
    }

    #[test]
    fn top_down_order() {
        assert_eq!(
            visit_order(Traversal::TopDown),
            ["S", "NP", "NN", "Hunde", "VVFIN", "bellen"]
        );
    }

    #[test]
    fn top_down_visits_new_children() {
        let mut tree = tree();
        let mut order = Vec::new();
        walk(&mut tree, Traversal::TopDown, |node| {
            if node.label() == "NP" {
                node.children_mut().push(Node::preterminal("ADJA", "laute"));
            }
            order.push(node.label().to_owned());
            Ok(())
        })
        .unwrap();

        assert_eq!(
            order,
            ["S", "NP", "NN", "Hunde", "ADJA", "laute", "VVFIN", "bellen"]
        );
    }

    #[test]
    fn bottom_up_sees_transformed_children() {
        let mut tree = tree();
        let mut seen = Vec::new();
        walk(&mut tree, Traversal::BottomUp, |node| {
            if node.label() == "NP" {
                node.set_label("NP-SB");
            }
            if node.label() == "S" {
                seen.extend(node.children().iter().map(|c| c.label().to_owned()));
            }
            Ok(())
        })
        .unwrap();

        assert_eq!(seen, ["NP-SB", "VVFIN"]);
    }

    #[test]
    fn deep_trees() {
        let mut tree = Node::new("Ende");
        for _ in 0..1_000 {
            tree = Node::with_children("VP", vec![tree]);
        }

        let mut count = 0;
        walk(&mut tree, Traversal::BottomUp, |_| {
            count += 1;
            Ok(())
        })
        .unwrap();
        assert_eq!(count, 1_001);
    }
}
