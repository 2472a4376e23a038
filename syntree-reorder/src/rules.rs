//! Reordering passes.
//!
//! Every pass transforms the children of a single node. A pass is applied
//! to a whole tree by walking the tree in the pass' traversal order.

use std::fmt;

use itertools::Itertools;
use syntree::tree::{move_after, relocate, Node};
use syntree::TreeError;
use tracing::{debug, trace};

use crate::walk::walk;
use crate::{find_head, ReorderError, Traversal};

const CLAUSE: &str = "S";

const VERB_PHRASE: &str = "VP";

const SEPARABLE_PARTICLE: &str = "PTKVZ";

const NEGATION_PARTICLE: &str = "PTKNEG";

/// Subordinating conjunctions and relative/interrogative markers.
const SUBORDINATORS: [&str; 5] = ["KOUS", "PWAV", "PWS", "PRELS", "PRELAT"];

/// Subject candidates.
const SUBJECTS: [&str; 2] = ["NP", "PPER"];

const FINITE_VERBS: [&str; 3] = ["VVFIN", "VAFIN", "VMFIN"];

const NON_FINITE_VERBS: [&str; 9] = [
    "VVINF", "VVIMP", "VVIZU", "VVPP", "VAIMP", "VAINF", "VAPP", "VMINF", "VMPP",
];

/// A single pass over a tree.
///
/// Most rules consist of one pass, except for the infinitive rule, which
/// first flattens verb phrases and then reorders the verbs of clauses.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Pass {
    /// Move the verbal head of a `VP` to the front.
    VerbInitial,

    /// Move the verbal head of a subordinate clause after the subordinator.
    VerbSecond,

    /// Move the subject of a clause before its verbal head.
    Subject,

    /// Move a separable verb particle before the finite verb.
    Particles,

    /// Replace `VP` children by their children.
    Flatten,

    /// Gather non-finite verbs directly after the finite verb.
    ReorderVerbs,

    /// Move the negation particle after the finite verb.
    Negation,
}

impl Pass {
    /// The order in which the pass visits nodes.
    ///
    /// The verb-initial, verb-second, and subject passes see clauses with
    /// their subtrees already reordered. The other passes descend into the
    /// children that a node has after it was transformed.
    pub fn traversal(self) -> Traversal {
        match self {
            Pass::VerbInitial | Pass::VerbSecond | Pass::Subject => Traversal::BottomUp,
            Pass::Particles | Pass::Flatten | Pass::ReorderVerbs | Pass::Negation => {
                Traversal::TopDown
            }
        }
    }

    /// Apply the pass to the children of a single node.
    ///
    /// Nodes that do not meet the conditions of the pass are left
    /// untouched.
    pub fn apply(self, node: &mut Node) -> Result<(), TreeError> {
        match self {
            Pass::VerbInitial => verb_initial(node),
            Pass::VerbSecond => verb_second(node),
            Pass::Subject => subject(node),
            Pass::Particles => particles(node),
            Pass::Flatten => {
                flatten(node);
                Ok(())
            }
            Pass::ReorderVerbs => reorder_verbs(node),
            Pass::Negation => negation(node),
        }
    }

    /// Apply the pass to every node of a tree.
    pub fn run(self, tree: &mut Node) -> Result<(), ReorderError> {
        debug!(pass = %self, traversal = ?self.traversal(), "running pass");

        walk(tree, self.traversal(), |node| {
            self.apply(node)
                .map_err(|source| ReorderError::Structural {
                    pass: self,
                    label: node.label().to_owned(),
                    source,
                })
        })
    }

    fn name(self) -> &'static str {
        match self {
            Pass::VerbInitial => "verb-initial",
            Pass::VerbSecond => "verb-second",
            Pass::Subject => "subject",
            Pass::Particles => "particles",
            Pass::Flatten => "flatten",
            Pass::ReorderVerbs => "reorder-verbs",
            Pass::Negation => "negation",
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn is_finite(label: &str) -> bool {
    label.starts_with('V') && label.ends_with("FIN")
}

fn is_non_finite(label: &str) -> bool {
    label.starts_with('V') && !label.ends_with("FIN")
}

fn is_verb_phrase(node: &Node) -> bool {
    node.label() == VERB_PHRASE && !node.is_terminal()
}

fn position(children: &[Node], predicate: impl Fn(&str) -> bool) -> Option<usize> {
    children.iter().position(|child| predicate(child.label()))
}

fn labels(children: &[Node]) -> String {
    children.iter().map(Node::label).join(" ")
}

fn verb_initial(node: &mut Node) -> Result<(), TreeError> {
    if node.label() != VERB_PHRASE {
        return Ok(());
    }

    if let Some(head) = find_head(node.children()) {
        relocate(node.children_mut(), head, 0)?;
        trace!(head, children = %labels(node.children()), "verb-initial");
    }

    Ok(())
}

fn verb_second(node: &mut Node) -> Result<(), TreeError> {
    if node.label() != CLAUSE {
        return Ok(());
    }

    // Only the first subordinator is considered.
    let subordinator = match position(node.children(), |label| SUBORDINATORS.contains(&label)) {
        Some(idx) => idx,
        None => return Ok(()),
    };

    if let Some(head) = find_head(node.children()) {
        move_after(node.children_mut(), head, subordinator)?;
        trace!(head, subordinator, children = %labels(node.children()), "verb-second");
    }

    Ok(())
}

fn subject(node: &mut Node) -> Result<(), TreeError> {
    if node.label() != CLAUSE {
        return Ok(());
    }

    let subject = position(node.children(), |label| SUBJECTS.contains(&label));
    if let (Some(subject), Some(head)) = (subject, find_head(node.children())) {
        // The subject takes the slot of the head, which puts the subject
        // directly before the head.
        relocate(node.children_mut(), subject, head)?;
        trace!(subject, head, children = %labels(node.children()), "subject");
    }

    Ok(())
}

fn particles(node: &mut Node) -> Result<(), TreeError> {
    if node.label() != CLAUSE {
        return Ok(());
    }

    let finite = position(node.children(), |label| FINITE_VERBS.contains(&label));
    let particle = position(node.children(), |label| label == SEPARABLE_PARTICLE);

    if let (Some(finite), Some(particle)) = (finite, particle) {
        if finite > 0 && particle > 0 {
            relocate(node.children_mut(), particle, finite)?;
            trace!(particle, finite, children = %labels(node.children()), "particles");
        }
    }

    Ok(())
}

fn flatten(node: &mut Node) {
    if !node.children().iter().any(is_verb_phrase) {
        return;
    }

    // Children are popped from the end, so push them in reverse order.
    let mut pending: Vec<_> = node.children_mut().drain(..).rev().collect();
    let mut flattened = Vec::with_capacity(pending.len());

    while let Some(child) = pending.pop() {
        if is_verb_phrase(&child) {
            pending.extend(child.into_children().into_iter().rev());
        } else {
            flattened.push(child);
        }
    }

    *node.children_mut() = flattened;
    trace!(label = node.label(), children = %labels(node.children()), "flatten");
}

fn reorder_verbs(node: &mut Node) -> Result<(), TreeError> {
    if node.label() != CLAUSE {
        return Ok(());
    }

    let children = node.children_mut();

    let mut finite = match position(children, is_finite) {
        Some(idx) => idx,
        None => return Ok(()),
    };

    // Non-finite verbs before the finite verb. These are processed from
    // right to left, so that every verb is placed before the verbs that
    // were moved earlier.
    for idx in (0..finite).rev() {
        if is_non_finite(children[idx].label()) {
            move_after(children, idx, finite)?;
            finite -= 1;
        }
    }

    let mut cursor = finite + 1;
    for idx in cursor..children.len() {
        if is_non_finite(children[idx].label()) {
            relocate(children, idx, cursor)?;
            cursor += 1;
        }
    }

    trace!(finite, children = %labels(children), "reorder-verbs");

    Ok(())
}

fn negation(node: &mut Node) -> Result<(), TreeError> {
    if node.label() != CLAUSE {
        return Ok(());
    }

    let children = node.children_mut();

    let finite = match position(children, is_finite) {
        Some(idx) => idx,
        None => return Ok(()),
    };

    if position(children, |label| NON_FINITE_VERBS.contains(&label)).is_none() {
        return Ok(());
    }

    if let Some(negation) = position(children, |label| label == NEGATION_PARTICLE) {
        move_after(children, negation, finite)?;
        trace!(negation, finite, children = %labels(children), "negation");
    }

    Ok(())
}
