//! Rule-based reordering of constituency trees.

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use syntree::tree::Node;
use tracing::{debug, instrument};

use crate::{Pass, ReorderError};

/// Tree reorderer.
pub trait Reorder {
    /// Reorder a tree.
    ///
    /// This method reorders the children of nodes in the tree, so that the
    /// sentence spanned by the tree follows the word order of the target
    /// language more closely.
    fn reorder(&self, tree: &mut Node) -> Result<(), ReorderError>;
}

/// German to English reordering rules.
///
/// The rules follow Collins et al., *Clause Restructuring for Statistical
/// Machine Translation*, 2005. Rules are ordered by the order in which
/// they are applied.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Rule {
    /// In every `VP`, move the verbal head to the front.
    VerbInitial,

    /// In clauses with a subordinator, move the verbal head directly after
    /// the subordinator.
    VerbSecond,

    /// In every clause, move the subject directly before the verbal head.
    Subject,

    /// Move separable verb particles directly before the finite verb.
    Particles,

    /// Flatten verb phrases and gather the non-finite verbs of a clause
    /// directly after the finite verb.
    Infinitives,

    /// In clauses with non-finite verbs, move the negation particle
    /// directly after the finite verb.
    Negation,
}

impl Rule {
    /// All rules, in the order of application.
    pub const ALL: [Rule; 6] = [
        Rule::VerbInitial,
        Rule::VerbSecond,
        Rule::Subject,
        Rule::Particles,
        Rule::Infinitives,
        Rule::Negation,
    ];

    /// Get the passes that implement the rule.
    pub fn passes(self) -> &'static [Pass] {
        match self {
            Rule::VerbInitial => &[Pass::VerbInitial],
            Rule::VerbSecond => &[Pass::VerbSecond],
            Rule::Subject => &[Pass::Subject],
            Rule::Particles => &[Pass::Particles],
            Rule::Infinitives => &[Pass::Flatten, Pass::ReorderVerbs],
            Rule::Negation => &[Pass::Negation],
        }
    }

    /// Apply the rule to a tree.
    ///
    /// The tree is modified in place. If a pass fails, the tree may be
    /// partially reordered; use [`RuleReorderer`] to reorder atomically.
    pub fn apply(self, tree: &mut Node) -> Result<(), ReorderError> {
        for pass in self.passes() {
            pass.run(tree)?;
        }

        Ok(())
    }

    /// Get the name of the rule.
    pub fn name(self) -> &'static str {
        match self {
            Rule::VerbInitial => "verb-initial",
            Rule::VerbSecond => "verb-second",
            Rule::Subject => "subject",
            Rule::Particles => "particles",
            Rule::Infinitives => "infinitives",
            Rule::Negation => "negation",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Rule {
    type Err = ReorderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rule::ALL
            .iter()
            .copied()
            .find(|rule| rule.name() == s)
            .ok_or_else(|| ReorderError::UnknownRule {
                value: s.to_owned(),
                expected: Rule::ALL.iter().join(", "),
            })
    }
}

/// Reorderer that applies a sequence of rules.
///
/// Rules are always applied in the order of [`Rule::ALL`]. Trees that are
/// deeper than the maximum depth are rejected with
/// [`ReorderError::TooDeep`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RuleReorderer {
    rules: Vec<Rule>,
    max_depth: usize,
}

impl RuleReorderer {
    /// Default maximum tree depth.
    pub const DEFAULT_MAX_DEPTH: usize = 1_000;

    /// Construct a reorderer that applies all rules.
    pub fn new() -> Self {
        RuleReorderer::with_rules(Rule::ALL.iter().copied())
    }

    /// Construct a reorderer that applies the given rules.
    ///
    /// Duplicate rules are applied once.
    pub fn with_rules(rules: impl IntoIterator<Item = Rule>) -> Self {
        let mut rules: Vec<_> = rules.into_iter().collect();
        rules.sort_unstable();
        rules.dedup();
        RuleReorderer {
            rules,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the maximum depth of trees that are reordered.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Get the rules of the reorderer, in order of application.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

impl Default for RuleReorderer {
    fn default() -> Self {
        RuleReorderer::new()
    }
}

impl Reorder for RuleReorderer {
    /// Reorder a tree.
    ///
    /// Reordering is atomic: when a rule fails, the error is returned and
    /// the tree is left unchanged.
    #[instrument(level = "debug", skip_all)]
    fn reorder(&self, tree: &mut Node) -> Result<(), ReorderError> {
        let depth = tree.depth();
        if depth > self.max_depth {
            return Err(ReorderError::TooDeep {
                depth,
                max_depth: self.max_depth,
            });
        }

        commit_on_success(tree, |reordered| {
            for rule in &self.rules {
                debug!(%rule, "applying rule");
                rule.apply(reordered)?;
            }

            Ok(())
        })
    }
}

/// Apply `f` to a copy of `tree`. `tree` is replaced by the copy only
/// when `f` succeeds.
fn commit_on_success<F>(tree: &mut Node, f: F) -> Result<(), ReorderError>
where
    F: FnOnce(&mut Node) -> Result<(), ReorderError>,
{
    let mut copy = tree.clone();
    f(&mut copy)?;
    *tree = copy;

    Ok(())
}
