mod error;
pub use error::ReorderError;

mod head;
pub use head::find_head;

mod walk;
pub use walk::Traversal;

mod rules;
pub use rules::Pass;

mod reorder;
pub use reorder::{Reorder, Rule, RuleReorderer};
