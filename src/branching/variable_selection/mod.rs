mod input_order;
mod smallest_domain;

pub use input_order::InputOrder;
pub use smallest_domain::SmallestDomain;

use super::SelectionContext;
use crate::variables::DomainId;

/// Picks the next variable to branch on, or `None` when all of its variables
/// are fixed.
pub trait VariableSelector {
    fn select_variable(&mut self, context: &mut SelectionContext<'_>) -> Option<DomainId>;
}
