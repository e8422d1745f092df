use super::VariableSelector;
use crate::branching::SelectionContext;
use crate::variables::DomainId;

/// Branches on the unfixed variable with the fewest remaining values,
/// breaking ties by input order.
#[derive(Debug, Clone)]
pub struct SmallestDomain {
    variables: Vec<DomainId>,
}

impl SmallestDomain {
    pub fn new(variables: Vec<DomainId>) -> Self {
        SmallestDomain { variables }
    }
}

impl VariableSelector for SmallestDomain {
    fn select_variable(&mut self, context: &mut SelectionContext<'_>) -> Option<DomainId> {
        self.variables
            .iter()
            .copied()
            .filter(|variable| !context.is_fixed(variable))
            .min_by_key(|variable| context.domain_size(variable))
    }
}
