use super::VariableSelector;
use crate::branching::SelectionContext;
use crate::variables::DomainId;

/// Branches on the first unfixed variable in the order they were given.
#[derive(Debug, Clone)]
pub struct InputOrder {
    variables: Vec<DomainId>,
}

impl InputOrder {
    pub fn new(variables: Vec<DomainId>) -> Self {
        InputOrder { variables }
    }
}

impl VariableSelector for InputOrder {
    fn select_variable(&mut self, context: &mut SelectionContext<'_>) -> Option<DomainId> {
        self.variables
            .iter()
            .copied()
            .find(|variable| !context.is_fixed(variable))
    }
}
