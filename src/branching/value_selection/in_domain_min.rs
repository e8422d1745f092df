use super::ValueSelector;
use crate::branching::Decision;
use crate::branching::SelectionContext;
use crate::variables::DomainId;

/// Tries the smallest value in the domain.
#[derive(Debug, Clone, Copy, Default)]
pub struct InDomainMin;

impl ValueSelector for InDomainMin {
    fn select_value(&mut self, context: &mut SelectionContext<'_>, variable: DomainId) -> Decision {
        Decision::assign(variable, context.lower_bound(&variable))
    }
}
