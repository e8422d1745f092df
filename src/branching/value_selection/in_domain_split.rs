use super::ValueSelector;
use crate::branching::Decision;
use crate::branching::SelectionContext;
use crate::variables::DomainId;

/// Bisects the domain, trying the lower half first.
#[derive(Debug, Clone, Copy, Default)]
pub struct InDomainSplit;

impl ValueSelector for InDomainSplit {
    fn select_value(&mut self, context: &mut SelectionContext<'_>, variable: DomainId) -> Decision {
        let lower_bound = context.lower_bound(&variable);
        let upper_bound = context.upper_bound(&variable);
        // The midpoint rounds down, so the upper half is never empty and the
        // refutation `variable > mid` always removes something.
        let mid = lower_bound + (upper_bound - lower_bound) / 2;
        Decision::upper_bound(variable, mid)
    }
}
