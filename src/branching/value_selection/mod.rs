mod in_domain_min;
mod in_domain_random;
mod in_domain_split;

pub use in_domain_min::InDomainMin;
pub use in_domain_random::InDomainRandom;
pub use in_domain_split::InDomainSplit;

use super::Decision;
use super::SelectionContext;
use crate::variables::DomainId;

/// Turns a selected (unfixed) variable into a [`Decision`].
pub trait ValueSelector {
    fn select_value(
        &mut self,
        context: &mut SelectionContext<'_>,
        variable: DomainId,
    ) -> Decision;
}
