use rand::Rng;

use super::ValueSelector;
use crate::branching::Decision;
use crate::branching::SelectionContext;
use crate::variables::DomainId;

/// Tries a uniformly random value from the domain.
#[derive(Debug, Clone, Copy, Default)]
pub struct InDomainRandom;

impl ValueSelector for InDomainRandom {
    fn select_value(&mut self, context: &mut SelectionContext<'_>, variable: DomainId) -> Decision {
        let lower_bound = context.lower_bound(&variable);
        let upper_bound = context.upper_bound(&variable);
        let size = context.domain_size(&variable);
        let target = context.random().gen_range(0..size);

        let value = (lower_bound..=upper_bound)
            .filter(|&value| context.contains(&variable, value))
            .nth(target as usize)
            .expect("the domain has at least `size` values between its bounds");
        Decision::assign(variable, value)
    }
}
