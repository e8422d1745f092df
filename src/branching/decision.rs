use crate::basic_types::EmptyDomain;
use crate::variables::DomainId;
use crate::variables::IntVar;
use crate::variables::VariableStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecisionKind {
    /// Try `variable = value`; the refutation is `variable != value`.
    Assign(i32),
    /// Try `variable <= value`; the refutation is `variable > value`.
    UpperBound(i32),
}

/// A branching step: a domain restriction together with its refutation. The
/// search applies the restriction in a fresh world, and applies the
/// refutation in the parent world when that subtree is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    variable: DomainId,
    kind: DecisionKind,
}

impl Decision {
    pub fn assign(variable: DomainId, value: i32) -> Self {
        Decision {
            variable,
            kind: DecisionKind::Assign(value),
        }
    }

    pub fn upper_bound(variable: DomainId, bound: i32) -> Self {
        Decision {
            variable,
            kind: DecisionKind::UpperBound(bound),
        }
    }

    pub(crate) fn apply(&self, store: &mut VariableStore) -> Result<bool, EmptyDomain> {
        match self.kind {
            DecisionKind::Assign(value) => self.variable.instantiate(store, value),
            DecisionKind::UpperBound(bound) => self.variable.set_upper_bound(store, bound),
        }
    }

    pub(crate) fn refute(&self, store: &mut VariableStore) -> Result<bool, EmptyDomain> {
        match self.kind {
            DecisionKind::Assign(value) => self.variable.remove(store, value),
            DecisionKind::UpperBound(bound) => self.variable.set_lower_bound(store, bound + 1),
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            DecisionKind::Assign(value) => write!(f, "{} = {value}", self.variable),
            DecisionKind::UpperBound(bound) => write!(f, "{} <= {bound}", self.variable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn an_assignment_and_its_refutation_partition_the_domain() {
        let mut store = VariableStore::new();
        let x = store.new_bounded_integer(1, 5);
        let decision = Decision::assign(x, 1);

        store.env.world_push();
        assert!(decision.apply(&mut store).unwrap());
        assert!(store.int_is_fixed(x));

        store.env.world_pop();
        assert!(decision.refute(&mut store).unwrap());
        assert_eq!(store.int_lower_bound(x), 2);
    }

    #[test]
    fn a_split_and_its_refutation_partition_the_domain() {
        let mut store = VariableStore::new();
        let x = store.new_bounded_integer(1, 8);
        let decision = Decision::upper_bound(x, 4);

        store.env.world_push();
        assert!(decision.apply(&mut store).unwrap());
        assert_eq!(store.int_upper_bound(x), 4);

        store.env.world_pop();
        assert!(decision.refute(&mut store).unwrap());
        assert_eq!(store.int_lower_bound(x), 5);
    }
}
