use crate::basic_types::PropagationStatus;
use crate::engine::IntEvent;
use crate::engine::SetEvent;
use crate::propagation::Entailment;
use crate::propagation::LocalId;
use crate::propagation::PropagationContext;
use crate::propagation::PropagationContextMut;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorConstructorContext;
use crate::propagation::Priority;
use crate::variables::DomainId;
use crate::variables::IntVar;
use crate::variables::SetVarId;

#[derive(Clone, Debug)]
pub(crate) struct SetCardinalityConstructor {
    pub(crate) set: SetVarId,
    pub(crate) cardinality: DomainId,
}

/// Propagator channelling `|set| = cardinality`.
///
/// The kernel and envelope sizes bound the cardinality; conversely, when the
/// cardinality is pinned to one of those sizes, the remaining candidate
/// elements are all excluded or all enforced.
#[derive(Debug)]
pub(crate) struct SetCardinalityPropagator {
    set: SetVarId,
    cardinality: DomainId,
}

impl PropagatorConstructor for SetCardinalityConstructor {
    type PropagatorImpl = SetCardinalityPropagator;

    fn create(self, mut context: PropagatorConstructorContext<'_>) -> Self::PropagatorImpl {
        let _ = context.register_set(
            self.set,
            SetEvent::KernelAdd | SetEvent::EnvelopeRemove,
            LocalId::from(0),
        );
        let _ = context.register(
            self.cardinality,
            IntEvent::LowerBound | IntEvent::UpperBound,
            LocalId::from(1),
        );

        SetCardinalityPropagator {
            set: self.set,
            cardinality: self.cardinality,
        }
    }
}

impl Propagator for SetCardinalityPropagator {
    fn name(&self) -> &str {
        "SetCardinality"
    }

    fn priority(&self) -> Priority {
        Priority::Linear
    }

    fn propagate(&mut self, mut context: PropagationContextMut<'_>) -> PropagationStatus {
        let kernel_size = context.kernel_size(self.set) as i32;
        let envelope_size = context.envelope_size(self.set) as i32;

        let _ = context.set_lower_bound(&self.cardinality, kernel_size)?;
        let _ = context.set_upper_bound(&self.cardinality, envelope_size)?;

        if context.upper_bound(&self.cardinality) == kernel_size {
            // No more elements fit; the envelope collapses onto the kernel.
            let candidates = context
                .envelope_iter(self.set)
                .filter(|&element| !context.kernel_contains(self.set, element))
                .collect::<Vec<_>>();
            for element in candidates {
                let _ = context.exclude(self.set, element)?;
            }
        } else if context.lower_bound(&self.cardinality) == envelope_size {
            // Every candidate is needed to reach the cardinality.
            let candidates = context.envelope_iter(self.set).collect::<Vec<_>>();
            for element in candidates {
                let _ = context.enforce(self.set, element)?;
            }
        }

        Ok(())
    }

    fn is_entailed(&self, context: PropagationContext<'_>) -> Entailment {
        let kernel_size = context.kernel_size(self.set) as i32;
        let envelope_size = context.envelope_size(self.set) as i32;

        if context.upper_bound(&self.cardinality) < kernel_size
            || context.lower_bound(&self.cardinality) > envelope_size
        {
            return Entailment::False;
        }
        if kernel_size == envelope_size && context.is_fixed(&self.cardinality) {
            return if context.value(&self.cardinality) == kernel_size {
                Entailment::True
            } else {
                Entailment::False
            };
        }
        Entailment::Undefined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::propagators::test_helper::TestSolver;

    #[test]
    fn the_sizes_bound_the_cardinality() {
        let mut solver = TestSolver::default();
        let set = solver.new_set(&[1, 2], &[1, 2, 3, 4, 5]);
        let cardinality = solver.new_variable(0, 10);

        let _ = solver
            .new_propagator(SetCardinalityConstructor { set, cardinality })
            .expect("consistent");

        solver.assert_bounds(cardinality, 2, 5);
    }

    #[test]
    fn a_tight_upper_cardinality_collapses_the_envelope() {
        let mut solver = TestSolver::default();
        let set = solver.new_set(&[1, 2], &[1, 2, 3, 4]);
        let cardinality = solver.new_variable(0, 2);

        let _ = solver
            .new_propagator(SetCardinalityConstructor { set, cardinality })
            .expect("consistent");

        assert!(solver.engine.store.set_is_fixed(set));
        assert!(!solver.engine.store.envelope_contains(set, 3));
        assert!(!solver.engine.store.envelope_contains(set, 4));
    }

    #[test]
    fn a_tight_lower_cardinality_fills_the_kernel() {
        let mut solver = TestSolver::default();
        let set = solver.new_set(&[], &[7, 8, 9]);
        let cardinality = solver.new_variable(3, 5);

        let _ = solver
            .new_propagator(SetCardinalityConstructor { set, cardinality })
            .expect("consistent");

        assert!(solver.engine.store.set_is_fixed(set));
        assert_eq!(solver.engine.store.kernel_size(set), 3);
        assert_eq!(solver.upper_bound(cardinality), 3);
    }

    #[test]
    fn an_unreachable_cardinality_is_a_contradiction() {
        let mut solver = TestSolver::default();
        let set = solver.new_set(&[], &[1, 2]);
        let cardinality = solver.new_variable(4, 6);

        let result = solver.new_propagator(SetCardinalityConstructor { set, cardinality });
        assert!(result.is_err());
    }
}
