use crate::basic_types::PropagationStatus;
use crate::engine::IntEvent;
use crate::propagation::Entailment;
use crate::propagation::LocalId;
use crate::propagation::PropagationContext;
use crate::propagation::PropagationContextMut;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorConstructorContext;
use crate::propagation::Priority;
use crate::variables::IntVar;

#[derive(Clone, Debug)]
pub(crate) struct LinearLessOrEqualConstructor<Var> {
    pub(crate) terms: Box<[Var]>,
    pub(crate) rhs: i32,
}

impl<Var: IntVar> LinearLessOrEqualConstructor<Var> {
    pub(crate) fn new(terms: Box<[Var]>, rhs: i32) -> Self {
        LinearLessOrEqualConstructor { terms, rhs }
    }
}

/// Propagator for the constraint `\sum terms_i <= rhs`.
#[derive(Debug)]
pub(crate) struct LinearLessOrEqualPropagator<Var> {
    terms: Box<[Var]>,
    rhs: i32,
}

impl<Var> PropagatorConstructor for LinearLessOrEqualConstructor<Var>
where
    Var: IntVar + 'static,
{
    type PropagatorImpl = LinearLessOrEqualPropagator<Var>;

    fn create(self, mut context: PropagatorConstructorContext<'_>) -> Self::PropagatorImpl {
        let terms: Box<[_]> = self
            .terms
            .iter()
            .enumerate()
            .map(|(i, term)| {
                context.register(term.clone(), IntEvent::LowerBound.into(), LocalId::from(i as u32))
            })
            .collect();

        LinearLessOrEqualPropagator {
            terms,
            rhs: self.rhs,
        }
    }
}

impl<Var> Propagator for LinearLessOrEqualPropagator<Var>
where
    Var: IntVar + 'static,
{
    fn name(&self) -> &str {
        "LinearLeq"
    }

    fn priority(&self) -> Priority {
        match self.terms.len() {
            0 | 1 => Priority::Unary,
            2 => Priority::Binary,
            3 => Priority::Ternary,
            _ => Priority::Linear,
        }
    }

    fn propagate(&mut self, mut context: PropagationContextMut<'_>) -> PropagationStatus {
        let lb_lhs = self
            .terms
            .iter()
            .map(|term| i64::from(context.lower_bound(term)))
            .sum::<i64>();

        for (i, term) in self.terms.iter().enumerate() {
            let bound = i64::from(self.rhs) - (lb_lhs - i64::from(context.lower_bound(term)));
            let bound = bound.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;

            if context.upper_bound(term) > bound {
                let _ = context.set_upper_bound(term, bound)?;
            }
            // A sum of lower bounds above the right-hand side shows up as an
            // empty domain for term i.
        }

        Ok(())
    }

    fn is_entailed(&self, context: PropagationContext<'_>) -> Entailment {
        let lb_lhs = self
            .terms
            .iter()
            .map(|term| i64::from(context.lower_bound(term)))
            .sum::<i64>();
        let ub_lhs = self
            .terms
            .iter()
            .map(|term| i64::from(context.upper_bound(term)))
            .sum::<i64>();

        if ub_lhs <= i64::from(self.rhs) {
            Entailment::True
        } else if lb_lhs > i64::from(self.rhs) {
            Entailment::False
        } else {
            Entailment::Undefined
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::propagators::test_helper::TestSolver;
    use crate::variables::TransformableVariable;

    #[test]
    fn upper_bounds_are_tightened_by_the_lower_bounds_of_the_others() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(1, 5);
        let y = solver.new_variable(0, 10);

        let _ = solver
            .new_propagator(LinearLessOrEqualConstructor::new([x, y].into(), 7))
            .expect("non-empty domains");

        solver.assert_bounds(x, 1, 5);
        solver.assert_bounds(y, 0, 6);
    }

    #[test]
    fn an_unsatisfiable_sum_is_a_contradiction() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(4, 6);
        let y = solver.new_variable(5, 10);

        let result = solver.new_propagator(LinearLessOrEqualConstructor::new([x, y].into(), 7));
        assert!(result.is_err());
    }

    #[test]
    fn views_translate_the_filtering() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(0, 10);
        let y = solver.new_variable(0, 10);

        // x - y <= -1, i.e. x < y.
        let terms = [x.scaled(1), y.scaled(-1)];
        let _ = solver
            .new_propagator(LinearLessOrEqualConstructor::new(terms.into(), -1))
            .expect("non-empty domains");

        solver.assert_bounds(x, 0, 9);
        solver.assert_bounds(y, 1, 10);
    }

    #[test]
    fn enumerated_domains_snap_to_members_when_tightened() {
        let mut solver = TestSolver::default();
        let x = solver.new_sparse_variable(&[2, 5, 9]);
        let y = solver.new_variable(4, 10);

        let _ = solver
            .new_propagator(LinearLessOrEqualConstructor::new([x, y].into(), 9))
            .expect("non-empty domains");

        // The raw bound on x is 5; an enumerated domain lands on a member.
        solver.assert_bounds(x, 2, 5);
        solver.assert_bounds(y, 4, 7);
    }

    #[test]
    fn entailment_follows_the_bounds() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(0, 3);
        let y = solver.new_variable(0, 3);

        let propagator = solver
            .new_propagator(LinearLessOrEqualConstructor::new([x, y].into(), 10))
            .expect("non-empty domains");

        assert_eq!(solver.is_entailed(propagator), Entailment::True);

        let tight = solver
            .new_propagator(LinearLessOrEqualConstructor::new([x, y].into(), 3))
            .expect("non-empty domains");
        assert_eq!(solver.is_entailed(tight), Entailment::Undefined);
    }
}
