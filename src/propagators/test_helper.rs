//! A thin harness for exercising a propagator against the engine in unit
//! tests.

use crate::basic_types::PropagationStatus;
use crate::engine::PropagationEngine;
use crate::propagation::Entailment;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorId;
use crate::variables::DomainId;
use crate::variables::GraphVarId;
use crate::variables::IntVar;
use crate::variables::SetVarId;

#[derive(Default)]
pub(crate) struct TestSolver {
    pub(crate) engine: PropagationEngine,
}

impl TestSolver {
    pub(crate) fn new_variable(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        self.engine.new_bounded_integer(lower_bound, upper_bound)
    }

    pub(crate) fn new_sparse_variable(&mut self, values: &[i32]) -> DomainId {
        self.engine.new_enumerated_integer(values)
    }

    pub(crate) fn new_set(&mut self, kernel: &[i32], envelope: &[i32]) -> SetVarId {
        self.engine.new_set_var(kernel, envelope)
    }

    pub(crate) fn new_graph(&mut self, num_nodes: usize) -> GraphVarId {
        self.engine.new_graph_var(num_nodes)
    }

    /// Post the propagator and run the initial propagation to fixpoint.
    pub(crate) fn new_propagator<Constructor: PropagatorConstructor>(
        &mut self,
        constructor: Constructor,
    ) -> Result<PropagatorId, crate::basic_types::Contradiction> {
        let id = self.engine.post(constructor);
        self.engine.propagate_to_fixpoint()?;
        Ok(id)
    }

    pub(crate) fn propagate(&mut self) -> PropagationStatus {
        self.engine.propagate_to_fixpoint()
    }

    pub(crate) fn is_entailed(&self, propagator: PropagatorId) -> Entailment {
        self.engine.is_entailed(propagator)
    }

    pub(crate) fn lower_bound(&self, var: impl IntVar) -> i32 {
        var.lower_bound(&self.engine.store)
    }

    pub(crate) fn upper_bound(&self, var: impl IntVar) -> i32 {
        var.upper_bound(&self.engine.store)
    }

    #[track_caller]
    pub(crate) fn assert_bounds(&self, var: impl IntVar + Copy, lower_bound: i32, upper_bound: i32) {
        assert_eq!(
            (lower_bound, upper_bound),
            (self.lower_bound(var), self.upper_bound(var)),
            "expected bounds [{lower_bound}, {upper_bound}]"
        );
    }
}
