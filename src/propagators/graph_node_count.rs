use crate::basic_types::PropagationStatus;
use crate::engine::GraphEvent;
use crate::engine::IntEvent;
use crate::propagation::Entailment;
use crate::propagation::LocalId;
use crate::propagation::PropagationContext;
use crate::propagation::PropagationContextMut;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorConstructorContext;
use crate::propagation::Priority;
use crate::variables::DomainId;
use crate::variables::GraphVarId;
use crate::variables::IntVar;

#[derive(Clone, Debug)]
pub(crate) struct GraphNodeCountConstructor {
    pub(crate) graph: GraphVarId,
    pub(crate) count: DomainId,
}

/// Propagator channelling `|nodes(graph)| = count`, the graph analogue of
/// the set cardinality constraint.
#[derive(Debug)]
pub(crate) struct GraphNodeCountPropagator {
    graph: GraphVarId,
    count: DomainId,
}

impl PropagatorConstructor for GraphNodeCountConstructor {
    type PropagatorImpl = GraphNodeCountPropagator;

    fn create(self, mut context: PropagatorConstructorContext<'_>) -> Self::PropagatorImpl {
        let _ = context.register_graph(
            self.graph,
            GraphEvent::NodeEnforced | GraphEvent::NodeExcluded,
            LocalId::from(0),
        );
        let _ = context.register(
            self.count,
            IntEvent::LowerBound | IntEvent::UpperBound,
            LocalId::from(1),
        );

        GraphNodeCountPropagator {
            graph: self.graph,
            count: self.count,
        }
    }
}

impl Propagator for GraphNodeCountPropagator {
    fn name(&self) -> &str {
        "GraphNodeCount"
    }

    fn priority(&self) -> Priority {
        Priority::Linear
    }

    fn propagate(&mut self, mut context: PropagationContextMut<'_>) -> PropagationStatus {
        let num_kernel = context.num_kernel_nodes(self.graph) as i32;
        let num_envelope = context.num_envelope_nodes(self.graph) as i32;

        let _ = context.set_lower_bound(&self.count, num_kernel)?;
        let _ = context.set_upper_bound(&self.count, num_envelope)?;

        if context.upper_bound(&self.count) == num_kernel {
            let candidates = context
                .envelope_node_iter(self.graph)
                .filter(|&node| !context.kernel_node_contains(self.graph, node))
                .collect::<Vec<_>>();
            for node in candidates {
                let _ = context.exclude_node(self.graph, node)?;
            }
        } else if context.lower_bound(&self.count) == num_envelope {
            let candidates = context.envelope_node_iter(self.graph).collect::<Vec<_>>();
            for node in candidates {
                let _ = context.enforce_node(self.graph, node)?;
            }
        }

        Ok(())
    }

    fn is_entailed(&self, context: PropagationContext<'_>) -> Entailment {
        let num_kernel = context.num_kernel_nodes(self.graph) as i32;
        let num_envelope = context.num_envelope_nodes(self.graph) as i32;

        if context.upper_bound(&self.count) < num_kernel
            || context.lower_bound(&self.count) > num_envelope
        {
            return Entailment::False;
        }
        if num_kernel == num_envelope && context.is_fixed(&self.count) {
            return if context.value(&self.count) == num_kernel {
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
    fn node_counts_bound_the_variable() {
        let mut solver = TestSolver::default();
        let graph = solver.new_graph(5);
        let _ = solver.engine.store.enforce_node(graph, 0).unwrap();
        let count = solver.new_variable(0, 10);

        let _ = solver
            .new_propagator(GraphNodeCountConstructor { graph, count })
            .expect("consistent");

        solver.assert_bounds(count, 1, 5);
    }

    #[test]
    fn a_pinned_count_excludes_the_optional_nodes() {
        let mut solver = TestSolver::default();
        let graph = solver.new_graph(3);
        let _ = solver.engine.store.enforce_node(graph, 1).unwrap();
        let count = solver.new_variable(0, 1);

        let _ = solver
            .new_propagator(GraphNodeCountConstructor { graph, count })
            .expect("consistent");

        assert!(!solver.engine.store.envelope_node_contains(graph, 0));
        assert!(!solver.engine.store.envelope_node_contains(graph, 2));
        assert!(solver.engine.store.kernel_node_contains(graph, 1));
    }

    #[test]
    fn a_full_count_enforces_every_node() {
        let mut solver = TestSolver::default();
        let graph = solver.new_graph(3);
        let count = solver.new_variable(3, 3);

        let _ = solver
            .new_propagator(GraphNodeCountConstructor { graph, count })
            .expect("consistent");

        assert!(solver.engine.store.graph_is_fixed(graph));
        assert_eq!(solver.engine.store.num_kernel_nodes(graph), 3);
    }

    #[test]
    fn excluding_nodes_through_the_count_drops_their_edges() {
        let mut solver = TestSolver::default();
        let graph = solver.new_graph(3);
        solver.engine.store.add_potential_edge(graph, 0, 1);
        solver.engine.store.add_potential_edge(graph, 1, 2);
        let _ = solver.engine.store.enforce_node(graph, 1).unwrap();
        let count = solver.new_variable(1, 1);

        let _ = solver
            .new_propagator(GraphNodeCountConstructor { graph, count })
            .expect("consistent");

        assert!(!solver.engine.store.envelope_edge_contains(graph, 0, 1));
        assert!(!solver.engine.store.envelope_edge_contains(graph, 1, 2));
    }
}
