//! Factories for the constraints the solver supports.
//!
//! Each function returns an unposted [`Constraint`]; hand it to
//! [`Solver::post`] to activate it. Posting runs the constraint's propagators
//! to their first fixpoint, so an obviously infeasible constraint is rejected
//! immediately.
//!
//! [`Solver::post`]: crate::Solver::post

use crate::basic_types::ConstraintOperationError;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorId;
use crate::propagators::CumulativeConstructor;
use crate::propagators::GraphNodeCountConstructor;
use crate::propagators::LinearLessOrEqualConstructor;
use crate::propagators::SetCardinalityConstructor;
use crate::propagators::SetSubsetConstructor;
use crate::variables::DomainId;
use crate::variables::GraphVarId;
use crate::variables::IntVar;
use crate::variables::SetVarId;
use crate::variables::TransformableVariable;
use crate::Solver;

/// A constraint in unposted form.
///
/// Implemented by every [`PropagatorConstructor`]; constraints decomposing
/// into several propagators implement it directly.
pub trait Constraint {
    fn post(self, solver: &mut Solver) -> Result<ConstraintHandle, ConstraintOperationError>;
}

impl<Constructor: PropagatorConstructor> Constraint for Constructor {
    fn post(self, solver: &mut Solver) -> Result<ConstraintHandle, ConstraintOperationError> {
        let id = solver.add_propagator(self)?;
        Ok(ConstraintHandle {
            propagator_ids: vec![id],
        })
    }
}

/// A token for a posted constraint, used to query its entailment through
/// [`Solver::is_entailed`].
///
/// [`Solver::is_entailed`]: crate::Solver::is_entailed
#[derive(Debug, Clone)]
pub struct ConstraintHandle {
    pub(crate) propagator_ids: Vec<PropagatorId>,
}

/// The constraint `\sum terms_i <= rhs`.
pub fn less_than_or_equals<Var: IntVar + 'static>(
    terms: impl Into<Box<[Var]>>,
    rhs: i32,
) -> impl Constraint {
    LinearLessOrEqualConstructor::new(terms.into(), rhs)
}

/// The constraint `lhs <= rhs`.
pub fn binary_less_than_or_equals<Var, View>(lhs: Var, rhs: Var) -> impl Constraint
where
    Var: TransformableVariable<View>,
    View: IntVar + 'static,
{
    less_than_or_equals([lhs.scaled(1), rhs.scaled(-1)], 0)
}

/// The constraint `lhs < rhs`.
pub fn binary_less_than<Var, View>(lhs: Var, rhs: Var) -> impl Constraint
where
    Var: TransformableVariable<View>,
    View: IntVar + 'static,
{
    less_than_or_equals([lhs.scaled(1), rhs.scaled(-1)], -1)
}

/// The constraint `subset ⊆ superset` between two set variables.
pub fn subset(subset: SetVarId, superset: SetVarId) -> impl Constraint {
    SetSubsetConstructor { subset, superset }
}

/// Channels the number of elements of `set` into the integer variable
/// `cardinality`.
pub fn set_cardinality(set: SetVarId, cardinality: DomainId) -> impl Constraint {
    SetCardinalityConstructor { set, cardinality }
}

/// Channels the number of nodes of `graph` into the integer variable `count`.
pub fn graph_node_count(graph: GraphVarId, count: DomainId) -> impl Constraint {
    GraphNodeCountConstructor { graph, count }
}

/// The cumulative scheduling constraint: at every instant, the combined
/// resource requirement of the tasks running at that instant stays within
/// `resource_capacity`. Task `i` starts at `start_times[i]` and runs for
/// `durations[i]` time units.
pub fn cumulative<Var: IntVar + 'static>(
    start_times: &[Var],
    durations: &[i32],
    resource_requirements: &[i32],
    resource_capacity: i32,
) -> impl Constraint {
    CumulativeConstructor::new(
        start_times.into(),
        durations.into(),
        resource_requirements.into(),
        resource_capacity,
    )
}
