use log::debug;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use super::EnumerationResult;
use super::OptimisationDirection;
use super::OptimisationResult;
use super::SatisfactionResult;
use crate::basic_types::ConstraintOperationError;
use crate::basic_types::Solution;
use crate::branching::Brancher;
use crate::branching::DefaultBrancher;
use crate::constraints::Constraint;
use crate::constraints::ConstraintHandle;
use crate::containers::StorageKey;
use crate::engine::PropagationEngine;
use crate::engine::SolverStatistics;
use crate::propagation::Entailment;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorId;
use crate::search::RestartOptions;
use crate::search::RestartStrategy;
use crate::search::SearchLimits;
use crate::search::SearchLoop;
use crate::search::SearchMode;
use crate::search::SearchStatus;
use crate::termination::TerminationCondition;
use crate::variables::DomainId;
use crate::variables::GraphVarId;
use crate::variables::IntVar;
use crate::variables::SetVarId;
use crate::variables::VariableRef;

/// The entry point of the crate: holds the model and runs the searches.
///
/// A solver is populated in two phases. First create the variables and post
/// the constraints; then hand a [`Brancher`] and a [`TerminationCondition`]
/// to one of [`Solver::satisfy`], [`Solver::enumerate`], or
/// [`Solver::optimise`]. The solver always returns to the root world after a
/// search, so searches can be run repeatedly (and [`Solver::optimise`] does
/// exactly that internally).
#[derive(Debug)]
pub struct Solver {
    engine: PropagationEngine,
    random: SmallRng,
    restart_options: Option<RestartOptions>,
    limits: SearchLimits,
    statistics: SolverStatistics,
    /// Set when propagation at the root found a contradiction; the model can
    /// never become satisfiable again.
    root_failed: bool,
}

impl Default for Solver {
    fn default() -> Self {
        Solver {
            engine: PropagationEngine::default(),
            random: SmallRng::seed_from_u64(42),
            restart_options: None,
            limits: SearchLimits::default(),
            statistics: SolverStatistics::default(),
            root_failed: false,
        }
    }
}

impl Solver {
    /// Reseed the random number generator used by randomised heuristics.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random = SmallRng::seed_from_u64(seed);
        self
    }

    /// Enable restarts for every subsequent search.
    pub fn with_restart_options(mut self, options: RestartOptions) -> Self {
        self.restart_options = Some(options);
        self
    }

    /// Stop [`Solver::enumerate`] after this many solutions.
    pub fn with_solution_limit(mut self, limit: u64) -> Self {
        self.limits.solution_limit = Some(limit);
        self
    }

    /// Create an integer variable with the interval domain
    /// `[lower_bound, upper_bound]`.
    pub fn new_bounded_integer(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        self.engine.new_bounded_integer(lower_bound, upper_bound)
    }

    /// Create an integer variable whose domain is exactly the given values.
    pub fn new_enumerated_integer(&mut self, values: &[i32]) -> DomainId {
        self.engine.new_enumerated_integer(values)
    }

    /// Create a set variable. Elements of `kernel` are mandatory from the
    /// start; the final set lies between the kernel and the envelope.
    pub fn new_set_var(&mut self, kernel: &[i32], envelope: &[i32]) -> SetVarId {
        self.engine.new_set_var(kernel, envelope)
    }

    /// Create a graph variable over `num_nodes` nodes, initially without any
    /// potential edges.
    pub fn new_graph_var(&mut self, num_nodes: usize) -> GraphVarId {
        self.engine.new_graph_var(num_nodes)
    }

    /// Add an edge to the envelope of a graph variable. Only valid before
    /// the first search.
    pub fn add_potential_edge(&mut self, graph: GraphVarId, u: u32, v: u32) {
        self.engine.store.add_potential_edge(graph, u, v);
    }

    /// Attach a name to a variable for use in log output.
    pub fn name_variable(&mut self, variable: impl Into<VariableRef>, name: impl Into<String>) {
        self.engine.store.name_variable(variable.into(), name.into());
    }

    /// The counters accumulated by the searches run so far.
    pub fn statistics(&self) -> &SolverStatistics {
        &self.statistics
    }

    pub fn lower_bound<Var: IntVar>(&self, var: &Var) -> i32 {
        var.lower_bound(&self.engine.store)
    }

    pub fn upper_bound<Var: IntVar>(&self, var: &Var) -> i32 {
        var.upper_bound(&self.engine.store)
    }

    /// The fallback search heuristic over every integer variable created so
    /// far: first unfixed variable in creation order, smallest value first.
    pub fn default_brancher(&self) -> DefaultBrancher {
        let variables = (0..self.engine.store.num_integer_variables())
            .map(DomainId::create_from_index)
            .collect();
        DefaultBrancher::over(variables)
    }

    /// Post a constraint from the [`constraints`](crate::constraints) module
    /// and propagate it to the first fixpoint.
    pub fn post<C: Constraint>(
        &mut self,
        constraint: C,
    ) -> Result<ConstraintHandle, ConstraintOperationError> {
        if self.root_failed {
            return Err(ConstraintOperationError::InfeasibleState);
        }
        constraint.post(self)
    }

    pub(crate) fn add_propagator<Constructor: PropagatorConstructor>(
        &mut self,
        constructor: Constructor,
    ) -> Result<PropagatorId, ConstraintOperationError> {
        if self.root_failed {
            return Err(ConstraintOperationError::InfeasibleState);
        }

        let id = self.engine.post(constructor);
        if let Err(conflict) = self.engine.propagate_to_fixpoint() {
            debug!("posting a constraint failed the root world: {conflict}");
            self.root_failed = true;
            return Err(ConstraintOperationError::InfeasibleConstraint);
        }
        Ok(id)
    }

    /// Whether the constraint is satisfied, violated, or still undecided
    /// under the current domains.
    pub fn is_entailed(&self, handle: &ConstraintHandle) -> Entailment {
        let mut all_true = true;
        for &id in &handle.propagator_ids {
            match self.engine.is_entailed(id) {
                Entailment::False => return Entailment::False,
                Entailment::Undefined => all_true = false,
                Entailment::True => {}
            }
        }
        if all_true {
            Entailment::True
        } else {
            Entailment::Undefined
        }
    }

    /// Search for one solution.
    pub fn satisfy<B: Brancher, T: TerminationCondition>(
        &mut self,
        brancher: &mut B,
        termination: &mut T,
    ) -> SatisfactionResult {
        if self.root_failed {
            return SatisfactionResult::Unsatisfiable;
        }
        match self.run_search(brancher, termination, SearchMode::FindFirst) {
            (SearchStatus::SolutionFound, Some(solution), _) => {
                SatisfactionResult::Satisfiable(solution)
            }
            (SearchStatus::Exhausted, _, _) => SatisfactionResult::Unsatisfiable,
            _ => SatisfactionResult::Limit,
        }
    }

    /// Search for every solution, subject to [`Solver::with_solution_limit`].
    pub fn enumerate<B: Brancher, T: TerminationCondition>(
        &mut self,
        brancher: &mut B,
        termination: &mut T,
    ) -> EnumerationResult {
        if self.root_failed {
            return EnumerationResult::Complete {
                solutions: Vec::new(),
            };
        }
        match self.run_search(brancher, termination, SearchMode::Enumerate) {
            (SearchStatus::Exhausted, _, solutions) => EnumerationResult::Complete { solutions },
            (_, _, solutions) => EnumerationResult::Limit { solutions },
        }
    }

    /// Search for a solution minimising or maximising the objective.
    ///
    /// Implemented by branch-and-bound: after each solution, the objective is
    /// constrained at the root to improve on it and the search reruns, until
    /// the tree is exhausted or the tightened bound is infeasible.
    pub fn optimise<B: Brancher, T: TerminationCondition, Var: IntVar>(
        &mut self,
        direction: OptimisationDirection,
        objective: Var,
        brancher: &mut B,
        termination: &mut T,
    ) -> OptimisationResult {
        if self.root_failed {
            return OptimisationResult::Unsatisfiable;
        }

        let mut best: Option<Solution> = None;
        loop {
            match self.run_search(brancher, termination, SearchMode::FindFirst) {
                (SearchStatus::SolutionFound, Some(solution), _) => {
                    let value = objective.evaluate(&solution);
                    debug!("objective reached {value}");

                    let tightened = match direction {
                        OptimisationDirection::Minimise => {
                            objective.set_upper_bound(&mut self.engine.store, value - 1)
                        }
                        OptimisationDirection::Maximise => {
                            objective.set_lower_bound(&mut self.engine.store, value + 1)
                        }
                    };
                    let improvement_possible =
                        tightened.is_ok() && self.engine.propagate_to_fixpoint().is_ok();
                    if !improvement_possible {
                        return OptimisationResult::Optimal(solution);
                    }
                    best = Some(solution);
                }
                (SearchStatus::Exhausted, _, _) => {
                    return match best {
                        Some(solution) => OptimisationResult::Optimal(solution),
                        None => OptimisationResult::Unsatisfiable,
                    };
                }
                _ => {
                    return match best {
                        Some(solution) => OptimisationResult::Satisfiable(solution),
                        None => OptimisationResult::Limit,
                    };
                }
            }
        }
    }

    fn run_search<B: Brancher, T: TerminationCondition>(
        &mut self,
        brancher: &mut B,
        termination: &mut T,
        mode: SearchMode,
    ) -> (SearchStatus, Option<Solution>, Vec<Solution>) {
        let mut restarts = RestartStrategy::new(self.restart_options);
        let mut search = SearchLoop::new(
            &mut self.engine,
            brancher,
            termination,
            &mut restarts,
            &mut self.statistics,
            &mut self.random,
            mode,
            self.limits,
        );
        let status = search.run();
        let best_solution = search.best_solution.take();
        let solutions = std::mem::take(&mut search.solutions);

        self.statistics.num_propagations = self.engine.num_propagations;
        self.statistics.log();
        (status, best_solution, solutions)
    }
}
