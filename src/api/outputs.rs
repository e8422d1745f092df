use crate::basic_types::Solution;

/// The outcome of [`Solver::satisfy`].
///
/// [`Solver::satisfy`]: crate::Solver::satisfy
#[derive(Debug, Clone)]
pub enum SatisfactionResult {
    /// A solution was found.
    Satisfiable(Solution),
    /// The search tree was exhausted without finding a solution.
    Unsatisfiable,
    /// The termination condition or the restart cap fired before the search
    /// could conclude either way.
    Limit,
}

/// The outcome of [`Solver::enumerate`].
///
/// [`Solver::enumerate`]: crate::Solver::enumerate
#[derive(Debug, Clone)]
pub enum EnumerationResult {
    /// Every solution of the model, in the order the search found them.
    Complete { solutions: Vec<Solution> },
    /// The solutions found before a limit fired; more may exist.
    Limit { solutions: Vec<Solution> },
}

/// The outcome of [`Solver::optimise`].
///
/// [`Solver::optimise`]: crate::Solver::optimise
#[derive(Debug, Clone)]
pub enum OptimisationResult {
    /// The returned solution has been proven optimal.
    Optimal(Solution),
    /// A solution was found, but a limit fired before optimality was proven.
    Satisfiable(Solution),
    /// The search tree was exhausted without finding a solution.
    Unsatisfiable,
    /// A limit fired before any solution was found.
    Limit,
}

/// The sense of the objective in [`Solver::optimise`].
///
/// [`Solver::optimise`]: crate::Solver::optimise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimisationDirection {
    Minimise,
    Maximise,
}
