/// Counters accumulated over one search run.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolverStatistics {
    /// The number of decisions posted by the branchers.
    pub num_decisions: u64,
    /// The number of contradictions encountered, including failed
    /// refutations.
    pub num_conflicts: u64,
    /// The number of times the search was restarted from the root.
    pub num_restarts: u64,
    /// The number of solutions found.
    pub num_solutions: u64,
    /// The number of propagator invocations.
    pub num_propagations: u64,
    /// The largest depth the decision stack reached.
    pub peak_depth: usize,
}

impl SolverStatistics {
    pub(crate) fn log(&self) {
        log::info!(
            "search finished: {} decisions, {} conflicts, {} restarts, {} solutions, {} propagations, peak depth {}",
            self.num_decisions,
            self.num_conflicts,
            self.num_restarts,
            self.num_solutions,
            self.num_propagations,
            self.peak_depth,
        );
    }
}
