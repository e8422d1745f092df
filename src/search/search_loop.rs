use log::debug;
use log::trace;
use rand::rngs::SmallRng;

use super::RestartStrategy;
use crate::asserts::calabash_assert_eq_simple;
use crate::asserts::calabash_assert_simple;
use crate::basic_types::Contradiction;
use crate::basic_types::Solution;
use crate::branching::Brancher;
use crate::branching::Decision;
use crate::branching::SelectionContext;
use crate::engine::PropagationEngine;
use crate::engine::SolverStatistics;
use crate::termination::TerminationCondition;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SearchMode {
    /// Stop at the first solution.
    FindFirst,
    /// Keep refuting found solutions until the tree is exhausted.
    Enumerate,
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SearchLimits {
    pub(crate) solution_limit: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SearchStatus {
    /// A solution was found; it is in [`SearchLoop::best_solution`].
    SolutionFound,
    /// The whole tree below the root was explored.
    Exhausted,
    /// A termination condition, the restart cap, or the solution limit fired
    /// before the tree was exhausted.
    Limit,
}

#[derive(Debug)]
struct Frame {
    /// The world in which the decision was made, and in which its refutation
    /// is applied.
    world: usize,
    decision: Decision,
}

/// One depth-first exploration of the tree below the current root world.
///
/// Decisions are applied in a fresh world each; a contradiction pops the
/// deepest frame and applies the decision's refutation in the parent world.
/// The loop always returns with the solver back at the root, so deductions
/// recorded at the root (objective bounds in particular) survive across runs
/// and restarts.
pub(crate) struct SearchLoop<'a, B, T> {
    engine: &'a mut PropagationEngine,
    brancher: &'a mut B,
    termination: &'a mut T,
    restarts: &'a mut RestartStrategy,
    statistics: &'a mut SolverStatistics,
    random: &'a mut SmallRng,
    mode: SearchMode,
    limits: SearchLimits,
    stack: Vec<Frame>,
    root_world: usize,
    /// The solution of the most recent [`SearchStatus::SolutionFound`].
    pub(crate) best_solution: Option<Solution>,
    /// Every solution found in [`SearchMode::Enumerate`].
    pub(crate) solutions: Vec<Solution>,
}

impl<'a, B: Brancher, T: TerminationCondition> SearchLoop<'a, B, T> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        engine: &'a mut PropagationEngine,
        brancher: &'a mut B,
        termination: &'a mut T,
        restarts: &'a mut RestartStrategy,
        statistics: &'a mut SolverStatistics,
        random: &'a mut SmallRng,
        mode: SearchMode,
        limits: SearchLimits,
    ) -> Self {
        let root_world = engine.current_world();
        SearchLoop {
            engine,
            brancher,
            termination,
            restarts,
            statistics,
            random,
            mode,
            limits,
            stack: Vec::new(),
            root_world,
            best_solution: None,
            solutions: Vec::new(),
        }
    }

    pub(crate) fn run(&mut self) -> SearchStatus {
        calabash_assert_simple!(self.stack.is_empty(), "a search loop runs from the root");

        if let Err(conflict) = self.engine.propagate_to_fixpoint() {
            trace!("the root world is inconsistent: {conflict}");
            self.statistics.num_conflicts += 1;
            return SearchStatus::Exhausted;
        }

        loop {
            if self.termination.should_stop() {
                debug!("search stopped by the termination condition");
                self.unwind_to_root();
                return SearchStatus::Limit;
            }

            if self.restarts.should_restart() && !self.stack.is_empty() {
                if self.restarts.cap_reached() {
                    debug!("restart cap reached");
                    self.unwind_to_root();
                    return SearchStatus::Limit;
                }
                debug!(
                    "restarting from depth {} after restart #{}",
                    self.stack.len(),
                    self.restarts.num_restarts() + 1
                );
                self.unwind_to_root();
                self.restarts.notify_restart();
                self.statistics.num_restarts += 1;
                self.brancher.on_restart();
                continue;
            }

            let decision = {
                let mut context = SelectionContext::new(&self.engine.store, self.random);
                self.brancher.next_decision(&mut context)
            };

            match decision {
                None => {
                    let solution = self.engine.store.snapshot();
                    self.statistics.num_solutions += 1;
                    self.brancher.on_solution(&solution);
                    trace!("solution #{} found", self.statistics.num_solutions);

                    match self.mode {
                        SearchMode::FindFirst => {
                            self.best_solution = Some(solution);
                            self.unwind_to_root();
                            return SearchStatus::SolutionFound;
                        }
                        SearchMode::Enumerate => {
                            self.solutions.push(solution);
                            let limit_hit = self
                                .limits
                                .solution_limit
                                .is_some_and(|limit| self.solutions.len() as u64 >= limit);
                            if limit_hit {
                                self.unwind_to_root();
                                return SearchStatus::Limit;
                            }
                            if !self.backtrack_and_refute() {
                                return SearchStatus::Exhausted;
                            }
                        }
                    }
                }
                Some(decision) => {
                    self.termination.decision_has_been_made();
                    self.statistics.num_decisions += 1;
                    trace!("decision {decision} at depth {}", self.stack.len());

                    self.stack.push(Frame {
                        world: self.engine.current_world(),
                        decision,
                    });
                    self.statistics.peak_depth = self.statistics.peak_depth.max(self.stack.len());
                    self.engine.world_push();

                    let result = decision
                        .apply(&mut self.engine.store)
                        .map_err(Contradiction::from)
                        .and_then(|_| self.engine.propagate_to_fixpoint());

                    if let Err(conflict) = result {
                        self.note_conflict(&conflict);
                        if !self.backtrack_and_refute() {
                            return SearchStatus::Exhausted;
                        }
                    }
                }
            }
        }
    }

    /// Pop frames until a refutation sticks. Returns `false` when the stack
    /// is exhausted, meaning the tree below the root holds no further
    /// solutions.
    fn backtrack_and_refute(&mut self) -> bool {
        loop {
            let Some(frame) = self.stack.pop() else {
                return false;
            };
            self.engine.world_pop();
            calabash_assert_eq_simple!(self.engine.current_world(), frame.world);
            trace!("refuting {}", frame.decision);

            let result = frame
                .decision
                .refute(&mut self.engine.store)
                .map_err(Contradiction::from)
                .and_then(|_| self.engine.propagate_to_fixpoint());

            match result {
                Ok(()) => return true,
                Err(conflict) => self.note_conflict(&conflict),
            }
        }
    }

    fn note_conflict(&mut self, conflict: &Contradiction) {
        trace!("{conflict}");
        self.statistics.num_conflicts += 1;
        self.restarts.notify_conflict();
        self.brancher.on_conflict();
    }

    fn unwind_to_root(&mut self) {
        while self.stack.pop().is_some() {
            self.engine.world_pop();
        }
        calabash_assert_eq_simple!(self.engine.current_world(), self.root_world);
    }
}
