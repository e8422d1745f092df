//! Running several solver configurations in parallel on the same problem.
//!
//! A [`Portfolio`] races independent configurations against each other, each
//! on its own thread with its own [`Solver`](crate::Solver). The first
//! configuration to reach a conclusive answer cancels the others through a
//! shared [`CancellationFlag`]. Workers can additionally exchange objective
//! bounds through a [`BoundHint`] so that a good solution found by one
//! configuration prunes the others.

use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;
use std::sync::mpsc;
use std::sync::Arc;

use log::debug;

use crate::termination::TerminationCondition;

/// A shared stop signal, used as the [`TerminationCondition`] of every worker
/// in a portfolio. Cancelling it stops all solvers at their next decision
/// boundary.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancellationFlag {
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl TerminationCondition for CancellationFlag {
    fn should_stop(&mut self) -> bool {
        self.is_cancelled()
    }
}

/// A monotonically decreasing bound shared between portfolio workers.
///
/// For minimisation, a worker publishes the objective value of each solution
/// it finds; the other workers read the hint and constrain their objective
/// below it. Maximisation is handled by publishing negated values.
#[derive(Debug, Clone)]
pub struct BoundHint {
    best: Arc<AtomicI64>,
}

impl Default for BoundHint {
    fn default() -> Self {
        BoundHint {
            best: Arc::new(AtomicI64::new(i64::MAX)),
        }
    }
}

impl BoundHint {
    /// Lower the published bound to `value` if it improves on it.
    pub fn publish(&self, value: i64) {
        let _ = self.best.fetch_min(value, Ordering::SeqCst);
    }

    /// The best value published so far, or `None` when no worker has
    /// published yet.
    pub fn best(&self) -> Option<i64> {
        let value = self.best.load(Ordering::SeqCst);
        (value != i64::MAX).then_some(value)
    }
}

type Runner<'env, Output> = Box<dyn FnOnce(CancellationFlag) -> Option<Output> + Send + 'env>;

/// A set of solver configurations raced against each other.
///
/// Each configuration is a closure that builds and runs its own solver; it
/// receives the shared [`CancellationFlag`] to use as its termination
/// condition, and returns `Some` when it reached a conclusive answer or
/// `None` when it was stopped by the flag.
pub struct Portfolio<'env, Output> {
    runners: Vec<Runner<'env, Output>>,
}

impl<'env, Output: Send> Portfolio<'env, Output> {
    pub fn new() -> Self {
        Portfolio {
            runners: Vec::new(),
        }
    }

    pub fn with_configuration(
        mut self,
        runner: impl FnOnce(CancellationFlag) -> Option<Output> + Send + 'env,
    ) -> Self {
        self.runners.push(Box::new(runner));
        self
    }

    pub fn len(&self) -> usize {
        self.runners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runners.is_empty()
    }

    /// Run every configuration on its own thread and return the index and
    /// output of the first one to produce a conclusive answer. Returns `None`
    /// when every configuration came back inconclusive.
    pub fn race(self) -> Option<(usize, Output)> {
        let cancellation = CancellationFlag::default();

        std::thread::scope(|scope| {
            let (sender, receiver) = mpsc::channel();

            for (index, runner) in self.runners.into_iter().enumerate() {
                let sender = sender.clone();
                let cancellation = cancellation.clone();
                let _ = scope.spawn(move || {
                    let output = runner(cancellation);
                    // A worker that panicked simply never reports.
                    let _ = sender.send((index, output));
                });
            }
            drop(sender);

            let mut winner = None;
            for (index, output) in receiver {
                match output {
                    Some(output) if winner.is_none() => {
                        debug!("configuration #{index} won the race");
                        cancellation.cancel();
                        winner = Some((index, output));
                    }
                    _ => {}
                }
            }
            winner
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints;
    use crate::SatisfactionResult;
    use crate::Solver;

    fn solve_chain(
        mut termination: CancellationFlag,
        num_variables: usize,
    ) -> Option<(i32, i32)> {
        let mut solver = Solver::default();
        let variables = (0..num_variables)
            .map(|_| solver.new_bounded_integer(1, num_variables as i32))
            .collect::<Vec<_>>();
        for window in variables.windows(2) {
            let _ = solver
                .post(constraints::binary_less_than(window[0], window[1]))
                .expect("satisfiable chain");
        }

        let mut brancher = solver.default_brancher();
        match solver.satisfy(&mut brancher, &mut termination) {
            SatisfactionResult::Satisfiable(solution) => Some((
                solution.value_of(variables[0]),
                solution.value_of(variables[num_variables - 1]),
            )),
            SatisfactionResult::Unsatisfiable => panic!("the chain is satisfiable"),
            SatisfactionResult::Limit => None,
        }
    }

    #[test]
    fn the_race_returns_a_conclusive_result() {
        let portfolio = Portfolio::new()
            .with_configuration(|cancellation| solve_chain(cancellation, 4))
            .with_configuration(|cancellation| solve_chain(cancellation, 6));

        let (_, (first, last)) = portfolio.race().expect("both runs are conclusive");
        assert_eq!(first, 1);
        assert!(last == 4 || last == 6);
    }

    #[test]
    fn cancellation_stops_the_losing_worker() {
        let portfolio: Portfolio<'_, u32> = Portfolio::new()
            .with_configuration(|_| Some(7))
            .with_configuration(|cancellation| {
                while !cancellation.is_cancelled() {
                    std::thread::yield_now();
                }
                None
            });

        let (winner, output) = portfolio.race().expect("the quick worker answers");
        assert_eq!(winner, 0);
        assert_eq!(output, 7);
    }

    #[test]
    fn an_all_inconclusive_race_returns_none() {
        let portfolio: Portfolio<'_, u32> = Portfolio::new()
            .with_configuration(|_| None)
            .with_configuration(|_| None);

        assert!(portfolio.race().is_none());
    }

    #[test]
    fn bound_hints_keep_the_minimum() {
        let hint = BoundHint::default();
        assert_eq!(hint.best(), None);

        hint.publish(10);
        hint.publish(4);
        hint.publish(8);
        assert_eq!(hint.best(), Some(4));
    }
}
