//! A [`TerminationCondition`] is polled by the solver at decision boundaries.
//! It indicates when the solver should stop, even if no definitive conclusion
//! has been reached. The most common example is [`TimeBudget`], which gives
//! the solver a fixed amount of time to complete its search.

mod combinator;
mod decision_budget;
mod indefinite;
mod time_budget;

pub use combinator::Combinator;
pub use decision_budget::DecisionBudget;
pub use indefinite::Indefinite;
pub use time_budget::TimeBudget;

/// The central trait that defines a termination condition. A termination
/// condition determines when the solver should give up searching.
///
/// Terminations are polled between decisions, never in the middle of a
/// propagation fixpoint, so a stopped search always halts in a consistent
/// state.
pub trait TerminationCondition {
    /// Returns `true` when the solver should stop, `false` otherwise.
    fn should_stop(&mut self) -> bool;

    /// Informs the termination that the solver has made a decision.
    fn decision_has_been_made(&mut self) {}
}

impl<T: TerminationCondition> TerminationCondition for Option<T> {
    fn should_stop(&mut self) -> bool {
        match self {
            Some(termination) => termination.should_stop(),
            None => false,
        }
    }

    fn decision_has_been_made(&mut self) {
        if let Some(termination) = self {
            termination.decision_has_been_made();
        }
    }
}
