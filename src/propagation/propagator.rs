use downcast_rs::impl_downcast;
use downcast_rs::Downcast;

use super::LocalId;
use super::PropagationContext;
use super::PropagationContextMut;
use crate::basic_types::PropagationStatus;
use crate::engine::VariableEvent;

/// The scheduling class of a propagator, ordered from cheapest to most
/// expensive. The queue always runs cheaper propagators before more expensive
/// ones, so costly filtering only happens on states the cheap propagators
/// cannot reduce further.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    Unary,
    Binary,
    Ternary,
    Linear,
    Quadratic,
    Cubic,
}

impl Priority {
    pub(crate) const COUNT: usize = 6;

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// The verdict of [`Propagator::notify`]: whether the event warrants putting
/// the propagator back on the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnqueueDecision {
    /// The propagator can infer new information from the event.
    Enqueue,
    /// The event cannot trigger new inferences.
    Skip,
}

/// The three-valued answer to "is this constraint satisfied by every
/// assignment in the current domains?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entailment {
    /// Satisfied whatever values the variables take within their domains.
    True,
    /// Violated by every assignment within the current domains.
    False,
    /// Both satisfying and violating completions remain.
    Undefined,
}

/// The interface of a filtering algorithm.
///
/// A propagator observes a fixed set of variables, registered through its
/// [`PropagatorConstructor`], and tightens their domains through the context
/// it is given. Implementations must be contracting (never widen a domain)
/// and sound (never remove a value that participates in a solution); they are
/// not required to be idempotent, the engine reschedules a propagator whose
/// own filtering produced new events.
///
/// [`PropagatorConstructor`]: super::PropagatorConstructor
pub trait Propagator: Downcast {
    fn name(&self) -> &str;

    fn priority(&self) -> Priority;

    /// Tighten the domains of the watched variables until nothing more can
    /// be inferred, or report a contradiction.
    fn propagate(&mut self, context: PropagationContextMut<'_>) -> PropagationStatus;

    /// Called when a watched event occurs, before the propagator is queued.
    /// Returning [`EnqueueDecision::Skip`] suppresses the scheduling; the
    /// default reacts to every watched event.
    fn notify(
        &mut self,
        _context: PropagationContext<'_>,
        _local_id: LocalId,
        _event: VariableEvent,
    ) -> EnqueueDecision {
        EnqueueDecision::Enqueue
    }

    /// Whether the constraint is satisfied, violated, or still undecided
    /// under the current domains.
    fn is_entailed(&self, context: PropagationContext<'_>) -> Entailment;

    /// Called after the solver backtracks, before the propagator runs again.
    /// Propagators with internal state derived from the domains rebuild or
    /// invalidate it here.
    fn synchronise(&mut self, _context: PropagationContext<'_>) {}
}

impl_downcast!(Propagator);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priorities_order_from_cheap_to_expensive() {
        assert!(Priority::Unary < Priority::Binary);
        assert!(Priority::Linear < Priority::Quadratic);
        assert_eq!(Priority::Cubic.index(), Priority::COUNT - 1);
    }
}
