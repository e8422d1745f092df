use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::collections::VecDeque;

use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::propagation::Priority;
use crate::propagation::PropagatorId;

/// The scheduling queue of the propagation engine: FIFO within a priority
/// level, cheapest level first, and at most one pending entry per propagator.
#[derive(Debug, Default)]
pub(crate) struct PropagatorQueue {
    queues: [VecDeque<PropagatorId>; Priority::COUNT],
    present_priorities: BinaryHeap<Reverse<usize>>,
    enqueued: KeyedVec<PropagatorId, bool>,
}

impl PropagatorQueue {
    pub(crate) fn grow(&mut self) {
        let _ = self.enqueued.push(false);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.present_priorities.is_empty()
    }

    pub(crate) fn enqueue(&mut self, propagator: PropagatorId, priority: Priority) {
        if self.enqueued[propagator] {
            return;
        }
        let level = priority.index();
        if self.queues[level].is_empty() {
            self.present_priorities.push(Reverse(level));
        }
        self.queues[level].push_back(propagator);
        self.enqueued[propagator] = true;
    }

    pub(crate) fn pop(&mut self) -> Option<PropagatorId> {
        let Reverse(level) = *self.present_priorities.peek()?;
        let propagator = self.queues[level]
            .pop_front()
            .expect("a present priority level has a pending propagator");
        self.enqueued[propagator] = false;

        if self.queues[level].is_empty() {
            let _ = self.present_priorities.pop();
        }
        Some(propagator)
    }

    pub(crate) fn clear(&mut self) {
        for queue in &mut self.queues {
            for propagator in queue.drain(..) {
                self.enqueued[propagator] = false;
            }
        }
        self.present_priorities.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue_with_capacity(num_propagators: usize) -> PropagatorQueue {
        let mut queue = PropagatorQueue::default();
        for _ in 0..num_propagators {
            queue.grow();
        }
        queue
    }

    #[test]
    fn cheaper_priorities_are_popped_first() {
        let mut queue = queue_with_capacity(3);
        queue.enqueue(PropagatorId::create_from_index(0), Priority::Quadratic);
        queue.enqueue(PropagatorId::create_from_index(1), Priority::Binary);
        queue.enqueue(PropagatorId::create_from_index(2), Priority::Linear);

        assert_eq!(queue.pop(), Some(PropagatorId::create_from_index(1)));
        assert_eq!(queue.pop(), Some(PropagatorId::create_from_index(2)));
        assert_eq!(queue.pop(), Some(PropagatorId::create_from_index(0)));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn a_propagator_is_enqueued_at_most_once() {
        let mut queue = queue_with_capacity(1);
        let propagator = PropagatorId::create_from_index(0);
        queue.enqueue(propagator, Priority::Binary);
        queue.enqueue(propagator, Priority::Binary);

        assert_eq!(queue.pop(), Some(propagator));
        assert_eq!(queue.pop(), None);

        // Popping resets the marker.
        queue.enqueue(propagator, Priority::Binary);
        assert_eq!(queue.pop(), Some(propagator));
    }

    #[test]
    fn same_priority_is_first_in_first_out() {
        let mut queue = queue_with_capacity(3);
        for index in 0..3 {
            queue.enqueue(PropagatorId::create_from_index(index), Priority::Linear);
        }
        for index in 0..3 {
            assert_eq!(queue.pop(), Some(PropagatorId::create_from_index(index)));
        }
    }

    #[test]
    fn clearing_forgets_pending_entries() {
        let mut queue = queue_with_capacity(2);
        queue.enqueue(PropagatorId::create_from_index(0), Priority::Unary);
        queue.enqueue(PropagatorId::create_from_index(1), Priority::Cubic);
        queue.clear();

        assert!(queue.is_empty());
        queue.enqueue(PropagatorId::create_from_index(0), Priority::Unary);
        assert_eq!(queue.pop(), Some(PropagatorId::create_from_index(0)));
    }
}
