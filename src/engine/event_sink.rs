use enumset::EnumSet;

use super::GraphEvent;
use super::IntEvent;
use super::SetEvent;
use crate::containers::KeyedVec;
use crate::variables::DomainId;
use crate::variables::GraphVarId;
use crate::variables::SetVarId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EventRecord {
    Int(IntEvent, DomainId),
    Set(SetEvent, SetVarId),
    Graph(GraphEvent, GraphVarId),
}

/// Records the events which occurred during propagation, deduplicated per
/// variable and event kind. The sink is drained between propagator runs to
/// notify the watchers of the changed variables.
#[derive(Debug, Default)]
pub(crate) struct EventSink {
    int_present: KeyedVec<DomainId, EnumSet<IntEvent>>,
    set_present: KeyedVec<SetVarId, EnumSet<SetEvent>>,
    graph_present: KeyedVec<GraphVarId, EnumSet<GraphEvent>>,
    events: Vec<EventRecord>,
}

impl EventSink {
    pub(crate) fn grow_int(&mut self) {
        let _ = self.int_present.push(EnumSet::new());
    }

    pub(crate) fn grow_set(&mut self) {
        let _ = self.set_present.push(EnumSet::new());
    }

    pub(crate) fn grow_graph(&mut self) {
        let _ = self.graph_present.push(EnumSet::new());
    }

    pub(crate) fn int_event_occurred(&mut self, event: IntEvent, variable: DomainId) {
        if self.int_present[variable].insert(event) {
            self.events.push(EventRecord::Int(event, variable));
        }
    }

    pub(crate) fn set_event_occurred(&mut self, event: SetEvent, variable: SetVarId) {
        if self.set_present[variable].insert(event) {
            self.events.push(EventRecord::Set(event, variable));
        }
    }

    pub(crate) fn graph_event_occurred(&mut self, event: GraphEvent, variable: GraphVarId) {
        if self.graph_present[variable].insert(event) {
            self.events.push(EventRecord::Graph(event, variable));
        }
    }

    /// Take the pending events, clearing the per-variable presence markers.
    pub(crate) fn drain(&mut self) -> Vec<EventRecord> {
        let events = std::mem::take(&mut self.events);
        for event in &events {
            match *event {
                EventRecord::Int(event, variable) => {
                    let _ = self.int_present[variable].remove(event);
                }
                EventRecord::Set(event, variable) => {
                    let _ = self.set_present[variable].remove(event);
                }
                EventRecord::Graph(event, variable) => {
                    let _ = self.graph_present[variable].remove(event);
                }
            }
        }
        events
    }

    /// Drop all pending events, for example after a backtrack.
    pub(crate) fn discard(&mut self) {
        let _ = self.drain();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::containers::StorageKey;

    #[test]
    fn duplicate_events_are_recorded_once() {
        let mut sink = EventSink::default();
        sink.grow_int();
        let variable = DomainId::create_from_index(0);

        sink.int_event_occurred(IntEvent::LowerBound, variable);
        sink.int_event_occurred(IntEvent::LowerBound, variable);
        sink.int_event_occurred(IntEvent::Assign, variable);

        let events = sink.drain();
        assert_eq!(
            events,
            vec![
                EventRecord::Int(IntEvent::LowerBound, variable),
                EventRecord::Int(IntEvent::Assign, variable),
            ]
        );
    }

    #[test]
    fn draining_resets_the_deduplication() {
        let mut sink = EventSink::default();
        sink.grow_int();
        let variable = DomainId::create_from_index(0);

        sink.int_event_occurred(IntEvent::UpperBound, variable);
        let _ = sink.drain();

        sink.int_event_occurred(IntEvent::UpperBound, variable);
        assert_eq!(sink.drain().len(), 1);
    }
}
