use log::trace;

use super::EventRecord;
use super::PropagatorQueue;
use super::PropagatorVarId;
use super::VariableEvent;
use super::WatchLists;
use crate::asserts::calabash_assert_eq_simple;
use crate::basic_types::PropagationStatus;
use crate::containers::StorageKey;
use crate::propagation::EnqueueDecision;
use crate::propagation::Entailment;
use crate::propagation::PropagationContext;
use crate::propagation::PropagationContextMut;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorConstructorContext;
use crate::propagation::PropagatorId;
use crate::propagation::PropagatorStore;
use crate::variables::DomainId;
use crate::variables::GraphVarId;
use crate::variables::SetVarId;
use crate::variables::VariableStore;

/// Couples the variable store with the propagators watching it, and runs the
/// event-driven fixpoint loop.
#[derive(Debug, Default)]
pub(crate) struct PropagationEngine {
    pub(crate) store: VariableStore,
    pub(crate) propagators: PropagatorStore,
    watch_lists: WatchLists,
    queue: PropagatorQueue,
    pub(crate) num_propagations: u64,
}

impl PropagationEngine {
    pub(crate) fn new_bounded_integer(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        let variable = self.store.new_bounded_integer(lower_bound, upper_bound);
        self.watch_lists.grow_int();
        variable
    }

    pub(crate) fn new_enumerated_integer(&mut self, values: &[i32]) -> DomainId {
        let variable = self.store.new_enumerated_integer(values);
        self.watch_lists.grow_int();
        variable
    }

    pub(crate) fn new_set_var(&mut self, kernel: &[i32], envelope: &[i32]) -> SetVarId {
        let variable = self.store.new_set_var(kernel, envelope);
        self.watch_lists.grow_set();
        variable
    }

    pub(crate) fn new_graph_var(&mut self, num_nodes: usize) -> GraphVarId {
        let variable = self.store.new_graph_var(num_nodes);
        self.watch_lists.grow_graph();
        variable
    }

    pub(crate) fn current_world(&self) -> usize {
        self.store.env.current_world()
    }

    /// Create the propagator, wire up its subscriptions, and schedule it for
    /// its initial run.
    pub(crate) fn post<Constructor>(&mut self, constructor: Constructor) -> PropagatorId
    where
        Constructor: PropagatorConstructor,
    {
        let id = PropagatorId::create_from_index(self.propagators.len());
        let active_flag = self.store.env.make_bool(true);

        let context = PropagatorConstructorContext::new(&mut self.watch_lists, id, &mut self.store);
        let propagator = constructor.create(context);
        let priority = propagator.priority();
        trace!("posted {} as {id}", propagator.name());

        let pushed = self.propagators.push(Box::new(propagator), active_flag);
        calabash_assert_eq_simple!(id, pushed);

        self.queue.grow();
        self.queue.enqueue(id, priority);
        id
    }

    pub(crate) fn is_entailed(&self, id: PropagatorId) -> Entailment {
        self.propagators
            .get(id)
            .is_entailed(PropagationContext::new(&self.store))
    }

    /// Run queued propagators until the queue is empty or a contradiction is
    /// found. On contradiction the queue and pending events are discarded;
    /// the caller is expected to backtrack.
    pub(crate) fn propagate_to_fixpoint(&mut self) -> PropagationStatus {
        self.dispatch_events();

        while let Some(id) = self.queue.pop() {
            if !self.propagators.is_active(&self.store.env, id) {
                continue;
            }
            self.num_propagations += 1;

            let active_flag = self.propagators.active_flag(id);
            let propagator = self.propagators.get_mut(id);
            let context = PropagationContextMut::new(&mut self.store, active_flag);

            if let Err(conflict) = propagator.propagate(context) {
                trace!("{id} found a contradiction: {conflict}");
                self.queue.clear();
                self.store.events.discard();
                return Err(conflict);
            }

            self.dispatch_events();
        }
        Ok(())
    }

    /// Drain the pending domain events and notify the subscribed
    /// propagators, queueing those that want to run.
    fn dispatch_events(&mut self) {
        let records = self.store.events.drain();
        let PropagationEngine {
            store,
            propagators,
            watch_lists,
            queue,
            ..
        } = self;

        for record in records {
            match record {
                EventRecord::Int(event, variable) => {
                    for &watcher in watch_lists.int_watchers(variable, event) {
                        Self::notify_watcher(
                            store,
                            propagators,
                            queue,
                            watcher,
                            VariableEvent::Int(event),
                        );
                    }
                }
                EventRecord::Set(event, variable) => {
                    for &watcher in watch_lists.set_watchers(variable, event) {
                        Self::notify_watcher(
                            store,
                            propagators,
                            queue,
                            watcher,
                            VariableEvent::Set(event),
                        );
                    }
                }
                EventRecord::Graph(event, variable) => {
                    for &watcher in watch_lists.graph_watchers(variable, event) {
                        Self::notify_watcher(
                            store,
                            propagators,
                            queue,
                            watcher,
                            VariableEvent::Graph(event),
                        );
                    }
                }
            }
        }
    }

    fn notify_watcher(
        store: &VariableStore,
        propagators: &mut PropagatorStore,
        queue: &mut PropagatorQueue,
        watcher: PropagatorVarId,
        event: VariableEvent,
    ) {
        if !propagators.is_active(&store.env, watcher.propagator) {
            return;
        }
        let priority = propagators.get(watcher.propagator).priority();
        let decision = propagators.get_mut(watcher.propagator).notify(
            PropagationContext::new(store),
            watcher.variable,
            event,
        );
        if decision == EnqueueDecision::Enqueue {
            queue.enqueue(watcher.propagator, priority);
        }
    }

    pub(crate) fn world_push(&mut self) {
        self.store.env.world_push();
    }

    /// Backtrack one world: pending work is dropped, domains are restored,
    /// and every propagator gets to resynchronise its internal state.
    pub(crate) fn world_pop(&mut self) {
        self.queue.clear();
        self.store.events.discard();
        self.store.env.world_pop();

        let PropagationEngine {
            store, propagators, ..
        } = self;
        let ids = propagators.ids().collect::<Vec<_>>();
        for id in ids {
            propagators
                .get_mut(id)
                .synchronise(PropagationContext::new(store));
        }
    }
}
