use enumset::EnumSet;

use super::LocalId;
use super::PropagationContext;
use super::Propagator;
use super::PropagatorId;
use crate::engine::GraphEvent;
use crate::engine::IntEvent;
use crate::engine::PropagatorVarId;
use crate::engine::SetEvent;
use crate::engine::WatchLists;
use crate::engine::Watchers;
use crate::variables::DeltaMonitor;
use crate::variables::GraphVarId;
use crate::variables::IntVar;
use crate::variables::SetVarId;
use crate::variables::VariableStore;

/// A constraint in unposted form: it knows which variables to watch and how
/// to build the [`Propagator`] that filters them.
pub trait PropagatorConstructor {
    type PropagatorImpl: Propagator;

    fn create(self, context: PropagatorConstructorContext<'_>) -> Self::PropagatorImpl;
}

/// The registration interface handed to a [`PropagatorConstructor`]: it wires
/// up the watch lists for the propagator being created and provides read
/// access to the current domains.
pub struct PropagatorConstructorContext<'a> {
    watch_lists: &'a mut WatchLists,
    propagator_id: PropagatorId,
    store: &'a mut VariableStore,
}

impl<'a> PropagatorConstructorContext<'a> {
    pub(crate) fn new(
        watch_lists: &'a mut WatchLists,
        propagator_id: PropagatorId,
        store: &'a mut VariableStore,
    ) -> Self {
        PropagatorConstructorContext {
            watch_lists,
            propagator_id,
            store,
        }
    }

    /// Subscribe the propagator to `events` on the given integer variable,
    /// identified in notifications by `local_id`.
    pub fn register<Var: IntVar>(
        &mut self,
        var: Var,
        events: EnumSet<IntEvent>,
        local_id: LocalId,
    ) -> Var {
        let mut watchers = Watchers::new(
            PropagatorVarId {
                propagator: self.propagator_id,
                variable: local_id,
            },
            self.watch_lists,
        );
        var.watch(&mut watchers, events);
        var
    }

    pub fn register_set(
        &mut self,
        var: SetVarId,
        events: EnumSet<SetEvent>,
        local_id: LocalId,
    ) -> SetVarId {
        self.watch_lists.watch_set(
            var,
            events,
            PropagatorVarId {
                propagator: self.propagator_id,
                variable: local_id,
            },
        );
        var
    }

    pub fn register_graph(
        &mut self,
        var: GraphVarId,
        events: EnumSet<GraphEvent>,
        local_id: LocalId,
    ) -> GraphVarId {
        self.watch_lists.watch_graph(
            var,
            events,
            PropagatorVarId {
                propagator: self.propagator_id,
                variable: local_id,
            },
        );
        var
    }

    /// Create a delta monitor over a set variable, enabling incremental
    /// change journals for it.
    pub fn monitor_set(&mut self, var: SetVarId) -> DeltaMonitor {
        self.store.monitor_set(var)
    }

    /// Read access to the domains at construction time, for propagators that
    /// initialise internal structures from the initial domains.
    pub fn as_readonly(&self) -> PropagationContext<'_> {
        PropagationContext::new(self.store)
    }
}
