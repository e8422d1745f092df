use enumset::EnumSet;

use super::GraphEvent;
use super::IntEvent;
use super::SetEvent;
use crate::containers::KeyedVec;
use crate::propagation::LocalId;
use crate::propagation::PropagatorId;
use crate::variables::DomainId;
use crate::variables::GraphVarId;
use crate::variables::SetVarId;

/// The address of one subscription: which propagator to notify, and which of
/// its local variables the event concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PropagatorVarId {
    pub(crate) propagator: PropagatorId,
    pub(crate) variable: LocalId,
}

#[derive(Debug, Default, Clone)]
struct IntWatchers {
    lower_bound: Vec<PropagatorVarId>,
    upper_bound: Vec<PropagatorVarId>,
    removal: Vec<PropagatorVarId>,
    assign: Vec<PropagatorVarId>,
}

#[derive(Debug, Default, Clone)]
struct SetWatchers {
    kernel_add: Vec<PropagatorVarId>,
    envelope_remove: Vec<PropagatorVarId>,
}

#[derive(Debug, Default, Clone)]
struct GraphWatchers {
    node_enforced: Vec<PropagatorVarId>,
    node_excluded: Vec<PropagatorVarId>,
    edge_enforced: Vec<PropagatorVarId>,
    edge_excluded: Vec<PropagatorVarId>,
}

/// For each variable and event kind, the propagators subscribed to it.
#[derive(Debug, Default)]
pub(crate) struct WatchLists {
    ints: KeyedVec<DomainId, IntWatchers>,
    sets: KeyedVec<SetVarId, SetWatchers>,
    graphs: KeyedVec<GraphVarId, GraphWatchers>,
}

impl WatchLists {
    pub(crate) fn grow_int(&mut self) {
        let _ = self.ints.push(IntWatchers::default());
    }

    pub(crate) fn grow_set(&mut self) {
        let _ = self.sets.push(SetWatchers::default());
    }

    pub(crate) fn grow_graph(&mut self) {
        let _ = self.graphs.push(GraphWatchers::default());
    }

    pub(crate) fn watch_int(
        &mut self,
        variable: DomainId,
        events: EnumSet<IntEvent>,
        watcher: PropagatorVarId,
    ) {
        let watchers = &mut self.ints[variable];
        for event in events {
            match event {
                IntEvent::LowerBound => watchers.lower_bound.push(watcher),
                IntEvent::UpperBound => watchers.upper_bound.push(watcher),
                IntEvent::Removal => watchers.removal.push(watcher),
                IntEvent::Assign => watchers.assign.push(watcher),
            }
        }
    }

    pub(crate) fn watch_set(
        &mut self,
        variable: SetVarId,
        events: EnumSet<SetEvent>,
        watcher: PropagatorVarId,
    ) {
        let watchers = &mut self.sets[variable];
        for event in events {
            match event {
                SetEvent::KernelAdd => watchers.kernel_add.push(watcher),
                SetEvent::EnvelopeRemove => watchers.envelope_remove.push(watcher),
            }
        }
    }

    pub(crate) fn watch_graph(
        &mut self,
        variable: GraphVarId,
        events: EnumSet<GraphEvent>,
        watcher: PropagatorVarId,
    ) {
        let watchers = &mut self.graphs[variable];
        for event in events {
            match event {
                GraphEvent::NodeEnforced => watchers.node_enforced.push(watcher),
                GraphEvent::NodeExcluded => watchers.node_excluded.push(watcher),
                GraphEvent::EdgeEnforced => watchers.edge_enforced.push(watcher),
                GraphEvent::EdgeExcluded => watchers.edge_excluded.push(watcher),
            }
        }
    }

    pub(crate) fn int_watchers(&self, variable: DomainId, event: IntEvent) -> &[PropagatorVarId] {
        let watchers = &self.ints[variable];
        match event {
            IntEvent::LowerBound => &watchers.lower_bound,
            IntEvent::UpperBound => &watchers.upper_bound,
            IntEvent::Removal => &watchers.removal,
            IntEvent::Assign => &watchers.assign,
        }
    }

    pub(crate) fn set_watchers(&self, variable: SetVarId, event: SetEvent) -> &[PropagatorVarId] {
        let watchers = &self.sets[variable];
        match event {
            SetEvent::KernelAdd => &watchers.kernel_add,
            SetEvent::EnvelopeRemove => &watchers.envelope_remove,
        }
    }

    pub(crate) fn graph_watchers(
        &self,
        variable: GraphVarId,
        event: GraphEvent,
    ) -> &[PropagatorVarId] {
        let watchers = &self.graphs[variable];
        match event {
            GraphEvent::NodeEnforced => &watchers.node_enforced,
            GraphEvent::NodeExcluded => &watchers.node_excluded,
            GraphEvent::EdgeEnforced => &watchers.edge_enforced,
            GraphEvent::EdgeExcluded => &watchers.edge_excluded,
        }
    }
}

/// The watch-list handle passed to [`IntVar::watch`]; views translate the
/// watched events before they reach the underlying variable's lists.
///
/// [`IntVar::watch`]: crate::variables::IntVar::watch
pub struct Watchers<'a> {
    watcher: PropagatorVarId,
    watch_lists: &'a mut WatchLists,
}

impl<'a> Watchers<'a> {
    pub(crate) fn new(watcher: PropagatorVarId, watch_lists: &'a mut WatchLists) -> Self {
        Watchers {
            watcher,
            watch_lists,
        }
    }

    pub fn watch_int(&mut self, variable: DomainId, events: EnumSet<IntEvent>) {
        self.watch_lists.watch_int(variable, events, self.watcher);
    }
}
