use crate::basic_types::Contradiction;
use crate::basic_types::EmptyDomain;
use crate::state::StoredBool;
use crate::variables::DeltaMonitor;
use crate::variables::GraphVarId;
use crate::variables::IntVar;
use crate::variables::SetVarId;
use crate::variables::VariableStore;

/// Read access to the domains, handed to propagators in
/// [`Propagator::notify`], [`Propagator::is_entailed`], and
/// [`Propagator::synchronise`].
///
/// [`Propagator::notify`]: super::Propagator::notify
/// [`Propagator::is_entailed`]: super::Propagator::is_entailed
/// [`Propagator::synchronise`]: super::Propagator::synchronise
#[derive(Clone, Copy)]
pub struct PropagationContext<'a> {
    store: &'a VariableStore,
}

impl<'a> PropagationContext<'a> {
    pub(crate) fn new(store: &'a VariableStore) -> Self {
        PropagationContext { store }
    }

    pub fn lower_bound<Var: IntVar>(&self, var: &Var) -> i32 {
        var.lower_bound(self.store)
    }

    pub fn upper_bound<Var: IntVar>(&self, var: &Var) -> i32 {
        var.upper_bound(self.store)
    }

    pub fn contains<Var: IntVar>(&self, var: &Var, value: i32) -> bool {
        var.contains(self.store, value)
    }

    pub fn is_fixed<Var: IntVar>(&self, var: &Var) -> bool {
        var.is_fixed(self.store)
    }

    pub fn value<Var: IntVar>(&self, var: &Var) -> i32 {
        var.value(self.store)
    }

    pub fn kernel_contains(&self, var: SetVarId, element: i32) -> bool {
        self.store.kernel_contains(var, element)
    }

    pub fn envelope_contains(&self, var: SetVarId, element: i32) -> bool {
        self.store.envelope_contains(var, element)
    }

    pub fn kernel_size(&self, var: SetVarId) -> usize {
        self.store.kernel_size(var)
    }

    pub fn envelope_size(&self, var: SetVarId) -> usize {
        self.store.envelope_size(var)
    }

    pub fn kernel_iter(&self, var: SetVarId) -> impl Iterator<Item = i32> + 'a {
        self.store.kernel_iter(var)
    }

    pub fn envelope_iter(&self, var: SetVarId) -> impl Iterator<Item = i32> + 'a {
        self.store.envelope_iter(var)
    }

    pub fn set_is_fixed(&self, var: SetVarId) -> bool {
        self.store.set_is_fixed(var)
    }

    pub fn kernel_node_contains(&self, var: GraphVarId, node: u32) -> bool {
        self.store.kernel_node_contains(var, node)
    }

    pub fn envelope_node_contains(&self, var: GraphVarId, node: u32) -> bool {
        self.store.envelope_node_contains(var, node)
    }

    pub fn num_kernel_nodes(&self, var: GraphVarId) -> usize {
        self.store.num_kernel_nodes(var)
    }

    pub fn num_envelope_nodes(&self, var: GraphVarId) -> usize {
        self.store.num_envelope_nodes(var)
    }

    pub fn graph_is_fixed(&self, var: GraphVarId) -> bool {
        self.store.graph_is_fixed(var)
    }
}

/// Read-write access to the domains, handed to propagators in
/// [`Propagator::propagate`].
///
/// [`Propagator::propagate`]: super::Propagator::propagate
pub struct PropagationContextMut<'a> {
    store: &'a mut VariableStore,
    active_flag: StoredBool,
}

impl<'a> PropagationContextMut<'a> {
    pub(crate) fn new(store: &'a mut VariableStore, active_flag: StoredBool) -> Self {
        PropagationContextMut { store, active_flag }
    }

    pub fn as_readonly(&self) -> PropagationContext<'_> {
        PropagationContext { store: self.store }
    }

    pub fn lower_bound<Var: IntVar>(&self, var: &Var) -> i32 {
        var.lower_bound(self.store)
    }

    pub fn upper_bound<Var: IntVar>(&self, var: &Var) -> i32 {
        var.upper_bound(self.store)
    }

    pub fn contains<Var: IntVar>(&self, var: &Var, value: i32) -> bool {
        var.contains(self.store, value)
    }

    pub fn is_fixed<Var: IntVar>(&self, var: &Var) -> bool {
        var.is_fixed(self.store)
    }

    pub fn value<Var: IntVar>(&self, var: &Var) -> i32 {
        var.value(self.store)
    }

    pub fn set_lower_bound<Var: IntVar>(
        &mut self,
        var: &Var,
        bound: i32,
    ) -> Result<bool, EmptyDomain> {
        var.set_lower_bound(self.store, bound)
    }

    pub fn set_upper_bound<Var: IntVar>(
        &mut self,
        var: &Var,
        bound: i32,
    ) -> Result<bool, EmptyDomain> {
        var.set_upper_bound(self.store, bound)
    }

    pub fn remove<Var: IntVar>(&mut self, var: &Var, value: i32) -> Result<bool, EmptyDomain> {
        var.remove(self.store, value)
    }

    pub fn instantiate<Var: IntVar>(&mut self, var: &Var, value: i32) -> Result<bool, EmptyDomain> {
        var.instantiate(self.store, value)
    }

    pub fn kernel_contains(&self, var: SetVarId, element: i32) -> bool {
        self.store.kernel_contains(var, element)
    }

    pub fn envelope_contains(&self, var: SetVarId, element: i32) -> bool {
        self.store.envelope_contains(var, element)
    }

    pub fn kernel_size(&self, var: SetVarId) -> usize {
        self.store.kernel_size(var)
    }

    pub fn envelope_size(&self, var: SetVarId) -> usize {
        self.store.envelope_size(var)
    }

    pub fn kernel_iter(&self, var: SetVarId) -> impl Iterator<Item = i32> + '_ {
        self.store.kernel_iter(var)
    }

    pub fn envelope_iter(&self, var: SetVarId) -> impl Iterator<Item = i32> + '_ {
        self.store.envelope_iter(var)
    }

    pub fn set_is_fixed(&self, var: SetVarId) -> bool {
        self.store.set_is_fixed(var)
    }

    pub fn enforce(&mut self, var: SetVarId, element: i32) -> Result<bool, Contradiction> {
        self.store.enforce(var, element)
    }

    pub fn exclude(&mut self, var: SetVarId, element: i32) -> Result<bool, Contradiction> {
        self.store.exclude(var, element)
    }

    /// Read the entries of the set variable's delta recorded since the
    /// monitor last advanced, falling back to `None` when a full scan is
    /// required. See [`DeltaMonitor::advance`].
    pub fn advance_monitor<'monitor>(
        &'monitor self,
        monitor: &mut DeltaMonitor,
    ) -> Option<&'monitor [(i32, crate::engine::SetEvent)]> {
        let delta = self
            .store
            .set_delta(monitor.variable())
            .expect("a monitored set variable records deltas");
        monitor.advance(delta)
    }

    pub fn kernel_node_contains(&self, var: GraphVarId, node: u32) -> bool {
        self.store.kernel_node_contains(var, node)
    }

    pub fn envelope_node_contains(&self, var: GraphVarId, node: u32) -> bool {
        self.store.envelope_node_contains(var, node)
    }

    pub fn num_kernel_nodes(&self, var: GraphVarId) -> usize {
        self.store.num_kernel_nodes(var)
    }

    pub fn num_envelope_nodes(&self, var: GraphVarId) -> usize {
        self.store.num_envelope_nodes(var)
    }

    pub fn graph_num_nodes(&self, var: GraphVarId) -> usize {
        self.store.graph_num_nodes(var)
    }

    pub fn envelope_node_iter(&self, var: GraphVarId) -> impl Iterator<Item = u32> + '_ {
        self.store.envelope_node_iter(var)
    }

    pub fn kernel_node_iter(&self, var: GraphVarId) -> impl Iterator<Item = u32> + '_ {
        self.store.kernel_node_iter(var)
    }

    pub fn graph_is_fixed(&self, var: GraphVarId) -> bool {
        self.store.graph_is_fixed(var)
    }

    pub fn enforce_node(&mut self, var: GraphVarId, node: u32) -> Result<bool, Contradiction> {
        self.store.enforce_node(var, node)
    }

    pub fn exclude_node(&mut self, var: GraphVarId, node: u32) -> Result<bool, Contradiction> {
        self.store.exclude_node(var, node)
    }

    pub fn enforce_edge(&mut self, var: GraphVarId, u: u32, v: u32) -> Result<bool, Contradiction> {
        self.store.enforce_edge(var, u, v)
    }

    pub fn exclude_edge(&mut self, var: GraphVarId, u: u32, v: u32) -> Result<bool, Contradiction> {
        self.store.exclude_edge(var, u, v)
    }

    /// Deactivate the propagator for the remainder of this subtree. The flag
    /// is trailed, so backtracking past this point reactivates it.
    pub fn set_passive(&mut self) {
        self.store.env.assign_bool(self.active_flag, false);
    }
}
