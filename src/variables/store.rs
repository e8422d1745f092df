use itertools::Itertools;

use super::DeltaMonitor;
use super::DomainId;
use super::GraphVarId;
use super::SetDelta;
use super::SetVarId;
use super::VariableNames;
use super::VariableRef;
use crate::asserts::calabash_assert_moderate;
use crate::asserts::calabash_assert_simple;
use crate::basic_types::Contradiction;
use crate::basic_types::EmptyDomain;
use crate::basic_types::GraphValue;
use crate::basic_types::Solution;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::engine::EventSink;
use crate::engine::GraphEvent;
use crate::engine::IntEvent;
use crate::engine::SetEvent;
use crate::state::Environment;
use crate::state::SetId;
use crate::state::SetKind;
use crate::state::StoredInt;

/// The representation of one integer domain.
///
/// Bounded domains store only their bounds; removing an interior value from a
/// bounded domain is a no-op. Enumerated domains additionally keep a
/// backtrackable bit set of members; a value is in the domain iff it lies
/// within the bounds and its bit is set. The bounds of an enumerated domain
/// always point at members.
#[derive(Debug, Clone, Copy)]
enum IntDomain {
    Bounded { lb: StoredInt, ub: StoredInt },
    Enumerated { lb: StoredInt, ub: StoredInt, values: SetId },
}

impl IntDomain {
    fn bound_references(&self) -> (StoredInt, StoredInt) {
        match *self {
            IntDomain::Bounded { lb, ub } | IntDomain::Enumerated { lb, ub, .. } => (lb, ub),
        }
    }
}

#[derive(Debug)]
struct SetVarData {
    kernel: SetId,
    envelope: SetId,
    /// Created lazily, when the first propagator asks for a monitor.
    delta: Option<SetDelta>,
}

#[derive(Debug)]
struct GraphVarData {
    num_nodes: usize,
    kernel_nodes: SetId,
    envelope_nodes: SetId,
    /// Adjacency sets, one per node. Edges are undirected and stored in both
    /// endpoints' sets.
    kernel_adjacency: Vec<SetId>,
    envelope_adjacency: Vec<SetId>,
}

/// Owns every variable of one solver together with the [`Environment`] their
/// domains live in.
///
/// All domain mutations go through this type: it performs the trailed writes,
/// keeps the domain invariants, and records the corresponding events in the
/// sink for the propagation engine to dispatch.
#[derive(Debug, Default)]
pub struct VariableStore {
    pub(crate) env: Environment,
    int_domains: KeyedVec<DomainId, IntDomain>,
    set_vars: KeyedVec<SetVarId, SetVarData>,
    graph_vars: KeyedVec<GraphVarId, GraphVarData>,
    pub(crate) events: EventSink,
    names: VariableNames,
}

impl VariableStore {
    pub(crate) fn new() -> Self {
        VariableStore::default()
    }

    pub(crate) fn name_variable(&mut self, variable: VariableRef, name: String) {
        self.names.add(variable, name);
    }

    /// The name of the variable if one was given, otherwise its identifier.
    pub(crate) fn describe(&self, variable: VariableRef) -> String {
        match self.names.get(variable) {
            Some(name) => name.to_owned(),
            None => variable.to_string(),
        }
    }

    pub(crate) fn num_integer_variables(&self) -> usize {
        self.int_domains.len()
    }

    // Integer variables.

    pub(crate) fn new_bounded_integer(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        calabash_assert_simple!(
            lower_bound <= upper_bound,
            "cannot create the empty domain [{lower_bound}, {upper_bound}]"
        );
        let lb = self.env.make_int(lower_bound);
        let ub = self.env.make_int(upper_bound);
        self.events.grow_int();
        self.int_domains.push(IntDomain::Bounded { lb, ub })
    }

    pub(crate) fn new_enumerated_integer(&mut self, values: &[i32]) -> DomainId {
        calabash_assert_simple!(
            !values.is_empty(),
            "cannot create an empty enumerated domain"
        );
        let lower_bound = values.iter().copied().min().expect("non-empty");
        let upper_bound = values.iter().copied().max().expect("non-empty");

        let members = self.env.make_set(SetKind::BitSet {
            offset: lower_bound,
            capacity: (upper_bound - lower_bound + 1) as usize,
        });
        for &value in values {
            let _ = self.env.set_insert(members, value);
        }

        let lb = self.env.make_int(lower_bound);
        let ub = self.env.make_int(upper_bound);
        self.events.grow_int();
        self.int_domains.push(IntDomain::Enumerated {
            lb,
            ub,
            values: members,
        })
    }

    pub(crate) fn int_lower_bound(&self, variable: DomainId) -> i32 {
        let (lb, _) = self.int_domains[variable].bound_references();
        self.env.value(lb)
    }

    pub(crate) fn int_upper_bound(&self, variable: DomainId) -> i32 {
        let (_, ub) = self.int_domains[variable].bound_references();
        self.env.value(ub)
    }

    pub(crate) fn int_contains(&self, variable: DomainId, value: i32) -> bool {
        if value < self.int_lower_bound(variable) || value > self.int_upper_bound(variable) {
            return false;
        }
        match self.int_domains[variable] {
            IntDomain::Bounded { .. } => true,
            IntDomain::Enumerated { values, .. } => self.env.set_contains(values, value),
        }
    }

    pub(crate) fn int_is_fixed(&self, variable: DomainId) -> bool {
        self.int_lower_bound(variable) == self.int_upper_bound(variable)
    }

    pub(crate) fn int_domain_size(&self, variable: DomainId) -> u64 {
        let lower_bound = self.int_lower_bound(variable);
        let upper_bound = self.int_upper_bound(variable);
        match self.int_domains[variable] {
            IntDomain::Bounded { .. } => (upper_bound - lower_bound + 1) as u64,
            IntDomain::Enumerated { values, .. } => self
                .env
                .set_iter(values)
                .filter(|&value| value >= lower_bound && value <= upper_bound)
                .count() as u64,
        }
    }

    /// Tighten the lower bound to at least `bound`. Returns whether the
    /// domain changed.
    pub(crate) fn set_int_lower_bound(
        &mut self,
        variable: DomainId,
        bound: i32,
    ) -> Result<bool, EmptyDomain> {
        let lower_bound = self.int_lower_bound(variable);
        let upper_bound = self.int_upper_bound(variable);
        if bound <= lower_bound {
            return Ok(false);
        }
        if bound > upper_bound {
            return Err(EmptyDomain(variable.into()));
        }

        let new_bound = match self.int_domains[variable] {
            IntDomain::Bounded { .. } => bound,
            IntDomain::Enumerated { values, .. } => (bound..=upper_bound)
                .find(|&value| self.env.set_contains(values, value))
                .expect("the upper bound of an enumerated domain is a member"),
        };

        let (lb, _) = self.int_domains[variable].bound_references();
        self.env.assign(lb, new_bound);
        self.events.int_event_occurred(IntEvent::LowerBound, variable);
        self.events.int_event_occurred(IntEvent::Removal, variable);
        if new_bound == upper_bound {
            self.events.int_event_occurred(IntEvent::Assign, variable);
        }
        Ok(true)
    }

    /// Tighten the upper bound to at most `bound`. Returns whether the
    /// domain changed.
    pub(crate) fn set_int_upper_bound(
        &mut self,
        variable: DomainId,
        bound: i32,
    ) -> Result<bool, EmptyDomain> {
        let lower_bound = self.int_lower_bound(variable);
        let upper_bound = self.int_upper_bound(variable);
        if bound >= upper_bound {
            return Ok(false);
        }
        if bound < lower_bound {
            return Err(EmptyDomain(variable.into()));
        }

        let new_bound = match self.int_domains[variable] {
            IntDomain::Bounded { .. } => bound,
            IntDomain::Enumerated { values, .. } => (lower_bound..=bound)
                .rev()
                .find(|&value| self.env.set_contains(values, value))
                .expect("the lower bound of an enumerated domain is a member"),
        };

        let (_, ub) = self.int_domains[variable].bound_references();
        self.env.assign(ub, new_bound);
        self.events.int_event_occurred(IntEvent::UpperBound, variable);
        self.events.int_event_occurred(IntEvent::Removal, variable);
        if new_bound == lower_bound {
            self.events.int_event_occurred(IntEvent::Assign, variable);
        }
        Ok(true)
    }

    /// Remove a single value. On a bounded domain only the bounds can be
    /// removed; interior removals are silently ignored.
    pub(crate) fn int_remove(
        &mut self,
        variable: DomainId,
        value: i32,
    ) -> Result<bool, EmptyDomain> {
        let lower_bound = self.int_lower_bound(variable);
        let upper_bound = self.int_upper_bound(variable);
        if value < lower_bound || value > upper_bound {
            return Ok(false);
        }
        if value == lower_bound {
            return self.set_int_lower_bound(variable, value + 1);
        }
        if value == upper_bound {
            return self.set_int_upper_bound(variable, value - 1);
        }

        match self.int_domains[variable] {
            IntDomain::Bounded { .. } => Ok(false),
            IntDomain::Enumerated { values, .. } => {
                if !self.env.set_remove(values, value) {
                    return Ok(false);
                }
                self.events.int_event_occurred(IntEvent::Removal, variable);
                Ok(true)
            }
        }
    }

    pub(crate) fn int_instantiate(
        &mut self,
        variable: DomainId,
        value: i32,
    ) -> Result<bool, EmptyDomain> {
        if !self.int_contains(variable, value) {
            return Err(EmptyDomain(variable.into()));
        }
        let raised = self.set_int_lower_bound(variable, value)?;
        let lowered = self.set_int_upper_bound(variable, value)?;
        Ok(raised || lowered)
    }

    // Set variables.

    pub(crate) fn new_set_var(&mut self, kernel: &[i32], envelope: &[i32]) -> SetVarId {
        let offset = envelope.iter().copied().min().unwrap_or(0);
        let capacity = envelope
            .iter()
            .copied()
            .max()
            .map(|max| (max - offset + 1) as usize)
            .unwrap_or(0);
        let kind = SetKind::BitSet { offset, capacity };

        let envelope_set = self.env.make_set(kind);
        for &element in envelope {
            let _ = self.env.set_insert(envelope_set, element);
        }
        let kernel_set = self.env.make_set(kind);
        for &element in kernel {
            calabash_assert_simple!(
                self.env.set_contains(envelope_set, element),
                "the kernel must be a subset of the envelope"
            );
            let _ = self.env.set_insert(kernel_set, element);
        }

        self.events.grow_set();
        self.set_vars.push(SetVarData {
            kernel: kernel_set,
            envelope: envelope_set,
            delta: None,
        })
    }

    pub(crate) fn kernel_contains(&self, variable: SetVarId, element: i32) -> bool {
        self.env.set_contains(self.set_vars[variable].kernel, element)
    }

    pub(crate) fn envelope_contains(&self, variable: SetVarId, element: i32) -> bool {
        self.env
            .set_contains(self.set_vars[variable].envelope, element)
    }

    pub(crate) fn kernel_size(&self, variable: SetVarId) -> usize {
        self.env.set_len(self.set_vars[variable].kernel)
    }

    pub(crate) fn envelope_size(&self, variable: SetVarId) -> usize {
        self.env.set_len(self.set_vars[variable].envelope)
    }

    pub(crate) fn kernel_iter(&self, variable: SetVarId) -> impl Iterator<Item = i32> + '_ {
        self.env.set_iter(self.set_vars[variable].kernel)
    }

    pub(crate) fn envelope_iter(&self, variable: SetVarId) -> impl Iterator<Item = i32> + '_ {
        self.env.set_iter(self.set_vars[variable].envelope)
    }

    pub(crate) fn set_is_fixed(&self, variable: SetVarId) -> bool {
        self.kernel_size(variable) == self.envelope_size(variable)
    }

    /// Make `element` a mandatory member of the set. Returns whether the
    /// domain changed.
    pub(crate) fn enforce(
        &mut self,
        variable: SetVarId,
        element: i32,
    ) -> Result<bool, Contradiction> {
        if self.kernel_contains(variable, element) {
            return Ok(false);
        }
        if !self.envelope_contains(variable, element) {
            return Err(Contradiction::new(
                variable.into(),
                format!("cannot enforce {element}, it is outside the envelope"),
            ));
        }
        let kernel = self.set_vars[variable].kernel;
        let _ = self.env.set_insert(kernel, element);
        self.record_set_delta(variable, element, SetEvent::KernelAdd);
        self.events
            .set_event_occurred(SetEvent::KernelAdd, variable);
        Ok(true)
    }

    /// Make `element` an impossible member of the set. Returns whether the
    /// domain changed.
    pub(crate) fn exclude(
        &mut self,
        variable: SetVarId,
        element: i32,
    ) -> Result<bool, Contradiction> {
        if !self.envelope_contains(variable, element) {
            return Ok(false);
        }
        if self.kernel_contains(variable, element) {
            return Err(Contradiction::new(
                variable.into(),
                format!("cannot exclude {element}, it is in the kernel"),
            ));
        }
        let envelope = self.set_vars[variable].envelope;
        let _ = self.env.set_remove(envelope, element);
        self.record_set_delta(variable, element, SetEvent::EnvelopeRemove);
        self.events
            .set_event_occurred(SetEvent::EnvelopeRemove, variable);
        Ok(true)
    }

    fn record_set_delta(&mut self, variable: SetVarId, element: i32, event: SetEvent) {
        let tick = self.env.tick();
        if let Some(delta) = &mut self.set_vars[variable].delta {
            delta.record(tick, element, event);
        }
    }

    /// Create a monitor over the delta of the set variable, enabling delta
    /// recording for it if this is the first monitor.
    pub(crate) fn monitor_set(&mut self, variable: SetVarId) -> DeltaMonitor {
        let data = &mut self.set_vars[variable];
        if data.delta.is_none() {
            data.delta = Some(SetDelta::default());
        }
        DeltaMonitor::new(variable)
    }

    pub(crate) fn set_delta(&self, variable: SetVarId) -> Option<&SetDelta> {
        self.set_vars[variable].delta.as_ref()
    }

    // Graph variables.

    pub(crate) fn new_graph_var(&mut self, num_nodes: usize) -> GraphVarId {
        let kind = SetKind::BitSet {
            offset: 0,
            capacity: num_nodes,
        };
        let kernel_nodes = self.env.make_set(kind);
        let envelope_nodes = self.env.make_set(kind);
        for node in 0..num_nodes as i32 {
            let _ = self.env.set_insert(envelope_nodes, node);
        }

        let kernel_adjacency = (0..num_nodes).map(|_| self.env.make_set(kind)).collect();
        let envelope_adjacency = (0..num_nodes).map(|_| self.env.make_set(kind)).collect();

        self.events.grow_graph();
        self.graph_vars.push(GraphVarData {
            num_nodes,
            kernel_nodes,
            envelope_nodes,
            kernel_adjacency,
            envelope_adjacency,
        })
    }

    pub(crate) fn graph_num_nodes(&self, variable: GraphVarId) -> usize {
        self.graph_vars[variable].num_nodes
    }

    /// Declare an edge as possible. Only meaningful while building the model
    /// at the root.
    pub(crate) fn add_potential_edge(&mut self, variable: GraphVarId, u: u32, v: u32) {
        let data = &self.graph_vars[variable];
        calabash_assert_simple!(
            (u as usize) < data.num_nodes && (v as usize) < data.num_nodes,
            "edge endpoints must be nodes of the graph"
        );
        calabash_assert_moderate!(
            self.env.set_contains(data.envelope_nodes, u as i32)
                && self.env.set_contains(data.envelope_nodes, v as i32),
            "edge endpoints must be in the node envelope"
        );
        let (adj_u, adj_v) = (
            data.envelope_adjacency[u as usize],
            data.envelope_adjacency[v as usize],
        );
        let _ = self.env.set_insert(adj_u, v as i32);
        let _ = self.env.set_insert(adj_v, u as i32);
    }

    pub(crate) fn kernel_node_contains(&self, variable: GraphVarId, node: u32) -> bool {
        self.env
            .set_contains(self.graph_vars[variable].kernel_nodes, node as i32)
    }

    pub(crate) fn envelope_node_contains(&self, variable: GraphVarId, node: u32) -> bool {
        self.env
            .set_contains(self.graph_vars[variable].envelope_nodes, node as i32)
    }

    pub(crate) fn kernel_edge_contains(&self, variable: GraphVarId, u: u32, v: u32) -> bool {
        self.env
            .set_contains(self.graph_vars[variable].kernel_adjacency[u as usize], v as i32)
    }

    pub(crate) fn envelope_edge_contains(&self, variable: GraphVarId, u: u32, v: u32) -> bool {
        self.env.set_contains(
            self.graph_vars[variable].envelope_adjacency[u as usize],
            v as i32,
        )
    }

    pub(crate) fn num_kernel_nodes(&self, variable: GraphVarId) -> usize {
        self.env.set_len(self.graph_vars[variable].kernel_nodes)
    }

    pub(crate) fn num_envelope_nodes(&self, variable: GraphVarId) -> usize {
        self.env.set_len(self.graph_vars[variable].envelope_nodes)
    }

    pub(crate) fn num_kernel_edges(&self, variable: GraphVarId) -> usize {
        let data = &self.graph_vars[variable];
        let degree_sum = (0..data.num_nodes)
            .map(|node| self.env.set_len(data.kernel_adjacency[node]))
            .sum::<usize>();
        degree_sum / 2
    }

    pub(crate) fn num_envelope_edges(&self, variable: GraphVarId) -> usize {
        let data = &self.graph_vars[variable];
        let degree_sum = (0..data.num_nodes)
            .map(|node| self.env.set_len(data.envelope_adjacency[node]))
            .sum::<usize>();
        degree_sum / 2
    }

    pub(crate) fn kernel_node_iter(&self, variable: GraphVarId) -> impl Iterator<Item = u32> + '_ {
        self.env
            .set_iter(self.graph_vars[variable].kernel_nodes)
            .map(|node| node as u32)
    }

    pub(crate) fn envelope_node_iter(
        &self,
        variable: GraphVarId,
    ) -> impl Iterator<Item = u32> + '_ {
        self.env
            .set_iter(self.graph_vars[variable].envelope_nodes)
            .map(|node| node as u32)
    }

    pub(crate) fn envelope_neighbour_iter(
        &self,
        variable: GraphVarId,
        node: u32,
    ) -> impl Iterator<Item = u32> + '_ {
        self.env
            .set_iter(self.graph_vars[variable].envelope_adjacency[node as usize])
            .map(|neighbour| neighbour as u32)
    }

    pub(crate) fn graph_is_fixed(&self, variable: GraphVarId) -> bool {
        self.num_kernel_nodes(variable) == self.num_envelope_nodes(variable)
            && self.num_kernel_edges(variable) == self.num_envelope_edges(variable)
    }

    /// Make `node` mandatory. Returns whether the domain changed.
    pub(crate) fn enforce_node(
        &mut self,
        variable: GraphVarId,
        node: u32,
    ) -> Result<bool, Contradiction> {
        if self.kernel_node_contains(variable, node) {
            return Ok(false);
        }
        if !self.envelope_node_contains(variable, node) {
            return Err(Contradiction::new(
                variable.into(),
                format!("cannot enforce node {node}, it is outside the envelope"),
            ));
        }
        let kernel_nodes = self.graph_vars[variable].kernel_nodes;
        let _ = self.env.set_insert(kernel_nodes, node as i32);
        self.events
            .graph_event_occurred(GraphEvent::NodeEnforced, variable);
        Ok(true)
    }

    /// Make `node` impossible, excluding its incident potential edges first.
    /// Returns whether the domain changed.
    pub(crate) fn exclude_node(
        &mut self,
        variable: GraphVarId,
        node: u32,
    ) -> Result<bool, Contradiction> {
        if !self.envelope_node_contains(variable, node) {
            return Ok(false);
        }
        if self.kernel_node_contains(variable, node) {
            return Err(Contradiction::new(
                variable.into(),
                format!("cannot exclude node {node}, it is in the kernel"),
            ));
        }

        let neighbours = self
            .envelope_neighbour_iter(variable, node)
            .collect::<Vec<_>>();
        for neighbour in neighbours {
            let _ = self.exclude_edge(variable, node, neighbour)?;
        }

        let envelope_nodes = self.graph_vars[variable].envelope_nodes;
        let _ = self.env.set_remove(envelope_nodes, node as i32);
        self.events
            .graph_event_occurred(GraphEvent::NodeExcluded, variable);
        Ok(true)
    }

    /// Make the edge `{u, v}` mandatory, enforcing both endpoints as well.
    /// Returns whether the domain changed.
    pub(crate) fn enforce_edge(
        &mut self,
        variable: GraphVarId,
        u: u32,
        v: u32,
    ) -> Result<bool, Contradiction> {
        if self.kernel_edge_contains(variable, u, v) {
            return Ok(false);
        }
        if !self.envelope_edge_contains(variable, u, v) {
            return Err(Contradiction::new(
                variable.into(),
                format!("cannot enforce edge {{{u}, {v}}}, it is outside the envelope"),
            ));
        }
        let (adj_u, adj_v) = (
            self.graph_vars[variable].kernel_adjacency[u as usize],
            self.graph_vars[variable].kernel_adjacency[v as usize],
        );
        let _ = self.env.set_insert(adj_u, v as i32);
        let _ = self.env.set_insert(adj_v, u as i32);
        self.events
            .graph_event_occurred(GraphEvent::EdgeEnforced, variable);

        let _ = self.enforce_node(variable, u)?;
        let _ = self.enforce_node(variable, v)?;
        Ok(true)
    }

    /// Make the edge `{u, v}` impossible. Returns whether the domain changed.
    pub(crate) fn exclude_edge(
        &mut self,
        variable: GraphVarId,
        u: u32,
        v: u32,
    ) -> Result<bool, Contradiction> {
        if !self.envelope_edge_contains(variable, u, v) {
            return Ok(false);
        }
        if self.kernel_edge_contains(variable, u, v) {
            return Err(Contradiction::new(
                variable.into(),
                format!("cannot exclude edge {{{u}, {v}}}, it is in the kernel"),
            ));
        }
        let (adj_u, adj_v) = (
            self.graph_vars[variable].envelope_adjacency[u as usize],
            self.graph_vars[variable].envelope_adjacency[v as usize],
        );
        let _ = self.env.set_remove(adj_u, v as i32);
        let _ = self.env.set_remove(adj_v, u as i32);
        self.events
            .graph_event_occurred(GraphEvent::EdgeExcluded, variable);
        Ok(true)
    }

    /// Snapshot the current assignment. Unfixed integer variables record
    /// their lower bound; set and graph variables record their kernel.
    pub(crate) fn snapshot(&self) -> Solution {
        let mut solution = Solution::default();
        for index in 0..self.int_domains.len() {
            let variable = DomainId::create_from_index(index);
            let _ = solution.push_int_value(self.int_lower_bound(variable));
        }
        for index in 0..self.set_vars.len() {
            let variable = SetVarId::create_from_index(index);
            let elements = self.kernel_iter(variable).sorted_unstable().collect();
            let _ = solution.push_set_value(elements);
        }
        for index in 0..self.graph_vars.len() {
            let variable = GraphVarId::create_from_index(index);
            let nodes = self
                .kernel_node_iter(variable)
                .sorted_unstable()
                .collect::<Vec<_>>();
            let mut edges = Vec::new();
            for u in nodes.iter().copied() {
                for v in self
                    .env
                    .set_iter(self.graph_vars[variable].kernel_adjacency[u as usize])
                {
                    let v = v as u32;
                    if u < v {
                        edges.push((u, v));
                    }
                }
            }
            edges.sort_unstable();
            let _ = solution.push_graph_value(GraphValue { nodes, edges });
        }
        solution
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bound_operations_keep_the_domain_an_interval() {
        let mut store = VariableStore::new();
        let x = store.new_bounded_integer(0, 10);

        assert!(store.set_int_lower_bound(x, 3).unwrap());
        assert!(store.set_int_upper_bound(x, 7).unwrap());
        assert!(!store.set_int_lower_bound(x, 2).unwrap());

        assert_eq!(store.int_lower_bound(x), 3);
        assert_eq!(store.int_upper_bound(x), 7);
        assert_eq!(store.int_domain_size(x), 5);

        // Interior removals are ignored on bounded domains.
        assert!(!store.int_remove(x, 5).unwrap());
        assert!(store.int_contains(x, 5));
    }

    #[test]
    fn tightening_past_the_opposite_bound_empties_the_domain() {
        let mut store = VariableStore::new();
        let x = store.new_bounded_integer(0, 4);

        assert!(store.set_int_lower_bound(x, 5).is_err());
        // The failed operation must not have touched the domain.
        assert_eq!(store.int_lower_bound(x), 0);
        assert_eq!(store.int_upper_bound(x), 4);
    }

    #[test]
    fn enumerated_bounds_always_point_at_members() {
        let mut store = VariableStore::new();
        let x = store.new_enumerated_integer(&[1, 4, 5, 9]);

        assert!(store.set_int_lower_bound(x, 2).unwrap());
        assert_eq!(store.int_lower_bound(x), 4);

        assert!(store.set_int_upper_bound(x, 8).unwrap());
        assert_eq!(store.int_upper_bound(x), 5);

        assert_eq!(store.int_domain_size(x), 2);
    }

    #[test]
    fn removing_an_enumerated_bound_slides_it_to_the_next_member() {
        let mut store = VariableStore::new();
        let x = store.new_enumerated_integer(&[1, 3, 7]);

        assert!(store.int_remove(x, 1).unwrap());
        assert_eq!(store.int_lower_bound(x), 3);

        assert!(store.int_remove(x, 3).unwrap());
        assert_eq!(store.int_lower_bound(x), 7);
        assert!(store.int_is_fixed(x));

        assert!(store.int_remove(x, 7).is_err());
    }

    #[test]
    fn domains_are_restored_on_backtrack() {
        let mut store = VariableStore::new();
        let x = store.new_enumerated_integer(&[1, 2, 3, 5]);

        store.env.world_push();
        let _ = store.int_remove(x, 2).unwrap();
        let _ = store.set_int_lower_bound(x, 3).unwrap();
        assert_eq!(store.int_domain_size(x), 2);

        store.env.world_pop();
        assert_eq!(store.int_lower_bound(x), 1);
        assert!(store.int_contains(x, 2));
        assert_eq!(store.int_domain_size(x), 4);
    }

    #[test]
    fn instantiate_requires_membership() {
        let mut store = VariableStore::new();
        let x = store.new_enumerated_integer(&[1, 3, 7]);

        assert!(store.int_instantiate(x, 4).is_err());
        assert!(store.int_instantiate(x, 3).unwrap());
        assert!(store.int_is_fixed(x));
        assert_eq!(store.int_lower_bound(x), 3);
    }

    #[test]
    fn the_kernel_grows_and_the_envelope_shrinks() {
        let mut store = VariableStore::new();
        let s = store.new_set_var(&[2], &[1, 2, 3, 4]);

        assert!(store.enforce(s, 3).unwrap());
        assert!(!store.enforce(s, 3).unwrap());
        assert!(store.exclude(s, 4).unwrap());

        assert_eq!(store.kernel_size(s), 2);
        assert_eq!(store.envelope_size(s), 3);
        assert!(!store.set_is_fixed(s));

        // The kernel stays a subset of the envelope.
        assert!(store.enforce(s, 4).is_err());
        assert!(store.exclude(s, 2).is_err());

        assert!(store.exclude(s, 1).unwrap());
        assert!(store.set_is_fixed(s));
    }

    #[test]
    fn excluding_a_node_excludes_its_incident_edges() {
        let mut store = VariableStore::new();
        let g = store.new_graph_var(4);
        store.add_potential_edge(g, 0, 1);
        store.add_potential_edge(g, 1, 2);
        store.add_potential_edge(g, 2, 3);

        assert!(store.exclude_node(g, 1).unwrap());
        assert!(!store.envelope_edge_contains(g, 0, 1));
        assert!(!store.envelope_edge_contains(g, 1, 2));
        assert!(store.envelope_edge_contains(g, 2, 3));
        assert_eq!(store.num_envelope_nodes(g), 3);
    }

    #[test]
    fn enforcing_an_edge_enforces_its_endpoints() {
        let mut store = VariableStore::new();
        let g = store.new_graph_var(3);
        store.add_potential_edge(g, 0, 2);

        assert!(store.enforce_edge(g, 0, 2).unwrap());
        assert!(store.kernel_node_contains(g, 0));
        assert!(store.kernel_node_contains(g, 2));
        assert_eq!(store.num_kernel_edges(g), 1);

        assert!(store.exclude_edge(g, 0, 2).is_err());
    }

    #[test]
    fn graph_mutations_are_restored_on_backtrack() {
        let mut store = VariableStore::new();
        let g = store.new_graph_var(3);
        store.add_potential_edge(g, 0, 1);

        store.env.world_push();
        let _ = store.enforce_edge(g, 0, 1).unwrap();
        let _ = store.exclude_node(g, 2).unwrap();
        assert!(store.graph_is_fixed(g));

        store.env.world_pop();
        assert_eq!(store.num_kernel_edges(g), 0);
        assert!(store.envelope_node_contains(g, 2));
        assert!(!store.graph_is_fixed(g));
    }
}
