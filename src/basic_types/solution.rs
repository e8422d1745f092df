use crate::containers::KeyedVec;
use crate::variables::DomainId;
use crate::variables::GraphVarId;
use crate::variables::SetVarId;

/// A snapshot of a full assignment, taken when the search loop reaches a state
/// where every branching variable is fixed.
///
/// Integer variables record their single remaining value; set and graph
/// variables record their kernel (which equals the envelope once they are
/// instantiated).
#[derive(Debug, Clone, Default)]
pub struct Solution {
    int_values: KeyedVec<DomainId, i32>,
    set_values: KeyedVec<SetVarId, Vec<i32>>,
    graph_values: KeyedVec<GraphVarId, GraphValue>,
}

/// The value of a graph variable in a [`Solution`]: its mandatory nodes and
/// edges.
#[derive(Debug, Clone, Default)]
pub struct GraphValue {
    pub nodes: Vec<u32>,
    pub edges: Vec<(u32, u32)>,
}

impl Solution {
    pub(crate) fn push_int_value(&mut self, value: i32) -> DomainId {
        self.int_values.push(value)
    }

    pub(crate) fn push_set_value(&mut self, value: Vec<i32>) -> SetVarId {
        self.set_values.push(value)
    }

    pub(crate) fn push_graph_value(&mut self, value: GraphValue) -> GraphVarId {
        self.graph_values.push(value)
    }

    /// The value of the given integer variable.
    pub fn value_of(&self, variable: DomainId) -> i32 {
        self.int_values[variable]
    }

    /// The elements of the given set variable.
    pub fn set_value_of(&self, variable: SetVarId) -> &[i32] {
        &self.set_values[variable]
    }

    /// The nodes and edges of the given graph variable.
    pub fn graph_value_of(&self, variable: GraphVarId) -> &GraphValue {
        &self.graph_values[variable]
    }
}
