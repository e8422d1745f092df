//! The filtering algorithms behind the [`constraints`](crate::constraints)
//! factories.

pub(crate) mod cumulative;
mod graph_node_count;
mod linear_less_or_equal;
mod set_cardinality;
mod set_subset;
#[cfg(test)]
pub(crate) mod test_helper;

pub(crate) use cumulative::CumulativeConstructor;
pub(crate) use graph_node_count::GraphNodeCountConstructor;
pub(crate) use linear_less_or_equal::LinearLessOrEqualConstructor;
pub(crate) use set_cardinality::SetCardinalityConstructor;
pub(crate) use set_subset::SetSubsetConstructor;
