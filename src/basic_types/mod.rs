mod contradiction;
pub(crate) mod sequence_generators;
mod solution;
mod trail;

pub use contradiction::ConstraintOperationError;
pub use contradiction::Contradiction;
pub use contradiction::EmptyDomain;
pub use contradiction::PropagationStatus;
pub use solution::GraphValue;
pub use solution::Solution;
pub(crate) use trail::Trail;
