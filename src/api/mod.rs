mod outputs;
mod solver;

pub use outputs::EnumerationResult;
pub use outputs::OptimisationDirection;
pub use outputs::OptimisationResult;
pub use outputs::SatisfactionResult;
pub use solver::Solver;
