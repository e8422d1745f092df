//! Depth-first search with chronological backtracking, restarts, and limits.

mod restart_strategy;
mod search_loop;

pub use restart_strategy::RestartOptions;
pub(crate) use restart_strategy::RestartStrategy;
pub(crate) use search_loop::SearchLimits;
pub(crate) use search_loop::SearchLoop;
pub(crate) use search_loop::SearchMode;
pub(crate) use search_loop::SearchStatus;
