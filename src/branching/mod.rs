//! Heuristics that drive the search: variable selectors pick the next
//! unfixed variable, value selectors turn it into a [`Decision`], and a
//! [`Brancher`] combines the two.

mod brancher;
mod decision;
mod selection_context;
pub mod value_selection;
pub mod variable_selection;

pub use brancher::Brancher;
pub use brancher::DefaultBrancher;
pub use brancher::IndependentVariableValueBrancher;
pub use decision::Decision;
pub use selection_context::SelectionContext;
