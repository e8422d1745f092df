//! A constraint programming solver built on a reversible (trailing) memory
//! model.
//!
//! The solver searches for assignments to integer, set, and graph variables
//! that satisfy all posted constraints (or optimise an objective), using
//! depth-first search interleaved with event-driven constraint propagation.
//! Backtracking is cheap because every mutation of solver state is logged to a
//! trail partitioned into worlds; popping a world replays its log in reverse.
//!
//! The main entry point is the [`Solver`] facade: create variables, post
//! constraints from the [`constraints`] module, and call [`Solver::satisfy`],
//! [`Solver::enumerate`], or [`Solver::optimise`] with a [`Brancher`] and a
//! [`TerminationCondition`].
//!
//! ```
//! use calabash_solver::constraints;
//! use calabash_solver::termination::Indefinite;
//! use calabash_solver::SatisfactionResult;
//! use calabash_solver::Solver;
//!
//! let mut solver = Solver::default();
//! let x = solver.new_bounded_integer(1, 3);
//! let y = solver.new_bounded_integer(1, 3);
//! let _ = solver.post(constraints::binary_less_than(x, y)).unwrap();
//!
//! let mut brancher = solver.default_brancher();
//! match solver.satisfy(&mut brancher, &mut Indefinite) {
//!     SatisfactionResult::Satisfiable(solution) => {
//!         assert!(solution.value_of(x) < solution.value_of(y));
//!     }
//!     _ => panic!("expected a solution"),
//! }
//! ```

pub(crate) mod asserts;
pub(crate) mod basic_types;
pub mod containers;
pub(crate) mod engine;
pub(crate) mod math;
pub(crate) mod propagation;
pub(crate) mod propagators;
pub(crate) mod state;
pub(crate) mod variables;

pub mod branching;
pub mod constraints;
pub mod portfolio;
pub mod termination;

#[cfg(doc)]
use crate::branching::Brancher;
#[cfg(doc)]
use crate::termination::TerminationCondition;

// A private module with public re-exports, so that all exports from the API
// surface are exports directly from the crate root.
mod api;

pub use api::*;

pub use crate::basic_types::sequence_generators::SequenceGeneratorType;
pub use crate::basic_types::ConstraintOperationError;
pub use crate::basic_types::Contradiction;
pub use crate::basic_types::EmptyDomain;
pub use crate::basic_types::GraphValue;
pub use crate::basic_types::PropagationStatus;
pub use crate::basic_types::Solution;
pub use crate::engine::GraphEvent;
pub use crate::engine::IntEvent;
pub use crate::engine::SetEvent;
pub use crate::engine::SolverStatistics;
pub use crate::propagation::Entailment;
pub use crate::propagation::Priority;
pub use crate::search::RestartOptions;
pub use crate::state::SetKind;
pub use crate::variables::AffineView;
pub use crate::variables::DomainId;
pub use crate::variables::GraphVarId;
pub use crate::variables::IntVar;
pub use crate::variables::SetVarId;
pub use crate::variables::TransformableVariable;
pub use crate::variables::VariableRef;

pub(crate) mod search;
