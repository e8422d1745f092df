//! Decision variables and their domain representations.
//!
//! Integer variables are identified by a [`DomainId`]; views such as
//! [`AffineView`] wrap an identifier and reinterpret its domain on the fly.
//! Set and graph variables are identified by [`SetVarId`] and [`GraphVarId`]
//! and expose a kernel/envelope pair of backtrackable sets.

mod affine_view;
mod delta;
mod int_var;
mod store;
mod variable_ids;
mod variable_names;

pub use affine_view::AffineView;
pub use delta::DeltaMonitor;
pub(crate) use delta::SetDelta;
pub use int_var::IntVar;
pub use int_var::TransformableVariable;
pub use store::VariableStore;
pub use variable_ids::DomainId;
pub use variable_ids::GraphVarId;
pub use variable_ids::SetVarId;
pub use variable_ids::VariableRef;
pub(crate) use variable_names::VariableNames;
