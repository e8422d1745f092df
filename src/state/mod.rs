//! The reversible memory model: stored primitives, backtrackable sets, and
//! the world-partitioned undo trail that makes backtracking cheap.

mod environment;
mod operation;
pub(crate) mod sets;
mod stored;

pub(crate) use environment::Environment;
pub(crate) use environment::Stores;
pub(crate) use operation::StoredOperation;
pub use sets::SetId;
pub use sets::SetKind;
pub(crate) use sets::SetUndo;
pub(crate) use stored::StoredBool;
pub(crate) use stored::StoredInt;
pub(crate) use stored::StoredLong;
