use std::fmt::Debug;

use super::Stores;

/// A generic undo action pushed for composite mutations.
///
/// The primitive trail entries cover stored ints, longs, bools, and set
/// membership; an operation generalises the trail to arbitrary reversible
/// actions on the stores. `undo` is invoked exactly once, when the world in
/// which the operation was pushed is popped. It must perform raw writes only:
/// logging further trail entries from inside an undo is not supported.
pub(crate) trait StoredOperation: Debug {
    fn undo(&mut self, stores: &mut Stores);
}
