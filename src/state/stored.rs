use crate::containers::StorageKey;

/// A reversible `i32` stored in the [`Environment`](super::Environment).
/// Every write is logged to the trail of the active world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StoredInt {
    id: u32,
}

/// A reversible `i64` stored in the [`Environment`](super::Environment).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StoredLong {
    id: u32,
}

/// A reversible `bool` stored in the [`Environment`](super::Environment).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StoredBool {
    id: u32,
}

macro_rules! stored_key {
    ($name:ident) => {
        impl StorageKey for $name {
            fn index(&self) -> usize {
                self.id as usize
            }

            fn create_from_index(index: usize) -> Self {
                $name { id: index as u32 }
            }
        }
    };
}

stored_key!(StoredInt);
stored_key!(StoredLong);
stored_key!(StoredBool);
