//! The backtrackable set family: interchangeable backings behind one
//! contract, with every mutation logged to the trail, plus derived sets
//! (union, complement) maintained through observer notifications.

mod bit_set;
mod interval_set;
mod linked_set;
mod store;
mod swap_set;

pub(crate) use bit_set::OffsetBitSet;
pub(crate) use interval_set::IntervalSet;
pub(crate) use linked_set::LinkedSet;
pub(crate) use store::SetStore;
pub(crate) use swap_set::SwapSet;

use crate::containers::StorageKey;

/// A handle to a backtrackable set owned by the
/// [`Environment`](crate::state::Environment).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SetId {
    id: u32,
}

impl StorageKey for SetId {
    fn index(&self) -> usize {
        self.id as usize
    }

    fn create_from_index(index: usize) -> Self {
        SetId { id: index as u32 }
    }
}

/// Selects the backing strategy of a backtrackable set, based on the expected
/// density and cardinality of its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetKind {
    /// An offset bitset over `[offset, offset + capacity)`; best for dense
    /// contents over a known universe.
    BitSet { offset: i32, capacity: usize },
    /// A sparse-set (dense/swap array) over `[offset, offset + capacity)`
    /// with O(1) add, remove, and contains.
    Swap { offset: i32, capacity: usize },
    /// A doubly linked list over `[offset, offset + capacity)`; iteration is
    /// proportional to the cardinality, for sparse contents.
    Linked { offset: i32, capacity: usize },
    /// A sorted interval list; best for near-contiguous contents over an
    /// unbounded universe.
    Interval,
}

/// The inverse of a single set mutation, replayed on backtrack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SetUndo {
    Insert(i32),
    Remove(i32),
}
