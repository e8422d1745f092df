use super::sets::SetStore;
use super::SetId;
use super::SetKind;
use super::SetUndo;
use super::StoredBool;
use super::StoredInt;
use super::StoredLong;
use super::StoredOperation;
use crate::asserts::calabash_assert_simple;
use crate::basic_types::Trail;
use crate::containers::KeyedVec;

/// The value stores governed by the trail: primitives and backtrackable sets.
///
/// Split out of [`Environment`] so that undo entries (including generic
/// [`StoredOperation`]s) can be replayed against the stores while the trail
/// itself is being drained.
#[derive(Debug, Default)]
pub(crate) struct Stores {
    ints: KeyedVec<StoredInt, i32>,
    longs: KeyedVec<StoredLong, i64>,
    bools: KeyedVec<StoredBool, bool>,
    pub(crate) sets: SetStore,
}

#[derive(Debug)]
enum UndoEntry {
    Int {
        reference: StoredInt,
        old_value: i32,
    },
    Long {
        reference: StoredLong,
        old_value: i64,
    },
    Bool {
        reference: StoredBool,
        old_value: bool,
    },
    Set {
        set: SetId,
        undo: SetUndo,
    },
    Operation(Box<dyn StoredOperation>),
}

/// The reversible memory of one solver instance.
///
/// The environment owns an ordered stack of worlds (choice points) and logs
/// every mutation of its stores to the active world. [`Environment::world_pop`]
/// replays the topmost world's log in reverse chronological order, restoring
/// the stores to their state at the matching [`Environment::world_push`].
///
/// The environment itself never raises a [`Contradiction`]: popping past the
/// root world is a fatal programming error, not a recoverable condition.
///
/// [`Contradiction`]: crate::basic_types::Contradiction
#[derive(Debug, Default)]
pub(crate) struct Environment {
    trail: Trail<UndoEntry>,
    stores: Stores,
    /// Bumped on every world pop; lets deltas and other caches detect that
    /// state they derived from has been rewound.
    tick: u64,
}

impl Environment {
    pub(crate) fn new() -> Self {
        Environment::default()
    }

    /// The index of the active world. The root world is 0 and is never
    /// popped.
    pub(crate) fn current_world(&self) -> usize {
        self.trail.current_world()
    }

    pub(crate) fn tick(&self) -> u64 {
        self.tick
    }

    /// Open a new world on top of the current one.
    pub(crate) fn world_push(&mut self) {
        self.trail.push_world();
    }

    /// Revert every mutation logged in the topmost world and descend to its
    /// parent.
    pub(crate) fn world_pop(&mut self) {
        let stores = &mut self.stores;
        self.trail
            .pop_world(|entry| Self::apply_undo(stores, entry));
        self.tick += 1;
    }

    /// Merge the topmost world irrevocably into its parent.
    pub(crate) fn world_commit(&mut self) {
        self.trail.commit_world();
    }

    fn apply_undo(stores: &mut Stores, entry: UndoEntry) {
        match entry {
            UndoEntry::Int {
                reference,
                old_value,
            } => stores.ints[reference] = old_value,
            UndoEntry::Long {
                reference,
                old_value,
            } => stores.longs[reference] = old_value,
            UndoEntry::Bool {
                reference,
                old_value,
            } => stores.bools[reference] = old_value,
            UndoEntry::Set { set, undo } => {
                let changed = match undo {
                    SetUndo::Insert(element) => stores.sets.insert_raw(set, element),
                    SetUndo::Remove(element) => stores.sets.remove_raw(set, element),
                };
                calabash_assert_simple!(changed, "a set undo entry must change membership");
            }
            UndoEntry::Operation(mut operation) => operation.undo(stores),
        }
    }

    pub(crate) fn make_int(&mut self, initial_value: i32) -> StoredInt {
        self.stores.ints.push(initial_value)
    }

    pub(crate) fn make_long(&mut self, initial_value: i64) -> StoredLong {
        self.stores.longs.push(initial_value)
    }

    pub(crate) fn make_bool(&mut self, initial_value: bool) -> StoredBool {
        self.stores.bools.push(initial_value)
    }

    pub(crate) fn make_set(&mut self, kind: SetKind) -> SetId {
        self.stores.sets.new_set(kind)
    }

    /// Create a derived set maintaining the union of `sources`. Derived sets
    /// are read-only through this API: they update with their sources.
    pub(crate) fn make_union(&mut self, sources: &[SetId], kind: SetKind) -> SetId {
        self.stores.sets.new_union(sources, kind)
    }

    /// Create a derived set maintaining the complement of `source` with
    /// respect to `[offset, offset + capacity)`.
    pub(crate) fn make_complement(&mut self, source: SetId, offset: i32, capacity: usize) -> SetId {
        self.stores.sets.new_complement(source, offset, capacity)
    }

    pub(crate) fn value(&self, reference: StoredInt) -> i32 {
        self.stores.ints[reference]
    }

    pub(crate) fn long_value(&self, reference: StoredLong) -> i64 {
        self.stores.longs[reference]
    }

    pub(crate) fn bool_value(&self, reference: StoredBool) -> bool {
        self.stores.bools[reference]
    }

    pub(crate) fn assign(&mut self, reference: StoredInt, value: i32) {
        let old_value = self.stores.ints[reference];
        if old_value == value {
            return;
        }
        self.trail.push(UndoEntry::Int {
            reference,
            old_value,
        });
        self.stores.ints[reference] = value;
    }

    pub(crate) fn assign_long(&mut self, reference: StoredLong, value: i64) {
        let old_value = self.stores.longs[reference];
        if old_value == value {
            return;
        }
        self.trail.push(UndoEntry::Long {
            reference,
            old_value,
        });
        self.stores.longs[reference] = value;
    }

    pub(crate) fn assign_bool(&mut self, reference: StoredBool, value: bool) {
        let old_value = self.stores.bools[reference];
        if old_value == value {
            return;
        }
        self.trail.push(UndoEntry::Bool {
            reference,
            old_value,
        });
        self.stores.bools[reference] = value;
    }

    /// Log a generic undo action for a composite mutation performed by the
    /// caller.
    pub(crate) fn push_operation(&mut self, operation: impl StoredOperation + 'static) {
        self.trail.push(UndoEntry::Operation(Box::new(operation)));
    }

    /// Insert into a backtrackable set, logging the inverse operation.
    /// Returns whether membership changed.
    pub(crate) fn set_insert(&mut self, set: SetId, element: i32) -> bool {
        calabash_assert_simple!(
            !self.stores.sets.is_derived(set),
            "derived sets cannot be mutated directly"
        );
        let changed = self.stores.sets.insert_raw(set, element);
        if changed {
            self.trail.push(UndoEntry::Set {
                set,
                undo: SetUndo::Remove(element),
            });
        }
        changed
    }

    /// Remove from a backtrackable set, logging the inverse operation.
    /// Returns whether membership changed.
    pub(crate) fn set_remove(&mut self, set: SetId, element: i32) -> bool {
        calabash_assert_simple!(
            !self.stores.sets.is_derived(set),
            "derived sets cannot be mutated directly"
        );
        let changed = self.stores.sets.remove_raw(set, element);
        if changed {
            self.trail.push(UndoEntry::Set {
                set,
                undo: SetUndo::Insert(element),
            });
        }
        changed
    }

    pub(crate) fn set_contains(&self, set: SetId, element: i32) -> bool {
        self.stores.sets.contains(set, element)
    }

    pub(crate) fn set_len(&self, set: SetId) -> usize {
        self.stores.sets.len(set)
    }

    pub(crate) fn set_min(&self, set: SetId) -> Option<i32> {
        self.stores.sets.min(set)
    }

    pub(crate) fn set_max(&self, set: SetId) -> Option<i32> {
        self.stores.sets.max(set)
    }

    pub(crate) fn set_iter(&self, set: SetId) -> impl Iterator<Item = i32> + '_ {
        self.stores.sets.iter(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_popped_world_restores_primitive_values() {
        let mut env = Environment::new();
        let x = env.make_int(0);
        let b = env.make_bool(false);
        let l = env.make_long(-1);

        env.world_push();
        env.assign(x, 5);
        env.assign(x, 7);
        env.assign_bool(b, true);
        env.assign_long(l, 100);

        env.world_pop();
        assert_eq!(env.value(x), 0);
        assert!(!env.bool_value(b));
        assert_eq!(env.long_value(l), -1);
    }

    #[test]
    fn nested_pushes_revert_one_level_at_a_time() {
        let mut env = Environment::new();
        let x = env.make_int(1);

        env.world_push();
        env.assign(x, 2);
        env.world_push();
        env.assign(x, 3);

        env.world_pop();
        assert_eq!(env.value(x), 2);
        env.world_pop();
        assert_eq!(env.value(x), 1);
    }

    #[test]
    fn committing_a_world_keeps_its_mutations() {
        let mut env = Environment::new();
        let x = env.make_int(0);

        env.world_push();
        env.world_push();
        env.assign(x, 9);
        env.world_commit();

        assert_eq!(env.value(x), 9);
        assert_eq!(env.current_world(), 1);

        env.world_pop();
        assert_eq!(env.value(x), 0);
    }

    #[test]
    fn set_mutations_are_reverted_per_world() {
        let mut env = Environment::new();
        let set = env.make_set(SetKind::Linked {
            offset: 0,
            capacity: 10,
        });

        env.world_push();
        assert!(env.set_insert(set, 1));
        env.world_push();
        assert!(env.set_insert(set, 2));
        env.world_push();
        assert!(env.set_insert(set, 3));

        env.world_pop();
        env.world_pop();

        let mut elements = env.set_iter(set).collect::<Vec<_>>();
        elements.sort_unstable();
        assert_eq!(elements, vec![1]);
    }

    #[test]
    fn every_backing_restores_its_state_across_nested_worlds() {
        let kinds = [
            SetKind::BitSet {
                offset: 0,
                capacity: 16,
            },
            SetKind::Swap {
                offset: 0,
                capacity: 16,
            },
            SetKind::Linked {
                offset: 0,
                capacity: 16,
            },
            SetKind::Interval,
        ];

        for kind in kinds {
            let mut env = Environment::new();
            let set = env.make_set(kind);
            let _ = env.set_insert(set, 2);

            env.world_push();
            assert!(env.set_insert(set, 6));
            env.world_push();
            assert!(env.set_remove(set, 2));
            assert!(env.set_insert(set, 9));

            env.world_pop();
            env.world_pop();

            let mut elements = env.set_iter(set).collect::<Vec<_>>();
            elements.sort_unstable();
            assert_eq!(elements, vec![2], "backing {kind:?} failed to restore");
        }
    }

    #[test]
    fn add_then_remove_within_one_world_is_identity() {
        let mut env = Environment::new();
        let set = env.make_set(SetKind::Interval);
        let _ = env.set_insert(set, 4);

        env.world_push();
        assert!(env.set_insert(set, 9));
        assert!(env.set_remove(set, 9));
        env.world_pop();

        assert_eq!(env.set_iter(set).collect::<Vec<_>>(), vec![4]);
    }

    #[test]
    fn derived_sets_follow_the_trail_of_their_sources() {
        let mut env = Environment::new();
        let kind = SetKind::BitSet {
            offset: 0,
            capacity: 16,
        };
        let a = env.make_set(kind);
        let b = env.make_set(kind);
        let union = env.make_union(&[a, b], kind);

        let _ = env.set_insert(a, 1);

        env.world_push();
        let _ = env.set_insert(b, 1);
        let _ = env.set_insert(b, 2);
        assert!(env.set_contains(union, 2));

        env.world_pop();
        assert!(env.set_contains(union, 1));
        assert!(!env.set_contains(union, 2));
    }

    #[derive(Debug)]
    struct RestoreLong {
        reference: crate::state::StoredLong,
        old_value: i64,
    }

    impl StoredOperation for RestoreLong {
        fn undo(&mut self, stores: &mut Stores) {
            stores.longs[self.reference] = self.old_value;
        }
    }

    #[test]
    fn generic_operations_are_replayed_on_pop() {
        let mut env = Environment::new();
        let l = env.make_long(10);

        env.world_push();
        // A composite mutation which manages its own undo entry.
        env.push_operation(RestoreLong {
            reference: l,
            old_value: env.long_value(l),
        });
        env.stores.longs[l] = 99;
        assert_eq!(env.long_value(l), 99);

        env.world_pop();
        assert_eq!(env.long_value(l), 10);
    }

    #[test]
    fn the_tick_advances_on_every_pop() {
        let mut env = Environment::new();
        assert_eq!(env.tick(), 0);

        env.world_push();
        env.world_push();
        env.world_pop();
        env.world_pop();
        assert_eq!(env.tick(), 2);
    }
}
