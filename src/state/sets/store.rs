use fnv::FnvHashMap;

use super::IntervalSet;
use super::LinkedSet;
use super::OffsetBitSet;
use super::SetId;
use super::SetKind;
use super::SwapSet;
use crate::asserts::calabash_assert_simple;
use crate::containers::KeyedVec;

/// The tagged union over the set backings. All variants share one contract:
/// `insert`/`remove` report whether membership changed.
#[derive(Debug, Clone)]
pub(crate) enum SetBacking {
    BitSet(OffsetBitSet),
    Swap(SwapSet),
    Linked(LinkedSet),
    Interval(IntervalSet),
}

impl SetBacking {
    fn from_kind(kind: SetKind) -> Self {
        match kind {
            SetKind::BitSet { offset, capacity } => {
                SetBacking::BitSet(OffsetBitSet::new(offset, capacity))
            }
            SetKind::Swap { offset, capacity } => SetBacking::Swap(SwapSet::new(offset, capacity)),
            SetKind::Linked { offset, capacity } => {
                SetBacking::Linked(LinkedSet::new(offset, capacity))
            }
            SetKind::Interval => SetBacking::Interval(IntervalSet::new()),
        }
    }

    fn insert(&mut self, element: i32) -> bool {
        match self {
            SetBacking::BitSet(set) => set.insert(element),
            SetBacking::Swap(set) => set.insert(element),
            SetBacking::Linked(set) => set.insert(element),
            SetBacking::Interval(set) => set.insert(element),
        }
    }

    fn remove(&mut self, element: i32) -> bool {
        match self {
            SetBacking::BitSet(set) => set.remove(element),
            SetBacking::Swap(set) => set.remove(element),
            SetBacking::Linked(set) => set.remove(element),
            SetBacking::Interval(set) => set.remove(element),
        }
    }

    fn contains(&self, element: i32) -> bool {
        match self {
            SetBacking::BitSet(set) => set.contains(element),
            SetBacking::Swap(set) => set.contains(element),
            SetBacking::Linked(set) => set.contains(element),
            SetBacking::Interval(set) => set.contains(element),
        }
    }

    fn len(&self) -> usize {
        match self {
            SetBacking::BitSet(set) => set.len(),
            SetBacking::Swap(set) => set.len(),
            SetBacking::Linked(set) => set.len(),
            SetBacking::Interval(set) => set.len(),
        }
    }

    fn min(&self) -> Option<i32> {
        match self {
            SetBacking::BitSet(set) => set.min(),
            SetBacking::Swap(set) => set.min(),
            SetBacking::Linked(set) => set.min(),
            SetBacking::Interval(set) => set.min(),
        }
    }

    fn max(&self) -> Option<i32> {
        match self {
            SetBacking::BitSet(set) => set.max(),
            SetBacking::Swap(set) => set.max(),
            SetBacking::Linked(set) => set.max(),
            SetBacking::Interval(set) => set.max(),
        }
    }

    fn iter(&self) -> Box<dyn Iterator<Item = i32> + '_> {
        match self {
            SetBacking::BitSet(set) => Box::new(set.iter()),
            SetBacking::Swap(set) => Box::new(set.iter()),
            SetBacking::Linked(set) => Box::new(set.iter()),
            SetBacking::Interval(set) => Box::new(set.iter()),
        }
    }
}

/// A set whose membership is derived from the sets it observes. Derived sets
/// are never mutated directly and never trailed: they are updated on the raw
/// mutation path, which runs both on forward mutation and on undo replay, so
/// their contents stay consistent across backtracking for free.
#[derive(Debug)]
enum DerivedSet {
    /// The union of the observed sets, with per-element reference counts.
    Union { counts: FnvHashMap<i32, u32> },
    /// The complement of the observed set with respect to the universe
    /// `[offset, offset + capacity)`.
    Complement { offset: i32, capacity: usize },
}

#[derive(Debug)]
struct SetEntry {
    backing: SetBacking,
    derived: Option<DerivedSet>,
    observers: Vec<SetId>,
}

/// Owns every backtrackable set. Mutations go through the
/// [`Environment`](crate::state::Environment), which logs the inverse
/// operation to the trail before calling the raw mutators here.
#[derive(Debug, Default)]
pub(crate) struct SetStore {
    entries: KeyedVec<SetId, SetEntry>,
}

impl SetStore {
    pub(crate) fn new_set(&mut self, kind: SetKind) -> SetId {
        self.entries.push(SetEntry {
            backing: SetBacking::from_kind(kind),
            derived: None,
            observers: Vec::new(),
        })
    }

    /// Create a set that observes `sources` and maintains their union.
    pub(crate) fn new_union(&mut self, sources: &[SetId], kind: SetKind) -> SetId {
        let union = self.entries.push(SetEntry {
            backing: SetBacking::from_kind(kind),
            derived: Some(DerivedSet::Union {
                counts: FnvHashMap::default(),
            }),
            observers: Vec::new(),
        });

        for &source in sources {
            calabash_assert_simple!(source != union, "a union cannot observe itself");
            self.entries[source].observers.push(union);

            // Seed only the new union; cascading from the source would
            // re-notify its existing observers.
            let elements = self.entries[source].backing.iter().collect::<Vec<_>>();
            for element in elements {
                if self.update_derived(union, element, true) {
                    self.cascade(union, element, true);
                }
            }
        }
        union
    }

    /// Create a set that observes `source` and maintains its complement with
    /// respect to `[offset, offset + capacity)`.
    pub(crate) fn new_complement(&mut self, source: SetId, offset: i32, capacity: usize) -> SetId {
        let mut backing = OffsetBitSet::new(offset, capacity);
        for element in offset..offset + capacity as i32 {
            if !self.entries[source].backing.contains(element) {
                let _ = backing.insert(element);
            }
        }

        let complement = self.entries.push(SetEntry {
            backing: SetBacking::BitSet(backing),
            derived: Some(DerivedSet::Complement { offset, capacity }),
            observers: Vec::new(),
        });
        self.entries[source].observers.push(complement);
        complement
    }

    pub(crate) fn is_derived(&self, set: SetId) -> bool {
        self.entries[set].derived.is_some()
    }

    /// Insert without trailing. Observers are notified transitively.
    pub(crate) fn insert_raw(&mut self, set: SetId, element: i32) -> bool {
        let changed = self.entries[set].backing.insert(element);
        if changed {
            self.cascade(set, element, true);
        }
        changed
    }

    /// Remove without trailing. Observers are notified transitively.
    pub(crate) fn remove_raw(&mut self, set: SetId, element: i32) -> bool {
        let changed = self.entries[set].backing.remove(element);
        if changed {
            self.cascade(set, element, false);
        }
        changed
    }

    /// Push one membership change through the observer graph.
    fn cascade(&mut self, source: SetId, element: i32, inserted: bool) {
        let mut worklist = vec![(source, element, inserted)];

        while let Some((changed_set, element, inserted)) = worklist.pop() {
            let observers = self.entries[changed_set].observers.clone();

            for observer in observers {
                if self.update_derived(observer, element, inserted) {
                    worklist.push((observer, element, inserted));
                }
            }
        }
    }

    /// Apply one upstream change to a derived set. Returns whether the
    /// derived set's own membership changed.
    fn update_derived(&mut self, observer: SetId, element: i32, inserted: bool) -> bool {
        let SetEntry {
            backing, derived, ..
        } = &mut self.entries[observer];

        match derived
            .as_mut()
            .expect("only derived sets observe other sets")
        {
            DerivedSet::Union { counts } => {
                if inserted {
                    let count = counts.entry(element).or_insert(0);
                    *count += 1;
                    *count == 1 && backing.insert(element)
                } else {
                    let count = counts
                        .get_mut(&element)
                        .expect("a removed element was counted when it was inserted");
                    *count -= 1;
                    if *count == 0 {
                        let _ = counts.remove(&element);
                        backing.remove(element)
                    } else {
                        false
                    }
                }
            }
            DerivedSet::Complement { offset, capacity } => {
                if element < *offset || ((element - *offset) as usize) >= *capacity {
                    return false;
                }
                if inserted {
                    backing.remove(element)
                } else {
                    backing.insert(element)
                }
            }
        }
    }

    pub(crate) fn contains(&self, set: SetId, element: i32) -> bool {
        self.entries[set].backing.contains(element)
    }

    pub(crate) fn len(&self, set: SetId) -> usize {
        self.entries[set].backing.len()
    }

    pub(crate) fn min(&self, set: SetId) -> Option<i32> {
        self.entries[set].backing.min()
    }

    pub(crate) fn max(&self, set: SetId) -> Option<i32> {
        self.entries[set].backing.max()
    }

    pub(crate) fn iter(&self, set: SetId) -> Box<dyn Iterator<Item = i32> + '_> {
        self.entries[set].backing.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_union_tracks_upstream_changes_in_both_directions() {
        let mut store = SetStore::default();
        let kind = SetKind::BitSet {
            offset: 0,
            capacity: 10,
        };
        let a = store.new_set(kind);
        let b = store.new_set(kind);

        let _ = store.insert_raw(a, 1);
        let _ = store.insert_raw(b, 1);
        let _ = store.insert_raw(b, 2);

        let union = store.new_union(&[a, b], kind);
        assert_eq!(store.iter(union).collect::<Vec<_>>(), vec![1, 2]);

        // 1 is still in b, so it stays in the union.
        let _ = store.remove_raw(a, 1);
        assert!(store.contains(union, 1));

        let _ = store.remove_raw(b, 1);
        assert!(!store.contains(union, 1));

        let _ = store.insert_raw(a, 5);
        assert!(store.contains(union, 5));
    }

    #[test]
    fn a_complement_mirrors_its_source() {
        let mut store = SetStore::default();
        let kind = SetKind::Swap {
            offset: 0,
            capacity: 5,
        };
        let source = store.new_set(kind);
        let _ = store.insert_raw(source, 0);

        let complement = store.new_complement(source, 0, 5);
        assert_eq!(store.iter(complement).collect::<Vec<_>>(), vec![1, 2, 3, 4]);

        let _ = store.insert_raw(source, 3);
        assert!(!store.contains(complement, 3));

        let _ = store.remove_raw(source, 0);
        assert!(store.contains(complement, 0));
    }

    #[test]
    fn unions_of_unions_cascade() {
        let mut store = SetStore::default();
        let kind = SetKind::BitSet {
            offset: 0,
            capacity: 8,
        };
        let a = store.new_set(kind);
        let b = store.new_set(kind);
        let inner = store.new_union(&[a], kind);
        let outer = store.new_union(&[inner, b], kind);

        let _ = store.insert_raw(a, 3);
        assert!(store.contains(inner, 3));
        assert!(store.contains(outer, 3));

        let _ = store.remove_raw(a, 3);
        assert!(!store.contains(outer, 3));
    }
}
