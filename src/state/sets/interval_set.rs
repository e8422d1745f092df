/// A sorted list of disjoint, non-adjacent intervals. Near-contiguous
/// contents are stored in O(number of runs) memory; the universe is
/// unbounded.
#[derive(Debug, Clone, Default)]
pub(crate) struct IntervalSet {
    /// Sorted by the lower endpoint; `hi` is inclusive. Adjacent intervals
    /// are always merged.
    intervals: Vec<(i32, i32)>,
    len: usize,
}

impl IntervalSet {
    pub(crate) fn new() -> Self {
        IntervalSet::default()
    }

    /// The index of the first interval whose upper endpoint is at least
    /// `element`, which is the only interval that can contain it.
    fn candidate(&self, element: i32) -> usize {
        self.intervals.partition_point(|&(_, hi)| hi < element)
    }

    pub(crate) fn contains(&self, element: i32) -> bool {
        let index = self.candidate(element);
        self.intervals
            .get(index)
            .is_some_and(|&(lo, _)| lo <= element)
    }

    pub(crate) fn insert(&mut self, element: i32) -> bool {
        if self.contains(element) {
            return false;
        }
        let index = self.candidate(element);

        let merges_left = index > 0 && self.intervals[index - 1].1 + 1 == element;
        let merges_right = self
            .intervals
            .get(index)
            .is_some_and(|&(lo, _)| lo - 1 == element);

        match (merges_left, merges_right) {
            (true, true) => {
                self.intervals[index - 1].1 = self.intervals[index].1;
                let _ = self.intervals.remove(index);
            }
            (true, false) => self.intervals[index - 1].1 = element,
            (false, true) => self.intervals[index].0 = element,
            (false, false) => self.intervals.insert(index, (element, element)),
        }
        self.len += 1;
        true
    }

    pub(crate) fn remove(&mut self, element: i32) -> bool {
        if !self.contains(element) {
            return false;
        }
        let index = self.candidate(element);
        let (lo, hi) = self.intervals[index];

        if lo == hi {
            let _ = self.intervals.remove(index);
        } else if element == lo {
            self.intervals[index].0 = lo + 1;
        } else if element == hi {
            self.intervals[index].1 = hi - 1;
        } else {
            self.intervals[index].1 = element - 1;
            self.intervals.insert(index + 1, (element + 1, hi));
        }
        self.len -= 1;
        true
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn min(&self) -> Option<i32> {
        self.intervals.first().map(|&(lo, _)| lo)
    }

    pub(crate) fn max(&self) -> Option<i32> {
        self.intervals.last().map(|&(_, hi)| hi)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.intervals.iter().flat_map(|&(lo, hi)| lo..=hi)
    }
}
