use crate::asserts::calabash_assert_simple;

/// A sparse-set over the universe `[offset, offset + capacity)`: a dense
/// array of the present elements plus a position index, giving O(1) insert,
/// remove, and contains. Removal swaps the removed element with the last
/// dense entry.
#[derive(Debug, Clone)]
pub(crate) struct SwapSet {
    offset: i32,
    positions: Vec<usize>,
    dense: Vec<i32>,
    len: usize,
}

impl SwapSet {
    pub(crate) fn new(offset: i32, capacity: usize) -> Self {
        SwapSet {
            offset,
            positions: vec![usize::MAX; capacity],
            dense: Vec::new(),
            len: 0,
        }
    }

    fn index(&self, element: i32) -> usize {
        calabash_assert_simple!(
            element >= self.offset && ((element - self.offset) as usize) < self.positions.len(),
            "element {element} is outside the universe of the swap set"
        );
        (element - self.offset) as usize
    }

    pub(crate) fn contains(&self, element: i32) -> bool {
        if element < self.offset || ((element - self.offset) as usize) >= self.positions.len() {
            return false;
        }
        let position = self.positions[(element - self.offset) as usize];
        position < self.len && self.dense[position] == element
    }

    pub(crate) fn insert(&mut self, element: i32) -> bool {
        if self.contains(element) {
            return false;
        }
        let index = self.index(element);

        if self.len == self.dense.len() {
            self.dense.push(element);
        } else {
            self.dense[self.len] = element;
        }
        self.positions[index] = self.len;
        self.len += 1;
        true
    }

    pub(crate) fn remove(&mut self, element: i32) -> bool {
        if !self.contains(element) {
            return false;
        }
        let position = self.positions[self.index(element)];
        let last = self.dense[self.len - 1];

        self.dense[position] = last;
        let last_index = self.index(last);
        self.positions[last_index] = position;
        self.len -= 1;
        true
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn min(&self) -> Option<i32> {
        self.iter().min()
    }

    pub(crate) fn max(&self) -> Option<i32> {
        self.iter().max()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.dense[..self.len].iter().copied()
    }
}
