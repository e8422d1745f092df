use crate::asserts::calabash_assert_simple;

/// A bitset over the universe `[offset, offset + capacity)`.
#[derive(Debug, Clone)]
pub(crate) struct OffsetBitSet {
    offset: i32,
    capacity: usize,
    words: Vec<u64>,
    len: usize,
}

impl OffsetBitSet {
    pub(crate) fn new(offset: i32, capacity: usize) -> Self {
        OffsetBitSet {
            offset,
            capacity,
            words: vec![0; capacity.div_ceil(64)],
            len: 0,
        }
    }

    fn index(&self, element: i32) -> usize {
        calabash_assert_simple!(
            element >= self.offset && ((element - self.offset) as usize) < self.capacity,
            "element {element} is outside the universe of the bitset"
        );
        (element - self.offset) as usize
    }

    pub(crate) fn in_universe(&self, element: i32) -> bool {
        element >= self.offset && ((element - self.offset) as usize) < self.capacity
    }

    pub(crate) fn insert(&mut self, element: i32) -> bool {
        let index = self.index(element);
        let word = &mut self.words[index / 64];
        let mask = 1_u64 << (index % 64);

        if *word & mask != 0 {
            return false;
        }
        *word |= mask;
        self.len += 1;
        true
    }

    pub(crate) fn remove(&mut self, element: i32) -> bool {
        if !self.in_universe(element) {
            return false;
        }
        let index = self.index(element);
        let word = &mut self.words[index / 64];
        let mask = 1_u64 << (index % 64);

        if *word & mask == 0 {
            return false;
        }
        *word &= !mask;
        self.len -= 1;
        true
    }

    pub(crate) fn contains(&self, element: i32) -> bool {
        if !self.in_universe(element) {
            return false;
        }
        let index = (element - self.offset) as usize;
        self.words[index / 64] & (1_u64 << (index % 64)) != 0
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn min(&self) -> Option<i32> {
        self.iter().next()
    }

    pub(crate) fn max(&self) -> Option<i32> {
        for (word_index, &word) in self.words.iter().enumerate().rev() {
            if word != 0 {
                let bit = 63 - word.leading_zeros() as usize;
                return Some(self.offset + (word_index * 64 + bit) as i32);
            }
        }
        None
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        let offset = self.offset;
        self.words
            .iter()
            .enumerate()
            .flat_map(move |(word_index, &word)| {
                BitIter { word }.map(move |bit| offset + (word_index * 64 + bit) as i32)
            })
    }
}

struct BitIter {
    word: u64,
}

impl Iterator for BitIter {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.word == 0 {
            return None;
        }
        let bit = self.word.trailing_zeros() as usize;
        self.word &= self.word - 1;
        Some(bit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_remove_contains() {
        let mut set = OffsetBitSet::new(-5, 100);

        assert!(set.insert(-5));
        assert!(set.insert(63));
        assert!(set.insert(94));
        assert!(!set.insert(63));

        assert!(set.contains(-5));
        assert!(set.contains(63));
        assert!(!set.contains(0));
        assert_eq!(set.len(), 3);

        assert!(set.remove(63));
        assert!(!set.remove(63));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn min_max_and_iteration_are_sorted() {
        let mut set = OffsetBitSet::new(0, 200);
        for element in [150, 3, 64, 65] {
            let _ = set.insert(element);
        }

        assert_eq!(set.min(), Some(3));
        assert_eq!(set.max(), Some(150));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![3, 64, 65, 150]);
    }
}
