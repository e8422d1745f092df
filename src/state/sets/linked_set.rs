use crate::asserts::calabash_assert_simple;

const NONE: i32 = -1;

/// A doubly linked list over index arrays for the universe
/// `[offset, offset + capacity)`. Iteration visits only present elements, so
/// it suits sparse contents; insertion links at the head.
#[derive(Debug, Clone)]
pub(crate) struct LinkedSet {
    offset: i32,
    next: Vec<i32>,
    prev: Vec<i32>,
    present: Vec<bool>,
    first: i32,
    len: usize,
}

impl LinkedSet {
    pub(crate) fn new(offset: i32, capacity: usize) -> Self {
        LinkedSet {
            offset,
            next: vec![NONE; capacity],
            prev: vec![NONE; capacity],
            present: vec![false; capacity],
            first: NONE,
            len: 0,
        }
    }

    fn index(&self, element: i32) -> usize {
        calabash_assert_simple!(
            element >= self.offset && ((element - self.offset) as usize) < self.present.len(),
            "element {element} is outside the universe of the linked set"
        );
        (element - self.offset) as usize
    }

    pub(crate) fn contains(&self, element: i32) -> bool {
        if element < self.offset || ((element - self.offset) as usize) >= self.present.len() {
            return false;
        }
        self.present[(element - self.offset) as usize]
    }

    pub(crate) fn insert(&mut self, element: i32) -> bool {
        if self.contains(element) {
            return false;
        }
        let index = self.index(element);

        self.next[index] = self.first;
        self.prev[index] = NONE;
        if self.first != NONE {
            self.prev[self.first as usize] = index as i32;
        }
        self.first = index as i32;
        self.present[index] = true;
        self.len += 1;
        true
    }

    pub(crate) fn remove(&mut self, element: i32) -> bool {
        if !self.contains(element) {
            return false;
        }
        let index = self.index(element);
        let (prev, next) = (self.prev[index], self.next[index]);

        if prev != NONE {
            self.next[prev as usize] = next;
        } else {
            self.first = next;
        }
        if next != NONE {
            self.prev[next as usize] = prev;
        }
        self.present[index] = false;
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
        LinkedIter {
            set: self,
            current: self.first,
        }
    }
}

struct LinkedIter<'a> {
    set: &'a LinkedSet,
    current: i32,
}

impl Iterator for LinkedIter<'_> {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        if self.current == NONE {
            return None;
        }
        let element = self.set.offset + self.current;
        self.current = self.set.next[self.current as usize];
        Some(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iteration_visits_exactly_the_present_elements() {
        let mut set = LinkedSet::new(0, 50);
        for element in [12, 40, 7] {
            assert!(set.insert(element));
        }
        assert!(set.remove(40));

        let mut elements = set.iter().collect::<Vec<_>>();
        elements.sort_unstable();
        assert_eq!(elements, vec![7, 12]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn removing_the_head_relinks_the_list() {
        let mut set = LinkedSet::new(0, 10);
        let _ = set.insert(1);
        let _ = set.insert(2);

        // 2 is at the head after the second insert.
        assert!(set.remove(2));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![1]);
    }
}
