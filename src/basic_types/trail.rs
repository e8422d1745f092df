use crate::asserts::calabash_assert_simple;

/// The number of entries per trail segment. Growth allocates a fresh segment
/// rather than reallocating the whole history.
const CHUNK_SIZE: usize = 4096;

/// An append-only undo log partitioned into worlds.
///
/// Entries belong to the world that was active when they were pushed. Popping
/// a world hands its entries back in reverse chronological order so that the
/// caller can replay them as undo actions. Storage is chunked: pushing never
/// copies previously recorded entries.
#[derive(Debug, Clone)]
pub(crate) struct Trail<T> {
    chunks: Vec<Vec<T>>,
    len: usize,
    /// At index `i` is the trail length at which world `i + 1` was opened.
    world_delimiter: Vec<usize>,
}

impl<T> Default for Trail<T> {
    fn default() -> Self {
        Trail {
            chunks: Vec::default(),
            len: 0,
            world_delimiter: Vec::default(),
        }
    }
}

impl<T> Trail<T> {
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// The index of the currently active world. The root world is 0.
    pub(crate) fn current_world(&self) -> usize {
        self.world_delimiter.len()
    }

    /// Open a new world on top of the current one.
    pub(crate) fn push_world(&mut self) {
        self.world_delimiter.push(self.len);
    }

    pub(crate) fn push(&mut self, elem: T) {
        if self
            .chunks
            .last()
            .is_none_or(|chunk| chunk.len() == CHUNK_SIZE)
        {
            self.chunks.push(Vec::with_capacity(CHUNK_SIZE));
        }

        self.chunks
            .last_mut()
            .expect("a chunk is available after the capacity check")
            .push(elem);
        self.len += 1;
    }

    /// Remove the topmost world, handing every entry it logged to `undo` in
    /// reverse chronological order.
    ///
    /// Popping the root world is a programming error.
    pub(crate) fn pop_world(&mut self, mut undo: impl FnMut(T)) {
        calabash_assert_simple!(
            !self.world_delimiter.is_empty(),
            "cannot pop the root world"
        );

        let new_len = self.world_delimiter.pop().expect("checked to be non-empty");

        while self.len > new_len {
            undo(self.pop().expect("trail is non-empty above the delimiter"));
        }
    }

    /// Merge the topmost world irrevocably into its parent. The logged entries
    /// are kept; they now belong to the parent world.
    ///
    /// Committing the root world is a programming error.
    pub(crate) fn commit_world(&mut self) {
        calabash_assert_simple!(
            !self.world_delimiter.is_empty(),
            "cannot commit the root world"
        );

        let _ = self.world_delimiter.pop();
    }

    fn pop(&mut self) -> Option<T> {
        let elem = self.chunks.last_mut()?.pop()?;
        self.len -= 1;

        if self.chunks.last().is_some_and(|chunk| chunk.is_empty()) {
            let _ = self.chunks.pop();
        }

        Some(elem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popping_a_world_hands_back_entries_in_reverse_order() {
        let mut trail = Trail::default();
        trail.push(1);

        trail.push_world();
        trail.push(2);
        trail.push(3);

        let mut popped = Vec::new();
        trail.pop_world(|elem| popped.push(elem));

        assert_eq!(popped, vec![3, 2]);
        assert_eq!(trail.len(), 1);
        assert_eq!(trail.current_world(), 0);
    }

    #[test]
    fn an_empty_world_pops_no_entries() {
        let mut trail: Trail<i32> = Trail::default();
        trail.push_world();

        trail.pop_world(|_| panic!("no entries were logged"));
        assert_eq!(trail.current_world(), 0);
    }

    #[test]
    fn committing_merges_entries_into_the_parent() {
        let mut trail = Trail::default();

        trail.push_world();
        trail.push(1);
        trail.push_world();
        trail.push(2);

        trail.commit_world();
        assert_eq!(trail.current_world(), 1);

        let mut popped = Vec::new();
        trail.pop_world(|elem| popped.push(elem));

        assert_eq!(popped, vec![2, 1]);
        assert_eq!(trail.len(), 0);
    }

    #[test]
    fn growth_spans_multiple_chunks() {
        let mut trail = Trail::default();
        trail.push_world();

        for i in 0..(CHUNK_SIZE * 2 + 17) {
            trail.push(i);
        }
        assert_eq!(trail.len(), CHUNK_SIZE * 2 + 17);

        let mut count = 0;
        trail.pop_world(|_| count += 1);
        assert_eq!(count, CHUNK_SIZE * 2 + 17);
        assert_eq!(trail.len(), 0);
    }

    #[test]
    #[should_panic(expected = "cannot pop the root world")]
    fn popping_the_root_world_is_fatal() {
        let mut trail: Trail<i32> = Trail::default();
        trail.pop_world(|_| {});
    }
}
