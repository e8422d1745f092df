use fnv::FnvHashSet;

/// The pairs of tasks whose time windows can still intersect.
///
/// Time-table filtering for a task only needs the profile of tasks it can
/// share an instant with, so the cumulative propagator restricts its sweeps
/// to the neighbourhood stored here. Windows only shrink between backtracks,
/// which means edges only disappear; the graph is maintained by removing the
/// stale edges of tasks whose bounds changed, and rebuilt from scratch after
/// a backtrack widens the windows again.
#[derive(Debug)]
pub(super) struct OverlapGraph {
    neighbours: Vec<FnvHashSet<usize>>,
    num_edges: usize,
    edges_at_last_rebuild: usize,
    needs_rebuild: bool,
}

impl OverlapGraph {
    pub(super) fn new(num_tasks: usize) -> Self {
        OverlapGraph {
            neighbours: vec![FnvHashSet::default(); num_tasks],
            num_edges: 0,
            edges_at_last_rebuild: 0,
            needs_rebuild: true,
        }
    }

    pub(super) fn needs_rebuild(&self) -> bool {
        self.needs_rebuild
    }

    pub(super) fn invalidate(&mut self) {
        self.needs_rebuild = true;
    }

    pub(super) fn neighbours(&self, task: usize) -> impl Iterator<Item = usize> + '_ {
        self.neighbours[task].iter().copied()
    }

    /// Reconstruct all edges with a sweep over the windows sorted by start.
    /// `windows[i]` is the half-open interval in which task `i` can execute.
    pub(super) fn rebuild(&mut self, windows: &[(i32, i32)]) {
        for set in &mut self.neighbours {
            set.clear();
        }
        self.num_edges = 0;

        let mut order = (0..windows.len()).collect::<Vec<_>>();
        order.sort_unstable_by_key(|&task| windows[task].0);

        let mut active: Vec<usize> = Vec::new();
        for &task in &order {
            let (start, _) = windows[task];
            active.retain(|&other| windows[other].1 > start);
            for &other in &active {
                let _ = self.neighbours[task].insert(other);
                let _ = self.neighbours[other].insert(task);
                self.num_edges += 1;
            }
            active.push(task);
        }

        self.edges_at_last_rebuild = self.num_edges;
        self.needs_rebuild = false;
    }

    /// Remove the edges of `task` towards windows it can no longer intersect.
    /// Once the graph becomes much sparser than at the last rebuild, a full
    /// rebuild is requested to reset the baseline.
    pub(super) fn refresh_task(&mut self, task: usize, windows: &[(i32, i32)]) {
        let (start, end) = windows[task];
        let stale = self.neighbours[task]
            .iter()
            .copied()
            .filter(|&other| windows[other].1 <= start || windows[other].0 >= end)
            .collect::<Vec<_>>();

        for other in stale {
            let _ = self.neighbours[task].remove(&other);
            let _ = self.neighbours[other].remove(&task);
            self.num_edges -= 1;
        }

        if self.num_edges * 2 < self.edges_at_last_rebuild {
            self.needs_rebuild = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_sweep_connects_exactly_the_intersecting_windows() {
        let windows = [(0, 4), (2, 6), (5, 8)];
        let mut graph = OverlapGraph::new(3);
        graph.rebuild(&windows);

        assert_eq!(graph.neighbours(0).collect::<Vec<_>>(), vec![1]);
        let mut of_1 = graph.neighbours(1).collect::<Vec<_>>();
        of_1.sort_unstable();
        assert_eq!(of_1, vec![0, 2]);
        assert_eq!(graph.neighbours(2).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn touching_windows_do_not_overlap() {
        let windows = [(0, 3), (3, 6)];
        let mut graph = OverlapGraph::new(2);
        graph.rebuild(&windows);

        assert_eq!(graph.neighbours(0).count(), 0);
        assert_eq!(graph.neighbours(1).count(), 0);
    }

    #[test]
    fn refreshing_a_shrunk_window_drops_its_stale_edges() {
        let mut windows = [(0, 10), (0, 10), (8, 12)];
        let mut graph = OverlapGraph::new(3);
        graph.rebuild(&windows);
        assert_eq!(graph.neighbours(0).count(), 2);

        windows[0] = (0, 5);
        graph.refresh_task(0, &windows);

        assert_eq!(graph.neighbours(0).collect::<Vec<_>>(), vec![1]);
        assert!(!graph.neighbours(2).any(|other| other == 0));
    }

    #[test]
    fn heavy_edge_loss_requests_a_rebuild() {
        let mut windows = [(0, 10), (0, 10), (0, 10), (0, 10)];
        let mut graph = OverlapGraph::new(4);
        graph.rebuild(&windows);
        assert!(!graph.needs_rebuild());

        windows[0] = (0, 1);
        windows[1] = (2, 3);
        windows[2] = (4, 5);
        windows[3] = (6, 7);
        for task in 0..4 {
            graph.refresh_task(task, &windows);
        }

        assert!(graph.needs_rebuild());
    }
}
