//! Time-table filtering for the cumulative resource constraint, restricted
//! per task to the tasks it can still overlap with in time.

mod overlap_graph;

use overlap_graph::OverlapGraph;

use crate::asserts::calabash_assert_eq_simple;
use crate::asserts::calabash_assert_simple;
use crate::basic_types::PropagationStatus;
use crate::engine::IntEvent;
use crate::engine::VariableEvent;
use crate::propagation::Entailment;
use crate::propagation::EnqueueDecision;
use crate::propagation::LocalId;
use crate::propagation::PropagationContext;
use crate::propagation::PropagationContextMut;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorConstructorContext;
use crate::propagation::Priority;
use crate::variables::IntVar;

#[derive(Clone, Debug)]
pub(crate) struct CumulativeConstructor<Var> {
    start_times: Box<[Var]>,
    durations: Box<[i32]>,
    resource_requirements: Box<[i32]>,
    capacity: i32,
}

impl<Var: IntVar> CumulativeConstructor<Var> {
    pub(crate) fn new(
        start_times: Box<[Var]>,
        durations: Box<[i32]>,
        resource_requirements: Box<[i32]>,
        capacity: i32,
    ) -> Self {
        calabash_assert_eq_simple!(start_times.len(), durations.len());
        calabash_assert_eq_simple!(start_times.len(), resource_requirements.len());
        calabash_assert_simple!(durations.iter().all(|&duration| duration >= 0));
        calabash_assert_simple!(resource_requirements.iter().all(|&usage| usage >= 0));
        calabash_assert_simple!(capacity >= 0);

        CumulativeConstructor {
            start_times,
            durations,
            resource_requirements,
            capacity,
        }
    }
}

#[derive(Debug)]
struct Task<Var> {
    start: Var,
    duration: i32,
    resource_usage: i32,
}

/// Propagator enforcing that the tasks' resource usages never exceed the
/// capacity at any instant.
///
/// Filtering is classic time-table sweeping over compulsory parts, but the
/// profile a task is swept against is built only from the tasks it shares an
/// [`OverlapGraph`] edge with. Bound changes mark the affected task dirty;
/// before filtering, the dirty tasks shed their stale edges, and the graph is
/// rebuilt wholesale after a backtrack.
#[derive(Debug)]
pub(crate) struct CumulativePropagator<Var> {
    tasks: Box<[Task<Var>]>,
    capacity: i32,
    overlaps: OverlapGraph,
    dirty: Box<[bool]>,
}

impl<Var> PropagatorConstructor for CumulativeConstructor<Var>
where
    Var: IntVar + 'static,
{
    type PropagatorImpl = CumulativePropagator<Var>;

    fn create(self, mut context: PropagatorConstructorContext<'_>) -> Self::PropagatorImpl {
        let num_tasks = self.start_times.len();
        let tasks = self
            .start_times
            .iter()
            .zip(self.durations.iter())
            .zip(self.resource_requirements.iter())
            .enumerate()
            .map(|(index, ((start, &duration), &resource_usage))| Task {
                start: context.register(
                    start.clone(),
                    IntEvent::LowerBound | IntEvent::UpperBound,
                    LocalId::from(index as u32),
                ),
                duration,
                resource_usage,
            })
            .collect();

        CumulativePropagator {
            tasks,
            capacity: self.capacity,
            overlaps: OverlapGraph::new(num_tasks),
            dirty: vec![false; num_tasks].into_boxed_slice(),
        }
    }
}

impl<Var: IntVar> CumulativePropagator<Var> {
    /// The half-open window `[est, lct)` in which each task can run.
    fn windows(&self, context: PropagationContext<'_>) -> Vec<(i32, i32)> {
        self.tasks
            .iter()
            .map(|task| {
                (
                    context.lower_bound(&task.start),
                    context.upper_bound(&task.start) + task.duration,
                )
            })
            .collect()
    }

    /// The interval `[lst, ect)` a task certainly occupies, if non-empty.
    fn compulsory_part(
        &self,
        context: PropagationContext<'_>,
        task: usize,
    ) -> Option<(i32, i32, i32)> {
        let Task {
            start,
            duration,
            resource_usage,
        } = &self.tasks[task];
        if *duration == 0 || *resource_usage == 0 {
            return None;
        }

        let latest_start = context.upper_bound(start);
        let earliest_completion = context.lower_bound(start) + duration;
        (latest_start < earliest_completion)
            .then_some((latest_start, earliest_completion, *resource_usage))
    }
}

/// Merge compulsory parts into maximal intervals of constant height, sorted
/// by start. Zero-height stretches are omitted.
fn build_profile(parts: &[(i32, i32, i32)]) -> Vec<(i32, i32, i32)> {
    let mut changes = Vec::with_capacity(parts.len() * 2);
    for &(start, end, usage) in parts {
        changes.push((start, usage));
        changes.push((end, -usage));
    }
    changes.sort_unstable();

    let mut profile = Vec::new();
    let mut height = 0;
    let mut previous = None;
    for (time, delta) in changes {
        if let Some(start) = previous {
            if start < time && height > 0 {
                profile.push((start, time, height));
            }
        }
        height += delta;
        previous = Some(time);
    }
    profile
}

impl<Var> Propagator for CumulativePropagator<Var>
where
    Var: IntVar + 'static,
{
    fn name(&self) -> &str {
        "Cumulative"
    }

    fn priority(&self) -> Priority {
        Priority::Quadratic
    }

    fn notify(
        &mut self,
        _context: PropagationContext<'_>,
        local_id: LocalId,
        _event: VariableEvent,
    ) -> EnqueueDecision {
        self.dirty[local_id.unpack() as usize] = true;
        EnqueueDecision::Enqueue
    }

    fn synchronise(&mut self, _context: PropagationContext<'_>) {
        // Backtracking widens windows, which can only add edges; incremental
        // maintenance handles removals only.
        self.overlaps.invalidate();
        self.dirty.fill(false);
    }

    fn propagate(&mut self, mut context: PropagationContextMut<'_>) -> PropagationStatus {
        let windows = self.windows(context.as_readonly());
        if self.overlaps.needs_rebuild() {
            self.overlaps.rebuild(&windows);
            self.dirty.fill(false);
        } else {
            for task in 0..self.tasks.len() {
                if self.dirty[task] {
                    self.overlaps.refresh_task(task, &windows);
                    self.dirty[task] = false;
                }
            }
        }

        for task in 0..self.tasks.len() {
            let Task {
                duration,
                resource_usage,
                ..
            } = self.tasks[task];
            if duration == 0 || resource_usage == 0 {
                continue;
            }

            let parts = self
                .overlaps
                .neighbours(task)
                .filter_map(|other| self.compulsory_part(context.as_readonly(), other))
                .collect::<Vec<_>>();
            let profile = build_profile(&parts);

            // Sweep forwards over the profile, pushing the earliest start
            // past every stretch the task does not fit on.
            let mut earliest_start = context.lower_bound(&self.tasks[task].start);
            for &(start, end, height) in &profile {
                if height + resource_usage > self.capacity
                    && start < earliest_start + duration
                    && end > earliest_start
                {
                    earliest_start = end;
                }
            }
            let _ = context.set_lower_bound(&self.tasks[task].start, earliest_start)?;

            // And backwards for the latest start.
            let mut latest_start = context.upper_bound(&self.tasks[task].start);
            for &(start, end, height) in profile.iter().rev() {
                if height + resource_usage > self.capacity
                    && start < latest_start + duration
                    && end > latest_start
                {
                    latest_start = start - duration;
                }
            }
            let _ = context.set_upper_bound(&self.tasks[task].start, latest_start)?;
        }

        Ok(())
    }

    fn is_entailed(&self, context: PropagationContext<'_>) -> Entailment {
        let parts = (0..self.tasks.len())
            .filter_map(|task| self.compulsory_part(context, task))
            .collect::<Vec<_>>();
        if build_profile(&parts)
            .iter()
            .any(|&(_, _, height)| height > self.capacity)
        {
            return Entailment::False;
        }

        if self.tasks.iter().all(|task| context.is_fixed(&task.start)) {
            // The compulsory parts are the exact schedule and fit.
            return Entailment::True;
        }

        let total_usage = self
            .tasks
            .iter()
            .map(|task| i64::from(task.resource_usage))
            .sum::<i64>();
        if total_usage <= i64::from(self.capacity) {
            return Entailment::True;
        }

        Entailment::Undefined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::propagators::test_helper::TestSolver;

    #[test]
    fn the_profile_merges_overlapping_parts() {
        let parts = [(0, 4, 1), (2, 6, 2)];
        let profile = build_profile(&parts);
        assert_eq!(profile, vec![(0, 2, 1), (2, 4, 3), (4, 6, 2)]);
    }

    #[test]
    fn a_compulsory_part_pulls_back_a_latest_start() {
        let mut solver = TestSolver::default();
        // Task 0 certainly runs in [6, 9) and saturates the resource.
        let fixed = solver.new_variable(6, 6);
        let pulled = solver.new_variable(0, 7);

        let _ = solver
            .new_propagator(CumulativeConstructor::new(
                [fixed, pulled].into(),
                [3, 2].into(),
                [2, 1].into(),
                2,
            ))
            .expect("consistent");

        // Starting at 5, 6, or 7 would overlap instant 6.
        solver.assert_bounds(fixed, 6, 6);
        solver.assert_bounds(pulled, 0, 4);
    }

    #[test]
    fn a_trapped_task_is_pushed_past_the_profile() {
        let mut solver = TestSolver::default();
        let fixed = solver.new_variable(2, 2);
        let pushed = solver.new_variable(1, 10);

        let _ = solver
            .new_propagator(CumulativeConstructor::new(
                [fixed, pushed].into(),
                [3, 2].into(),
                [2, 1].into(),
                2,
            ))
            .expect("consistent");

        // Starting in [1, 4] overlaps the compulsory part [2, 5).
        solver.assert_bounds(pushed, 5, 10);
    }

    #[test]
    fn three_unit_tasks_at_one_instant_overload_capacity_two() {
        let mut solver = TestSolver::default();
        let starts = [
            solver.new_variable(3, 3),
            solver.new_variable(3, 3),
            solver.new_variable(3, 3),
        ];

        let result = solver.new_propagator(CumulativeConstructor::new(
            starts.into(),
            [1, 1, 1].into(),
            [1, 1, 1].into(),
            2,
        ));
        assert!(result.is_err());
    }

    #[test]
    fn an_overloaded_mandatory_profile_is_falsified() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(0, 0);
        let b = solver.new_variable(0, 0);
        let free = solver.new_variable(0, 100);

        let propagator = solver.engine.post(CumulativeConstructor::new(
            [a, b, free].into(),
            [5, 5, 1].into(),
            [1, 1, 1].into(),
            1,
        ));

        // Without running propagation the overload is already visible from
        // the compulsory parts of the two fixed tasks.
        assert_eq!(solver.is_entailed(propagator), Entailment::False);
    }

    #[test]
    fn disjoint_windows_do_not_interact() {
        let mut solver = TestSolver::default();
        let early = solver.new_variable(0, 1);
        let late = solver.new_variable(20, 30);

        let _ = solver
            .new_propagator(CumulativeConstructor::new(
                [early, late].into(),
                [5, 5].into(),
                [3, 3].into(),
                3,
            ))
            .expect("consistent");

        solver.assert_bounds(early, 0, 1);
        solver.assert_bounds(late, 20, 30);
    }

    #[test]
    fn filtering_recovers_after_a_backtrack() {
        let mut solver = TestSolver::default();
        let blocker = solver.new_variable(0, 10);
        let other = solver.new_variable(0, 10);

        let _ = solver
            .new_propagator(CumulativeConstructor::new(
                [blocker, other].into(),
                [4, 4].into(),
                [1, 1].into(),
                1,
            ))
            .expect("consistent");

        solver.engine.world_push();
        let _ = blocker
            .instantiate(&mut solver.engine.store, 0)
            .expect("in domain");
        solver.propagate().expect("consistent");
        // The compulsory part [0, 4) forbids starts before 4.
        solver.assert_bounds(other, 4, 10);

        solver.engine.world_pop();
        solver.assert_bounds(other, 0, 10);

        // The overlap graph was rebuilt; pinning the other task now pushes
        // the first one instead.
        let _ = other
            .instantiate(&mut solver.engine.store, 2)
            .expect("in domain");
        solver.propagate().expect("consistent");
        solver.assert_bounds(blocker, 6, 10);
    }
}
