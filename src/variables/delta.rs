use super::SetVarId;
use crate::engine::SetEvent;

/// The journal of membership changes of one set variable within the current
/// propagation pass.
///
/// Entries are only valid for the tick at which they were recorded; the first
/// record after a backtrack clears the journal and bumps the stamp, which
/// invalidates every outstanding [`DeltaMonitor`].
#[derive(Debug, Default)]
pub(crate) struct SetDelta {
    entries: Vec<(i32, SetEvent)>,
    stamp: u64,
    tick: u64,
}

impl SetDelta {
    pub(crate) fn record(&mut self, tick: u64, element: i32, event: SetEvent) {
        if tick != self.tick {
            self.entries.clear();
            self.stamp += 1;
            self.tick = tick;
        }
        self.entries.push((element, event));
    }
}

/// A propagator-held cursor into the delta of one set variable.
///
/// [`DeltaMonitor::advance`] yields the entries recorded since the previous
/// call, or `None` when the journal was rewritten underneath the monitor (or
/// the monitor was never synchronised), in which case the caller must fall
/// back to a full scan of the variable. Either way the cursor is moved to the
/// end of the journal.
#[derive(Debug)]
pub struct DeltaMonitor {
    variable: SetVarId,
    stamp: u64,
    frontier: usize,
    valid: bool,
}

impl DeltaMonitor {
    pub(crate) fn new(variable: SetVarId) -> Self {
        DeltaMonitor {
            variable,
            stamp: 0,
            frontier: 0,
            valid: false,
        }
    }

    pub(crate) fn variable(&self) -> SetVarId {
        self.variable
    }

    /// Force the next [`DeltaMonitor::advance`] to report a full scan.
    pub(crate) fn invalidate(&mut self) {
        self.valid = false;
    }

    pub(crate) fn advance<'delta>(
        &mut self,
        delta: &'delta SetDelta,
    ) -> Option<&'delta [(i32, SetEvent)]> {
        let fresh = self.valid && self.stamp == delta.stamp;

        let result = if fresh {
            Some(&delta.entries[self.frontier..])
        } else {
            None
        };
        self.stamp = delta.stamp;
        self.frontier = delta.entries.len();
        self.valid = true;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::containers::StorageKey;

    #[test]
    fn a_monitor_sees_only_the_entries_recorded_since_its_last_visit() {
        let variable = SetVarId::create_from_index(0);
        let mut delta = SetDelta::default();
        let mut monitor = DeltaMonitor::new(variable);

        delta.record(0, 1, SetEvent::KernelAdd);
        assert!(monitor.advance(&delta).is_none());

        delta.record(0, 2, SetEvent::KernelAdd);
        delta.record(0, 3, SetEvent::EnvelopeRemove);
        let entries = monitor.advance(&delta).expect("the journal is fresh");
        assert_eq!(
            entries,
            &[(2, SetEvent::KernelAdd), (3, SetEvent::EnvelopeRemove)]
        );

        assert_eq!(monitor.advance(&delta), Some(&[][..]));
    }

    #[test]
    fn recording_at_a_new_tick_invalidates_outstanding_monitors() {
        let variable = SetVarId::create_from_index(0);
        let mut delta = SetDelta::default();
        let mut monitor = DeltaMonitor::new(variable);

        delta.record(0, 1, SetEvent::KernelAdd);
        let _ = monitor.advance(&delta);

        // A backtrack happened between the two records.
        delta.record(1, 7, SetEvent::EnvelopeRemove);
        assert!(monitor.advance(&delta).is_none());

        delta.record(1, 8, SetEvent::EnvelopeRemove);
        let entries = monitor.advance(&delta).expect("resynchronised");
        assert_eq!(entries, &[(8, SetEvent::EnvelopeRemove)]);
    }
}
