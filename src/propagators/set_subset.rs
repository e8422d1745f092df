use crate::basic_types::PropagationStatus;
use crate::engine::SetEvent;
use crate::propagation::Entailment;
use crate::propagation::LocalId;
use crate::propagation::PropagationContext;
use crate::propagation::PropagationContextMut;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorConstructorContext;
use crate::propagation::Priority;
use crate::variables::DeltaMonitor;
use crate::variables::SetVarId;

#[derive(Clone, Debug)]
pub(crate) struct SetSubsetConstructor {
    pub(crate) subset: SetVarId,
    pub(crate) superset: SetVarId,
}

/// Propagator for `subset ⊆ superset`: kernel members of the subset become
/// mandatory in the superset, and elements impossible in the superset become
/// impossible in the subset.
///
/// Between backtracks the propagator reads only the delta journals of its two
/// variables; after a backtrack the monitors report stale and it falls back
/// to one full scan.
#[derive(Debug)]
pub(crate) struct SetSubsetPropagator {
    subset: SetVarId,
    superset: SetVarId,
    subset_monitor: DeltaMonitor,
    superset_monitor: DeltaMonitor,
}

impl PropagatorConstructor for SetSubsetConstructor {
    type PropagatorImpl = SetSubsetPropagator;

    fn create(self, mut context: PropagatorConstructorContext<'_>) -> Self::PropagatorImpl {
        let _ = context.register_set(self.subset, SetEvent::KernelAdd.into(), LocalId::from(0));
        let _ = context.register_set(
            self.superset,
            SetEvent::EnvelopeRemove.into(),
            LocalId::from(1),
        );

        let subset_monitor = context.monitor_set(self.subset);
        let superset_monitor = context.monitor_set(self.superset);

        SetSubsetPropagator {
            subset: self.subset,
            superset: self.superset,
            subset_monitor,
            superset_monitor,
        }
    }
}

impl Propagator for SetSubsetPropagator {
    fn name(&self) -> &str {
        "SetSubset"
    }

    fn priority(&self) -> Priority {
        Priority::Binary
    }

    fn propagate(&mut self, mut context: PropagationContextMut<'_>) -> PropagationStatus {
        let subset_changes = context
            .advance_monitor(&mut self.subset_monitor)
            .map(<[_]>::to_vec);
        match subset_changes {
            Some(changes) => {
                for (element, event) in changes {
                    if event == SetEvent::KernelAdd {
                        let _ = context.enforce(self.superset, element)?;
                    }
                }
            }
            None => {
                let kernel = context.kernel_iter(self.subset).collect::<Vec<_>>();
                for element in kernel {
                    let _ = context.enforce(self.superset, element)?;
                }
            }
        }

        let superset_changes = context
            .advance_monitor(&mut self.superset_monitor)
            .map(<[_]>::to_vec);
        match superset_changes {
            Some(changes) => {
                for (element, event) in changes {
                    if event == SetEvent::EnvelopeRemove {
                        let _ = context.exclude(self.subset, element)?;
                    }
                }
            }
            None => {
                let envelope = context.envelope_iter(self.subset).collect::<Vec<_>>();
                for element in envelope {
                    if !context.envelope_contains(self.superset, element) {
                        let _ = context.exclude(self.subset, element)?;
                    }
                }
            }
        }

        // Every remaining candidate of the subset is already mandatory in
        // the superset; no event can make this propagator filter again in
        // this subtree.
        let entailed = context
            .envelope_iter(self.subset)
            .all(|element| context.kernel_contains(self.superset, element));
        if entailed {
            context.set_passive();
        }

        Ok(())
    }

    fn is_entailed(&self, context: PropagationContext<'_>) -> Entailment {
        if context
            .kernel_iter(self.subset)
            .any(|element| !context.envelope_contains(self.superset, element))
        {
            return Entailment::False;
        }
        if context
            .envelope_iter(self.subset)
            .all(|element| context.kernel_contains(self.superset, element))
        {
            return Entailment::True;
        }
        Entailment::Undefined
    }

    fn synchronise(&mut self, _context: PropagationContext<'_>) {
        self.subset_monitor.invalidate();
        self.superset_monitor.invalidate();
    }
}
