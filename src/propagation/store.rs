use super::Propagator;
use super::PropagatorId;
use crate::containers::KeyedVec;
use crate::state::Environment;
use crate::state::StoredBool;

/// Owns the posted propagators together with their trailed activity flags.
///
/// A passive propagator stays subscribed to its variables but is neither
/// notified nor run; because the flag is trailed, backtracking past the point
/// of deactivation implicitly reactivates it.
#[derive(Default)]
pub(crate) struct PropagatorStore {
    propagators: KeyedVec<PropagatorId, Box<dyn Propagator>>,
    active_flags: KeyedVec<PropagatorId, StoredBool>,
}

impl PropagatorStore {
    pub(crate) fn len(&self) -> usize {
        self.propagators.len()
    }

    pub(crate) fn push(
        &mut self,
        propagator: Box<dyn Propagator>,
        active_flag: StoredBool,
    ) -> PropagatorId {
        let id = self.propagators.push(propagator);
        let _ = self.active_flags.push(active_flag);
        id
    }

    pub(crate) fn get(&self, id: PropagatorId) -> &dyn Propagator {
        self.propagators[id].as_ref()
    }

    pub(crate) fn get_mut(&mut self, id: PropagatorId) -> &mut dyn Propagator {
        self.propagators[id].as_mut()
    }

    pub(crate) fn active_flag(&self, id: PropagatorId) -> StoredBool {
        self.active_flags[id]
    }

    pub(crate) fn is_active(&self, env: &Environment, id: PropagatorId) -> bool {
        env.bool_value(self.active_flags[id])
    }

    pub(crate) fn ids(&self) -> impl Iterator<Item = PropagatorId> + '_ {
        self.propagators.keys()
    }
}

impl std::fmt::Debug for PropagatorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropagatorStore")
            .field("num_propagators", &self.propagators.len())
            .finish()
    }
}
