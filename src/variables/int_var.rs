use std::fmt::Debug;

use enumset::EnumSet;

use super::DomainId;
use super::VariableStore;
use crate::asserts::calabash_assert_simple;
use crate::basic_types::EmptyDomain;
use crate::basic_types::Solution;
use crate::engine::IntEvent;
use crate::engine::Watchers;

/// The interface through which propagators read and tighten integer domains.
///
/// Implemented by [`DomainId`] and by views over it; a propagator written
/// against this trait works transparently on transformed variables.
pub trait IntVar: Clone + Debug {
    fn lower_bound(&self, store: &VariableStore) -> i32;

    fn upper_bound(&self, store: &VariableStore) -> i32;

    fn contains(&self, store: &VariableStore, value: i32) -> bool;

    fn domain_size(&self, store: &VariableStore) -> u64;

    /// Tighten the lower bound to at least `bound`. Returns whether the
    /// domain changed.
    fn set_lower_bound(&self, store: &mut VariableStore, bound: i32) -> Result<bool, EmptyDomain>;

    /// Tighten the upper bound to at most `bound`. Returns whether the
    /// domain changed.
    fn set_upper_bound(&self, store: &mut VariableStore, bound: i32) -> Result<bool, EmptyDomain>;

    /// Remove a single value from the domain. Returns whether the domain
    /// changed.
    fn remove(&self, store: &mut VariableStore, value: i32) -> Result<bool, EmptyDomain>;

    /// Reduce the domain to the single value. Returns whether the domain
    /// changed.
    fn instantiate(&self, store: &mut VariableStore, value: i32) -> Result<bool, EmptyDomain>;

    fn is_fixed(&self, store: &VariableStore) -> bool {
        self.lower_bound(store) == self.upper_bound(store)
    }

    /// The single remaining value. Reading the value of an unfixed variable
    /// is a programming error.
    fn value(&self, store: &VariableStore) -> i32 {
        calabash_assert_simple!(
            self.is_fixed(store),
            "reading the value of an unfixed variable"
        );
        self.lower_bound(store)
    }

    /// Subscribe to the given events through the watchers of a propagator.
    fn watch(&self, watchers: &mut Watchers<'_>, events: EnumSet<IntEvent>);

    /// Translate an event on the underlying variable into the event observed
    /// through this variable.
    fn unpack_event(&self, event: IntEvent) -> IntEvent;

    /// The value this variable takes in a full assignment.
    fn evaluate(&self, solution: &Solution) -> i32;
}

/// Construction of views on top of a variable.
pub trait TransformableVariable<View> {
    /// The view `scale * self`.
    fn scaled(&self, scale: i32) -> View;

    /// The view `self + offset`.
    fn offset(&self, offset: i32) -> View;
}

impl IntVar for DomainId {
    fn lower_bound(&self, store: &VariableStore) -> i32 {
        store.int_lower_bound(*self)
    }

    fn upper_bound(&self, store: &VariableStore) -> i32 {
        store.int_upper_bound(*self)
    }

    fn contains(&self, store: &VariableStore, value: i32) -> bool {
        store.int_contains(*self, value)
    }

    fn domain_size(&self, store: &VariableStore) -> u64 {
        store.int_domain_size(*self)
    }

    fn set_lower_bound(&self, store: &mut VariableStore, bound: i32) -> Result<bool, EmptyDomain> {
        store.set_int_lower_bound(*self, bound)
    }

    fn set_upper_bound(&self, store: &mut VariableStore, bound: i32) -> Result<bool, EmptyDomain> {
        store.set_int_upper_bound(*self, bound)
    }

    fn remove(&self, store: &mut VariableStore, value: i32) -> Result<bool, EmptyDomain> {
        store.int_remove(*self, value)
    }

    fn instantiate(&self, store: &mut VariableStore, value: i32) -> Result<bool, EmptyDomain> {
        store.int_instantiate(*self, value)
    }

    fn watch(&self, watchers: &mut Watchers<'_>, events: EnumSet<IntEvent>) {
        watchers.watch_int(*self, events);
    }

    fn unpack_event(&self, event: IntEvent) -> IntEvent {
        event
    }

    fn evaluate(&self, solution: &Solution) -> i32 {
        solution.value_of(*self)
    }
}
