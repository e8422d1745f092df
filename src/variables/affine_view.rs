use std::cmp::Ordering;

use enumset::EnumSet;

use super::DomainId;
use super::IntVar;
use super::TransformableVariable;
use super::VariableStore;
use crate::basic_types::EmptyDomain;
use crate::basic_types::Solution;
use crate::engine::IntEvent;
use crate::engine::Watchers;
use crate::math::NumExt;

/// Models `y = ax + b` by expressing the domain of `y` as a transformation of
/// the domain of `x`.
#[derive(Clone, Copy, Hash, Eq, PartialEq)]
pub struct AffineView<Inner> {
    inner: Inner,
    scale: i32,
    offset: i32,
}

enum Rounding {
    Up,
    Down,
}

impl<Inner> AffineView<Inner> {
    pub fn new(inner: Inner, scale: i32, offset: i32) -> Self {
        assert_ne!(scale, 0, "multiplication by zero is not invertible");
        AffineView {
            inner,
            scale,
            offset,
        }
    }

    /// Go from a value in the domain of `self` to a value in the domain of
    /// `self.inner`.
    fn invert(&self, value: i32, rounding: Rounding) -> i32 {
        let translated = value - self.offset;

        match rounding {
            Rounding::Up => <i32 as NumExt>::div_ceil(translated, self.scale),
            Rounding::Down => <i32 as NumExt>::div_floor(translated, self.scale),
        }
    }

    fn map(&self, value: i32) -> i32 {
        self.scale * value + self.offset
    }
}

impl<Inner: IntVar> IntVar for AffineView<Inner> {
    fn lower_bound(&self, store: &VariableStore) -> i32 {
        if self.scale < 0 {
            self.map(self.inner.upper_bound(store))
        } else {
            self.map(self.inner.lower_bound(store))
        }
    }

    fn upper_bound(&self, store: &VariableStore) -> i32 {
        if self.scale < 0 {
            self.map(self.inner.lower_bound(store))
        } else {
            self.map(self.inner.upper_bound(store))
        }
    }

    fn contains(&self, store: &VariableStore, value: i32) -> bool {
        if (value - self.offset) % self.scale == 0 {
            self.inner.contains(store, self.invert(value, Rounding::Up))
        } else {
            false
        }
    }

    fn domain_size(&self, store: &VariableStore) -> u64 {
        self.inner.domain_size(store)
    }

    fn set_lower_bound(&self, store: &mut VariableStore, bound: i32) -> Result<bool, EmptyDomain> {
        if self.scale < 0 {
            self.inner
                .set_upper_bound(store, self.invert(bound, Rounding::Down))
        } else {
            self.inner
                .set_lower_bound(store, self.invert(bound, Rounding::Up))
        }
    }

    fn set_upper_bound(&self, store: &mut VariableStore, bound: i32) -> Result<bool, EmptyDomain> {
        if self.scale < 0 {
            self.inner
                .set_lower_bound(store, self.invert(bound, Rounding::Up))
        } else {
            self.inner
                .set_upper_bound(store, self.invert(bound, Rounding::Down))
        }
    }

    fn remove(&self, store: &mut VariableStore, value: i32) -> Result<bool, EmptyDomain> {
        if (value - self.offset) % self.scale == 0 {
            self.inner.remove(store, self.invert(value, Rounding::Up))
        } else {
            Ok(false)
        }
    }

    fn instantiate(&self, store: &mut VariableStore, value: i32) -> Result<bool, EmptyDomain> {
        // A value the view cannot take empties the inner domain through the
        // crossed bound updates.
        let raised = self.set_lower_bound(store, value)?;
        let lowered = self.set_upper_bound(store, value)?;
        Ok(raised || lowered)
    }

    fn watch(&self, watchers: &mut Watchers<'_>, mut events: EnumSet<IntEvent>) {
        let bounds = IntEvent::LowerBound | IntEvent::UpperBound;
        if events.intersection(bounds).len() == 1 && self.scale.is_negative() {
            events = events.symmetrical_difference(bounds);
        }
        self.inner.watch(watchers, events);
    }

    fn unpack_event(&self, event: IntEvent) -> IntEvent {
        if self.scale.is_negative() {
            match self.inner.unpack_event(event) {
                IntEvent::LowerBound => IntEvent::UpperBound,
                IntEvent::UpperBound => IntEvent::LowerBound,
                event => event,
            }
        } else {
            self.inner.unpack_event(event)
        }
    }

    fn evaluate(&self, solution: &Solution) -> i32 {
        self.map(self.inner.evaluate(solution))
    }
}

impl TransformableVariable<AffineView<DomainId>> for DomainId {
    fn scaled(&self, scale: i32) -> AffineView<DomainId> {
        AffineView::new(*self, scale, 0)
    }

    fn offset(&self, offset: i32) -> AffineView<DomainId> {
        AffineView::new(*self, 1, offset)
    }
}

impl<Inner: IntVar> TransformableVariable<AffineView<Inner>> for AffineView<Inner> {
    fn scaled(&self, scale: i32) -> AffineView<Inner> {
        let mut result = self.clone();
        result.scale *= scale;
        result.offset *= scale;
        result
    }

    fn offset(&self, offset: i32) -> AffineView<Inner> {
        let mut result = self.clone();
        result.offset += offset;
        result
    }
}

impl From<DomainId> for AffineView<DomainId> {
    fn from(inner: DomainId) -> Self {
        AffineView::new(inner, 1, 0)
    }
}

impl<Inner: std::fmt::Debug> std::fmt::Debug for AffineView<Inner> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.scale == -1 {
            write!(f, "-")?;
        } else if self.scale != 1 {
            write!(f, "{} * ", self.scale)?;
        }

        write!(f, "({:?})", self.inner)?;

        match self.offset.cmp(&0) {
            Ordering::Less => write!(f, " - {}", -self.offset)?,
            Ordering::Equal => {}
            Ordering::Greater => write!(f, " + {}", self.offset)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::containers::StorageKey;

    #[test]
    fn scaling_composes_with_an_existing_view() {
        let view = AffineView::new(DomainId::create_from_index(0), 3, 4);
        let scaled = view.scaled(6);
        assert_eq!(scaled.scale, 18);
        assert_eq!(scaled.offset, 24);

        let offset = view.offset(6);
        assert_eq!(offset.scale, 3);
        assert_eq!(offset.offset, 10);
    }

    #[test]
    fn a_negative_scale_swaps_the_bounds() {
        let mut store = VariableStore::new();
        let x = store.new_bounded_integer(2, 5);
        let view = x.scaled(-1);

        assert_eq!(view.lower_bound(&store), -5);
        assert_eq!(view.upper_bound(&store), -2);

        // -x >= -4 is x <= 4.
        assert!(view.set_lower_bound(&mut store, -4).unwrap());
        assert_eq!(x.upper_bound(&store), 4);
    }

    #[test]
    fn bound_updates_round_into_the_inner_domain() {
        let mut store = VariableStore::new();
        let x = store.new_bounded_integer(-10, 10);
        let view = x.scaled(2);

        // 2x >= 3 tightens to x >= 2.
        assert!(view.set_lower_bound(&mut store, 3).unwrap());
        assert_eq!(x.lower_bound(&store), 2);

        // 2x <= 7 tightens to x <= 3.
        assert!(view.set_upper_bound(&mut store, 7).unwrap());
        assert_eq!(x.upper_bound(&store), 3);

        assert!(!view.contains(&store, 5));
        assert!(view.contains(&store, 6));
    }

    #[test]
    fn instantiating_an_unreachable_value_fails() {
        let mut store = VariableStore::new();
        let x = store.new_bounded_integer(0, 10);
        let view = x.scaled(2).offset(1);

        assert!(view.instantiate(&mut store, 4).is_err());
    }

    #[test]
    fn evaluation_maps_the_inner_value() {
        let mut store = VariableStore::new();
        let x = store.new_bounded_integer(3, 3);
        let view = x.scaled(-2).offset(1);

        let solution = store.snapshot();
        assert_eq!(view.evaluate(&solution), -5);
    }
}
