use rand::rngs::SmallRng;

use crate::variables::IntVar;
use crate::variables::VariableStore;

/// The domain view handed to selectors, together with the solver's random
/// generator so randomised heuristics are reproducible from the seed.
pub struct SelectionContext<'a> {
    store: &'a VariableStore,
    random: &'a mut SmallRng,
}

impl<'a> SelectionContext<'a> {
    pub(crate) fn new(store: &'a VariableStore, random: &'a mut SmallRng) -> Self {
        SelectionContext { store, random }
    }

    pub fn lower_bound<Var: IntVar>(&self, var: &Var) -> i32 {
        var.lower_bound(self.store)
    }

    pub fn upper_bound<Var: IntVar>(&self, var: &Var) -> i32 {
        var.upper_bound(self.store)
    }

    pub fn contains<Var: IntVar>(&self, var: &Var, value: i32) -> bool {
        var.contains(self.store, value)
    }

    pub fn is_fixed<Var: IntVar>(&self, var: &Var) -> bool {
        var.is_fixed(self.store)
    }

    pub fn domain_size<Var: IntVar>(&self, var: &Var) -> u64 {
        var.domain_size(self.store)
    }

    pub fn random(&mut self) -> &mut SmallRng {
        self.random
    }
}
