//! The propagator contract and the infrastructure to host propagators:
//! identifiers, contexts, and the propagator store.

mod constructor;
mod contexts;
mod local_id;
mod propagator;
mod propagator_id;
mod store;

pub use constructor::PropagatorConstructor;
pub use constructor::PropagatorConstructorContext;
pub use contexts::PropagationContext;
pub use contexts::PropagationContextMut;
pub use local_id::LocalId;
pub use propagator::EnqueueDecision;
pub use propagator::Entailment;
pub use propagator::Priority;
pub use propagator::Propagator;
pub use propagator_id::PropagatorId;
pub(crate) use store::PropagatorStore;
