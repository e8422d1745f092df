//! The event-driven propagation engine: domain events, watch lists, the
//! priority-ordered propagator queue, and the fixpoint loop.

mod domain_events;
mod event_sink;
mod propagation_engine;
mod propagator_queue;
mod solver_statistics;
mod watch_lists;

pub use domain_events::GraphEvent;
pub use domain_events::IntEvent;
pub use domain_events::SetEvent;
pub use domain_events::VariableEvent;
pub(crate) use event_sink::EventRecord;
pub(crate) use event_sink::EventSink;
pub(crate) use propagation_engine::PropagationEngine;
pub(crate) use propagator_queue::PropagatorQueue;
pub use solver_statistics::SolverStatistics;
pub(crate) use watch_lists::PropagatorVarId;
pub(crate) use watch_lists::WatchLists;
pub use watch_lists::Watchers;
