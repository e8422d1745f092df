use enumset::EnumSetType;

/// A change to the domain of an integer variable.
///
/// Stronger events imply weaker ones: an operation that fixes a variable by
/// raising its lower bound emits both [`IntEvent::LowerBound`] and
/// [`IntEvent::Assign`] (and [`IntEvent::Removal`], since values were removed
/// from the domain).
#[derive(EnumSetType, Debug, Hash)]
pub enum IntEvent {
    /// The lower bound was raised.
    LowerBound,
    /// The upper bound was lowered.
    UpperBound,
    /// A value was removed from the domain.
    Removal,
    /// The domain was reduced to a single value.
    Assign,
}

/// A change to the domain of a set variable. The kernel only grows and the
/// envelope only shrinks, so two event kinds cover every transition.
#[derive(EnumSetType, Debug, Hash)]
pub enum SetEvent {
    /// An element became mandatory.
    KernelAdd,
    /// An element became impossible.
    EnvelopeRemove,
}

/// A change to the domain of a graph variable.
#[derive(EnumSetType, Debug, Hash)]
pub enum GraphEvent {
    NodeEnforced,
    NodeExcluded,
    EdgeEnforced,
    EdgeExcluded,
}

/// The kind-erased event passed to [`Propagator::notify`].
///
/// [`Propagator::notify`]: crate::propagation::Propagator::notify
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableEvent {
    Int(IntEvent),
    Set(SetEvent),
    Graph(GraphEvent),
}
