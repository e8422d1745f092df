use std::borrow::Cow;
use std::fmt::Display;
use std::fmt::Formatter;

use crate::variables::VariableRef;

/// The result of invoking a propagator. The propagation can either succeed or
/// identify a contradiction; the latter is unwound to the search loop and
/// converted into a backtrack. It never escapes the solver.
pub type PropagationStatus = Result<(), Contradiction>;

/// The signal that a domain became empty or an assignment is infeasible.
///
/// A contradiction is expected control flow, not an error: the search loop
/// catches it and backtracks. It carries the offending variable when one can
/// be identified, and a human-readable reason for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contradiction {
    /// The variable whose domain emptied or conflicted, if known.
    pub variable: Option<VariableRef>,
    /// A description of why the state is infeasible.
    pub reason: Cow<'static, str>,
}

impl Contradiction {
    pub(crate) fn new(variable: VariableRef, reason: impl Into<Cow<'static, str>>) -> Self {
        Contradiction {
            variable: Some(variable),
            reason: reason.into(),
        }
    }
}

impl Display for Contradiction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.variable {
            Some(variable) => write!(f, "contradiction on {}: {}", variable, self.reason),
            None => write!(f, "contradiction: {}", self.reason),
        }
    }
}

/// Raised by a domain operation that would leave the domain without any
/// values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyDomain(pub(crate) VariableRef);

impl From<EmptyDomain> for Contradiction {
    fn from(EmptyDomain(variable): EmptyDomain) -> Self {
        Contradiction::new(variable, "the domain became empty")
    }
}

/// Errors related to posting constraints. These are API misuse signals for the
/// caller, as opposed to [`Contradiction`]s which drive backtracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConstraintOperationError {
    /// The model was already inconsistent before the constraint was posted.
    #[error("the model is already inconsistent at the root")]
    InfeasibleState,
    /// Posting the constraint made the root world inconsistent.
    #[error("the constraint is infeasible at the root")]
    InfeasibleConstraint,
}
