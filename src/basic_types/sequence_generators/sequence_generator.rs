use std::fmt::Debug;

/// A generator for the cutoff sequence that drives restarts: each call to
/// [`SequenceGenerator::next`] yields the number of conflicts to allow before
/// the next restart.
pub(crate) trait SequenceGenerator: Debug {
    fn next(&mut self) -> i64;
}

/// Selects which cutoff sequence a restart strategy follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequenceGeneratorType {
    /// Every cutoff is the base interval.
    #[default]
    Constant,
    /// Cutoffs grow by a fixed step: `base, base + step, base + 2 * step, ...`.
    Arithmetic,
    /// Cutoffs grow by a multiplicative factor.
    Geometric,
    /// The Luby sequence `1, 1, 2, 1, 1, 2, 4, ...` scaled by the base
    /// interval.
    Luby,
}
