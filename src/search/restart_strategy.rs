use crate::basic_types::sequence_generators::ArithmeticSequence;
use crate::basic_types::sequence_generators::ConstantSequence;
use crate::basic_types::sequence_generators::GeometricSequence;
use crate::basic_types::sequence_generators::LubySequence;
use crate::basic_types::sequence_generators::SequenceGenerator;
use crate::basic_types::sequence_generators::SequenceGeneratorType;

/// Configures when the search abandons the current subtree and starts over
/// from the root. Restarts keep the deductions recorded at the root (such as
/// objective bounds), so they trade the current position in the tree for a
/// fresh chance at a better one.
#[derive(Debug, Clone, Copy)]
pub struct RestartOptions {
    /// The shape of the sequence of conflict cutoffs.
    pub sequence_generator_type: SequenceGeneratorType,
    /// The number of conflicts before the first restart, and the seed value
    /// of the cutoff sequence.
    pub base_interval: u64,
    /// The multiplier applied between cutoffs by the geometric sequence.
    pub geometric_coefficient: f64,
    /// The increment applied between cutoffs by the arithmetic sequence.
    pub arithmetic_step: u64,
    /// An overall cap on the number of restarts; once reached, the search
    /// reports a limit instead of restarting again.
    pub max_num_restarts: Option<u64>,
}

impl Default for RestartOptions {
    fn default() -> Self {
        RestartOptions {
            sequence_generator_type: SequenceGeneratorType::Constant,
            base_interval: 100,
            geometric_coefficient: 1.5,
            arithmetic_step: 50,
            max_num_restarts: None,
        }
    }
}

/// Tracks conflicts against the active cutoff. Disabled entirely when built
/// without options.
#[derive(Debug)]
pub(crate) struct RestartStrategy {
    sequence_generator: Option<Box<dyn SequenceGenerator>>,
    remaining_conflicts: i64,
    num_restarts: u64,
    max_num_restarts: Option<u64>,
}

impl RestartStrategy {
    pub(crate) fn new(options: Option<RestartOptions>) -> Self {
        let Some(options) = options else {
            return RestartStrategy {
                sequence_generator: None,
                remaining_conflicts: 0,
                num_restarts: 0,
                max_num_restarts: None,
            };
        };

        let base = options.base_interval as i64;
        let mut sequence_generator: Box<dyn SequenceGenerator> =
            match options.sequence_generator_type {
                SequenceGeneratorType::Constant => Box::new(ConstantSequence::new(base)),
                SequenceGeneratorType::Arithmetic => Box::new(ArithmeticSequence::new(
                    base,
                    options.arithmetic_step as i64,
                )),
                SequenceGeneratorType::Geometric => {
                    Box::new(GeometricSequence::new(base, options.geometric_coefficient))
                }
                SequenceGeneratorType::Luby => Box::new(LubySequence::new(base)),
            };

        let remaining_conflicts = sequence_generator.next();
        RestartStrategy {
            sequence_generator: Some(sequence_generator),
            remaining_conflicts,
            num_restarts: 0,
            max_num_restarts: options.max_num_restarts,
        }
    }

    pub(crate) fn notify_conflict(&mut self) {
        if self.sequence_generator.is_some() {
            self.remaining_conflicts -= 1;
        }
    }

    /// Whether the active cutoff has been consumed by conflicts.
    pub(crate) fn should_restart(&self) -> bool {
        self.sequence_generator.is_some() && self.remaining_conflicts <= 0
    }

    /// Begin the next run: draw the next cutoff from the sequence.
    pub(crate) fn notify_restart(&mut self) {
        self.num_restarts += 1;
        if let Some(generator) = &mut self.sequence_generator {
            self.remaining_conflicts = generator.next();
        }
    }

    pub(crate) fn num_restarts(&self) -> u64 {
        self.num_restarts
    }

    pub(crate) fn cap_reached(&self) -> bool {
        self.max_num_restarts
            .is_some_and(|cap| self.num_restarts >= cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_disabled_strategy_never_restarts() {
        let mut strategy = RestartStrategy::new(None);
        for _ in 0..1000 {
            strategy.notify_conflict();
        }
        assert!(!strategy.should_restart());
    }

    #[test]
    fn the_cutoff_is_consumed_by_conflicts_and_renewed_on_restart() {
        let options = RestartOptions {
            sequence_generator_type: SequenceGeneratorType::Constant,
            base_interval: 3,
            ..RestartOptions::default()
        };
        let mut strategy = RestartStrategy::new(Some(options));

        strategy.notify_conflict();
        strategy.notify_conflict();
        assert!(!strategy.should_restart());
        strategy.notify_conflict();
        assert!(strategy.should_restart());

        strategy.notify_restart();
        assert!(!strategy.should_restart());
        assert_eq!(strategy.num_restarts(), 1);
    }

    #[test]
    fn the_cap_limits_the_number_of_restarts() {
        let options = RestartOptions {
            base_interval: 1,
            max_num_restarts: Some(2),
            ..RestartOptions::default()
        };
        let mut strategy = RestartStrategy::new(Some(options));

        strategy.notify_restart();
        assert!(!strategy.cap_reached());
        strategy.notify_restart();
        assert!(strategy.cap_reached());
    }
}
