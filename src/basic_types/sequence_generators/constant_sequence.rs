use super::SequenceGenerator;

/// A sequence that generates the same value indefinitely.
#[derive(Debug, Copy, Clone)]
pub(crate) struct ConstantSequence {
    constant_value: i64,
}

impl ConstantSequence {
    pub(crate) fn new(constant_value: i64) -> ConstantSequence {
        ConstantSequence { constant_value }
    }
}

impl SequenceGenerator for ConstantSequence {
    fn next(&mut self) -> i64 {
        self.constant_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_value_never_changes() {
        let mut sequence = ConstantSequence::new(100);
        for _ in 0..1000 {
            assert_eq!(sequence.next(), 100);
        }
    }
}
