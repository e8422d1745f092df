use super::SequenceGenerator;

/// An arithmetic cutoff sequence: `base, base + step, base + 2 * step, ...`.
#[derive(Debug, Copy, Clone)]
pub(crate) struct ArithmeticSequence {
    current_value: i64,
    step: i64,
}

impl ArithmeticSequence {
    pub(crate) fn new(starting_value: i64, step: i64) -> ArithmeticSequence {
        ArithmeticSequence {
            current_value: starting_value,
            step,
        }
    }
}

impl SequenceGenerator for ArithmeticSequence {
    fn next(&mut self) -> i64 {
        let next_value = self.current_value;
        self.current_value += self.step;
        next_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_grow_by_the_step() {
        let mut sequence = ArithmeticSequence::new(100, 50);
        assert_eq!(sequence.next(), 100);
        assert_eq!(sequence.next(), 150);
        assert_eq!(sequence.next(), 200);
        assert_eq!(sequence.next(), 250);
    }
}
