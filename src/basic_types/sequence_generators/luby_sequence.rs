use super::SequenceGenerator;

/// The Luby sequence is a recursive sequence of the form:
/// 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8, 1, 1, 2...
/// The sequence is multiplied with a given constant `base_value`.
/// Generating the next element is computed in constant time using Knuth's
/// 'reluctant doubling' formula. Note that overflows are not taken into
/// account.
#[derive(Debug, Copy, Clone)]
pub(crate) struct LubySequence {
    u: i64,
    v: i64,
    base_value: i64,
}

impl LubySequence {
    pub(crate) fn new(base_value: i64) -> LubySequence {
        LubySequence {
            u: 1,
            v: 1,
            base_value,
        }
    }
}

impl SequenceGenerator for LubySequence {
    fn next(&mut self) -> i64 {
        let next_value = self.v;
        if (self.u & (-self.u)) == self.v {
            self.u += 1;
            self.v = 1;
        } else {
            self.v *= 2;
        }
        next_value * self.base_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_1_follows_the_luby_sequence() {
        let mut sequence = LubySequence::new(1);
        let expected = [1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8, 1, 1, 2];
        for value in expected {
            assert_eq!(sequence.next(), value);
        }
    }

    fn luby_compute_recursively(i: usize) -> usize {
        let k = (i + 1).ilog2();
        if (i + 1).is_power_of_two() {
            1 << (k - 1)
        } else {
            luby_compute_recursively(i + 1 - (1 << k))
        }
    }

    #[test]
    fn base_50_matches_the_recursive_definition() {
        let mut sequence = LubySequence::new(50);
        for i in 1..10000 {
            assert_eq!(sequence.next(), (luby_compute_recursively(i) * 50) as i64);
        }
    }
}
