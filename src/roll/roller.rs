use crate::common::{Int, Sides};
use rand::Rng;

/// A source of uniformly distributed die faces.
pub trait Roller {
    /// An integer in `min..=max`.
    fn uniform(&mut self, min: Int, max: Int) -> Int;

    /// One face of a die with the given sides. Numbered dice start at 1,
    /// fate dice are -1, 0 or +1.
    fn roll(&mut self, sides: Sides) -> Int {
        let (min, max) = sides.bounds();
        self.uniform(min, max)
    }
}

impl<R: Rng> Roller for R {
    fn uniform(&mut self, min: Int, max: Int) -> Int {
        self.gen_range(min..=max)
    }
}

#[cfg(test)]
pub(crate) use fixed::{FixedRoller, SequenceRoller};

#[cfg(test)]
mod fixed {
    use super::*;

    /// Returns the same value on every draw, whatever the bounds.
    pub(crate) struct FixedRoller(pub Int);

    impl Roller for FixedRoller {
        fn uniform(&mut self, _min: Int, _max: Int) -> Int {
            self.0
        }
    }

    /// Cycles through a list of draws in order.
    pub(crate) struct SequenceRoller {
        values: Vec<Int>,
        next: usize,
    }

    impl SequenceRoller {
        pub fn new(values: impl Into<Vec<Int>>) -> Self {
            let values = values.into();
            assert!(!values.is_empty());
            Self { values, next: 0 }
        }
    }

    impl Roller for SequenceRoller {
        fn uniform(&mut self, _min: Int, _max: Int) -> Int {
            let ret = self.values[self.next];
            self.next = (self.next + 1) % self.values.len();
            ret
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_rng_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let d6 = Sides::try_from(6u32).unwrap();
        let fate = Sides::Fate { abbreviated: true };
        for _ in 0..500 {
            assert!((1..=6).contains(&rng.roll(d6)));
            assert!((-1..=1).contains(&rng.roll(fate)));
        }
    }

    #[test]
    fn test_sequence_roller_cycles() {
        let mut roller = SequenceRoller::new([8, 15]);
        let d20 = Sides::try_from(20u32).unwrap();
        let draws: Vec<_> = (0..5).map(|_| roller.roll(d20)).collect();
        assert_eq!(draws, vec![8, 15, 8, 15, 8]);
    }
}
