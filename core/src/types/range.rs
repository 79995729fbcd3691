use rand::Rng;
use serde::{Deserialize, Serialize};

/// Inclusive float range written as `a` or `a-b`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FloatRange {
    pub from: f32,
    pub to: f32,
}

impl FloatRange {
    pub fn new(from: f32, to: f32) -> Self {
        Self { from, to }
    }

    pub fn single(value: f32) -> Self {
        Self {
            from: value,
            to: value,
        }
    }

    pub fn is_single(&self) -> bool {
        self.from == self.to
    }

    /// Picks a value in the range. Reversed or degenerate ranges give `from`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.from < self.to {
            rng.gen_range(self.from..=self.to)
        } else {
            self.from
        }
    }

    /// Multiplies both ends, used for the experience range stored in 8.8.
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            from: self.from * factor,
            to: self.to * factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn sample_stays_inside() {
        let mut rng = StdRng::seed_from_u64(42);
        let range = FloatRange::new(2.0, 4.0);
        for _ in 0..100 {
            let v = range.sample(&mut rng);
            assert!((2.0..=4.0).contains(&v));
        }
    }

    #[test]
    fn degenerate_range_gives_from() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(FloatRange::single(3.0).sample(&mut rng), 3.0);
        assert_eq!(FloatRange::new(5.0, 1.0).sample(&mut rng), 5.0);
        assert!(FloatRange::single(3.0).is_single());
    }

    #[test]
    fn scaling() {
        assert_eq!(
            FloatRange::new(1.0, 2.0).scaled(256.0),
            FloatRange::new(256.0, 512.0)
        );
    }
}
