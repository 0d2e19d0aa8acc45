//! Uniform integer source used by dungeon generation, spawning and AI.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Draws uniformly distributed integers.
pub trait RandomSource {
    /// Uniform integer in `min..=max`.
    fn uniform_int(&mut self, min: i32, max: i32) -> i32;

    /// Fair coin flip.
    fn coin(&mut self) -> bool {
        self.uniform_int(0, 1) == 1
    }
}

/// `RandomSource` backed by a seedable `StdRng`.
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RandomSource for StdRandom {
    fn uniform_int(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..=max)
    }
}

/// Replays a fixed list of rolls, clamped into the requested range.
/// Falls back to `min` once the script runs out.
#[cfg(test)]
pub struct ScriptedRandom {
    rolls: std::collections::VecDeque<i32>,
}

#[cfg(test)]
impl ScriptedRandom {
    pub fn new(rolls: &[i32]) -> Self {
        Self {
            rolls: rolls.iter().copied().collect(),
        }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRandom {
    fn uniform_int(&mut self, min: i32, max: i32) -> i32 {
        self.rolls.pop_front().unwrap_or(min).clamp(min, max.max(min))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_int_stays_in_range() {
        let mut rng = StdRandom::from_seed(7);
        for _ in 0..500 {
            let roll = rng.uniform_int(-2, 3);
            assert!((-2..=3).contains(&roll));
        }
    }

    #[test]
    fn test_uniform_int_degenerate_range() {
        let mut rng = StdRandom::from_seed(7);
        assert_eq!(rng.uniform_int(4, 4), 4);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = StdRandom::from_seed(42);
        let mut b = StdRandom::from_seed(42);
        let rolls_a: Vec<i32> = (0..20).map(|_| a.uniform_int(0, 100)).collect();
        let rolls_b: Vec<i32> = (0..20).map(|_| b.uniform_int(0, 100)).collect();
        assert_eq!(rolls_a, rolls_b);
    }

    #[test]
    fn test_scripted_random_replays_then_defaults() {
        let mut rng = ScriptedRandom::new(&[2, 9]);
        assert_eq!(rng.uniform_int(0, 5), 2);
        assert_eq!(rng.uniform_int(0, 5), 5);
        assert_eq!(rng.uniform_int(1, 5), 1);
    }
}
