//! Uniform random draws consumed by the stochastic pipeline stages.

use std::collections::VecDeque;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

pub trait RandomSource {
    fn draw_u64(&mut self) -> u64;

    /// Uniform integer in `[min, max_exclusive)`.
    fn range_i32(&mut self, min: i32, max_exclusive: i32) -> i32 {
        debug_assert!(min < max_exclusive);
        let span = (i64::from(max_exclusive) - i64::from(min)) as u64;
        (i64::from(min) + (self.draw_u64() % span) as i64) as i32
    }

    /// Uniform float in `[0, 1)` with 24 bits of precision.
    fn unit_f32(&mut self) -> f32 {
        (self.draw_u64() >> 40) as f32 / (1_u64 << 24) as f32
    }

    fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.unit_f32()
    }
}

impl RandomSource for ChaCha8Rng {
    fn draw_u64(&mut self) -> u64 {
        self.next_u64()
    }
}

/// Replays injected draws before falling back to a seeded stream.
///
/// Integer draws are clamped into the requested range so a script can never
/// produce a value the caller did not ask for.
pub struct ScriptedRandom {
    integers: VecDeque<i32>,
    units: VecDeque<f32>,
    fallback: ChaCha8Rng,
}

impl ScriptedRandom {
    pub fn new(
        integers: impl IntoIterator<Item = i32>,
        units: impl IntoIterator<Item = f32>,
    ) -> Self {
        Self {
            integers: integers.into_iter().collect(),
            units: units.into_iter().collect(),
            fallback: ChaCha8Rng::seed_from_u64(0),
        }
    }

    pub fn remaining_integers(&self) -> usize {
        self.integers.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn draw_u64(&mut self) -> u64 {
        self.fallback.next_u64()
    }

    fn range_i32(&mut self, min: i32, max_exclusive: i32) -> i32 {
        match self.integers.pop_front() {
            Some(value) => value.clamp(min, max_exclusive - 1),
            None => {
                let span = (i64::from(max_exclusive) - i64::from(min)) as u64;
                (i64::from(min) + (self.draw_u64() % span) as i64) as i32
            }
        }
    }

    fn unit_f32(&mut self) -> f32 {
        match self.units.pop_front() {
            Some(value) => value.clamp(0.0, 1.0),
            None => (self.draw_u64() >> 40) as f32 / (1_u64 << 24) as f32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_i32_stays_inside_requested_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(12_345);
        for _ in 0..1000 {
            let value = rng.range_i32(-3, 4);
            assert!((-3..4).contains(&value));
        }
    }

    #[test]
    fn unit_f32_never_reaches_one() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1000 {
            let value = rng.unit_f32();
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn scripted_draws_are_replayed_in_order_then_fall_back() {
        let mut rng = ScriptedRandom::new([5, 40, -2], [0.25]);
        assert_eq!(rng.range_i32(0, 20), 5);
        assert_eq!(rng.range_i32(0, 20), 19);
        assert_eq!(rng.range_i32(0, 20), 0);
        assert_eq!(rng.remaining_integers(), 0);
        assert!((0..20).contains(&rng.range_i32(0, 20)));

        assert_eq!(rng.unit_f32(), 0.25);
        assert!((0.0..1.0).contains(&rng.unit_f32()));
    }
}
