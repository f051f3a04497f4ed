/// Randomness used when spawning letters
use std::ops::Range;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_core::RngCore;

/// Source of glyphs and fall speeds. Swap in a scripted one for tests.
pub trait SpawnRng {
    /// Uniform pick from a non-empty alphabet
    fn pick_glyph(&mut self, alphabet: &[char]) -> char;

    /// Uniform pick from a non-empty half-open range
    fn pick_speed(&mut self, range: &Range<f64>) -> f64;
}

/// `SpawnRng` backed by any rand generator
#[derive(Debug, Clone)]
pub struct Sampler<R> {
    rng: R,
}

impl<R: RngCore> Sampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl Sampler<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_rng(&mut rand::rng()))
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: RngCore> SpawnRng for Sampler<R> {
    fn pick_glyph(&mut self, alphabet: &[char]) -> char {
        alphabet[self.rng.random_range(0..alphabet.len())]
    }

    fn pick_speed(&mut self, range: &Range<f64>) -> f64 {
        self.rng.random_range(range.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_stay_in_bounds() {
        let alphabet: Vec<char> = ('A'..='Z').collect();
        let mut sampler = Sampler::seeded(7);

        for _ in 0..1_000 {
            let glyph = sampler.pick_glyph(&alphabet);
            let speed = sampler.pick_speed(&(1.0..3.0));
            assert!(glyph.is_ascii_uppercase());
            assert!((1.0..3.0).contains(&speed), "speed {speed} out of range");
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let alphabet: Vec<char> = ('A'..='Z').collect();
        let mut a = Sampler::seeded(42);
        let mut b = Sampler::seeded(42);

        for _ in 0..32 {
            assert_eq!(a.pick_glyph(&alphabet), b.pick_glyph(&alphabet));
            assert_eq!(a.pick_speed(&(1.0..3.0)), b.pick_speed(&(1.0..3.0)));
        }
    }
}
