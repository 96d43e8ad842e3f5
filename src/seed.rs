//! Entropy-backed seed generation.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Produces uniformly distributed `u32` generation seeds.
///
/// Owned and passed explicitly by the caller rather than living in process
/// globals: construct one from OS entropy at startup and draw a fresh seed
/// per generation. Seeds drawn from an entropy-backed source are not
/// reproducible across processes.
#[derive(Debug, Clone)]
pub struct SeedSource {
    rng: ChaCha8Rng,
}

impl SeedSource {
    /// Creates a source seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Creates a deterministic source, for reproducible pipelines.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Draws a fresh generation seed.
    pub fn next_seed(&mut self) -> u32 {
        self.rng.gen()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consecutive_seeds_differ() {
        let mut source = SeedSource::from_entropy();
        // Statistical smoke test: a 1 in 2^32 false failure is acceptable.
        assert_ne!(source.next_seed(), source.next_seed());
    }

    #[test]
    fn test_seeded_source_is_reproducible() {
        let mut a = SeedSource::from_seed(77);
        let mut b = SeedSource::from_seed(77);

        for _ in 0..8 {
            assert_eq!(a.next_seed(), b.next_seed());
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = SeedSource::from_seed(1);
        let mut b = SeedSource::from_seed(2);
        assert_ne!(a.next_seed(), b.next_seed());
    }
}
