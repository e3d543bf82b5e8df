//! Seeded randomness for search and agents.
//!
//! Everything random in a search flows from one `u64`. Rollouts split off
//! their own stream with [`GameRng::fork`]; parallel workers and successive
//! agent decisions pick theirs with [`derive_seed`].
//!
//! ```
//! use rust_gamesearch::core::GameRng;
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//! assert_eq!(a.fork().seed(), b.fork().seed());
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// ChaCha8 stream that remembers its seed so it can hand out child streams.
#[derive(Clone, Debug)]
pub struct GameRng {
    stream: ChaCha8Rng,
    seed: u64,
    forks: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            stream: ChaCha8Rng::seed_from_u64(seed),
            seed,
            forks: 0,
        }
    }

    /// Split off the next child stream.
    ///
    /// A child's seed depends on this seed and on how many forks came
    /// before it, not on anything drawn from the parent.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.forks += 1;
        Self::new(derive_seed(self.seed, self.forks))
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.stream)
    }

    /// Draw an index with probability proportional to its weight.
    ///
    /// Non-positive and NaN weights are never drawn. `None` if nothing is
    /// left to draw or the weights sum to infinity.
    pub fn choose_weighted(&mut self, weights: &[f64]) -> Option<usize> {
        let usable = |w: f64| if w > 0.0 { w } else { 0.0 };
        let total: f64 = weights.iter().map(|&w| usable(w)).sum();
        if total <= 0.0 || !total.is_finite() {
            return None;
        }

        let mut point = self.stream.gen_range(0.0..total);
        let mut last = None;
        for (i, &w) in weights.iter().enumerate() {
            let w = usable(w);
            if w == 0.0 {
                continue;
            }
            if point < w {
                return Some(i);
            }
            point -= w;
            last = Some(i);
        }
        // Rounding can leave a sliver past the final weight.
        last
    }
}

/// Seed for stream `stream` of `seed`. Stream 0 is `seed` itself.
#[must_use]
pub fn derive_seed(seed: u64, stream: u64) -> u64 {
    seed.wrapping_add(stream.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draws(rng: &mut GameRng) -> Vec<u32> {
        let items: Vec<u32> = (0..1000).collect();
        (0..16).filter_map(|_| rng.choose(&items).copied()).collect()
    }

    #[test]
    fn test_same_seed_same_draws() {
        assert_eq!(draws(&mut GameRng::new(5)), draws(&mut GameRng::new(5)));
        assert_ne!(draws(&mut GameRng::new(5)), draws(&mut GameRng::new(6)));
    }

    #[test]
    fn test_fork_ignores_parent_draws() {
        let mut quiet = GameRng::new(11);
        let mut busy = GameRng::new(11);
        draws(&mut busy);

        let mut a = quiet.fork();
        let mut b = busy.fork();
        assert_eq!(draws(&mut a), draws(&mut b));

        // The next fork is a different stream.
        assert_ne!(quiet.fork().seed(), a.seed());
    }

    #[test]
    fn test_derive_seed_stream_zero() {
        assert_eq!(derive_seed(123, 0), 123);
        assert_ne!(derive_seed(123, 1), derive_seed(123, 2));
        // Wraps instead of overflowing.
        let _ = derive_seed(u64::MAX, u64::MAX);
    }

    #[test]
    fn test_choose_empty() {
        let empty: [u8; 0] = [];
        assert!(GameRng::new(1).choose(&empty).is_none());
    }

    #[test]
    fn test_choose_weighted() {
        let mut rng = GameRng::new(42);

        for _ in 0..20 {
            assert_eq!(rng.choose_weighted(&[0.0, 3.0, -1.0, f64::NAN]), Some(1));
        }
        assert_eq!(rng.choose_weighted(&[]), None);
        assert_eq!(rng.choose_weighted(&[0.0, -2.0]), None);
        assert_eq!(rng.choose_weighted(&[f64::INFINITY, 1.0]), None);
    }

    #[test]
    fn test_choose_weighted_hits_every_positive_entry() {
        let mut rng = GameRng::new(3);
        let mut seen = [false; 3];
        for _ in 0..200 {
            if let Some(i) = rng.choose_weighted(&[1.0, 1.0, 1.0]) {
                seen[i] = true;
            }
        }
        assert_eq!(seen, [true; 3]);
    }
}
