//! Seeded randomness for spin resolution.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use reelworks_types::{Symbol, SymbolWeights};

/// Deterministic random source for one spin resolution.
///
/// One instance is created per resolution from `(session seed, spin index)`,
/// so a spin replays exactly from its coordinates.
pub struct SpinRng {
    inner: ChaCha8Rng,
}

impl SpinRng {
    pub fn new(session_seed: u64, spin: u64) -> Self {
        let mut key = [0u8; 32];
        key[..8].copy_from_slice(&session_seed.to_be_bytes());
        key[8..16].copy_from_slice(&spin.to_be_bytes());
        Self {
            inner: ChaCha8Rng::from_seed(key),
        }
    }

    /// Uniform draw in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.inner.gen()
    }

    /// Bernoulli draw with probability `p`; values outside `[0, 1]` clamp.
    pub fn chance(&mut self, p: f64) -> bool {
        if p <= 0.0 {
            return false;
        }
        if p >= 1.0 {
            return true;
        }
        self.next_f64() < p
    }

    /// Uniform index in `0..n`. `n` must be nonzero.
    pub fn pick(&mut self, n: usize) -> usize {
        debug_assert!(n > 0, "pick from an empty range");
        self.inner.gen_range(0..n)
    }

    /// Weighted symbol sample: a cumulative walk across the table in symbol
    /// order. Falls back to the last entry on floating-point underrun.
    pub fn draw_weighted(&mut self, weights: &SymbolWeights) -> Symbol {
        let total = weights.total();
        if total == 0 {
            return Symbol::default();
        }
        let mut remaining = self.next_f64() * total as f64;
        let mut drawn = Symbol::default();
        for (symbol, weight) in weights.iter() {
            drawn = symbol;
            remaining -= weight as f64;
            if remaining <= 0.0 {
                break;
            }
        }
        drawn
    }
}
