//! The sequence generator used to shuffle permutation tables.
//!
//! This is Knuth's MMIX linear congruential generator with the exact warm-up
//! and reduction used by the reference `OpenSimplex` seeding, so a seed yields
//! the same permutation on every platform and in every implementation that
//! follows the same recipe. It is not a general purpose RNG.

/// LCG multiplier (Knuth, MMIX).
const MULTIPLIER: i64 = 6_364_136_223_846_793_005;
/// LCG increment (Knuth, MMIX).
const INCREMENT: i64 = 1_442_695_040_888_963_407;
/// Number of times the state is advanced before the first draw.
const WARM_UP: usize = 3;

/// Deterministic 64-bit LCG with two's-complement wrapping arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lcg64 {
    state: i64,
}

impl Lcg64 {
    /// Create a generator from a seed, advancing it through the warm-up steps.
    #[must_use]
    pub const fn from_seed(seed: i64) -> Self {
        let mut rng = Self { state: seed };
        let mut i = 0;
        while i < WARM_UP {
            rng.advance();
            i += 1;
        }
        rng
    }

    #[inline]
    const fn advance(&mut self) -> i64 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        self.state
    }

    /// Advance the generator and reduce it to `0..bound`.
    ///
    /// The reduction is `(state + 31) % bound` with a signed remainder, shifted
    /// into range when negative.
    ///
    /// # Panics
    /// Panics if `bound` is not positive.
    pub fn next_bounded(&mut self, bound: i64) -> i64 {
        assert!(bound > 0, "bound must be positive");
        let r = self.advance().wrapping_add(31) % bound;
        if r < 0 { r + bound } else { r }
    }
}
