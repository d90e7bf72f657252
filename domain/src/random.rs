//! Randomness seam for action selection.
//!
//! All stochastic decisions in the dialog engine flow through
//! [`DrawSource`], a trait producing uniform draws in `[0, 1)`. Each
//! decision consumes a fixed number of draws, so a scripted source can
//! steer a whole simulation deterministically:
//!
//! - one draw per entry of an agent's action table (stopping at the
//!   first hit),
//! - one draw per [`weighted_choice`],
//! - one draw per [`DrawSource::pick_index`] (probe target selection).
//!
//! [`StdRandom`] is the production source; [`SequenceDraws`] replays a
//! scripted sequence for tests and reproducible demos.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// A source of uniform random draws in `[0, 1)`.
pub trait DrawSource {
    /// Returns the next uniform draw in `[0, 1)`.
    fn draw(&mut self) -> f64;

    /// Picks an index in `0..len` from a single draw.
    ///
    /// `len` must be non-zero; the result is clamped to `len - 1` so a
    /// draw arbitrarily close to 1.0 still yields a valid index.
    fn pick_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "pick_index requires a non-empty range");
        let idx = (self.draw() * len as f64) as usize;
        idx.min(len - 1)
    }
}

/// Picks one of `outcomes` using relative `weights` and a single draw.
///
/// Walks the cumulative weight and returns the first outcome whose
/// cumulative share exceeds the draw. Weights need not sum to 1; they
/// are normalized by their total. The last outcome absorbs any
/// floating-point shortfall.
///
/// # Panics
///
/// Panics if `outcomes` is empty or the slices differ in length.
pub fn weighted_choice<T: Copy>(rng: &mut dyn DrawSource, outcomes: &[T], weights: &[f64]) -> T {
    assert!(!outcomes.is_empty(), "weighted_choice requires outcomes");
    assert_eq!(
        outcomes.len(),
        weights.len(),
        "weighted_choice requires one weight per outcome"
    );

    let total: f64 = weights.iter().sum();
    let target = rng.draw() * total;
    let mut acc = 0.0;
    for (outcome, weight) in outcomes.iter().zip(weights) {
        acc += weight;
        if target < acc {
            return *outcome;
        }
    }
    outcomes[outcomes.len() - 1]
}

/// Production draw source backed by a seedable RNG.
///
/// Seeded runs replay the same action sequence turn for turn, which
/// makes simulations reproducible end to end (given the same
/// generator backend).
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    /// Creates a source seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a source with a fixed seed for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl DrawSource for StdRandom {
    fn draw(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }
}

impl std::fmt::Debug for StdRandom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StdRandom").finish_non_exhaustive()
    }
}

/// Scripted draw source replaying a fixed sequence.
///
/// Once the sequence is exhausted every further draw returns the
/// fallback value (0.99 unless overridden), which sits above the
/// trigger probabilities of typical action tables.
#[derive(Debug, Clone)]
pub struct SequenceDraws {
    values: VecDeque<f64>,
    fallback: f64,
}

impl SequenceDraws {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: values.into_iter().collect(),
            fallback: 0.99,
        }
    }

    /// Overrides the value returned after the sequence runs out.
    pub fn with_fallback(mut self, fallback: f64) -> Self {
        self.fallback = fallback;
        self
    }

    /// Number of scripted draws not yet consumed.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl DrawSource for SequenceDraws {
    fn draw(&mut self) -> f64 {
        self.values.pop_front().unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_draws_replays_then_falls_back() {
        let mut draws = SequenceDraws::new([0.1, 0.5]);
        assert_eq!(draws.remaining(), 2);
        assert_eq!(draws.draw(), 0.1);
        assert_eq!(draws.draw(), 0.5);
        assert_eq!(draws.draw(), 0.99);
        assert_eq!(draws.draw(), 0.99);
    }

    #[test]
    fn test_sequence_draws_custom_fallback() {
        let mut draws = SequenceDraws::new([]).with_fallback(0.0);
        assert_eq!(draws.draw(), 0.0);
    }

    #[test]
    fn test_weighted_choice_first_bucket() {
        let mut draws = SequenceDraws::new([0.0]);
        let picked = weighted_choice(&mut draws, &["change", "support"], &[0.6, 0.4]);
        assert_eq!(picked, "change");
    }

    #[test]
    fn test_weighted_choice_boundary_falls_into_second_bucket() {
        // Cumulative shares are [0.6, 1.0]; a draw of exactly 0.6 is
        // not < 0.6, so it lands in the second bucket.
        let mut draws = SequenceDraws::new([0.6]);
        let picked = weighted_choice(&mut draws, &["change", "support"], &[0.6, 0.4]);
        assert_eq!(picked, "support");
    }

    #[test]
    fn test_weighted_choice_normalizes_weights() {
        // Weights 6/4 behave like 0.6/0.4.
        let mut draws = SequenceDraws::new([0.59]);
        let picked = weighted_choice(&mut draws, &["a", "b"], &[6.0, 4.0]);
        assert_eq!(picked, "a");
    }

    #[test]
    fn test_weighted_choice_consumes_one_draw() {
        let mut draws = SequenceDraws::new([0.2, 0.8]);
        let _ = weighted_choice(&mut draws, &[1, 2, 3], &[0.3, 0.3, 0.4]);
        assert_eq!(draws.remaining(), 1);
    }

    #[test]
    fn test_weighted_choice_last_outcome_absorbs_top_of_range() {
        let mut draws = SequenceDraws::new([0.9999999]);
        let picked = weighted_choice(&mut draws, &[1, 2], &[0.5, 0.5]);
        assert_eq!(picked, 2);
    }

    #[test]
    fn test_pick_index_spreads_over_range() {
        let mut draws = SequenceDraws::new([0.0, 0.34, 0.99]);
        assert_eq!(draws.pick_index(3), 0);
        assert_eq!(draws.pick_index(3), 1);
        assert_eq!(draws.pick_index(3), 2);
    }

    #[test]
    fn test_pick_index_single_element() {
        let mut draws = SequenceDraws::new([0.7]);
        assert_eq!(draws.pick_index(1), 0);
    }

    #[test]
    fn test_std_random_draws_in_unit_interval() {
        let mut rng = StdRandom::seeded(7);
        for _ in 0..100 {
            let d = rng.draw();
            assert!((0.0..1.0).contains(&d));
        }
    }

    #[test]
    fn test_std_random_seeded_is_reproducible() {
        let mut a = StdRandom::seeded(42);
        let mut b = StdRandom::seeded(42);
        for _ in 0..10 {
            assert_eq!(a.draw(), b.draw());
        }
    }
}
