//! Fitness-proportional parent selection.

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

/// Pick one member of `population` with probability proportional to its score.
///
/// Scores may be negative: they are shifted so the lowest becomes zero. When
/// there are no scores, all scores are equal, or the shifted weights sum to
/// zero, the pick is uniform. Returns `None` only for an empty population.
pub fn select<'p, T>(population: &'p [T], scores: &[f64], rng: &mut ChaCha8Rng) -> Option<&'p T> {
    let Some(&first) = scores.first() else {
        return population.choose(rng);
    };

    if scores.iter().all(|&s| s == first) {
        return population.choose(rng);
    }

    let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
    let shift = if min < 0.0 { min } else { 0.0 };
    let weights = scores.iter().map(|&s| s - shift);

    match WeightedIndex::new(weights) {
        Ok(dist) => population.get(dist.sample(rng)),
        // Zero total weight after shifting
        Err(_) => population.choose(rng),
    }
}
