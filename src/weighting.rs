/**
 * Re-sample the candidate pool so that its mix of easy, medium and hard questions suits
 * the age of the current player.
 *
 * Young children get mostly easy questions (70% easy, 25% medium, 5% hard), teenagers a
 * balanced mix (40/50/10), and everyone else more of a challenge (30/50/20).
 *
 * When a difficulty cannot supply its share of the pool, all three targets are scaled
 * down together so that the scarcest difficulty is used up exactly. The weighted pool
 * is then smaller than the candidate pool, but the mix stays right and no question is
 * ever used twice.
 *
 * Version: November 2025
 */
use std::cmp;

use log::debug;
use rand::Rng;

use super::pool::shuffle;
use super::question::{Difficulty, Question};


/// Players younger than this count as young children.
pub const YOUNG_AGE: u32 = 10;
/// Players younger than this (and not young children) count as teenagers.
pub const TEEN_AGE: u32 = 16;


/// The share of each difficulty in a weighted pool. The shares sum to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgeWeights {
    pub easy: f64,
    pub medium: f64,
    pub hard: f64,
}


const YOUNG_WEIGHTS: AgeWeights = AgeWeights { easy: 0.70, medium: 0.25, hard: 0.05 };
const TEEN_WEIGHTS: AgeWeights = AgeWeights { easy: 0.40, medium: 0.50, hard: 0.10 };
const ADULT_WEIGHTS: AgeWeights = AgeWeights { easy: 0.30, medium: 0.50, hard: 0.20 };


impl AgeWeights {
    /// The shares in the order of `Difficulty::ALL`.
    pub fn as_array(&self) -> [f64; 3] {
        [self.easy, self.medium, self.hard]
    }
}


/// Return the difficulty mix for a player of the given age. Without an age the adult
/// mix is used.
pub fn get_age_weights(age: Option<u32>) -> AgeWeights {
    match age {
        Some(age) if age < YOUNG_AGE => YOUNG_WEIGHTS,
        Some(age) if age < TEEN_AGE => TEEN_WEIGHTS,
        _ => ADULT_WEIGHTS,
    }
}


/// Return how many questions to take from each difficulty, given how many are
/// available in each and the share each should have.
///
/// The first two non-empty difficulties get their scaled target rounded to the nearest
/// integer; the last non-empty one gets whatever is left of the rounded total, so that
/// rounding never makes the counts drift from the total. Every count is capped at what
/// is available.
pub fn bucket_counts(available: [usize; 3], ratios: [f64; 3]) -> [usize; 3] {
    let pool_size: usize = available.iter().sum();
    let total_weight: f64 = ratios.iter().sum();
    if pool_size == 0 || total_weight <= 0.0 {
        return [0; 3];
    }

    let mut ideal = [0.0; 3];
    for i in 0..3 {
        ideal[i] = ratios[i] / total_weight * (pool_size as f64);
    }

    // How far each difficulty falls short: its ideal share of the pool divided by its
    // actual share. Empty difficulties impose no constraint.
    let max_ratio = (0..3)
        .filter(|&i| available[i] > 0)
        .map(|i| ideal[i] / (available[i] as f64))
        .fold(0.0, f64::max);
    let scale = if max_ratio > 1.0 { 1.0 / max_ratio } else { 1.0 };

    let mut scaled = [0.0; 3];
    for i in 0..3 {
        if available[i] > 0 {
            scaled[i] = ideal[i] * scale;
        }
    }

    let total = scaled.iter().sum::<f64>().round() as usize;
    let last = (0..3).rev().find(|&i| available[i] > 0);

    let mut counts = [0; 3];
    let mut assigned = 0;
    for i in 0..3 {
        if available[i] == 0 {
            continue;
        }

        let target = if Some(i) == last {
            total.saturating_sub(assigned)
        } else {
            scaled[i].round() as usize
        };
        counts[i] = cmp::min(target, available[i]);
        assigned += counts[i];
    }
    counts
}


/// Return a pool drawn from `pool` whose difficulty mix suits a player of age `age`.
///
/// Without an age (or with an age of zero) `pool` is returned as it is. The result never
/// contains a question twice and never contains a question that is not in `pool`, but it
/// may be shorter than `pool`.
pub fn build_weighted_pool<R: Rng + ?Sized>(
    pool: &[Question],
    age: Option<u32>,
    rng: &mut R,
) -> Vec<Question> {
    let age = match age {
        Some(age) if age > 0 => age,
        _ => {
            return pool.to_vec();
        }
    };

    if pool.len() == 0 {
        return Vec::new();
    }

    let mut buckets: Vec<Vec<Question>> = vec![Vec::new(), Vec::new(), Vec::new()];
    for question in pool.iter() {
        buckets[question.difficulty.index()].push(question.clone());
    }

    let available = [buckets[0].len(), buckets[1].len(), buckets[2].len()];
    let weights = get_age_weights(Some(age));
    let counts = bucket_counts(available, weights.as_array());

    let mut weighted = Vec::new();
    for difficulty in Difficulty::ALL.iter() {
        let i = difficulty.index();
        let bucket = shuffle(&buckets[i], rng);
        weighted.extend(bucket.into_iter().take(counts[i]));
    }

    debug!(
        "weighted pool for age {}: {} of {} questions ({} easy, {} medium, {} hard)",
        age, weighted.len(), pool.len(), counts[0], counts[1], counts[2],
    );
    shuffle(&weighted, rng)
}
