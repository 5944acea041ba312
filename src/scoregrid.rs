//! Expansion of an expected-goals pair into a truncated joint scoreline distribution, and
//! aggregation of the grid into the three 1X2 outcome probabilities. Home and away goal
//! counts are modelled as independent Poisson variables; mass beyond the cutoff is
//! discarded and the aggregated triple renormalised. A naive Poisson model understates how
//! often mismatched sides draw, so the draw probability is additionally clamped to an
//! empirical band before a second renormalisation.

use serde::Serialize;
use std::ops::RangeInclusive;
use strum_macros::Display;
use thiserror::Error;

use crate::factorial::{Factorial, Lookup};
use crate::linear::Matrix;
use crate::poisson;
use crate::probs::SliceExt;
use crate::rates::RateEstimate;

#[derive(Clone, Copy, Debug, Display, Hash, PartialEq, Eq, Serialize)]
pub enum Side {
    Home,
    Away,
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Win(Side),
    Draw,
}
impl Outcome {
    /// Position of this outcome in a 1X2 probability triple.
    pub fn index(&self) -> usize {
        match self {
            Outcome::Win(Side::Home) => 0,
            Outcome::Draw => 1,
            Outcome::Win(Side::Away) => 2,
        }
    }

    /// Sums the scoregrid cells belonging to this outcome.
    pub fn gather(&self, scoregrid: &Matrix) -> f64 {
        let mut sum = 0.0;
        for home_goals in 0..scoregrid.rows() {
            for away_goals in 0..scoregrid.cols() {
                let matches = match self {
                    Outcome::Win(Side::Home) => home_goals > away_goals,
                    Outcome::Win(Side::Away) => home_goals < away_goals,
                    Outcome::Draw => home_goals == away_goals,
                };
                if matches {
                    sum += scoregrid[(home_goals, away_goals)];
                }
            }
        }
        sum
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Win(side) => write!(f, "{side} win"),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// The 1X2 outcomes in probability-triple order.
pub const OUTCOMES: [Outcome; 3] = [Outcome::Win(Side::Home), Outcome::Draw, Outcome::Win(Side::Away)];

#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Score {
    pub home: u8,
    pub away: u8,
}
impl Score {
    pub fn new(home: u8, away: u8) -> Self {
        Self { home, away }
    }
}

#[derive(Clone, Debug)]
pub struct ScoregridConfig {
    /// Scoreline cutoff per side, inclusive.
    pub max_goals: u8,

    /// Band the draw probability is clamped to after the first normalisation.
    pub draw_band: RangeInclusive<f64>,
}

impl Default for ScoregridConfig {
    fn default() -> Self {
        Self {
            max_goals: 5,
            draw_band: 0.15..=0.30,
        }
    }
}

#[derive(Debug, Error)]
#[error("no probability mass in a {rows}x{cols} score grid")]
pub struct DegenerateError {
    pub rows: usize,
    pub cols: usize,
}

/// Populates `scoregrid` with the joint mass of every scoreline up to its dimensions, with
/// goal counts independently Poisson-distributed at the given rates.
pub fn from_poisson(
    lambda_home: f64,
    lambda_away: f64,
    factorial: &impl Factorial,
    scoregrid: &mut Matrix,
) {
    for home_goals in 0..scoregrid.rows() {
        let home_prob = poisson::univariate(home_goals as u8, lambda_home, factorial);
        for away_goals in 0..scoregrid.cols() {
            scoregrid[(home_goals, away_goals)] =
                home_prob * poisson::univariate(away_goals as u8, lambda_away, factorial);
        }
    }
}

/// The single most probable scoreline in the grid.
pub fn most_likely_score(scoregrid: &Matrix) -> Score {
    let mut best = Score::new(0, 0);
    let mut best_prob = f64::MIN;
    for home_goals in 0..scoregrid.rows() {
        for away_goals in 0..scoregrid.cols() {
            let prob = scoregrid[(home_goals, away_goals)];
            if prob > best_prob {
                best_prob = prob;
                best = Score::new(home_goals as u8, away_goals as u8);
            }
        }
    }
    best
}

/// Collapses a populated scoregrid into the `[home, draw, away]` probability triple:
/// normalise the truncated sums, clamp the draw to the band, then normalise once more. The
/// second normalisation is what keeps the triple summing to one after the clamp; the clamp
/// itself may consequently be overshot in proportion to the mass it moved.
pub fn aggregate(
    scoregrid: &Matrix,
    draw_band: &RangeInclusive<f64>,
) -> Result<[f64; 3], DegenerateError> {
    let mut probs = [
        Outcome::Win(Side::Home).gather(scoregrid),
        Outcome::Draw.gather(scoregrid),
        Outcome::Win(Side::Away).gather(scoregrid),
    ];
    if probs.sum() == 0.0 {
        return Err(DegenerateError {
            rows: scoregrid.rows(),
            cols: scoregrid.cols(),
        });
    }
    probs.normalise(1.0);
    probs[Outcome::Draw.index()] =
        probs[Outcome::Draw.index()].clamp(*draw_band.start(), *draw_band.end());
    probs.normalise(1.0);
    Ok(probs)
}

/// End-to-end expansion of a rate pair into the 1X2 triple.
pub fn outcome_probs(
    rates: &RateEstimate,
    config: &ScoregridConfig,
) -> Result<[f64; 3], DegenerateError> {
    let factorial = Lookup::default();
    let dim = config.max_goals as usize + 1;
    let mut scoregrid = Matrix::allocate(dim, dim);
    from_poisson(rates.home, rates.away, &factorial, &mut scoregrid);
    aggregate(&scoregrid, &config.draw_band)
}

#[cfg(test)]
mod tests;
