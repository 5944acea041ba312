//! Expected-goals rate estimation from a side's recent scoring record. The home side is
//! profiled on its home appearances only and the away side on its road appearances only,
//! each capped to a lookback window; thin samples fall back to a conservative fixed pair
//! rather than trusting a mean over a handful of matches.

use std::ops::RangeInclusive;

use serde::Serialize;
use strum_macros::Display;
use thiserror::Error;
use tracing::debug;

use crate::data::MatchHistory;

/// Expected goals for each side of an upcoming fixture.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RateEstimate {
    pub home: f64,
    pub away: f64,
}

/// How much trust to place in the estimate, from the number of qualifying matches that
/// backed it.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum SampleQuality {
    Low,
    Medium,
    High,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Weighting {
    /// Plain per-match mean.
    #[default]
    Uniform,

    /// Ascending linear weights, oldest = 1 .. newest = N.
    LinearRecency,
}

#[derive(Clone, Debug)]
pub struct RateConfig {
    /// Most recent qualifying matches considered per side.
    pub window: usize,

    /// Below this many qualifying matches on either side, `fallback` is returned verbatim.
    pub min_sample: usize,

    /// At or above this many qualifying matches, the estimate is tagged [`SampleQuality::High`].
    pub high_sample: usize,

    pub fallback: RateEstimate,
    pub lambda_bounds: RangeInclusive<f64>,
    pub weighting: Weighting,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            window: 10,
            min_sample: 5,
            high_sample: 8,
            fallback: RateEstimate { home: 1.2, away: 1.0 },
            lambda_bounds: 0.4..=3.0,
            weighting: Weighting::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("home and away sides are both {0}")]
    IdenticalTeams(String),

    #[error("no such team {0}")]
    UnknownTeam(String),
}

/// Derives the expected-goals pair for `home_team` at home to `away_team`. Pure function of
/// its inputs; a thin sample degrades to the configured fallback rather than erring.
pub fn estimate_rates(
    history: &MatchHistory,
    home_team: &str,
    away_team: &str,
    config: &RateConfig,
) -> Result<(RateEstimate, SampleQuality), FixtureError> {
    if home_team == away_team {
        return Err(FixtureError::IdenticalTeams(home_team.to_string()));
    }
    for team in [home_team, away_team] {
        if !history.contains_team(team) {
            return Err(FixtureError::UnknownTeam(team.to_string()));
        }
    }

    let home_scored = recent_goals(
        history.home_matches(home_team).map(|record| record.home_goals),
        config.window,
    );
    let away_scored = recent_goals(
        history.away_matches(away_team).map(|record| record.away_goals),
        config.window,
    );

    let sample = usize::min(home_scored.len(), away_scored.len());
    if sample < config.min_sample {
        debug!(
            "only {sample} qualifying matches for {home_team} v {away_team}; using fallback rates"
        );
        return Ok((config.fallback, SampleQuality::Low));
    }

    let estimate = RateEstimate {
        home: clamp(mean(&home_scored, config.weighting), &config.lambda_bounds),
        away: clamp(mean(&away_scored, config.weighting), &config.lambda_bounds),
    };
    let quality = if sample >= config.high_sample {
        SampleQuality::High
    } else {
        SampleQuality::Medium
    };
    debug!(
        "estimated rates {estimate:?} for {home_team} v {away_team} over {sample} matches ({quality})"
    );
    Ok((estimate, quality))
}

/// Goals scored in the most recent `window` matches, oldest first.
fn recent_goals(scored: impl Iterator<Item = u8>, window: usize) -> Vec<u8> {
    let mut goals: Vec<_> = scored.collect();
    if goals.len() > window {
        goals.drain(..goals.len() - window);
    }
    goals
}

fn mean(goals: &[u8], weighting: Weighting) -> f64 {
    match weighting {
        Weighting::Uniform => {
            goals.iter().map(|&goals| goals as f64).sum::<f64>() / goals.len() as f64
        }
        Weighting::LinearRecency => {
            let mut weighted_sum = 0.0;
            let mut weight_sum = 0.0;
            for (index, &goals) in goals.iter().enumerate() {
                let weight = (index + 1) as f64;
                weighted_sum += weight * goals as f64;
                weight_sum += weight;
            }
            weighted_sum / weight_sum
        }
    }
}

fn clamp(value: f64, bounds: &RangeInclusive<f64>) -> f64 {
    value.clamp(*bounds.start(), *bounds.end())
}
