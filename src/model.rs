//! The analysis front door: one call takes a match history, a fixture request and a
//! configuration, and yields the 1X2 probability triple, the rates behind it, a quality tag,
//! and the value assessments for whichever prices were supplied. Every call is an
//! independent pure computation; nothing is cached or mutated between calls.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::data::MatchHistory;
use crate::rates::{estimate_rates, FixtureError, RateConfig, RateEstimate, SampleQuality};
use crate::scoregrid::{outcome_probs, DegenerateError, Outcome, ScoregridConfig, OUTCOMES};
use crate::value::{assess, ValueAssessment, ValueConfig};

#[derive(Clone, Debug, Default)]
pub struct Config {
    pub rates: RateConfig,
    pub scoregrid: ScoregridConfig,
    pub value: ValueConfig,
}

/// One upcoming fixture plus whatever 1X2 prices the caller holds, in
/// `[home, draw, away]` order. Prices are optional throughout; an absent price simply
/// produces no assessment for that outcome.
#[derive(Clone, Debug)]
pub struct FixtureRequest {
    pub home_team: String,
    pub away_team: String,
    pub prices: [Option<f64>; 3],

    /// Overrides the configured lookback window for this request only.
    pub window: Option<usize>,
}

#[derive(Clone, Debug, Serialize)]
pub struct OutcomeAssessment {
    pub outcome: Outcome,
    pub assessment: ValueAssessment,
}

/// Qualifying value candidates ranked by edge: the best surfaces as the primary
/// recommendation, the rest trail as secondary suggestions.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Recommendation {
    pub primary: Option<OutcomeAssessment>,
    pub secondary: Vec<OutcomeAssessment>,
}

#[derive(Debug, Serialize)]
pub struct Analysis {
    pub probs: [f64; 3],
    pub rates: RateEstimate,
    pub sample_quality: SampleQuality,
    pub assessments: Vec<OutcomeAssessment>,
    pub recommendation: Recommendation,
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("{0}")]
    InvalidFixture(#[from] FixtureError),

    #[error("{0}")]
    DegenerateDistribution(#[from] DegenerateError),
}

pub fn analyse(
    history: &MatchHistory,
    request: &FixtureRequest,
    config: &Config,
) -> Result<Analysis, AnalysisError> {
    let rate_config = match request.window {
        None => config.rates.clone(),
        Some(window) => RateConfig {
            window,
            ..config.rates.clone()
        },
    };
    let (rates, sample_quality) =
        estimate_rates(history, &request.home_team, &request.away_team, &rate_config)?;
    let probs = outcome_probs(&rates, &config.scoregrid)?;
    debug!(
        "{} v {}: rates {rates:?}, probs {probs:?} ({sample_quality} quality)",
        request.home_team, request.away_team
    );

    let assessments: Vec<_> = OUTCOMES
        .iter()
        .filter_map(|&outcome| {
            assess(probs[outcome.index()], request.prices[outcome.index()], &config.value).map(
                |assessment| OutcomeAssessment {
                    outcome,
                    assessment,
                },
            )
        })
        .collect();

    let mut candidates: Vec<_> = assessments
        .iter()
        .filter(|candidate| candidate.assessment.qualifies(&config.value))
        .cloned()
        .collect();
    candidates.sort_by(|a, b| b.assessment.edge.total_cmp(&a.assessment.edge));
    let mut candidates = candidates.into_iter();
    let recommendation = Recommendation {
        primary: candidates.next(),
        secondary: candidates.collect(),
    };

    Ok(Analysis {
        probs,
        rates,
        sample_quality,
        assessments,
        recommendation,
    })
}

#[cfg(test)]
mod tests;
