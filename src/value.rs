//! Comparison of modelled probabilities against quoted decimal prices. A price carries value
//! when it exceeds the fair (break-even) price implied by the probability; the expected
//! fractional return of backing it is the edge. Absent or implausible prices produce no
//! assessment at all rather than an error, and a conservative qualification criterion keeps
//! low-probability noise out of recommendations.

use std::ops::RangeInclusive;

use serde::Serialize;
use strum_macros::Display;

pub type PriceBounds = RangeInclusive<f64>;

/// Ordinal conviction tiers, weakest to strongest. Tier placement is a monotonic step
/// function of edge; the top tier additionally demands a high probability, so the
/// probability gate can only withhold it, never grant it early.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Confidence {
    Speculative,
    Cautious,
    Moderate,
    Strong,
    Conviction,
}
impl Confidence {
    /// One-based rating, `Speculative` = 1 .. `Conviction` = 5.
    pub fn rating(&self) -> u8 {
        *self as u8 + 1
    }
}

/// Edge breakpoints for the tiers above [`Confidence::Speculative`], plus the probability
/// gate on the top tier. Defined once so every caller grades identically.
#[derive(Clone, Debug)]
pub struct TierPolicy {
    /// Ascending minimum edge for `Cautious`, `Moderate` and `Strong`.
    pub edges: [f64; 3],

    /// Minimum probability for `Conviction`, which otherwise caps out at `Strong` even at
    /// the highest edges.
    pub top_min_prob: f64,
}

impl Default for TierPolicy {
    fn default() -> Self {
        Self {
            edges: [0.06, 0.12, 0.18],
            top_min_prob: 0.45,
        }
    }
}

impl TierPolicy {
    pub fn grade(&self, probability: f64, edge: f64) -> Confidence {
        let [cautious, moderate, strong] = self.edges;
        if edge >= strong && probability >= self.top_min_prob {
            Confidence::Conviction
        } else if edge >= strong {
            Confidence::Strong
        } else if edge >= moderate {
            Confidence::Moderate
        } else if edge >= cautious {
            Confidence::Cautious
        } else {
            Confidence::Speculative
        }
    }
}

#[derive(Clone, Debug)]
pub struct ValueConfig {
    /// Quotes outside these bounds are treated as absent, not as errors.
    pub price_bounds: PriceBounds,

    /// Probability floor of the conservative qualification criterion.
    pub min_prob: f64,

    /// Edge floor of the conservative qualification criterion.
    pub min_edge: f64,

    pub tiers: TierPolicy,
}

impl Default for ValueConfig {
    fn default() -> Self {
        Self {
            price_bounds: 1.20..=50.0,
            min_prob: 0.15,
            min_edge: 0.05,
            tiers: TierPolicy::default(),
        }
    }
}

/// One outcome's price weighed against its modelled probability.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ValueAssessment {
    pub probability: f64,
    pub price: f64,
    pub fair_price: f64,
    pub edge: f64,
    pub confidence: Confidence,
}
impl ValueAssessment {
    /// Positive expected value: the quoted price beats the fair price.
    pub fn has_value(&self) -> bool {
        self.edge > 0.0
    }

    /// The conservative criterion gating recommendations: enough probability and enough
    /// edge to be worth surfacing.
    pub fn qualifies(&self, config: &ValueConfig) -> bool {
        self.has_value() && self.probability >= config.min_prob && self.edge >= config.min_edge
    }
}

/// Weighs an optional quote against a probability. `None` means there is nothing to
/// evaluate: no quote, an implausible quote, or a nonpositive probability.
pub fn assess(probability: f64, price: Option<f64>, config: &ValueConfig) -> Option<ValueAssessment> {
    let price = price.filter(|price| config.price_bounds.contains(price))?;
    if probability <= 0.0 {
        return None;
    }
    let fair_price = 1.0 / probability;
    let edge = probability * price - 1.0;
    Some(ValueAssessment {
        probability,
        price,
        fair_price,
        edge,
        confidence: config.tiers.grade(probability, edge),
    })
}
