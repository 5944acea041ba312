//! The Poisson probability mass function over goal counts.

use crate::factorial::Factorial;

/// Probability of exactly `k` goals for a side scoring at mean rate `lambda`.
#[inline]
pub fn univariate(k: u8, lambda: f64, factorial: &impl Factorial) -> f64 {
    lambda.powi(k as i32) * f64::exp(-lambda) / factorial.get(k) as f64
}
