//! A Poisson scoregrid model of football 1X2 outcomes. Estimates a fixture's expected-goals
//! rates from each side's historical scoring record, expands the rates into a truncated joint
//! scoreline distribution, and compares the aggregated win/draw/win probabilities against
//! quoted prices to flag positive-expected-value bets.

pub mod csv;
pub mod data;
pub mod factorial;
pub mod file;
pub mod linear;
pub mod model;
pub mod poisson;
pub mod probs;
pub mod rates;
pub mod scoregrid;
pub mod value;

#[doc = include_str!("../README.md")]
#[cfg(doc)]
fn readme() {}
