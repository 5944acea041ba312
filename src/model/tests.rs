use super::*;
use crate::data::MatchRecord;
use crate::scoregrid::Side;
use crate::value::Confidence;
use assert_float_eq::*;

fn fixture(home_team: &str, away_team: &str, home_goals: u8, away_goals: u8) -> MatchRecord {
    MatchRecord {
        home_team: home_team.to_string(),
        away_team: away_team.to_string(),
        home_goals,
        away_goals,
        date: None,
        league: None,
    }
}

fn history(home_scored: &[u8], away_scored: &[u8]) -> MatchHistory {
    let mut records = vec![];
    for (index, &goals) in home_scored.iter().enumerate() {
        records.push(fixture("Alpha", &format!("Filler{index}"), goals, 1));
    }
    for (index, &goals) in away_scored.iter().enumerate() {
        records.push(fixture(&format!("Host{index}"), "Bravo", 1, goals));
    }
    MatchHistory::from(records)
}

fn request(prices: [Option<f64>; 3]) -> FixtureRequest {
    FixtureRequest {
        home_team: "Alpha".to_string(),
        away_team: "Bravo".to_string(),
        prices,
        window: None,
    }
}

#[test]
fn end_to_end_value_detection() {
    // Alpha scores two per home match, Bravo one per away match: rates 2.0/1.0
    let history = history(&[2; 8], &[1; 8]);
    let config = Config::default();
    let analysis = analyse(
        &history,
        &request([Some(2.0), Some(3.0), Some(6.0)]),
        &config,
    )
    .unwrap();

    assert_eq!(RateEstimate { home: 2.0, away: 1.0 }, analysis.rates);
    assert_eq!(SampleQuality::High, analysis.sample_quality);
    assert_float_absolute_eq!(1.0, analysis.probs.iter().sum::<f64>(), 1e-9);
    assert!(analysis.probs[0] > analysis.probs[2], "{:?}", analysis.probs);

    assert_eq!(3, analysis.assessments.len());
    let home = &analysis.assessments[0];
    assert_eq!(Outcome::Win(Side::Home), home.outcome);
    assert!(home.assessment.edge > 0.18, "{:?}", home.assessment);
    assert_eq!(Confidence::Conviction, home.assessment.confidence);

    let draw = &analysis.assessments[1];
    assert_eq!(Outcome::Draw, draw.outcome);
    assert!(!draw.assessment.has_value(), "{:?}", draw.assessment);

    let away = &analysis.assessments[2];
    assert!(away.assessment.has_value(), "{:?}", away.assessment);

    // home carries the biggest edge; away still qualifies and trails as secondary
    let primary = analysis.recommendation.primary.as_ref().unwrap();
    assert_eq!(Outcome::Win(Side::Home), primary.outcome);
    assert_eq!(1, analysis.recommendation.secondary.len());
    assert_eq!(
        Outcome::Win(Side::Away),
        analysis.recommendation.secondary[0].outcome
    );
}

#[test]
fn thin_history_degrades_to_fallback() {
    // three qualifying home matches must not produce a three-sample mean
    let history = history(&[4, 4, 4], &[1; 8]);
    let config = Config::default();
    let analysis = analyse(&history, &request([None, None, None]), &config).unwrap();
    assert_eq!(config.rates.fallback, analysis.rates);
    assert_eq!(SampleQuality::Low, analysis.sample_quality);

    let expected = outcome_probs(&config.rates.fallback, &config.scoregrid).unwrap();
    assert_eq!(expected, analysis.probs);
}

#[test]
fn identical_teams_fail_the_request() {
    let history = history(&[1; 8], &[1; 8]);
    let request = FixtureRequest {
        home_team: "Alpha".to_string(),
        away_team: "Alpha".to_string(),
        prices: [None, None, None],
        window: None,
    };
    let result = analyse(&history, &request, &Config::default());
    assert!(matches!(
        result,
        Err(AnalysisError::InvalidFixture(FixtureError::IdenticalTeams(_)))
    ));
}

#[test]
fn malformed_prices_are_simply_absent() {
    let history = history(&[2; 8], &[1; 8]);
    let analysis = analyse(
        &history,
        &request([None, Some(1.01), Some(100.0)]),
        &Config::default(),
    )
    .unwrap();
    assert!(analysis.assessments.is_empty());
    assert!(analysis.recommendation.primary.is_none());
    assert!(analysis.recommendation.secondary.is_empty());
}

#[test]
fn request_window_overrides_config() {
    // plenty of history, but a three-match window starves the estimator into fallback
    let history = history(&[2; 8], &[1; 8]);
    let config = Config::default();
    let request = FixtureRequest {
        window: Some(3),
        ..request([None, None, None])
    };
    let analysis = analyse(&history, &request, &config).unwrap();
    assert_eq!(config.rates.fallback, analysis.rates);
    assert_eq!(SampleQuality::Low, analysis.sample_quality);
}

#[test]
fn analysis_serialises() {
    let history = history(&[2; 8], &[1; 8]);
    let analysis = analyse(
        &history,
        &request([Some(2.0), None, None]),
        &Config::default(),
    )
    .unwrap();
    let json = serde_json::to_value(&analysis).unwrap();
    assert!(json["probs"].is_array());
    assert_eq!("High", json["sample_quality"]);
    assert_eq!(
        "Conviction",
        json["recommendation"]["primary"]["assessment"]["confidence"]
    );
}
