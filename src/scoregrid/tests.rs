use super::*;
use assert_float_eq::*;

fn poisson_grid(lambda_home: f64, lambda_away: f64, max_goals: u8) -> Matrix {
    let dim = max_goals as usize + 1;
    let mut scoregrid = Matrix::allocate(dim, dim);
    from_poisson(lambda_home, lambda_away, &Lookup::default(), &mut scoregrid);
    scoregrid
}

#[test]
fn gather_partitions_the_grid() {
    let scoregrid = poisson_grid(1.5, 1.1, 5);
    let home = Outcome::Win(Side::Home).gather(&scoregrid);
    let draw = Outcome::Draw.gather(&scoregrid);
    let away = Outcome::Win(Side::Away).gather(&scoregrid);
    assert_float_absolute_eq!(scoregrid.flatten().sum(), home + draw + away, 1e-12);
}

#[test]
fn truncated_grid_leaves_residual_mass() {
    let scoregrid = poisson_grid(1.5, 1.1, 5);
    let total = scoregrid.flatten().sum();
    assert!(total < 1.0, "truncated total {total} should fall short of 1");
    assert!(total > 0.95, "residual mass beyond the cutoff should be negligible, total {total}");
}

#[test]
fn normalisation_holds_across_rate_grid() {
    // the final triple sums to one even after the draw clamp
    let config = ScoregridConfig::default();
    for lambda_home in [0.4, 0.8, 1.2, 1.6, 2.0, 2.4, 2.8] {
        for lambda_away in [0.4, 0.8, 1.2, 1.6, 2.0, 2.4, 2.8] {
            let rates = RateEstimate {
                home: lambda_home,
                away: lambda_away,
            };
            let probs = outcome_probs(&rates, &config).unwrap();
            assert_float_absolute_eq!(1.0, probs.sum(), 1e-9);
            for prob in probs {
                assert!((0.0..=1.0).contains(&prob), "{probs:?}");
            }
        }
    }
}

#[test]
fn draw_stays_within_band_for_moderate_rates() {
    // for mainstream rate pairs the renormalisation shifts the clamped draw by under 0.01
    let config = ScoregridConfig::default();
    for (lambda_home, lambda_away) in [(1.5, 1.1), (2.0, 1.0), (3.0, 0.4), (2.5, 2.5), (1.0, 1.0)] {
        let rates = RateEstimate {
            home: lambda_home,
            away: lambda_away,
        };
        let probs = outcome_probs(&rates, &config).unwrap();
        let draw = probs[Outcome::Draw.index()];
        assert!(
            draw >= config.draw_band.start() - 0.01 && draw <= config.draw_band.end() + 0.01,
            "draw {draw} outside band for rates {rates:?}"
        );
    }
}

#[test]
fn draw_heavy_rates_are_pulled_towards_ceiling() {
    // at very low equal rates the raw draw mass far exceeds the band; the clamp must shed
    // most of it, with the second normalisation overshooting in proportion to the shed mass
    let scoregrid = poisson_grid(0.4, 0.4, 5);
    let mut raw = [
        Outcome::Win(Side::Home).gather(&scoregrid),
        Outcome::Draw.gather(&scoregrid),
        Outcome::Win(Side::Away).gather(&scoregrid),
    ];
    raw.normalise(1.0);
    let raw_draw = raw[Outcome::Draw.index()];
    assert!(raw_draw > 0.5, "raw draw {raw_draw}");

    let config = ScoregridConfig::default();
    let probs = outcome_probs(&RateEstimate { home: 0.4, away: 0.4 }, &config).unwrap();
    let draw = probs[Outcome::Draw.index()];
    assert!(draw < raw_draw);
    assert_float_absolute_eq!(
        config.draw_band.end() / (1.0 - raw_draw + config.draw_band.end()),
        draw,
        1e-9
    );
}

#[test]
fn equal_rates_are_symmetric_before_clamp() {
    // joint-distribution symmetry, independent of the draw heuristic
    for lambda in [0.4, 1.0, 1.7, 2.6] {
        let scoregrid = poisson_grid(lambda, lambda, 6);
        let home = Outcome::Win(Side::Home).gather(&scoregrid);
        let away = Outcome::Win(Side::Away).gather(&scoregrid);
        assert_float_absolute_eq!(home, away, 1e-12);
    }
}

#[test]
fn favourite_prevails() {
    let rates = RateEstimate { home: 1.5, away: 1.1 };
    let config = ScoregridConfig {
        max_goals: 6,
        ..ScoregridConfig::default()
    };
    let probs = outcome_probs(&rates, &config).unwrap();
    let (home, draw, away) = (probs[0], probs[1], probs[2]);
    assert!(home > away, "{probs:?}");
    assert!((0.15..=0.30).contains(&draw), "{probs:?}");
    assert_float_absolute_eq!(1.0, probs.sum(), 1e-9);
}

#[test]
fn empty_grid_is_degenerate() {
    let scoregrid = Matrix::allocate(6, 6);
    let result = aggregate(&scoregrid, &(0.15..=0.30));
    assert!(matches!(result, Err(DegenerateError { rows: 6, cols: 6 })));
}

#[test]
fn most_likely_score_tracks_the_mode() {
    let scoregrid = poisson_grid(1.5, 1.1, 5);
    assert_eq!(Score::new(1, 1), most_likely_score(&scoregrid));

    let scoregrid = poisson_grid(3.0, 0.4, 5);
    let score = most_likely_score(&scoregrid);
    assert!(score.home > score.away, "{score:?}");
}

#[test]
fn outcome_display() {
    assert_eq!("Home win", Outcome::Win(Side::Home).to_string());
    assert_eq!("Draw", Outcome::Draw.to_string());
    assert_eq!("Away win", Outcome::Win(Side::Away).to_string());
}
