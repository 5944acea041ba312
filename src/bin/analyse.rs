use std::env;
use std::error::Error;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use stanza::style::{HAlign, Header, MinWidth, Styles};
use stanza::table::{Cell, Col, Row, Table};
use tracing::{debug, info};

use strikely::data::MatchHistory;
use strikely::factorial::Lookup;
use strikely::linear::Matrix;
use strikely::model::{analyse, Analysis, Config, FixtureRequest};
use strikely::scoregrid;

/// Analyses one fixture against a historical results file: 1X2 probabilities from a Poisson
/// scoregrid, and value assessments for any supplied prices.
#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// CSV file of historical results (canonical columns: HomeTeam, AwayTeam, FTHG, FTAG)
    data: Option<PathBuf>,

    /// home team identifier, as it appears in the data
    #[clap(long)]
    home: Option<String>,

    /// away team identifier, as it appears in the data
    #[clap(long)]
    away: Option<String>,

    /// quoted decimal price for the home win
    #[clap(long = "price-home")]
    price_home: Option<f64>,

    /// quoted decimal price for the draw
    #[clap(long = "price-draw")]
    price_draw: Option<f64>,

    /// quoted decimal price for the away win
    #[clap(long = "price-away")]
    price_away: Option<f64>,

    /// lookback window override (most recent qualifying matches per side)
    #[clap(short = 'w', long)]
    window: Option<usize>,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        self.data
            .as_ref()
            .ok_or(anyhow!("data file must be specified"))?;
        self.home.as_ref().ok_or(anyhow!("home team must be specified"))?;
        self.away.as_ref().ok_or(anyhow!("away team must be specified"))?;
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    args.validate()?;
    debug!("args: {args:?}");

    let data = args.data.unwrap();
    let history = match data.extension().and_then(|extension| extension.to_str()) {
        Some("json") => MatchHistory::read_json(&data)?,
        _ => MatchHistory::read_csv(&data)?,
    };
    info!("loaded {} results covering {} teams", history.len(), history.teams().len());

    let request = FixtureRequest {
        home_team: args.home.unwrap(),
        away_team: args.away.unwrap(),
        prices: [args.price_home, args.price_draw, args.price_away],
        window: args.window,
    };
    let config = Config::default();
    let analysis = analyse(&history, &request, &config)?;

    let dim = config.scoregrid.max_goals as usize + 1;
    let mut grid = Matrix::allocate(dim, dim);
    scoregrid::from_poisson(analysis.rates.home, analysis.rates.away, &Lookup::default(), &mut grid);
    debug!("scoregrid:\n{}", grid.verbose());
    info!(
        "most likely score: {:?}, sample quality: {}",
        scoregrid::most_likely_score(&grid),
        analysis.sample_quality
    );

    let probs_table = tabulate_probs(&analysis);
    println!("{}", Console::default().render(&probs_table));

    if analysis.assessments.is_empty() {
        info!("no prices supplied or none plausible; skipping value assessment");
        return Ok(());
    }
    let value_table = tabulate_value(&analysis);
    println!("{}", Console::default().render(&value_table));

    match &analysis.recommendation.primary {
        None => info!("no value detected at the supplied prices"),
        Some(primary) => {
            info!(
                "recommendation: {} at {:.2} (edge {:+.1}%, {})",
                primary.outcome,
                primary.assessment.price,
                primary.assessment.edge * 100.0,
                primary.assessment.confidence
            );
            for secondary in &analysis.recommendation.secondary {
                info!(
                    "also carries value: {} at {:.2} (edge {:+.1}%)",
                    secondary.outcome,
                    secondary.assessment.price,
                    secondary.assessment.edge * 100.0
                );
            }
        }
    }
    Ok(())
}

fn tabulate_probs(analysis: &Analysis) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Left)),
            Col::new(Styles::default().with(MinWidth(12))),
            Col::new(Styles::default().with(MinWidth(12))),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec!["Outcome".into(), "Probability".into(), "Fair price".into()],
        ));
    table.push_rows(scoregrid::OUTCOMES.iter().map(|outcome| {
        let prob = analysis.probs[outcome.index()];
        Row::new(
            Styles::default(),
            vec![
                Cell::new(Styles::default(), format!("{outcome}").into()),
                Cell::new(Styles::default().with(HAlign::Right), format!("{:.1}%", prob * 100.0).into()),
                Cell::new(Styles::default().with(HAlign::Right), format!("{:.2}", 1.0 / prob).into()),
            ],
        )
    }));
    table
}

fn tabulate_value(analysis: &Analysis) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Left)),
            Col::new(Styles::default().with(MinWidth(8))),
            Col::new(Styles::default().with(MinWidth(10))),
            Col::new(Styles::default().with(MinWidth(8))),
            Col::new(Styles::default().with(MinWidth(12))),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "Outcome".into(),
                "Price".into(),
                "Fair price".into(),
                "Edge".into(),
                "Confidence".into(),
            ],
        ));
    table.push_rows(analysis.assessments.iter().map(|candidate| {
        Row::new(
            Styles::default(),
            vec![
                Cell::new(Styles::default(), format!("{}", candidate.outcome).into()),
                Cell::new(Styles::default().with(HAlign::Right), format!("{:.2}", candidate.assessment.price).into()),
                Cell::new(Styles::default().with(HAlign::Right), format!("{:.2}", candidate.assessment.fair_price).into()),
                Cell::new(Styles::default().with(HAlign::Right), format!("{:+.1}%", candidate.assessment.edge * 100.0).into()),
                Cell::new(Styles::default(), format!("{}", candidate.assessment.confidence).into()),
            ],
        )
    }));
    table
}
