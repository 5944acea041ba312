//! The historical results substrate: immutable match records grouped into a per-competition
//! history that the rate estimator queries. Construction from the canonical CSV shape
//! (`HomeTeam, AwayTeam, FTHG, FTAG`, optionally `Date` and `Div`) lives here. Anything
//! messier, like alias normalisation or column reconciliation, is the loader's problem,
//! not this crate's.

use std::io;
use std::path::Path;

use chrono::NaiveDate;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::csv::CsvReader;
use crate::file;

/// One completed fixture. Goals are full-time scores.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub home_team: String,
    pub away_team: String,
    pub home_goals: u8,
    pub away_goals: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub league: Option<String>,
}

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("missing column {0}")]
    MissingColumn(&'static str),
}

/// An ordered collection of records for one competition, oldest first. Team identifiers are
/// assumed canonical; lookups are exact.
#[derive(Debug, Default)]
pub struct MatchHistory {
    records: Vec<MatchRecord>,
    teams: FxHashSet<String>,
}

impl From<Vec<MatchRecord>> for MatchHistory {
    fn from(records: Vec<MatchRecord>) -> Self {
        let mut teams = FxHashSet::default();
        for record in &records {
            teams.insert(record.home_team.clone());
            teams.insert(record.away_team.clone());
        }
        Self { records, teams }
    }
}

impl MatchHistory {
    /// Reads a history from a CSV file bearing the canonical column names. Rows that fail to
    /// parse are dropped rather than failing the load; only an unreadable file or a missing
    /// mandatory column is fatal.
    pub fn read_csv(path: impl AsRef<Path>) -> Result<Self, HistoryError> {
        let mut reader = CsvReader::open(path)?;
        let header = match reader.read() {
            None => return Ok(Self::default()),
            Some(header) => header?,
        };
        let locate = |name: &'static str| {
            header
                .iter()
                .position(|col| col.trim() == name)
                .ok_or(HistoryError::MissingColumn(name))
        };
        let home_team_col = locate("HomeTeam")?;
        let away_team_col = locate("AwayTeam")?;
        let home_goals_col = locate("FTHG")?;
        let away_goals_col = locate("FTAG")?;
        let date_col = header.iter().position(|col| col.trim() == "Date");
        let league_col = header.iter().position(|col| col.trim() == "Div");

        let mut records = vec![];
        let mut dropped = 0;
        for row in reader {
            let row = row?;
            match parse_row(
                &row,
                home_team_col,
                away_team_col,
                home_goals_col,
                away_goals_col,
                date_col,
                league_col,
            ) {
                None => dropped += 1,
                Some(record) => records.push(record),
            }
        }
        if dropped > 0 {
            debug!("dropped {dropped} incomplete rows");
        }
        Ok(Self::from(records))
    }

    /// Reads a history from a JSON snapshot of records, as written by serde.
    pub fn read_json(path: impl AsRef<Path>) -> Result<Self, HistoryError> {
        let records: Vec<MatchRecord> = file::read_json(path)?;
        Ok(Self::from(records))
    }

    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains_team(&self, team: &str) -> bool {
        self.teams.contains(team)
    }

    /// All distinct team identifiers, sorted for stable presentation.
    pub fn teams(&self) -> Vec<&str> {
        let mut teams: Vec<_> = self.teams.iter().map(String::as_str).collect();
        teams.sort_unstable();
        teams
    }

    /// The given team's home appearances, in history order (oldest first).
    pub fn home_matches<'a>(&'a self, team: &'a str) -> impl Iterator<Item = &'a MatchRecord> {
        self.records.iter().filter(move |record| record.home_team == team)
    }

    /// The given team's away appearances, in history order (oldest first).
    pub fn away_matches<'a>(&'a self, team: &'a str) -> impl Iterator<Item = &'a MatchRecord> {
        self.records.iter().filter(move |record| record.away_team == team)
    }
}

fn parse_row(
    row: &[String],
    home_team_col: usize,
    away_team_col: usize,
    home_goals_col: usize,
    away_goals_col: usize,
    date_col: Option<usize>,
    league_col: Option<usize>,
) -> Option<MatchRecord> {
    let field = |col: usize| row.get(col).map(|field| field.trim()).filter(|field| !field.is_empty());
    let home_team = field(home_team_col)?;
    let away_team = field(away_team_col)?;
    let home_goals = field(home_goals_col)?.parse().ok()?;
    let away_goals = field(away_goals_col)?.parse().ok()?;
    let date = date_col.and_then(field).and_then(parse_date);
    let league = league_col.and_then(field).map(ToString::to_string);
    Some(MatchRecord {
        home_team: home_team.to_string(),
        away_team: away_team.to_string(),
        home_goals,
        away_goals,
        date,
        league,
    })
}

// Source files carry both two- and four-digit years.
fn parse_date(field: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(field, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(field, "%d/%m/%y"))
        .ok()
}
