//! Per-team reference tables computed by the training pipeline.
//!
//! Rows are keyed by the team's encoded code (as the pipeline wrote them),
//! though a row keyed by the team's full name is accepted too. Where a team
//! appears more than once, the first row wins.

use std::{collections::HashMap, io::Read};

use serde::Deserialize;

use crate::artifacts::ArtifactError;

#[derive(Debug, Deserialize)]
struct BattingRow {
    team: String,
    batting_strength: f64,
}

#[derive(Debug, Deserialize)]
struct HomeAwayRow {
    team: String,
    home_win_percentage: f64,
    away_win_percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HomeAway {
    pub home_win_pct: f64,
    pub away_win_pct: f64,
}

#[derive(Debug, Clone)]
pub struct TeamTable<T> {
    rows: HashMap<String, T>,
}

impl<T> Default for TeamTable<T> {
    fn default() -> Self {
        TeamTable {
            rows: HashMap::new(),
        }
    }
}

impl<T: Copy> TeamTable<T> {
    fn insert_first(&mut self, team: String, value: T) {
        self.rows.entry(team.trim().to_string()).or_insert(value);
    }

    /// Looks a team up by its encoded code, then by its full name.
    pub fn get(&self, code: u32, name: &str) -> Option<T> {
        self.rows
            .get(&code.to_string())
            .or_else(|| self.rows.get(name))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub type BattingStrength = TeamTable<f64>;
pub type HomeAwayTable = TeamTable<HomeAway>;

impl TeamTable<f64> {
    pub fn from_reader(reader: impl Read) -> Result<Self, ArtifactError> {
        let mut table = TeamTable::default();
        for row in csv::Reader::from_reader(reader).deserialize() {
            let row: BattingRow = row?;
            table.insert_first(row.team, row.batting_strength);
        }
        Ok(table)
    }
}

impl TeamTable<HomeAway> {
    pub fn from_reader(reader: impl Read) -> Result<Self, ArtifactError> {
        let mut table = TeamTable::default();
        for row in csv::Reader::from_reader(reader).deserialize() {
            let row: HomeAwayRow = row?;
            table.insert_first(
                row.team,
                HomeAway {
                    home_win_pct: row.home_win_percentage,
                    away_win_pct: row.away_win_percentage,
                },
            );
        }
        Ok(table)
    }
}
