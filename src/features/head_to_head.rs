use std::io::Read;

use serde::Deserialize;

use crate::artifacts::ArtifactError;

#[derive(Debug, Clone, Deserialize)]
struct HeadToHeadRow {
    team1: String,
    team2: String,
    matches: u32,
    team1_wins: u32,
    team2_wins: u32,
}

/// Historical record between two teams, oriented to the order they were
/// asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadToHead {
    pub matches: u32,
    pub first_wins: u32,
    pub second_wins: u32,
}

impl HeadToHead {
    pub fn swapped(self) -> Self {
        HeadToHead {
            matches: self.matches,
            first_wins: self.second_wins,
            second_wins: self.first_wins,
        }
    }
}

/// Head-to-head records keyed by team short code.
#[derive(Debug, Clone, Default)]
pub struct HeadToHeadTable {
    rows: Vec<HeadToHeadRow>,
}

impl HeadToHeadTable {
    pub fn from_reader(reader: impl Read) -> Result<Self, ArtifactError> {
        let rows = csv::Reader::from_reader(reader)
            .deserialize()
            .collect::<Result<Vec<HeadToHeadRow>, _>>()?;
        Ok(HeadToHeadTable { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Finds the first row recording `a` against `b`, in either order.
    pub fn lookup(&self, a: &str, b: &str) -> Option<HeadToHead> {
        self.rows.iter().find_map(|row| {
            if row.team1 == a && row.team2 == b {
                Some(HeadToHead {
                    matches: row.matches,
                    first_wins: row.team1_wins,
                    second_wins: row.team2_wins,
                })
            } else if row.team1 == b && row.team2 == a {
                Some(HeadToHead {
                    matches: row.matches,
                    first_wins: row.team2_wins,
                    second_wins: row.team1_wins,
                })
            } else {
                None
            }
        })
    }
}
