//! Assembly of the nine-column feature row the classifier was trained on.

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod head_to_head;
pub mod reference;

pub use head_to_head::{HeadToHead, HeadToHeadTable};
pub use reference::{BattingStrength, HomeAway, HomeAwayTable};

/// Used when a team has no row in the batting-strength table.
pub const DEFAULT_BATTING_STRENGTH: f64 = 130.0;
/// Used when a team has no row in the home/away table.
pub const DEFAULT_WIN_PCT: f64 = 50.0;

pub const FEATURE_COLUMNS: [&str; 9] = [
    "team1",
    "team2",
    "toss_winner",
    "toss_decision",
    "venue",
    "team1_home_win_pct",
    "team2_away_win_pct",
    "team1_batting_strength",
    "team2_batting_strength",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TossDecision {
    Bat,
    Field,
}

impl TossDecision {
    pub fn code(self) -> u32 {
        match self {
            TossDecision::Bat => 0,
            TossDecision::Field => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TossDecision::Bat => "bat",
            TossDecision::Field => "field",
        }
    }
}

impl fmt::Display for TossDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A team after encoding: its trained code plus the full name, which the
/// reference tables may also be keyed by.
#[derive(Debug, Clone, Copy)]
pub struct EncodedTeam<'a> {
    pub code: u32,
    pub name: &'a str,
}

#[derive(Debug, Clone, Copy)]
pub struct EncodedMatch<'a> {
    pub team1: EncodedTeam<'a>,
    pub team2: EncodedTeam<'a>,
    pub toss_winner: EncodedTeam<'a>,
    pub toss_decision: TossDecision,
    pub venue: u32,
}

/// One row of model input, in [`FEATURE_COLUMNS`] order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRow(pub [f32; 9]);

impl FeatureRow {
    pub fn values(&self) -> &[f32] {
        &self.0
    }

    pub fn columns(&self) -> impl Iterator<Item = (&'static str, f32)> + '_ {
        FEATURE_COLUMNS.iter().copied().zip(self.0.iter().copied())
    }
}

/// The tables the training pipeline exported alongside the model.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTables {
    pub batting: BattingStrength,
    pub home_away: HomeAwayTable,
    pub head_to_head: HeadToHeadTable,
}

impl ReferenceTables {
    fn batting_strength(&self, team: EncodedTeam) -> f64 {
        self.batting.get(team.code, team.name).unwrap_or_else(|| {
            tracing::warn!(
                team = team.name,
                default = DEFAULT_BATTING_STRENGTH,
                "No batting strength recorded, using default"
            );
            DEFAULT_BATTING_STRENGTH
        })
    }

    fn home_away(&self, team: EncodedTeam) -> Option<HomeAway> {
        let row = self.home_away.get(team.code, team.name);
        if row.is_none() {
            tracing::warn!(
                team = team.name,
                default = DEFAULT_WIN_PCT,
                "No home/away record, using default"
            );
        }
        row
    }

    pub fn feature_row(&self, m: &EncodedMatch) -> FeatureRow {
        let team1_home = self
            .home_away(m.team1)
            .map_or(DEFAULT_WIN_PCT, |r| r.home_win_pct);
        let team2_away = self
            .home_away(m.team2)
            .map_or(DEFAULT_WIN_PCT, |r| r.away_win_pct);

        FeatureRow([
            m.team1.code as f32,
            m.team2.code as f32,
            m.toss_winner.code as f32,
            m.toss_decision.code() as f32,
            m.venue as f32,
            team1_home as f32,
            team2_away as f32,
            self.batting_strength(m.team1) as f32,
            self.batting_strength(m.team2) as f32,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> ReferenceTables {
        ReferenceTables {
            batting: BattingStrength::from_reader(
                "team,batting_strength\n5,168.5\n".as_bytes(),
            )
            .unwrap(),
            home_away: HomeAwayTable::from_reader(
                "team,home_win_percentage,away_win_percentage\n5,58.5,47\n0,61,52.5\n"
                    .as_bytes(),
            )
            .unwrap(),
            head_to_head: HeadToHeadTable::default(),
        }
    }

    fn team(code: u32, name: &str) -> EncodedTeam<'_> {
        EncodedTeam { code, name }
    }

    #[test]
    fn known_teams_use_table_values() {
        let row = tables().feature_row(&EncodedMatch {
            team1: team(5, "Mumbai Indians"),
            team2: team(0, "Chennai Super Kings"),
            toss_winner: team(0, "Chennai Super Kings"),
            toss_decision: TossDecision::Field,
            venue: 3,
        });
        assert_eq!(
            row,
            FeatureRow([5.0, 0.0, 0.0, 1.0, 3.0, 58.5, 52.5, 168.5, 130.0])
        );
    }

    #[test]
    fn absent_teams_fall_back_to_defaults() {
        let row = tables().feature_row(&EncodedMatch {
            team1: team(2, "Gujarat Titans"),
            team2: team(9, "Sunrisers Hyderabad"),
            toss_winner: team(2, "Gujarat Titans"),
            toss_decision: TossDecision::Bat,
            venue: 0,
        });
        assert_eq!(
            row,
            FeatureRow([2.0, 9.0, 2.0, 0.0, 0.0, 50.0, 50.0, 130.0, 130.0])
        );
    }

    #[test]
    fn home_value_for_team1_and_away_value_for_team2() {
        // team 0 is present in the home/away table; team 5 swaps in as team 2
        let row = tables().feature_row(&EncodedMatch {
            team1: team(0, "Chennai Super Kings"),
            team2: team(5, "Mumbai Indians"),
            toss_winner: team(5, "Mumbai Indians"),
            toss_decision: TossDecision::Bat,
            venue: 1,
        });
        let cols: Vec<_> = row.columns().collect();
        assert_eq!(cols[5], ("team1_home_win_pct", 61.0));
        assert_eq!(cols[6], ("team2_away_win_pct", 47.0));
        assert_eq!(cols[7], ("team1_batting_strength", 130.0));
        assert_eq!(cols[8], ("team2_batting_strength", 168.5));
    }

    #[test]
    fn toss_decision_codes() {
        assert_eq!(TossDecision::Bat.code(), 0);
        assert_eq!(TossDecision::Field.code(), 1);
        assert_eq!(TossDecision::Field.to_string(), "field");
    }
}
