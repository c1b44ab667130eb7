//! Turning a match selection into a predicted winner.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    artifacts::Artifacts,
    features::{EncodedMatch, EncodedTeam, FeatureRow, HeadToHead, TossDecision},
    teams::Team,
    validation::check_distinct_teams,
};

/// What the user picked on the form. Teams are short codes (`"MI"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSelection {
    pub team1: String,
    pub team2: String,
    pub toss_winner: String,
    pub toss_decision: TossDecision,
    pub venue: String,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PredictError {
    #[error("Please select different teams.")]
    SameTeams,
    #[error("Unknown team code `{0}`.")]
    UnknownTeam(String),
    #[error("The {encoder} encoder has never seen `{label}`.")]
    UnknownLabel {
        encoder: &'static str,
        label: String,
    },
    #[error(
        "The model predicted label {label}, but only {classes} classes are known."
    )]
    LabelOutOfRange { label: usize, classes: usize },
}

impl PredictError {
    /// Whether the request itself was at fault, as opposed to the artifacts
    /// disagreeing with each other.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PredictError::SameTeams
                | PredictError::UnknownTeam(_)
                | PredictError::UnknownLabel { .. }
        )
    }
}

/// A percentage rounded to two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Confidence(f64);

impl Confidence {
    pub fn from_probability(p: f64) -> Self {
        let pct = (100.0 * p).clamp(0.0, 100.0);
        Confidence((pct * 100.0).round() / 100.0)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Confidence {
    // keeps a trailing `.0` on whole numbers, so 69 prints as `69.0`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub team1: Team,
    pub team2: Team,
    pub toss_winner: Team,
    pub toss_decision: TossDecision,
    pub venue: String,
    /// Full name, as decoded by the team encoder.
    pub winner: String,
    pub confidence: Confidence,
    pub features: FeatureRow,
    pub head_to_head: Option<HeadToHead>,
}

fn resolve(code: &str) -> Result<Team, PredictError> {
    Team::by_code(code).ok_or_else(|| PredictError::UnknownTeam(code.to_string()))
}

impl Artifacts {
    fn encode_team(&self, team: Team) -> Result<EncodedTeam<'static>, PredictError> {
        let code = self.team_encoder.transform(team.name).ok_or_else(|| {
            PredictError::UnknownLabel {
                encoder: "team",
                label: team.name.to_string(),
            }
        })?;
        Ok(EncodedTeam {
            code,
            name: team.name,
        })
    }

    pub fn head_to_head(&self, team1: &str, team2: &str) -> Option<HeadToHead> {
        self.tables.head_to_head.lookup(team1, team2)
    }

    #[tracing::instrument(skip(self))]
    pub fn predict_winner(
        &self,
        selection: &MatchSelection,
    ) -> Result<Prediction, PredictError> {
        check_distinct_teams(&selection.team1, &selection.team2)?;

        let team1 = resolve(&selection.team1)?;
        let team2 = resolve(&selection.team2)?;
        let toss_winner = resolve(&selection.toss_winner)?;

        let venue = self.venue_encoder.transform(&selection.venue).ok_or_else(
            || PredictError::UnknownLabel {
                encoder: "venue",
                label: selection.venue.clone(),
            },
        )?;

        let encoded = EncodedMatch {
            team1: self.encode_team(team1)?,
            team2: self.encode_team(team2)?,
            toss_winner: self.encode_team(toss_winner)?,
            toss_decision: selection.toss_decision,
            venue,
        };
        let features = self.tables.feature_row(&encoded);

        let proba = self.model.predict_proba(features.values());
        let label = self.model.predict(features.values());

        let out_of_range = PredictError::LabelOutOfRange {
            label,
            classes: self.team_encoder.classes().len().min(proba.len()),
        };
        let winner = self
            .team_encoder
            .inverse_transform(label)
            .ok_or_else(|| out_of_range.clone())?;
        let p = *proba.get(label).ok_or(out_of_range)?;
        let confidence = Confidence::from_probability(p);

        tracing::info!(
            team1 = team1.code,
            team2 = team2.code,
            winner,
            %confidence,
            "Predicted winner"
        );

        Ok(Prediction {
            team1,
            team2,
            toss_winner,
            toss_decision: selection.toss_decision,
            venue: selection.venue.clone(),
            winner: winner.to_string(),
            confidence,
            features,
            head_to_head: self.head_to_head(team1.code, team2.code),
        })
    }
}
