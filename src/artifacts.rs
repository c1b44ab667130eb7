//! Loading of everything the predictor needs from disk: the classifier, the
//! two label encoders and the reference tables. All of it is read once at
//! start-up and shared read-only between requests.

use std::{
    fs::File,
    path::{Path, PathBuf},
    sync::Arc,
};

use thiserror::Error;

use crate::{
    config::ArtifactPaths,
    features::{
        BattingStrength, FEATURE_COLUMNS, HeadToHeadTable, HomeAwayTable,
        ReferenceTables,
    },
    model::{Classifier, LabelEncoder, TreeEnsemble},
    teams::TEAMS,
};

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("in {path}: {source}")]
    InFile {
        path: PathBuf,
        source: Box<ArtifactError>,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("encoder classes must be strictly ascending, found {first:?} before {second:?}")]
    UnsortedClasses { first: String, second: String },
    #[error("unsupported objective `{0}`")]
    UnsupportedObjective(String),
    #[error("unsupported booster `{0}`, only gbtree models can be loaded")]
    UnsupportedBooster(String),
    #[error("bad model parameter {name} = {value:?}")]
    BadParam { name: &'static str, value: String },
    #[error("tree {tree} is malformed: {reason}")]
    MalformedTree { tree: usize, reason: String },
    #[error("model expects {found} features, but {expected} are assembled")]
    FeatureCount { expected: usize, found: usize },
    #[error("model was trained on columns {found:?}, expected {expected:?}")]
    FeatureNames {
        expected: Vec<String>,
        found: Vec<String>,
    },
}

fn read_to_string(path: &Path) -> Result<String, ArtifactError> {
    std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn open(path: &Path) -> Result<File, ArtifactError> {
    File::open(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn in_file<T>(
    path: &Path,
    res: Result<T, ArtifactError>,
) -> Result<T, ArtifactError> {
    res.map_err(|e| ArtifactError::InFile {
        path: path.to_path_buf(),
        source: Box::new(e),
    })
}

/// The loaded model and everything needed to build its input.
#[derive(Clone)]
pub struct Artifacts {
    pub model: Arc<dyn Classifier>,
    pub team_encoder: LabelEncoder,
    pub venue_encoder: LabelEncoder,
    pub tables: ReferenceTables,
}

impl std::fmt::Debug for Artifacts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Artifacts")
            .field("n_features", &self.model.n_features())
            .field("teams", &self.team_encoder.classes().len())
            .field("venues", &self.venue_encoder.classes().len())
            .finish_non_exhaustive()
    }
}

impl Artifacts {
    #[tracing::instrument(skip_all)]
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ArtifactError> {
        let model = in_file(
            &paths.model,
            TreeEnsemble::from_json(&read_to_string(&paths.model)?),
        )?;
        let found = model.feature_names();
        if !found.is_empty() && !found.iter().eq(FEATURE_COLUMNS.iter()) {
            return Err(ArtifactError::FeatureNames {
                expected: FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect(),
                found: found.to_vec(),
            });
        }

        let team_encoder = in_file(
            &paths.team_encoder,
            LabelEncoder::from_json(&read_to_string(&paths.team_encoder)?),
        )?;
        let venue_encoder = in_file(
            &paths.venue_encoder,
            LabelEncoder::from_json(&read_to_string(&paths.venue_encoder)?),
        )?;

        let tables = ReferenceTables {
            batting: in_file(
                &paths.batting_strength,
                BattingStrength::from_reader(open(&paths.batting_strength)?),
            )?,
            home_away: in_file(
                &paths.home_away,
                HomeAwayTable::from_reader(open(&paths.home_away)?),
            )?,
            head_to_head: in_file(
                &paths.head_to_head,
                HeadToHeadTable::from_reader(open(&paths.head_to_head)?),
            )?,
        };

        tracing::info!(
            teams = team_encoder.classes().len(),
            venues = venue_encoder.classes().len(),
            batting_rows = tables.batting.len(),
            home_away_rows = tables.home_away.len(),
            head_to_head_rows = tables.head_to_head.len(),
            "Loaded artifacts"
        );

        Artifacts::new(Arc::new(model), team_encoder, venue_encoder, tables)
    }

    pub fn new(
        model: Arc<dyn Classifier>,
        team_encoder: LabelEncoder,
        venue_encoder: LabelEncoder,
        tables: ReferenceTables,
    ) -> Result<Self, ArtifactError> {
        if model.n_features() != FEATURE_COLUMNS.len() {
            return Err(ArtifactError::FeatureCount {
                expected: FEATURE_COLUMNS.len(),
                found: model.n_features(),
            });
        }

        for team in TEAMS.iter() {
            if team_encoder.transform(team.name).is_none() {
                tracing::warn!(
                    team = team.name,
                    "Team encoder has no class for this team; predictions involving it will fail"
                );
            }
        }

        Ok(Artifacts {
            model,
            team_encoder,
            venue_encoder,
            tables,
        })
    }

    /// Venue options for the form, sorted.
    pub fn venues(&self) -> &[String] {
        self.venue_encoder.classes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_paths() -> ArtifactPaths {
        ArtifactPaths::default()
            .resolve_against(Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures")))
    }

    #[test]
    fn loads_fixtures() {
        let artifacts = Artifacts::load(&fixture_paths()).unwrap();
        assert_eq!(artifacts.team_encoder.classes().len(), 10);
        assert_eq!(artifacts.venues()[0], "Arun Jaitley Stadium");
        assert_eq!(artifacts.tables.batting.len(), 4);
        assert_eq!(artifacts.tables.head_to_head.len(), 4);
    }

    #[test]
    fn missing_file_names_the_path() {
        let mut paths = fixture_paths();
        paths.home_away = paths.home_away.with_file_name("nope.csv");

        match Artifacts::load(&paths) {
            Err(ArtifactError::Io { path, .. }) => {
                assert!(path.ends_with("nope.csv"))
            }
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn encoder_errors_carry_the_file() {
        let mut paths = fixture_paths();
        // a CSV is not a JSON encoder
        paths.venue_encoder = paths.head_to_head.clone();

        let err = Artifacts::load(&paths).unwrap_err();
        assert!(matches!(err, ArtifactError::InFile { .. }));
        assert!(err.to_string().contains("head_to_head.csv"));
    }
}
