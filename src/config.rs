use std::path::{Path, PathBuf};

use axum::{
    Router,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    predictions::{
        export::do_export, form::prediction_form_page, result::do_predict,
    },
    state::AppState,
};

pub const DEFAULT_BIND: &str = "127.0.0.1:8501";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub bind: String,
    pub artifacts: ArtifactPaths,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind: DEFAULT_BIND.to_string(),
            artifacts: ArtifactPaths::default(),
        }
    }
}

impl Config {
    /// Reads a config file. Relative artifact paths are taken relative to the
    /// directory the file is in.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw =
            std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let config: Config =
            toml::from_str(&raw).map_err(|source| ConfigError::Toml {
                path: path.to_path_buf(),
                source,
            })?;

        let base = path.parent().unwrap_or(Path::new("."));
        Ok(Config {
            bind: config.bind,
            artifacts: config.artifacts.resolve_against(base),
        })
    }
}

/// Where the trained artifacts and the logo directory live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub team_encoder: PathBuf,
    pub venue_encoder: PathBuf,
    pub batting_strength: PathBuf,
    pub home_away: PathBuf,
    pub head_to_head: PathBuf,
    pub logos: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        ArtifactPaths {
            model: "xgb_model.json".into(),
            team_encoder: "team_encoder.json".into(),
            venue_encoder: "venue_encoder.json".into(),
            batting_strength: "team_batting_strength.csv".into(),
            home_away: "home_away.csv".into(),
            head_to_head: "head_to_head.csv".into(),
            logos: "ipl_images".into(),
        }
    }
}

impl ArtifactPaths {
    pub fn resolve_against(self, base: &Path) -> Self {
        let join = |p: PathBuf| if p.is_absolute() { p } else { base.join(p) };
        ArtifactPaths {
            model: join(self.model),
            team_encoder: join(self.team_encoder),
            venue_encoder: join(self.venue_encoder),
            batting_strength: join(self.batting_strength),
            home_away: join(self.home_away),
            head_to_head: join(self.head_to_head),
            logos: join(self.logos),
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    let logos = ServeDir::new(&state.logos_dir);

    Router::new()
        .route("/", get(prediction_form_page))
        .route("/predict", post(do_predict))
        .route("/export", post(do_export))
        .nest_service("/logos", logos)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
