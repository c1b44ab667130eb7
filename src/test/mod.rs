//! End-to-end tests running the predictor against the artifacts in
//! `fixtures/`.

use std::path::Path;

use crate::{
    artifacts::Artifacts,
    config::{ArtifactPaths, create_app},
    state::AppState,
};

mod http;
mod predict_flow;

pub fn fixture_paths() -> ArtifactPaths {
    ArtifactPaths::default().resolve_against(Path::new(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/fixtures"
    )))
}

pub fn fixture_artifacts() -> Artifacts {
    Artifacts::load(&fixture_paths()).unwrap()
}

pub fn fixture_app() -> axum::Router {
    let paths = fixture_paths();
    create_app(AppState::new(fixture_artifacts(), paths.logos))
}
