use std::{path::PathBuf, sync::Arc};

use crate::artifacts::Artifacts;

/// Shared by every handler. Nothing in here changes after start-up.
#[derive(Clone, Debug)]
pub struct AppState {
    pub artifacts: Arc<Artifacts>,
    pub logos_dir: PathBuf,
}

impl AppState {
    pub fn new(artifacts: Artifacts, logos_dir: PathBuf) -> Self {
        AppState {
            artifacts: Arc::new(artifacts),
            logos_dir,
        }
    }
}
