use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use ipl_predictor::{
    artifacts::Artifacts,
    config::{ArtifactPaths, Config, create_app},
    state::AppState,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(about = "Serve the IPL winner prediction form")]
pub struct Args {
    /// TOML file naming the artifact paths. Without one, the artifacts are
    /// looked for in the working directory.
    #[clap(long, short)]
    config: Option<PathBuf>,
    /// Address to listen on, overriding the config file.
    #[clap(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config {
            artifacts: ArtifactPaths::default()
                .resolve_against(&std::env::current_dir()?),
            ..Config::default()
        },
    };
    if let Some(bind) = args.bind {
        config.bind = bind;
    }

    let artifacts = tokio::task::spawn_blocking({
        let paths = config.artifacts.clone();
        move || Artifacts::load(&paths)
    })
    .await?
    .context("failed to load prediction artifacts")?;

    let app = create_app(AppState::new(artifacts, config.artifacts.logos));

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    tracing::info!(address = %config.bind, "Listening");

    axum::serve(listener, app).await?;
    Ok(())
}
