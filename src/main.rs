mod app;
mod config;
mod input;
mod model;
mod render;
mod session;
mod sim;
mod status;
mod storage;
mod term;

use anyhow::{Context, Result};
use clap::Parser;
use std::{fs::OpenOptions, path::Path, sync::Mutex};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = config::Cli::parse();
    let paths = config::project_paths(cli.data_dir.as_deref())?;
    init_tracing(&paths.log_path)?;

    let file_settings = config::load_settings(&paths.settings_path);
    let settings = file_settings.for_run(&cli);
    info!(
        save = %paths.save_path.display(),
        tick_ms = settings.tick_ms,
        braille = settings.enable_braille,
        "digibuddy starting"
    );
    app::run(settings, file_settings, paths)
}

/// The terminal belongs to the pet, so logs go to a file next to the save.
fn init_tracing(log_path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("opening log file {}", log_path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .compact()
        .init();
    Ok(())
}
