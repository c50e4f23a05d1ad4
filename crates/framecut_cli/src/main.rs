//! framecut binary entry point.

mod cli;
mod commands;
mod job;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use framecut_core::config::{ConfigManager, Settings};
use framecut_core::logging::init_tracing;

use cli::{Cli, Command};
use commands::ConfigChanges;

const DEFAULT_CONFIG: &str = ".config/framecut.toml";

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let settings = load_settings(&config_path, cli.config.is_some())?;

    let level = settings.logging.level.more_verbose(cli.verbose);
    let logs_folder = settings.logging.logs_folder();
    let _guard = init_tracing(level, logs_folder.as_deref());
    tracing::debug!("framecut v{}", framecut_core::version());

    match cli.command {
        Command::Plan { job, json } => commands::plan(&job, json, &settings),
        Command::Cut { job, overwrite } => commands::cut(&job, overwrite, &settings),
        Command::Ts {
            fps,
            precision,
            frames,
        } => commands::ts(fps, precision, &frames),
        Command::Config {
            precision,
            chapter_precision,
            touch_policy,
            format,
            mkvmerge,
        } => commands::config(
            &config_path,
            ConfigChanges {
                precision,
                chapter_precision,
                touch_policy,
                format,
                mkvmerge,
            },
        ),
    }
}

/// Settings from `path`. A missing default file means default settings;
/// a missing explicit file is an error.
fn load_settings(path: &Path, explicit: bool) -> Result<Settings> {
    if !explicit && !path.exists() {
        return Ok(Settings::default());
    }
    let mut manager = ConfigManager::new(path);
    manager
        .load()
        .with_context(|| format!("failed to load settings from {}", path.display()))?;
    Ok(manager.settings().clone())
}
