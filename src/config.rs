use crate::model::Rules;
use anyhow::{Context, Result};
use clap::Parser;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "digibuddy")]
#[command(about = "A virtual pet that lives in your terminal")]
pub(crate) struct Cli {
    /// Milliseconds between decay ticks (default 3000)
    #[arg(long)]
    pub(crate) tick_ms: Option<u64>,

    /// Seed for the cosmetic event roll
    #[arg(long)]
    pub(crate) seed: Option<u64>,

    /// Force monochrome (no colors)
    #[arg(long, default_value_t = false)]
    pub(crate) mono: bool,

    /// Draw the pet with ASCII art instead of braille
    #[arg(long, default_value_t = false)]
    pub(crate) ascii: bool,

    /// Keep save, settings and log in this directory instead of the platform default
    #[arg(long)]
    pub(crate) data_dir: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub(crate) tick_ms: u64,
    pub(crate) fps_cap: u32,
    pub(crate) enable_color: bool,
    pub(crate) enable_braille: bool,
    pub(crate) seed: Option<u64>,
    pub(crate) rules: Rules,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_ms: 3000,
            fps_cap: 30,
            enable_color: true,
            enable_braille: true,
            seed: None,
            rules: Rules::default(),
        }
    }
}

impl Settings {
    /// Settings for this run. Command-line flags win, but only on the
    /// returned copy; `self` stays what the file says.
    pub(crate) fn for_run(&self, cli: &Cli) -> Self {
        let mut run = self.clone();
        run.apply_flags(cli);
        run
    }

    fn apply_flags(&mut self, cli: &Cli) {
        if let Some(ms) = cli.tick_ms {
            self.tick_ms = ms;
        }
        if cli.seed.is_some() {
            self.seed = cli.seed;
        }
        if cli.mono {
            self.enable_color = false;
        }
        if cli.ascii {
            self.enable_braille = false;
        }
        self.tick_ms = self.tick_ms.max(50);
    }
}

pub(crate) struct Paths {
    pub(crate) save_path: PathBuf,
    pub(crate) settings_path: PathBuf,
    pub(crate) log_path: PathBuf,
}

impl Paths {
    pub(crate) fn in_dir(dir: &Path) -> Self {
        Self {
            save_path: dir.join("save.json"),
            settings_path: dir.join("settings.json"),
            log_path: dir.join("digibuddy.log"),
        }
    }
}

pub(crate) fn project_paths(data_dir: Option<&Path>) -> Result<Paths> {
    let dir = match data_dir {
        Some(dir) => dir.to_path_buf(),
        None => ProjectDirs::from("com", "digibuddy", "DigiBuddy")
            .context("could not resolve project directories")?
            .data_local_dir()
            .to_path_buf(),
    };
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    Ok(Paths::in_dir(&dir))
}

pub(crate) fn load_settings(path: &Path) -> Settings {
    let Ok(s) = fs::read_to_string(path) else {
        return Settings::default();
    };
    match serde_json::from_str::<Settings>(&s) {
        Ok(v) => v,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable settings");
            Settings::default()
        }
    }
}

pub(crate) fn save_settings_atomic(path: &Path, s: &Settings) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    let data = serde_json::to_vec_pretty(s)?;
    fs::write(&tmp, data)?;
    atomic_rename(&tmp, path)?;
    Ok(())
}

pub(crate) fn atomic_rename(from: &Path, to: &Path) -> Result<()> {
    // rename replaces atomically on unix; windows refuses to rename over an existing file
    if cfg!(windows) && to.exists() {
        let _ = fs::remove_file(to);
    }
    fs::rename(from, to)
        .with_context(|| format!("renaming {} to {}", from.display(), to.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_or_broken_settings_fall_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        assert_eq!(load_settings(&path), Settings::default());

        fs::write(&path, "[1,2,3]").unwrap();
        assert_eq!(load_settings(&path), Settings::default());
    }

    #[test]
    fn partial_settings_keep_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"tick_ms":1000,"rules":{"flavor_chance":0.5}}"#).unwrap();
        let s = load_settings(&path);
        assert_eq!(s.tick_ms, 1000);
        assert_eq!(s.rules.flavor_chance, 0.5);
        assert_eq!(s.rules.decay.hunger, 0.3);
        assert!(s.enable_braille);
    }

    #[test]
    fn settings_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        let s = Settings {
            seed: Some(99),
            enable_color: false,
            ..Settings::default()
        };
        save_settings_atomic(&path, &s).unwrap();
        save_settings_atomic(&path, &s).unwrap();
        assert_eq!(load_settings(&path), s);
    }

    #[test]
    fn cli_overrides() {
        let cli = Cli::parse_from(["digibuddy", "--tick-ms", "500", "--seed", "4", "--ascii"]);
        let s = Settings::default().for_run(&cli);
        assert_eq!(s.tick_ms, 500);
        assert_eq!(s.seed, Some(4));
        assert!(!s.enable_braille);
        assert!(s.enable_color);

        let cli = Cli::parse_from(["digibuddy", "--tick-ms", "0"]);
        assert_eq!(Settings::default().for_run(&cli).tick_ms, 50);
    }

    #[test]
    fn run_flags_are_not_written_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        let file = load_settings(&path);

        let cli = Cli::parse_from(["digibuddy", "--mono", "--tick-ms", "100", "--seed", "5"]);
        let run = file.for_run(&cli);
        assert!(!run.enable_color);
        assert_eq!(run.tick_ms, 100);

        save_settings_atomic(&path, &file).unwrap();
        let next = load_settings(&path);
        assert!(next.enable_color);
        assert_eq!(next.tick_ms, 3000);
        assert_eq!(next.seed, None);
    }

    #[test]
    fn data_dir_override_is_created() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let paths = project_paths(Some(&nested)).unwrap();
        assert!(nested.is_dir());
        assert_eq!(paths.save_path, nested.join("save.json"));
        assert_eq!(paths.log_path, nested.join("digibuddy.log"));
    }
}
