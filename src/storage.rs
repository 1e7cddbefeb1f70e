use crate::config::atomic_rename;
use crate::model::{clamp_vital, Pet, SaveFile, SAVE_VERSION};
use anyhow::{Context, Result};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::{info, warn};

/// Where snapshots go. Implementations only ever see immutable copies.
pub(crate) trait SnapshotStore {
    fn load(&self) -> Option<SaveFile>;
    fn save(&mut self, save: &SaveFile) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
}

#[derive(Debug, Error)]
pub(crate) enum SnapshotError {
    #[error("snapshot is not valid JSON for this schema: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("snapshot version {found} is not supported (expected {expected})", expected = SAVE_VERSION)]
    UnsupportedVersion { found: u32 },
    #[error("snapshot field `{0}` is out of its domain")]
    InvalidField(&'static str),
}

/// Parse and validate a snapshot. Any failure discards the whole snapshot;
/// partial objects are never merged over defaults.
pub(crate) fn decode_snapshot(raw: &str) -> Result<SaveFile, SnapshotError> {
    let mut save: SaveFile = serde_json::from_str(raw)?;
    if save.version != SAVE_VERSION {
        return Err(SnapshotError::UnsupportedVersion {
            found: save.version,
        });
    }
    sanitize(&mut save.pet)?;
    Ok(save)
}

fn sanitize(pet: &mut Pet) -> Result<(), SnapshotError> {
    let vitals = [
        ("hunger", &mut pet.hunger),
        ("happiness", &mut pet.happiness),
        ("energy", &mut pet.energy),
        ("cleanliness", &mut pet.cleanliness),
    ];
    for (name, v) in vitals {
        if !v.is_finite() {
            return Err(SnapshotError::InvalidField(name));
        }
        *v = clamp_vital(*v);
    }
    if !pet.age.is_finite() || pet.age < 0.0 {
        return Err(SnapshotError::InvalidField("age"));
    }
    // stored stage is informational; age is authoritative
    pet.reclassify();
    pet.milestones = pet.milestones.max((pet.age.floor() / 10.0) as u32);
    pet.check_death();
    Ok(())
}

pub(crate) struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Option<SaveFile> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no snapshot found, starting fresh");
                return None;
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "snapshot unreadable, starting fresh");
                return None;
            }
        };
        match decode_snapshot(&raw) {
            Ok(save) => Some(save),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "discarding snapshot");
                None
            }
        }
    }

    fn save(&mut self, save: &SaveFile) -> Result<()> {
        let tmp = self.path.with_extension("json.tmp");
        let data = serde_json::to_vec_pretty(save)?;
        fs::write(&tmp, data).with_context(|| format!("writing {}", tmp.display()))?;
        atomic_rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("removing {}", self.path.display())),
        }
    }
}

#[cfg(test)]
pub(crate) mod memory {
    use super::*;

    /// In-memory store for exercising the session pipeline.
    #[derive(Default)]
    pub(crate) struct MemoryStore {
        pub(crate) slot: Option<SaveFile>,
        pub(crate) saves: usize,
        pub(crate) clears: usize,
    }

    impl SnapshotStore for MemoryStore {
        fn load(&self) -> Option<SaveFile> {
            self.slot.clone()
        }

        fn save(&mut self, save: &SaveFile) -> Result<()> {
            self.slot = Some(save.clone());
            self.saves += 1;
            Ok(())
        }

        fn clear(&mut self) -> Result<()> {
            self.slot = None;
            self.clears += 1;
            Ok(())
        }
    }
}
