//! File-backed persistence of the single saved session.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use twin_elements_core::GameState;

use crate::session_transfer;

/// Save slot stored at a fixed path.
#[derive(Clone, Debug)]
pub(crate) struct SaveStore {
    path: PathBuf,
}

impl SaveStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrites the save slot, creating missing parent directories.
    pub(crate) fn save(&self, state: &GameState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create save directory {}", parent.display())
                })?;
            }
        }

        let encoded = session_transfer::encode(state)?;
        fs::write(&self.path, format!("{encoded}\n"))
            .with_context(|| format!("failed to write save file {}", self.path.display()))
    }

    /// Reads and decodes the save slot.
    pub(crate) fn load(&self) -> Result<GameState> {
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read save file {}", self.path.display()))?;
        let state = session_transfer::decode(&contents)
            .with_context(|| format!("save file {} is corrupt", self.path.display()))?;
        Ok(state)
    }
}
