//! Optional TOML configuration for the command-line adapter.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Settings read from the configuration file.
///
/// Every field is optional in the file; missing ones keep their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct CliConfig {
    /// Location of the single save slot.
    pub(crate) save_path: PathBuf,
    /// Whether HUD lines are printed below the grid.
    pub(crate) show_hud: bool,
    /// Whether glyphs are printed with ANSI colors.
    pub(crate) color: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            save_path: PathBuf::from("twin-elements.save"),
            show_hud: true,
            color: false,
        }
    }
}

impl CliConfig {
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}
