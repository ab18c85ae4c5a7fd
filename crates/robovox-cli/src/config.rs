//! Style table selection shared by the commands.

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use robovox_spec::{Preset, StyleTable};
use tracing::debug;

/// Built-in preset names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PresetArg {
    /// Instrumental tracks
    Tracks,
    /// Vocal assets
    Vocal,
    /// Prompt-driven fallback songs
    Fallback,
}

impl From<PresetArg> for Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Tracks => Preset::Tracks,
            PresetArg::Vocal => Preset::Vocal,
            PresetArg::Fallback => Preset::Fallback,
        }
    }
}

/// Loads the style table: the JSON file if given, otherwise the preset.
pub fn load_styles(preset: PresetArg, styles_path: Option<&Path>) -> Result<StyleTable> {
    match styles_path {
        Some(path) => {
            let table = StyleTable::from_path(path)
                .with_context(|| format!("Failed to load style table: {}", path.display()))?;
            debug!(path = %path.display(), styles = table.len(), "loaded style table");
            Ok(table)
        }
        None => Ok(StyleTable::builtin(preset.into())),
    }
}
