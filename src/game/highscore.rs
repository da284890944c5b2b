//! The local player profile: personal top 10 and the sound preference.
//!
//! Profiles are saved as JSON in the user's data directory, one file per key.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::{fs, io, path::PathBuf};
use thiserror::Error;

/// Maximum number of scores kept in the history.
pub const MAX_HIGH_SCORES: usize = 10;

/// Key of the single local profile.
pub const PROFILE_KEY: &str = "profile";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Best scores, highest first.
    #[serde(default)]
    pub score_history: Vec<u32>,
    #[serde(default = "default_sound_enabled")]
    pub sound_enabled: bool,
}

fn default_sound_enabled() -> bool {
    true
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            score_history: Vec::new(),
            sound_enabled: default_sound_enabled(),
        }
    }
}

impl Profile {
    /// Add a score to the history, keeping it sorted and capped.
    /// Returns true if the score made it in.
    pub fn add_score(&mut self, score: u32) -> bool {
        match self.score_history.iter().position(|&s| score >= s) {
            Some(pos) => {
                self.score_history.insert(pos, score);
                self.score_history.truncate(MAX_HIGH_SCORES);
                true
            }
            None if self.score_history.len() < MAX_HIGH_SCORES => {
                self.score_history.push(score);
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("could not determine the data directory")]
    NoDataDir,
    #[error("profile i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("profile is not valid json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where profiles live. Loading never fails: anything unreadable is a fresh
/// profile.
pub trait ProfileStore {
    fn load(&self, key: &str) -> Profile;
    fn save(&self, key: &str, profile: &Profile) -> Result<(), ProfileError>;
}

/// Pretty JSON files under a root directory.
#[derive(Debug, Clone)]
pub struct JsonProfileStore {
    root: Option<PathBuf>,
}

impl JsonProfileStore {
    /// Store in `<data_local_dir>/glider`.
    pub fn new() -> Self {
        Self {
            root: dirs::data_local_dir().map(|dir| dir.join("glider")),
        }
    }

    #[cfg(test)]
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn file_path(&self, key: &str) -> Result<PathBuf, ProfileError> {
        self.root
            .as_ref()
            .map(|root| root.join(format!("{key}.json")))
            .ok_or(ProfileError::NoDataDir)
    }

    fn try_load(&self, key: &str) -> Result<Option<Profile>, ProfileError> {
        let path = self.file_path(key)?;
        if !path.exists() {
            info!("No profile found at {:?}, starting fresh", path);
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)?;
        let profile = serde_json::from_str(&contents)?;
        info!("Loaded profile from {:?}", path);
        Ok(Some(profile))
    }
}

impl Default for JsonProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileStore for JsonProfileStore {
    fn load(&self, key: &str) -> Profile {
        match self.try_load(key) {
            Ok(profile) => profile.unwrap_or_default(),
            Err(e) => {
                warn!("Failed to load profile '{}': {}", key, e);
                Profile::default()
            }
        }
    }

    fn save(&self, key: &str, profile: &Profile) -> Result<(), ProfileError> {
        let path = self.file_path(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(profile)?;
        fs::write(&path, json)?;
        info!("Saved profile to {:?}", path);
        Ok(())
    }
}
