//! Game configuration (world size, viewport, audio timing, leaderboard).
//! Loaded from `config.json` in the user's config directory at startup.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::game::player::DEFAULT_THRUST_CLIP_SECS;

/// Tunables that are not part of the game rules. Every field has a default,
/// so a partial file only overrides what it names.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GliderConfig {
    /// World size in world units; the parallax tiles share it.
    #[serde(default = "default_world_width")]
    pub world_width: f32,
    #[serde(default = "default_world_height")]
    pub world_height: f32,
    /// Visible playfield, also the window size.
    #[serde(default = "default_viewport_width")]
    pub viewport_width: f32,
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f32,
    /// Length of the thrust clip; the cue is not re-emitted while it plays.
    #[serde(default = "default_thrust_clip_secs")]
    pub thrust_clip_secs: f32,
    #[serde(default)]
    pub leaderboard: LeaderboardConfig,
    /// Fixed seed for the item spawner. Unset means seeded from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardConfig {
    #[serde(default = "default_fetch_url")]
    pub fetch_url: String,
    #[serde(default = "default_submit_url")]
    pub submit_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_world_width() -> f32 {
    1600.0
}
fn default_world_height() -> f32 {
    1440.0
}
fn default_viewport_width() -> f32 {
    800.0
}
fn default_viewport_height() -> f32 {
    480.0
}
fn default_thrust_clip_secs() -> f32 {
    DEFAULT_THRUST_CLIP_SECS
}
fn default_fetch_url() -> String {
    "http://localhost:8080/glider/top10".to_string()
}
fn default_submit_url() -> String {
    "http://localhost:8080/glider/submit".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            fetch_url: default_fetch_url(),
            submit_url: default_submit_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for GliderConfig {
    fn default() -> Self {
        Self {
            world_width: default_world_width(),
            world_height: default_world_height(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            thrust_clip_secs: default_thrust_clip_secs(),
            leaderboard: LeaderboardConfig::default(),
            seed: None,
        }
    }
}

impl GliderConfig {
    pub fn world_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.world_width, self.world_height)
    }

    pub fn viewport_size(&self) -> Vec2 {
        Vec2::new(self.viewport_width, self.viewport_height)
    }

    /// Load from the user's config directory. Missing or invalid files give
    /// the defaults.
    pub fn load() -> Self {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                warn!("Could not determine config directory, using default config");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Self {
        let data = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) => {
                info!("No config at {:?} ({}), using defaults", path, e);
                return Self::default();
            }
        };
        match serde_json::from_str(&data) {
            Ok(config) => {
                info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                warn!("Invalid config at {:?}: {}, using defaults", path, e);
                Self::default()
            }
        }
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("glider").join("config.json"))
}
