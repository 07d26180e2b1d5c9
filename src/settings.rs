//! Game settings
//!
//! Read from a JSON file named by `LANTERN_SETTINGS`; any missing field takes
//! its default, and an unreadable file falls back to defaults entirely.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable holding the settings file path
pub const SETTINGS_ENV: &str = "LANTERN_SETTINGS";

/// Which level the game runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WorldKind {
    /// Toroidal repeat of a small grid
    #[default]
    Infinite,
    /// A single walled grid; outside it is empty
    Fixed,
    /// Arbitrary rectangles of varying height
    FreeForm,
}

impl WorldKind {
    pub const ALL: [WorldKind; 3] = [WorldKind::Infinite, WorldKind::Fixed, WorldKind::FreeForm];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorldKind::Infinite => "infinite",
            WorldKind::Fixed => "fixed",
            WorldKind::FreeForm => "free_form",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "infinite" | "wrap" => Some(WorldKind::Infinite),
            "fixed" => Some(WorldKind::Fixed),
            "free_form" | "freeform" | "free-form" => Some(WorldKind::FreeForm),
            _ => None,
        }
    }
}

/// How face shades outside `0..=255` are stored in a color channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChannelOverflow {
    /// Truncate toward zero and keep the low byte
    #[default]
    Wrap,
    /// Saturate at 0 and 255
    Clamp,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub world: WorldKind,
    pub channel_overflow: ChannelOverflow,

    // === HUD ===
    /// Log the timing overlay
    pub show_stats: bool,

    // === Run ===
    /// RNG seed for jitter, flicker and free-form layout
    pub seed: u64,
    /// Frames to run before exiting (headless)
    pub frames: u32,
    /// Window buffer the viewport is letterboxed into
    pub window_width: u32,
    pub window_height: u32,

    // === Accessibility ===
    /// Hold the lantern steady (no flicker)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world: WorldKind::Infinite,
            channel_overflow: ChannelOverflow::Wrap,

            show_stats: true,

            seed: 0x1a27_e4b0,
            frames: 600,
            window_width: 1280,
            window_height: 720,

            reduced_motion: false,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Settings from the file named by `LANTERN_SETTINGS`, or defaults
    pub fn load() -> Self {
        let Ok(path) = std::env::var(SETTINGS_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {path}");
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings file {path}: {e}");
                Self::default()
            }
        }
    }

    /// Effective lantern flicker (respects reduced_motion)
    pub fn effective_flicker(&self) -> bool {
        !self.reduced_motion
    }
}
