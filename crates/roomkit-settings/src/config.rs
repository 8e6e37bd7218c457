//! Configuration and settings management for RoomKit
//!
//! Provides configuration file handling, defaults, and validation.
//! Supports JSON and TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Snapping (grid, object snap, ortho lock)
//! - Editing defaults (nudge steps, gesture thresholds, floor-plan scale)
//! - The fallback room used when a canvas has no floor plan
//! - History depth

use roomkit_core::constants::{
    DEFAULT_ROOM_DEPTH_MM, DEFAULT_ROOM_HEIGHT_MM, DEFAULT_ROOM_WIDTH_MM,
    DEFAULT_SCALE_MM_PER_PX, HISTORY_LIMIT, MIN_GESTURE_MM, MIN_GESTURE_PX, NUDGE_STEP_LARGE_PX,
    NUDGE_STEP_PX, OBJECT_SNAP_THRESHOLD_PX,
};
pub use roomkit_core::units::{GridStep, LengthDisplay};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, SettingsError, SettingsResult};

/// Snapping settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnappingSettings {
    /// Snap pointer positions to the millimetre grid
    pub grid_enabled: bool,
    /// Grid step in millimetres
    pub grid_step: GridStep,
    /// Snap to other entities' edges, corners and centers
    pub object_snap: bool,
    /// Object-snap capture radius in pixels
    pub threshold_px: f64,
    /// Keep wall and kitchen-run drafts horizontal or vertical
    #[serde(default = "default_ortho_lock")]
    pub ortho_lock: bool,
}

fn default_ortho_lock() -> bool {
    true
}

impl Default for SnappingSettings {
    fn default() -> Self {
        Self {
            grid_enabled: true,
            grid_step: GridStep::default(),
            object_snap: true,
            threshold_px: OBJECT_SNAP_THRESHOLD_PX,
            ortho_lock: default_ortho_lock(),
        }
    }
}

/// Editing defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditingSettings {
    /// Arrow-key nudge in pixels
    pub nudge_step_px: f64,
    /// Arrow-key nudge with shift held, in pixels
    pub nudge_step_large_px: f64,
    /// Smallest 2D gesture that commits, in pixels
    pub min_gesture_px: f64,
    /// Smallest 3D gesture that commits, in millimetres
    pub min_gesture_mm: f64,
    /// Scale of implicitly created floor plans
    pub default_scale_mm_per_px: f64,
    /// How lengths are shown to the user
    #[serde(default)]
    pub length_display: LengthDisplay,
}

impl Default for EditingSettings {
    fn default() -> Self {
        Self {
            nudge_step_px: NUDGE_STEP_PX,
            nudge_step_large_px: NUDGE_STEP_LARGE_PX,
            min_gesture_px: MIN_GESTURE_PX,
            min_gesture_mm: MIN_GESTURE_MM,
            default_scale_mm_per_px: DEFAULT_SCALE_MM_PER_PX,
            length_display: LengthDisplay::default(),
        }
    }
}

/// Footprint of the room assumed when a canvas has no floor plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSettings {
    pub width_mm: f64,
    pub depth_mm: f64,
    pub height_mm: f64,
}

impl Default for RoomSettings {
    fn default() -> Self {
        Self {
            width_mm: DEFAULT_ROOM_WIDTH_MM,
            depth_mm: DEFAULT_ROOM_DEPTH_MM,
            height_mm: DEFAULT_ROOM_HEIGHT_MM,
        }
    }
}

/// Undo/redo settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySettings {
    /// Maximum number of snapshots kept
    pub limit: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            limit: HISTORY_LIMIT,
        }
    }
}

/// Complete designer configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub snapping: SnappingSettings,
    #[serde(default)]
    pub editing: EditingSettings,
    #[serde(default)]
    pub room: RoomSettings,
    #[serde(default)]
    pub history: HistorySettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config location: `<config dir>/roomkit/config.toml`.
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        path.push("roomkit");
        path.push("config.toml");
        path
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Loads `path` if it exists, falling back to defaults when the file is
    /// missing or rejected.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to file (JSON or TOML), creating parent directories.
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e))
            })?;
        }
        std::fs::write(path, content)?;

        tracing::debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        fn positive(key: &str, value: f64) -> SettingsResult<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::ValueOutOfRange {
                    key: key.to_string(),
                    value: value.to_string(),
                }
                .into())
            }
        }

        if !(self.snapping.threshold_px.is_finite() && self.snapping.threshold_px >= 0.0) {
            return Err(ConfigError::ValueOutOfRange {
                key: "snapping.threshold_px".to_string(),
                value: self.snapping.threshold_px.to_string(),
            }
            .into());
        }

        positive("editing.nudge_step_px", self.editing.nudge_step_px)?;
        positive("editing.nudge_step_large_px", self.editing.nudge_step_large_px)?;
        positive("editing.min_gesture_px", self.editing.min_gesture_px)?;
        positive("editing.min_gesture_mm", self.editing.min_gesture_mm)?;
        positive(
            "editing.default_scale_mm_per_px",
            self.editing.default_scale_mm_per_px,
        )?;

        positive("room.width_mm", self.room.width_mm)?;
        positive("room.depth_mm", self.room.depth_mm)?;
        positive("room.height_mm", self.room.height_mm)?;

        if self.history.limit == 0 {
            return Err(SettingsError::invalid("history.limit", "must be > 0"));
        }

        Ok(())
    }
}
