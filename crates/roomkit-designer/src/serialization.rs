//! Serialization and deserialization for project files.
//!
//! A `.roomkit` project is pretty-printed JSON holding every canvas of every
//! room, the name overrides, the user-defined floors and rooms, and which
//! canvas was active. History and in-progress gestures are not saved.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use roomkit_core::{CanvasKey, FloorDef, RoomDef};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::document::CanvasDocument;

/// Project file format version
const FILE_FORMAT_VERSION: &str = "1.0";

/// Extension used for project files.
pub const FILE_EXTENSION: &str = "roomkit";

/// Complete project file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectFile {
    pub version: String,
    pub metadata: ProjectMetadata,
    #[serde(default)]
    pub active: CanvasKey,
    #[serde(default)]
    pub viewport: ViewportState,
    #[serde(default)]
    pub floors: Vec<FloorDef>,
    #[serde(default)]
    pub rooms: Vec<RoomDef>,
    #[serde(default)]
    pub canvases: Vec<CanvasRecord>,
}

/// Project metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
}

/// Viewport state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub zoom: f64,
    pub pan_x: f64,
    pub pan_y: f64,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

/// One stored canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasRecord {
    pub key: CanvasKey,
    /// User override of the derived display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub document: CanvasDocument,
}

impl ProjectFile {
    /// Create a new project file with default values
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            metadata: ProjectMetadata {
                name: name.into(),
                created: now,
                modified: now,
                description: String::new(),
            },
            active: CanvasKey::default(),
            viewport: ViewportState::default(),
            floors: Vec::new(),
            rooms: Vec::new(),
            canvases: Vec::new(),
        }
    }

    /// Save project to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("Failed to serialize project")?;

        std::fs::write(path, json)
            .with_context(|| format!("Failed to write project file {}", path.display()))?;

        Ok(())
    }

    /// Load project from file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read project file {}", path.display()))?;

        let project: ProjectFile =
            serde_json::from_str(&content).context("Failed to parse project file")?;

        if project.version != FILE_FORMAT_VERSION {
            warn!(
                version = %project.version,
                expected = FILE_FORMAT_VERSION,
                "Project file version differs; loading anyway"
            );
        }

        Ok(project)
    }

    /// Stored canvas for `key`, if any.
    pub fn canvas(&self, key: &CanvasKey) -> Option<&CanvasRecord> {
        self.canvases.iter().find(|c| &c.key == key)
    }

    /// Total number of units across all canvases.
    pub fn unit_count(&self) -> usize {
        self.canvases.iter().map(|c| c.document.units.len()).sum()
    }
}
