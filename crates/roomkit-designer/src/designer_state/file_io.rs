//! File I/O operations (save, load, new) for designer state.

use std::collections::BTreeMap;
use std::path::Path;

use roomkit_core::CanvasKey;
use tracing::info;

use super::DesignerState;
use crate::serialization::{CanvasRecord, ProjectFile, ViewportState};

impl DesignerState {
    /// Snapshot of every canvas as a project file. A loaded project keeps
    /// its creation time and description.
    pub fn to_project(&self) -> ProjectFile {
        let mut project = ProjectFile::new(&self.design_name);
        if let Some(loaded) = &self.metadata {
            project.metadata.created = loaded.created;
            project.metadata.description = loaded.description.clone();
        }
        project.active = self.active_key.clone();
        project.viewport = ViewportState {
            zoom: self.viewport.zoom(),
            pan_x: self.viewport.pan_x(),
            pan_y: self.viewport.pan_y(),
        };
        project.floors = self.floors.clone();
        project.rooms = self.rooms.clone();
        project.canvases = self
            .canvas_keys()
            .into_iter()
            .map(|key| CanvasRecord {
                name: self.canvas_names.get(&key).cloned(),
                document: self.document_for(&key).cloned().unwrap_or_default(),
                key,
            })
            .collect();
        project
    }

    /// Replaces every canvas with the contents of `project`.
    pub fn apply_project(&mut self, project: ProjectFile) {
        let mut stored: BTreeMap<CanvasKey, _> = BTreeMap::new();
        let mut names = BTreeMap::new();
        for record in project.canvases {
            if let Some(name) = record.name {
                names.insert(record.key.clone(), name);
            }
            stored.insert(record.key, record.document);
        }

        self.active_key = project.active;
        self.document = stored.remove(&self.active_key).unwrap_or_default();
        self.stored = stored;
        self.canvas_names = names;
        if !project.floors.is_empty() {
            self.floors = project.floors;
        }
        if !project.rooms.is_empty() {
            self.rooms = project.rooms;
        }
        self.viewport.set_zoom(project.viewport.zoom);
        self.viewport
            .set_pan(project.viewport.pan_x, project.viewport.pan_y);
        self.deleted_canvas = None;
        self.design_name = project.metadata.name.clone();
        self.metadata = Some(project.metadata);
        self.reset_transient();
    }

    /// Save design to file.
    pub fn save_to_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let project = self.to_project();
        project.save_to_file(path)?;

        self.current_file_path = Some(path.to_path_buf());
        self.is_modified = false;
        info!(path = %path.display(), canvases = project.canvases.len(), "Saved project");
        Ok(())
    }

    /// Load design from file.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let project = ProjectFile::load_from_file(path)?;
        let canvases = project.canvases.len();
        self.apply_project(project);

        self.current_file_path = Some(path.to_path_buf());
        self.is_modified = false;
        info!(path = %path.display(), canvases, "Loaded project");
        Ok(())
    }

    /// Starts a fresh design, keeping configuration and surface size.
    pub fn new_design(&mut self) {
        let (width, height) = (self.viewport.surface_width(), self.viewport.surface_height());
        let unit_type = self.interaction.unit_type();
        *self = DesignerState::new(self.config.clone());
        self.viewport.set_surface_size(width, height);
        self.interaction.set_unit_type(unit_type);
    }

    /// Design name with a marker when there are unsaved changes.
    pub fn display_name(&self) -> String {
        if self.is_modified {
            format!("{} *", self.design_name)
        } else {
            self.design_name.clone()
        }
    }
}
