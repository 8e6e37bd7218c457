use roomkit_core::EntityKind;
use std::collections::BTreeSet;

/// Tracks which entities are selected.
///
/// # Selection Model
///
/// - **Single kind**: the selection holds entities of exactly one
///   [`EntityKind`]. Selecting anything of another kind replaces it.
/// - **Toggle**: a plain click on the sole selected entity deselects it;
///   on anything else it becomes the whole selection.
/// - **Extend**: Shift+click adds or removes entities within the current kind.
/// - **Groups**: callers pass every member of a clicked group, so the whole
///   group is selected or deselected together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionManager {
    kind: Option<EntityKind>,
    indices: BTreeSet<usize>,
}

impl SelectionManager {
    /// Creates a new `SelectionManager` with no selection.
    ///
    /// # Examples
    ///
    /// ```
    /// use roomkit_designer::selection_manager::SelectionManager;
    ///
    /// let manager = SelectionManager::new();
    /// assert!(manager.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(&self) -> Option<EntityKind> {
        self.kind
    }

    pub fn indices(&self) -> &BTreeSet<usize> {
        &self.indices
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn contains(&self, kind: EntityKind, index: usize) -> bool {
        self.kind == Some(kind) && self.indices.contains(&index)
    }

    /// Clears the selection of every kind.
    pub fn clear(&mut self) {
        self.kind = None;
        self.indices.clear();
    }

    /// Replaces the selection with `indices` of `kind`.
    pub fn select_only(&mut self, kind: EntityKind, indices: BTreeSet<usize>) {
        if indices.is_empty() {
            self.clear();
        } else {
            self.kind = Some(kind);
            self.indices = indices;
        }
    }

    /// Plain click: deselects `indices` if they are exactly the current
    /// selection, otherwise selects only them.
    pub fn toggle(&mut self, kind: EntityKind, indices: BTreeSet<usize>) {
        if self.kind == Some(kind) && self.indices == indices {
            self.clear();
        } else {
            self.select_only(kind, indices);
        }
    }

    /// Shift+click: flips membership of `indices` within the current kind.
    /// A different kind starts a fresh selection.
    pub fn extend(&mut self, kind: EntityKind, indices: BTreeSet<usize>) {
        if self.kind != Some(kind) {
            self.select_only(kind, indices);
            return;
        }
        if indices.iter().all(|i| self.indices.contains(i)) {
            for i in &indices {
                self.indices.remove(i);
            }
        } else {
            self.indices.extend(indices);
        }
        if self.indices.is_empty() {
            self.kind = None;
        }
    }
}
