//! Undo/redo history for the active canvas.
//!
//! History is a bounded list of whole-canvas snapshots with a cursor. The
//! entry under the cursor always matches the live document. Undo and redo
//! move the cursor; recording a new snapshot drops everything after it.
//!
//! Deleting a whole canvas is tracked separately by [`DeletedCanvas`], which
//! the designer state consults before normal history on undo.

use std::collections::VecDeque;

use roomkit_core::constants::HISTORY_LIMIT;
use roomkit_core::CanvasKey;

use crate::document::CanvasDocument;

/// One recorded state of the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub snapshot: CanvasDocument,
    /// What produced this state, e.g. "Add Wardrobe".
    pub description: String,
}

/// Bounded snapshot history with a cursor.
#[derive(Debug, Clone)]
pub struct UndoRedoManager {
    entries: VecDeque<HistoryEntry>,
    cursor: usize,
    limit: usize,
}

impl UndoRedoManager {
    /// Creates an empty history keeping at most `limit` snapshots.
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            cursor: 0,
            limit: limit.max(1),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of snapshots held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Discards all history and starts over from `baseline`.
    pub fn reset(&mut self, baseline: CanvasDocument) {
        self.entries.clear();
        self.entries.push_back(HistoryEntry {
            snapshot: baseline,
            description: String::from("Initial state"),
        });
        self.cursor = 0;
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }

    /// Records a committed state, dropping the redo branch and evicting the
    /// oldest snapshot when over the limit.
    pub fn record(&mut self, snapshot: CanvasDocument, description: impl Into<String>) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push_back(HistoryEntry {
            snapshot,
            description: description.into(),
        });
        while self.entries.len() > self.limit {
            self.entries.pop_front();
        }
        self.cursor = self.entries.len() - 1;
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Steps back and returns the state to restore.
    pub fn undo(&mut self) -> Option<&HistoryEntry> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Steps forward and returns the state to restore.
    pub fn redo(&mut self) -> Option<&HistoryEntry> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    /// Number of steps that can be undone.
    pub fn undo_depth(&self) -> usize {
        self.cursor
    }

    /// Number of steps that can be redone.
    pub fn redo_depth(&self) -> usize {
        self.entries.len().saturating_sub(self.cursor + 1)
    }

    /// Description of the step the next undo would revert.
    pub fn undo_description(&self) -> Option<&str> {
        if self.can_undo() {
            self.entries.get(self.cursor).map(|e| e.description.as_str())
        } else {
            None
        }
    }

    /// Description of the step the next redo would reapply.
    pub fn redo_description(&self) -> Option<&str> {
        if self.can_redo() {
            self.entries
                .get(self.cursor + 1)
                .map(|e| e.description.as_str())
        } else {
            None
        }
    }
}

impl Default for UndoRedoManager {
    fn default() -> Self {
        Self::new(HISTORY_LIMIT)
    }
}

/// The most recently deleted canvas, restorable by one undo.
#[derive(Debug, Clone, PartialEq)]
pub struct DeletedCanvas {
    pub key: CanvasKey,
    pub document: CanvasDocument,
    /// Name override the canvas had, if any.
    pub name_override: Option<String>,
    /// Name shown for the canvas when it was deleted.
    pub display_name: String,
}
