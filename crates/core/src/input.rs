//! Input vocabulary shared between the host adapter and the editor

use crate::transform::ResizeHandle;
use doc_model::ElementId;

/// What the pointer went down on, as determined by the host's hit test
#[derive(Debug, Clone, PartialEq)]
pub enum PointerTarget {
    /// Empty canvas
    Canvas,
    /// Body of an element
    Element(ElementId),
    /// One of an element's resize handles
    Handle(ElementId, ResizeHandle),
}

/// Editor keyboard shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Undo,
    Redo,
    Cancel,
    DeleteSelection,
}

impl Shortcut {
    /// Map a key press to a shortcut
    ///
    /// `primary` is Ctrl (or Cmd on macOS). Undo is primary+Z, redo is
    /// primary+Y or primary+Shift+Z.
    pub fn from_key(key: &str, primary: bool, shift: bool) -> Option<Self> {
        match (key.to_ascii_lowercase().as_str(), primary, shift) {
            ("z", true, false) => Some(Shortcut::Undo),
            ("z", true, true) | ("y", true, _) => Some(Shortcut::Redo),
            ("escape", _, _) => Some(Shortcut::Cancel),
            ("delete" | "backspace", false, _) => Some(Shortcut::DeleteSelection),
            _ => None,
        }
    }
}
