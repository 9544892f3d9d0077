//! Layout Editor Core Library
//!
//! Element manipulation engine for the layout editor: storage of positioned
//! elements per view, paint order, rectangle selection, drag and resize with
//! page clamping, and undo/redo history. Rendering and persistence live in
//! the host; this crate only hands them plain [`doc_model`] records.

pub mod config;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod history;
pub mod input;
pub mod layers;
pub mod selection;
pub mod snapshot;
pub mod store;
pub mod transform;

pub use config::EditorConfig;
pub use editor::Editor;
pub use error::{ConfigError, EditorError, EditorResult, SnapshotError};
pub use geometry::{
    clamp_position, to_document_space, to_view_space, PageSize, ResolvedPoint, ScreenPoint,
    TransformContext, ViewMode,
};
pub use history::{Command, CommandBatch, CommandHistory};
pub use input::{PointerTarget, Shortcut};
pub use layers::LayerOrderRegistry;
pub use selection::{
    compute_bounds, hit_test_rectangle, is_click, rect_from_corners, RubberBand, SelectedElement,
    Selection,
};
pub use store::{AddOutcome, ElementStore, LoadReport};
pub use transform::{
    clamp_resize, resize_keep_aspect, resize_rect, DragSession, GestureState, MultiDragSession,
    ResizeHandle, ResizeSession, VisualOffset,
};

pub use doc_model;
