//! Editor facade
//!
//! [`Editor`] is the single entry point the host drives: pointer and key
//! events go in, and the paint layer reads elements, selection and visual
//! offsets back out. Every store mutation that should be undoable passes
//! through here so it is recorded in the history exactly once.
//!
//! Pointer moves are coalesced by a [`FrameThrottle`]; the host calls
//! [`Editor::animation_frame`] once per frame to process the latest one.
//! Timers never read a clock; methods that depend on time take `now`.

use crate::config::EditorConfig;
use crate::error::{EditorError, EditorResult};
use crate::geometry::{
    clamp_position, to_document_space, to_view_space, PageSize, ScreenPoint, TransformContext,
    ViewMode,
};
use crate::history::{Command, CommandHistory};
use crate::input::{PointerTarget, Shortcut};
use crate::layers::LayerOrderRegistry;
use crate::selection::{RubberBand, Selection};
use crate::snapshot;
use crate::store::{AddOutcome, ElementStore, LoadReport};
use crate::transform::{DragSession, GestureState, MultiDragSession, ResizeSession, VisualOffset};
use doc_model::{
    Element, ElementId, ElementKind, ElementPatch, ElementType, ProjectSnapshot, Rect, ViewKind,
};
use layout_editor_scheduler::{Debouncer, FrameThrottle, IdleDetector, RepeatGuard};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Gesture in progress, with the state it needs
#[derive(Debug, Clone)]
enum Gesture {
    Idle,
    Selecting(RubberBand),
    Dragging(DragSession),
    Resizing(ResizeSession),
    MovingGroup(MultiDragSession),
}

/// Text edit not yet recorded in history
#[derive(Debug, Clone)]
struct TextEdit {
    id: ElementId,

    /// Element properties before the first keystroke
    before: ElementKind,
}

/// Element manipulation engine
pub struct Editor {
    config: EditorConfig,
    store: ElementStore,
    history: CommandHistory,

    page: PageSize,
    scale: f32,
    container_origin: ScreenPoint,
    view_mode: ViewMode,
    current_page: u32,
    selection_mode: bool,

    selection: Option<Selection>,
    gesture: Gesture,

    pointer_moves: FrameThrottle<ScreenPoint>,
    shortcut_guard: RepeatGuard,
    text_edit: Option<TextEdit>,
    text_debounce: Debouncer,
    zoom_idle: IdleDetector,
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            store: ElementStore::new(),
            history: CommandHistory::with_max_levels(config.max_undo_levels),
            page: PageSize::default(),
            scale: 1.0,
            container_origin: ScreenPoint::default(),
            view_mode: ViewMode::default(),
            current_page: 1,
            selection_mode: false,
            selection: None,
            gesture: Gesture::Idle,
            pointer_moves: FrameThrottle::new(),
            shortcut_guard: RepeatGuard::new(config.undo_repeat()),
            text_edit: None,
            text_debounce: Debouncer::new(config.text_debounce()),
            zoom_idle: IdleDetector::new(config.zoom_idle()),
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn store(&self) -> &ElementStore {
        &self.store
    }

    pub fn layers(&self) -> &LayerOrderRegistry {
        self.store.layers()
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    // ------------------------------------------------------------------
    // Surface and view state
    // ------------------------------------------------------------------

    /// Set the page size (document units) and zoom factor
    pub fn set_surface(&mut self, page: PageSize, scale: f32) {
        self.page = page;
        self.set_scale(scale);
    }

    fn set_scale(&mut self, scale: f32) {
        if scale.is_finite() && scale > 0.0 {
            self.scale = scale;
        } else {
            warn!(scale, "ignoring non-positive zoom factor");
        }
    }

    pub fn set_container_origin(&mut self, origin: ScreenPoint) {
        self.container_origin = origin;
    }

    /// Switch pages; any gesture in progress is cancelled
    pub fn set_current_page(&mut self, page: u32) -> EditorResult<()> {
        if page == 0 {
            return Err(EditorError::InvalidPage(page));
        }
        if page != self.current_page {
            self.cancel_gesture();
            self.selection = None;
            self.current_page = page;
            debug!(page, "current page changed");
        }
        Ok(())
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if mode == self.view_mode {
            return;
        }
        self.cancel_gesture();
        if self.selection.as_ref().is_some_and(|selection| !mode.shows(selection.view)) {
            self.selection = None;
        }
        self.view_mode = mode;
        debug!(mode = ?mode, "view mode changed");
    }

    pub fn set_selection_mode(&mut self, enabled: bool) {
        self.selection_mode = enabled;
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn page_size(&self) -> PageSize {
        self.page
    }

    pub fn selection_mode(&self) -> bool {
        self.selection_mode
    }

    pub fn transform_context(&self) -> TransformContext {
        TransformContext {
            container_origin: self.container_origin,
            scale: self.scale,
            view_mode: self.view_mode,
            page_width: self.page.width,
            split_gap_px: self.config.split_gap_px,
        }
    }

    // ------------------------------------------------------------------
    // Pointer gestures
    // ------------------------------------------------------------------

    /// Start a gesture
    ///
    /// A press in the split-view gap, or on an element that is not on the
    /// current page of the pane under the pointer, starts nothing.
    pub fn pointer_down(&mut self, pointer: ScreenPoint, target: PointerTarget) -> GestureState {
        if !matches!(self.gesture, Gesture::Idle) {
            self.pointer_up();
        }
        self.commit_text_edit();

        let Some(resolved) = to_document_space(pointer, &self.transform_context()) else {
            debug!(x = pointer.x, y = pointer.y, "pointer down outside any page pane");
            return GestureState::Idle;
        };
        let view = resolved.view;
        let point = resolved.point;

        match target {
            PointerTarget::Canvas => {
                if self.selection_mode {
                    let band = RubberBand::new(view, self.current_page, point);
                    self.gesture = Gesture::Selecting(band);
                } else {
                    self.selection = None;
                }
            }
            PointerTarget::Element(id) => {
                let Some(element) = self.gesture_target(&id, view) else {
                    return GestureState::Idle;
                };
                let start = element.rect();
                let group_move = self.selection.as_ref().is_some_and(|selection| {
                    selection.view == view && selection.is_multi() && selection.contains(&id)
                });

                if group_move {
                    self.refresh_selection();
                    let members = self
                        .selection
                        .as_ref()
                        .map(|selection| selection.members().to_vec())
                        .unwrap_or_default();
                    self.history.start_batch();
                    self.history.set_batch_description(format!("Move {} elements", members.len()));
                    debug!(id = %id, members = members.len(), "group move started");
                    let session = MultiDragSession::new(id, view, point, members);
                    self.gesture = Gesture::MovingGroup(session);
                } else {
                    let already_selected = self
                        .selection
                        .as_ref()
                        .is_some_and(|selection| selection.contains(&id) && !selection.is_multi());
                    if !already_selected {
                        self.selection = Some(Selection::single(&element, view));
                    }
                    self.history.start_batch();
                    self.history.set_batch_description("Move element");
                    debug!(id = %id, "drag started");
                    self.gesture = Gesture::Dragging(DragSession::new(id, view, point, start));
                }
            }
            PointerTarget::Handle(id, handle) => {
                let Some(element) = self.gesture_target(&id, view) else {
                    return GestureState::Idle;
                };
                let keep_aspect =
                    element.element_type() == ElementType::Image && handle.is_corner();
                let start = element.rect();
                self.selection = Some(Selection::single(&element, view));

                self.history.start_batch();
                self.history.set_batch_description("Resize element");
                debug!(id = %id, handle = ?handle, keep_aspect, "resize started");
                let session = ResizeSession::new(id, view, handle, point, start, keep_aspect);
                self.gesture = Gesture::Resizing(session);
            }
        }

        self.gesture_state()
    }

    fn gesture_target(&self, id: &ElementId, view: ViewKind) -> Option<Element> {
        let element = self.store.get(id)?;
        if self.store.view_of(id) != Some(view) || element.page != self.current_page {
            debug!(id = %id, view = %view, "pointer target is not on the active page of this pane");
            return None;
        }
        Some(element.clone())
    }

    /// Queue a pointer move for the next animation frame
    ///
    /// Returns `true` when the host should request an animation frame.
    pub fn pointer_move(&mut self, pointer: ScreenPoint) -> bool {
        if matches!(self.gesture, Gesture::Idle) {
            return false;
        }
        self.pointer_moves.submit(pointer)
    }

    /// Process the latest queued pointer move
    ///
    /// Returns `true` if a move was processed.
    pub fn animation_frame(&mut self) -> bool {
        match self.pointer_moves.take_frame() {
            Some(pointer) => {
                self.apply_pointer(pointer);
                true
            }
            None => false,
        }
    }

    fn apply_pointer(&mut self, pointer: ScreenPoint) {
        let ctx = self.transform_context();
        let page = self.page;
        let min_element = self.config.min_element_size;
        let min_selection = self.config.min_selection_size;

        match &mut self.gesture {
            Gesture::Idle => {}
            Gesture::Selecting(band) => {
                let point = to_view_space(pointer, &ctx, band.view);
                band.update(point, &self.store, min_selection);
            }
            Gesture::Dragging(session) => {
                let target = session.target(to_view_space(pointer, &ctx, session.view), page);
                self.store.update(&session.id, &ElementPatch::position(target.x, target.y));
            }
            Gesture::Resizing(session) => {
                let point = to_view_space(pointer, &ctx, session.view);
                let target = session.target(point, page, min_element);
                self.store.update(&session.id, &ElementPatch::rect(target));
            }
            Gesture::MovingGroup(session) => {
                let point = to_view_space(pointer, &ctx, session.view);
                if let Some(target) = session.update(point, page) {
                    self.store.update(&session.active, &ElementPatch::position(target.x, target.y));
                }
            }
        }
    }

    /// Finish the gesture and commit its result
    ///
    /// The last queued move is processed first, so the committed position
    /// matches where the pointer was released.
    pub fn pointer_up(&mut self) {
        if let Some(pointer) = self.pointer_moves.flush() {
            self.apply_pointer(pointer);
        }

        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Idle => {}
            Gesture::Selecting(band) => self.finish_rubber_band(band),
            Gesture::Dragging(session) => {
                self.commit_single(&session.id, session.start, |rect| {
                    ElementPatch::position(rect.x, rect.y)
                });
            }
            Gesture::Resizing(session) => {
                self.commit_single(&session.id, session.start, ElementPatch::rect)
            }
            Gesture::MovingGroup(session) => self.commit_group(session),
        }
    }

    fn finish_rubber_band(&mut self, band: RubberBand) {
        self.selection = match band.resolve(&self.store, self.config.min_selection_size) {
            Some(members) if !members.is_empty() => {
                debug!(count = members.len(), view = %band.view, "rectangle selection");
                Some(Selection::new(band.view, band.page, members))
            }
            _ => None,
        };
    }

    fn commit_single(
        &mut self,
        id: &ElementId,
        start: Rect,
        to_patch: impl Fn(Rect) -> ElementPatch,
    ) {
        if let Some(element) = self.store.get(id) {
            let end = element.rect();
            if end != start {
                self.history.push(Command::Update {
                    id: id.clone(),
                    before: to_patch(start),
                    after: to_patch(end),
                });
            }
        }
        self.history.end_batch();
        self.refresh_selection();
    }

    fn commit_group(&mut self, session: MultiDragSession) {
        let active = self.store.get(&session.active);
        if let (Some(start), Some(element)) = (session.original(&session.active), active) {
            let end = element.rect();
            if end != start {
                self.history.push(Command::Update {
                    id: session.active.clone(),
                    before: ElementPatch::position(start.x, start.y),
                    after: ElementPatch::position(end.x, end.y),
                });
            }
        }

        for (id, before, after) in session.commit_targets(self.page) {
            if before == after {
                continue;
            }
            let patch = ElementPatch::position(after.x, after.y);
            if let Some(inverse) = self.store.update(&id, &patch) {
                self.history.push(Command::Update { id, before: inverse, after: patch });
            }
        }

        self.history.end_batch();
        self.refresh_selection();
        debug!(active = %session.active, "group move committed");
    }

    /// Abandon the gesture in progress and restore the original geometry
    ///
    /// Also dissolves a multi-selection.
    pub fn cancel(&mut self) {
        self.cancel_gesture();
        if self.selection.as_ref().is_some_and(Selection::is_multi) {
            self.selection = None;
        }
    }

    fn cancel_gesture(&mut self) {
        self.pointer_moves.cancel();

        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Idle | Gesture::Selecting(_) => {}
            Gesture::Dragging(session) => {
                let patch = ElementPatch::position(session.start.x, session.start.y);
                self.store.update(&session.id, &patch);
            }
            Gesture::Resizing(session) => {
                self.store.update(&session.id, &ElementPatch::rect(session.start));
            }
            Gesture::MovingGroup(session) => {
                if let Some(start) = session.original(&session.active) {
                    self.store.update(&session.active, &ElementPatch::position(start.x, start.y));
                }
            }
        }

        if self.history.discard_batch().is_some() {
            debug!("gesture cancelled");
        }
    }

    /// Commit any gesture and pending text edit before a discrete change
    fn settle(&mut self) {
        if !matches!(self.gesture, Gesture::Idle) {
            self.pointer_up();
        }
        self.commit_text_edit();
    }

    // ------------------------------------------------------------------
    // Keyboard and history
    // ------------------------------------------------------------------

    /// Handle a keyboard shortcut
    ///
    /// Undo and redo fire at most once per repeat interval so a held key
    /// does not unwind several steps. Returns `true` if anything happened.
    pub fn handle_shortcut(&mut self, shortcut: Shortcut, now: Instant) -> bool {
        match shortcut {
            Shortcut::Undo | Shortcut::Redo => {
                if !self.shortcut_guard.try_fire(now) {
                    debug!(shortcut = ?shortcut, "shortcut suppressed by repeat guard");
                    return false;
                }
                if shortcut == Shortcut::Undo {
                    self.undo()
                } else {
                    self.redo()
                }
            }
            Shortcut::Cancel => {
                self.cancel();
                true
            }
            Shortcut::DeleteSelection => self.delete_selection() > 0,
        }
    }

    pub fn undo(&mut self) -> bool {
        self.settle();
        let undone = self.history.undo(&mut self.store);
        self.refresh_selection();
        undone
    }

    pub fn redo(&mut self) -> bool {
        self.settle();
        let redone = self.history.redo(&mut self.store);
        self.refresh_selection();
        redone
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo() || self.text_edit_pending()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ------------------------------------------------------------------
    // Discrete element operations
    // ------------------------------------------------------------------

    /// Add an element to a view
    ///
    /// An id that already exists anywhere is rejected without error and the
    /// existing id is returned.
    pub fn add_element(&mut self, view: ViewKind, element: Element) -> EditorResult<ElementId> {
        if element.page == 0 {
            return Err(EditorError::InvalidPage(element.page));
        }
        self.settle();

        let command_element = element.clone();
        match self.store.add(element, view) {
            AddOutcome::Added(id) => {
                self.history.push(Command::Add { view, element: command_element });
                Ok(id)
            }
            AddOutcome::Duplicate(id) => Ok(id),
        }
    }

    pub fn delete_element(&mut self, id: &ElementId) -> EditorResult<()> {
        self.settle();

        let view = self.store.view_of(id).ok_or_else(|| EditorError::ElementNotFound(id.clone()))?;
        let (element, layer) =
            self.store.delete(id, view).ok_or_else(|| EditorError::ElementNotFound(id.clone()))?;
        self.history.push(Command::Delete { view, element, layer });
        self.refresh_selection();
        Ok(())
    }

    /// Delete every selected element as one undo step
    ///
    /// Returns the number of elements deleted.
    pub fn delete_selection(&mut self) -> usize {
        self.settle();
        let Some(selection) = self.selection.take() else {
            return 0;
        };

        self.history.start_batch();
        self.history.set_batch_description(format!("Delete {} elements", selection.len()));
        let mut deleted = 0;
        for id in selection.ids() {
            if let Some((element, layer)) = self.store.delete(id, selection.view) {
                self.history.push(Command::Delete { view: selection.view, element, layer });
                deleted += 1;
            }
        }
        self.history.end_batch();

        debug!(deleted, "selection deleted");
        deleted
    }

    /// Apply a partial update as one undo step
    ///
    /// Geometry in the patch is clamped to the page the same way a gesture
    /// would be; the clamped values are what undo and redo replay.
    pub fn update_element(&mut self, id: &ElementId, patch: ElementPatch) -> EditorResult<()> {
        if patch.page == Some(0) {
            return Err(EditorError::InvalidPage(0));
        }
        self.settle();

        let current = self
            .store
            .get(id)
            .map(Element::rect)
            .ok_or_else(|| EditorError::ElementNotFound(id.clone()))?;
        let patch = self.clamp_patch(current, patch);
        let before = self
            .store
            .update(id, &patch)
            .ok_or_else(|| EditorError::ElementNotFound(id.clone()))?;
        let mut after = patch;
        if before.kind.is_none() {
            after.kind = None;
        }
        if !after.is_empty() {
            self.history.push(Command::Update { id: id.clone(), before, after });
        }
        self.refresh_selection();
        Ok(())
    }

    fn clamp_patch(&self, current: Rect, mut patch: ElementPatch) -> ElementPatch {
        let resized = patch.width.is_some() || patch.height.is_some();
        if !resized && patch.x.is_none() && patch.y.is_none() {
            return patch;
        }

        let mut rect = Rect::new(
            patch.x.unwrap_or(current.x),
            patch.y.unwrap_or(current.y),
            patch.width.unwrap_or(current.width),
            patch.height.unwrap_or(current.height),
        );
        if resized {
            let min = self.config.min_element_size;
            rect.width = rect.width.max(min.min(self.page.width)).min(self.page.width);
            rect.height = rect.height.max(min.min(self.page.height)).min(self.page.height);
        }
        let rect = clamp_position(rect, self.page);

        // A resize can push the box back inside the page, which moves it
        if patch.x.is_some() || rect.x != current.x {
            patch.x = Some(rect.x);
        }
        if patch.y.is_some() || rect.y != current.y {
            patch.y = Some(rect.y);
        }
        if patch.width.is_some() {
            patch.width = Some(rect.width);
        }
        if patch.height.is_some() {
            patch.height = Some(rect.height);
        }
        patch
    }

    pub fn move_to_front(&mut self, id: &ElementId) -> EditorResult<bool> {
        self.reorder(id, LayerOrderRegistry::move_to_front)
    }

    pub fn move_to_back(&mut self, id: &ElementId) -> EditorResult<bool> {
        self.reorder(id, LayerOrderRegistry::move_to_back)
    }

    pub fn move_forward(&mut self, id: &ElementId) -> EditorResult<bool> {
        self.reorder(id, LayerOrderRegistry::move_forward)
    }

    pub fn move_backward(&mut self, id: &ElementId) -> EditorResult<bool> {
        self.reorder(id, LayerOrderRegistry::move_backward)
    }

    fn reorder(
        &mut self,
        id: &ElementId,
        op: fn(&mut LayerOrderRegistry, &ElementId, ViewKind) -> bool,
    ) -> EditorResult<bool> {
        self.settle();

        let view = self.store.view_of(id).ok_or_else(|| EditorError::ElementNotFound(id.clone()))?;
        let before = self.store.layers().order(view).to_vec();
        if !op(self.store.layers_mut(), id, view) {
            return Ok(false);
        }
        let after = self.store.layers().order(view).to_vec();
        self.history.push(Command::Reorder { view, before, after });
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Text editing
    // ------------------------------------------------------------------

    /// Update a text box's content as the user types
    ///
    /// The store changes immediately. The history entry is recorded once
    /// typing pauses for the debounce period (see [`Editor::tick`]), or
    /// when any other operation needs the history.
    pub fn edit_text(
        &mut self,
        id: &ElementId,
        value: impl Into<String>,
        now: Instant,
    ) -> EditorResult<()> {
        let element = self.store.get(id).ok_or_else(|| EditorError::ElementNotFound(id.clone()))?;
        let ElementKind::TextBox(props) = &element.kind else {
            return Err(EditorError::NotATextBox { id: id.clone(), actual: element.element_type() });
        };
        let current = element.kind.clone();
        let mut props = props.clone();
        props.value = value.into();

        if self.text_edit.as_ref().is_some_and(|edit| &edit.id != id) {
            self.commit_text_edit();
        }
        if self.text_edit.is_none() {
            self.text_edit = Some(TextEdit { id: id.clone(), before: current });
        }

        self.store.update(id, &ElementPatch::kind(ElementKind::TextBox(props)));
        self.text_debounce.touch(now);
        Ok(())
    }

    /// Advance timers; records a text edit whose debounce has elapsed
    ///
    /// Returns `true` if a text edit was recorded.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.text_debounce.poll(now) {
            return false;
        }
        if !matches!(self.gesture, Gesture::Idle) {
            // Keep it out of the gesture's batch
            self.text_debounce.touch(now);
            return false;
        }
        self.commit_text_edit()
    }

    fn commit_text_edit(&mut self) -> bool {
        self.text_debounce.cancel();
        let Some(edit) = self.text_edit.take() else {
            return false;
        };
        let Some(element) = self.store.get(&edit.id) else {
            return false;
        };
        if element.kind == edit.before {
            return false;
        }

        let after = element.kind.clone();
        debug!(id = %edit.id, "text edit recorded");
        self.history.push(Command::Update {
            id: edit.id,
            before: ElementPatch::kind(edit.before),
            after: ElementPatch::kind(after),
        });
        true
    }

    pub fn text_edit_pending(&self) -> bool {
        self.text_edit.is_some()
    }

    // ------------------------------------------------------------------
    // Zoom
    // ------------------------------------------------------------------

    /// Apply a zoom factor from a wheel event
    pub fn wheel_zoom(&mut self, scale: f32, now: Instant) {
        self.set_scale(scale);
        self.zoom_idle.record_activity(now);
    }

    /// Check if the last wheel-zoom burst has gone quiet
    pub fn zoom_settled(&self, now: Instant) -> bool {
        self.zoom_idle.is_idle(now)
    }

    // ------------------------------------------------------------------
    // Persistence hand-off
    // ------------------------------------------------------------------

    /// Replace all elements from a snapshot and reset transient state
    ///
    /// History is cleared: undo never crosses a project load.
    pub fn load_snapshot(&mut self, snapshot: ProjectSnapshot) -> EditorResult<LoadReport> {
        snapshot::check_version(&snapshot)?;

        self.pointer_moves.reset();
        self.gesture = Gesture::Idle;
        self.selection = None;
        self.text_edit = None;
        self.text_debounce.cancel();
        self.history.clear();

        let report = self.store.replace_all(snapshot);
        info!(
            elements = report.elements,
            duplicates = report.duplicates_dropped,
            stale_layers = report.stale_layer_entries,
            "project loaded"
        );
        Ok(report)
    }

    pub fn snapshot(&self) -> ProjectSnapshot {
        self.store.to_snapshot()
    }

    // ------------------------------------------------------------------
    // Queries for the paint layer
    // ------------------------------------------------------------------

    pub fn gesture_state(&self) -> GestureState {
        match self.gesture {
            Gesture::Idle => GestureState::Idle,
            Gesture::Selecting(_) => GestureState::Selecting,
            Gesture::Dragging(_) | Gesture::MovingGroup(_) => GestureState::Dragging,
            Gesture::Resizing(_) => GestureState::Resizing,
        }
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn selection_bounds(&self) -> Option<Rect> {
        self.selection.as_ref().and_then(Selection::bounds)
    }

    /// Rubber band rectangle while a rectangle selection is in progress
    pub fn rubber_band_rect(&self) -> Option<Rect> {
        match &self.gesture {
            Gesture::Selecting(band) => Some(band.rect()),
            _ => None,
        }
    }

    /// Elements the rubber band would select if released now
    pub fn rubber_band_preview(&self) -> &[ElementId] {
        match &self.gesture {
            Gesture::Selecting(band) => band.preview(),
            _ => &[],
        }
    }

    /// Display-only offset of an element during a group move
    pub fn visual_offset(&self, id: &ElementId) -> Option<VisualOffset> {
        match &self.gesture {
            Gesture::MovingGroup(session) => session.offset(id),
            _ => None,
        }
    }

    /// Box where an element should be painted, including any visual offset
    pub fn painted_rect(&self, id: &ElementId) -> Option<Rect> {
        let rect = self.store.get(id)?.rect();
        Some(match self.visual_offset(id) {
            Some(offset) => rect.translated(offset.offset_x, offset.offset_y),
            None => rect,
        })
    }

    /// Elements of the current page of a view, back to front
    pub fn sorted_elements(&self, view: ViewKind) -> Vec<&Element> {
        self.store.get_sorted_elements(view, self.current_page)
    }

    fn refresh_selection(&mut self) {
        let Some(selection) = self.selection.as_mut() else {
            return;
        };
        selection.refresh(&self.store);
        if selection.is_empty() {
            self.selection = None;
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}
