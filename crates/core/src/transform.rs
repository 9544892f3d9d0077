//! Drag and resize geometry
//!
//! Gestures run in two phases. While the pointer moves, the element under
//! the pointer is updated live and every other member of a group move is
//! displaced visually only ([`VisualOffset`]). On release the final
//! positions are written to the store and recorded as one history entry.
//!
//! All boxes produced here stay inside the page: moves are clamped by
//! shifting, resizes by shrinking, and resizes never go below the minimum
//! element size.

use crate::geometry::{clamp_position, PageSize};
use crate::selection::SelectedElement;
use doc_model::{DocPoint, ElementId, Rect, ViewKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Phase of the pointer gesture in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Selecting,
    Dragging,
    Resizing,
}

/// One of the eight resize handles around an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeHandle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::TopLeft,
        ResizeHandle::Top,
        ResizeHandle::TopRight,
        ResizeHandle::Right,
        ResizeHandle::BottomRight,
        ResizeHandle::Bottom,
        ResizeHandle::BottomLeft,
        ResizeHandle::Left,
    ];

    pub fn is_corner(self) -> bool {
        matches!(
            self,
            ResizeHandle::TopLeft
                | ResizeHandle::TopRight
                | ResizeHandle::BottomLeft
                | ResizeHandle::BottomRight
        )
    }

    pub fn moves_left(self) -> bool {
        matches!(self, ResizeHandle::TopLeft | ResizeHandle::Left | ResizeHandle::BottomLeft)
    }

    pub fn moves_right(self) -> bool {
        matches!(self, ResizeHandle::TopRight | ResizeHandle::Right | ResizeHandle::BottomRight)
    }

    pub fn moves_top(self) -> bool {
        matches!(self, ResizeHandle::TopLeft | ResizeHandle::Top | ResizeHandle::TopRight)
    }

    pub fn moves_bottom(self) -> bool {
        matches!(self, ResizeHandle::BottomLeft | ResizeHandle::Bottom | ResizeHandle::BottomRight)
    }

    /// Handle position on a box, in document space
    pub fn anchor(self, rect: &Rect) -> DocPoint {
        let x = if self.moves_left() {
            rect.x
        } else if self.moves_right() {
            rect.right()
        } else {
            rect.x + rect.width / 2.0
        };
        let y = if self.moves_top() {
            rect.y
        } else if self.moves_bottom() {
            rect.bottom()
        } else {
            rect.y + rect.height / 2.0
        };
        DocPoint::new(x, y)
    }

    /// Find the handle whose anchor lies within `tolerance` of a point
    pub fn hit_test(rect: &Rect, point: DocPoint, tolerance: f32) -> Option<ResizeHandle> {
        Self::ALL.into_iter().find(|handle| {
            let anchor = handle.anchor(rect);
            (point.x - anchor.x).abs() <= tolerance && (point.y - anchor.y).abs() <= tolerance
        })
    }
}

/// Move the edges a handle controls by the pointer delta, without limits
pub fn resize_rect(original: Rect, handle: ResizeHandle, dx: f32, dy: f32) -> Rect {
    let mut left = original.x;
    let mut top = original.y;
    let mut right = original.right();
    let mut bottom = original.bottom();

    if handle.moves_left() {
        left += dx;
    }
    if handle.moves_right() {
        right += dx;
    }
    if handle.moves_top() {
        top += dy;
    }
    if handle.moves_bottom() {
        bottom += dy;
    }

    Rect::new(left, top, right - left, bottom - top)
}

/// Bring a resized box back inside the page and above the minimum size
///
/// The edge being dragged is clamped to the page. When that would leave the
/// box smaller than `min_size`, the dragged edge stops at the floor; when the
/// floor itself would cross the page boundary the opposite edge moves instead.
pub fn clamp_resize(candidate: Rect, handle: ResizeHandle, page: PageSize, min_size: f32) -> Rect {
    let (x, width) = clamp_axis(
        candidate.x,
        candidate.right(),
        handle.moves_left(),
        handle.moves_right(),
        page.width,
        min_size.min(page.width),
    );
    let (y, height) = clamp_axis(
        candidate.y,
        candidate.bottom(),
        handle.moves_top(),
        handle.moves_bottom(),
        page.height,
        min_size.min(page.height),
    );

    clamp_position(Rect::new(x, y, width, height), page)
}

fn clamp_axis(
    start: f32,
    end: f32,
    moves_start: bool,
    moves_end: bool,
    limit: f32,
    floor: f32,
) -> (f32, f32) {
    let (mut start, mut end) = (start, end);

    if moves_start {
        start = start.max(0.0);
        if end - start < floor {
            start = end - floor;
        }
        if start < 0.0 {
            start = 0.0;
            end = floor;
        }
    } else if moves_end {
        end = end.min(limit);
        if end - start < floor {
            end = start + floor;
        }
        if end > limit {
            end = limit;
            start = limit - floor;
        }
    }

    (start, end - start)
}

/// Corner resize that keeps the original width-to-height ratio
///
/// The axis with the larger relative change drives the new size. Edge
/// handles and degenerate boxes fall back to a free resize.
pub fn resize_keep_aspect(
    original: Rect,
    handle: ResizeHandle,
    dx: f32,
    dy: f32,
    page: PageSize,
    min_size: f32,
) -> Rect {
    if !handle.is_corner() || original.width <= 0.0 || original.height <= 0.0 {
        return clamp_resize(resize_rect(original, handle, dx, dy), handle, page, min_size);
    }

    let ratio = original.width / original.height;
    let raw = resize_rect(original, handle, dx, dy);

    let width_change = (raw.width - original.width).abs() / original.width;
    let height_change = (raw.height - original.height).abs() / original.height;
    let mut width = if width_change >= height_change { raw.width } else { raw.height * ratio };

    // Room left before the dragged corner leaves the page
    let room_x = if handle.moves_left() { original.right() } else { page.width - original.x };
    let room_y = if handle.moves_top() { original.bottom() } else { page.height - original.y };
    let min_width = min_size.max(min_size * ratio);

    width = width.min(room_x).min(room_y * ratio).max(min_width);
    let height = width / ratio;

    let x = if handle.moves_left() { original.right() - width } else { original.x };
    let y = if handle.moves_top() { original.bottom() - height } else { original.y };

    clamp_position(Rect::new(x, y, width, height), page)
}

/// Display-only displacement of an element during a group move
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VisualOffset {
    pub offset_x: f32,
    pub offset_y: f32,
}

/// Single-element move
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub id: ElementId,

    pub view: ViewKind,

    /// Pointer position when the drag started
    pub origin: DocPoint,

    /// Element box when the drag started
    pub start: Rect,
}

impl DragSession {
    pub fn new(id: ElementId, view: ViewKind, origin: DocPoint, start: Rect) -> Self {
        Self { id, view, origin, start }
    }

    /// Clamped box for the current pointer position
    pub fn target(&self, point: DocPoint, page: PageSize) -> Rect {
        let moved = self.start.translated(point.x - self.origin.x, point.y - self.origin.y);
        clamp_position(moved, page)
    }
}

/// Single-element resize from one handle
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSession {
    pub id: ElementId,

    pub view: ViewKind,

    pub handle: ResizeHandle,

    /// Pointer position when the resize started
    pub origin: DocPoint,

    /// Element box when the resize started
    pub start: Rect,

    /// Lock the aspect ratio on corner handles
    pub keep_aspect: bool,
}

impl ResizeSession {
    pub fn new(
        id: ElementId,
        view: ViewKind,
        handle: ResizeHandle,
        origin: DocPoint,
        start: Rect,
        keep_aspect: bool,
    ) -> Self {
        Self { id, view, handle, origin, start, keep_aspect }
    }

    /// Clamped box for the current pointer position
    pub fn target(&self, point: DocPoint, page: PageSize, min_size: f32) -> Rect {
        let dx = point.x - self.origin.x;
        let dy = point.y - self.origin.y;

        if self.keep_aspect {
            resize_keep_aspect(self.start, self.handle, dx, dy, page, min_size)
        } else {
            clamp_resize(resize_rect(self.start, self.handle, dx, dy), self.handle, page, min_size)
        }
    }
}

/// Group move of a multi-selection
///
/// Only the element under the pointer (`active`) is written to the store
/// while the pointer moves; the others are shown through visual offsets
/// until [`MultiDragSession::commit_targets`] computes their final boxes.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiDragSession {
    pub active: ElementId,

    pub view: ViewKind,

    /// Pointer position when the move started
    pub origin: DocPoint,

    /// Members with their boxes at gesture start
    members: Vec<SelectedElement>,

    offsets: HashMap<ElementId, VisualOffset>,
}

impl MultiDragSession {
    pub fn new(
        active: ElementId,
        view: ViewKind,
        origin: DocPoint,
        members: Vec<SelectedElement>,
    ) -> Self {
        Self { active, view, origin, members, offsets: HashMap::new() }
    }

    pub fn members(&self) -> &[SelectedElement] {
        &self.members
    }

    /// Recompute offsets for the pointer position
    ///
    /// Returns the clamped box for the active element, or `None` if the
    /// active element is not a member.
    pub fn update(&mut self, point: DocPoint, page: PageSize) -> Option<Rect> {
        let dx = point.x - self.origin.x;
        let dy = point.y - self.origin.y;

        let mut active_target = None;
        for member in &self.members {
            let target = clamp_position(member.original.translated(dx, dy), page);
            if member.id == self.active {
                active_target = Some(target);
                continue;
            }
            self.offsets.insert(
                member.id.clone(),
                VisualOffset {
                    offset_x: target.x - member.original.x,
                    offset_y: target.y - member.original.y,
                },
            );
        }
        active_target
    }

    /// Visual displacement of a non-active member
    pub fn offset(&self, id: &ElementId) -> Option<VisualOffset> {
        self.offsets.get(id).copied()
    }

    /// Final `(id, before, after)` boxes for the non-active members
    ///
    /// Each member's offset is applied to its original box and clamped
    /// again on its own, so members near the page edge stop independently.
    pub fn commit_targets(&self, page: PageSize) -> Vec<(ElementId, Rect, Rect)> {
        self.members
            .iter()
            .filter(|member| member.id != self.active)
            .map(|member| {
                let offset = self.offsets.get(&member.id).copied().unwrap_or_default();
                let moved = member.original.translated(offset.offset_x, offset.offset_y);
                let after = clamp_position(moved, page);
                (member.id.clone(), member.original, after)
            })
            .collect()
    }

    /// Original box of a member
    pub fn original(&self, id: &ElementId) -> Option<Rect> {
        self.members.iter().find(|member| &member.id == id).map(|member| member.original)
    }
}
