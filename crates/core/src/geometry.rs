//! Coordinate transform between pointer space and document space
//!
//! Every mouse-driven operation (rectangle selection, drag, resize, shape
//! drawing) maps pointer coordinates through this module. In split mode the
//! canvas shows the original page on the left and the translated page on the
//! right, separated by a gap whose width is fixed in device pixels and does
//! not scale with zoom.

use doc_model::{DocPoint, Rect, ViewKind};

/// Position in device pixels, as delivered by the input adapter
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// What the canvas is currently displaying
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// One storage partition fills the canvas
    Single(ViewKind),
    /// Original on the left, translated on the right
    Split,
}

impl ViewMode {
    /// Check if elements of `view` are visible in this mode
    pub fn shows(self, view: ViewKind) -> bool {
        match self {
            ViewMode::Single(shown) => shown == view,
            ViewMode::Split => matches!(view, ViewKind::Original | ViewKind::Translated),
        }
    }
}

impl Default for ViewMode {
    fn default() -> Self {
        ViewMode::Single(ViewKind::Original)
    }
}

/// Page dimensions in document-space units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for PageSize {
    /// US Letter in points
    fn default() -> Self {
        Self { width: 612.0, height: 792.0 }
    }
}

/// Everything the transform needs besides the pointer itself
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformContext {
    /// Top-left of the canvas container in device pixels
    pub container_origin: ScreenPoint,

    /// Current zoom factor (1.0 = 100%)
    pub scale: f32,

    pub view_mode: ViewMode,

    /// Page width in document units, used to size the split panes
    pub page_width: f32,

    /// Gap between split panes in device pixels (unscaled)
    pub split_gap_px: f32,
}

/// A pointer position resolved to a view and document coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPoint {
    pub point: DocPoint,
    pub view: ViewKind,
}

/// Map a pointer position to document space
///
/// Returns `None` when the pointer falls in the gap between split panes or
/// when the scale is not positive; callers abort the operation in that case.
pub fn to_document_space(pointer: ScreenPoint, ctx: &TransformContext) -> Option<ResolvedPoint> {
    if ctx.scale <= 0.0 {
        return None;
    }

    let local_x = pointer.x - ctx.container_origin.x;
    let view = match ctx.view_mode {
        ViewMode::Single(view) => view,
        ViewMode::Split => {
            let left_width = ctx.page_width * ctx.scale;
            if local_x < left_width {
                ViewKind::Original
            } else if local_x < left_width + ctx.split_gap_px {
                return None;
            } else {
                ViewKind::Translated
            }
        }
    };

    Some(ResolvedPoint { point: to_view_space(pointer, ctx, view), view })
}

/// Map a pointer position into the coordinate frame of a specific view
///
/// Used once a gesture has been bound to a view: a drag that started on the
/// left pane keeps measuring against the left pane even if the pointer
/// wanders across the gap.
pub fn to_view_space(pointer: ScreenPoint, ctx: &TransformContext, view: ViewKind) -> DocPoint {
    let scale = if ctx.scale > 0.0 { ctx.scale } else { 1.0 };
    let pane_x = ctx.container_origin.x + pane_offset_px(ctx, view);

    DocPoint::new((pointer.x - pane_x) / scale, (pointer.y - ctx.container_origin.y) / scale)
}

/// Horizontal offset of a view's pane from the container origin, in pixels
fn pane_offset_px(ctx: &TransformContext, view: ViewKind) -> f32 {
    match (ctx.view_mode, view) {
        (ViewMode::Split, ViewKind::Translated) => ctx.page_width * ctx.scale + ctx.split_gap_px,
        _ => 0.0,
    }
}

/// Keep a box inside the page by moving it, never by resizing it
///
/// A box larger than the page is pinned to the page origin on that axis.
pub fn clamp_position(rect: Rect, page: PageSize) -> Rect {
    Rect {
        x: rect.x.min(page.width - rect.width).max(0.0),
        y: rect.y.min(page.height - rect.height).max(0.0),
        ..rect
    }
}
