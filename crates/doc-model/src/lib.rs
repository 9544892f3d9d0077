//! Plain records shared by the layout editor core and its collaborators.
//!
//! Nothing here owns behavior beyond construction, field access and small
//! geometric helpers. The persistence layer serializes these types verbatim.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random id for elements created locally.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Storage partition an element lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewKind {
    Original,
    Translated,
    FinalLayout,
}

impl ViewKind {
    pub const ALL: [ViewKind; 3] =
        [ViewKind::Original, ViewKind::Translated, ViewKind::FinalLayout];

    pub fn as_str(self) -> &'static str {
        match self {
            ViewKind::Original => "original",
            ViewKind::Translated => "translated",
            ViewKind::FinalLayout => "final-layout",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DocPoint {
    pub x: f32,
    pub y: f32,
}

impl DocPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box in document-space units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Overlap test with inclusive edges: boxes that merely touch intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.right() < other.x
            || self.x > other.right()
            || self.bottom() < other.y
            || self.y > other.bottom())
    }

    pub fn contains_point(&self, point: DocPoint) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }

    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect { x, y, width: right - x, height: bottom - y }
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Rect {
        Rect { x: self.x + dx, y: self.y + dy, ..*self }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextBoxProps {
    pub value: String,
    pub font_size: f32,
    pub font_family: String,
    pub font_weight: String,
    pub color: String,
    pub background_color: Option<String>,
    pub border_color: Option<String>,
    pub border_width: f32,
    pub border_radius: f32,
    pub padding: f32,
    pub alignment: TextAlignment,
    pub line_height: f32,
    pub letter_spacing: f32,
}

impl Default for TextBoxProps {
    fn default() -> Self {
        Self {
            value: String::new(),
            font_size: 12.0,
            font_family: "Helvetica".to_owned(),
            font_weight: "normal".to_owned(),
            color: "#000000".to_owned(),
            background_color: None,
            border_color: None,
            border_width: 0.0,
            border_radius: 0.0,
            padding: 8.0,
            alignment: TextAlignment::Left,
            line_height: 1.2,
            letter_spacing: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeVariant {
    #[default]
    Rectangle,
    Circle,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShapeProps {
    pub variant: ShapeVariant,
    pub fill_color: String,
    pub fill_opacity: f32,
    pub border_color: String,
    pub border_width: f32,
    pub rotation: f32,
    /// Line endpoints relative to the element's top-left corner.
    pub line_start: Option<DocPoint>,
    pub line_end: Option<DocPoint>,
}

impl Default for ShapeProps {
    fn default() -> Self {
        Self {
            variant: ShapeVariant::Rectangle,
            fill_color: "#ffffff".to_owned(),
            fill_opacity: 0.0,
            border_color: "#000000".to_owned(),
            border_width: 1.0,
            rotation: 0.0,
            line_start: None,
            line_end: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageProps {
    pub src: String,
    pub rotation: f32,
    pub opacity: f32,
    pub border_color: Option<String>,
    pub border_width: f32,
    pub border_radius: f32,
}

impl Default for ImageProps {
    fn default() -> Self {
        Self {
            src: String::new(),
            rotation: 0.0,
            opacity: 1.0,
            border_color: None,
            border_width: 0.0,
            border_radius: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeletionProps {
    pub background_color: String,
    pub opacity: f32,
}

impl Default for DeletionProps {
    fn default() -> Self {
        Self { background_color: "#ffffff".to_owned(), opacity: 1.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ElementKind {
    TextBox(TextBoxProps),
    Shape(ShapeProps),
    Image(ImageProps),
    DeletionRectangle(DeletionProps),
}

impl ElementKind {
    pub fn element_type(&self) -> ElementType {
        match self {
            ElementKind::TextBox(_) => ElementType::TextBox,
            ElementKind::Shape(_) => ElementType::Shape,
            ElementKind::Image(_) => ElementType::Image,
            ElementKind::DeletionRectangle(_) => ElementType::DeletionRectangle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementType {
    TextBox,
    Shape,
    Image,
    DeletionRectangle,
}

/// A positioned element. View membership is positional: whichever
/// collection holds the element decides its view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// 1-based page number.
    pub page: u32,
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl Element {
    pub fn new(id: ElementId, page: u32, rect: Rect, kind: ElementKind) -> Self {
        Self { id, x: rect.x, y: rect.y, width: rect.width, height: rect.height, page, kind }
    }

    pub fn text_box(
        id: impl Into<String>,
        page: u32,
        rect: Rect,
        value: impl Into<String>,
    ) -> Self {
        let props = TextBoxProps { value: value.into(), ..TextBoxProps::default() };
        Self::new(ElementId::new(id), page, rect, ElementKind::TextBox(props))
    }

    pub fn shape(id: impl Into<String>, page: u32, rect: Rect, variant: ShapeVariant) -> Self {
        let props = ShapeProps { variant, ..ShapeProps::default() };
        Self::new(ElementId::new(id), page, rect, ElementKind::Shape(props))
    }

    pub fn image(id: impl Into<String>, page: u32, rect: Rect, src: impl Into<String>) -> Self {
        let props = ImageProps { src: src.into(), ..ImageProps::default() };
        Self::new(ElementId::new(id), page, rect, ElementKind::Image(props))
    }

    pub fn deletion(id: impl Into<String>, page: u32, rect: Rect) -> Self {
        let kind = ElementKind::DeletionRectangle(DeletionProps::default());
        Self::new(ElementId::new(id), page, rect, kind)
    }

    pub fn rect(&self) -> Rect {
        Rect { x: self.x, y: self.y, width: self.width, height: self.height }
    }

    pub fn element_type(&self) -> ElementType {
        self.kind.element_type()
    }

    /// Merges `patch` into this element and returns the patch that undoes it.
    ///
    /// A `kind` whose variant differs from the element's own is skipped and
    /// left out of the inverse.
    pub fn apply_patch(&mut self, patch: &ElementPatch) -> ElementPatch {
        let mut inverse = ElementPatch::default();

        if let Some(x) = patch.x {
            inverse.x = Some(std::mem::replace(&mut self.x, x));
        }
        if let Some(y) = patch.y {
            inverse.y = Some(std::mem::replace(&mut self.y, y));
        }
        if let Some(width) = patch.width {
            inverse.width = Some(std::mem::replace(&mut self.width, width));
        }
        if let Some(height) = patch.height {
            inverse.height = Some(std::mem::replace(&mut self.height, height));
        }
        if let Some(page) = patch.page {
            inverse.page = Some(std::mem::replace(&mut self.page, page));
        }
        if let Some(kind) = &patch.kind {
            if kind.element_type() == self.element_type() {
                inverse.kind = Some(std::mem::replace(&mut self.kind, kind.clone()));
            }
        }

        inverse
    }
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ElementKind>,
}

impl ElementPatch {
    pub fn position(x: f32, y: f32) -> Self {
        Self { x: Some(x), y: Some(y), ..Self::default() }
    }

    pub fn rect(rect: Rect) -> Self {
        Self {
            x: Some(rect.x),
            y: Some(rect.y),
            width: Some(rect.width),
            height: Some(rect.height),
            ..Self::default()
        }
    }

    pub fn kind(kind: ElementKind) -> Self {
        Self { kind: Some(kind), ..Self::default() }
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_none()
            && self.y.is_none()
            && self.width.is_none()
            && self.height.is_none()
            && self.page.is_none()
            && self.kind.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSnapshot {
    pub elements: Vec<Element>,
    pub layer_order: Vec<ElementId>,
}

/// Whole-project element state, as handed to and received from persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSnapshot {
    pub schema_version: u32,
    #[serde(default)]
    pub views: BTreeMap<ViewKind, ViewSnapshot>,
}

impl Default for ProjectSnapshot {
    fn default() -> Self {
        Self { schema_version: SNAPSHOT_SCHEMA_VERSION, views: BTreeMap::new() }
    }
}

impl ProjectSnapshot {
    pub fn view(&self, view: ViewKind) -> Option<&ViewSnapshot> {
        self.views.get(&view)
    }

    pub fn element_count(&self) -> usize {
        self.views.values().map(|view| view.elements.len()).sum()
    }
}
