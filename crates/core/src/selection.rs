//! Rectangle selection and selection state
//!
//! A rubber band drawn on the canvas selects every element on the current
//! page of the active view whose box touches the band. Each selected member
//! carries a snapshot of its box taken when it was selected; group moves are
//! computed from these snapshots, not from the live store.

use crate::store::ElementStore;
use doc_model::{DocPoint, Element, ElementId, ElementType, Rect, ViewKind};

/// Normalized rectangle between two drag corners
pub fn rect_from_corners(a: DocPoint, b: DocPoint) -> Rect {
    let x = a.x.min(b.x);
    let y = a.y.min(b.y);
    Rect::new(x, y, (a.x - b.x).abs(), (a.y - b.y).abs())
}

/// A rectangle counts as a click when both sides are below the threshold
pub fn is_click(rect: &Rect, min_size: f32) -> bool {
    rect.width < min_size && rect.height < min_size
}

/// A selected element and its box at selection time
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedElement {
    pub id: ElementId,

    pub element_type: ElementType,

    /// Box when the element was selected (or when the selection was last refreshed)
    pub original: Rect,
}

impl SelectedElement {
    pub fn from_element(element: &Element) -> Self {
        Self {
            id: element.id.clone(),
            element_type: element.element_type(),
            original: element.rect(),
        }
    }
}

/// Elements whose boxes intersect `rect`, edges inclusive
pub fn hit_test_rectangle<'a>(
    rect: &Rect,
    candidates: impl IntoIterator<Item = &'a Element>,
) -> Vec<SelectedElement> {
    candidates
        .into_iter()
        .filter(|element| element.rect().intersects(rect))
        .map(SelectedElement::from_element)
        .collect()
}

/// Axis-aligned union of element boxes; `None` for an empty set
pub fn compute_bounds<'a>(boxes: impl IntoIterator<Item = &'a Rect>) -> Option<Rect> {
    boxes.into_iter().fold(None, |bounds: Option<Rect>, rect| match bounds {
        Some(bounds) => Some(bounds.union(rect)),
        None => Some(*rect),
    })
}

/// Current selection, bound to one view and one page
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub view: ViewKind,
    pub page: u32,
    members: Vec<SelectedElement>,
    bounds: Option<Rect>,
}

impl Selection {
    pub fn new(view: ViewKind, page: u32, members: Vec<SelectedElement>) -> Self {
        let bounds = compute_bounds(members.iter().map(|member| &member.original));
        Self { view, page, members, bounds }
    }

    pub fn single(element: &Element, view: ViewKind) -> Self {
        Self::new(view, element.page, vec![SelectedElement::from_element(element)])
    }

    pub fn members(&self) -> &[SelectedElement] {
        &self.members
    }

    pub fn ids(&self) -> impl Iterator<Item = &ElementId> {
        self.members.iter().map(|member| &member.id)
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.members.iter().any(|member| &member.id == id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_multi(&self) -> bool {
        self.members.len() > 1
    }

    /// Bounding box of all members, as of the last refresh
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// Re-snapshot member boxes from the store and recompute the bounds
    ///
    /// Members that no longer exist or have left the page are dropped.
    pub fn refresh(&mut self, store: &ElementStore) {
        let page = self.page;
        self.members.retain_mut(|member| match store.get(&member.id) {
            Some(element) if element.page == page => {
                member.original = element.rect();
                true
            }
            _ => false,
        });
        self.bounds = compute_bounds(self.members.iter().map(|member| &member.original));
    }
}

/// In-progress rectangle selection
#[derive(Debug, Clone, PartialEq)]
pub struct RubberBand {
    pub view: ViewKind,
    pub page: u32,
    anchor: DocPoint,
    current: DocPoint,

    /// Elements the band would select if released now
    preview: Vec<ElementId>,
}

impl RubberBand {
    pub fn new(view: ViewKind, page: u32, anchor: DocPoint) -> Self {
        Self { view, page, anchor, current: anchor, preview: Vec::new() }
    }

    pub fn rect(&self) -> Rect {
        rect_from_corners(self.anchor, self.current)
    }

    pub fn preview(&self) -> &[ElementId] {
        &self.preview
    }

    /// Move the free corner and recompute the highlight preview
    pub fn update(&mut self, point: DocPoint, store: &ElementStore, min_size: f32) {
        self.current = point;

        let rect = self.rect();
        self.preview = if is_click(&rect, min_size) {
            Vec::new()
        } else {
            store
                .intersecting(self.view, self.page, &rect)
                .into_iter()
                .map(|element| element.id.clone())
                .collect()
        };
    }

    /// Resolve the band on release
    ///
    /// Returns `None` for a click-sized band, otherwise the hit elements
    /// (possibly none).
    pub fn resolve(&self, store: &ElementStore, min_size: f32) -> Option<Vec<SelectedElement>> {
        let rect = self.rect();
        if is_click(&rect, min_size) {
            return None;
        }
        Some(hit_test_rectangle(&rect, store.get_by_view_and_page(self.view, self.page)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ElementStore {
        let mut store = ElementStore::new();
        let small = Rect::new(10.0, 10.0, 50.0, 20.0);
        store.add(Element::text_box("a", 1, small, "A"), ViewKind::Original);
        store.add(
            Element::image("b", 1, Rect::new(100.0, 100.0, 40.0, 40.0), "b.png"),
            ViewKind::Original,
        );
        store.add(Element::text_box("c", 2, small, "C"), ViewKind::Original);
        store.add(Element::text_box("d", 1, small, "D"), ViewKind::Translated);
        store
    }

    #[test]
    fn test_rect_from_corners_normalizes() {
        let rect = rect_from_corners(DocPoint::new(50.0, 10.0), DocPoint::new(20.0, 40.0));
        assert_eq!(rect, Rect::new(20.0, 10.0, 30.0, 30.0));
    }

    #[test]
    fn test_click_threshold_needs_both_sides_small() {
        assert!(is_click(&Rect::new(0.0, 0.0, 4.0, 4.0), 5.0));
        assert!(!is_click(&Rect::new(0.0, 0.0, 4.0, 30.0), 5.0));
        assert!(!is_click(&Rect::new(0.0, 0.0, 5.0, 5.0), 5.0));
    }

    #[test]
    fn test_hit_test_touching_edge_counts() {
        let store = store();
        // Band's right edge touches element a's left edge
        let band = Rect::new(0.0, 0.0, 10.0, 10.0);
        let hits = hit_test_rectangle(&band, store.get_by_view_and_page(ViewKind::Original, 1));

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.as_str(), "a");
        assert_eq!(hits[0].original, Rect::new(10.0, 10.0, 50.0, 20.0));
    }

    #[test]
    fn test_band_is_scoped_to_view_and_page() {
        let store = store();
        let mut band = RubberBand::new(ViewKind::Original, 1, DocPoint::new(0.0, 0.0));
        band.update(DocPoint::new(200.0, 200.0), &store, 5.0);

        let ids: Vec<_> = band.preview().iter().map(ElementId::as_str).collect();
        assert_eq!(ids, vec!["a", "b"]);

        let selected = band.resolve(&store, 5.0).unwrap();
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[1].element_type, ElementType::Image);
    }

    #[test]
    fn test_tiny_band_resolves_to_click() {
        let store = store();
        let mut band = RubberBand::new(ViewKind::Original, 1, DocPoint::new(12.0, 12.0));
        band.update(DocPoint::new(14.0, 15.0), &store, 5.0);

        assert!(band.preview().is_empty());
        assert!(band.resolve(&store, 5.0).is_none());
    }

    #[test]
    fn test_bounds_union_and_refresh() {
        let mut store = store();
        let members = vec![
            SelectedElement::from_element(store.get(&ElementId::from("a")).unwrap()),
            SelectedElement::from_element(store.get(&ElementId::from("b")).unwrap()),
        ];
        let mut selection = Selection::new(ViewKind::Original, 1, members);
        assert_eq!(selection.bounds(), Some(Rect::new(10.0, 10.0, 130.0, 130.0)));
        assert!(selection.is_multi());

        store.delete(&ElementId::from("b"), ViewKind::Original);
        selection.refresh(&store);

        assert_eq!(selection.len(), 1);
        assert_eq!(selection.bounds(), Some(Rect::new(10.0, 10.0, 50.0, 20.0)));
    }

    #[test]
    fn test_empty_bounds() {
        assert_eq!(compute_bounds(std::iter::empty()), None);
    }
}
