//! Element storage partitioned by view
//!
//! The store owns every element and the paint order of each view. Element
//! ids are unique across all views; an element belongs to exactly one view,
//! decided by which partition holds it.

use crate::layers::LayerOrderRegistry;
use doc_model::{
    DocPoint, Element, ElementId, ElementPatch, ProjectSnapshot, Rect, ViewKind, ViewSnapshot,
};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Outcome of [`ElementStore::add`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// The element was stored and appended to its view's paint order
    Added(ElementId),
    /// An element with the same id already exists; nothing changed
    Duplicate(ElementId),
}

impl AddOutcome {
    pub fn id(&self) -> &ElementId {
        match self {
            AddOutcome::Added(id) | AddOutcome::Duplicate(id) => id,
        }
    }

    pub fn is_added(&self) -> bool {
        matches!(self, AddOutcome::Added(_))
    }
}

/// What [`ElementStore::replace_all`] had to repair while loading
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadReport {
    /// Elements now in the store
    pub elements: usize,

    /// Elements skipped because their id was already loaded
    pub duplicates_dropped: usize,

    /// Layer entries removed because no element in that view had the id
    pub stale_layer_entries: usize,

    /// Elements appended to a view's order because the saved order missed them
    pub unordered_appended: usize,
}

/// Element collections for all views plus their paint order
#[derive(Debug, Clone, Default)]
pub struct ElementStore {
    /// Elements per view, in insertion order
    partitions: HashMap<ViewKind, Vec<Element>>,

    /// Owning view of every stored id
    owners: HashMap<ElementId, ViewKind>,

    layers: LayerOrderRegistry,
}

impl ElementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an element in a view and put it on top of the paint order
    pub fn add(&mut self, element: Element, view: ViewKind) -> AddOutcome {
        if let Some(existing) = self.owners.get(&element.id) {
            warn!(
                id = %element.id,
                view = %view,
                existing_view = %existing,
                "duplicate element id rejected"
            );
            return AddOutcome::Duplicate(element.id);
        }

        let id = element.id.clone();
        self.insert(element, view);
        self.layers.append(id.clone(), view);
        debug!(id = %id, view = %view, "element added");
        AddOutcome::Added(id)
    }

    /// Store an element and place it at a specific paint position
    ///
    /// `None` appends on top. Used to restore deleted elements where they were.
    pub fn insert_at_layer(
        &mut self,
        element: Element,
        view: ViewKind,
        layer: Option<usize>,
    ) -> bool {
        if self.owners.contains_key(&element.id) {
            warn!(id = %element.id, view = %view, "cannot restore element, id already present");
            return false;
        }

        let id = element.id.clone();
        self.insert(element, view);
        match layer {
            Some(index) => self.layers.insert_at(id, view, index),
            None => self.layers.append(id, view),
        };
        true
    }

    fn insert(&mut self, element: Element, view: ViewKind) {
        self.owners.insert(element.id.clone(), view);
        self.partitions.entry(view).or_default().push(element);
    }

    /// Merge a patch into an element and return the inverse patch
    ///
    /// Returns `None` when no element has the id.
    pub fn update(&mut self, id: &ElementId, patch: &ElementPatch) -> Option<ElementPatch> {
        let element = self.get_mut(id)?;

        let inverse = element.apply_patch(patch);
        if patch.kind.is_some() && inverse.kind.is_none() {
            warn!(id = %id, "patch kind does not match element type, properties left unchanged");
        }
        Some(inverse)
    }

    /// Remove an element from a view
    ///
    /// Returns the element and the paint position it held. An id that lives
    /// in a different view is left alone.
    pub fn delete(&mut self, id: &ElementId, view: ViewKind) -> Option<(Element, Option<usize>)> {
        if self.owners.get(id) != Some(&view) {
            return None;
        }

        let partition = self.partitions.get_mut(&view)?;
        let index = partition.iter().position(|element| &element.id == id)?;
        let element = partition.remove(index);
        self.owners.remove(id);

        let layer = self.layers.remove(id, view);
        debug!(id = %id, view = %view, "element deleted");
        Some((element, layer))
    }

    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        let view = self.owners.get(id)?;
        self.get_by_view(*view).iter().find(|element| &element.id == id)
    }

    fn get_mut(&mut self, id: &ElementId) -> Option<&mut Element> {
        let view = self.owners.get(id)?;
        self.partitions.get_mut(view)?.iter_mut().find(|element| &element.id == id)
    }

    /// Get the view holding an element
    pub fn view_of(&self, id: &ElementId) -> Option<ViewKind> {
        self.owners.get(id).copied()
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.owners.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// Get all elements in a view, in insertion order
    pub fn get_by_view(&self, view: ViewKind) -> &[Element] {
        self.partitions.get(&view).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Get the elements of one page of a view, in insertion order
    pub fn get_by_view_and_page(&self, view: ViewKind, page: u32) -> Vec<&Element> {
        self.get_by_view(view).iter().filter(|element| element.page == page).collect()
    }

    /// Get the elements of one page of a view in paint order, back to front
    ///
    /// Elements missing from the layer order paint last, in insertion order.
    pub fn get_sorted_elements(&self, view: ViewKind, page: u32) -> Vec<&Element> {
        let rank: HashMap<&ElementId, usize> = self
            .layers
            .order(view)
            .iter()
            .enumerate()
            .map(|(index, id)| (id, index))
            .collect();

        let mut elements = self.get_by_view_and_page(view, page);
        elements.sort_by_key(|element| rank.get(&element.id).copied().unwrap_or(usize::MAX));
        elements
    }

    /// Get the topmost element under a point
    pub fn element_at(&self, view: ViewKind, page: u32, point: DocPoint) -> Option<&Element> {
        self.get_sorted_elements(view, page)
            .into_iter()
            .rev()
            .find(|element| element.rect().contains_point(point))
    }

    /// Get the elements of a page whose boxes intersect `rect`
    pub fn intersecting(&self, view: ViewKind, page: u32, rect: &Rect) -> Vec<&Element> {
        self.get_by_view_and_page(view, page)
            .into_iter()
            .filter(|element| element.rect().intersects(rect))
            .collect()
    }

    pub fn layers(&self) -> &LayerOrderRegistry {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut LayerOrderRegistry {
        &mut self.layers
    }

    /// Replace every collection and paint order from a snapshot
    ///
    /// Repeated ids are dropped (first one wins). Each view's order is
    /// repaired so it names exactly the elements of that view, once each.
    pub fn replace_all(&mut self, snapshot: ProjectSnapshot) -> LoadReport {
        self.partitions.clear();
        self.owners.clear();
        self.layers.clear();

        let mut report = LoadReport::default();

        for (view, saved) in snapshot.views {
            for element in saved.elements {
                if self.owners.contains_key(&element.id) {
                    warn!(id = %element.id, view = %view, "dropping element with repeated id");
                    report.duplicates_dropped += 1;
                    continue;
                }
                self.insert(element, view);
            }

            let members: HashSet<&ElementId> =
                self.get_by_view(view).iter().map(|element| &element.id).collect();
            let mut seen = HashSet::new();
            let mut order = Vec::with_capacity(members.len());
            for id in saved.layer_order {
                if members.contains(&id) && seen.insert(id.clone()) {
                    order.push(id);
                } else {
                    report.stale_layer_entries += 1;
                }
            }
            for element in self.get_by_view(view) {
                if !seen.contains(&element.id) {
                    order.push(element.id.clone());
                    report.unordered_appended += 1;
                }
            }
            self.layers.set_order(view, order);
        }

        report.elements = self.owners.len();
        debug!(
            elements = report.elements,
            duplicates = report.duplicates_dropped,
            stale = report.stale_layer_entries,
            appended = report.unordered_appended,
            "store replaced from snapshot"
        );
        report
    }

    /// Copy every collection and paint order into a snapshot
    pub fn to_snapshot(&self) -> ProjectSnapshot {
        let mut snapshot = ProjectSnapshot::default();
        for view in ViewKind::ALL {
            let elements = self.get_by_view(view).to_vec();
            let layer_order = self.layers.order(view).to_vec();
            if elements.is_empty() && layer_order.is_empty() {
                continue;
            }
            snapshot.views.insert(view, ViewSnapshot { elements, layer_order });
        }
        snapshot
    }
}
