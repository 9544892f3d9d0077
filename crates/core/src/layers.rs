//! Per-view paint order
//!
//! Each view keeps an ordered list of element ids. Index 0 paints at the
//! back, the last index paints on top. Ids of elements that are not in a
//! view's order list paint above every ordered element.

use doc_model::{ElementId, ViewKind};
use std::collections::HashMap;

/// Ordered element ids for every view
#[derive(Debug, Clone, Default)]
pub struct LayerOrderRegistry {
    orders: HashMap<ViewKind, Vec<ElementId>>,
}

impl LayerOrderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the paint order for a view, back to front
    pub fn order(&self, view: ViewKind) -> &[ElementId] {
        self.orders.get(&view).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Get the position of an id within a view's order
    pub fn index_of(&self, id: &ElementId, view: ViewKind) -> Option<usize> {
        self.order(view).iter().position(|entry| entry == id)
    }

    /// Append an id at the top of a view's order
    ///
    /// Returns `false` if the id is already ordered in that view.
    pub fn append(&mut self, id: ElementId, view: ViewKind) -> bool {
        let order = self.orders.entry(view).or_default();
        if order.contains(&id) {
            return false;
        }
        order.push(id);
        true
    }

    /// Insert an id at a given position, clamped to the end of the order
    pub fn insert_at(&mut self, id: ElementId, view: ViewKind, index: usize) -> bool {
        let order = self.orders.entry(view).or_default();
        if order.contains(&id) {
            return false;
        }
        let index = index.min(order.len());
        order.insert(index, id);
        true
    }

    /// Remove an id and return the position it held
    pub fn remove(&mut self, id: &ElementId, view: ViewKind) -> Option<usize> {
        let order = self.orders.get_mut(&view)?;
        let index = order.iter().position(|entry| entry == id)?;
        order.remove(index);
        Some(index)
    }

    /// Move an id to the top. Returns `true` if the order changed.
    pub fn move_to_front(&mut self, id: &ElementId, view: ViewKind) -> bool {
        let Some(order) = self.orders.get_mut(&view) else {
            return false;
        };
        match order.iter().position(|entry| entry == id) {
            Some(index) if index + 1 < order.len() => {
                let entry = order.remove(index);
                order.push(entry);
                true
            }
            _ => false,
        }
    }

    /// Move an id to the bottom. Returns `true` if the order changed.
    pub fn move_to_back(&mut self, id: &ElementId, view: ViewKind) -> bool {
        let Some(order) = self.orders.get_mut(&view) else {
            return false;
        };
        match order.iter().position(|entry| entry == id) {
            Some(index) if index > 0 => {
                let entry = order.remove(index);
                order.insert(0, entry);
                true
            }
            _ => false,
        }
    }

    /// Swap an id with its neighbor above
    pub fn move_forward(&mut self, id: &ElementId, view: ViewKind) -> bool {
        let Some(order) = self.orders.get_mut(&view) else {
            return false;
        };
        match order.iter().position(|entry| entry == id) {
            Some(index) if index + 1 < order.len() => {
                order.swap(index, index + 1);
                true
            }
            _ => false,
        }
    }

    /// Swap an id with its neighbor below
    pub fn move_backward(&mut self, id: &ElementId, view: ViewKind) -> bool {
        let Some(order) = self.orders.get_mut(&view) else {
            return false;
        };
        match order.iter().position(|entry| entry == id) {
            Some(index) if index > 0 => {
                order.swap(index, index - 1);
                true
            }
            _ => false,
        }
    }

    /// Replace a view's order wholesale
    pub fn set_order(&mut self, view: ViewKind, order: Vec<ElementId>) {
        self.orders.insert(view, order);
    }

    pub fn clear(&mut self) {
        self.orders.clear();
    }
}
