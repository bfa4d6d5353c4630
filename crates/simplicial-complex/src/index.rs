use std::collections::BTreeMap;

use simplicial_core::{Label, SimplicialError};

/// Position of a simplex: its order and dense index within that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// Order of the simplex.
    pub order: usize,
    /// Dense index within the order's canonical sequence.
    pub index: usize,
}

/// Identity and order index: label to slot, and per-order canonical sequences.
///
/// Indices stay dense. Removing a simplex shifts every later simplex of the
/// same order down by one, matching the row/column shift in the boundary
/// matrices.
#[derive(Debug, Clone, Default)]
pub struct OrderIndex {
    slots: BTreeMap<Label, Slot>,
    orders: Vec<Vec<Label>>,
}

impl OrderIndex {
    /// Registers a new label at the end of its order's sequence.
    ///
    /// Orders must be opened contiguously: registering order `k` requires
    /// order `k - 1` to exist.
    pub fn register(&mut self, label: Label, order: usize) -> Result<Slot, SimplicialError> {
        if self.slots.contains_key(&label) {
            return Err(SimplicialError::duplicate_label(&label));
        }
        if order > self.orders.len() {
            return Err(
                SimplicialError::invalid_order("order-gap", "lower orders are empty")
                    .with_context("order", order)
                    .with_context("max_order", self.orders.len() as i64 - 1),
            );
        }
        if order == self.orders.len() {
            self.orders.push(Vec::new());
        }
        let sequence = &mut self.orders[order];
        let slot = Slot {
            order,
            index: sequence.len(),
        };
        sequence.push(label.clone());
        self.slots.insert(label, slot);
        Ok(slot)
    }

    /// Removes a label and compacts its order. Trailing empty orders are dropped.
    pub fn unregister(&mut self, label: &Label) -> Result<Slot, SimplicialError> {
        let slot = self
            .slots
            .remove(label)
            .ok_or_else(|| SimplicialError::not_found(label))?;
        let sequence = &mut self.orders[slot.order];
        sequence.remove(slot.index);
        for (index, later) in sequence.iter().enumerate().skip(slot.index) {
            if let Some(entry) = self.slots.get_mut(later) {
                entry.index = index;
            }
        }
        while self.orders.last().is_some_and(Vec::is_empty) {
            self.orders.pop();
        }
        Ok(slot)
    }

    /// Renames a label in place, keeping its slot.
    pub fn relabel(&mut self, old: &Label, new: Label) -> Result<Slot, SimplicialError> {
        if self.slots.contains_key(&new) {
            return Err(SimplicialError::duplicate_label(&new));
        }
        let slot = self
            .slots
            .remove(old)
            .ok_or_else(|| SimplicialError::not_found(old))?;
        self.orders[slot.order][slot.index] = new.clone();
        self.slots.insert(new, slot);
        Ok(slot)
    }

    /// Slot of a label.
    pub fn slot(&self, label: &Label) -> Result<Slot, SimplicialError> {
        self.slots
            .get(label)
            .copied()
            .ok_or_else(|| SimplicialError::not_found(label))
    }

    /// Whether the label is registered.
    pub fn contains(&self, label: &Label) -> bool {
        self.slots.contains_key(label)
    }

    /// Canonical sequence of an order; empty above the maximum order.
    pub fn of_order(&self, order: usize) -> &[Label] {
        self.orders.get(order).map_or(&[], Vec::as_slice)
    }

    /// Number of simplices of an order.
    pub fn count(&self, order: usize) -> usize {
        self.of_order(order).len()
    }

    /// Largest non-empty order.
    pub fn max_order(&self) -> Option<usize> {
        self.orders.len().checked_sub(1)
    }

    /// Total number of registered labels.
    pub fn len(&self) -> usize {
        self.slots.len()
    }
}
