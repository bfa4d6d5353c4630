use std::collections::BTreeSet;

use simplicial_core::{Attributes, BitMatrix, Label, Representation, SimplicialError};

use crate::boundary::BoundaryMatrices;
use crate::faces::FaceTable;
use crate::index::OrderIndex;

/// General-purpose backend: order index, face table and incrementally
/// maintained boundary matrices, kept in lockstep.
#[derive(Debug, Clone, Default)]
pub struct ReferenceRepresentation {
    index: OrderIndex,
    faces: FaceTable,
    boundaries: BoundaryMatrices,
}

impl ReferenceRepresentation {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Representation for ReferenceRepresentation {
    fn contains(&self, simplex: &Label) -> bool {
        self.index.contains(simplex)
    }

    fn order_of(&self, simplex: &Label) -> Result<usize, SimplicialError> {
        Ok(self.index.slot(simplex)?.order)
    }

    fn index_of(&self, simplex: &Label) -> Result<usize, SimplicialError> {
        Ok(self.index.slot(simplex)?.index)
    }

    fn max_order(&self) -> Option<usize> {
        self.index.max_order()
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn simplices_of_order(&self, order: usize) -> Vec<Label> {
        self.index.of_order(order).to_vec()
    }

    fn count_of_order(&self, order: usize) -> usize {
        self.index.count(order)
    }

    fn faces(&self, simplex: &Label) -> Result<BTreeSet<Label>, SimplicialError> {
        self.faces.faces(simplex).cloned()
    }

    fn cofaces(&self, simplex: &Label) -> Result<BTreeSet<Label>, SimplicialError> {
        self.faces.cofaces(simplex).cloned()
    }

    fn basis_of(&self, simplex: &Label) -> Result<BTreeSet<Label>, SimplicialError> {
        self.faces.basis(simplex).cloned()
    }

    fn simplex_with_basis(&self, basis: &BTreeSet<Label>) -> Option<Label> {
        self.faces.with_basis(basis).cloned()
    }

    fn attributes(&self, simplex: &Label) -> Result<&Attributes, SimplicialError> {
        self.faces.attributes(simplex)
    }

    fn attributes_mut(&mut self, simplex: &Label) -> Result<&mut Attributes, SimplicialError> {
        self.faces.attributes_mut(simplex)
    }

    fn insert(
        &mut self,
        label: Label,
        order: usize,
        faces: &[Label],
        attributes: Attributes,
    ) -> Result<(), SimplicialError> {
        let rows = faces
            .iter()
            .map(|face| self.index.slot(face).map(|slot| slot.index))
            .collect::<Result<Vec<_>, _>>()?;
        let lower_count = order.checked_sub(1).map_or(0, |lower| self.index.count(lower));
        self.index.register(label.clone(), order)?;
        self.faces.insert(label, faces, attributes)?;
        self.boundaries.on_insert(order, &rows, lower_count);
        Ok(())
    }

    fn remove(&mut self, simplex: &Label) -> Result<(), SimplicialError> {
        self.faces.remove(simplex)?;
        let slot = self.index.unregister(simplex)?;
        self.boundaries.on_remove(slot.order, slot.index);
        Ok(())
    }

    fn relabel(&mut self, old: &Label, new: Label) -> Result<(), SimplicialError> {
        self.faces.relabel(old, new.clone())?;
        self.index.relabel(old, new)?;
        Ok(())
    }

    fn boundary_operator(&self, order: usize) -> BitMatrix {
        self.boundaries
            .operator(order, |lower| self.index.count(lower))
    }
}
