use std::collections::{BTreeMap, BTreeSet};

use simplicial_core::{Attributes, BitMatrix, Label, Representation, SimplicialError};

use crate::index::OrderIndex;

/// Backend restricted to points and edges, stored as an incidence graph.
///
/// Boundary operators are assembled on demand from the incidence lists
/// rather than maintained incrementally.
#[derive(Debug, Clone, Default)]
pub struct GraphRepresentation {
    index: OrderIndex,
    endpoints: BTreeMap<Label, BTreeSet<Label>>,
    incident: BTreeMap<Label, BTreeSet<Label>>,
    attributes: BTreeMap<Label, Attributes>,
}

impl GraphRepresentation {
    /// Creates an empty graph backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Points joined to `point` by an edge.
    pub fn neighbours(&self, point: &Label) -> Result<BTreeSet<Label>, SimplicialError> {
        let edges = self
            .incident
            .get(point)
            .ok_or_else(|| SimplicialError::not_found(point))?;
        Ok(edges
            .iter()
            .filter_map(|edge| self.endpoints.get(edge))
            .flat_map(|ends| ends.iter())
            .filter(|end| *end != point)
            .cloned()
            .collect())
    }

    fn order_checked(&self, simplex: &Label) -> Result<usize, SimplicialError> {
        Ok(self.index.slot(simplex)?.order)
    }
}

impl Representation for GraphRepresentation {
    fn order_limit(&self) -> Option<usize> {
        Some(1)
    }

    fn contains(&self, simplex: &Label) -> bool {
        self.index.contains(simplex)
    }

    fn order_of(&self, simplex: &Label) -> Result<usize, SimplicialError> {
        self.order_checked(simplex)
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
        match self.order_checked(simplex)? {
            0 => Ok(BTreeSet::new()),
            _ => Ok(self.endpoints.get(simplex).cloned().unwrap_or_default()),
        }
    }

    fn cofaces(&self, simplex: &Label) -> Result<BTreeSet<Label>, SimplicialError> {
        match self.order_checked(simplex)? {
            0 => Ok(self.incident.get(simplex).cloned().unwrap_or_default()),
            _ => Ok(BTreeSet::new()),
        }
    }

    fn basis_of(&self, simplex: &Label) -> Result<BTreeSet<Label>, SimplicialError> {
        match self.order_checked(simplex)? {
            0 => Ok(BTreeSet::from([simplex.clone()])),
            _ => self.faces(simplex),
        }
    }

    fn simplex_with_basis(&self, basis: &BTreeSet<Label>) -> Option<Label> {
        let mut points = basis.iter();
        match (points.next(), points.next(), points.next()) {
            (Some(point), None, None) => self
                .incident
                .contains_key(point)
                .then(|| point.clone()),
            (Some(a), Some(b), None) => {
                let from_a = self.incident.get(a)?;
                let from_b = self.incident.get(b)?;
                from_a.intersection(from_b).next().cloned()
            }
            _ => None,
        }
    }

    fn attributes(&self, simplex: &Label) -> Result<&Attributes, SimplicialError> {
        self.attributes
            .get(simplex)
            .ok_or_else(|| SimplicialError::not_found(simplex))
    }

    fn attributes_mut(&mut self, simplex: &Label) -> Result<&mut Attributes, SimplicialError> {
        self.attributes
            .get_mut(simplex)
            .ok_or_else(|| SimplicialError::not_found(simplex))
    }

    fn insert(
        &mut self,
        label: Label,
        order: usize,
        faces: &[Label],
        attributes: Attributes,
    ) -> Result<(), SimplicialError> {
        if order > 1 {
            return Err(SimplicialError::invalid_structure(
                "order-limit",
                "graph representation stores points and edges only",
            )
            .with_context("order", order));
        }
        for face in faces {
            if !self.incident.contains_key(face) {
                return Err(SimplicialError::not_found(face));
            }
        }
        self.index.register(label.clone(), order)?;
        if order == 0 {
            self.incident.insert(label.clone(), BTreeSet::new());
        } else {
            for face in faces {
                if let Some(edges) = self.incident.get_mut(face) {
                    edges.insert(label.clone());
                }
            }
            self.endpoints
                .insert(label.clone(), faces.iter().cloned().collect());
        }
        self.attributes.insert(label, attributes);
        Ok(())
    }

    fn remove(&mut self, simplex: &Label) -> Result<(), SimplicialError> {
        if self.incident.get(simplex).is_some_and(|edges| !edges.is_empty()) {
            return Err(SimplicialError::invalid_structure(
                "has-cofaces",
                "point still has incident edges",
            )
            .with_context("simplex", simplex));
        }
        self.index.unregister(simplex)?;
        self.incident.remove(simplex);
        if let Some(ends) = self.endpoints.remove(simplex) {
            for end in ends {
                if let Some(edges) = self.incident.get_mut(&end) {
                    edges.remove(simplex);
                }
            }
        }
        self.attributes.remove(simplex);
        Ok(())
    }

    fn relabel(&mut self, old: &Label, new: Label) -> Result<(), SimplicialError> {
        self.index.relabel(old, new.clone())?;
        if let Some(edges) = self.incident.remove(old) {
            for edge in &edges {
                if let Some(ends) = self.endpoints.get_mut(edge) {
                    ends.remove(old);
                    ends.insert(new.clone());
                }
            }
            self.incident.insert(new.clone(), edges);
        }
        if let Some(ends) = self.endpoints.remove(old) {
            for end in &ends {
                if let Some(edges) = self.incident.get_mut(end) {
                    edges.remove(old);
                    edges.insert(new.clone());
                }
            }
            self.endpoints.insert(new.clone(), ends);
        }
        if let Some(attributes) = self.attributes.remove(old) {
            self.attributes.insert(new, attributes);
        }
        Ok(())
    }

    fn boundary_operator(&self, order: usize) -> BitMatrix {
        match order {
            0 => BitMatrix::zeros(0, self.index.count(0)),
            1 => {
                let mut matrix = BitMatrix::zeros(self.index.count(0), 0);
                for edge in self.index.of_order(1) {
                    let rows: Vec<usize> = self
                        .endpoints
                        .get(edge)
                        .into_iter()
                        .flatten()
                        .filter_map(|end| self.index.slot(end).ok())
                        .map(|slot| slot.index)
                        .collect();
                    matrix.push_column(&rows);
                }
                matrix
            }
            _ => BitMatrix::zeros(self.index.count(order - 1), 0),
        }
    }
}
