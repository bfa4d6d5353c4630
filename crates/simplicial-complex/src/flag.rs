//! Flag (clique) completion.
//!
//! A complex is flag when every set of points that is pairwise joined by
//! edges spans a simplex. Completion works upwards from a frontier of new
//! simplices: each new `k`-simplex is extended by every point adjacent to
//! its whole basis, provided all `k`-faces of the extension already exist.
//! Each pass feeds the simplices it created into the next until nothing is
//! added.

use std::collections::BTreeSet;

use simplicial_core::{Label, Representation, SimplicialError};

use crate::complex::SimplicialComplex;

impl<R: Representation> SimplicialComplex<R> {
    /// Returns a flag-completed copy of this complex.
    pub fn flag_complex(&self) -> Result<Self, SimplicialError> {
        let mut completed = self.clone();
        completed.complete_flag()?;
        Ok(completed)
    }

    /// Completes the complex to its flag complex in place, returning the
    /// simplices added. Completing twice adds nothing the second time.
    pub fn complete_flag(&mut self) -> Result<Vec<Label>, SimplicialError> {
        let frontier = self.simplices(false);
        self.grow_flag_complex(&frontier)
    }

    /// Adds every higher simplex implied by `new_simplices`, assuming the
    /// rest of the complex is already flag. Returns the simplices added.
    pub fn grow_flag_complex(
        &mut self,
        new_simplices: &[Label],
    ) -> Result<Vec<Label>, SimplicialError> {
        let limit = self.order_limit();
        let mut frontier: Vec<Label> = Vec::new();
        for simplex in new_simplices {
            if self.order_of(simplex)? >= 1 {
                frontier.push(simplex.clone());
            }
        }
        let mut added = Vec::new();
        let mut pass = 0usize;
        while !frontier.is_empty() {
            pass += 1;
            let mut next = Vec::new();
            for simplex in &frontier {
                if !self.contains_simplex(simplex) {
                    continue;
                }
                let order = self.order_of(simplex)?;
                if limit.is_some_and(|limit| order >= limit) {
                    continue;
                }
                let basis = self.basis_of(simplex)?;
                for apex in self.common_neighbours(&basis)? {
                    let mut extended = basis.clone();
                    extended.insert(apex);
                    if let Some(created) = self.fill_if_bounded(&extended)? {
                        next.push(created);
                    }
                }
            }
            tracing::debug!(pass, added = next.len(), "flag growth pass");
            added.extend(next.iter().cloned());
            frontier = next;
        }
        Ok(added)
    }

    /// Points joined by an edge to every point of `basis`, excluding the basis.
    fn common_neighbours(&self, basis: &BTreeSet<Label>) -> Result<BTreeSet<Label>, SimplicialError> {
        let mut common: Option<BTreeSet<Label>> = None;
        for point in basis {
            let mut neighbours = BTreeSet::new();
            for edge in self.cofaces(point)? {
                neighbours.extend(self.basis_of(&edge)?.into_iter().filter(|end| end != point));
            }
            common = Some(match common {
                None => neighbours,
                Some(so_far) => so_far.intersection(&neighbours).cloned().collect(),
            });
        }
        let mut common = common.unwrap_or_default();
        common.retain(|point| !basis.contains(point));
        Ok(common)
    }

    /// Adds the simplex spanned by `basis` when it is missing and all of its
    /// facets are present.
    fn fill_if_bounded(&mut self, basis: &BTreeSet<Label>) -> Result<Option<Label>, SimplicialError> {
        let points: Vec<Label> = basis.iter().cloned().collect();
        if self.simplex_with_basis(&points).is_some() {
            return Ok(None);
        }
        let mut faces = Vec::with_capacity(points.len());
        for dropped in &points {
            let facet: Vec<Label> = points.iter().filter(|p| *p != dropped).cloned().collect();
            match self.simplex_with_basis(&facet) {
                Some(face) => faces.push(face),
                None => return Ok(None),
            }
        }
        self.add_simplex(&faces, None, None).map(Some)
    }
}
