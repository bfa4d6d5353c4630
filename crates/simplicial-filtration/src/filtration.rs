use std::collections::{BTreeMap, BTreeSet};
use std::ops::Bound;

use simplicial_complex::{ComplexConfig, ReferenceRepresentation, SimplicialComplex};
use simplicial_core::{Attributes, Label, Representation, SimplicialError};

/// A complex whose simplices carry the index at which they were added.
///
/// The filtration is monotone: a simplex never appears before any of its
/// faces. Queries answer for the complex at the current index, which holds
/// every simplex added at that index or earlier.
#[derive(Debug, Clone)]
pub struct Filtration<R: Representation = ReferenceRepresentation> {
    complex: SimplicialComplex<R>,
    index: i64,
    appears: BTreeMap<Label, i64>,
    includes: BTreeMap<i64, BTreeSet<Label>>,
}

impl Default for Filtration<ReferenceRepresentation> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Filtration<ReferenceRepresentation> {
    /// Empty filtration positioned at `index`.
    pub fn new(index: i64) -> Self {
        Self::with_backend(ComplexConfig::default(), index)
    }
}

impl<R: Representation> Filtration<R> {
    /// Empty filtration over a complex built with `config`.
    pub fn with_backend(config: ComplexConfig, index: i64) -> Self {
        Self {
            complex: SimplicialComplex::with_backend(config),
            index,
            appears: BTreeMap::new(),
            includes: BTreeMap::from([(index, BTreeSet::new())]),
        }
    }

    /// The underlying complex across all indices.
    pub fn complex(&self) -> &SimplicialComplex<R> {
        &self.complex
    }

    /// Current index.
    pub fn index(&self) -> i64 {
        self.index
    }

    /// Indices in ascending order.
    pub fn indices(&self) -> Vec<i64> {
        self.includes.keys().copied().collect()
    }

    /// Whether `index` is one of the filtration's indices.
    pub fn is_index(&self, index: i64) -> bool {
        self.includes.contains_key(&index)
    }

    /// Moves to `index`, registering it if new.
    pub fn set_index(&mut self, index: i64) {
        self.includes.entry(index).or_default();
        self.index = index;
    }

    /// Moves to the smallest index.
    pub fn set_minimum_index(&mut self) -> i64 {
        if let Some(first) = self.includes.keys().next().copied() {
            self.index = first;
        }
        self.index
    }

    /// Moves to the largest index.
    pub fn set_maximum_index(&mut self) -> i64 {
        if let Some(last) = self.includes.keys().next_back().copied() {
            self.index = last;
        }
        self.index
    }

    /// Moves to the next larger index; stays put at the largest.
    pub fn set_next_index(&mut self) -> i64 {
        if let Some(next) = self
            .includes
            .range((Bound::Excluded(self.index), Bound::Unbounded))
            .next()
            .map(|(index, _)| *index)
        {
            self.index = next;
        }
        self.index
    }

    /// Moves to the next smaller index; stays put at the smallest.
    pub fn set_previous_index(&mut self) -> i64 {
        if let Some(previous) = self
            .includes
            .range(..self.index)
            .next_back()
            .map(|(index, _)| *index)
        {
            self.index = previous;
        }
        self.index
    }

    /// Adds a simplex from its faces at the current index.
    ///
    /// Every face must already be present at the current index.
    pub fn add_simplex(
        &mut self,
        faces: &[Label],
        label: Option<Label>,
        attributes: Option<Attributes>,
    ) -> Result<Label, SimplicialError> {
        for face in faces {
            self.require_visible(face)?;
        }
        let label = self.complex.add_simplex(faces, label, attributes)?;
        self.record(label.clone());
        Ok(label)
    }

    /// Adds the simplex spanned by `basis` at the current index, creating
    /// missing faces at the current index too.
    pub fn add_simplex_with_basis(
        &mut self,
        basis: &[Label],
        label: Option<Label>,
        attributes: Option<Attributes>,
    ) -> Result<Label, SimplicialError> {
        let points: BTreeSet<&Label> = basis.iter().collect();
        for point in &points {
            if !self.complex.contains_simplex(point) {
                continue;
            }
            for member in self.complex.part_of(point)? {
                let within = self
                    .complex
                    .basis_of(&member)?
                    .iter()
                    .all(|p| points.contains(p));
                if within {
                    self.require_visible(&member)?;
                }
            }
        }
        let label = self.complex.add_simplex_with_basis(basis, label, attributes)?;
        let created: Vec<Label> = self
            .complex
            .closure_of(&label)?
            .into_iter()
            .filter(|simplex| !self.appears.contains_key(simplex))
            .collect();
        for simplex in created {
            self.record(simplex);
        }
        Ok(label)
    }

    /// Adds a new point at the current index.
    pub fn add_point(
        &mut self,
        label: Option<Label>,
        attributes: Option<Attributes>,
    ) -> Result<Label, SimplicialError> {
        self.add_simplex(&[], label, attributes)
    }

    /// Like [`add_simplex_with_basis`](Self::add_simplex_with_basis), but
    /// returns the simplex already spanning `basis` when it is present at
    /// the current index.
    pub fn ensure_simplex_with_basis(
        &mut self,
        basis: &[Label],
        label: Option<Label>,
        attributes: Option<Attributes>,
    ) -> Result<Label, SimplicialError> {
        if let Some(existing) = self.complex.simplex_with_basis(basis) {
            self.require_visible(&existing)?;
            return Ok(existing);
        }
        self.add_simplex_with_basis(basis, label, attributes)
    }

    /// Adds a fresh simplex of `order` on new points, tagging its whole
    /// closure with the current index.
    pub fn add_simplex_of_order(
        &mut self,
        order: usize,
        label: Option<Label>,
        attributes: Option<Attributes>,
    ) -> Result<Label, SimplicialError> {
        let label = self.complex.add_simplex_of_order(order, label, attributes)?;
        for simplex in self.complex.closure_of(&label)? {
            self.record(simplex);
        }
        Ok(label)
    }

    /// Completes the complex at the current index to its flag complex.
    ///
    /// Only simplices present at the current index take part. Returns the
    /// simplices tagged with the current index.
    pub fn complete_flag(&mut self) -> Result<Vec<Label>, SimplicialError> {
        let mut snapshot = self.snap()?;
        let grown = snapshot.complete_flag()?;
        self.adopt(&snapshot, &grown)
    }

    /// Adds every higher simplex implied by `new_simplices`, which must be
    /// present at the current index.
    pub fn grow_flag_complex(
        &mut self,
        new_simplices: &[Label],
    ) -> Result<Vec<Label>, SimplicialError> {
        for simplex in new_simplices {
            self.require_visible(simplex)?;
        }
        let mut snapshot = self.snap()?;
        let grown = snapshot.grow_flag_complex(new_simplices)?;
        self.adopt(&snapshot, &grown)
    }

    /// Carries simplices grown on a snapshot back into the full complex.
    ///
    /// `grown` is in creation order, so every facet is settled before the
    /// simplices above it. A simplex that already exists at a later index
    /// moves down to the current one.
    fn adopt(
        &mut self,
        snapshot: &SimplicialComplex<R>,
        grown: &[Label],
    ) -> Result<Vec<Label>, SimplicialError> {
        let mut tagged = Vec::with_capacity(grown.len());
        for simplex in grown {
            let basis: Vec<Label> = snapshot.basis_of(simplex)?.into_iter().collect();
            let label = match self.complex.simplex_with_basis(&basis) {
                Some(existing) => existing,
                None => self.complex.add_simplex_with_basis(&basis, None, None)?,
            };
            self.record(label.clone());
            tagged.push(label);
        }
        tracing::debug!(index = self.index, tagged = tagged.len(), "flag growth in filtration");
        Ok(tagged)
    }

    fn require_visible(&self, simplex: &Label) -> Result<(), SimplicialError> {
        match self.appears.get(simplex) {
            Some(added) if *added > self.index => Err(SimplicialError::invalid_structure(
                "later-face",
                format!("{simplex} is only added at index {added}"),
            )
            .with_context("simplex", simplex)
            .with_context("added", *added)
            .with_context("index", self.index)
            .with_hint("move to a later index before adding the simplex")),
            Some(_) => Ok(()),
            None => Err(SimplicialError::not_found(simplex)),
        }
    }

    fn record(&mut self, simplex: Label) {
        tracing::trace!(simplex = %simplex, index = self.index, "tagged simplex");
        if let Some(previous) = self.appears.get(&simplex).copied() {
            if previous != self.index {
                self.untag(&simplex, previous);
            }
        }
        self.includes
            .entry(self.index)
            .or_default()
            .insert(simplex.clone());
        self.appears.insert(simplex, self.index);
    }

    /// Deletes a simplex and everything it is part of, at whatever index
    /// they were added. Indices left empty are dropped, except the current one.
    pub fn delete_simplex(&mut self, simplex: &Label) -> Result<Vec<Label>, SimplicialError> {
        let removed = self.complex.delete_simplex(simplex)?;
        for label in &removed {
            if let Some(added) = self.appears.remove(label) {
                self.untag(label, added);
            }
        }
        tracing::debug!(simplex = %simplex, removed = removed.len(), "deleted from filtration");
        Ok(removed)
    }

    /// Deletes each simplex still present at any index, skipping the rest.
    pub fn delete_simplices(&mut self, simplices: &[Label]) -> Result<Vec<Label>, SimplicialError> {
        let mut removed = Vec::new();
        for simplex in simplices {
            if self.complex.contains_simplex(simplex) {
                removed.extend(self.delete_simplex(simplex)?);
            }
        }
        Ok(removed)
    }

    /// Keeps only the simplices whose basis lies within `basis`, at every index.
    pub fn restrict_basis_to(&mut self, basis: &[Label]) -> Result<(), SimplicialError> {
        for point in basis {
            if self.complex.order_of(point)? != 0 {
                return Err(SimplicialError::invalid_structure(
                    "not-a-basis",
                    "basis elements must be points",
                )
                .with_context("simplex", point));
            }
        }
        let keep: BTreeSet<&Label> = basis.iter().collect();
        let dropped: Vec<Label> = self
            .complex
            .simplices_of_order(0)
            .into_iter()
            .filter(|point| !keep.contains(point))
            .collect();
        self.delete_simplices(&dropped)?;
        Ok(())
    }

    /// Drops `simplex` from the members of `index`, pruning the index when
    /// it empties and is not the current one.
    fn untag(&mut self, simplex: &Label, index: i64) {
        if let Some(members) = self.includes.get_mut(&index) {
            members.remove(simplex);
            if members.is_empty() && index != self.index {
                self.includes.remove(&index);
            }
        }
    }

    /// Whether the simplex exists at the current index.
    pub fn contains_simplex(&self, simplex: &Label) -> bool {
        self.appears
            .get(simplex)
            .is_some_and(|added| *added <= self.index)
    }

    /// Whether the simplex exists at any index.
    pub fn contains_simplex_at_some_index(&self, simplex: &Label) -> bool {
        self.appears.contains_key(simplex)
    }

    /// Index at which the simplex was added.
    pub fn added_at_index(&self, simplex: &Label) -> Result<i64, SimplicialError> {
        self.appears
            .get(simplex)
            .copied()
            .ok_or_else(|| SimplicialError::not_found(simplex))
    }

    /// Simplices added at exactly `index`, lowest order first.
    pub fn simplices_added_at_index(
        &self,
        index: i64,
        reverse: bool,
    ) -> Result<Vec<Label>, SimplicialError> {
        let members = self.includes.get(&index).ok_or_else(|| {
            SimplicialError::invalid_structure(
                "unknown-index",
                format!("{index} is not an index of the filtration"),
            )
            .with_context("index", index)
        })?;
        let mut ordered: Vec<(usize, Label)> = members
            .iter()
            .map(|simplex| Ok((self.complex.order_of(simplex)?, simplex.clone())))
            .collect::<Result<_, SimplicialError>>()?;
        ordered.sort();
        if reverse {
            ordered.reverse();
        }
        Ok(ordered.into_iter().map(|(_, simplex)| simplex).collect())
    }

    /// Order of a simplex present at the current index.
    pub fn order_of(&self, simplex: &Label) -> Result<usize, SimplicialError> {
        self.require_present(simplex)?;
        self.complex.order_of(simplex)
    }

    /// Dense index of a simplex among those of its order present at the
    /// current index, in canonical order.
    pub fn index_of(&self, simplex: &Label) -> Result<usize, SimplicialError> {
        let order = self.order_of(simplex)?;
        self.simplices_of_order(order)
            .iter()
            .position(|candidate| candidate == simplex)
            .ok_or_else(|| SimplicialError::not_found(simplex))
    }

    /// Attributes of a simplex present at the current index.
    pub fn attributes(&self, simplex: &Label) -> Result<&Attributes, SimplicialError> {
        self.require_present(simplex)?;
        self.complex.attributes(simplex)
    }

    fn require_present(&self, simplex: &Label) -> Result<(), SimplicialError> {
        if self.contains_simplex(simplex) {
            Ok(())
        } else {
            Err(SimplicialError::not_found(simplex).with_context("index", self.index))
        }
    }

    /// Simplices present at the current index, by order.
    pub fn simplices(&self, reverse: bool) -> Vec<Label> {
        self.complex
            .simplices(reverse)
            .into_iter()
            .filter(|simplex| self.contains_simplex(simplex))
            .collect()
    }

    /// Simplices of one order present at the current index.
    pub fn simplices_of_order(&self, order: usize) -> Vec<Label> {
        self.complex
            .simplices_of_order(order)
            .into_iter()
            .filter(|simplex| self.contains_simplex(simplex))
            .collect()
    }

    /// Number of simplices present at the current index.
    pub fn number_of_simplices(&self) -> usize {
        self.includes
            .range(..=self.index)
            .map(|(_, members)| members.len())
            .sum()
    }

    /// Number of simplices of one order present at the current index.
    pub fn number_of_simplices_of_order(&self, order: usize) -> usize {
        self.simplices_of_order(order).len()
    }

    /// Largest order present at the current index.
    pub fn max_order(&self) -> Option<usize> {
        self.includes
            .range(..=self.index)
            .flat_map(|(_, members)| members.iter())
            .filter_map(|simplex| self.complex.order_of(simplex).ok())
            .max()
    }

    /// The complex at the current index.
    pub fn snap(&self) -> Result<SimplicialComplex<R>, SimplicialError> {
        self.snap_at(self.index)
    }

    /// The complex at `index`: every simplex added at or before it.
    pub fn snap_at(&self, index: i64) -> Result<SimplicialComplex<R>, SimplicialError> {
        let mut complex = self.complex.copy();
        let later: Vec<Label> = self
            .includes
            .range((Bound::Excluded(index), Bound::Unbounded))
            .flat_map(|(_, members)| members.iter().cloned())
            .collect();
        complex.delete_simplices(&later)?;
        Ok(complex)
    }

    /// Snapshots at every index, ascending.
    pub fn complexes(&self) -> Complexes<'_, R> {
        Complexes {
            filtration: self,
            indices: self.indices().into_iter(),
        }
    }
}

/// Iterator over `(index, complex)` snapshots of a filtration.
#[derive(Debug)]
pub struct Complexes<'a, R: Representation> {
    filtration: &'a Filtration<R>,
    indices: std::vec::IntoIter<i64>,
}

impl<R: Representation> Iterator for Complexes<'_, R> {
    type Item = Result<(i64, SimplicialComplex<R>), SimplicialError>;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.indices.next()?;
        Some(self.filtration.snap_at(index).map(|complex| (index, complex)))
    }
}
