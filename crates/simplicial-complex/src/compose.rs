use std::collections::{BTreeMap, BTreeSet};

use simplicial_core::{Label, Renaming, Representation, SimplicialError};

use crate::complex::SimplicialComplex;

impl<R: Representation> SimplicialComplex<R> {
    /// Builds a new complex holding this one and `other`.
    ///
    /// Simplices present in both with the same label and basis are merged,
    /// with `other`'s attributes overwriting. A label that names different
    /// bases on each side fails with [`SimplicialError::InvalidStructure`];
    /// one basis under two labels fails with
    /// [`SimplicialError::DuplicateBasis`].
    pub fn compose<S: Representation>(
        &self,
        other: &SimplicialComplex<S>,
    ) -> Result<Self, SimplicialError> {
        let mut composed = self.clone();
        let mut merged = 0usize;
        for simplex in other.simplices(false) {
            let basis: Vec<Label> = other.basis_of(&simplex)?.into_iter().collect();
            let occupant = composed.simplex_with_basis(&basis);
            if composed.contains_simplex(&simplex) {
                match occupant {
                    Some(existing) if existing == simplex => {
                        let incoming = other.attributes(&simplex)?.clone();
                        composed.attributes_mut(&simplex)?.extend(incoming);
                        merged += 1;
                    }
                    Some(existing) => {
                        return Err(SimplicialError::duplicate_basis(
                            "duplicate-basis",
                            "two labels share one basis",
                        )
                        .with_context("simplex", &simplex)
                        .with_context("existing", existing));
                    }
                    None => {
                        return Err(SimplicialError::invalid_structure(
                            "basis-conflict",
                            "label names simplices with different bases",
                        )
                        .with_context("simplex", &simplex));
                    }
                }
            } else if let Some(existing) = occupant {
                return Err(SimplicialError::duplicate_basis(
                    "duplicate-basis",
                    "two labels share one basis",
                )
                .with_context("simplex", &simplex)
                .with_context("existing", existing));
            } else {
                let faces: Vec<Label> = other.faces(&simplex)?.into_iter().collect();
                let attributes = other.attributes(&simplex)?.clone();
                composed.add_simplex(&faces, Some(simplex), Some(attributes))?;
            }
        }
        tracing::debug!(
            merged,
            total = composed.number_of_simplices(),
            "composed complexes"
        );
        Ok(composed)
    }

    /// Copies every simplex of `other` into this complex, renamed through
    /// `renaming` when given. Returns the new labels in insertion order.
    ///
    /// Fails with [`SimplicialError::DuplicateLabel`] before copying anything
    /// if a resulting label is already taken or two labels map to one.
    pub fn add_simplices_from<S: Representation>(
        &mut self,
        other: &SimplicialComplex<S>,
        renaming: Option<&mut Renaming<'_>>,
    ) -> Result<Vec<Label>, SimplicialError> {
        let order = other.simplices(false);
        let names: BTreeMap<Label, Label> = match renaming {
            Some(renaming) => renaming.resolve(order.iter()),
            None => order.iter().map(|s| (s.clone(), s.clone())).collect(),
        };
        let mut targets = BTreeSet::new();
        for new in names.values() {
            if self.contains_simplex(new) || !targets.insert(new) {
                return Err(SimplicialError::duplicate_label(new)
                    .with_hint("supply a renaming that avoids existing labels"));
            }
        }
        if let Some(max) = other.max_order() {
            if let Some(limit) = self.order_limit().filter(|limit| max > *limit) {
                return Err(SimplicialError::invalid_structure(
                    "order-limit",
                    "source complex exceeds the receiver's order limit",
                )
                .with_context("order", max)
                .with_context("limit", limit));
            }
        }

        let rename = |label: &Label| names.get(label).cloned().unwrap_or_else(|| label.clone());
        let mut created = Vec::with_capacity(order.len());
        for simplex in &order {
            let faces: Vec<Label> = other.faces(simplex)?.iter().map(rename).collect();
            let attributes = other.attributes(simplex)?.clone();
            created.push(self.add_simplex(&faces, Some(rename(simplex)), Some(attributes))?);
        }
        Ok(created)
    }

    /// Renames the simplices whose labels also occur in `other`, so that a
    /// later [`compose`](Self::compose) merges nothing. Returns the changes.
    pub fn relabel_disjoint_from<S: Representation>(
        &mut self,
        other: &SimplicialComplex<S>,
    ) -> Result<BTreeMap<Label, Label>, SimplicialError> {
        let mut changes = BTreeMap::new();
        let mut taken = BTreeSet::new();
        for simplex in other.simplices(false) {
            if !self.contains_simplex(&simplex) {
                continue;
            }
            let order = other.order_of(&simplex)?;
            let mut attempt = 1u64;
            let fresh = loop {
                let candidate = Label::from(format!("{simplex}->{order}d{attempt}"));
                if !self.contains_simplex(&candidate)
                    && !other.contains_simplex(&candidate)
                    && !taken.contains(&candidate)
                {
                    break candidate;
                }
                attempt += 1;
            };
            taken.insert(fresh.clone());
            changes.insert(simplex, fresh);
        }
        let mut renaming = Renaming::Map(changes);
        self.relabel(&mut renaming)
    }
}
