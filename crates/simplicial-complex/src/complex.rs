use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use simplicial_core::{
    Attributes, BitMatrix, ErrorInfo, Label, Renaming, Representation, SimplicialError,
};

use crate::config::ComplexConfig;
use crate::reference::ReferenceRepresentation;

/// Largest basis accepted by [`SimplicialComplex::add_simplex_with_basis`].
///
/// A basis of `n` new points creates `2^n - 1` simplices, so 20 points
/// already means about a million inserts.
pub const MAX_BASIS_SIZE: usize = 20;

/// Ordering options for [`SimplicialComplex::closure_of_with`] and
/// [`SimplicialComplex::part_of_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkOptions {
    /// Highest order first.
    pub reverse: bool,
    /// Leave out the simplex the walk starts from.
    pub exclude_self: bool,
}

/// A simplicial complex over a pluggable [`Representation`].
///
/// All writes go through this type. Every public mutation validates its
/// arguments before touching storage, so a failed call leaves the complex
/// exactly as it was.
#[derive(Debug, Clone)]
pub struct SimplicialComplex<R: Representation = ReferenceRepresentation> {
    pub(crate) rep: R,
    config: ComplexConfig,
    sequence: u64,
}

impl SimplicialComplex<ReferenceRepresentation> {
    /// Creates an empty complex over the reference backend.
    pub fn new() -> Self {
        Self::with_backend(ComplexConfig::default())
    }

    /// Creates an empty complex over the reference backend with a configuration.
    pub fn with_config(config: ComplexConfig) -> Self {
        Self::with_backend(config)
    }
}

impl<R: Representation> Default for SimplicialComplex<R> {
    fn default() -> Self {
        Self::with_backend(ComplexConfig::default())
    }
}

impl<R: Representation> SimplicialComplex<R> {
    /// Creates an empty complex over backend `R`.
    pub fn with_backend(config: ComplexConfig) -> Self {
        Self {
            rep: R::default(),
            config,
            sequence: 0,
        }
    }

    /// Configuration in effect.
    pub fn config(&self) -> &ComplexConfig {
        &self.config
    }

    /// Read-only access to the storage backend.
    pub fn representation(&self) -> &R {
        &self.rep
    }

    /// Deep, independent copy.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Highest order the complex accepts, combining config and backend limits.
    pub fn order_limit(&self) -> Option<usize> {
        self.config.effective_limit(self.rep.order_limit())
    }

    pub(crate) fn fresh_label(&mut self, order: usize, reserved: &BTreeSet<Label>) -> Label {
        loop {
            self.sequence += 1;
            let candidate = Label::generated(order, self.sequence);
            if !self.rep.contains(&candidate) && !reserved.contains(&candidate) {
                return candidate;
            }
        }
    }

    fn check_order_limit(&self, order: usize) -> Result<(), SimplicialError> {
        match self.order_limit() {
            Some(limit) if order > limit => Err(SimplicialError::invalid_structure(
                "order-limit",
                "simplex order exceeds the complex's limit",
            )
            .with_context("order", order)
            .with_context("limit", limit)),
            _ => Ok(()),
        }
    }

    fn check_fresh_label(&self, label: Option<&Label>) -> Result<(), SimplicialError> {
        match label {
            Some(label) if self.rep.contains(label) => Err(SimplicialError::duplicate_label(label)),
            _ => Ok(()),
        }
    }

    /// Checks a face list and returns the order and basis of the simplex it
    /// would define.
    fn validate_faces(&self, faces: &[Label]) -> Result<(usize, BTreeSet<Label>), SimplicialError> {
        if faces.is_empty() {
            return Ok((0, BTreeSet::new()));
        }
        if faces.len() == 1 {
            return Err(SimplicialError::invalid_order(
                "face-count",
                "a simplex needs no faces or at least two",
            )
            .with_context("faces", 1));
        }
        let order = faces.len() - 1;
        let distinct: BTreeSet<&Label> = faces.iter().collect();
        if distinct.len() != faces.len() {
            return Err(SimplicialError::invalid_order(
                "repeated-face",
                "faces must be pairwise distinct",
            )
            .with_context("order", order));
        }
        let mut basis = BTreeSet::new();
        for face in faces {
            let face_order = self.rep.order_of(face)?;
            if face_order + 1 != order {
                return Err(SimplicialError::invalid_order(
                    "face-order",
                    "every face must have order one less than the simplex",
                )
                .with_context("face", face)
                .with_context("face_order", face_order)
                .with_context("order", order));
            }
            basis.extend(self.rep.basis_of(face)?);
        }
        if basis.len() != order + 1 {
            return Err(SimplicialError::invalid_structure(
                "not-a-simplex",
                "faces do not bound a single simplex",
            )
            .with_context("order", order)
            .with_context("basis_size", basis.len()));
        }
        if let Some(existing) = self.rep.simplex_with_basis(&basis) {
            return Err(SimplicialError::duplicate_basis(
                "duplicate-basis",
                "a simplex with this basis already exists",
            )
            .with_context("existing", existing));
        }
        Ok((order, basis))
    }

    fn insert_validated(
        &mut self,
        label: Label,
        order: usize,
        faces: &[Label],
        attributes: Attributes,
    ) -> Result<Label, SimplicialError> {
        self.rep.insert(label.clone(), order, faces, attributes)?;
        tracing::trace!(simplex = %label, order, "inserted simplex");
        Ok(label)
    }

    /// Adds a simplex from its faces; no faces makes a point.
    ///
    /// Attributes attach to this simplex only. A missing label is generated
    /// as `"{order}d{n}"`.
    pub fn add_simplex(
        &mut self,
        faces: &[Label],
        label: Option<Label>,
        attributes: Option<Attributes>,
    ) -> Result<Label, SimplicialError> {
        self.check_fresh_label(label.as_ref())?;
        let (order, _) = self.validate_faces(faces)?;
        self.check_order_limit(order)?;
        let label = match label {
            Some(label) => label,
            None => self.fresh_label(order, &BTreeSet::new()),
        };
        self.insert_validated(label, order, faces, attributes.unwrap_or_default())
    }

    /// Adds the simplex spanned by `basis`, creating every missing point and
    /// intermediate face bottom-up.
    ///
    /// Attributes are attached to every simplex created by the call, points
    /// included. Fails with [`SimplicialError::DuplicateBasis`] if the
    /// simplex already exists.
    pub fn add_simplex_with_basis(
        &mut self,
        basis: &[Label],
        label: Option<Label>,
        attributes: Option<Attributes>,
    ) -> Result<Label, SimplicialError> {
        self.build_from_basis(basis, label, attributes, false)
    }

    /// Like [`add_simplex_with_basis`](Self::add_simplex_with_basis), but
    /// returns the existing simplex instead of failing when the basis is taken.
    pub fn ensure_simplex_with_basis(
        &mut self,
        basis: &[Label],
        label: Option<Label>,
        attributes: Option<Attributes>,
    ) -> Result<Label, SimplicialError> {
        self.build_from_basis(basis, label, attributes, true)
    }

    fn build_from_basis(
        &mut self,
        basis: &[Label],
        label: Option<Label>,
        attributes: Option<Attributes>,
        ignore_duplicate: bool,
    ) -> Result<Label, SimplicialError> {
        let points: BTreeSet<Label> = basis.iter().cloned().collect();
        if points.is_empty() {
            return Err(SimplicialError::invalid_structure(
                "empty-basis",
                "a basis needs at least one point",
            ));
        }
        if points.len() != basis.len() {
            return Err(SimplicialError::invalid_structure(
                "repeated-basis",
                "basis contains a repeated point",
            )
            .with_context("size", basis.len()));
        }
        if points.len() > MAX_BASIS_SIZE {
            return Err(SimplicialError::invalid_structure(
                "basis-too-large",
                "basis exceeds the supported size",
            )
            .with_context("size", points.len()));
        }
        for point in &points {
            if self.rep.contains(point) && self.rep.order_of(point)? != 0 {
                return Err(SimplicialError::invalid_structure(
                    "not-a-basis",
                    "basis elements must be points",
                )
                .with_context("simplex", point));
            }
        }
        let order = points.len() - 1;

        if let Some(existing) = self.rep.simplex_with_basis(&points) {
            if ignore_duplicate {
                return Ok(existing);
            }
            return Err(SimplicialError::duplicate_basis(
                "duplicate-basis",
                "a simplex with this basis already exists",
            )
            .with_context("existing", existing));
        }
        self.check_order_limit(order)?;
        self.check_fresh_label(label.as_ref())?;
        if order == 0 {
            if let Some(label) = label.as_ref().filter(|label| !points.contains(*label)) {
                return Err(SimplicialError::invalid_structure(
                    "basis-label-mismatch",
                    "a point is named by its own basis",
                )
                .with_context("simplex", label));
            }
        } else if let Some(label) = label.as_ref().filter(|label| points.contains(*label)) {
            return Err(SimplicialError::duplicate_label(label));
        }

        let attributes = attributes.unwrap_or_default();
        let ordered: Vec<Label> = points.iter().cloned().collect();
        let reserved: BTreeSet<Label> = label.iter().cloned().collect();

        for point in &ordered {
            if !self.rep.contains(point) {
                self.insert_validated(point.clone(), 0, &[], attributes.clone())?;
            }
        }
        if order == 0 {
            return Ok(ordered[0].clone());
        }

        let full: u64 = (1u64 << ordered.len()) - 1;
        let mut top = None;
        for size in 2..=ordered.len() {
            for mask in masks_of_size(ordered.len(), size) {
                let subset = subset_of(&ordered, mask);
                if self.rep.simplex_with_basis(&subset).is_some() {
                    continue;
                }
                let mut faces = Vec::with_capacity(size);
                for dropped in &subset {
                    let mut lower = subset.clone();
                    lower.remove(dropped);
                    let face = self.rep.simplex_with_basis(&lower).ok_or_else(|| {
                        SimplicialError::invalid_structure(
                            "missing-face",
                            "lower face was not created",
                        )
                        .with_context("size", lower.len())
                    })?;
                    faces.push(face);
                }
                let name = match (&label, mask == full) {
                    (Some(label), true) => label.clone(),
                    _ => self.fresh_label(size - 1, &reserved),
                };
                let created = self.insert_validated(name, size - 1, &faces, attributes.clone())?;
                if mask == full {
                    top = Some(created);
                }
            }
        }
        top.ok_or_else(|| {
            SimplicialError::invalid_structure("missing-face", "top simplex was not created")
        })
    }

    /// Adds a fresh simplex of `order` on new points, disjoint from the rest
    /// of the complex. Attributes attach to every simplex created.
    pub fn add_simplex_of_order(
        &mut self,
        order: usize,
        label: Option<Label>,
        attributes: Option<Attributes>,
    ) -> Result<Label, SimplicialError> {
        self.check_order_limit(order)?;
        self.check_fresh_label(label.as_ref())?;
        if order + 1 > MAX_BASIS_SIZE {
            return Err(SimplicialError::invalid_structure(
                "basis-too-large",
                "basis exceeds the supported size",
            )
            .with_context("order", order));
        }
        let reserved: BTreeSet<Label> = label.iter().cloned().collect();
        if order == 0 {
            let point = match label {
                Some(label) => label,
                None => self.fresh_label(0, &reserved),
            };
            return self.insert_validated(point, 0, &[], attributes.unwrap_or_default());
        }
        let mut basis = Vec::with_capacity(order + 1);
        let mut taken = reserved.clone();
        for _ in 0..=order {
            let point = self.fresh_label(0, &taken);
            taken.insert(point.clone());
            basis.push(point);
        }
        self.add_simplex_with_basis(&basis, label, attributes)
    }

    /// Deletes a simplex and everything it is part of, highest order first.
    /// Returns the removed labels in removal order.
    pub fn delete_simplex(&mut self, simplex: &Label) -> Result<Vec<Label>, SimplicialError> {
        let mut doomed: Vec<(usize, Label)> = self
            .part_of(simplex)?
            .into_iter()
            .map(|member| self.rep.order_of(&member).map(|order| (order, member)))
            .collect::<Result<_, _>>()?;
        doomed.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        if doomed.len() > 1 {
            tracing::debug!(simplex = %simplex, cascade = doomed.len(), "cascading delete");
        }
        let mut removed = Vec::with_capacity(doomed.len());
        for (_, member) in doomed {
            self.rep.remove(&member)?;
            removed.push(member);
        }
        Ok(removed)
    }

    /// Deletes each listed simplex still present; absent ones are skipped so
    /// earlier cascades do not cause failures.
    pub fn delete_simplices(&mut self, simplices: &[Label]) -> Result<Vec<Label>, SimplicialError> {
        let mut removed = Vec::new();
        for simplex in simplices {
            if self.rep.contains(simplex) {
                removed.extend(self.delete_simplex(simplex)?);
            }
        }
        Ok(removed)
    }

    /// Deletes the simplex with the given basis.
    pub fn delete_simplex_with_basis(
        &mut self,
        basis: &[Label],
    ) -> Result<Vec<Label>, SimplicialError> {
        let points: BTreeSet<Label> = basis.iter().cloned().collect();
        let simplex = self.rep.simplex_with_basis(&points).ok_or_else(|| {
            SimplicialError::NotFound(ErrorInfo::new(
                "unknown-basis",
                "no simplex has this basis",
            ))
            .with_context("size", points.len())
        })?;
        self.delete_simplex(&simplex)
    }

    /// Keeps only the simplices whose basis lies within `basis`.
    pub fn restrict_basis_to(&mut self, basis: &[Label]) -> Result<(), SimplicialError> {
        self.require_basis(basis)?;
        let keep: BTreeSet<&Label> = basis.iter().collect();
        let dropped: Vec<Label> = self
            .rep
            .simplices_of_order(0)
            .into_iter()
            .filter(|point| !keep.contains(point))
            .collect();
        tracing::debug!(kept = keep.len(), dropped = dropped.len(), "restricting basis");
        self.delete_simplices(&dropped)?;
        Ok(())
    }

    /// Replaces a simplex by the cone of its boundary over a new point and
    /// returns that point. Anything the simplex was part of is deleted.
    pub fn barycentric_subdivide(&mut self, simplex: &Label) -> Result<Label, SimplicialError> {
        let order = self.rep.order_of(simplex)?;
        if order == 0 {
            return Err(SimplicialError::invalid_order(
                "point-subdivision",
                "a point has no barycentre to insert",
            )
            .with_context("simplex", simplex));
        }
        let points: Vec<Label> = self.rep.basis_of(simplex)?.into_iter().collect();
        let centre = self.fresh_label(0, &BTreeSet::new());
        self.delete_simplex(simplex)?;
        self.insert_validated(centre.clone(), 0, &[], Attributes::new())?;
        for skipped in 0..points.len() {
            let mut cone: Vec<Label> = points
                .iter()
                .enumerate()
                .filter(|(index, _)| *index != skipped)
                .map(|(_, point)| point.clone())
                .collect();
            cone.push(centre.clone());
            self.add_simplex_with_basis(&cone, None, None)?;
        }
        Ok(centre)
    }

    /// Renames one simplex.
    pub fn relabel_simplex(&mut self, old: &Label, new: Label) -> Result<(), SimplicialError> {
        if !self.rep.contains(old) {
            return Err(SimplicialError::not_found(old));
        }
        if old == &new {
            return Ok(());
        }
        self.check_fresh_label(Some(&new))?;
        self.rep.relabel(old, new)
    }

    /// Applies a renaming to every simplex. The renaming is consulted once
    /// per label. Returns the labels that changed, old to new.
    pub fn relabel(
        &mut self,
        renaming: &mut Renaming<'_>,
    ) -> Result<BTreeMap<Label, Label>, SimplicialError> {
        let all = self.simplices(false);
        let changes: BTreeMap<Label, Label> = renaming
            .resolve(all.iter())
            .into_iter()
            .filter(|(old, new)| old != new)
            .collect();
        self.check_renaming(&changes)?;
        for (old, new) in &changes {
            self.rep.relabel(old, new.clone())?;
        }
        Ok(changes)
    }

    fn check_renaming(&self, changes: &BTreeMap<Label, Label>) -> Result<(), SimplicialError> {
        let mut targets = BTreeSet::new();
        for new in changes.values() {
            if self.rep.contains(new) || !targets.insert(new) {
                return Err(SimplicialError::duplicate_label(new));
            }
        }
        Ok(())
    }

    /// Whether the simplex exists.
    pub fn contains_simplex(&self, simplex: &Label) -> bool {
        self.rep.contains(simplex)
    }

    /// Whether some simplex has exactly this basis.
    pub fn contains_simplex_with_basis(&self, basis: &[Label]) -> bool {
        self.simplex_with_basis(basis).is_some()
    }

    /// Order of a simplex.
    pub fn order_of(&self, simplex: &Label) -> Result<usize, SimplicialError> {
        self.rep.order_of(simplex)
    }

    /// Dense index of a simplex within its order.
    pub fn index_of(&self, simplex: &Label) -> Result<usize, SimplicialError> {
        self.rep.index_of(simplex)
    }

    /// Highest order present, `None` when empty.
    pub fn max_order(&self) -> Option<usize> {
        self.rep.max_order()
    }

    /// Total number of simplices.
    pub fn number_of_simplices(&self) -> usize {
        self.rep.len()
    }

    /// Number of simplices of one order.
    pub fn number_of_simplices_of_order(&self, order: usize) -> usize {
        self.rep.count_of_order(order)
    }

    /// Every simplex, lowest order first (highest first when `reverse`).
    pub fn simplices(&self, reverse: bool) -> Vec<Label> {
        let Some(max) = self.max_order() else {
            return Vec::new();
        };
        let mut all = Vec::with_capacity(self.rep.len());
        if reverse {
            for order in (0..=max).rev() {
                all.extend(self.rep.simplices_of_order(order));
            }
        } else {
            for order in 0..=max {
                all.extend(self.rep.simplices_of_order(order));
            }
        }
        all
    }

    /// Simplices of one order in canonical order.
    pub fn simplices_of_order(&self, order: usize) -> Vec<Label> {
        self.rep.simplices_of_order(order)
    }

    /// Simplex with exactly this basis.
    pub fn simplex_with_basis(&self, basis: &[Label]) -> Option<Label> {
        let points: BTreeSet<Label> = basis.iter().cloned().collect();
        self.rep.simplex_with_basis(&points)
    }

    /// Simplex with exactly these faces, if any.
    pub fn simplex_with_faces(&self, faces: &[Label]) -> Result<Option<Label>, SimplicialError> {
        if faces.len() < 2 {
            return Err(SimplicialError::invalid_order(
                "face-count",
                "need at least two faces",
            )
            .with_context("faces", faces.len()));
        }
        let order = faces.len() - 1;
        let mut basis = BTreeSet::new();
        for face in faces {
            if self.rep.order_of(face)? + 1 != order {
                return Err(SimplicialError::invalid_order(
                    "face-order",
                    "faces must all have order one less than the simplex",
                )
                .with_context("face", face));
            }
            basis.extend(self.rep.basis_of(face)?);
        }
        let wanted: BTreeSet<Label> = faces.iter().cloned().collect();
        Ok(self
            .rep
            .simplex_with_basis(&basis)
            .filter(|candidate| self.rep.faces(candidate).is_ok_and(|found| found == wanted)))
    }

    /// Immediate faces.
    pub fn faces(&self, simplex: &Label) -> Result<BTreeSet<Label>, SimplicialError> {
        self.rep.faces(simplex)
    }

    /// Immediate cofaces.
    pub fn cofaces(&self, simplex: &Label) -> Result<BTreeSet<Label>, SimplicialError> {
        self.rep.cofaces(simplex)
    }

    /// Points underlying a simplex.
    pub fn basis_of(&self, simplex: &Label) -> Result<BTreeSet<Label>, SimplicialError> {
        self.rep.basis_of(simplex)
    }

    /// The simplex and all of its faces, transitively.
    pub fn closure_of(&self, simplex: &Label) -> Result<BTreeSet<Label>, SimplicialError> {
        self.walk(simplex, |rep, label| rep.faces(label))
    }

    /// The simplex and everything it is a face of, transitively.
    pub fn part_of(&self, simplex: &Label) -> Result<BTreeSet<Label>, SimplicialError> {
        self.walk(simplex, |rep, label| rep.cofaces(label))
    }

    /// [`closure_of`](Self::closure_of) as a list ordered by order, basis first
    /// unless `options.reverse`.
    pub fn closure_of_with(
        &self,
        simplex: &Label,
        options: WalkOptions,
    ) -> Result<Vec<Label>, SimplicialError> {
        let closure = self.closure_of(simplex)?;
        self.arrange(simplex, closure, options)
    }

    /// [`part_of`](Self::part_of) as a list ordered by order, lowest first
    /// unless `options.reverse`.
    pub fn part_of_with(
        &self,
        simplex: &Label,
        options: WalkOptions,
    ) -> Result<Vec<Label>, SimplicialError> {
        let star = self.part_of(simplex)?;
        self.arrange(simplex, star, options)
    }

    fn arrange(
        &self,
        start: &Label,
        found: BTreeSet<Label>,
        options: WalkOptions,
    ) -> Result<Vec<Label>, SimplicialError> {
        let mut ordered: Vec<(usize, Label)> = found
            .into_iter()
            .filter(|label| !(options.exclude_self && label == start))
            .map(|label| Ok((self.rep.order_of(&label)?, label)))
            .collect::<Result<_, SimplicialError>>()?;
        ordered.sort();
        if options.reverse {
            ordered.reverse();
        }
        Ok(ordered.into_iter().map(|(_, label)| label).collect())
    }

    /// Every simplex accepted by `predicate`, lowest order first (highest
    /// first when `reverse`).
    pub fn all_simplices<P>(&self, mut predicate: P, reverse: bool) -> Vec<Label>
    where
        P: FnMut(&Self, &Label) -> bool,
    {
        self.simplices(reverse)
            .into_iter()
            .filter(|simplex| predicate(self, simplex))
            .collect()
    }

    /// Some simplex accepted by `predicate`, searching lowest order first.
    pub fn any_simplex<P>(&self, mut predicate: P) -> Option<Label>
    where
        P: FnMut(&Self, &Label) -> bool,
    {
        self.simplices(false)
            .into_iter()
            .find(|simplex| predicate(self, simplex))
    }

    fn walk<F>(&self, start: &Label, step: F) -> Result<BTreeSet<Label>, SimplicialError>
    where
        F: Fn(&R, &Label) -> Result<BTreeSet<Label>, SimplicialError>,
    {
        if !self.rep.contains(start) {
            return Err(SimplicialError::not_found(start));
        }
        let mut seen = BTreeSet::from([start.clone()]);
        let mut stack = vec![start.clone()];
        while let Some(current) = stack.pop() {
            for next in step(&self.rep, &current)? {
                if seen.insert(next.clone()) {
                    stack.push(next);
                }
            }
        }
        Ok(seen)
    }

    /// Attributes of a simplex.
    pub fn attributes(&self, simplex: &Label) -> Result<&Attributes, SimplicialError> {
        self.rep.attributes(simplex)
    }

    /// Mutable attributes of a simplex.
    pub fn attributes_mut(&mut self, simplex: &Label) -> Result<&mut Attributes, SimplicialError> {
        self.rep.attributes_mut(simplex)
    }

    /// Replaces the attributes of a simplex.
    pub fn set_attributes(
        &mut self,
        simplex: &Label,
        attributes: Attributes,
    ) -> Result<(), SimplicialError> {
        *self.rep.attributes_mut(simplex)? = attributes;
        Ok(())
    }

    /// Whether every label names an existing point.
    pub fn is_basis(&self, labels: &[Label]) -> bool {
        self.require_basis(labels).is_ok()
    }

    fn require_basis(&self, labels: &[Label]) -> Result<(), SimplicialError> {
        for label in labels {
            if self.rep.order_of(label)? != 0 {
                return Err(SimplicialError::invalid_structure(
                    "not-a-basis",
                    "basis elements must be points",
                )
                .with_context("simplex", label));
            }
        }
        Ok(())
    }

    /// Whether the closures of the simplices are pairwise disjoint.
    pub fn disjoint(&self, simplices: &[Label]) -> Result<bool, SimplicialError> {
        let mut covered = BTreeSet::new();
        for simplex in simplices {
            let closure = self.closure_of(simplex)?;
            if !covered.is_disjoint(&closure) {
                return Ok(false);
            }
            covered.extend(closure);
        }
        Ok(true)
    }

    /// Whether every simplex here exists in `other` with the same order and faces.
    pub fn is_sub_complex_of<S: Representation>(&self, other: &SimplicialComplex<S>) -> bool {
        self.simplices(false).iter().all(|simplex| {
            let same_order = match (self.rep.order_of(simplex), other.rep.order_of(simplex)) {
                (Ok(mine), Ok(theirs)) => mine == theirs,
                _ => false,
            };
            same_order
                && match (self.rep.faces(simplex), other.rep.faces(simplex)) {
                    (Ok(mine), Ok(theirs)) => mine == theirs,
                    _ => false,
                }
        })
    }

    /// Sub-complex relation excluding equality.
    pub fn is_strict_sub_complex_of<S: Representation>(
        &self,
        other: &SimplicialComplex<S>,
    ) -> bool {
        self.number_of_simplices() < other.number_of_simplices() && self.is_sub_complex_of(other)
    }

    /// Boundary operator at `order`: rows `(order - 1)`-simplices, columns
    /// `order`-simplices, in canonical order.
    pub fn boundary_operator(&self, order: usize) -> BitMatrix {
        self.rep.boundary_operator(order)
    }

    /// Alternating sum of the simplex counts per order.
    pub fn euler_characteristic(&self) -> i64 {
        let Some(max) = self.max_order() else {
            return 0;
        };
        (0..=max)
            .map(|order| {
                let count = self.rep.count_of_order(order) as i64;
                if order % 2 == 0 {
                    count
                } else {
                    -count
                }
            })
            .sum()
    }

    /// Checks closure, face counts, basis uniqueness and boundary consistency.
    pub fn validate(&self) -> Result<(), SimplicialError> {
        let corrupt = |code: &str, message: &str, simplex: &Label| {
            SimplicialError::invalid_structure(code, message).with_context("simplex", simplex)
        };
        let Some(max) = self.max_order() else {
            return Ok(());
        };
        let mut seen = BTreeSet::new();
        for order in 0..=max {
            let simplices = self.rep.simplices_of_order(order);
            if simplices.is_empty() {
                return Err(SimplicialError::invalid_structure(
                    "empty-order",
                    "an order below the maximum holds no simplices",
                )
                .with_context("order", order));
            }
            for (index, simplex) in simplices.iter().enumerate() {
                if !seen.insert(simplex.clone()) {
                    return Err(corrupt("duplicate-label", "label listed twice", simplex));
                }
                if self.rep.index_of(simplex)? != index || self.rep.order_of(simplex)? != order {
                    return Err(corrupt("stale-index", "index does not match position", simplex));
                }
                let faces = self.rep.faces(simplex)?;
                let expected = if order == 0 { 0 } else { order + 1 };
                if faces.len() != expected {
                    return Err(corrupt("face-count", "wrong number of faces", simplex));
                }
                for face in &faces {
                    if !self.rep.contains(face) {
                        return Err(corrupt("closure", "face missing from complex", simplex));
                    }
                    if self.rep.order_of(face)? + 1 != order {
                        return Err(corrupt("face-order", "face has the wrong order", simplex));
                    }
                    if !self.rep.cofaces(face)?.contains(simplex) {
                        return Err(corrupt("coface", "coface link missing", simplex));
                    }
                }
                let basis = self.rep.basis_of(simplex)?;
                if basis.len() != order + 1 {
                    return Err(corrupt("basis-size", "basis has the wrong size", simplex));
                }
                if self.rep.simplex_with_basis(&basis).as_ref() != Some(simplex) {
                    return Err(corrupt("basis-lookup", "basis does not resolve", simplex));
                }
            }
        }
        for order in 1..=max {
            let matrix = self.rep.boundary_operator(order);
            let rows = self.rep.simplices_of_order(order - 1);
            let cols = self.rep.simplices_of_order(order);
            if matrix.shape() != (rows.len(), cols.len()) {
                return Err(SimplicialError::invalid_structure(
                    "boundary-shape",
                    "boundary operator shape disagrees with simplex counts",
                )
                .with_context("order", order));
            }
            for (col, simplex) in cols.iter().enumerate() {
                let faces = self.rep.faces(simplex)?;
                for (row, face) in rows.iter().enumerate() {
                    if matrix.get(row, col) != faces.contains(face) {
                        return Err(corrupt(
                            "boundary-entry",
                            "boundary operator disagrees with faces",
                            simplex,
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Bit masks over `width` points with exactly `size` bits set, ascending.
fn masks_of_size(width: usize, size: usize) -> impl Iterator<Item = u64> {
    let limit = 1u64 << width;
    let first = (1u64 << size) - 1;
    std::iter::successors(Some(first), |&mask| {
        let low = mask & mask.wrapping_neg();
        let ripple = mask + low;
        Some((((ripple ^ mask) >> 2) / low) | ripple)
    })
    .take_while(move |&mask| mask < limit)
}

fn subset_of(points: &[Label], mask: u64) -> BTreeSet<Label> {
    points
        .iter()
        .enumerate()
        .filter(|(index, _)| mask & (1u64 << index) != 0)
        .map(|(_, point)| point.clone())
        .collect()
}

impl<R: Representation, S: Representation> PartialEq<SimplicialComplex<S>>
    for SimplicialComplex<R>
{
    /// Topological equality: same labels, orders and faces. Attributes are ignored.
    fn eq(&self, other: &SimplicialComplex<S>) -> bool {
        self.number_of_simplices() == other.number_of_simplices() && self.is_sub_complex_of(other)
    }
}

impl<R: Representation, S: Representation> PartialOrd<SimplicialComplex<S>>
    for SimplicialComplex<R>
{
    /// Orders complexes by the sub-complex relation.
    fn partial_cmp(&self, other: &SimplicialComplex<S>) -> Option<Ordering> {
        if self == other {
            Some(Ordering::Equal)
        } else if self.is_sub_complex_of(other) {
            Some(Ordering::Less)
        } else if other.is_sub_complex_of(self) {
            Some(Ordering::Greater)
        } else {
            None
        }
    }
}
