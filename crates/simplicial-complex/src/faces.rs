use std::collections::{BTreeMap, BTreeSet};

use simplicial_core::{Attributes, Label, SimplicialError};

#[derive(Debug, Clone, Default)]
pub(crate) struct FaceRecord {
    faces: BTreeSet<Label>,
    cofaces: BTreeSet<Label>,
    basis: BTreeSet<Label>,
    attributes: Attributes,
}

/// Face/coface relation with a cached basis per simplex and a basis lookup table.
///
/// The table trusts its caller: face counts, orders and basis uniqueness are
/// checked by the mutation engine before anything reaches it.
#[derive(Debug, Clone, Default)]
pub struct FaceTable {
    records: BTreeMap<Label, FaceRecord>,
    bases: BTreeMap<BTreeSet<Label>, Label>,
}

impl FaceTable {
    fn record(&self, label: &Label) -> Result<&FaceRecord, SimplicialError> {
        self.records
            .get(label)
            .ok_or_else(|| SimplicialError::not_found(label))
    }

    fn record_mut(&mut self, label: &Label) -> Result<&mut FaceRecord, SimplicialError> {
        self.records
            .get_mut(label)
            .ok_or_else(|| SimplicialError::not_found(label))
    }

    /// Union of the faces' bases, or `{label}` for a point.
    pub fn basis_from_faces(
        &self,
        label: &Label,
        faces: &[Label],
    ) -> Result<BTreeSet<Label>, SimplicialError> {
        if faces.is_empty() {
            return Ok(BTreeSet::from([label.clone()]));
        }
        let mut basis = BTreeSet::new();
        for face in faces {
            basis.extend(self.record(face)?.basis.iter().cloned());
        }
        Ok(basis)
    }

    /// Wires a new simplex under its faces and indexes its basis.
    pub fn insert(
        &mut self,
        label: Label,
        faces: &[Label],
        attributes: Attributes,
    ) -> Result<(), SimplicialError> {
        if self.records.contains_key(&label) {
            return Err(SimplicialError::duplicate_label(&label));
        }
        let basis = self.basis_from_faces(&label, faces)?;
        for face in faces {
            self.record_mut(face)?.cofaces.insert(label.clone());
        }
        self.bases.insert(basis.clone(), label.clone());
        self.records.insert(
            label,
            FaceRecord {
                faces: faces.iter().cloned().collect(),
                cofaces: BTreeSet::new(),
                basis,
                attributes,
            },
        );
        Ok(())
    }

    /// Unwires a simplex. It must not be a face of anything.
    pub fn remove(&mut self, label: &Label) -> Result<(), SimplicialError> {
        let record = self.record(label)?;
        if !record.cofaces.is_empty() {
            return Err(SimplicialError::invalid_structure(
                "has-cofaces",
                "simplex is still a face of other simplices",
            )
            .with_context("simplex", label)
            .with_context("cofaces", record.cofaces.len()));
        }
        let record = self
            .records
            .remove(label)
            .ok_or_else(|| SimplicialError::not_found(label))?;
        for face in &record.faces {
            if let Some(parent) = self.records.get_mut(face) {
                parent.cofaces.remove(label);
            }
        }
        self.bases.remove(&record.basis);
        Ok(())
    }

    /// Renames a simplex everywhere it is referenced, including cached bases
    /// when a point is renamed.
    pub fn relabel(&mut self, old: &Label, new: Label) -> Result<(), SimplicialError> {
        if self.records.contains_key(&new) {
            return Err(SimplicialError::duplicate_label(&new));
        }
        let record = self
            .records
            .remove(old)
            .ok_or_else(|| SimplicialError::not_found(old))?;
        for face in &record.faces {
            if let Some(parent) = self.records.get_mut(face) {
                parent.cofaces.remove(old);
                parent.cofaces.insert(new.clone());
            }
        }
        for coface in &record.cofaces {
            if let Some(child) = self.records.get_mut(coface) {
                child.faces.remove(old);
                child.faces.insert(new.clone());
            }
        }
        let is_point = record.faces.is_empty();
        self.records.insert(new.clone(), record);

        if is_point {
            // every simplex built on the point carries it in its basis
            for member in self.part_of(&new)? {
                let Some(entry) = self.records.get_mut(&member) else {
                    continue;
                };
                let stale = entry.basis.clone();
                entry.basis.remove(old);
                entry.basis.insert(new.clone());
                let fresh = entry.basis.clone();
                self.bases.remove(&stale);
                self.bases.insert(fresh, member);
            }
        } else {
            let basis = self.record(&new)?.basis.clone();
            self.bases.insert(basis, new);
        }
        Ok(())
    }

    /// Immediate faces.
    pub fn faces(&self, label: &Label) -> Result<&BTreeSet<Label>, SimplicialError> {
        Ok(&self.record(label)?.faces)
    }

    /// Immediate cofaces.
    pub fn cofaces(&self, label: &Label) -> Result<&BTreeSet<Label>, SimplicialError> {
        Ok(&self.record(label)?.cofaces)
    }

    /// Cached basis.
    pub fn basis(&self, label: &Label) -> Result<&BTreeSet<Label>, SimplicialError> {
        Ok(&self.record(label)?.basis)
    }

    /// Simplex owning a basis.
    pub fn with_basis(&self, basis: &BTreeSet<Label>) -> Option<&Label> {
        self.bases.get(basis)
    }

    /// Attributes of a simplex.
    pub fn attributes(&self, label: &Label) -> Result<&Attributes, SimplicialError> {
        Ok(&self.record(label)?.attributes)
    }

    /// Mutable attributes of a simplex.
    pub fn attributes_mut(&mut self, label: &Label) -> Result<&mut Attributes, SimplicialError> {
        Ok(&mut self.record_mut(label)?.attributes)
    }

    /// The simplex and every simplex it is a transitive face of.
    pub fn part_of(&self, label: &Label) -> Result<BTreeSet<Label>, SimplicialError> {
        let mut seen = BTreeSet::from([label.clone()]);
        let mut stack = vec![label.clone()];
        while let Some(current) = stack.pop() {
            for next in &self.record(&current)?.cofaces {
                if seen.insert(next.clone()) {
                    stack.push(next.clone());
                }
            }
        }
        Ok(seen)
    }
}
