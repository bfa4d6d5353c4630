#![deny(missing_docs)]
#![doc = "Core traits and data types for simplicial complexes: labels, attributes, the error \
taxonomy, GF(2) matrices and the representation contract implemented by complex backends."]

use std::collections::BTreeSet;

pub mod errors;
pub mod label;
pub mod matrix;
pub mod schema;

pub use errors::{ErrorInfo, SimplicialError};
pub use label::{labels, Attributes, Label, Renaming};
pub use matrix::BitMatrix;
pub use schema::SchemaVersion;

/// Storage contract for a simplicial complex.
///
/// A representation stores simplices and answers structural queries. It does
/// not validate: the mutation engine checks every precondition (face counts and
/// orders, label and basis uniqueness, absence of cofaces on removal) before it
/// calls [`Representation::insert`], [`Representation::remove`] or
/// [`Representation::relabel`]. Implementations only report errors for
/// missing labels or violated storage limits.
pub trait Representation: Clone + std::fmt::Debug + Default {
    /// Highest order this backend can store, if bounded.
    fn order_limit(&self) -> Option<usize> {
        None
    }

    /// Whether the label names a stored simplex.
    fn contains(&self, simplex: &Label) -> bool;

    /// Order of a stored simplex.
    fn order_of(&self, simplex: &Label) -> Result<usize, SimplicialError>;

    /// Dense index of the simplex within its order.
    fn index_of(&self, simplex: &Label) -> Result<usize, SimplicialError>;

    /// Largest order holding at least one simplex, `None` when empty.
    fn max_order(&self) -> Option<usize>;

    /// Total number of stored simplices.
    fn len(&self) -> usize;

    /// Whether nothing is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Simplices of one order in canonical (boundary-matrix) order.
    fn simplices_of_order(&self, order: usize) -> Vec<Label>;

    /// Number of simplices of one order.
    fn count_of_order(&self, order: usize) -> usize {
        self.simplices_of_order(order).len()
    }

    /// Immediate faces.
    fn faces(&self, simplex: &Label) -> Result<BTreeSet<Label>, SimplicialError>;

    /// Simplices having this one as an immediate face.
    fn cofaces(&self, simplex: &Label) -> Result<BTreeSet<Label>, SimplicialError>;

    /// The 0-simplices underlying the simplex.
    fn basis_of(&self, simplex: &Label) -> Result<BTreeSet<Label>, SimplicialError>;

    /// The unique simplex with exactly this basis, if any.
    fn simplex_with_basis(&self, basis: &BTreeSet<Label>) -> Option<Label>;

    /// Attributes of a simplex.
    fn attributes(&self, simplex: &Label) -> Result<&Attributes, SimplicialError>;

    /// Mutable attributes of a simplex.
    fn attributes_mut(&mut self, simplex: &Label) -> Result<&mut Attributes, SimplicialError>;

    /// Stores a validated simplex of `order` with the given faces.
    fn insert(
        &mut self,
        label: Label,
        order: usize,
        faces: &[Label],
        attributes: Attributes,
    ) -> Result<(), SimplicialError>;

    /// Removes a simplex that is no longer a face of anything.
    fn remove(&mut self, simplex: &Label) -> Result<(), SimplicialError>;

    /// Renames a simplex, rewriting every reference to it.
    fn relabel(&mut self, old: &Label, new: Label) -> Result<(), SimplicialError>;

    /// Boundary operator at `order`: rows are `(order - 1)`-simplices, columns
    /// `order`-simplices, both in canonical order.
    fn boundary_operator(&self, order: usize) -> BitMatrix;
}
