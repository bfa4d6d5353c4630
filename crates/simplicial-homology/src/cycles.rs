//! Cycle, boundary and homology bases.

use std::collections::{BTreeMap, BTreeSet};

use simplicial_complex::SimplicialComplex;
use simplicial_core::{Label, Representation, SimplicialError};

use crate::chain::Chain;
use crate::snf::smith_normal_form;

/// Basis of the k-cycles `Z_k`: the kernel of ∂k.
pub fn cycle_basis<R: Representation>(
    complex: &SimplicialComplex<R>,
    order: usize,
) -> Result<Vec<Chain>, SimplicialError> {
    let reduction = smith_normal_form(complex, order)?;
    Ok(reduction
        .kernel()
        .iter()
        .map(|cycle| Chain::from_simplices(order, cycle.iter().cloned()))
        .collect())
}

/// Cycle bases for `orders`, or for every order up to the maximum when `None`.
pub fn cycle_bases<R: Representation>(
    complex: &SimplicialComplex<R>,
    orders: Option<&[usize]>,
) -> Result<BTreeMap<usize, Vec<Chain>>, SimplicialError> {
    let selected: Vec<usize> = match orders {
        Some(orders) => orders.to_vec(),
        None => complex.max_order().map_or_else(Vec::new, |max| (0..=max).collect()),
    };
    selected
        .into_iter()
        .map(|order| Ok((order, cycle_basis(complex, order)?)))
        .collect()
}

/// Basis of the k-boundaries `B_k`: the image of ∂(k+1).
pub fn boundary_basis<R: Representation>(
    complex: &SimplicialComplex<R>,
    order: usize,
) -> Result<Vec<Chain>, SimplicialError> {
    let reduction = smith_normal_form(complex, order + 1)?;
    Ok(reduction
        .image()
        .iter()
        .map(|boundary| Chain::from_simplices(order, boundary.iter().cloned()))
        .collect())
}

/// Cycles whose classes form a basis of `H_k = Z_k / B_k`.
///
/// The result has exactly as many chains as the k-th Betti number.
pub fn homology_basis<R: Representation>(
    complex: &SimplicialComplex<R>,
    order: usize,
) -> Result<Vec<Chain>, SimplicialError> {
    let mut echelon = Echelon::default();
    for boundary in boundary_basis(complex, order)? {
        echelon.insert(boundary.into_simplices());
    }
    let mut basis = Vec::new();
    for cycle in cycle_basis(complex, order)? {
        if echelon.insert(cycle.simplices().clone()) {
            basis.push(cycle);
        }
    }
    tracing::debug!(order, generators = basis.len(), "extracted homology basis");
    Ok(basis)
}

/// Row echelon form over Z/2, keyed by the largest label of each vector.
#[derive(Debug, Default)]
struct Echelon {
    pivots: BTreeMap<Label, BTreeSet<Label>>,
}

impl Echelon {
    /// Adds `vector` if it is independent of those already held.
    fn insert(&mut self, mut vector: BTreeSet<Label>) -> bool {
        while let Some(pivot) = vector.last().cloned() {
            let Some(row) = self.pivots.get(&pivot) else {
                self.pivots.insert(pivot, vector);
                return true;
            };
            vector = vector.symmetric_difference(row).cloned().collect();
        }
        false
    }
}
