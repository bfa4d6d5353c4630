//! Betti numbers from boundary ranks.

use std::collections::BTreeMap;

use simplicial_complex::SimplicialComplex;
use simplicial_core::Representation;

/// Rank of the boundary operator at `order`.
pub fn boundary_rank<R: Representation>(complex: &SimplicialComplex<R>, order: usize) -> usize {
    complex.boundary_operator(order).rank()
}

/// k-th Betti number over Z/2: `(n_k - rank ∂k) - rank ∂(k+1)`.
pub fn betti_number<R: Representation>(complex: &SimplicialComplex<R>, order: usize) -> usize {
    let cycles = complex.number_of_simplices_of_order(order) - boundary_rank(complex, order);
    cycles - boundary_rank(complex, order + 1)
}

/// Betti numbers for `orders`, or for every order up to the maximum when `None`.
pub fn betti_numbers<R: Representation>(
    complex: &SimplicialComplex<R>,
    orders: Option<&[usize]>,
) -> BTreeMap<usize, usize> {
    let selected: Vec<usize> = match orders {
        Some(orders) => orders.to_vec(),
        None => complex.max_order().map_or_else(Vec::new, |max| (0..=max).collect()),
    };
    let betti: BTreeMap<usize, usize> = selected
        .into_iter()
        .map(|order| (order, betti_number(complex, order)))
        .collect();
    tracing::debug!(?betti, "computed betti numbers");
    betti
}
