#![deny(missing_docs)]

//! Z/2 homology of simplicial complexes.
//!
//! Boundary operators are reduced to Smith normal form while the row and
//! column labels are carried along as chains. The reduced operators give
//! Betti numbers, cycle and boundary bases, and a basis of homology
//! generators. [`HomologyExt`] exposes the same operations as methods on
//! [`SimplicialComplex`].

mod betti;
mod chain;
mod cycles;
mod snf;

use std::collections::BTreeMap;

use simplicial_complex::SimplicialComplex;
use simplicial_core::{Representation, SimplicialError};

pub use betti::{betti_number, betti_numbers, boundary_rank};
pub use chain::{boundary, Chain};
pub use cycles::{boundary_basis, cycle_basis, cycle_bases, homology_basis};
pub use snf::{reduce, smith_normal_form, Reduction};

/// Homology queries as methods on a complex.
pub trait HomologyExt {
    /// Boundary operator at `order` reduced to Smith normal form.
    fn smith_normal_form(&self, order: usize) -> Result<Reduction, SimplicialError>;

    /// k-th Betti number.
    fn betti_number(&self, order: usize) -> usize;

    /// Betti numbers for `orders`, all orders when `None`.
    fn betti_numbers(&self, orders: Option<&[usize]>) -> BTreeMap<usize, usize>;

    /// Kernel basis of ∂k.
    fn cycle_basis(&self, order: usize) -> Result<Vec<Chain>, SimplicialError>;

    /// Kernel bases for `orders`, all orders when `None`.
    fn cycle_bases(
        &self,
        orders: Option<&[usize]>,
    ) -> Result<BTreeMap<usize, Vec<Chain>>, SimplicialError>;

    /// Image basis of ∂(k+1).
    fn boundary_basis(&self, order: usize) -> Result<Vec<Chain>, SimplicialError>;

    /// Representative cycles of a basis of `H_k`.
    fn homology_basis(&self, order: usize) -> Result<Vec<Chain>, SimplicialError>;

    /// Boundary of a chain.
    fn boundary(&self, chain: &Chain) -> Result<Chain, SimplicialError>;
}

impl<R: Representation> HomologyExt for SimplicialComplex<R> {
    fn smith_normal_form(&self, order: usize) -> Result<Reduction, SimplicialError> {
        snf::smith_normal_form(self, order)
    }

    fn betti_number(&self, order: usize) -> usize {
        betti::betti_number(self, order)
    }

    fn betti_numbers(&self, orders: Option<&[usize]>) -> BTreeMap<usize, usize> {
        betti::betti_numbers(self, orders)
    }

    fn cycle_basis(&self, order: usize) -> Result<Vec<Chain>, SimplicialError> {
        cycles::cycle_basis(self, order)
    }

    fn cycle_bases(
        &self,
        orders: Option<&[usize]>,
    ) -> Result<BTreeMap<usize, Vec<Chain>>, SimplicialError> {
        cycles::cycle_bases(self, orders)
    }

    fn boundary_basis(&self, order: usize) -> Result<Vec<Chain>, SimplicialError> {
        cycles::boundary_basis(self, order)
    }

    fn homology_basis(&self, order: usize) -> Result<Vec<Chain>, SimplicialError> {
        cycles::homology_basis(self, order)
    }

    fn boundary(&self, chain: &Chain) -> Result<Chain, SimplicialError> {
        chain.boundary(self)
    }
}
