//! Z/2 chains: sets of same-order simplices with coefficient one.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use simplicial_complex::SimplicialComplex;
use simplicial_core::{Label, Representation, SimplicialError};

/// A k-chain over Z/2.
///
/// Presence in `simplices` means a coefficient of one; absence means zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chain {
    order: usize,
    simplices: BTreeSet<Label>,
}

impl Chain {
    /// The zero chain of the given order.
    pub fn new(order: usize) -> Self {
        Self {
            order,
            simplices: BTreeSet::new(),
        }
    }

    /// A chain with the listed simplices. Repeats cancel in pairs.
    pub fn from_simplices(order: usize, simplices: impl IntoIterator<Item = Label>) -> Self {
        let mut chain = Self::new(order);
        for simplex in simplices {
            chain.toggle(simplex);
        }
        chain
    }

    /// Order of the simplices in the chain.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Simplices with coefficient one.
    pub fn simplices(&self) -> &BTreeSet<Label> {
        &self.simplices
    }

    /// Consumes the chain, returning its support.
    pub fn into_simplices(self) -> BTreeSet<Label> {
        self.simplices
    }

    /// Number of simplices with coefficient one.
    pub fn len(&self) -> usize {
        self.simplices.len()
    }

    /// Whether this is the zero chain.
    pub fn is_empty(&self) -> bool {
        self.simplices.is_empty()
    }

    /// Coefficient of a simplex.
    pub fn coefficient(&self, simplex: &Label) -> u8 {
        u8::from(self.simplices.contains(simplex))
    }

    /// Adds one copy of `simplex`.
    pub fn toggle(&mut self, simplex: Label) {
        if !self.simplices.remove(&simplex) {
            self.simplices.insert(simplex);
        }
    }

    /// Chain sum: symmetric difference of the supports.
    pub fn add(&self, other: &Chain) -> Result<Chain, SimplicialError> {
        if self.order != other.order {
            return Err(SimplicialError::invalid_order(
                "chain-order",
                "cannot add chains of different orders",
            )
            .with_context("left", self.order)
            .with_context("right", other.order));
        }
        Ok(Chain {
            order: self.order,
            simplices: self
                .simplices
                .symmetric_difference(&other.simplices)
                .cloned()
                .collect(),
        })
    }

    /// Whether every simplex is in `complex` with the chain's order.
    pub fn is_chain<R: Representation>(&self, complex: &SimplicialComplex<R>) -> bool {
        self.check(complex).is_ok()
    }

    /// Like [`Chain::is_chain`], reporting the first offending simplex.
    pub fn check<R: Representation>(
        &self,
        complex: &SimplicialComplex<R>,
    ) -> Result<(), SimplicialError> {
        for simplex in &self.simplices {
            let order = complex.order_of(simplex)?;
            if order != self.order {
                return Err(SimplicialError::invalid_order(
                    "chain-order",
                    format!("{simplex} has order {order}, not {}", self.order),
                )
                .with_context("simplex", simplex)
                .with_context("expected", self.order));
            }
        }
        Ok(())
    }

    /// Boundary of the chain in `complex`.
    ///
    /// The boundary of a 0-chain is the zero 0-chain.
    pub fn boundary<R: Representation>(
        &self,
        complex: &SimplicialComplex<R>,
    ) -> Result<Chain, SimplicialError> {
        boundary(complex, self)
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.simplices.is_empty() {
            return write!(f, "0");
        }
        let terms: Vec<String> = self.simplices.iter().map(ToString::to_string).collect();
        write!(f, "{}", terms.join(" + "))
    }
}

/// Boundary of `chain`: the faces appearing an odd number of times.
pub fn boundary<R: Representation>(
    complex: &SimplicialComplex<R>,
    chain: &Chain,
) -> Result<Chain, SimplicialError> {
    chain.check(complex)?;
    let Some(lower) = chain.order.checked_sub(1) else {
        return Ok(Chain::new(0));
    };
    let mut result = Chain::new(lower);
    for simplex in &chain.simplices {
        for face in complex.faces(simplex)? {
            result.toggle(face);
        }
    }
    Ok(result)
}
