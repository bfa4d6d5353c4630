#![deny(missing_docs)]

//! Filtrations: simplicial complexes whose simplices are born at integer
//! indices.
//!
//! A [`Filtration`] grows a complex index by index. Adding a simplex whose
//! faces are born later than the current index fails, and deleting a simplex
//! removes everything built on it whatever its index, so the snapshot at each
//! index is always a closed subcomplex of the next.

mod filtration;

pub use filtration::{Complexes, Filtration};
