#![deny(missing_docs)]

//! Closure-preserving simplicial complex engine over the `simplicial-core`
//! contracts.
//!
//! [`SimplicialComplex`] is the single writer. It validates every mutation
//! before delegating storage to a [`Representation`](simplicial_core::Representation):
//! [`ReferenceRepresentation`] keeps boundary operators up to date
//! incrementally, while [`GraphRepresentation`] stores points and edges only.

mod boundary;
mod complex;
mod compose;
mod config;
mod faces;
mod flag;
mod graphrep;
mod hash;
mod index;
mod reference;
mod serialization;

pub use complex::{SimplicialComplex, WalkOptions, MAX_BASIS_SIZE};
pub use config::ComplexConfig;
pub use graphrep::GraphRepresentation;
pub use hash::canonical_hash;
pub use reference::ReferenceRepresentation;

/// Re-export serialization helpers for downstream crates.
pub use serialization::{
    from_bytes, from_json, read_json, to_bytes, to_json, write_json, SimplexRecord,
    CURRENT_SCHEMA,
};
