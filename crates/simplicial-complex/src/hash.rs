use sha2::{Digest, Sha256};
use simplicial_core::{Label, Representation, SimplicialError};

use crate::complex::SimplicialComplex;
use crate::serialization::CURRENT_SCHEMA;

fn update_label(hasher: &mut Sha256, label: &Label) {
    match label {
        Label::Int(value) => {
            hasher.update([0u8]);
            hasher.update(value.to_le_bytes());
        }
        Label::Name(name) => {
            hasher.update([1u8]);
            hasher.update((name.len() as u64).to_le_bytes());
            hasher.update(name.as_bytes());
        }
    }
}

/// Computes the canonical structural hash of a complex.
///
/// Labels, orders and faces are hashed in sorted order, so two complexes
/// built in different insertion orders hash identically. Attributes are not
/// part of the structure.
pub fn canonical_hash<R: Representation>(
    complex: &SimplicialComplex<R>,
) -> Result<String, SimplicialError> {
    let mut hasher = Sha256::new();
    hasher.update((CURRENT_SCHEMA.major as u64).to_le_bytes());
    hasher.update((CURRENT_SCHEMA.minor as u64).to_le_bytes());
    hasher.update((CURRENT_SCHEMA.patch as u64).to_le_bytes());
    hasher.update((complex.number_of_simplices() as u64).to_le_bytes());

    let Some(max) = complex.max_order() else {
        return Ok(hex_digest(hasher));
    };
    for order in 0..=max {
        let mut simplices = complex.simplices_of_order(order);
        simplices.sort();
        hasher.update((order as u64).to_le_bytes());
        hasher.update((simplices.len() as u64).to_le_bytes());
        for simplex in &simplices {
            update_label(&mut hasher, simplex);
            for face in complex.faces(simplex)? {
                update_label(&mut hasher, &face);
            }
        }
    }
    Ok(hex_digest(hasher))
}

fn hex_digest(hasher: Sha256) -> String {
    hasher
        .finalize()
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect::<String>()
}
