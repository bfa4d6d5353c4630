//! Smith normal form over GF(2) with label tracking.
//!
//! Row and column labels start as singleton chains. Every elementary
//! operation applied to the matrix is mirrored on the chains, so after
//! reduction:
//!
//! * column `j` of the reduced matrix is the boundary of `columns[j]`, which
//!   makes `columns[rank..]` a basis of the kernel;
//! * `rows[..rank]` are the chains hit by the first `rank` columns, a basis
//!   of the image.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use simplicial_complex::SimplicialComplex;
use simplicial_core::{BitMatrix, Label, Representation, SimplicialError};

/// Outcome of reducing a boundary operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reduction {
    /// Reduced matrix; ones only on a prefix of the diagonal.
    pub matrix: BitMatrix,
    /// Number of ones on the diagonal.
    pub rank: usize,
    /// Row chains after reduction.
    pub rows: Vec<BTreeSet<Label>>,
    /// Column chains after reduction.
    pub columns: Vec<BTreeSet<Label>>,
}

impl Reduction {
    /// Column chains with zero boundary.
    pub fn kernel(&self) -> &[BTreeSet<Label>] {
        &self.columns[self.rank..]
    }

    /// Row chains spanning the image.
    pub fn image(&self) -> &[BTreeSet<Label>] {
        &self.rows[..self.rank]
    }
}

fn symmetric_difference_into(target: &mut BTreeSet<Label>, source: &BTreeSet<Label>) {
    for label in source {
        if !target.remove(label) {
            target.insert(label.clone());
        }
    }
}

fn find_pivot(matrix: &BitMatrix, from: usize) -> Option<(usize, usize)> {
    (from..matrix.cols()).find_map(|col| {
        (from..matrix.rows())
            .find(|row| matrix.get(*row, col))
            .map(|row| (row, col))
    })
}

/// Reduces `matrix` to Smith normal form, tracking labels as chains.
pub fn reduce(
    matrix: &BitMatrix,
    row_labels: &[Label],
    column_labels: &[Label],
) -> Result<Reduction, SimplicialError> {
    if matrix.shape() != (row_labels.len(), column_labels.len()) {
        return Err(SimplicialError::invalid_structure(
            "label-shape",
            "label counts do not match the matrix shape",
        )
        .with_context("rows", matrix.rows())
        .with_context("cols", matrix.cols())
        .with_context("row_labels", row_labels.len())
        .with_context("column_labels", column_labels.len()));
    }
    let mut reduced = matrix.clone();
    let mut rows: Vec<BTreeSet<Label>> = row_labels
        .iter()
        .map(|label| BTreeSet::from([label.clone()]))
        .collect();
    let mut columns: Vec<BTreeSet<Label>> = column_labels
        .iter()
        .map(|label| BTreeSet::from([label.clone()]))
        .collect();

    let mut rank = 0;
    let diagonal = reduced.rows().min(reduced.cols());
    while rank < diagonal {
        let Some((row, col)) = find_pivot(&reduced, rank) else {
            break;
        };
        reduced.swap_rows(rank, row);
        rows.swap(rank, row);
        reduced.swap_columns(rank, col);
        columns.swap(rank, col);

        for below in rank + 1..reduced.rows() {
            if reduced.get(below, rank) {
                reduced.xor_row_into(rank, below);
                let (pivot, other) = split_pair(&mut rows, rank, below);
                symmetric_difference_into(pivot, other);
            }
        }
        for right in rank + 1..reduced.cols() {
            if reduced.get(rank, right) {
                reduced.xor_column_into(rank, right);
                let (pivot, other) = split_pair(&mut columns, rank, right);
                symmetric_difference_into(other, pivot);
            }
        }
        rank += 1;
    }
    Ok(Reduction {
        matrix: reduced,
        rank,
        rows,
        columns,
    })
}

/// Mutable access to two distinct entries, `first < second`.
fn split_pair<T>(items: &mut [T], first: usize, second: usize) -> (&mut T, &mut T) {
    let (head, tail) = items.split_at_mut(second);
    (&mut head[first], &mut tail[0])
}

/// Reduces the boundary operator of `complex` at `order`.
pub fn smith_normal_form<R: Representation>(
    complex: &SimplicialComplex<R>,
    order: usize,
) -> Result<Reduction, SimplicialError> {
    let matrix = complex.boundary_operator(order);
    let rows = match order {
        0 => Vec::new(),
        _ => complex.simplices_of_order(order - 1),
    };
    let columns = complex.simplices_of_order(order);
    let reduction = reduce(&matrix, &rows, &columns)?;
    tracing::trace!(order, rank = reduction.rank, "reduced boundary operator");
    Ok(reduction)
}
