//! Dense matrices over the two-element field.
//!
//! Rows are packed into `u64` words. Addition is XOR and multiplication is AND,
//! so every elementary operation used by boundary maintenance and reduction is
//! a handful of word operations per row.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, SimplicialError};

const WORD: usize = 64;

fn words_for(cols: usize) -> usize {
    cols.div_ceil(WORD)
}

fn bit(row: &[u64], col: usize) -> bool {
    (row[col / WORD] >> (col % WORD)) & 1 == 1
}

fn put(row: &mut [u64], col: usize, value: bool) {
    let mask = 1u64 << (col % WORD);
    if value {
        row[col / WORD] |= mask;
    } else {
        row[col / WORD] &= !mask;
    }
}

/// Boolean matrix with GF(2) arithmetic.
///
/// Bits beyond the logical column count are always zero, so derived equality
/// compares logical content.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BitMatrix {
    rows: usize,
    cols: usize,
    data: Vec<Vec<u64>>,
}

impl BitMatrix {
    /// Creates an all-zero matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![vec![0u64; words_for(cols)]; rows],
        }
    }

    /// Creates the identity matrix of the given size.
    pub fn identity(size: usize) -> Self {
        let mut matrix = Self::zeros(size, size);
        for i in 0..size {
            matrix.set(i, i, true);
        }
        matrix
    }

    /// Builds a matrix from dense 0/1 rows. Any non-zero entry counts as one.
    pub fn from_dense(rows: &[Vec<u8>]) -> Result<Self, SimplicialError> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut matrix = Self::zeros(rows.len(), cols);
        for (r, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(SimplicialError::InvalidStructure(
                    ErrorInfo::new("ragged-matrix", "rows have differing lengths")
                        .with_context("row", r.to_string())
                        .with_context("expected", cols.to_string())
                        .with_context("found", row.len().to_string()),
                ));
            }
            for (c, &value) in row.iter().enumerate() {
                if value != 0 {
                    matrix.set(r, c, true);
                }
            }
        }
        Ok(matrix)
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the entry at `(row, col)`.
    ///
    /// # Panics
    /// Panics if the position is out of range.
    pub fn get(&self, row: usize, col: usize) -> bool {
        assert!(col < self.cols, "column {col} out of range ({})", self.cols);
        bit(&self.data[row], col)
    }

    /// Sets the entry at `(row, col)`.
    ///
    /// # Panics
    /// Panics if the position is out of range.
    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        assert!(col < self.cols, "column {col} out of range ({})", self.cols);
        put(&mut self.data[row], col, value);
    }

    /// Appends an all-zero row.
    pub fn push_zero_row(&mut self) {
        self.data.push(vec![0u64; words_for(self.cols)]);
        self.rows += 1;
    }

    /// Appends a column with ones at the given row positions.
    pub fn push_column(&mut self, ones: &[usize]) {
        let col = self.cols;
        self.cols += 1;
        let width = words_for(self.cols);
        for row in &mut self.data {
            row.resize(width, 0);
        }
        for &r in ones {
            put(&mut self.data[r], col, true);
        }
    }

    /// Removes a row, shifting later rows up by one.
    pub fn remove_row(&mut self, row: usize) {
        self.data.remove(row);
        self.rows -= 1;
    }

    /// Removes a column, shifting later columns left by one.
    ///
    /// Works a word at a time, carrying the low bit of each following word.
    pub fn remove_column(&mut self, col: usize) {
        assert!(col < self.cols, "column {col} out of range ({})", self.cols);
        let first = col / WORD;
        let keep = (1u64 << (col % WORD)) - 1;
        for row in &mut self.data {
            let len = row.len();
            for w in first..len {
                let carry = if w + 1 < len { row[w + 1] << (WORD - 1) } else { 0 };
                let shifted = if w == first {
                    (row[w] & keep) | ((row[w] >> 1) & !keep)
                } else {
                    row[w] >> 1
                };
                row[w] = shifted | carry;
            }
        }
        self.cols -= 1;
        let width = words_for(self.cols);
        for row in &mut self.data {
            row.truncate(width);
        }
    }

    /// Exchanges two rows.
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        self.data.swap(a, b);
    }

    /// Exchanges two columns.
    pub fn swap_columns(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for row in &mut self.data {
            let (x, y) = (bit(row, a), bit(row, b));
            put(row, a, y);
            put(row, b, x);
        }
    }

    /// Adds row `src` into row `dst` (mod 2).
    pub fn xor_row_into(&mut self, src: usize, dst: usize) {
        if src == dst {
            return;
        }
        let source = self.data[src].clone();
        for (word, add) in self.data[dst].iter_mut().zip(source) {
            *word ^= add;
        }
    }

    /// Adds column `src` into column `dst` (mod 2).
    pub fn xor_column_into(&mut self, src: usize, dst: usize) {
        if src == dst {
            return;
        }
        for row in &mut self.data {
            if bit(row, src) {
                let current = bit(row, dst);
                put(row, dst, !current);
            }
        }
    }

    /// Returns whether every entry of the row is zero.
    pub fn row_is_zero(&self, row: usize) -> bool {
        self.data[row].iter().all(|&word| word == 0)
    }

    /// Returns whether every entry of the column is zero.
    pub fn column_is_zero(&self, col: usize) -> bool {
        self.data.iter().all(|row| !bit(row, col))
    }

    /// Row positions holding a one in the given column.
    pub fn column_ones(&self, col: usize) -> Vec<usize> {
        (0..self.rows)
            .filter(|&r| bit(&self.data[r], col))
            .collect()
    }

    /// Column positions holding a one in the given row.
    pub fn row_ones(&self, row: usize) -> Vec<usize> {
        (0..self.cols)
            .filter(|&c| bit(&self.data[row], c))
            .collect()
    }

    /// Total number of ones.
    pub fn count_ones(&self) -> usize {
        self.data
            .iter()
            .flat_map(|row| row.iter())
            .map(|word| word.count_ones() as usize)
            .sum()
    }

    /// Returns whether the matrix has no non-zero entry.
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|row| row.iter().all(|&word| word == 0))
    }

    /// Mod-2 matrix product `self * other`.
    pub fn multiply(&self, other: &BitMatrix) -> Result<BitMatrix, SimplicialError> {
        if self.cols != other.rows {
            return Err(SimplicialError::InvalidStructure(
                ErrorInfo::new("shape-mismatch", "matrix dimensions do not compose")
                    .with_context("left", format!("{}x{}", self.rows, self.cols))
                    .with_context("right", format!("{}x{}", other.rows, other.cols)),
            ));
        }
        let mut product = BitMatrix::zeros(self.rows, other.cols);
        for (r, row) in self.data.iter().enumerate() {
            for k in 0..self.cols {
                if bit(row, k) {
                    for (word, add) in product.data[r].iter_mut().zip(&other.data[k]) {
                        *word ^= add;
                    }
                }
            }
        }
        Ok(product)
    }

    /// Rank over GF(2), computed by row elimination on a copy.
    pub fn rank(&self) -> usize {
        let mut rows = self.data.clone();
        let mut rank = 0;
        for col in 0..self.cols {
            let Some(pivot) = (rank..rows.len()).find(|&r| bit(&rows[r], col)) else {
                continue;
            };
            rows.swap(rank, pivot);
            let pivot_row = rows[rank].clone();
            for (r, row) in rows.iter_mut().enumerate() {
                if r != rank && bit(row, col) {
                    for (word, add) in row.iter_mut().zip(&pivot_row) {
                        *word ^= add;
                    }
                }
            }
            rank += 1;
            if rank == rows.len() {
                break;
            }
        }
        rank
    }

    /// Dense 0/1 rows, convenient for assertions and display.
    pub fn to_dense(&self) -> Vec<Vec<u8>> {
        self.data
            .iter()
            .map(|row| (0..self.cols).map(|c| u8::from(bit(row, c))).collect())
            .collect()
    }
}

impl fmt::Debug for BitMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitMatrix {}x{}", self.rows, self.cols)?;
        for row in self.to_dense() {
            let line: String = row
                .iter()
                .map(|&v| if v == 1 { '1' } else { '0' })
                .collect();
            writeln!(f, "  {line}")?;
        }
        Ok(())
    }
}
