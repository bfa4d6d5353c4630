use simplicial_core::BitMatrix;

/// Incrementally maintained boundary operators; entry `k - 1` holds ∂k.
///
/// Rows and columns are addressed by the dense per-order indices of
/// [`OrderIndex`](crate::index::OrderIndex), so every insert or removal there
/// must be mirrored here at the same index.
#[derive(Debug, Clone, Default)]
pub struct BoundaryMatrices {
    operators: Vec<BitMatrix>,
}

impl BoundaryMatrices {
    /// Records a new simplex of `order` whose faces sit at `face_rows`.
    ///
    /// `lower_count` is the number of `(order - 1)`-simplices, used when ∂order
    /// is opened by this insert.
    pub fn on_insert(&mut self, order: usize, face_rows: &[usize], lower_count: usize) {
        if order >= 1 {
            if self.operators.len() < order {
                self.operators.push(BitMatrix::zeros(lower_count, 0));
            }
            self.operators[order - 1].push_column(face_rows);
        }
        if let Some(upper) = self.operators.get_mut(order) {
            upper.push_zero_row();
        }
    }

    /// Removes the simplex of `order` at `index`, shifting later rows and columns.
    pub fn on_remove(&mut self, order: usize, index: usize) {
        if order >= 1 {
            if let Some(own) = self.operators.get_mut(order - 1) {
                own.remove_column(index);
            }
        }
        if let Some(upper) = self.operators.get_mut(order) {
            upper.remove_row(index);
        }
        while self.operators.last().is_some_and(|m| m.cols() == 0) {
            self.operators.pop();
        }
    }

    /// ∂order as a standalone matrix, with the empty extremes filled in.
    pub fn operator(&self, order: usize, counts: impl Fn(usize) -> usize) -> BitMatrix {
        if order == 0 {
            return BitMatrix::zeros(0, counts(0));
        }
        match self.operators.get(order - 1) {
            Some(matrix) => matrix.clone(),
            None => BitMatrix::zeros(counts(order - 1), 0),
        }
    }
}
