//! The binary generator matrix and its reductions.

use crate::core::{LogicalError, Pauli, StabilizerTableau};
use ndarray::{Array3, ArrayView2, Axis, s};
use tracing::trace;

/// Symplectic form of a tableau: shape `(2, m, n)`, where half 0 is the
/// X-part (set for X and Y) and half 1 the Z-part (set for Z and Y).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorMatrix {
    bits: Array3<u8>,
}

impl GeneratorMatrix {
    pub fn from_tableau(tableau: &StabilizerTableau) -> Self {
        let m = tableau.num_stabilizers();
        let n = tableau.num_qubits();
        let mut bits = Array3::<u8>::zeros((2, m, n));
        for (i, row) in tableau.rows().iter().enumerate() {
            for (j, p) in row.iter().enumerate() {
                bits[[0, i, j]] = u8::from(p.has_x());
                bits[[1, i, j]] = u8::from(p.has_z());
            }
        }
        Self { bits }
    }

    /// Wraps a raw `(2, m, n)` array of 0/1 entries.
    ///
    /// # Errors
    /// `LogicalError::Construction` on a wrong leading dimension or non-binary entries.
    pub fn from_array(bits: Array3<u8>) -> Result<Self, LogicalError> {
        if bits.len_of(Axis(0)) != 2 {
            return Err(LogicalError::Construction {
                message: format!(
                    "Generator matrix must have two halves, found {}",
                    bits.len_of(Axis(0))
                ),
            });
        }
        if bits.iter().any(|&b| b > 1) {
            return Err(LogicalError::Construction {
                message: "Generator matrix entries must be 0 or 1".to_string(),
            });
        }
        Ok(Self { bits })
    }

    pub fn bits(&self) -> &Array3<u8> {
        &self.bits
    }

    pub fn num_rows(&self) -> usize {
        self.bits.len_of(Axis(1))
    }

    pub fn num_cols(&self) -> usize {
        self.bits.len_of(Axis(2))
    }

    pub fn x_part(&self) -> ArrayView2<'_, u8> {
        self.bits.index_axis(Axis(0), 0)
    }

    pub fn z_part(&self) -> ArrayView2<'_, u8> {
        self.bits.index_axis(Axis(0), 1)
    }

    pub fn get(&self, half: usize, row: usize, col: usize) -> u8 {
        self.bits.get([half, row, col]).copied().unwrap_or(0)
    }

    /// The Pauli held at (`row`, `col`).
    pub fn pauli(&self, row: usize, col: usize) -> Pauli {
        Pauli::from_bits(self.get(0, row, col) == 1, self.get(1, row, col) == 1)
    }

    /// Number of rows with a non-zero X-part.
    pub fn x_rank(&self) -> usize {
        self.x_part()
            .axis_iter(Axis(0))
            .filter(|row| row.iter().any(|&b| b == 1))
            .count()
    }

    /// Gaussian elimination on the X-part, applying every row operation to
    /// both halves.
    ///
    /// Columns are scanned left to right; for each column the first row at
    /// or below the current row with a 1 in the X-part is swapped up, and
    /// every other row with a 1 in that column absorbs it. Stops once all
    /// rows are placed. Returns the rank r of the X-part; afterwards the
    /// first r rows are independent in X and the rest have zero X-part.
    /// Running it again changes nothing.
    pub fn row_reduce(&mut self) -> usize {
        let m = self.num_rows();
        let n = self.num_cols();
        let mut row = 0;
        for col in 0..n {
            if row >= m {
                break;
            }
            let Some(pivot) = (row..m).find(|&i| self.bits[[0, i, col]] == 1) else {
                continue;
            };
            self.swap_rows(row, pivot);
            for i in 0..m {
                if i != row && self.bits[[0, i, col]] == 1 {
                    self.xor_row_into(i, row);
                }
            }
            row += 1;
        }
        let rank = self.x_rank();
        trace!(rank, "reduced generator X-part");
        rank
    }

    /// First X-part column holding a 1 for each of the first `r` rows.
    pub fn pivot_columns(&self, r: usize) -> Vec<usize> {
        (0..r.min(self.num_rows()))
            .filter_map(|i| (0..self.num_cols()).find(|&j| self.bits[[0, i, j]] == 1))
            .collect()
    }

    /// Reorders columns so that new column `c` is old column `order[c]`.
    ///
    /// # Errors
    /// `LogicalError::Construction` if `order` is not a permutation of the columns.
    pub fn permute_columns(&mut self, order: &[usize]) -> Result<(), LogicalError> {
        let n = self.num_cols();
        let mut seen = vec![false; n];
        if order.len() != n
            || order
                .iter()
                .any(|&c| c >= n || std::mem::replace(&mut seen[c], true))
        {
            return Err(LogicalError::Construction {
                message: format!("Column order {:?} is not a permutation of {} columns", order, n),
            });
        }
        let old = self.bits.clone();
        for (new_col, &old_col) in order.iter().enumerate() {
            self.bits
                .slice_mut(s![.., .., new_col])
                .assign(&old.slice(s![.., .., old_col]));
        }
        Ok(())
    }

    /// Eliminates the Z-part of rows `[r, m)` (whose X-part is zero) over
    /// columns `[r, n)`, moving each pivot onto the diagonal with a column
    /// swap. Swaps are mirrored into `column_order`. Row operations stay
    /// within `[r, m)` so the first r rows are untouched.
    pub fn reduce_z_block(&mut self, r: usize, column_order: &mut [usize]) {
        let m = self.num_rows();
        let n = self.num_cols();
        let mut row = r;
        for col in r..n {
            if row >= m {
                break;
            }
            let Some(pivot) = (row..m).find(|&i| self.bits[[1, i, col]] == 1) else {
                continue;
            };
            self.swap_rows(row, pivot);
            for i in r..m {
                if i != row && self.bits[[1, i, col]] == 1 {
                    self.xor_row_into(i, row);
                }
            }
            if col != row {
                self.swap_columns(col, row);
                column_order.swap(col, row);
            }
            row += 1;
        }
    }

    /// Brings the matrix into standard form and returns `(r, column_order)`,
    /// where `column_order[c]` is the physical qubit now held in column `c`.
    ///
    /// This is [`row_reduce`](Self::row_reduce), followed by moving the X
    /// pivots to columns `[0, r)` and by [`reduce_z_block`](Self::reduce_z_block).
    pub fn standard_form(&mut self) -> Result<(usize, Vec<usize>), LogicalError> {
        let r = self.row_reduce();
        let n = self.num_cols();
        let pivots = self.pivot_columns(r);
        let mut column_order = pivots.clone();
        column_order.extend((0..n).filter(|c| !pivots.contains(c)));
        self.permute_columns(&column_order)?;
        self.reduce_z_block(r, &mut column_order);
        Ok((r, column_order))
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for half in 0..2 {
            for col in 0..self.num_cols() {
                self.bits.swap([half, a, col], [half, b, col]);
            }
        }
    }

    fn swap_columns(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for half in 0..2 {
            for row in 0..self.num_rows() {
                self.bits.swap([half, row, a], [half, row, b]);
            }
        }
    }

    /// `row[dst] ^= row[src]` in both halves.
    fn xor_row_into(&mut self, dst: usize, src: usize) {
        for half in 0..2 {
            for col in 0..self.num_cols() {
                let v = self.bits[[half, src, col]];
                self.bits[[half, dst, col]] ^= v;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::steane;

    fn steane_matrix() -> Result<GeneratorMatrix, LogicalError> {
        Ok(GeneratorMatrix::from_tableau(&StabilizerTableau::new(&steane::TABLEAU)?))
    }

    #[test]
    fn test_steane_rank_and_identity_order() -> Result<(), LogicalError> {
        let mut g = steane_matrix()?;
        let (r, order) = g.standard_form()?;
        assert_eq!(r, 3);
        assert_eq!(order, (0..7).collect::<Vec<_>>());
        // Rows past r are Z-only after reduction.
        for i in r..g.num_rows() {
            assert!((0..7).all(|j| g.get(0, i, j) == 0));
        }
        Ok(())
    }

    #[test]
    fn test_row_reduce_is_idempotent() -> Result<(), LogicalError> {
        let mut g = steane_matrix()?;
        g.row_reduce();
        let once = g.clone();
        g.row_reduce();
        assert_eq!(g, once);
        Ok(())
    }

    #[test]
    fn test_pivots_moved_to_front() -> Result<(), LogicalError> {
        let tableau = StabilizerTableau::new(&["XXXXXXIII", "IIIXXXXXX", "ZZIIIIIII"])?;
        let mut g = GeneratorMatrix::from_tableau(&tableau);
        let (r, order) = g.standard_form()?;
        assert_eq!(r, 2);
        assert_eq!(&order[..2], &[0, 3]);
        assert_eq!(g.get(0, 0, 0), 1);
        assert_eq!(g.get(0, 1, 1), 1);
        assert_eq!(g.get(0, 0, 1), 0);
        Ok(())
    }

    #[test]
    fn test_permute_columns_validates() -> Result<(), LogicalError> {
        let mut g = steane_matrix()?;
        assert!(g.permute_columns(&[0, 0, 1, 2, 3, 4, 5]).is_err());
        assert!(g.permute_columns(&[0, 1]).is_err());
        Ok(())
    }

    #[test]
    fn test_from_array_rejects_bad_shapes() {
        assert!(GeneratorMatrix::from_array(Array3::zeros((3, 1, 1))).is_err());
        let mut bits = Array3::zeros((2, 1, 1));
        bits[[0, 0, 0]] = 2;
        assert!(GeneratorMatrix::from_array(bits).is_err());
    }
}
