//! Logical Pauli operators of a code in standard form.

use super::gf2;
use super::generator::GeneratorMatrix;
use crate::circuits::Circuit;
use crate::core::{LogicalError, Pauli, QubitId};
use crate::operations::{Gate, Operation};
use ndarray::{Array2, Array3, Axis, s};

/// Binary logical X and Z vectors, each shaped `(2, k, n)`, indexed by
/// physical qubit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalOperators {
    x: Array3<u8>,
    z: Array3<u8>,
}

impl LogicalOperators {
    /// Derives the logicals from a matrix in standard form with X-rank `r`
    /// and `k` logical qubits. With `m = n - k` and the blocks
    /// `A2 = X[0:r, m:n]`, `C1 = Z[0:r, r:m]`, `C2 = Z[0:r, m:n]`,
    /// `E = Z[r:m, m:n]`:
    ///
    /// * logical X: X-half `[0 | Eᵀ | I]`, Z-half `[Eᵀ C1ᵀ + C2ᵀ | 0 | 0]`
    /// * logical Z: X-half `0`, Z-half `[A2ᵀ | 0 | I]`
    ///
    /// Columns are then mapped back to physical qubits through `column_order`.
    pub fn derive(
        standard_form: &GeneratorMatrix,
        r: usize,
        k: usize,
        column_order: &[usize],
    ) -> Result<Self, LogicalError> {
        let n = standard_form.num_cols();
        let m = standard_form.num_rows();
        if m + k != n || r > m || column_order.len() != n {
            return Err(LogicalError::Construction {
                message: format!(
                    "Cannot partition a {}x{} generator with r={} and k={}",
                    m, n, r, k
                ),
            });
        }
        let x_part = standard_form.x_part();
        let z_part = standard_form.z_part();
        let a2 = x_part.slice(s![0..r, m..n]);
        let c1 = z_part.slice(s![0..r, r..m]);
        let c2 = z_part.slice(s![0..r, m..n]);
        let e = z_part.slice(s![r..m, m..n]);

        let e_t = e.t();
        // Eᵀ C1ᵀ + C2ᵀ, shape (k, r)
        let mut lx_z_left = gf2::matmul(e_t, c1.t())?;
        lx_z_left ^= &c2.t();

        let mut lx = Array3::<u8>::zeros((2, k, n));
        lx.slice_mut(s![0, .., r..m]).assign(&e_t);
        lx.slice_mut(s![1, .., 0..r]).assign(&lx_z_left);

        let mut lz = Array3::<u8>::zeros((2, k, n));
        lz.slice_mut(s![1, .., 0..r]).assign(&a2.t());

        for i in 0..k {
            lx[[0, i, m + i]] = 1;
            lz[[1, i, m + i]] = 1;
        }

        Ok(Self {
            x: unpermute(&lx, column_order),
            z: unpermute(&lz, column_order),
        })
    }

    /// Logical X vectors, shape `(2, k, n)`.
    pub fn x(&self) -> &Array3<u8> {
        &self.x
    }

    /// Logical Z vectors, shape `(2, k, n)`.
    pub fn z(&self) -> &Array3<u8> {
        &self.z
    }

    pub fn num_logical(&self) -> usize {
        self.x.len_of(Axis(1))
    }

    /// The Pauli string of logical X number `index`.
    pub fn x_paulis(&self, index: usize) -> Vec<Pauli> {
        paulis(&self.x, index)
    }

    /// The Pauli string of logical Z number `index`.
    pub fn z_paulis(&self, index: usize) -> Vec<Pauli> {
        paulis(&self.z, index)
    }

    /// Circuit applying every logical X: for each logical index, X gates on
    /// its X-half support, then Z gates on its Z-half support.
    pub fn x_circuit(&self) -> Circuit {
        pauli_circuit(&self.x)
    }

    /// Same construction as [`x_circuit`](Self::x_circuit) for logical Z.
    pub fn z_circuit(&self) -> Circuit {
        pauli_circuit(&self.z)
    }
}

/// Moves standard-form column `c` back to physical qubit `column_order[c]`.
fn unpermute(vectors: &Array3<u8>, column_order: &[usize]) -> Array3<u8> {
    let mut out = Array3::<u8>::zeros(vectors.raw_dim());
    for (c, &physical) in column_order.iter().enumerate() {
        out.slice_mut(s![.., .., physical])
            .assign(&vectors.slice(s![.., .., c]));
    }
    out
}

fn paulis(vectors: &Array3<u8>, index: usize) -> Vec<Pauli> {
    let n = vectors.len_of(Axis(2));
    (0..n)
        .map(|j| {
            let x = vectors.get([0, index, j]).is_some_and(|&b| b == 1);
            let z = vectors.get([1, index, j]).is_some_and(|&b| b == 1);
            Pauli::from_bits(x, z)
        })
        .collect()
}

fn pauli_circuit(vectors: &Array3<u8>) -> Circuit {
    let n = vectors.len_of(Axis(2));
    let mut circuit = Circuit::with_width(n);
    for row in vectors.axis_iter(Axis(1)) {
        let halves: Array2<u8> = row.to_owned();
        for (half, gate) in [(0, Gate::X), (1, Gate::Z)] {
            for j in 0..n {
                if halves[[half, j]] == 1 {
                    circuit.add_operation(Operation::gate(gate, QubitId(j)));
                }
            }
        }
    }
    circuit
}
