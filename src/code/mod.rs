// src/code/mod.rs

//! Code generation: from a stabilizer tableau to the circuits a logical
//! qubit needs.
//!
//! [`StabilizerCode::new`] performs the whole derivation once. The tableau
//! is turned into a [`GeneratorMatrix`], reduced to standard form, and the
//! logical operators, encoding circuit and logical gate circuits are read
//! off the reduced blocks. Everything is immutable afterwards and shared by
//! every logical qubit of a program.

pub mod codes;
mod encoding;
mod generator;
pub mod gf2;
mod operators;

pub use encoding::encoding_circuit;
pub use generator::GeneratorMatrix;
pub use operators::LogicalOperators;

use crate::circuits::Circuit;
use crate::core::{CodeLabel, LogicalError, QubitId, StabilizerTableau};
use crate::operations::{Gate, Operation};
use tracing::debug;

/// A stabilizer code together with everything derived from it.
#[derive(Debug, Clone)]
pub struct StabilizerCode {
    tableau: StabilizerTableau,
    label: CodeLabel,
    standard_form: GeneratorMatrix,
    rank: usize,
    column_order: Vec<usize>,
    logicals: LogicalOperators,
    encoding: Circuit,
    logical_x: Circuit,
    logical_z: Circuit,
    logical_y: Circuit,
    logical_h: Circuit,
}

impl StabilizerCode {
    /// Derives the code for `tableau` with label `label`.
    ///
    /// # Errors
    /// `LogicalError::Construction` when `label.n` differs from the tableau
    /// width or `label.k` differs from `n - m`.
    pub fn new(tableau: StabilizerTableau, label: CodeLabel) -> Result<Self, LogicalError> {
        let n = tableau.num_qubits();
        let m = tableau.num_stabilizers();
        if label.n != n {
            return Err(LogicalError::Construction {
                message: format!(
                    "Code label {} expects {} physical qubits but the tableau acts on {}",
                    label, label.n, n
                ),
            });
        }
        if m > n || label.k != n - m {
            return Err(LogicalError::Construction {
                message: format!(
                    "Code label {} is inconsistent with {} generators on {} qubits (k must equal n - m)",
                    label, m, n
                ),
            });
        }

        let mut standard_form = GeneratorMatrix::from_tableau(&tableau);
        let (rank, column_order) = standard_form.standard_form()?;
        let logicals = LogicalOperators::derive(&standard_form, rank, label.k, &column_order)?;
        let encoding = encoding_circuit(&standard_form, rank, &logicals, &column_order)?;

        let logical_x = logicals.x_circuit();
        let logical_z = logicals.z_circuit();
        let logical_y = logical_z.compose(&logical_x);
        let logical_h = lcu_hadamard(&logical_x, &logical_z, n);

        debug!(
            code = %label,
            rank,
            ?column_order,
            encoding_ops = encoding.len(),
            "derived stabilizer code"
        );

        Ok(Self {
            tableau,
            label,
            standard_form,
            rank,
            column_order,
            logicals,
            encoding,
            logical_x,
            logical_z,
            logical_y,
            logical_h,
        })
    }

    pub fn tableau(&self) -> &StabilizerTableau {
        &self.tableau
    }

    pub fn label(&self) -> CodeLabel {
        self.label
    }

    /// Physical qubits per logical qubit.
    pub fn num_qubits(&self) -> usize {
        self.label.n
    }

    pub fn num_stabilizers(&self) -> usize {
        self.tableau.num_stabilizers()
    }

    /// Rank r of the reduced X-part.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// `column_order[c]` is the physical qubit held in standard-form column `c`.
    pub fn column_order(&self) -> &[usize] {
        &self.column_order
    }

    /// The generator matrix in standard form (columns permuted by `column_order`).
    pub fn standard_form(&self) -> &GeneratorMatrix {
        &self.standard_form
    }

    pub fn logicals(&self) -> &LogicalOperators {
        &self.logicals
    }

    pub fn encoding_circuit(&self) -> &Circuit {
        &self.encoding
    }

    pub fn logical_x_circuit(&self) -> &Circuit {
        &self.logical_x
    }

    pub fn logical_z_circuit(&self) -> &Circuit {
        &self.logical_z
    }

    /// The Z circuit followed by the X circuit.
    pub fn logical_y_circuit(&self) -> &Circuit {
        &self.logical_y
    }

    /// Linear-combination-of-unitaries Hadamard on `n + 1` wires; wire `n`
    /// is the helper qubit.
    pub fn logical_h_circuit(&self) -> &Circuit {
        &self.logical_h
    }
}

/// `H(a) · C_a(X_L) · X(a) · C_a(Z_L) · X(a) · H(a)` with the helper `a` on wire `n`.
fn lcu_hadamard(logical_x: &Circuit, logical_z: &Circuit, n: usize) -> Circuit {
    let helper = QubitId(n);
    let mut circuit = Circuit::with_width(n + 1);
    circuit.add_operation(Operation::gate(Gate::H, helper));
    circuit.add_operations(logical_x.controlled_by(&[helper]).operations().iter().cloned());
    circuit.add_operation(Operation::gate(Gate::X, helper));
    circuit.add_operations(logical_z.controlled_by(&[helper]).operations().iter().cloned());
    circuit.add_operation(Operation::gate(Gate::X, helper));
    circuit.add_operation(Operation::gate(Gate::H, helper));
    circuit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Pauli;

    fn steane() -> Result<StabilizerCode, LogicalError> {
        let (tableau, label) = codes::steane()?;
        StabilizerCode::new(tableau, label)
    }

    #[test]
    fn test_steane_logicals() -> Result<(), LogicalError> {
        let code = steane()?;
        assert_eq!(code.rank(), 3);
        use Pauli::{I, X, Z};
        assert_eq!(code.logicals().x_paulis(0), vec![I, I, I, I, X, X, X]);
        assert_eq!(code.logicals().z_paulis(0), vec![I, Z, Z, I, I, I, Z]);
        assert_eq!(code.logical_x_circuit().count_gate(Gate::X), 3);
        assert_eq!(code.logical_z_circuit().count_gate(Gate::Z), 3);
        Ok(())
    }

    #[test]
    fn test_lcu_hadamard_shape() -> Result<(), LogicalError> {
        let code = steane()?;
        let h = code.logical_h_circuit();
        assert_eq!(h.width(), 8);
        // 4 helper gates plus one controlled gate per logical X/Z term
        assert_eq!(h.len(), 4 + 3 + 3);
        assert!(
            h.operations()
                .iter()
                .filter(|op| matches!(op, Operation::Controlled { .. }))
                .all(|op| op.involved_qubits()[0] == QubitId(7))
        );
        Ok(())
    }

    #[test]
    fn test_label_mismatch_is_construction_error() -> Result<(), LogicalError> {
        let (tableau, _) = codes::steane()?;
        assert!(matches!(
            StabilizerCode::new(tableau.clone(), CodeLabel::new(9, 1, 3)),
            Err(LogicalError::Construction { .. })
        ));
        assert!(matches!(
            StabilizerCode::new(tableau, CodeLabel::new(7, 2, 3)),
            Err(LogicalError::Construction { .. })
        ));
        Ok(())
    }
}
