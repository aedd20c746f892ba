//! Encoding circuit for a code in standard form.

use super::generator::GeneratorMatrix;
use super::operators::LogicalOperators;
use crate::circuits::Circuit;
use crate::core::{LogicalError, QubitId};
use crate::operations::{Gate, Operation};

/// Builds the circuit that maps `|0…0>` (with the logical input on the
/// last k wires) onto the code space.
///
/// Two passes, both in standard-form columns mapped to physical qubits:
///
/// 1. for each logical i and column j in `[r, n-k)` where logical X number i
///    has an X there, CNOT from wire `n-k+i` to wire j;
/// 2. for each pivot row i < r: H on wire i (followed by S when the row
///    also has Z on its own pivot), then for every other column j,
///    CNOT(i → j) if the row has X at j and CZ(i → j) if it has Z at j
///    (both, in that order, for Y).
///
/// For CSS codes the result is exactly the +1 eigenspace of every generator.
pub fn encoding_circuit(
    standard_form: &GeneratorMatrix,
    r: usize,
    logicals: &LogicalOperators,
    column_order: &[usize],
) -> Result<Circuit, LogicalError> {
    let n = standard_form.num_cols();
    let k = logicals.num_logical();
    if column_order.len() != n || k > n || r > n - k {
        return Err(LogicalError::Construction {
            message: format!(
                "Encoding circuit needs a column order of length {} (got {}) and r + k <= n",
                n,
                column_order.len()
            ),
        });
    }
    let wire = |c: usize| QubitId(column_order[c]);
    let mut circuit = Circuit::with_width(n);

    let logical_x = logicals.x();
    for i in 0..k {
        let control = wire(n - k + i);
        for j in r..n - k {
            if logical_x[[0, i, column_order[j]]] == 1 {
                circuit.add_operation(Operation::cx(control, wire(j)));
            }
        }
    }

    for i in 0..r {
        let control = wire(i);
        circuit.add_operation(Operation::gate(Gate::H, control));
        if standard_form.get(1, i, i) == 1 {
            circuit.add_operation(Operation::gate(Gate::S, control));
        }
        for j in (0..n).filter(|&j| j != i) {
            if standard_form.get(0, i, j) == 1 {
                circuit.add_operation(Operation::cx(control, wire(j)));
            }
            if standard_form.get(1, i, j) == 1 {
                circuit.add_operation(Operation::cz(control, wire(j)));
            }
        }
    }
    Ok(circuit)
}
