//! Logical state preparation with a static verification-and-retry ladder.

use super::registers::{ClbitRole, QubitRole};
use super::{Emitter, LogicalProgramBuilder};
use crate::core::{ClbitId, LogicalError, QubitId};
use crate::operations::Operation;
use crate::substrate::Substrate;
use crate::vm::ClassicalExpr;
use tracing::info;

/// One reset + encode + parity-check attempt, resolved to concrete qubits.
struct EncodingAttempt {
    physical: Vec<QubitId>,
    operations: Vec<Operation>,
    verification: ClbitId,
    check_ancilla: QubitId,
}

impl EncodingAttempt {
    fn emit<S: Substrate>(&self, s: &mut S) -> Result<(), LogicalError> {
        for &q in &self.physical {
            s.reset(q)?;
        }
        s.apply_all(self.operations.iter().cloned())?;
        // The check ancilla is not reset here: a retry accumulates onto the
        // previous attempt's outcome, inverting the parity a failed check reads.
        s.measure(self.check_ancilla, self.verification)
    }
}

impl Emitter<'_> {
    /// Encodes logical qubit `q` into |0_L>, or |1_L> when `one` is set.
    ///
    /// The attempt is emitted once unconditionally and then
    /// `max_iterations - 1` more times, each inside a branch taken only
    /// when the verification bit reads 1.
    pub(crate) fn encode<S: Substrate>(
        &self,
        s: &mut S,
        q: usize,
        max_iterations: usize,
        one: bool,
    ) -> Result<(), LogicalError> {
        let physical = self.registers.qubits(q, QubitRole::Physical)?;
        let ancillas = self.registers.qubits(q, QubitRole::Ancilla)?;
        let check_ancilla = ancillas.get(0)?;
        let wires = physical.to_vec();

        let mut operations = self.code.encoding_circuit().on_wires(&wires)?;
        for &v in &self.config.verification_qubits {
            operations.push(Operation::cx(physical.get(v)?, check_ancilla));
        }
        let attempt = EncodingAttempt {
            physical: wires,
            operations,
            verification: self.registers.clbits(q, ClbitRole::EncodingVerification)?.get(0)?,
            check_ancilla,
        };

        attempt.emit(s)?;
        for _ in 1..max_iterations {
            s.if_then(ClassicalExpr::bit(attempt.verification), |s| attempt.emit(s))?;
        }
        s.reset(check_ancilla)?;

        if one {
            self.logical_x(s, q)?;
        }
        Ok(())
    }
}

impl<S: Substrate> LogicalProgramBuilder<S> {
    /// Prepares each listed logical qubit in the matching computational
    /// state (`0` or `1`).
    ///
    /// # Errors
    /// `LogicalError::InvalidInput` when the two slices differ in length, a
    /// state is not 0 or 1, `max_iterations` is 0, or a qubit does not
    /// exist. Validation happens before anything is emitted.
    pub fn encode(
        &mut self,
        qubits: &[usize],
        max_iterations: usize,
        initial_states: &[u8],
    ) -> Result<(), LogicalError> {
        if qubits.len() != initial_states.len() {
            return Err(LogicalError::InvalidInput {
                message: format!(
                    "encode got {} qubits but {} initial states",
                    qubits.len(),
                    initial_states.len()
                ),
            });
        }
        if let Some(state) = initial_states.iter().find(|&&st| st > 1) {
            return Err(LogicalError::InvalidInput {
                message: format!("Initial state {} is not 0 or 1", state),
            });
        }
        if max_iterations == 0 {
            return Err(LogicalError::InvalidInput {
                message: "max_iterations must be at least 1".to_string(),
            });
        }
        self.registers.check(qubits)?;

        info!(?qubits, ?initial_states, max_iterations, "emitting encoding");
        let (emitter, substrate) = self.split();
        for (&q, &state) in qubits.iter().zip(initial_states) {
            emitter.encode(substrate, q, max_iterations, state == 1)?;
        }
        Ok(())
    }
}
