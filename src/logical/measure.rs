//! Final measurement with syndrome recomputation and frame correction.

use super::registers::{ClbitRole, QubitRole};
use super::{Emitter, LogicalProgramBuilder};
use crate::core::{ClbitId, LogicalError};
use crate::substrate::Substrate;
use crate::vm::ClassicalExpr;
use tracing::info;

impl Emitter<'_> {
    /// Reads logical qubit `q` into `out`.
    ///
    /// Every physical qubit is measured; the readout parity goes to `out`.
    /// The Z-type syndrome is recomputed from the measured bits and diffed
    /// against the previous syndrome, the Z generators are decoded once more,
    /// and `out` is flipped when the Z frame bit is set.
    pub(crate) fn measure_logical<S: Substrate>(
        &self,
        s: &mut S,
        q: usize,
        out: ClbitId,
    ) -> Result<(), LogicalError> {
        let physical = self.registers.qubits(q, QubitRole::Physical)?;
        let final_bits = self.registers.clbits(q, ClbitRole::FinalMeasurement)?;
        for p in 0..physical.len() {
            s.measure(physical.get(p)?, final_bits.get(p)?)?;
        }

        let readout = final_bits.select(&self.config.readout_qubits)?;
        s.assign_clbit(out, ClassicalExpr::xor_all(&readout))?;

        let z_stabilizers = &self.groups.z_stabilizers;
        let current = self.registers.clbits(q, ClbitRole::CurrentSyndrome)?;
        if z_stabilizers.len() > current.len() {
            return Err(LogicalError::InvalidInput {
                message: format!(
                    "{} Z generators do not fit {} syndrome bits",
                    z_stabilizers.len(),
                    current.len()
                ),
            });
        }
        let previous = self.registers.clbits(q, ClbitRole::PreviousSyndrome)?;
        let unflagged = self.registers.clbits(q, ClbitRole::UnflaggedDiff)?;
        let tableau = self.code.tableau();

        for (slot, &stabilizer) in z_stabilizers.iter().enumerate() {
            let support: Vec<usize> = (0..physical.len())
                .filter(|&p| tableau.pauli(stabilizer, p).has_z())
                .collect();
            let parity = ClassicalExpr::xor_all(&final_bits.select(&support)?);
            s.assign_clbit(current.get(slot)?, parity)?;
        }
        for (slot, &stabilizer) in z_stabilizers.iter().enumerate() {
            let changed = ClassicalExpr::bit(current.get(slot)?)
                .xor(ClassicalExpr::bit(previous.get(stabilizer)?));
            s.assign_clbit(unflagged.get(stabilizer)?, changed)?;
        }

        self.apply_decoding(s, q, z_stabilizers, false)?;

        let z_frame = self.registers.clbits(q, ClbitRole::PauliFrame)?.get(1)?;
        s.if_then(ClassicalExpr::bit(z_frame), |s| s.flip_clbit(out))
    }
}

impl<S: Substrate> LogicalProgramBuilder<S> {
    /// Measures `qubits[i]` into output bit `output_bits[i]`.
    ///
    /// # Errors
    /// `LogicalError::InvalidInput` on a length mismatch or an unknown
    /// logical qubit, `LogicalError::ReferenceViolation` for an output bit
    /// outside the output register. Checked before anything is emitted.
    pub fn measure(&mut self, qubits: &[usize], output_bits: &[usize]) -> Result<(), LogicalError> {
        if qubits.len() != output_bits.len() {
            return Err(LogicalError::InvalidInput {
                message: format!(
                    "measure got {} qubits but {} output bits",
                    qubits.len(),
                    output_bits.len()
                ),
            });
        }
        self.registers.check(qubits)?;
        let outputs = self.output.select(output_bits)?;

        info!(?qubits, ?output_bits, "emitting final measurement");
        let (emitter, substrate) = self.split();
        for (&q, out) in qubits.iter().zip(outputs) {
            emitter.measure_logical(substrate, q, out)?;
        }
        Ok(())
    }
}
