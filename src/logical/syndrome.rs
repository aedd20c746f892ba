//! Syndrome extraction through the shared ancilla register.

use super::registers::{ClbitRole, QubitRole};
use super::{Emitter, LogicalProgramBuilder, selection};
use crate::core::LogicalError;
use crate::operations::{Gate, Operation};
use crate::substrate::Substrate;
use crate::vm::ClassicalExpr;
use tracing::trace;

impl Emitter<'_> {
    /// Resets every ancilla of logical qubit `q`.
    pub(crate) fn reset_ancillas<S: Substrate>(&self, s: &mut S, q: usize) -> Result<(), LogicalError> {
        for anc in self.registers.qubits(q, QubitRole::Ancilla)?.to_vec() {
            s.reset(anc)?;
        }
        Ok(())
    }

    /// Couples each physical qubit of `q` to the ancilla of every selected
    /// stabilizer: ancilla `slot` accumulates stabilizer `indices[slot]`.
    ///
    /// The Pauli of the stabilizer at position p is conjugated by H and
    /// applied as a gate controlled by physical qubit p, so Z-type entries
    /// become CNOTs onto the ancilla and X-type entries become CZs; a Y also
    /// applies Z to the data qubit for its sign. Flag couplings CZ(a0, a1)
    /// before position n-2 and CZ(a0, a2) after position 0 are added when
    /// those ancillas exist.
    pub(crate) fn measure_stabilizers<S: Substrate>(
        &self,
        s: &mut S,
        q: usize,
        indices: &[usize],
    ) -> Result<(), LogicalError> {
        let physical = self.registers.qubits(q, QubitRole::Physical)?;
        let ancillas = self.registers.qubits(q, QubitRole::Ancilla)?;
        if indices.len() > ancillas.len() {
            return Err(LogicalError::InvalidInput {
                message: format!(
                    "Cannot measure {} stabilizers with {} ancillas",
                    indices.len(),
                    ancillas.len()
                ),
            });
        }
        let m = self.code.num_stabilizers();
        if let Some(bad) = indices.iter().find(|&&i| i >= m) {
            return Err(LogicalError::InvalidInput {
                message: format!("Stabilizer {} does not exist ({} generators)", bad, m),
            });
        }
        let tableau = self.code.tableau();
        let n = physical.len();

        for p in 0..n {
            let data = physical.get(p)?;
            if n >= 2 && p == n - 2 && ancillas.len() > 1 {
                s.apply(Operation::cz(ancillas.get(0)?, ancillas.get(1)?))?;
            }
            for (slot, &stabilizer) in indices.iter().enumerate() {
                let (conjugated, negated) = tableau.pauli(stabilizer, p).conjugate_by_hadamard();
                let Some(gate) = conjugated.gate() else {
                    continue;
                };
                s.apply(Operation::controlled(gate, data, ancillas.get(slot)?))?;
                if negated {
                    s.apply(Operation::gate(Gate::Z, data))?;
                }
            }
            if p == 0 && ancillas.len() > 2 {
                s.apply(Operation::cz(ancillas.get(0)?, ancillas.get(2)?))?;
            }
        }
        Ok(())
    }

    /// Measures `indices` and writes `current XOR previous` into the flagged
    /// or unflagged diff register, then resets the ancillas.
    pub(crate) fn measure_syndrome_diff<S: Substrate>(
        &self,
        s: &mut S,
        q: usize,
        indices: &[usize],
        flagged: bool,
    ) -> Result<(), LogicalError> {
        trace!(q, ?indices, flagged, "emitting syndrome diff");
        self.measure_stabilizers(s, q, indices)?;

        let ancillas = self.registers.qubits(q, QubitRole::Ancilla)?;
        let current = self.registers.clbits(q, ClbitRole::CurrentSyndrome)?;
        let previous = self.registers.clbits(q, ClbitRole::PreviousSyndrome)?;
        let diff_role = if flagged {
            ClbitRole::FlaggedDiff
        } else {
            ClbitRole::UnflaggedDiff
        };
        let diff = self.registers.clbits(q, diff_role)?;

        for slot in 0..ancillas.len() {
            s.measure(ancillas.get(slot)?, current.get(slot)?)?;
        }
        for (slot, &stabilizer) in indices.iter().enumerate() {
            let changed = ClassicalExpr::bit(current.get(slot)?)
                .xor(ClassicalExpr::bit(previous.get(stabilizer)?));
            s.assign_clbit(diff.get(stabilizer)?, changed)?;
        }
        self.reset_ancillas(s, q)
    }
}

impl<S: Substrate> LogicalProgramBuilder<S> {
    /// Resets the ancillas of the given logical qubits (all when empty).
    pub fn reset_ancillas(&mut self, qubits: &[usize]) -> Result<(), LogicalError> {
        let targets = selection(qubits, &self.registers)?;
        let (emitter, substrate) = self.split();
        for q in targets {
            emitter.reset_ancillas(substrate, q)?;
        }
        Ok(())
    }

    /// Emits the stabilizer-coupling circuit for `indices` on logical qubit `q`
    /// without measuring.
    pub fn measure_stabilizers(&mut self, q: usize, indices: &[usize]) -> Result<(), LogicalError> {
        self.registers.check(&[q])?;
        let (emitter, substrate) = self.split();
        emitter.measure_stabilizers(substrate, q, indices)
    }

    /// Emits one syndrome-difference extraction for `indices` on logical qubit `q`.
    pub fn measure_syndrome_diff(
        &mut self,
        q: usize,
        indices: &[usize],
        flagged: bool,
    ) -> Result<(), LogicalError> {
        self.registers.check(&[q])?;
        let (emitter, substrate) = self.split();
        emitter.measure_syndrome_diff(substrate, q, indices, flagged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CodeLabel, QubitId, StabilizerTableau};
    use crate::logical::LogicalConfig;
    use crate::vm::{Instruction, ProgramBuilder};

    #[test]
    fn test_y_entries_add_sign_correction() -> Result<(), LogicalError> {
        let tableau = StabilizerTableau::new(&["YYI", "ZZZ"])?;
        let config = LogicalConfig::default()
            .with_verification_qubits(vec![0])
            .with_readout_qubits(vec![0]);
        let mut logical = LogicalProgramBuilder::with_config(
            ProgramBuilder::new(),
            1,
            CodeLabel::new(3, 1, 1),
            tableau,
            config,
        )?;
        logical.measure_stabilizers(0, &[0])?;
        let program = logical.into_substrate().build()?;

        // qlog0 = q0..q2, qanc0 = q3
        let anc = QubitId(3);
        let expected = vec![
            Instruction::QuantumOp(Operation::controlled(Gate::Y, QubitId(0), anc)),
            Instruction::QuantumOp(Operation::gate(Gate::Z, QubitId(0))),
            Instruction::QuantumOp(Operation::controlled(Gate::Y, QubitId(1), anc)),
            Instruction::QuantumOp(Operation::gate(Gate::Z, QubitId(1))),
        ];
        assert_eq!(program.instructions(), expected.as_slice());
        Ok(())
    }
}
