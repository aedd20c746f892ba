//! The flagged/unflagged QEC cycle.

use super::registers::ClbitRole;
use super::{Emitter, LogicalProgramBuilder, selection};
use crate::core::LogicalError;
use crate::substrate::Substrate;
use crate::vm::ClassicalExpr;
use tracing::info;

impl Emitter<'_> {
    /// One QEC cycle on logical qubit `q`:
    ///
    /// 1. reset the ancillas;
    /// 2. flagged extraction over the first flagged group;
    /// 3. if no flag fired, flagged extraction over the second group;
    /// 4. if a flag fired, unflagged extraction over the X then Z generators,
    ///    decoding (unflagged X, unflagged Z, flagged X, flagged Z) and
    ///    folding the unflagged differences into the previous syndrome.
    pub(crate) fn perform_qec_cycle<S: Substrate>(&self, s: &mut S, q: usize) -> Result<(), LogicalError> {
        let groups = self.groups;
        self.reset_ancillas(s, q)?;
        self.measure_syndrome_diff(s, q, &groups.flagged_1, true)?;

        let flags = self.registers.clbits(q, ClbitRole::FlaggedDiff)?.to_vec();
        s.if_then(ClassicalExpr::is_zero(flags.clone()), |s| {
            self.measure_syndrome_diff(s, q, &groups.flagged_2, true)
        })?;

        s.if_then(ClassicalExpr::is_nonzero(flags), |s| {
            self.measure_syndrome_diff(s, q, &groups.x_stabilizers, false)?;
            self.measure_syndrome_diff(s, q, &groups.z_stabilizers, false)?;

            self.apply_decoding(s, q, &groups.x_stabilizers, false)?;
            self.apply_decoding(s, q, &groups.z_stabilizers, false)?;
            self.apply_decoding(s, q, &groups.x_stabilizers, true)?;
            self.apply_decoding(s, q, &groups.z_stabilizers, true)?;

            let unflagged = self.registers.clbits(q, ClbitRole::UnflaggedDiff)?;
            let previous = self.registers.clbits(q, ClbitRole::PreviousSyndrome)?;
            for index in 0..unflagged.len() {
                let prev_bit = previous.get(index)?;
                s.if_then(ClassicalExpr::bit(unflagged.get(index)?), |s| {
                    s.flip_clbit(prev_bit)
                })?;
            }
            Ok(())
        })
    }
}

impl<S: Substrate> LogicalProgramBuilder<S> {
    /// Emits one QEC cycle per listed logical qubit (all when empty), in order.
    pub fn perform_qec_cycle(&mut self, qubits: &[usize]) -> Result<(), LogicalError> {
        let targets = selection(qubits, &self.registers)?;
        info!(qubits = ?targets, "emitting QEC cycle");
        let (emitter, substrate) = self.split();
        for q in targets {
            emitter.perform_qec_cycle(substrate, q)?;
        }
        Ok(())
    }
}
