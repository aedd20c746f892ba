//! Per-logical-qubit register allocation.
//!
//! Every logical qubit owns seven-plus registers, named by role and logical
//! index (`qlog0`, `qanc0`, `cprev_syndrome0`, ...). The table maps
//! `(logical index, role)` to the arena span the substrate handed back.

use crate::core::{ClbitSpan, LogicalError, QubitSpan};
use crate::substrate::Substrate;
use std::collections::BTreeMap;
use std::ops::Range;
use tracing::debug;

/// Quantum register roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QubitRole {
    /// The n code qubits.
    Physical,
    /// Syndrome-extraction ancillas, `m / 2` of them.
    Ancilla,
    /// One helper qubit for the LCU Hadamard.
    LogicalOp,
}

impl QubitRole {
    pub const ALL: [QubitRole; 3] = [QubitRole::Physical, QubitRole::Ancilla, QubitRole::LogicalOp];

    pub fn prefix(&self) -> &'static str {
        match self {
            QubitRole::Physical => "qlog",
            QubitRole::Ancilla => "qanc",
            QubitRole::LogicalOp => "qlogical_op",
        }
    }

    fn size(&self, sizes: &RegisterSizes) -> usize {
        match self {
            QubitRole::Physical => sizes.n,
            QubitRole::Ancilla => sizes.ancillas,
            QubitRole::LogicalOp => 1,
        }
    }
}

/// Classical register roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClbitRole {
    /// One bit holding the encoding-verification outcome.
    EncodingVerification,
    /// One bit per ancilla.
    CurrentSyndrome,
    /// One bit per stabilizer: the last accepted syndrome.
    PreviousSyndrome,
    /// One bit per stabilizer, written by flagged extraction.
    FlaggedDiff,
    /// One bit per stabilizer, written by unflagged extraction.
    UnflaggedDiff,
    /// Bit 0 tracks X corrections, bit 1 tracks Z corrections.
    PauliFrame,
    /// One bit per physical qubit, the final readout.
    FinalMeasurement,
}

impl ClbitRole {
    pub const ALL: [ClbitRole; 7] = [
        ClbitRole::EncodingVerification,
        ClbitRole::CurrentSyndrome,
        ClbitRole::PreviousSyndrome,
        ClbitRole::FlaggedDiff,
        ClbitRole::UnflaggedDiff,
        ClbitRole::PauliFrame,
        ClbitRole::FinalMeasurement,
    ];

    pub fn prefix(&self) -> &'static str {
        match self {
            ClbitRole::EncodingVerification => "cenc_verif",
            ClbitRole::CurrentSyndrome => "ccurr_syndrome",
            ClbitRole::PreviousSyndrome => "cprev_syndrome",
            ClbitRole::FlaggedDiff => "cflagged_syndrome_diff",
            ClbitRole::UnflaggedDiff => "cunflagged_syndrome_diff",
            ClbitRole::PauliFrame => "cpauli_frame",
            ClbitRole::FinalMeasurement => "cfinal_meas",
        }
    }

    fn size(&self, sizes: &RegisterSizes) -> usize {
        match self {
            ClbitRole::EncodingVerification => 1,
            ClbitRole::CurrentSyndrome => sizes.ancillas,
            ClbitRole::PreviousSyndrome | ClbitRole::FlaggedDiff | ClbitRole::UnflaggedDiff => sizes.m,
            ClbitRole::PauliFrame => 2,
            ClbitRole::FinalMeasurement => sizes.n,
        }
    }
}

/// Register dimensions derived from the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterSizes {
    /// Physical qubits per block.
    pub n: usize,
    /// Stabilizer generators.
    pub m: usize,
    /// Ancillas per block.
    pub ancillas: usize,
}

impl RegisterSizes {
    /// Sizes for an `n`-qubit code with `m` generators: `m / 2` ancillas.
    pub fn new(n: usize, m: usize) -> Self {
        Self { n, m, ancillas: m / 2 }
    }
}

/// Role table for all logical qubits allocated so far. Append-only.
#[derive(Debug, Clone, Default)]
pub struct RegisterTable {
    qubits: BTreeMap<(usize, QubitRole), QubitSpan>,
    clbits: BTreeMap<(usize, ClbitRole), ClbitSpan>,
    count: usize,
}

impl RegisterTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of logical qubits allocated.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Allocates all registers for `count` new logical qubits, continuing the
    /// index sequence, and returns the new indices.
    pub fn allocate<S: Substrate>(
        &mut self,
        substrate: &mut S,
        sizes: &RegisterSizes,
        count: usize,
    ) -> Result<Range<usize>, LogicalError> {
        let first = self.count;
        for index in first..first + count {
            for role in QubitRole::ALL {
                let name = format!("{}{}", role.prefix(), index);
                let span = substrate.add_qubit_register(&name, role.size(sizes))?;
                self.qubits.insert((index, role), span);
            }
            for role in ClbitRole::ALL {
                let name = format!("{}{}", role.prefix(), index);
                let span = substrate.add_clbit_register(&name, role.size(sizes))?;
                self.clbits.insert((index, role), span);
            }
            self.count += 1;
        }
        debug!(first, count, ?sizes, "allocated logical qubit registers");
        Ok(first..first + count)
    }

    /// The qubit register with `role` of logical qubit `index`.
    ///
    /// # Errors
    /// `LogicalError::InvalidInput` for an unknown logical qubit.
    pub fn qubits(&self, index: usize, role: QubitRole) -> Result<QubitSpan, LogicalError> {
        self.qubits
            .get(&(index, role))
            .copied()
            .ok_or_else(|| unknown_qubit(index, self.count))
    }

    /// The classical register with `role` of logical qubit `index`.
    pub fn clbits(&self, index: usize, role: ClbitRole) -> Result<ClbitSpan, LogicalError> {
        self.clbits
            .get(&(index, role))
            .copied()
            .ok_or_else(|| unknown_qubit(index, self.count))
    }

    /// Checks that every index names an allocated logical qubit.
    pub fn check(&self, indices: &[usize]) -> Result<(), LogicalError> {
        match indices.iter().find(|&&i| i >= self.count) {
            Some(&i) => Err(unknown_qubit(i, self.count)),
            None => Ok(()),
        }
    }
}

fn unknown_qubit(index: usize, count: usize) -> LogicalError {
    LogicalError::InvalidInput {
        message: format!(
            "Logical qubit {} does not exist ({} allocated)",
            index, count
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vm::ProgramBuilder;

    #[test]
    fn test_allocation_layout() -> Result<(), LogicalError> {
        let mut builder = ProgramBuilder::new();
        let mut table = RegisterTable::new();
        let sizes = RegisterSizes::new(7, 6);
        assert_eq!(table.allocate(&mut builder, &sizes, 2)?, 0..2);
        assert_eq!(table.allocate(&mut builder, &sizes, 1)?, 2..3);
        assert_eq!(table.len(), 3);

        assert_eq!(table.qubits(0, QubitRole::Physical)?.len(), 7);
        assert_eq!(table.qubits(0, QubitRole::Ancilla)?.len(), 3);
        assert_eq!(table.qubits(1, QubitRole::Physical)?.start(), 11);
        assert_eq!(table.clbits(2, ClbitRole::PreviousSyndrome)?.len(), 6);
        assert_eq!(table.clbits(2, ClbitRole::CurrentSyndrome)?.len(), 3);
        assert!(matches!(
            table.qubits(3, QubitRole::Physical),
            Err(LogicalError::InvalidInput { .. })
        ));

        let program = builder.build()?;
        assert_eq!(program.num_qubits(), 33);
        assert!(program.clbit_register("cpauli_frame1").is_some());
        assert!(program.qubit_register("qlogical_op2").is_some());
        Ok(())
    }
}
