// src/logical/mod.rs

//! Fault-tolerant logical qubits on top of a [`Substrate`].
//!
//! A [`LogicalProgramBuilder`] owns a substrate, a derived
//! [`StabilizerCode`] and the register table of every logical qubit it has
//! allocated. Its methods emit the encoding, QEC cycle, logical gates and
//! final measurement protocols into the substrate; nothing is executed
//! until the substrate's program is run.
//!
//! Emission logic lives on [`Emitter`], a borrowed view of the immutable
//! parts of the builder, so that conditional blocks (closures receiving
//! only `&mut S`) can keep emitting protocol steps.

mod config;
mod decoder;
mod encoder;
mod gates;
mod measure;
mod qec;
mod registers;
mod stabilizers;
mod syndrome;

pub use config::{HadamardMethod, LogicalConfig, QecCycleOptions};
pub use decoder::DecoderTable;
pub use registers::{ClbitRole, QubitRole, RegisterSizes, RegisterTable};
pub use stabilizers::StabilizerGroups;

use crate::circuits::Circuit;
use crate::code::StabilizerCode;
use crate::core::{ClbitSpan, CodeLabel, LogicalError, StabilizerTableau};
use crate::substrate::Substrate;
use std::ops::Range;
use tracing::debug;

/// Builds logical-qubit programs on a substrate `S`.
#[derive(Debug)]
pub struct LogicalProgramBuilder<S: Substrate> {
    substrate: S,
    code: StabilizerCode,
    config: LogicalConfig,
    groups: StabilizerGroups,
    registers: RegisterTable,
    sizes: RegisterSizes,
    output: ClbitSpan,
}

/// Read-only protocol context shared by the emission routines.
#[derive(Clone, Copy)]
pub(crate) struct Emitter<'a> {
    code: &'a StabilizerCode,
    config: &'a LogicalConfig,
    groups: &'a StabilizerGroups,
    registers: &'a RegisterTable,
}

impl<S: Substrate> LogicalProgramBuilder<S> {
    /// Derives the code from `tableau` and `label`, then allocates
    /// `n_logical` logical qubits and an `output` register with one bit per
    /// logical qubit.
    ///
    /// # Errors
    /// `LogicalError::Construction` when the label disagrees with the
    /// tableau, or when a configured verification or readout qubit lies
    /// outside the code block. The default configuration names qubits up
    /// to 6, so codes with fewer than 7 qubits need
    /// [`with_config`](Self::with_config).
    pub fn new(
        substrate: S,
        n_logical: usize,
        label: CodeLabel,
        tableau: StabilizerTableau,
    ) -> Result<Self, LogicalError> {
        Self::with_config(substrate, n_logical, label, tableau, LogicalConfig::default())
    }

    /// Like [`new`](Self::new) with explicit protocol settings.
    pub fn with_config(
        mut substrate: S,
        n_logical: usize,
        label: CodeLabel,
        tableau: StabilizerTableau,
        config: LogicalConfig,
    ) -> Result<Self, LogicalError> {
        let code = StabilizerCode::new(tableau, label)?;
        config.validate(code.num_qubits())?;
        let groups = StabilizerGroups::classify(code.tableau());
        let sizes = RegisterSizes::new(code.num_qubits(), code.num_stabilizers());
        debug!(
            code = %code.label(),
            x = ?groups.x_stabilizers,
            z = ?groups.z_stabilizers,
            flagged = ?groups.flagged_1,
            "classified stabilizers"
        );

        let mut registers = RegisterTable::new();
        registers.allocate(&mut substrate, &sizes, n_logical)?;
        let output = substrate.add_clbit_register("output", n_logical)?;

        Ok(Self {
            substrate,
            code,
            config,
            groups,
            registers,
            sizes,
            output,
        })
    }

    /// Not available: building a logical program from an arbitrary physical
    /// circuit.
    pub fn from_physical_circuit(
        _circuit: &Circuit,
        _label: CodeLabel,
        _tableau: StabilizerTableau,
    ) -> Result<Self, LogicalError> {
        Err(LogicalError::Unsupported {
            message: "Conversion from a physical circuit is not implemented".to_string(),
        })
    }

    /// Not available: QEC cycles use the fixed flagged/unflagged protocol.
    pub fn configure_qec_cycle(&mut self, _options: QecCycleOptions) -> Result<(), LogicalError> {
        Err(LogicalError::Unsupported {
            message: "QEC cycle configuration is not implemented".to_string(),
        })
    }

    /// Allocates `count` more logical qubits and returns their indices.
    /// They get no output bit; measure them into existing output bits.
    pub fn add_logical_qubits(&mut self, count: usize) -> Result<Range<usize>, LogicalError> {
        self.registers.allocate(&mut self.substrate, &self.sizes, count)
    }

    pub fn num_logical_qubits(&self) -> usize {
        self.registers.len()
    }

    pub fn code(&self) -> &StabilizerCode {
        &self.code
    }

    pub fn config(&self) -> &LogicalConfig {
        &self.config
    }

    pub fn groups(&self) -> &StabilizerGroups {
        &self.groups
    }

    pub fn registers(&self) -> &RegisterTable {
        &self.registers
    }

    /// The `output` register, one bit per initially requested logical qubit.
    pub fn output(&self) -> ClbitSpan {
        self.output
    }

    pub fn substrate(&self) -> &S {
        &self.substrate
    }

    /// Direct access for emitting physical-level instructions.
    pub fn substrate_mut(&mut self) -> &mut S {
        &mut self.substrate
    }

    pub fn into_substrate(self) -> S {
        self.substrate
    }

    /// Splits the builder into the emission context and the substrate.
    fn split(&mut self) -> (Emitter<'_>, &mut S) {
        (
            Emitter {
                code: &self.code,
                config: &self.config,
                groups: &self.groups,
                registers: &self.registers,
            },
            &mut self.substrate,
        )
    }
}

/// Resolves an empty selection to every allocated logical qubit.
fn selection(requested: &[usize], registers: &RegisterTable) -> Result<Vec<usize>, LogicalError> {
    if requested.is_empty() {
        Ok((0..registers.len()).collect())
    } else {
        registers.check(requested)?;
        Ok(requested.to_vec())
    }
}
