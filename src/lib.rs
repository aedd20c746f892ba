// src/lib.rs

//! `logiq` - fault-tolerant logical qubits from stabilizer codes
//!
//! Given a stabilizer tableau, the crate derives the code's standard form,
//! logical operators and encoding circuit ([`code`]), and emits logical-qubit
//! programs ([`logical`]) covering encoding with verification, flagged QEC
//! cycles with lookup decoding into a Pauli frame, logical gates and
//! corrected final measurement. Programs are recorded through the
//! [`Substrate`] trait; the bundled [`ProgramBuilder`] and [`QuantumVm`]
//! record and execute them on a dense state-vector simulator.

pub mod circuits;
pub mod code;
pub mod core;
pub mod logical;
pub mod operations;
pub mod simulation;
pub mod substrate;
pub mod validation;
pub mod vm;

pub use circuits::{Circuit, CircuitBuilder};
pub use code::{StabilizerCode, codes};
pub use crate::core::{ClbitId, CodeLabel, LogicalError, Pauli, QubitId, StabilizerTableau};
pub use logical::{DecoderTable, LogicalConfig, LogicalProgramBuilder};
pub use operations::{Gate, Operation};
pub use simulation::{ExecutionResult, Simulator, StateVector};
pub use substrate::{LiteralWrite, Substrate};
pub use validation::{check_logical_operators, check_stabilizers_commute};
pub use vm::{ClassicalExpr, Instruction, Program, ProgramBuilder, QuantumVm};

// Example 1: Encode and read back a Steane logical qubit
// The output register holds the corrected logical readout.
/// ```
/// use logiq::{codes, LogicalError, LogicalProgramBuilder, ProgramBuilder, QuantumVm};
///
/// # fn main() -> Result<(), LogicalError> {
/// let (tableau, label) = codes::steane()?;
/// let mut logical = LogicalProgramBuilder::new(ProgramBuilder::new(), 1, label, tableau)?;
/// logical.encode(&[0], 1, &[1])?;
/// logical.measure(&[0], &[0])?;
///
/// let program = logical.into_substrate().build()?;
/// let result = QuantumVm::new().run(&program)?;
/// assert_eq!(result.register_value("output"), Some(1));
/// # Ok(())
/// # }
/// ```
#[doc(hidden)]
const _: () = ();

// Example 2: A single bit-flip is caught by the QEC cycle
// The error is not undone physically; the Pauli frame records it and the
// final measurement corrects the readout.
/// ```
/// use logiq::{codes, LogicalError, LogicalProgramBuilder, Pauli, ProgramBuilder, QuantumVm};
///
/// # fn main() -> Result<(), LogicalError> {
/// let (tableau, label) = codes::steane()?;
/// let mut logical = LogicalProgramBuilder::new(ProgramBuilder::new(), 1, label, tableau)?;
/// logical.encode(&[0], 1, &[0])?;
/// logical.inject_error(0, 4, Pauli::X)?;
/// logical.perform_qec_cycle(&[0])?;
/// logical.measure(&[0], &[0])?;
///
/// let program = logical.into_substrate().build()?;
/// let result = QuantumVm::new().run(&program)?;
/// assert_eq!(result.register("cpauli_frame0"), Some(vec![false, true]));
/// assert_eq!(result.register_value("output"), Some(0));
/// # Ok(())
/// # }
/// ```
#[doc(hidden)]
const _: () = ();
