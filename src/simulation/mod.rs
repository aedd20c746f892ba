// src/simulation/mod.rs

//! Dense state-vector simulation.
//!
//! [`Simulator`] runs a unitary [`Circuit`] and hands back the final
//! [`StateVector`]; the VM drives the same internal engine for programs
//! with measurement, reset and branching.

mod results;
mod state;
pub(crate) mod engine;

pub use results::ExecutionResult;
pub use state::{MAX_QUBITS, StateVector};

use crate::circuits::Circuit;
use crate::core::LogicalError;
use engine::StateVectorEngine;

/// Runs unitary circuits from `|0…0>`.
#[derive(Debug, Default)]
pub struct Simulator {}

impl Simulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates `circuit` on `circuit.width()` qubits.
    pub fn run(&self, circuit: &Circuit) -> Result<StateVector, LogicalError> {
        self.run_with_width(circuit, circuit.width())
    }

    /// Simulates `circuit` on `width` qubits, which must cover its wires.
    pub fn run_with_width(&self, circuit: &Circuit, width: usize) -> Result<StateVector, LogicalError> {
        if width < circuit.width() {
            return Err(LogicalError::ReferenceViolation {
                message: format!("Circuit spans {} wires, simulation has {}", circuit.width(), width),
            });
        }
        let mut engine = StateVectorEngine::init(width)?;
        for op in circuit.operations() {
            engine.apply_operation(op)?;
        }
        Ok(engine.into_state())
    }
}
