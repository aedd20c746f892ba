//! The logical gate library.

use super::registers::QubitRole;
use super::{Emitter, HadamardMethod, LogicalProgramBuilder};
use crate::circuits::Circuit;
use crate::core::{LogicalError, Pauli, QubitId};
use crate::operations::{Gate, Operation};
use crate::substrate::Substrate;
use std::collections::BTreeSet;
use tracing::debug;

impl Emitter<'_> {
    fn place<S: Substrate>(&self, s: &mut S, q: usize, circuit: &Circuit) -> Result<(), LogicalError> {
        let wires = self.registers.qubits(q, QubitRole::Physical)?.to_vec();
        s.apply_all(circuit.on_wires(&wires)?)
    }

    /// Places `circuit` on block `q`, each operation additionally controlled
    /// by `controls` (arena qubits outside the block).
    fn place_controlled<S: Substrate>(
        &self,
        s: &mut S,
        q: usize,
        circuit: &Circuit,
        controls: &[QubitId],
    ) -> Result<(), LogicalError> {
        let wires = self.registers.qubits(q, QubitRole::Physical)?.to_vec();
        let placed = circuit.on_wires(&wires)?;
        s.apply_all(placed.iter().map(|op| op.with_controls(controls)))
    }

    pub(crate) fn logical_x<S: Substrate>(&self, s: &mut S, q: usize) -> Result<(), LogicalError> {
        self.place(s, q, self.code.logical_x_circuit())
    }

    pub(crate) fn logical_z<S: Substrate>(&self, s: &mut S, q: usize) -> Result<(), LogicalError> {
        self.place(s, q, self.code.logical_z_circuit())
    }

    /// Physical block followed by the helper qubit, then a helper reset.
    pub(crate) fn logical_h_lcu<S: Substrate>(&self, s: &mut S, q: usize) -> Result<(), LogicalError> {
        let mut wires = self.registers.qubits(q, QubitRole::Physical)?.to_vec();
        let helper = self.registers.qubits(q, QubitRole::LogicalOp)?.get(0)?;
        wires.push(helper);
        s.apply_all(self.code.logical_h_circuit().on_wires(&wires)?)?;
        s.reset(helper)
    }
}

impl<S: Substrate> LogicalProgramBuilder<S> {
    /// Logical X on each target.
    pub fn x(&mut self, targets: &[usize]) -> Result<(), LogicalError> {
        self.registers.check(targets)?;
        let (emitter, substrate) = self.split();
        for &q in targets {
            emitter.logical_x(substrate, q)?;
        }
        Ok(())
    }

    /// Logical Z on each target.
    pub fn z(&mut self, targets: &[usize]) -> Result<(), LogicalError> {
        self.registers.check(targets)?;
        let (emitter, substrate) = self.split();
        for &q in targets {
            emitter.logical_z(substrate, q)?;
        }
        Ok(())
    }

    /// Logical Y: the Z circuit, then the X circuit, on each target.
    pub fn y(&mut self, targets: &[usize]) -> Result<(), LogicalError> {
        self.registers.check(targets)?;
        let (emitter, substrate) = self.split();
        for &q in targets {
            emitter.place(substrate, q, emitter.code.logical_y_circuit())?;
        }
        Ok(())
    }

    /// Logical Hadamard with the configured method.
    pub fn h(&mut self, targets: &[usize]) -> Result<(), LogicalError> {
        let method = self.config.hadamard;
        self.h_with(targets, method)
    }

    /// Logical Hadamard with a method given by name (`"LCU"`).
    ///
    /// # Errors
    /// `LogicalError::Unsupported` for unknown method names.
    pub fn h_with_method(&mut self, targets: &[usize], method: &str) -> Result<(), LogicalError> {
        let method: HadamardMethod = method.parse()?;
        self.h_with(targets, method)
    }

    fn h_with(&mut self, targets: &[usize], method: HadamardMethod) -> Result<(), LogicalError> {
        self.registers.check(targets)?;
        let (emitter, substrate) = self.split();
        match method {
            HadamardMethod::Lcu => {
                for &q in targets {
                    emitter.logical_h_lcu(substrate, q)?;
                }
            }
        }
        Ok(())
    }

    /// Logical S, applied as a transversal S† on every physical qubit.
    pub fn s(&mut self, targets: &[usize]) -> Result<(), LogicalError> {
        self.registers.check(targets)?;
        for &q in targets {
            for qubit in self.registers.qubits(q, QubitRole::Physical)?.to_vec() {
                self.substrate.apply(Operation::gate(Gate::Sdg, qubit))?;
            }
        }
        Ok(())
    }

    /// [`mcmt`](Self::mcmt) with a single control block: each target's
    /// logical-X circuit fires only when all physical qubits of `control`
    /// read 1. This is a physical-level control pattern, not a logical CNOT
    /// on superposed code states.
    pub fn cx(&mut self, control: usize, targets: &[usize]) -> Result<(), LogicalError> {
        self.mcmt(&[control], targets)
    }

    /// Multi-controlled multi-target X: every physical qubit of every
    /// control block conditions each gate of the logical-X circuit of each
    /// target, so the targets flip only on the all-ones control pattern.
    ///
    /// # Errors
    /// `LogicalError::InvalidInput` if either list is empty or they share a
    /// logical qubit; nothing is emitted in that case.
    pub fn mcmt(&mut self, controls: &[usize], targets: &[usize]) -> Result<(), LogicalError> {
        if controls.is_empty() || targets.is_empty() {
            return Err(LogicalError::InvalidInput {
                message: "mcmt needs at least one control and one target".to_string(),
            });
        }
        let control_set: BTreeSet<usize> = controls.iter().copied().collect();
        let overlap: Vec<usize> = targets.iter().copied().filter(|t| control_set.contains(t)).collect();
        if !overlap.is_empty() {
            return Err(LogicalError::InvalidInput {
                message: format!("Logical qubits {:?} are both control and target", overlap),
            });
        }
        self.registers.check(controls)?;
        self.registers.check(targets)?;

        let mut control_wires: Vec<QubitId> = Vec::new();
        for &c in controls {
            control_wires.extend(self.registers.qubits(c, QubitRole::Physical)?.to_vec());
        }
        debug!(?controls, ?targets, control_wires = control_wires.len(), "emitting mcmt");
        let (emitter, substrate) = self.split();
        for &t in targets {
            emitter.place_controlled(substrate, t, emitter.code.logical_x_circuit(), &control_wires)?;
        }
        Ok(())
    }

    /// Applies a physical Pauli error to one qubit of a logical block.
    pub fn inject_error(&mut self, q: usize, physical: usize, pauli: Pauli) -> Result<(), LogicalError> {
        self.registers.check(&[q])?;
        let qubit = self.registers.qubits(q, QubitRole::Physical)?.get(physical)?;
        if let Some(gate) = pauli.gate() {
            self.substrate.apply(Operation::gate(gate, qubit))?;
        }
        Ok(())
    }
}
