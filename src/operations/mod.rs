// src/operations/mod.rs

//! Gates and the operations that apply them.
//!
//! Every unitary emitted by this crate is a single-qubit gate from [`Gate`],
//! optionally conditioned on any number of control qubits. Two-qubit gates
//! such as CNOT and CZ are controlled X and controlled Z.

use crate::core::{LogicalError, QubitId};
use num_complex::Complex;
use num_traits::{One, Zero};
use std::f64::consts::FRAC_1_SQRT_2;

/// The single-qubit gate set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gate {
    /// Pauli X (bit flip)
    X,
    /// Pauli Y
    Y,
    /// Pauli Z (phase flip)
    Z,
    /// Hadamard
    H,
    /// Phase gate, diag(1, i)
    S,
    /// Inverse phase gate, diag(1, -i)
    Sdg,
}

impl Gate {
    /// The 2x2 unitary in the computational basis.
    pub fn matrix(&self) -> [[Complex<f64>; 2]; 2] {
        let one = Complex::one();
        let zero = Complex::zero();
        let i = Complex::i();
        let h = Complex::new(FRAC_1_SQRT_2, 0.0);
        match self {
            Gate::X => [[zero, one], [one, zero]],
            Gate::Y => [[zero, -i], [i, zero]],
            Gate::Z => [[one, zero], [zero, -one]],
            Gate::H => [[h, h], [h, -h]],
            Gate::S => [[one, zero], [zero, i]],
            Gate::Sdg => [[one, zero], [zero, -i]],
        }
    }

    /// Short label used by circuit diagrams and program listings.
    pub fn symbol(&self) -> &'static str {
        match self {
            Gate::X => "X",
            Gate::Y => "Y",
            Gate::Z => "Z",
            Gate::H => "H",
            Gate::S => "S",
            Gate::Sdg => "S†",
        }
    }

    pub fn inverse(&self) -> Gate {
        match self {
            Gate::S => Gate::Sdg,
            Gate::Sdg => Gate::S,
            other => *other,
        }
    }
}

/// A unitary step of a circuit or program.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Apply `gate` to `target`.
    Gate {
        gate: Gate,
        target: QubitId,
    },

    /// Apply `gate` to `target` when every qubit in `controls` is |1>.
    /// Control qubits must be distinct from each other and from the target.
    Controlled {
        gate: Gate,
        controls: Vec<QubitId>,
        target: QubitId,
    },
}

impl Operation {
    pub fn gate(gate: Gate, target: QubitId) -> Self {
        Operation::Gate { gate, target }
    }

    /// Singly-controlled gate; `cx` and `cz` are the common cases.
    pub fn controlled(gate: Gate, control: QubitId, target: QubitId) -> Self {
        Operation::Controlled {
            gate,
            controls: vec![control],
            target,
        }
    }

    pub fn cx(control: QubitId, target: QubitId) -> Self {
        Self::controlled(Gate::X, control, target)
    }

    pub fn cz(control: QubitId, target: QubitId) -> Self {
        Self::controlled(Gate::Z, control, target)
    }

    /// Returns every qubit the operation touches, controls first.
    pub fn involved_qubits(&self) -> Vec<QubitId> {
        match self {
            Operation::Gate { target, .. } => vec![*target],
            Operation::Controlled {
                controls, target, ..
            } => {
                let mut qubits = controls.clone();
                qubits.push(*target);
                qubits
            }
        }
    }

    pub fn target(&self) -> QubitId {
        match self {
            Operation::Gate { target, .. } | Operation::Controlled { target, .. } => *target,
        }
    }

    pub fn applied_gate(&self) -> Gate {
        match self {
            Operation::Gate { gate, .. } | Operation::Controlled { gate, .. } => *gate,
        }
    }

    /// The same operation, additionally conditioned on `extra` controls.
    pub fn with_controls(&self, extra: &[QubitId]) -> Operation {
        if extra.is_empty() {
            return self.clone();
        }
        match self {
            Operation::Gate { gate, target } => Operation::Controlled {
                gate: *gate,
                controls: extra.to_vec(),
                target: *target,
            },
            Operation::Controlled {
                gate,
                controls,
                target,
            } => {
                let mut all = extra.to_vec();
                all.extend(controls.iter().copied());
                Operation::Controlled {
                    gate: *gate,
                    controls: all,
                    target: *target,
                }
            }
        }
    }

    /// Rewrites local wire indices through `wires`: qubit `QubitId(i)` becomes `wires[i]`.
    ///
    /// # Errors
    /// `LogicalError::ReferenceViolation` if a wire index has no mapping.
    pub fn map_qubits(&self, wires: &[QubitId]) -> Result<Operation, LogicalError> {
        let map = |q: &QubitId| {
            wires
                .get(q.0)
                .copied()
                .ok_or_else(|| LogicalError::ReferenceViolation {
                    message: format!(
                        "Wire {} has no mapping ({} wires provided)",
                        q.0,
                        wires.len()
                    ),
                })
        };
        Ok(match self {
            Operation::Gate { gate, target } => Operation::Gate {
                gate: *gate,
                target: map(target)?,
            },
            Operation::Controlled {
                gate,
                controls,
                target,
            } => Operation::Controlled {
                gate: *gate,
                controls: controls.iter().map(map).collect::<Result<_, _>>()?,
                target: map(target)?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_controls_prepends() {
        let op = Operation::cx(QubitId(1), QubitId(2));
        let lifted = op.with_controls(&[QubitId(7)]);
        assert_eq!(
            lifted,
            Operation::Controlled {
                gate: Gate::X,
                controls: vec![QubitId(7), QubitId(1)],
                target: QubitId(2)
            }
        );
        assert_eq!(lifted.involved_qubits(), vec![QubitId(7), QubitId(1), QubitId(2)]);
    }

    #[test]
    fn test_map_qubits() -> Result<(), LogicalError> {
        let op = Operation::cz(QubitId(0), QubitId(2));
        let mapped = op.map_qubits(&[QubitId(10), QubitId(11), QubitId(12)])?;
        assert_eq!(mapped, Operation::cz(QubitId(10), QubitId(12)));
        assert!(op.map_qubits(&[QubitId(10)]).is_err());
        Ok(())
    }

    #[test]
    fn test_s_and_sdg_are_inverse() {
        let s = Gate::S.matrix();
        let sdg = Gate::Sdg.matrix();
        let product = s[1][1] * sdg[1][1];
        assert!((product - Complex::new(1.0, 0.0)).norm() < 1e-12);
        assert_eq!(Gate::S.inverse(), Gate::Sdg);
    }
}
