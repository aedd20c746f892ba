// src/simulation/engine.rs

use super::state::StateVector;
use crate::core::LogicalError;
use crate::core::constants::PROBABILITY_TOLERANCE;
use crate::operations::{Gate, Operation};
use num_complex::Complex;
use num_traits::Zero;
use rand::Rng;

/// Evolves a [`StateVector`] under gates, measurements and resets.
/// (Internal visibility)
pub(crate) struct StateVectorEngine {
    state: StateVector,
}

impl StateVectorEngine {
    pub(crate) fn init(num_qubits: usize) -> Result<Self, LogicalError> {
        Ok(Self {
            state: StateVector::zero_state(num_qubits)?,
        })
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &StateVector {
        &self.state
    }

    pub(crate) fn into_state(self) -> StateVector {
        self.state
    }

    pub(crate) fn apply_operation(&mut self, op: &Operation) -> Result<(), LogicalError> {
        match op {
            Operation::Gate { gate, target } => self.apply_gate(&[], target.0, *gate),
            Operation::Controlled {
                gate,
                controls,
                target,
            } => {
                let controls: Vec<usize> = controls.iter().map(|q| q.0).collect();
                if controls.contains(&target.0) {
                    return Err(LogicalError::InvalidInput {
                        message: format!("Qubit {} cannot control itself", target),
                    });
                }
                self.apply_gate(&controls, target.0, *gate)
            }
        }
    }

    /// Applies `gate` to `target` on the subspace where every control bit is 1.
    fn apply_gate(&mut self, controls: &[usize], target: usize, gate: Gate) -> Result<(), LogicalError> {
        self.check_qubit(target)?;
        let mut control_mask = 0usize;
        for &c in controls {
            self.check_qubit(c)?;
            control_mask |= 1 << c;
        }
        let target_mask = 1usize << target;
        let matrix = gate.matrix();
        let amplitudes = self.state.amplitudes_mut();
        for i0 in 0..amplitudes.len() {
            if i0 & target_mask != 0 || i0 & control_mask != control_mask {
                continue;
            }
            let i1 = i0 | target_mask;
            let psi_0 = amplitudes[i0];
            let psi_1 = amplitudes[i1];
            amplitudes[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            amplitudes[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }
        Ok(())
    }

    /// Projective Z-basis measurement. Outcomes whose probability is within
    /// tolerance of 0 or 1 are decided without consulting `rng`.
    pub(crate) fn measure<R: Rng>(&mut self, qubit: usize, rng: &mut R) -> Result<bool, LogicalError> {
        self.check_qubit(qubit)?;
        let p1 = self.state.probability_of_one(qubit);
        let outcome = if p1 < PROBABILITY_TOLERANCE {
            false
        } else if p1 > 1.0 - PROBABILITY_TOLERANCE {
            true
        } else {
            rng.random::<f64>() < p1
        };
        let p_outcome = if outcome { p1 } else { 1.0 - p1 };
        if p_outcome <= 0.0 {
            return Err(LogicalError::SimulationError {
                message: format!("Measurement of qubit {} selected an outcome of zero probability", qubit),
            });
        }
        let scale = 1.0 / p_outcome.sqrt();
        let mask = 1usize << qubit;
        for (idx, amp) in self.state.amplitudes_mut().iter_mut().enumerate() {
            if (idx & mask != 0) == outcome {
                *amp *= scale;
            } else {
                *amp = Complex::zero();
            }
        }
        Ok(outcome)
    }

    /// Measures and flips back to |0> when the outcome was 1.
    pub(crate) fn reset<R: Rng>(&mut self, qubit: usize, rng: &mut R) -> Result<(), LogicalError> {
        if self.measure(qubit, rng)? {
            self.apply_gate(&[], qubit, Gate::X)?;
        }
        Ok(())
    }

    fn check_qubit(&self, qubit: usize) -> Result<(), LogicalError> {
        if qubit < self.state.num_qubits() {
            Ok(())
        } else {
            Err(LogicalError::ReferenceViolation {
                message: format!(
                    "Qubit index {} outside the {}-qubit simulation",
                    qubit,
                    self.state.num_qubits()
                ),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::QubitId;
    use crate::validation::check_normalization;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn q(i: usize) -> QubitId {
        QubitId(i)
    }

    #[test]
    fn test_bell_pair_measurements_agree() -> Result<(), LogicalError> {
        for seed in 0..8 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut engine = StateVectorEngine::init(2)?;
            engine.apply_operation(&Operation::gate(Gate::H, q(0)))?;
            engine.apply_operation(&Operation::cx(q(0), q(1)))?;
            check_normalization(engine.state().amplitudes(), None)?;
            let a = engine.measure(0, &mut rng)?;
            let b = engine.measure(1, &mut rng)?;
            assert_eq!(a, b, "Bell pair outcomes disagree for seed {}", seed);
            check_normalization(engine.state().amplitudes(), None)?;
        }
        Ok(())
    }

    #[test]
    fn test_multi_controlled_gate_needs_all_controls() -> Result<(), LogicalError> {
        let mut rng = StdRng::seed_from_u64(1);
        let mut engine = StateVectorEngine::init(3)?;
        engine.apply_operation(&Operation::gate(Gate::X, q(0)))?;
        let toffoli = Operation::Controlled {
            gate: Gate::X,
            controls: vec![q(0), q(1)],
            target: q(2),
        };
        engine.apply_operation(&toffoli)?;
        assert!(!engine.measure(2, &mut rng)?);
        engine.apply_operation(&Operation::gate(Gate::X, q(1)))?;
        engine.apply_operation(&toffoli)?;
        assert!(engine.measure(2, &mut rng)?);
        Ok(())
    }

    #[test]
    fn test_reset_returns_to_zero() -> Result<(), LogicalError> {
        let mut rng = StdRng::seed_from_u64(3);
        let mut engine = StateVectorEngine::init(1)?;
        engine.apply_operation(&Operation::gate(Gate::H, q(0)))?;
        engine.reset(0, &mut rng)?;
        assert!(engine.state().probability_of_one(0) < 1e-12);
        Ok(())
    }

    #[test]
    fn test_out_of_range_qubit() -> Result<(), LogicalError> {
        let mut engine = StateVectorEngine::init(1)?;
        let result = engine.apply_operation(&Operation::gate(Gate::X, q(4)));
        assert!(matches!(result, Err(LogicalError::ReferenceViolation { .. })));
        Ok(())
    }
}
