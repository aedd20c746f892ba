//! Dense state vectors.

use crate::core::{LogicalError, Pauli};
use num_complex::Complex;
use num_traits::Zero;

/// Amplitudes of an `n`-qubit register in the computational basis.
///
/// Qubit `i` is bit `i` of the basis index (qubit 0 is the least
/// significant bit).
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    num_qubits: usize,
    amplitudes: Vec<Complex<f64>>,
}

/// Largest register the dense representation accepts.
pub const MAX_QUBITS: usize = 24;

impl StateVector {
    /// The all-zero state `|0…0>`.
    ///
    /// # Errors
    /// `LogicalError::SimulationError` above [`MAX_QUBITS`] qubits.
    pub fn zero_state(num_qubits: usize) -> Result<Self, LogicalError> {
        if num_qubits > MAX_QUBITS {
            return Err(LogicalError::SimulationError {
                message: format!(
                    "{} qubits exceed the dense simulation limit of {}",
                    num_qubits, MAX_QUBITS
                ),
            });
        }
        let mut amplitudes = vec![Complex::zero(); 1usize << num_qubits];
        amplitudes[0] = Complex::new(1.0, 0.0);
        Ok(Self {
            num_qubits,
            amplitudes,
        })
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn amplitudes(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    pub(crate) fn amplitudes_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.amplitudes
    }

    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Probability that measuring `qubit` yields 1.
    pub fn probability_of_one(&self, qubit: usize) -> f64 {
        let mask = 1usize << qubit;
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(idx, _)| idx & mask != 0)
            .map(|(_, a)| a.norm_sqr())
            .sum()
    }

    /// `<ψ|P|ψ>` for a Pauli string acting on qubits `0..paulis.len()`.
    ///
    /// # Errors
    /// `LogicalError::ReferenceViolation` if the string is longer than the register.
    pub fn pauli_expectation(&self, paulis: &[Pauli]) -> Result<f64, LogicalError> {
        if paulis.len() > self.num_qubits {
            return Err(LogicalError::ReferenceViolation {
                message: format!(
                    "Pauli string of length {} on a {}-qubit state",
                    paulis.len(),
                    self.num_qubits
                ),
            });
        }
        let x_mask = paulis
            .iter()
            .enumerate()
            .filter(|(_, p)| p.has_x())
            .fold(0usize, |mask, (q, _)| mask | (1 << q));
        let i = Complex::i();
        let mut total = Complex::zero();
        for (idx, amp) in self.amplitudes.iter().enumerate() {
            if amp.norm_sqr() == 0.0 {
                continue;
            }
            // P|idx> = phase |idx ^ x_mask>
            let mut phase = Complex::new(1.0, 0.0);
            for (q, p) in paulis.iter().enumerate() {
                let bit_set = idx & (1 << q) != 0;
                match p {
                    Pauli::I | Pauli::X => {}
                    Pauli::Z => {
                        if bit_set {
                            phase = -phase;
                        }
                    }
                    Pauli::Y => {
                        phase *= if bit_set { -i } else { i };
                    }
                }
            }
            total += self.amplitudes[idx ^ x_mask].conj() * phase * amp;
        }
        Ok(total.re)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_state_expectations() -> Result<(), LogicalError> {
        let state = StateVector::zero_state(2)?;
        assert_eq!(state.dim(), 4);
        assert!((state.pauli_expectation(&[Pauli::Z, Pauli::Z])? - 1.0).abs() < 1e-12);
        assert!(state.pauli_expectation(&[Pauli::X, Pauli::I])?.abs() < 1e-12);
        assert!(state.pauli_expectation(&[Pauli::Z, Pauli::Z, Pauli::Z]).is_err());
        assert!(StateVector::zero_state(MAX_QUBITS + 1).is_err());
        Ok(())
    }
}
