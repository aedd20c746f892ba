//! Knobs of the logical-qubit protocol.

use super::decoder::DecoderTable;
use crate::core::LogicalError;
use crate::core::constants::steane;
use std::str::FromStr;

/// Settings shared by every logical qubit of a builder.
///
/// The defaults match the 7-qubit Steane code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalConfig {
    /// Physical qubits whose Z-parity is checked into the first ancilla after encoding.
    pub verification_qubits: Vec<usize>,
    /// Physical qubits whose measured parity is the logical readout.
    pub readout_qubits: Vec<usize>,
    /// Syndrome patterns that flip the Pauli frame.
    pub decoder: DecoderTable,
    /// Method used by [`LogicalProgramBuilder::h`](super::LogicalProgramBuilder::h).
    pub hadamard: HadamardMethod,
}

impl Default for LogicalConfig {
    fn default() -> Self {
        Self {
            verification_qubits: steane::VERIFICATION_QUBITS.to_vec(),
            readout_qubits: steane::READOUT_QUBITS.to_vec(),
            decoder: DecoderTable::distance_three(),
            hadamard: HadamardMethod::Lcu,
        }
    }
}

impl LogicalConfig {
    pub fn with_verification_qubits(mut self, qubits: Vec<usize>) -> Self {
        self.verification_qubits = qubits;
        self
    }

    pub fn with_readout_qubits(mut self, qubits: Vec<usize>) -> Self {
        self.readout_qubits = qubits;
        self
    }

    pub fn with_decoder(mut self, decoder: DecoderTable) -> Self {
        self.decoder = decoder;
        self
    }

    /// Checks that every configured physical index exists in an `n`-qubit block.
    pub(crate) fn validate(&self, n: usize) -> Result<(), LogicalError> {
        for (name, qubits) in [
            ("verification", &self.verification_qubits),
            ("readout", &self.readout_qubits),
        ] {
            if let Some(q) = qubits.iter().find(|&&q| q >= n) {
                return Err(LogicalError::Construction {
                    message: format!(
                        "Configured {} qubit {} does not exist in a {}-qubit block",
                        name, q, n
                    ),
                });
            }
        }
        self.decoder.validate()
    }
}

/// How the logical Hadamard is synthesised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HadamardMethod {
    /// Linear combination of unitaries: `(X_L + Z_L)/√2` through one helper qubit.
    #[default]
    Lcu,
}

impl FromStr for HadamardMethod {
    type Err = LogicalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LCU" | "lcu" => Ok(HadamardMethod::Lcu),
            other => Err(LogicalError::Unsupported {
                message: format!("Logical Hadamard method '{}' is not implemented", other),
            }),
        }
    }
}

/// Options for a configurable QEC cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QecCycleOptions {
    /// Syndrome extraction rounds per cycle.
    pub rounds: usize,
    /// Replacement flagged stabilizer groups.
    pub flagged_groups: Option<(Vec<usize>, Vec<usize>)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parsing() {
        assert_eq!("LCU".parse::<HadamardMethod>(), Ok(HadamardMethod::Lcu));
        assert!(matches!(
            "transversal".parse::<HadamardMethod>(),
            Err(LogicalError::Unsupported { .. })
        ));
    }

    #[test]
    fn test_validate_against_block_size() {
        let config = LogicalConfig::default();
        assert!(config.validate(7).is_ok());
        assert!(config.validate(5).is_err());
        let custom = LogicalConfig::default().with_readout_qubits(vec![0, 1, 2]).with_verification_qubits(vec![0]);
        assert!(custom.validate(5).is_ok());
    }
}
