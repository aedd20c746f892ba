//! Error handling and the identifiers errors refer to.

use std::fmt;
use thiserror::Error;

/// Index of a qubit in the flat qubit arena of a program.
/// Registers are views (`Span`s) into this arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QubitId(pub usize);

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<usize> for QubitId {
    fn from(index: usize) -> Self {
        QubitId(index)
    }
}

/// Index of a classical bit in the flat classical-bit arena of a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClbitId(pub usize);

impl fmt::Display for ClbitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

impl From<usize> for ClbitId {
    fn from(index: usize) -> Self {
        ClbitId(index)
    }
}

/// Errors raised while deriving a code, emitting a logical program or executing it.
///
/// Every variant carries a human readable message; callers match on the
/// variant to distinguish the failure class.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogicalError {
    /// The stabilizer tableau or code label cannot produce a valid code.
    #[error("Construction Error: {message}")]
    Construction {
        /// Construction failure message
        message: String,
    },

    /// A caller supplied arguments that violate an operation's preconditions
    /// (length mismatches, non-binary initial states, overlapping qubit sets).
    #[error("Invalid Input: {message}")]
    InvalidInput {
        /// InvalidInput failure message
        message: String,
    },

    /// The requested feature or method is not available.
    #[error("Unsupported: {message}")]
    Unsupported {
        /// Unsupported failure message
        message: String,
    },

    /// A qubit, classical bit, register or logical qubit index does not exist.
    #[error("Reference Violation: {message}")]
    ReferenceViolation {
        /// ReferenceViolation failure message
        message: String,
    },

    /// General error encountered while executing a program.
    #[error("Simulation Process Error: {message}")]
    SimulationError {
        /// SimulationError failure message
        message: String,
    },
}
