//! Single-qubit Pauli labels as they appear in stabilizer tableaux.

use std::fmt;

use crate::operations::Gate;

/// One entry of a stabilizer row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pauli {
    /// Identity
    I,
    /// Bit flip
    X,
    /// Bit and phase flip
    Y,
    /// Phase flip
    Z,
}

impl Pauli {
    /// Parses one tableau character. Only `I`, `X`, `Y` and `Z` are accepted.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(Pauli::I),
            'X' => Some(Pauli::X),
            'Y' => Some(Pauli::Y),
            'Z' => Some(Pauli::Z),
            _ => None,
        }
    }

    /// Builds the Pauli from its symplectic (x, z) bits.
    pub fn from_bits(x: bool, z: bool) -> Self {
        match (x, z) {
            (false, false) => Pauli::I,
            (true, false) => Pauli::X,
            (true, true) => Pauli::Y,
            (false, true) => Pauli::Z,
        }
    }

    /// `true` for X and Y.
    pub fn has_x(self) -> bool {
        matches!(self, Pauli::X | Pauli::Y)
    }

    /// `true` for Z and Y.
    pub fn has_z(self) -> bool {
        matches!(self, Pauli::Z | Pauli::Y)
    }

    /// Conjugates the Pauli by a Hadamard: returns `(H·P·H, negated)`.
    ///
    /// X and Z swap, Y picks up a sign.
    pub fn conjugate_by_hadamard(self) -> (Pauli, bool) {
        match self {
            Pauli::I => (Pauli::I, false),
            Pauli::X => (Pauli::Z, false),
            Pauli::Y => (Pauli::Y, true),
            Pauli::Z => (Pauli::X, false),
        }
    }

    /// The gate implementing this Pauli, `None` for the identity.
    pub fn gate(self) -> Option<Gate> {
        match self {
            Pauli::I => None,
            Pauli::X => Some(Gate::X),
            Pauli::Y => Some(Gate::Y),
            Pauli::Z => Some(Gate::Z),
        }
    }

    /// The tableau character.
    pub fn symbol(self) -> char {
        match self {
            Pauli::I => 'I',
            Pauli::X => 'X',
            Pauli::Y => 'Y',
            Pauli::Z => 'Z',
        }
    }
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
