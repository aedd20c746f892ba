//! Constants of the default code and protocol.

/// Tableau, label and protocol qubit choices for the 7-qubit Steane code.
pub mod steane {
    /// Generators: three X-type followed by three Z-type checks.
    pub const TABLEAU: [&str; 6] = [
        "XXXXIII", "IXXIXXI", "IIXXIXX", "ZZZZIII", "IZZIZZI", "IIZZIZZ",
    ];
    /// `[[n, k, d]]`
    pub const LABEL: (usize, usize, usize) = (7, 1, 3);
    /// Physical qubits whose Z-parity is checked after encoding.
    pub const VERIFICATION_QUBITS: [usize; 3] = [1, 3, 5];
    /// Physical qubits whose Z-parity is the logical readout.
    pub const READOUT_QUBITS: [usize; 3] = [4, 5, 6];
}

/// Numerical tolerance used when deciding deterministic measurement outcomes.
pub const PROBABILITY_TOLERANCE: f64 = 1e-12;
