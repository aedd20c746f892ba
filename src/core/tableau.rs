//! Stabilizer tableaux and code labels.

use std::fmt;

use super::error::LogicalError;
use super::pauli::Pauli;

/// `[[n, k, d]]` label of a stabilizer code.
///
/// `d` is carried for reporting only; nothing in the construction reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CodeLabel {
    /// Physical qubits per logical qubit.
    pub n: usize,
    /// Logical qubits encoded per block.
    pub k: usize,
    /// Code distance.
    pub d: usize,
}

impl CodeLabel {
    pub fn new(n: usize, k: usize, d: usize) -> Self {
        Self { n, k, d }
    }
}

impl From<(usize, usize, usize)> for CodeLabel {
    fn from((n, k, d): (usize, usize, usize)) -> Self {
        Self { n, k, d }
    }
}

impl fmt::Display for CodeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[[{},{},{}]]", self.n, self.k, self.d)
    }
}

/// An ordered list of `m` stabilizer generators over `n` qubits.
///
/// Rows are immutable once parsed. Pairwise commutation is *not* checked
/// here; see [`crate::validation::check_stabilizers_commute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StabilizerTableau {
    rows: Vec<Vec<Pauli>>,
}

impl StabilizerTableau {
    /// Parses one string per generator, e.g. `["XXXXIII", ...]`.
    ///
    /// # Errors
    /// `LogicalError::Construction` if the tableau is empty, the rows have
    /// different lengths, or a character is outside `{I, X, Y, Z}`.
    pub fn new<S: AsRef<str>>(rows: &[S]) -> Result<Self, LogicalError> {
        let mut parsed = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let paulis = row
                .chars()
                .map(|c| {
                    Pauli::from_char(c).ok_or_else(|| LogicalError::Construction {
                        message: format!("Stabilizer {} contains invalid character '{}'", i, c),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            parsed.push(paulis);
        }
        Self::from_paulis(parsed)
    }

    /// Builds a tableau from already parsed rows.
    pub fn from_paulis(rows: Vec<Vec<Pauli>>) -> Result<Self, LogicalError> {
        let Some(first) = rows.first() else {
            return Err(LogicalError::Construction {
                message: "Stabilizer tableau must contain at least one generator".to_string(),
            });
        };
        let n = first.len();
        if n == 0 {
            return Err(LogicalError::Construction {
                message: "Stabilizer generators must act on at least one qubit".to_string(),
            });
        }
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != n) {
            return Err(LogicalError::Construction {
                message: format!(
                    "Stabilizer {} has length {}, expected {}",
                    i,
                    row.len(),
                    n
                ),
            });
        }
        Ok(Self { rows })
    }

    /// Number of generators (m).
    pub fn num_stabilizers(&self) -> usize {
        self.rows.len()
    }

    /// Number of physical qubits (n).
    pub fn num_qubits(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn rows(&self) -> &[Vec<Pauli>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[Pauli]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Pauli of generator `row` on qubit `qubit`, identity when out of range.
    pub fn pauli(&self, row: usize, qubit: usize) -> Pauli {
        self.rows
            .get(row)
            .and_then(|r| r.get(qubit))
            .copied()
            .unwrap_or(Pauli::I)
    }

    /// Whether generator `row` contains `pauli` anywhere.
    pub fn row_contains(&self, row: usize, pauli: Pauli) -> bool {
        self.rows.get(row).is_some_and(|r| r.contains(&pauli))
    }
}

impl fmt::Display for StabilizerTableau {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for p in row {
                write!(f, "{}", p)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_query() -> Result<(), LogicalError> {
        let t = StabilizerTableau::new(&["XZZXI", "IXZZX"])?;
        assert_eq!(t.num_stabilizers(), 2);
        assert_eq!(t.num_qubits(), 5);
        assert_eq!(t.pauli(0, 1), Pauli::Z);
        assert_eq!(t.pauli(1, 9), Pauli::I);
        assert!(t.row_contains(1, Pauli::X));
        assert!(!t.row_contains(0, Pauli::Y));
        assert_eq!(t.to_string(), "XZZXI\nIXZZX");
        Ok(())
    }

    #[test]
    fn test_rejects_malformed_rows() {
        assert!(matches!(
            StabilizerTableau::new(&["XX", "XXX"]),
            Err(LogicalError::Construction { .. })
        ));
        assert!(matches!(
            StabilizerTableau::new(&["XA"]),
            Err(LogicalError::Construction { .. })
        ));
        let empty: [&str; 0] = [];
        assert!(StabilizerTableau::new(&empty).is_err());
    }
}
