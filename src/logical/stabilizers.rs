//! Partitioning of stabilizer indices into the groups the QEC cycle measures.

use crate::core::{Pauli, StabilizerTableau};

/// Stabilizer index groups, fixed for the lifetime of a builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StabilizerGroups {
    /// Generators containing X or Y, ascending.
    pub x_stabilizers: Vec<usize>,
    /// Generators containing Z or Y, ascending.
    pub z_stabilizers: Vec<usize>,
    /// First flagged group.
    pub flagged_1: Vec<usize>,
    /// Second flagged group, currently the same indices as the first.
    pub flagged_2: Vec<usize>,
}

impl StabilizerGroups {
    /// Classifies the generators of `tableau`.
    ///
    /// With `k = m / 2`, the flagged groups keep index `s` when
    /// `s < k - k/2 - 1` or `s > k + k/2 - 1`; for six generators that is
    /// `{0, 4, 5}`.
    pub fn classify(tableau: &StabilizerTableau) -> Self {
        let m = tableau.num_stabilizers();
        let x_stabilizers = (0..m)
            .filter(|&s| tableau.rows()[s].iter().any(|p| p.has_x()))
            .collect();
        let z_stabilizers = (0..m)
            .filter(|&s| tableau.rows()[s].iter().any(|p| p.has_z()))
            .collect();

        let k = (m / 2) as isize;
        let low = k - k / 2 - 1;
        let high = k + k / 2 - 1;
        let flagged: Vec<usize> = (0..m)
            .filter(|&s| {
                let s = s as isize;
                s < low || s > high
            })
            .collect();

        Self {
            x_stabilizers,
            z_stabilizers,
            flagged_1: flagged.clone(),
            flagged_2: flagged,
        }
    }

    /// Index into the Pauli frame that corrections for `indices` update:
    /// 0 when the first listed generator contains X, 1 otherwise.
    pub fn frame_index(tableau: &StabilizerTableau, indices: &[usize]) -> Option<usize> {
        let first = *indices.first()?;
        Some(if tableau.row_contains(first, Pauli::X) { 0 } else { 1 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::codes;
    use crate::core::LogicalError;

    #[test]
    fn test_steane_groups() -> Result<(), LogicalError> {
        let (tableau, _) = codes::steane()?;
        let groups = StabilizerGroups::classify(&tableau);
        assert_eq!(groups.x_stabilizers, vec![0, 1, 2]);
        assert_eq!(groups.z_stabilizers, vec![3, 4, 5]);
        assert_eq!(groups.flagged_1, vec![0, 4, 5]);
        assert_eq!(groups.flagged_1, groups.flagged_2);
        assert_eq!(StabilizerGroups::frame_index(&tableau, &groups.x_stabilizers), Some(0));
        assert_eq!(StabilizerGroups::frame_index(&tableau, &groups.z_stabilizers), Some(1));
        assert_eq!(StabilizerGroups::frame_index(&tableau, &[]), None);
        Ok(())
    }

    #[test]
    fn test_y_counts_for_both_groups() -> Result<(), LogicalError> {
        let tableau = StabilizerTableau::new(&["YYII", "ZZZZ"])?;
        let groups = StabilizerGroups::classify(&tableau);
        assert_eq!(groups.x_stabilizers, vec![0]);
        assert_eq!(groups.z_stabilizers, vec![0, 1]);
        Ok(())
    }
}
