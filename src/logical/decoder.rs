//! Lookup decoding of syndrome differences into Pauli-frame flips.

use super::Emitter;
use super::registers::ClbitRole;
use super::stabilizers::StabilizerGroups;
use crate::core::LogicalError;
use crate::substrate::Substrate;
use crate::vm::ClassicalExpr;
use tracing::trace;

/// Syndrome-difference patterns that toggle a Pauli-frame bit.
///
/// Every pattern is read over the stabilizer subset passed to the decoder,
/// in subset order, so all patterns must have the subset's width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderTable {
    /// Patterns on the unflagged diff bits that flip the frame without flags.
    pub unflagged: Vec<Vec<bool>>,
    /// `(flag pattern, unflagged pattern)` pairs that flip the frame
    /// when both match.
    pub flagged: Vec<(Vec<bool>, Vec<bool>)>,
}

impl DecoderTable {
    /// Table for a distance-3 code measured as two ordered triples of
    /// generators.
    pub fn distance_three() -> Self {
        let p = |bits: [u8; 3]| bits.iter().map(|&b| b == 1).collect::<Vec<bool>>();
        Self {
            unflagged: vec![p([0, 1, 0]), p([0, 1, 1]), p([0, 0, 1])],
            flagged: vec![
                (p([1, 0, 0]), p([0, 1, 0])),
                (p([1, 0, 0]), p([0, 0, 1])),
                (p([0, 1, 1]), p([0, 0, 1])),
            ],
        }
    }

    /// Width shared by every pattern, `None` for an empty table.
    pub fn width(&self) -> Option<usize> {
        self.unflagged
            .first()
            .or_else(|| self.flagged.first().map(|(f, _)| f))
            .map(Vec::len)
    }

    pub(crate) fn validate(&self) -> Result<(), LogicalError> {
        let Some(width) = self.width() else {
            return Ok(());
        };
        let consistent = self.unflagged.iter().all(|p| p.len() == width)
            && self
                .flagged
                .iter()
                .all(|(f, p)| f.len() == width && p.len() == width);
        if consistent {
            Ok(())
        } else {
            Err(LogicalError::Construction {
                message: "Decoder patterns must all have the same width".to_string(),
            })
        }
    }
}

impl Default for DecoderTable {
    fn default() -> Self {
        Self::distance_three()
    }
}

impl Emitter<'_> {
    /// Emits the conditional frame flips for logical qubit `q` over the
    /// stabilizer subset `indices`.
    ///
    /// The syndrome vector is always read from the unflagged diff register;
    /// with `with_flagged` the flagged diff bits additionally gate each flip.
    /// An empty subset emits nothing.
    pub(crate) fn apply_decoding<S: Substrate>(
        &self,
        s: &mut S,
        q: usize,
        indices: &[usize],
        with_flagged: bool,
    ) -> Result<(), LogicalError> {
        let Some(frame_index) = StabilizerGroups::frame_index(self.code.tableau(), indices) else {
            return Ok(());
        };
        let frame_bit = self.registers.clbits(q, ClbitRole::PauliFrame)?.get(frame_index)?;
        let syndrome = self
            .registers
            .clbits(q, ClbitRole::UnflaggedDiff)?
            .select(indices)?;
        trace!(q, ?indices, with_flagged, frame_index, "emitting decoder");

        if with_flagged {
            let flags = self.registers.clbits(q, ClbitRole::FlaggedDiff)?.select(indices)?;
            for (flag_pattern, pattern) in &self.config.decoder.flagged {
                let condition = ClassicalExpr::matches(&flags, flag_pattern)?
                    .and(ClassicalExpr::matches(&syndrome, pattern)?);
                s.if_then(condition, |s| s.flip_clbit(frame_bit))?;
            }
        } else {
            for pattern in &self.config.decoder.unflagged {
                let condition = ClassicalExpr::matches(&syndrome, pattern)?;
                s.if_then(condition, |s| s.flip_clbit(frame_bit))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_shape() {
        let table = DecoderTable::default();
        assert_eq!(table.width(), Some(3));
        assert_eq!(table.unflagged.len(), 3);
        assert_eq!(table.flagged.len(), 3);
        assert!(table.validate().is_ok());
    }

    #[test]
    fn test_ragged_table_is_rejected() {
        let table = DecoderTable {
            unflagged: vec![vec![true], vec![true, false]],
            flagged: Vec::new(),
        };
        assert!(table.validate().is_err());
    }
}
