//! Boolean expressions over classical bits, used as branch conditions.

use crate::core::{ClbitId, LogicalError};
use std::fmt;

/// An expression tree evaluated against classical memory when a branch is
/// reached.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClassicalExpr {
    /// A constant.
    Literal(bool),
    /// The current value of one bit.
    Bit(ClbitId),
    Not(Box<ClassicalExpr>),
    And(Box<ClassicalExpr>, Box<ClassicalExpr>),
    Xor(Box<ClassicalExpr>, Box<ClassicalExpr>),
    /// True when every listed bit reads 0 (the register equals zero).
    AllZero(Vec<ClbitId>),
}

impl ClassicalExpr {
    pub fn bit(clbit: ClbitId) -> Self {
        ClassicalExpr::Bit(clbit)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        ClassicalExpr::Not(Box::new(self))
    }

    pub fn and(self, other: ClassicalExpr) -> Self {
        ClassicalExpr::And(Box::new(self), Box::new(other))
    }

    pub fn xor(self, other: ClassicalExpr) -> Self {
        ClassicalExpr::Xor(Box::new(self), Box::new(other))
    }

    /// Register equals zero.
    pub fn is_zero(bits: Vec<ClbitId>) -> Self {
        ClassicalExpr::AllZero(bits)
    }

    /// Register differs from zero.
    pub fn is_nonzero(bits: Vec<ClbitId>) -> Self {
        ClassicalExpr::AllZero(bits).not()
    }

    /// Parity of `bits`; `Literal(false)` for an empty list.
    pub fn xor_all(bits: &[ClbitId]) -> Self {
        let mut iter = bits.iter().copied().map(ClassicalExpr::Bit);
        match iter.next() {
            Some(first) => iter.fold(first, ClassicalExpr::xor),
            None => ClassicalExpr::Literal(false),
        }
    }

    /// Conjunction of `bit == pattern[i]` over all positions; `Literal(true)`
    /// for empty inputs.
    ///
    /// # Errors
    /// `LogicalError::InvalidInput` when the widths differ.
    pub fn matches(bits: &[ClbitId], pattern: &[bool]) -> Result<Self, LogicalError> {
        if bits.len() != pattern.len() {
            return Err(LogicalError::InvalidInput {
                message: format!(
                    "Pattern of width {} cannot be matched against {} bits",
                    pattern.len(),
                    bits.len()
                ),
            });
        }
        let mut terms = bits.iter().zip(pattern).map(|(&b, &expected)| {
            if expected {
                ClassicalExpr::Bit(b)
            } else {
                ClassicalExpr::Bit(b).not()
            }
        });
        Ok(match terms.next() {
            Some(first) => terms.fold(first, ClassicalExpr::and),
            None => ClassicalExpr::Literal(true),
        })
    }

    /// Evaluates against `memory`, indexed by `ClbitId`.
    ///
    /// # Errors
    /// `LogicalError::ReferenceViolation` if a bit is outside `memory`.
    pub fn evaluate(&self, memory: &[bool]) -> Result<bool, LogicalError> {
        let read = |b: &ClbitId| {
            memory
                .get(b.0)
                .copied()
                .ok_or_else(|| LogicalError::ReferenceViolation {
                    message: format!("Condition reads {} but memory holds {} bits", b, memory.len()),
                })
        };
        match self {
            ClassicalExpr::Literal(v) => Ok(*v),
            ClassicalExpr::Bit(b) => read(b),
            ClassicalExpr::Not(inner) => Ok(!inner.evaluate(memory)?),
            ClassicalExpr::And(a, b) => Ok(a.evaluate(memory)? && b.evaluate(memory)?),
            ClassicalExpr::Xor(a, b) => Ok(a.evaluate(memory)? ^ b.evaluate(memory)?),
            ClassicalExpr::AllZero(bits) => {
                for b in bits {
                    if read(b)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
        }
    }

    /// Every bit the expression reads.
    pub fn bits(&self) -> Vec<ClbitId> {
        let mut out = Vec::new();
        self.collect_bits(&mut out);
        out
    }

    fn collect_bits(&self, out: &mut Vec<ClbitId>) {
        match self {
            ClassicalExpr::Literal(_) => {}
            ClassicalExpr::Bit(b) => out.push(*b),
            ClassicalExpr::Not(inner) => inner.collect_bits(out),
            ClassicalExpr::And(a, b) | ClassicalExpr::Xor(a, b) => {
                a.collect_bits(out);
                b.collect_bits(out);
            }
            ClassicalExpr::AllZero(bits) => out.extend(bits.iter().copied()),
        }
    }
}

impl fmt::Display for ClassicalExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassicalExpr::Literal(v) => write!(f, "{}", u8::from(*v)),
            ClassicalExpr::Bit(b) => write!(f, "{}", b),
            ClassicalExpr::Not(inner) => write!(f, "!{}", inner),
            ClassicalExpr::And(a, b) => write!(f, "({} & {})", a, b),
            ClassicalExpr::Xor(a, b) => write!(f, "({} ^ {})", a, b),
            ClassicalExpr::AllZero(bits) => {
                let names: Vec<String> = bits.iter().map(ToString::to_string).collect();
                write!(f, "[{}] == 0", names.join(","))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(i: usize) -> ClbitId {
        ClbitId(i)
    }

    #[test]
    fn test_matches_pattern() -> Result<(), LogicalError> {
        let expr = ClassicalExpr::matches(&[c(0), c(1), c(2)], &[true, false, true])?;
        assert!(expr.evaluate(&[true, false, true])?);
        assert!(!expr.evaluate(&[true, true, true])?);
        assert!(ClassicalExpr::matches(&[c(0)], &[true, false]).is_err());
        assert!(ClassicalExpr::matches(&[], &[])?.evaluate(&[])?);
        Ok(())
    }

    #[test]
    fn test_parity_and_zero_checks() -> Result<(), LogicalError> {
        let memory = [true, true, false, true];
        assert!(!ClassicalExpr::xor_all(&[c(0), c(1)]).evaluate(&memory)?);
        assert!(ClassicalExpr::xor_all(&[c(0), c(1), c(3)]).evaluate(&memory)?);
        assert!(!ClassicalExpr::xor_all(&[]).evaluate(&memory)?);
        assert!(ClassicalExpr::is_zero(vec![c(2)]).evaluate(&memory)?);
        assert!(ClassicalExpr::is_nonzero(vec![c(2), c(3)]).evaluate(&memory)?);
        Ok(())
    }

    #[test]
    fn test_missing_bit_is_reference_violation() {
        let result = ClassicalExpr::bit(c(9)).evaluate(&[false]);
        assert!(matches!(result, Err(LogicalError::ReferenceViolation { .. })));
    }
}
