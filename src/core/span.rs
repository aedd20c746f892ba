//! Register views into the flat qubit / classical-bit arenas.

use std::marker::PhantomData;

use super::error::{ClbitId, LogicalError, QubitId};

/// A contiguous run `[start, start + len)` of arena indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span<Id> {
    start: usize,
    len: usize,
    marker: PhantomData<Id>,
}

/// Span over the qubit arena.
pub type QubitSpan = Span<QubitId>;
/// Span over the classical-bit arena.
pub type ClbitSpan = Span<ClbitId>;

impl<Id: From<usize>> Span<Id> {
    pub fn new(start: usize, len: usize) -> Self {
        Self {
            start,
            len,
            marker: PhantomData,
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Arena id of the `index`-th element of the register.
    ///
    /// # Errors
    /// `LogicalError::ReferenceViolation` when `index >= len`.
    pub fn get(&self, index: usize) -> Result<Id, LogicalError> {
        if index < self.len {
            Ok(Id::from(self.start + index))
        } else {
            Err(LogicalError::ReferenceViolation {
                message: format!(
                    "Register index {} out of range for register of size {}",
                    index, self.len
                ),
            })
        }
    }

    /// Ids selected by `indices`, in the given order.
    pub fn select(&self, indices: &[usize]) -> Result<Vec<Id>, LogicalError> {
        indices.iter().map(|&i| self.get(i)).collect()
    }

    pub fn to_vec(&self) -> Vec<Id> {
        (self.start..self.start + self.len).map(Id::from).collect()
    }
}
