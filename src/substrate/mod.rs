// src/substrate/mod.rs

//! The capabilities a logical-qubit program needs from whatever records it.
//!
//! The logical layer never touches an instruction list directly; it talks to
//! a [`Substrate`]. [`crate::vm::ProgramBuilder`] is the in-crate
//! implementation, recording into a [`crate::vm::Program`] that the
//! [`crate::vm::QuantumVm`] executes.

use crate::core::{ClbitId, ClbitSpan, LogicalError, QubitId, QubitSpan};
use crate::operations::Operation;
use crate::vm::ClassicalExpr;

/// How a substrate writes a literal 0 or 1 into a classical bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LiteralWrite {
    /// The substrate can set classical bits directly.
    #[default]
    Native,
    /// Classical bits can only be written by measurement: a two-qubit helper
    /// register holds |0> and |1>, and writing `v` measures helper qubit `v`.
    AncillaPair,
}

/// Recording target for logical programs.
///
/// Conditional blocks are built by closures so that both arms of an
/// if/else are recorded through the same interface; `if_else` records
/// the whole construct as one tagged node.
pub trait Substrate {
    /// Appends a named qubit register of `size` qubits to the qubit arena.
    fn add_qubit_register(&mut self, name: &str, size: usize) -> Result<QubitSpan, LogicalError>;

    /// Appends a named classical register of `size` bits, initialised to 0.
    fn add_clbit_register(&mut self, name: &str, size: usize) -> Result<ClbitSpan, LogicalError>;

    /// Records a unitary operation.
    fn apply(&mut self, op: Operation) -> Result<(), LogicalError>;

    /// Records a computational-basis measurement of `qubit` into `clbit`.
    fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> Result<(), LogicalError>;

    /// Records a reset of `qubit` to |0>.
    fn reset(&mut self, qubit: QubitId) -> Result<(), LogicalError>;

    /// Records an unconditional write of `value` into `clbit`.
    fn write_clbit(&mut self, clbit: ClbitId, value: bool) -> Result<(), LogicalError>;

    /// Records `if condition { then } else { otherwise }`.
    fn if_else<T, E>(
        &mut self,
        condition: ClassicalExpr,
        then_branch: T,
        else_branch: E,
    ) -> Result<(), LogicalError>
    where
        Self: Sized,
        T: FnOnce(&mut Self) -> Result<(), LogicalError>,
        E: FnOnce(&mut Self) -> Result<(), LogicalError>;

    /// `if condition { then }` with an empty else arm.
    fn if_then<T>(&mut self, condition: ClassicalExpr, then_branch: T) -> Result<(), LogicalError>
    where
        Self: Sized,
        T: FnOnce(&mut Self) -> Result<(), LogicalError>,
    {
        self.if_else(condition, then_branch, |_| Ok(()))
    }

    /// Inverts `clbit`: writes 0 when it reads 1, 1 otherwise.
    fn flip_clbit(&mut self, clbit: ClbitId) -> Result<(), LogicalError>
    where
        Self: Sized,
    {
        self.if_else(
            ClassicalExpr::bit(clbit),
            |s| s.write_clbit(clbit, false),
            |s| s.write_clbit(clbit, true),
        )
    }

    /// Writes the value of `condition` into `clbit` with a two-arm branch.
    fn assign_clbit(&mut self, clbit: ClbitId, condition: ClassicalExpr) -> Result<(), LogicalError>
    where
        Self: Sized,
    {
        self.if_else(
            condition,
            |s| s.write_clbit(clbit, true),
            |s| s.write_clbit(clbit, false),
        )
    }

    fn apply_all<I>(&mut self, ops: I) -> Result<(), LogicalError>
    where
        Self: Sized,
        I: IntoIterator<Item = Operation>,
    {
        for op in ops {
            self.apply(op)?;
        }
        Ok(())
    }
}
