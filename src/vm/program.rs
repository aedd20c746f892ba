// src/vm/program.rs

//! Instruction lists for the logiq VM and the builder that records them.

use super::expr::ClassicalExpr;
use crate::core::{ClbitId, ClbitSpan, LogicalError, QubitId, QubitSpan};
use crate::operations::{Gate, Operation};
use crate::substrate::{LiteralWrite, Substrate};
use std::fmt;

// --- Instruction Set Definition ---

/// A single step of a [`Program`].
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// Apply a unitary.
    QuantumOp(Operation),
    /// Measure `qubit` in the computational basis and store the outcome in `clbit`.
    Measure { qubit: QubitId, clbit: ClbitId },
    /// Return `qubit` to |0>.
    Reset { qubit: QubitId },
    /// Write a literal into `clbit`.
    SetClbit { clbit: ClbitId, value: bool },
    /// Evaluate `condition` and run exactly one of the two blocks.
    IfElse {
        condition: ClassicalExpr,
        then_branch: Vec<Instruction>,
        else_branch: Vec<Instruction>,
    },
}

impl Instruction {
    /// Number of instructions in this node, counting nested blocks.
    pub fn nested_count(&self) -> usize {
        match self {
            Instruction::IfElse {
                then_branch,
                else_branch,
                ..
            } => {
                1 + then_branch.iter().map(Instruction::nested_count).sum::<usize>()
                    + else_branch.iter().map(Instruction::nested_count).sum::<usize>()
            }
            _ => 1,
        }
    }

    /// Checks every qubit and bit reference against the arena sizes.
    fn validate(&self, num_qubits: usize, num_clbits: usize) -> Result<(), LogicalError> {
        let qubit_ok = |q: &QubitId| {
            if q.0 < num_qubits {
                Ok(())
            } else {
                Err(LogicalError::ReferenceViolation {
                    message: format!("Instruction references {} but only {} qubits exist", q, num_qubits),
                })
            }
        };
        let clbit_ok = |c: &ClbitId| {
            if c.0 < num_clbits {
                Ok(())
            } else {
                Err(LogicalError::ReferenceViolation {
                    message: format!("Instruction references {} but only {} bits exist", c, num_clbits),
                })
            }
        };
        match self {
            Instruction::QuantumOp(op) => {
                let qubits = op.involved_qubits();
                qubits.iter().try_for_each(qubit_ok)?;
                let target = op.target();
                if qubits[..qubits.len() - 1].contains(&target) {
                    return Err(LogicalError::InvalidInput {
                        message: format!("{} is both control and target of {:?}", target, op),
                    });
                }
                Ok(())
            }
            Instruction::Measure { qubit, clbit } => {
                qubit_ok(qubit)?;
                clbit_ok(clbit)
            }
            Instruction::Reset { qubit } => qubit_ok(qubit),
            Instruction::SetClbit { clbit, .. } => clbit_ok(clbit),
            Instruction::IfElse {
                condition,
                then_branch,
                else_branch,
            } => {
                condition.bits().iter().try_for_each(clbit_ok)?;
                then_branch
                    .iter()
                    .chain(else_branch)
                    .try_for_each(|i| i.validate(num_qubits, num_clbits))
            }
        }
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let pad = "  ".repeat(depth);
        match self {
            Instruction::QuantumOp(Operation::Gate { gate, target }) => {
                writeln!(f, "{}{} {}", pad, gate.symbol(), target)
            }
            Instruction::QuantumOp(Operation::Controlled {
                gate,
                controls,
                target,
            }) => {
                let names: Vec<String> = controls.iter().map(ToString::to_string).collect();
                writeln!(f, "{}C{} [{}] -> {}", pad, gate.symbol(), names.join(","), target)
            }
            Instruction::Measure { qubit, clbit } => writeln!(f, "{}measure {} -> {}", pad, qubit, clbit),
            Instruction::Reset { qubit } => writeln!(f, "{}reset {}", pad, qubit),
            Instruction::SetClbit { clbit, value } => {
                writeln!(f, "{}set {} = {}", pad, clbit, u8::from(*value))
            }
            Instruction::IfElse {
                condition,
                then_branch,
                else_branch,
            } => {
                writeln!(f, "{}if {} {{", pad, condition)?;
                for i in then_branch {
                    i.write_indented(f, depth + 1)?;
                }
                if !else_branch.is_empty() {
                    writeln!(f, "{}}} else {{", pad)?;
                    for i in else_branch {
                        i.write_indented(f, depth + 1)?;
                    }
                }
                writeln!(f, "{}}}", pad)
            }
        }
    }
}

// --- Program Structure ---

/// A named register: a view into the qubit or bit arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Register {
    pub name: String,
    pub start: usize,
    pub len: usize,
}

/// A complete recorded program.
#[derive(Debug, Clone)]
pub struct Program {
    pub(crate) instructions: Vec<Instruction>,
    pub(crate) qubit_registers: Vec<Register>,
    pub(crate) clbit_registers: Vec<Register>,
    pub(crate) num_qubits: usize,
    pub(crate) num_clbits: usize,
}

impl Program {
    /// Top-level instructions.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of top-level instructions.
    pub fn instruction_count(&self) -> usize {
        self.instructions.len()
    }

    /// Number of instructions including everything nested in branches.
    pub fn total_instruction_count(&self) -> usize {
        self.instructions.iter().map(Instruction::nested_count).sum()
    }

    /// Number of top-level `IfElse` nodes.
    pub fn branch_count(&self) -> usize {
        self.instructions
            .iter()
            .filter(|i| matches!(i, Instruction::IfElse { .. }))
            .count()
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn num_clbits(&self) -> usize {
        self.num_clbits
    }

    pub fn qubit_registers(&self) -> &[Register] {
        &self.qubit_registers
    }

    pub fn clbit_registers(&self) -> &[Register] {
        &self.clbit_registers
    }

    pub fn qubit_register(&self, name: &str) -> Option<&Register> {
        self.qubit_registers.iter().find(|r| r.name == name)
    }

    pub fn clbit_register(&self, name: &str) -> Option<&Register> {
        self.clbit_registers.iter().find(|r| r.name == name)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "logiq Program ({} instructions, {} qubits, {} bits)",
            self.instruction_count(),
            self.num_qubits,
            self.num_clbits
        )?;
        for r in &self.qubit_registers {
            writeln!(f, "  qreg {}[{}] @ q{}", r.name, r.len, r.start)?;
        }
        for r in &self.clbit_registers {
            writeln!(f, "  creg {}[{}] @ c{}", r.name, r.len, r.start)?;
        }
        for instruction in &self.instructions {
            instruction.write_indented(f, 1)?;
        }
        Ok(())
    }
}

// --- Program Builder ---

/// Records a [`Program`], either fluently or through the [`Substrate`] trait.
///
/// # Examples
/// ```
/// # use logiq::{ProgramBuilder, Instruction, Operation, Gate, QubitId, ClbitId};
/// let program = ProgramBuilder::new()
///     .with_qubits("q", 1)
///     .with_clbits("m", 1)
///     .add(Instruction::QuantumOp(Operation::gate(Gate::X, QubitId(0))))
///     .add(Instruction::Measure { qubit: QubitId(0), clbit: ClbitId(0) })
///     .build()
///     .expect("valid program");
/// assert_eq!(program.instruction_count(), 2);
/// ```
#[derive(Debug)]
pub struct ProgramBuilder {
    qubit_registers: Vec<Register>,
    clbit_registers: Vec<Register>,
    num_qubits: usize,
    num_clbits: usize,
    /// Open blocks; index 0 is the program body, deeper entries are branch arms under construction.
    blocks: Vec<Vec<Instruction>>,
    literal: LiteralWrite,
    /// Helper qubits in |0> and |1> when `literal` is `AncillaPair`.
    literal_pair: Option<(QubitId, QubitId)>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self {
            qubit_registers: Vec::new(),
            clbit_registers: Vec::new(),
            num_qubits: 0,
            num_clbits: 0,
            blocks: vec![Vec::new()],
            literal: LiteralWrite::Native,
            literal_pair: None,
        }
    }

    /// A builder whose literal writes use `mode`. For
    /// [`LiteralWrite::AncillaPair`] this allocates the two-qubit `literal`
    /// register and flips its second qubit right away.
    pub fn with_literal_write(mode: LiteralWrite) -> Result<Self, LogicalError> {
        let mut builder = Self::new();
        builder.literal = mode;
        if mode == LiteralWrite::AncillaPair {
            let pair = builder.add_qubit_register("literal", 2)?;
            let (zero, one) = (pair.get(0)?, pair.get(1)?);
            builder.apply(Operation::gate(Gate::X, one))?;
            builder.literal_pair = Some((zero, one));
        }
        Ok(builder)
    }

    pub fn literal_write(&self) -> LiteralWrite {
        self.literal
    }

    /// Fluent register allocation for hand-written programs.
    pub fn with_qubits(mut self, name: &str, size: usize) -> Self {
        self.push_qubit_register(name, size);
        self
    }

    /// Fluent register allocation for hand-written programs.
    pub fn with_clbits(mut self, name: &str, size: usize) -> Self {
        self.push_clbit_register(name, size);
        self
    }

    /// Appends an instruction; references are checked by [`build`](Self::build).
    pub fn add(mut self, instruction: Instruction) -> Self {
        self.push(instruction);
        self
    }

    pub fn add_many<I>(mut self, instructions: I) -> Self
    where
        I: IntoIterator<Item = Instruction>,
    {
        for instruction in instructions {
            self.push(instruction);
        }
        self
    }

    /// Top-level instructions recorded so far.
    pub fn instruction_count(&self) -> usize {
        self.blocks.first().map_or(0, Vec::len)
    }

    /// Instructions recorded so far, nested ones included.
    pub fn total_instruction_count(&self) -> usize {
        self.blocks
            .iter()
            .flatten()
            .map(Instruction::nested_count)
            .sum()
    }

    /// Finishes the program.
    ///
    /// # Errors
    /// `LogicalError::ReferenceViolation` for references outside the
    /// allocated registers, `LogicalError::InvalidInput` for an operation
    /// whose target is also one of its controls.
    pub fn build(mut self) -> Result<Program, LogicalError> {
        if self.blocks.len() != 1 {
            return Err(LogicalError::SimulationError {
                message: format!("{} branch blocks left open", self.blocks.len() - 1),
            });
        }
        let instructions = self.blocks.pop().unwrap_or_default();
        for instruction in &instructions {
            instruction.validate(self.num_qubits, self.num_clbits)?;
        }
        Ok(Program {
            instructions,
            qubit_registers: self.qubit_registers,
            clbit_registers: self.clbit_registers,
            num_qubits: self.num_qubits,
            num_clbits: self.num_clbits,
        })
    }

    fn push(&mut self, instruction: Instruction) {
        if let Some(block) = self.blocks.last_mut() {
            block.push(instruction);
        }
    }

    fn push_checked(&mut self, instruction: Instruction) -> Result<(), LogicalError> {
        instruction.validate(self.num_qubits, self.num_clbits)?;
        self.push(instruction);
        Ok(())
    }

    fn push_qubit_register(&mut self, name: &str, size: usize) -> QubitSpan {
        let span = QubitSpan::new(self.num_qubits, size);
        self.qubit_registers.push(Register {
            name: name.to_string(),
            start: self.num_qubits,
            len: size,
        });
        self.num_qubits += size;
        span
    }

    fn push_clbit_register(&mut self, name: &str, size: usize) -> ClbitSpan {
        let span = ClbitSpan::new(self.num_clbits, size);
        self.clbit_registers.push(Register {
            name: name.to_string(),
            start: self.num_clbits,
            len: size,
        });
        self.num_clbits += size;
        span
    }

    fn ensure_unique(&self, registers: &[Register], name: &str) -> Result<(), LogicalError> {
        if registers.iter().any(|r| r.name == name) {
            return Err(LogicalError::InvalidInput {
                message: format!("Register '{}' already exists", name),
            });
        }
        Ok(())
    }
}

impl Default for ProgramBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Substrate for ProgramBuilder {
    fn add_qubit_register(&mut self, name: &str, size: usize) -> Result<QubitSpan, LogicalError> {
        self.ensure_unique(&self.qubit_registers, name)?;
        Ok(self.push_qubit_register(name, size))
    }

    fn add_clbit_register(&mut self, name: &str, size: usize) -> Result<ClbitSpan, LogicalError> {
        self.ensure_unique(&self.clbit_registers, name)?;
        Ok(self.push_clbit_register(name, size))
    }

    fn apply(&mut self, op: Operation) -> Result<(), LogicalError> {
        self.push_checked(Instruction::QuantumOp(op))
    }

    fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> Result<(), LogicalError> {
        self.push_checked(Instruction::Measure { qubit, clbit })
    }

    fn reset(&mut self, qubit: QubitId) -> Result<(), LogicalError> {
        self.push_checked(Instruction::Reset { qubit })
    }

    fn write_clbit(&mut self, clbit: ClbitId, value: bool) -> Result<(), LogicalError> {
        match (self.literal, self.literal_pair) {
            (LiteralWrite::AncillaPair, Some((zero, one))) => {
                let qubit = if value { one } else { zero };
                self.measure(qubit, clbit)
            }
            (LiteralWrite::AncillaPair, None) => Err(LogicalError::SimulationError {
                message: "Literal helper register was never allocated".to_string(),
            }),
            (LiteralWrite::Native, _) => self.push_checked(Instruction::SetClbit { clbit, value }),
        }
    }

    fn if_else<T, E>(
        &mut self,
        condition: ClassicalExpr,
        then_branch: T,
        else_branch: E,
    ) -> Result<(), LogicalError>
    where
        T: FnOnce(&mut Self) -> Result<(), LogicalError>,
        E: FnOnce(&mut Self) -> Result<(), LogicalError>,
    {
        if let Some(b) = condition.bits().into_iter().find(|b| b.0 >= self.num_clbits) {
            return Err(LogicalError::ReferenceViolation {
                message: format!("Condition reads {} but only {} bits exist", b, self.num_clbits),
            });
        }

        self.blocks.push(Vec::new());
        let then_result = then_branch(self);
        let then_block = self.blocks.pop().unwrap_or_default();
        then_result?;

        self.blocks.push(Vec::new());
        let else_result = else_branch(self);
        let else_block = self.blocks.pop().unwrap_or_default();
        else_result?;

        self.push(Instruction::IfElse {
            condition,
            then_branch: then_block,
            else_branch: else_block,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_if_else_records_both_arms() -> Result<(), LogicalError> {
        let mut b = ProgramBuilder::new();
        let q = b.add_qubit_register("q", 1)?;
        let c = b.add_clbit_register("c", 1)?;
        b.if_else(
            ClassicalExpr::bit(c.get(0)?),
            |s| s.apply(Operation::gate(Gate::X, QubitId(0))),
            |s| s.reset(QubitId(0)),
        )?;
        b.measure(q.get(0)?, c.get(0)?)?;
        let program = b.build()?;
        assert_eq!(program.instruction_count(), 2);
        assert_eq!(program.branch_count(), 1);
        assert_eq!(program.total_instruction_count(), 4);
        match &program.instructions()[0] {
            Instruction::IfElse {
                then_branch,
                else_branch,
                ..
            } => {
                assert_eq!(then_branch.len(), 1);
                assert_eq!(else_branch, &vec![Instruction::Reset { qubit: QubitId(0) }]);
            }
            other => panic!("expected branch, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_failed_arm_leaves_no_trace() -> Result<(), LogicalError> {
        let mut b = ProgramBuilder::new();
        b.add_qubit_register("q", 1)?;
        let c = b.add_clbit_register("c", 1)?;
        let result = b.if_then(ClassicalExpr::bit(c.get(0)?), |s| s.reset(QubitId(5)));
        assert!(matches!(result, Err(LogicalError::ReferenceViolation { .. })));
        assert_eq!(b.total_instruction_count(), 0);
        assert!(b.build().is_ok());
        Ok(())
    }

    #[test]
    fn test_ancilla_pair_literal_writes_measure() -> Result<(), LogicalError> {
        let mut b = ProgramBuilder::with_literal_write(LiteralWrite::AncillaPair)?;
        let c = b.add_clbit_register("c", 1)?;
        b.write_clbit(c.get(0)?, true)?;
        let program = b.build()?;
        assert_eq!(program.num_qubits(), 2);
        assert_eq!(
            program.instructions()[1],
            Instruction::Measure { qubit: QubitId(1), clbit: ClbitId(0) }
        );
        Ok(())
    }

    #[test]
    fn test_rejects_duplicate_register_and_bad_references() -> Result<(), LogicalError> {
        let mut b = ProgramBuilder::new();
        b.add_qubit_register("q", 2)?;
        assert!(b.add_qubit_register("q", 1).is_err());
        assert!(b.apply(Operation::cx(QubitId(0), QubitId(0))).is_err());
        assert!(b.measure(QubitId(0), ClbitId(0)).is_err());
        let unchecked = ProgramBuilder::new()
            .with_qubits("q", 1)
            .add(Instruction::Reset { qubit: QubitId(3) })
            .build();
        assert!(matches!(unchecked, Err(LogicalError::ReferenceViolation { .. })));
        Ok(())
    }
}
