// src/vm/interpreter.rs

//! The logiq VM interpreter.

use super::program::{Instruction, Program};
use crate::core::LogicalError;
use crate::simulation::engine::StateVectorEngine;
use crate::simulation::{ExecutionResult, StateVector};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, trace};

/// Seed used by [`QuantumVm::new`].
pub const DEFAULT_SEED: u64 = 0x5eed_0f_10c1;
/// Instruction budget used by [`QuantumVm::new`].
pub const DEFAULT_INSTRUCTION_BUDGET: u64 = 1_000_000;

/// Executes [`Program`]s on a dense state vector.
///
/// Measurements draw from a `StdRng` seeded per run, so a given program and
/// seed always produce the same result.
///
/// # Examples
///
/// ```
/// # use logiq::{ProgramBuilder, Instruction, Operation, Gate, QubitId, ClbitId, QuantumVm, LogicalError};
/// # fn main() -> Result<(), LogicalError> {
/// let program = ProgramBuilder::new()
///     .with_qubits("q", 1)
///     .with_clbits("m", 1)
///     .add(Instruction::QuantumOp(Operation::gate(Gate::H, QubitId(0))))
///     .add(Instruction::Measure { qubit: QubitId(0), clbit: ClbitId(0) })
///     .build()?;
///
/// let result = QuantumVm::new().run(&program)?;
/// let outcome = result.register_value("m");
/// assert!(outcome == Some(0) || outcome == Some(1));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct QuantumVm {
    seed: u64,
    instruction_budget: u64,
}

/// Mutable state of a single run.
struct Execution {
    engine: StateVectorEngine,
    memory: Vec<bool>,
    rng: StdRng,
    executed: u64,
    budget: u64,
}

impl QuantumVm {
    pub fn new() -> Self {
        Self {
            seed: DEFAULT_SEED,
            instruction_budget: DEFAULT_INSTRUCTION_BUDGET,
        }
    }

    /// Uses `seed` for measurement sampling.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Aborts runs that execute more than `budget` instructions.
    pub fn with_instruction_budget(mut self, budget: u64) -> Self {
        self.instruction_budget = budget;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Runs `program` from `|0…0>` with all classical bits cleared.
    ///
    /// # Errors
    /// `LogicalError::SimulationError` when the program is too large to
    /// simulate or exceeds the instruction budget; reference errors from
    /// malformed instructions.
    pub fn run(&self, program: &Program) -> Result<ExecutionResult, LogicalError> {
        self.run_with_state(program).map(|(result, _)| result)
    }

    /// Like [`run`](Self::run), also returning the final quantum state.
    pub fn run_with_state(&self, program: &Program) -> Result<(ExecutionResult, StateVector), LogicalError> {
        debug!(
            qubits = program.num_qubits(),
            clbits = program.num_clbits(),
            instructions = program.instruction_count(),
            seed = self.seed,
            "starting VM run"
        );
        let mut execution = Execution {
            engine: StateVectorEngine::init(program.num_qubits())?,
            memory: vec![false; program.num_clbits()],
            rng: StdRng::seed_from_u64(self.seed),
            executed: 0,
            budget: self.instruction_budget,
        };
        execution.run_block(program.instructions())?;
        debug!(executed = execution.executed, "VM run finished");
        let result = ExecutionResult::new(
            execution.memory,
            program.clbit_registers().to_vec(),
            execution.executed,
        );
        Ok((result, execution.engine.into_state()))
    }
}

impl Default for QuantumVm {
    fn default() -> Self {
        Self::new()
    }
}

impl Execution {
    fn run_block(&mut self, block: &[Instruction]) -> Result<(), LogicalError> {
        for instruction in block {
            self.executed += 1;
            if self.executed > self.budget {
                return Err(LogicalError::SimulationError {
                    message: format!(
                        "Execution exceeded the instruction budget ({})",
                        self.budget
                    ),
                });
            }
            trace!(step = self.executed, ?instruction, "executing");

            match instruction {
                Instruction::QuantumOp(op) => self.engine.apply_operation(op)?,
                Instruction::Measure { qubit, clbit } => {
                    let outcome = self.engine.measure(qubit.0, &mut self.rng)?;
                    *self.bit_mut(clbit.0)? = outcome;
                }
                Instruction::Reset { qubit } => self.engine.reset(qubit.0, &mut self.rng)?,
                Instruction::SetClbit { clbit, value } => *self.bit_mut(clbit.0)? = *value,
                Instruction::IfElse {
                    condition,
                    then_branch,
                    else_branch,
                } => {
                    if condition.evaluate(&self.memory)? {
                        self.run_block(then_branch)?;
                    } else {
                        self.run_block(else_branch)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn bit_mut(&mut self, index: usize) -> Result<&mut bool, LogicalError> {
        let len = self.memory.len();
        self.memory
            .get_mut(index)
            .ok_or_else(|| LogicalError::ReferenceViolation {
                message: format!("Classical bit c{} outside memory of {} bits", index, len),
            })
    }
}
