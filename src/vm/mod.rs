// src/vm/mod.rs

//! Instruction lists with classical control flow, and the VM that runs them.

mod expr;
mod interpreter;
mod program;

pub use expr::ClassicalExpr;
pub use interpreter::{DEFAULT_INSTRUCTION_BUDGET, DEFAULT_SEED, QuantumVm};
pub use program::{Instruction, Program, ProgramBuilder, Register};
