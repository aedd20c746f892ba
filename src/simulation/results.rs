// src/simulation/results.rs
use crate::core::ClbitId;
use crate::vm::Register;
use std::fmt;

/// Classical outcome of a program run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionResult {
    memory: Vec<bool>,
    registers: Vec<Register>,
    executed_instructions: u64,
}

impl ExecutionResult {
    pub(crate) fn new(memory: Vec<bool>, registers: Vec<Register>, executed_instructions: u64) -> Self {
        Self {
            memory,
            registers,
            executed_instructions,
        }
    }

    /// Value of one bit, `None` if it does not exist.
    pub fn clbit(&self, id: ClbitId) -> Option<bool> {
        self.memory.get(id.0).copied()
    }

    /// Every bit of the named register, index 0 first.
    pub fn register(&self, name: &str) -> Option<Vec<bool>> {
        let reg = self.registers.iter().find(|r| r.name == name)?;
        self.memory.get(reg.start..reg.start + reg.len).map(<[bool]>::to_vec)
    }

    /// The named register read as a little-endian integer (bit 0 is the
    /// least significant). `None` for unknown names or registers over 64 bits.
    pub fn register_value(&self, name: &str) -> Option<u64> {
        let bits = self.register(name)?;
        if bits.len() > 64 {
            return None;
        }
        Some(
            bits.iter()
                .enumerate()
                .fold(0u64, |acc, (i, &b)| acc | (u64::from(b) << i)),
        )
    }

    pub fn memory(&self) -> &[bool] {
        &self.memory
    }

    /// Instructions executed, counting branch nodes and only the arms taken.
    pub fn executed_instructions(&self) -> u64 {
        self.executed_instructions
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Execution Results ({} instructions):", self.executed_instructions)?;
        if self.registers.is_empty() {
            writeln!(f, "  No classical registers.")?;
        }
        for reg in &self.registers {
            let bits: String = self
                .memory
                .get(reg.start..reg.start + reg.len)
                .unwrap_or(&[])
                .iter()
                .map(|&b| if b { '1' } else { '0' })
                .collect();
            writeln!(f, "  {}: {}", reg.name, bits)?;
        }
        Ok(())
    }
}
