// src/circuits/mod.rs

//! Local-wire unitary circuits.
//!
//! A [`Circuit`] addresses its qubits as wires `QubitId(0)..QubitId(width)`.
//! Code-level circuits (the encoding circuit, logical operators) are built once
//! in this local frame and later placed onto concrete registers with
//! [`Circuit::on_wires`], optionally lifted to controlled form with
//! [`Circuit::controlled_by`].

use crate::core::{LogicalError, QubitId};
use crate::operations::{Gate, Operation};
use std::fmt;

/// An ordered sequence of operations on local wires.
#[derive(Clone, PartialEq, Eq)]
pub struct Circuit {
    /// One past the highest wire index, or the width requested at creation.
    width: usize,
    operations: Vec<Operation>,
}

impl Circuit {
    pub fn new() -> Self {
        Self::with_width(0)
    }

    /// Creates an empty circuit that already spans `width` wires.
    pub fn with_width(width: usize) -> Self {
        Self {
            width,
            operations: Vec::new(),
        }
    }

    /// Appends an operation, widening the circuit if it touches a new wire.
    pub fn add_operation(&mut self, op: Operation) {
        if let Some(max) = op.involved_qubits().iter().map(|q| q.0).max() {
            self.width = self.width.max(max + 1);
        }
        self.operations.push(op);
    }

    pub fn add_operations<I>(&mut self, ops: I)
    where
        I: IntoIterator<Item = Operation>,
    {
        for op in ops {
            self.add_operation(op);
        }
    }

    /// Appends every operation of `other` after this circuit's operations.
    pub fn compose(&self, other: &Circuit) -> Circuit {
        let mut composed = self.clone();
        composed.add_operations(other.operations.iter().cloned());
        composed
    }

    /// The controlled version of this circuit: every operation gains the
    /// extra `controls`. A controlled sequence equals the sequence of
    /// controlled steps, so no gate needs decomposing.
    pub fn controlled_by(&self, controls: &[QubitId]) -> Circuit {
        let mut lifted = Circuit::with_width(self.width);
        lifted.add_operations(self.operations.iter().map(|op| op.with_controls(controls)));
        lifted
    }

    /// Places the circuit on concrete qubits, wire `i` becoming `wires[i]`.
    ///
    /// # Errors
    /// `LogicalError::ReferenceViolation` if fewer wires than the circuit width are given.
    pub fn on_wires(&self, wires: &[QubitId]) -> Result<Vec<Operation>, LogicalError> {
        if wires.len() < self.width {
            return Err(LogicalError::ReferenceViolation {
                message: format!(
                    "Circuit spans {} wires but only {} qubits were supplied",
                    self.width,
                    wires.len()
                ),
            });
        }
        self.operations.iter().map(|op| op.map_qubits(wires)).collect()
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Number of operations applying `gate`, controlled or not.
    pub fn count_gate(&self, gate: Gate) -> usize {
        self.operations
            .iter()
            .filter(|op| op.applied_gate() == gate)
            .count()
    }
}

impl Default for Circuit {
    fn default() -> Self {
        Self::new()
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// Method-chaining construction of [`Circuit`]s on local wires.
///
/// ```
/// use logiq::CircuitBuilder;
///
/// let bell = CircuitBuilder::new().h(0).cx(0, 1).build();
/// assert_eq!(bell.len(), 2);
/// assert_eq!(bell.width(), 2);
/// ```
pub struct CircuitBuilder {
    circuit: Circuit,
}

impl CircuitBuilder {
    pub fn new() -> Self {
        Self {
            circuit: Circuit::new(),
        }
    }

    /// Starts from an empty circuit spanning `width` wires.
    pub fn with_width(width: usize) -> Self {
        Self {
            circuit: Circuit::with_width(width),
        }
    }

    pub fn add_op(mut self, op: Operation) -> Self {
        self.circuit.add_operation(op);
        self
    }

    pub fn add_ops<I>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = Operation>,
    {
        self.circuit.add_operations(ops);
        self
    }

    pub fn gate(self, gate: Gate, wire: usize) -> Self {
        self.add_op(Operation::gate(gate, QubitId(wire)))
    }

    pub fn x(self, wire: usize) -> Self {
        self.gate(Gate::X, wire)
    }

    pub fn z(self, wire: usize) -> Self {
        self.gate(Gate::Z, wire)
    }

    pub fn h(self, wire: usize) -> Self {
        self.gate(Gate::H, wire)
    }

    pub fn cx(self, control: usize, target: usize) -> Self {
        self.add_op(Operation::cx(QubitId(control), QubitId(target)))
    }

    pub fn cz(self, control: usize, target: usize) -> Self {
        self.add_op(Operation::cz(QubitId(control), QubitId(target)))
    }

    pub fn build(self) -> Circuit {
        self.circuit
    }
}

impl Default for CircuitBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operations.is_empty() {
            return writeln!(f, "logiq::Circuit[0 operations on {} wires]", self.width);
        }

        // --- Setup ---
        let ops = &self.operations;
        let num_ops = ops.len();
        let num_wires = self.width;
        let max_label_width = format!("{}", QubitId(num_wires.saturating_sub(1))).len();
        let label_padding = " ".repeat(max_label_width + 2);

        const GATE_WIDTH: usize = 7;
        const WIRE: &str = "───────";
        const V_WIRE: char = '│';
        const H_WIRE: char = '─';

        // op_grid[wire][time] holds the cell text, v_connect[wire][time] the connector below it
        let mut op_grid: Vec<Vec<String>> = vec![vec![WIRE.to_string(); num_ops]; num_wires];
        let mut v_connect: Vec<Vec<char>> = vec![vec![' '; num_ops]; num_wires];

        fn format_gate(symbol: &str) -> String {
            let slen = symbol.chars().count();
            if slen >= GATE_WIDTH {
                symbol.chars().take(GATE_WIDTH).collect()
            } else {
                let total_dashes = GATE_WIDTH - slen;
                let pre_dashes = total_dashes / 2;
                let post_dashes = total_dashes - pre_dashes;
                format!(
                    "{}{}{}",
                    H_WIRE.to_string().repeat(pre_dashes),
                    symbol,
                    H_WIRE.to_string().repeat(post_dashes)
                )
            }
        }

        // --- Populate Grids ---
        for (t, op) in ops.iter().enumerate() {
            match op {
                Operation::Gate { gate, target } => {
                    op_grid[target.0][t] = format_gate(gate.symbol());
                }
                Operation::Controlled {
                    gate,
                    controls,
                    target,
                } => {
                    for c in controls {
                        op_grid[c.0][t] = format_gate("@");
                    }
                    op_grid[target.0][t] = format_gate(gate.symbol());

                    let rows = controls.iter().chain(std::iter::once(target)).map(|q| q.0);
                    let r_min = rows.clone().min().unwrap_or(target.0);
                    let r_max = rows.max().unwrap_or(target.0);
                    for row_vec in v_connect.iter_mut().take(r_max).skip(r_min) {
                        row_vec[t] = V_WIRE;
                    }
                }
            }
        }

        // --- Format Output String ---
        writeln!(f, "logiq::Circuit[{} operations on {} wires]", num_ops, num_wires)?;
        for r in 0..num_wires {
            let label = format!("{}: ", QubitId(r));
            write!(f, "{:<width$}", label, width = max_label_width + 2)?;
            writeln!(f, "{}", op_grid[r].join(""))?;

            if r < num_wires - 1 {
                write!(f, "{}", label_padding)?;
                for t in 0..num_ops {
                    let connector = v_connect[r][t];
                    let padding_needed = GATE_WIDTH.saturating_sub(1);
                    let pre_pad = padding_needed / 2;
                    let post_pad = padding_needed - pre_pad;
                    write!(f, "{}{}{}", " ".repeat(pre_pad), connector, " ".repeat(post_pad))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
