// tests/vm_tests.rs

use logiq::core::{ClbitId, LogicalError, QubitId};
use logiq::operations::{Gate, Operation};
use logiq::substrate::Substrate;
use logiq::vm::{ClassicalExpr, Instruction, ProgramBuilder, QuantumVm};

// Helpers for id creation
fn qid(id: usize) -> QubitId {
    QubitId(id)
}

fn cid(id: usize) -> ClbitId {
    ClbitId(id)
}

#[test]
fn test_vm_conditional_quantum() -> Result<(), Box<dyn std::error::Error>> {
    println!("\n--- Test: VM Conditional Quantum Op ---");
    // Measure |+> on q0; flip q1 only when the outcome was 0.
    let program = ProgramBuilder::new()
        .with_qubits("q", 2)
        .with_clbits("m0", 1)
        .with_clbits("m1", 1)
        .add(Instruction::QuantumOp(Operation::gate(Gate::H, qid(0))))
        .add(Instruction::Measure { qubit: qid(0), clbit: cid(0) })
        .add(Instruction::IfElse {
            condition: ClassicalExpr::bit(cid(0)),
            then_branch: vec![],
            else_branch: vec![Instruction::QuantumOp(Operation::gate(Gate::X, qid(1)))],
        })
        .add(Instruction::Measure { qubit: qid(1), clbit: cid(1) })
        .build()?;

    println!("Program:\n{}", program);

    for seed in 0..8 {
        let result = QuantumVm::new().with_seed(seed).run(&program)?;
        let m0 = result.register_value("m0");
        let m1 = result.register_value("m1");
        assert_ne!(m0, m1, "m0 and m1 should be opposite (seed {})", seed);
    }
    Ok(())
}

#[test]
fn test_vm_same_seed_same_result() -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = ProgramBuilder::new();
    let q = builder.add_qubit_register("q", 4)?;
    let c = builder.add_clbit_register("c", 4)?;
    for i in 0..4 {
        builder.apply(Operation::gate(Gate::H, q.get(i)?))?;
        builder.measure(q.get(i)?, c.get(i)?)?;
    }
    let program = builder.build()?;

    let vm = QuantumVm::new().with_seed(1234);
    assert_eq!(vm.run(&program)?, vm.run(&program)?);
    Ok(())
}

#[test]
fn test_vm_bell_pair_correlation() -> Result<(), Box<dyn std::error::Error>> {
    let program = ProgramBuilder::new()
        .with_qubits("q", 2)
        .with_clbits("m", 2)
        .add(Instruction::QuantumOp(Operation::gate(Gate::H, qid(0))))
        .add(Instruction::QuantumOp(Operation::cx(qid(0), qid(1))))
        .add(Instruction::Measure { qubit: qid(0), clbit: cid(0) })
        .add(Instruction::Measure { qubit: qid(1), clbit: cid(1) })
        .build()?;

    for seed in 0..8 {
        let value = QuantumVm::new().with_seed(seed).run(&program)?.register_value("m");
        assert!(value == Some(0) || value == Some(3), "uncorrelated outcome {:?}", value);
    }
    Ok(())
}

#[test]
fn test_vm_reset_and_literal_writes() -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = ProgramBuilder::new();
    let q = builder.add_qubit_register("q", 1)?;
    let c = builder.add_clbit_register("c", 3)?;
    builder.apply(Operation::gate(Gate::X, q.get(0)?))?;
    builder.reset(q.get(0)?)?;
    builder.measure(q.get(0)?, c.get(0)?)?;
    builder.write_clbit(c.get(1)?, true)?;
    builder.flip_clbit(c.get(2)?)?;
    let program = builder.build()?;

    let result = QuantumVm::new().run(&program)?;
    assert_eq!(result.register("c"), Some(vec![false, true, true]));
    Ok(())
}

#[test]
fn test_vm_xor_condition() -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = ProgramBuilder::new();
    let q = builder.add_qubit_register("q", 2)?;
    let c = builder.add_clbit_register("c", 3)?;
    builder.apply(Operation::gate(Gate::X, q.get(0)?))?;
    builder.measure(q.get(0)?, c.get(0)?)?;
    builder.measure(q.get(1)?, c.get(1)?)?;
    builder.assign_clbit(c.get(2)?, ClassicalExpr::xor_all(&[c.get(0)?, c.get(1)?]))?;
    let program = builder.build()?;

    let result = QuantumVm::new().run(&program)?;
    assert_eq!(result.register("c"), Some(vec![true, false, true]));
    Ok(())
}

#[test]
fn test_vm_instruction_budget() -> Result<(), Box<dyn std::error::Error>> {
    let program = ProgramBuilder::new()
        .with_qubits("q", 1)
        .add_many((0..10).map(|_| Instruction::QuantumOp(Operation::gate(Gate::X, qid(0)))))
        .build()?;

    let err = QuantumVm::new().with_instruction_budget(5).run(&program).unwrap_err();
    assert!(matches!(err, LogicalError::SimulationError { .. }));
    assert_eq!(QuantumVm::new().run(&program)?.executed_instructions(), 10);
    Ok(())
}

#[test]
fn test_vm_rejects_bad_references() {
    let built = ProgramBuilder::new()
        .with_qubits("q", 1)
        .add(Instruction::QuantumOp(Operation::gate(Gate::X, qid(3))))
        .build();
    assert!(matches!(built, Err(LogicalError::ReferenceViolation { .. })));

    let mut builder = ProgramBuilder::new();
    assert!(builder.add_qubit_register("q", 1).is_ok());
    assert!(matches!(
        builder.add_qubit_register("q", 1),
        Err(LogicalError::InvalidInput { .. })
    ));
}
