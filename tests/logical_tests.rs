// tests/logical_tests.rs

use logiq::core::{CodeLabel, LogicalError, Pauli, StabilizerTableau};
use logiq::logical::QecCycleOptions;
use logiq::{
    Circuit, ExecutionResult, Gate, Instruction, LiteralWrite, LogicalConfig, LogicalProgramBuilder,
    Operation, ProgramBuilder, QuantumVm, QubitId, codes,
};

type Builder = LogicalProgramBuilder<ProgramBuilder>;

fn steane_builder(n_logical: usize) -> Result<Builder, LogicalError> {
    let (tableau, label) = codes::steane()?;
    LogicalProgramBuilder::new(ProgramBuilder::new(), n_logical, label, tableau)
}

fn run(builder: Builder, seed: u64) -> Result<ExecutionResult, LogicalError> {
    let program = builder.into_substrate().build()?;
    QuantumVm::new().with_seed(seed).run(&program)
}

#[test]
fn test_encode_and_measure_both_states() -> Result<(), Box<dyn std::error::Error>> {
    println!("\n--- Test: Steane encode + measure ---");
    for state in [0u8, 1] {
        for seed in [1u64, 7, 42] {
            let mut logical = steane_builder(1)?;
            logical.encode(&[0], 1, &[state])?;
            logical.measure(&[0], &[0])?;
            let result = run(logical, seed)?;

            assert_eq!(result.register_value("output"), Some(u64::from(state)));
            assert_eq!(result.register_value("cenc_verif0"), Some(0));
            assert_eq!(result.register_value("cpauli_frame0"), Some(0));
            assert_eq!(result.register_value("cprev_syndrome0"), Some(0));
        }
    }
    Ok(())
}

#[test]
fn test_qec_cycle_without_errors_leaves_frame_clear() -> Result<(), Box<dyn std::error::Error>> {
    let mut logical = steane_builder(1)?;
    logical.encode(&[0], 1, &[1])?;
    logical.perform_qec_cycle(&[0])?;
    logical.measure(&[0], &[0])?;
    let result = run(logical, 3)?;

    assert_eq!(result.register_value("output"), Some(1));
    assert_eq!(result.register_value("cpauli_frame0"), Some(0));
    assert_eq!(result.register_value("cflagged_syndrome_diff0"), Some(0));
    Ok(())
}

#[test]
fn test_bit_flip_is_tracked_in_pauli_frame() -> Result<(), Box<dyn std::error::Error>> {
    println!("\n--- Test: X error on qubit 4 ---");
    for state in [0u8, 1] {
        let mut logical = steane_builder(1)?;
        logical.encode(&[0], 1, &[state])?;
        logical.inject_error(0, 4, Pauli::X)?;
        // Empty selection means every logical qubit.
        logical.perform_qec_cycle(&[])?;
        logical.measure(&[0], &[0])?;
        let result = run(logical, 11)?;
        println!("{}", result);

        assert_eq!(result.register("cpauli_frame0"), Some(vec![false, true]));
        assert_eq!(result.register_value("output"), Some(u64::from(state)));
    }
    Ok(())
}

#[test]
fn test_phase_flip_leaves_z_readout_untouched() -> Result<(), Box<dyn std::error::Error>> {
    let mut logical = steane_builder(1)?;
    logical.encode(&[0], 1, &[1])?;
    logical.inject_error(0, 2, Pauli::Z)?;
    logical.measure(&[0], &[0])?;
    let result = run(logical, 5)?;
    assert_eq!(result.register_value("output"), Some(1));
    Ok(())
}

#[test]
fn test_ancilla_pair_literal_writes() -> Result<(), Box<dyn std::error::Error>> {
    let (tableau, label) = codes::steane()?;
    let substrate = ProgramBuilder::with_literal_write(LiteralWrite::AncillaPair)?;
    let mut logical = LogicalProgramBuilder::new(substrate, 1, label, tableau)?;
    logical.encode(&[0], 1, &[1])?;
    logical.inject_error(0, 4, Pauli::X)?;
    logical.perform_qec_cycle(&[0])?;
    logical.measure(&[0], &[0])?;

    let program = logical.into_substrate().build()?;
    assert!(program.qubit_register("literal").is_some());
    let result = QuantumVm::new().run(&program)?;
    assert_eq!(result.register("cpauli_frame0"), Some(vec![false, true]));
    assert_eq!(result.register_value("output"), Some(1));
    Ok(())
}

#[test]
fn test_logical_pauli_gates() -> Result<(), Box<dyn std::error::Error>> {
    let mut logical = steane_builder(1)?;
    logical.encode(&[0], 1, &[0])?;
    logical.x(&[0])?;
    logical.z(&[0])?;
    logical.s(&[0])?;
    logical.measure(&[0], &[0])?;
    assert_eq!(run(logical, 9)?.register_value("output"), Some(1));

    let mut logical = steane_builder(1)?;
    logical.encode(&[0], 1, &[0])?;
    logical.y(&[0])?;
    logical.measure(&[0], &[0])?;
    assert_eq!(run(logical, 9)?.register_value("output"), Some(1));
    Ok(())
}

#[test]
fn test_hadamard_methods() -> Result<(), Box<dyn std::error::Error>> {
    let mut logical = steane_builder(1)?;
    logical.encode(&[0], 1, &[0])?;
    let before = logical.substrate().instruction_count();
    logical.h_with_method(&[0], "LCU")?;
    assert!(logical.substrate().instruction_count() > before);

    let after = logical.substrate().instruction_count();
    let err = logical.h_with_method(&[0], "transversal").unwrap_err();
    assert!(matches!(err, LogicalError::Unsupported { .. }));
    assert_eq!(logical.substrate().instruction_count(), after);

    logical.h(&[0])?;
    logical.measure(&[0], &[0])?;
    let output = run(logical, 13)?.register_value("output");
    assert!(output == Some(0) || output == Some(1));
    Ok(())
}

#[test]
fn test_retry_ladder_adds_conditional_attempts() -> Result<(), Box<dyn std::error::Error>> {
    let mut once = steane_builder(1)?;
    once.encode(&[0], 1, &[0])?;
    let mut thrice = steane_builder(1)?;
    thrice.encode(&[0], 3, &[0])?;

    let once = once.into_substrate().build()?;
    let thrice = thrice.into_substrate().build()?;
    assert_eq!(thrice.branch_count() - once.branch_count(), 2);
    assert!(thrice.total_instruction_count() > once.total_instruction_count());
    Ok(())
}

#[test]
fn test_encode_rejects_bad_arguments() -> Result<(), Box<dyn std::error::Error>> {
    let mut logical = steane_builder(1)?;
    let before = logical.substrate().instruction_count();

    let err = logical.encode(&[0], 1, &[0, 1]).unwrap_err();
    assert!(matches!(err, LogicalError::InvalidInput { .. }));
    let err = logical.encode(&[0], 1, &[2]).unwrap_err();
    assert!(matches!(err, LogicalError::InvalidInput { .. }));
    let err = logical.encode(&[0], 0, &[0]).unwrap_err();
    assert!(matches!(err, LogicalError::InvalidInput { .. }));
    let err = logical.encode(&[3], 1, &[0]).unwrap_err();
    assert!(matches!(err, LogicalError::InvalidInput { .. }));

    assert_eq!(logical.substrate().instruction_count(), before);
    Ok(())
}

#[test]
fn test_mcmt_validation_and_emission() -> Result<(), Box<dyn std::error::Error>> {
    let mut logical = steane_builder(2)?;
    let before = logical.substrate().instruction_count();

    let err = logical.mcmt(&[0], &[0, 1]).unwrap_err();
    assert!(matches!(err, LogicalError::InvalidInput { .. }));
    let err = logical.mcmt(&[], &[1]).unwrap_err();
    assert!(matches!(err, LogicalError::InvalidInput { .. }));
    assert_eq!(logical.substrate().instruction_count(), before);

    logical.cx(0, &[1])?;
    // Steane's logical X touches three qubits, each controlled by all 7 of block 0.
    assert_eq!(logical.substrate().instruction_count(), before + 3);
    Ok(())
}

#[test]
fn test_cx_controls_on_every_physical_qubit() -> Result<(), Box<dyn std::error::Error>> {
    let mut logical = steane_builder(2)?;
    logical.cx(0, &[1])?;
    let program = logical.into_substrate().build()?;

    // Block 0 holds q0..q6; block 1 starts after its 3 ancillas and helper, at q11.
    let controls: Vec<QubitId> = (0..7).map(QubitId).collect();
    let expected: Vec<Instruction> = [15, 16, 17]
        .into_iter()
        .map(|t| {
            Instruction::QuantumOp(Operation::Controlled {
                gate: Gate::X,
                controls: controls.clone(),
                target: QubitId(t),
            })
        })
        .collect();
    assert_eq!(program.instructions(), expected.as_slice());
    Ok(())
}

#[test]
fn test_small_codes_need_matching_config() -> Result<(), Box<dyn std::error::Error>> {
    let (tableau, label) = codes::five_qubit()?;
    let err = LogicalProgramBuilder::new(ProgramBuilder::new(), 1, label, tableau.clone())
        .unwrap_err();
    assert!(matches!(err, LogicalError::Construction { .. }));

    let config = LogicalConfig::default()
        .with_verification_qubits(vec![0, 1])
        .with_readout_qubits(vec![0]);
    let logical = LogicalProgramBuilder::with_config(ProgramBuilder::new(), 1, label, tableau, config)?;
    assert_eq!(logical.code().num_qubits(), 5);
    Ok(())
}

#[test]
fn test_measure_argument_checks() -> Result<(), Box<dyn std::error::Error>> {
    let mut logical = steane_builder(1)?;
    let err = logical.measure(&[0], &[]).unwrap_err();
    assert!(matches!(err, LogicalError::InvalidInput { .. }));
    let err = logical.measure(&[0], &[5]).unwrap_err();
    assert!(matches!(err, LogicalError::ReferenceViolation { .. }));
    Ok(())
}

#[test]
fn test_additional_logical_qubits_get_fresh_registers() -> Result<(), Box<dyn std::error::Error>> {
    let mut logical = steane_builder(1)?;
    let added = logical.add_logical_qubits(2)?;
    assert_eq!(added, 1..3);
    assert_eq!(logical.num_logical_qubits(), 3);

    let program = logical.into_substrate().build()?;
    assert!(program.qubit_register("qlog2").is_some());
    // 7 data + 3 ancilla + 1 helper per block.
    assert_eq!(program.num_qubits(), 33);
    Ok(())
}

#[test]
fn test_unsupported_entry_points() -> Result<(), Box<dyn std::error::Error>> {
    let (tableau, label) = codes::steane()?;
    let err = Builder::from_physical_circuit(&Circuit::new(), label, tableau).unwrap_err();
    assert!(matches!(err, LogicalError::Unsupported { .. }));

    let mut logical = steane_builder(1)?;
    let err = logical.configure_qec_cycle(QecCycleOptions::default()).unwrap_err();
    assert!(matches!(err, LogicalError::Unsupported { .. }));
    Ok(())
}

#[test]
fn test_inconsistent_label_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let tableau = StabilizerTableau::new(&["XXXX", "ZZZZ"])?;
    let err = LogicalProgramBuilder::new(ProgramBuilder::new(), 1, CodeLabel::new(4, 1, 2), tableau)
        .unwrap_err();
    assert!(matches!(err, LogicalError::Construction { .. }));
    Ok(())
}
