#[cfg(test)]
mod tests {
    use q_decomp::backend::{CircuitBackend, NativeBackend};
    use q_decomp::checks::decomposition;
    use q_decomp::config::CheckConfig;
    use q_decomp::ir::{GateType, Operation};
    use q_decomp::linalg::{compare_up_to_phase, DiagonalExtraction, PhaseVerdict};
    use q_decomp::transpiler::BasisGates;

    fn toffoli_basis() -> BasisGates {
        BasisGates::new(["u3", "cx"])
    }

    #[test]
    fn test_toffoli_transpiles_to_equivalent_unitary() {
        let backend = NativeBackend::default();
        let ccx = backend.controlled_gate("ccx", 3).expect("Failed to build CCX");
        let transpiled = backend
            .transpile(&ccx, &toffoli_basis(), 0)
            .expect("Failed to transpile");

        for op in &transpiled.operations {
            match op {
                Operation::Gate { name, .. } => {
                    assert!(matches!(name, GateType::U3(..) | GateType::CX), "{:?}", name)
                }
                _ => panic!("Expected only gates"),
            }
        }

        let reference = backend.unitary(&ccx).unwrap();
        let decomposed = backend.unitary(&transpiled).unwrap();
        assert_eq!(decomposed.shape(), (8, 8));
        let verdict = compare_up_to_phase(
            &reference,
            &decomposed,
            &DiagonalExtraction::default(),
            1e-7,
        );
        assert_eq!(verdict, PhaseVerdict::Equivalent);
    }

    #[test]
    fn test_optimized_levels_stay_equivalent() {
        let backend = NativeBackend::default();
        let ccx = backend.controlled_gate("ccx", 3).unwrap();
        let reference = backend.unitary(&ccx).unwrap();
        let level0 = backend.transpile(&ccx, &toffoli_basis(), 0).unwrap();

        for level in 1..=2 {
            let optimized = backend.transpile(&ccx, &toffoli_basis(), level).unwrap();
            assert!(optimized.size() <= level0.size());
            let verdict = compare_up_to_phase(
                &reference,
                &backend.unitary(&optimized).unwrap(),
                &DiagonalExtraction::default(),
                1e-7,
            );
            assert!(verdict.is_equivalent(), "level {} broke the unitary", level);
        }
    }

    #[test]
    fn test_ccz_through_alternative_basis() {
        let backend = NativeBackend::default();
        let ccz = backend.controlled_gate("ccz", 3).unwrap();
        let basis = BasisGates::new(["h", "t", "tdg", "cx"]);
        let transpiled = backend.transpile(&ccz, &basis, 0).unwrap();
        assert!(transpiled
            .operations
            .iter()
            .all(|op| basis.contains(op.name())));
        let verdict = compare_up_to_phase(
            &backend.unitary(&ccz).unwrap(),
            &backend.unitary(&transpiled).unwrap(),
            &DiagonalExtraction::default(),
            1e-7,
        );
        assert!(verdict.is_equivalent());
    }

    #[test]
    fn test_decomposition_check_end_to_end() {
        let report = decomposition::run(&NativeBackend::default(), &CheckConfig::default())
            .expect("Decomposition check failed");
        assert_eq!(report.verdict, PhaseVerdict::Equivalent);
        assert_eq!(report.optimization_level, 0);
        assert!(!report.rotations.is_empty());
        for rotation in &report.rotations {
            assert!(rotation.params.is_finite());
            for qubit in &rotation.qubits {
                assert!(qubit.map_or(true, |q| q <= 2));
            }
        }
    }

    #[test]
    fn test_decomposition_check_with_optimization_from_config() {
        let config = CheckConfig::from_json(r#"{ "optimization_level": 1 }"#).unwrap();
        let report = decomposition::run(&NativeBackend::default(), &config).unwrap();
        assert_eq!(report.verdict, PhaseVerdict::Equivalent);
        assert!(report.rotations.len() <= 9);
    }
}
