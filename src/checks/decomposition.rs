use crate::backend::CircuitBackend;
use crate::config::CheckConfig;
use crate::error::Result;
use crate::ir::Circuit;
use crate::linalg::phase::{compare_up_to_phase, DiagonalExtraction, PhaseVerdict};
use crate::linalg::RotationParams;
use crate::transpiler::BasisGates;
use log::{info, warn};
use std::fmt;

/// A `u3` gate found in the decomposed circuit.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationGate {
    pub params: RotationParams,
    /// Resolved operand indices; `None` where the qubit could not be located.
    pub qubits: Vec<Option<usize>>,
}

impl fmt::Display for RotationGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let qubits: Vec<String> = self
            .qubits
            .iter()
            .map(|q| q.map_or_else(|| "unknown".to_string(), |i| i.to_string()))
            .collect();
        write!(
            f,
            "u3({:.6}, {:.6}, {:.6}) on qubits [{}]",
            self.params.theta,
            self.params.phi,
            self.params.lambda,
            qubits.join(", ")
        )
    }
}

/// Results of the Toffoli decomposition check.
#[derive(Debug, Clone)]
pub struct DecompositionReport {
    pub basis: BasisGates,
    pub optimization_level: u8,
    pub transpiled: Circuit,
    pub rotations: Vec<RotationGate>,
    pub verdict: PhaseVerdict,
}

/// Decomposes a Toffoli (controls 0 and 1, target 2) into the configured
/// basis and checks the result against the reference unitary.
///
/// Backend failures are returned as errors. An undeterminable phase is not an
/// error: it is reported as [`PhaseVerdict::Indeterminate`].
pub fn run<B: CircuitBackend + ?Sized>(
    backend: &B,
    config: &CheckConfig,
) -> Result<DecompositionReport> {
    let basis = config.basis_gates();
    let reference = backend.controlled_gate("ccx", 3)?;
    let transpiled = backend.transpile(&reference, &basis, config.optimization_level)?;

    let reference_unitary = backend.unitary(&reference)?;
    let transpiled_unitary = backend.unitary(&transpiled)?;
    let verdict = compare_up_to_phase(
        &reference_unitary,
        &transpiled_unitary,
        &DiagonalExtraction::new(config.diagonal_threshold),
        config.equivalence_tolerance,
    );
    match verdict {
        PhaseVerdict::Indeterminate => warn!("could not determine global phase of decomposition"),
        _ => info!("decomposition check: {}", verdict),
    }

    Ok(DecompositionReport {
        basis,
        optimization_level: config.optimization_level,
        rotations: collect_rotations(&transpiled),
        transpiled,
        verdict,
    })
}

/// Lists every `u3` instruction with its angles and resolved qubits.
pub fn collect_rotations(circuit: &Circuit) -> Vec<RotationGate> {
    circuit
        .data()
        .iter()
        .filter(|inst| inst.name == "u3")
        .filter_map(|inst| match inst.params[..] {
            [theta, phi, lambda] => Some(RotationGate {
                params: RotationParams::new(theta, phi, lambda),
                qubits: inst.qubits.iter().map(|q| circuit.qubit_index(q)).collect(),
            }),
            _ => None,
        })
        .collect()
}

impl fmt::Display for DecompositionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "=== Toffoli decomposition via transpile (basis: {}, optimization level {}) ===",
            self.basis, self.optimization_level
        )?;
        writeln!(f, "\nTranspiled circuit:")?;
        write!(f, "{}", self.transpiled)?;

        let counts: Vec<String> = self
            .transpiled
            .count_ops()
            .iter()
            .map(|(name, n)| format!("{}: {}", name, n))
            .collect();
        writeln!(f, "\nGate counts: {}", counts.join(", "))?;
        writeln!(f)?;
        for rotation in &self.rotations {
            writeln!(f, "{}", rotation)?;
        }

        match self.verdict {
            PhaseVerdict::Indeterminate => {
                write!(f, "\nCould not determine global phase for checking equality.")
            }
            verdict => write!(
                f,
                "\nAre the transpiled unitary and built-in CCX equal up to a global phase? {}",
                verdict.is_equivalent()
            ),
        }
    }
}
