use crate::error::{Error, Result};
use crate::ir::circuit::check_operands;
use crate::ir::{Circuit, GateType, Operation};
use crate::linalg::unitary::embed;
use crate::transpiler::{self, BasisGates};
use log::debug;
use nalgebra::DMatrix;
use num_complex::Complex64;

/// The circuit-library boundary used by the checks.
///
/// Verification code only talks to this trait, so a different backend can
/// be substituted without touching the checks.
pub trait CircuitBackend {
    /// Builds a circuit holding the named multi-controlled gate on qubits
    /// `0..num_qubits`, with the last qubit as target.
    fn controlled_gate(&self, name: &str, num_qubits: usize) -> Result<Circuit>;

    /// Rewrites `circuit` into an equivalent one that only uses `basis` gates.
    ///
    /// `optimization_level` 0 applies no optimization.
    fn transpile(
        &self,
        circuit: &Circuit,
        basis: &BasisGates,
        optimization_level: u8,
    ) -> Result<Circuit>;

    /// Dense unitary of `circuit`, little-endian in the qubit index.
    fn unitary(&self, circuit: &Circuit) -> Result<DMatrix<Complex64>>;
}

/// In-process backend built on this crate's IR and transpiler.
#[derive(Debug, Clone)]
pub struct NativeBackend {
    pub name: String,
}

impl NativeBackend {
    pub fn new(name: String) -> Self {
        Self { name }
    }
}

impl Default for NativeBackend {
    fn default() -> Self {
        Self::new("native".to_string())
    }
}

impl CircuitBackend for NativeBackend {
    fn controlled_gate(&self, name: &str, num_qubits: usize) -> Result<Circuit> {
        let gate = GateType::from_name(name, &[], num_qubits)?;
        let mut circuit = Circuit::new(num_qubits);
        let qubits: Vec<usize> = (0..num_qubits).collect();
        circuit.apply(gate, &qubits)?;
        debug!("{}: built {} on {} qubits", self.name, name, num_qubits);
        Ok(circuit)
    }

    fn transpile(
        &self,
        circuit: &Circuit,
        basis: &BasisGates,
        optimization_level: u8,
    ) -> Result<Circuit> {
        debug!(
            "{}: transpiling {} gates to {} at level {}",
            self.name,
            circuit.size(),
            basis,
            optimization_level
        );
        transpiler::transpile(circuit, basis, optimization_level)
    }

    fn unitary(&self, circuit: &Circuit) -> Result<DMatrix<Complex64>> {
        let n = circuit.num_qubits;
        let dim = 1usize << n;
        let mut unitary = DMatrix::identity(dim, dim);
        for op in &circuit.operations {
            match op {
                Operation::Gate { name, qubits } => {
                    check_operands(name, qubits, n)?;
                    unitary = embed(&name.matrix(), qubits, n) * unitary;
                }
                Operation::Barrier { qubits } => {
                    if let Some(&index) = qubits.iter().find(|&&q| q >= n) {
                        return Err(Error::QubitOutOfRange {
                            index,
                            num_qubits: n,
                        });
                    }
                }
            }
        }
        Ok(unitary)
    }
}
