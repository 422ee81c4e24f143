use super::gates::GateType;

/// Represents a single operation in the quantum circuit.
///
/// Only unitary operations exist here: gates, and barriers that fence off
/// optimization passes without changing the unitary.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// A quantum gate application.
    Gate {
        /// Type of the gate (e.g., U3, CX), including its parameters.
        name: GateType,
        /// Indices of the qubits involved, in operand order.
        qubits: Vec<usize>,
    },
    /// A barrier to prevent optimizations across a boundary.
    Barrier {
        /// Indices of the qubits involved in the barrier.
        qubits: Vec<usize>,
    },
}

impl Operation {
    pub fn gate(name: GateType, qubits: Vec<usize>) -> Self {
        Operation::Gate { name, qubits }
    }

    /// Qubits touched by this operation.
    pub fn qubits(&self) -> &[usize] {
        match self {
            Operation::Gate { qubits, .. } | Operation::Barrier { qubits } => qubits,
        }
    }

    /// Name as it appears in instruction listings and gate counts.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Gate { name, .. } => name.name(),
            Operation::Barrier { .. } => "barrier",
        }
    }

    pub fn params(&self) -> Vec<f64> {
        match self {
            Operation::Gate { name, .. } => name.params(),
            Operation::Barrier { .. } => Vec::new(),
        }
    }
}
