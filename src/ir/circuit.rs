use super::gates::GateType;
use super::instruction::{Instruction, Qubit};
use super::operations::Operation;
use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// A named, contiguous block of qubits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantumRegister {
    pub name: String,
    pub size: usize,
}

impl QuantumRegister {
    pub fn new(name: &str, size: usize) -> Self {
        Self {
            name: name.to_string(),
            size,
        }
    }
}

/// Intermediate Representation of a Quantum Circuit.
///
/// A `Circuit` consists of a sequence of operations over `num_qubits` qubits,
/// which are laid out register by register in declaration order.
#[derive(Debug, Clone, Default)]
pub struct Circuit {
    /// Total number of qubits in the circuit.
    pub num_qubits: usize,
    /// Quantum registers, in declaration order.
    pub qregs: Vec<QuantumRegister>,
    /// Sequence of operations (gates, barriers).
    pub operations: Vec<Operation>,
}

impl Circuit {
    /// Creates a new empty circuit with a single register `q`.
    ///
    /// # Arguments
    ///
    /// * `num_qubits` - The number of qubits to allocate.
    pub fn new(num_qubits: usize) -> Self {
        Self::with_registers(vec![QuantumRegister::new("q", num_qubits)])
    }

    /// Creates a new empty circuit from a list of registers.
    pub fn with_registers(qregs: Vec<QuantumRegister>) -> Self {
        Self {
            num_qubits: qregs.iter().map(|r| r.size).sum(),
            qregs,
            operations: Vec::new(),
        }
    }

    /// Returns an empty circuit over the same qubits and registers.
    pub fn empty_like(&self) -> Self {
        Self {
            num_qubits: self.num_qubits,
            qregs: self.qregs.clone(),
            operations: Vec::new(),
        }
    }

    /// Adds an operation to the circuit without validating it.
    pub fn add_op(&mut self, op: Operation) {
        self.operations.push(op);
    }

    /// Appends `gate` on `qubits` after checking arity and range.
    pub fn apply(&mut self, gate: GateType, qubits: &[usize]) -> Result<()> {
        check_operands(&gate, qubits, self.num_qubits)?;
        self.add_op(Operation::gate(gate, qubits.to_vec()));
        Ok(())
    }

    /// Number of gate operations (barriers excluded).
    pub fn size(&self) -> usize {
        self.operations
            .iter()
            .filter(|op| matches!(op, Operation::Gate { .. }))
            .count()
    }

    /// Gate counts by name, sorted by name.
    pub fn count_ops(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for op in &self.operations {
            *counts.entry(op.name()).or_insert(0) += 1;
        }
        counts
    }

    /// Handle for the qubit at flat index `index`.
    pub fn bit(&self, index: usize) -> Qubit {
        let mut start = 0;
        for reg in &self.qregs {
            if index < start + reg.size {
                return Qubit::new(Some((reg.name.clone(), index - start)), Some(index));
            }
            start += reg.size;
        }
        Qubit::bare(index)
    }

    /// Resolves a handle through the register table.
    pub fn find_bit(&self, qubit: &Qubit) -> Option<usize> {
        let (name, offset) = qubit.register.as_ref()?;
        let mut start = 0;
        for reg in &self.qregs {
            if &reg.name == name {
                return (*offset < reg.size).then_some(start + offset);
            }
            start += reg.size;
        }
        None
    }

    /// Flat index of a qubit handle.
    ///
    /// Looks the handle up in the register table first, then falls back to
    /// the index the handle carries itself. `None` means neither worked.
    pub fn qubit_index(&self, qubit: &Qubit) -> Option<usize> {
        self.find_bit(qubit)
            .or(qubit.index)
            .filter(|&index| index < self.num_qubits)
    }

    /// The gate sequence as `(name, params, qubits)` instructions.
    pub fn data(&self) -> Vec<Instruction> {
        self.operations
            .iter()
            .map(|op| Instruction {
                name: op.name().to_string(),
                params: op.params(),
                qubits: op.qubits().iter().map(|&q| self.bit(q)).collect(),
            })
            .collect()
    }
}

/// Validates operand count, range and distinctness for `gate`.
pub(crate) fn check_operands(gate: &GateType, qubits: &[usize], num_qubits: usize) -> Result<()> {
    if qubits.len() != gate.num_qubits() {
        return Err(Error::ArityMismatch {
            gate: gate.name().to_string(),
            expected: gate.num_qubits(),
            actual: qubits.len(),
        });
    }
    for (pos, &index) in qubits.iter().enumerate() {
        if index >= num_qubits {
            return Err(Error::QubitOutOfRange { index, num_qubits });
        }
        if qubits[..pos].contains(&index) {
            return Err(Error::DuplicateQubit {
                gate: gate.name().to_string(),
                index,
            });
        }
    }
    Ok(())
}
