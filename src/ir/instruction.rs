/// A handle to one qubit, as seen by consumers of [`Instruction`]s.
///
/// A handle may know where it lives in a named register, its flat index in
/// the circuit, both, or neither. Resolving it to a flat index goes through
/// [`Circuit::qubit_index`](super::Circuit::qubit_index).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Qubit {
    /// Owning register name and offset within that register.
    pub register: Option<(String, usize)>,
    /// Flat circuit-wide index, if the producer recorded one.
    pub index: Option<usize>,
}

impl Qubit {
    pub fn new(register: Option<(String, usize)>, index: Option<usize>) -> Self {
        Self { register, index }
    }

    /// A handle that only knows its register location.
    pub fn in_register(name: &str, offset: usize) -> Self {
        Self::new(Some((name.to_string(), offset)), None)
    }

    /// A handle that only knows its flat index.
    pub fn bare(index: usize) -> Self {
        Self::new(None, Some(index))
    }
}

/// One entry of a circuit's gate sequence: name, parameters and operands.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub name: String,
    pub params: Vec<f64>,
    pub qubits: Vec<Qubit>,
}
