use thiserror::Error;

/// Errors raised while building, transpiling or simulating circuits.
///
/// Check verdicts (including an indeterminate phase) are never errors; only
/// failures of the circuit backend or of configuration loading end up here.
#[derive(Debug, Error)]
pub enum Error {
    /// No gate is known under this name.
    #[error("unknown gate `{0}`")]
    UnknownGate(String),

    /// A gate was applied to a qubit the circuit does not have.
    #[error("qubit {index} is out of range for a {num_qubits}-qubit circuit")]
    QubitOutOfRange { index: usize, num_qubits: usize },

    /// A gate was given the wrong number of operands.
    #[error("gate `{gate}` acts on {expected} qubit(s), got {actual}")]
    ArityMismatch {
        gate: String,
        expected: usize,
        actual: usize,
    },

    /// A gate was given the same qubit twice.
    #[error("gate `{gate}` uses qubit {index} more than once")]
    DuplicateQubit { gate: String, index: usize },

    /// A gate was given the wrong number of parameters.
    #[error("gate `{gate}` takes {expected} parameter(s), got {actual}")]
    ParamMismatch {
        gate: String,
        expected: usize,
        actual: usize,
    },

    /// The target basis cannot express this gate.
    #[error("gate `{gate}` cannot be expressed in basis {basis}")]
    UnsupportedBasis { gate: String, basis: String },

    #[error("optimization level {0} is not supported (expected 0, 1 or 2)")]
    InvalidOptimizationLevel(u8),

    #[error("failed to read config `{path}`: {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
