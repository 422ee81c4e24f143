pub mod circuit;
pub mod draw;
pub mod gates;
pub mod instruction;
pub mod operations;

// Re-export for easier access
pub use circuit::{Circuit, QuantumRegister};
pub use gates::GateType;
pub use instruction::{Instruction, Qubit};
pub use operations::Operation;
