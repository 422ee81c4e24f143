//! The two verification procedures.
//!
//! Both report their outcomes instead of asserting them: a failed identity
//! is a result to print, not an error.

pub mod decomposition;
pub mod single_qubit;

pub use decomposition::{DecompositionReport, RotationGate};
pub use single_qubit::SingleQubitReport;
