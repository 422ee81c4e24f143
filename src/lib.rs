//! Numeric verification of quantum gate decompositions.
//!
//! The crate checks two single-qubit U3 identities (√X squares to X, and its
//! adjoint has the expected parameters) and verifies that a Toffoli gate,
//! translated into the `{u3, cx}` basis, still implements the same unitary up
//! to a global phase.
//!
//! Circuit construction and basis translation live behind the
//! [`backend::CircuitBackend`] trait; [`backend::NativeBackend`] is the
//! in-process implementation.

pub mod backend;
pub mod checks;
pub mod config;
pub mod error;
pub mod ir;
pub mod linalg;
pub mod transpiler;

pub use error::{Error, Result};
