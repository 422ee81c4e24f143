//! Equality of matrices up to an unknown global phase.
//!
//! Two matrices `A` (reference) and `B` (candidate) are considered equal up to
//! global phase when there is a unit scalar `e^{-iφ}` with `e^{-iφ}·B ≈ A`
//! elementwise. How `φ` is obtained is pluggable through [`PhaseEstimator`];
//! the two strategies have different guarantees and are kept separate:
//!
//! * [`InnerProductEstimate`] always produces a phase, but it is only an
//!   estimate. It recovers the exact phase when `B` is a phase multiple of
//!   `A`, and otherwise returns the phase of the best overlap, which may still
//!   fail the elementwise check.
//! * [`DiagonalExtraction`] reads the phase off `B·A†`, which is `e^{iφ}·I`
//!   whenever both operands are unitary and differ only by phase. If no
//!   diagonal entry is large enough to carry a phase it reports nothing, and
//!   the comparison is [`PhaseVerdict::Indeterminate`].

use log::debug;
use nalgebra::DMatrix;
use num_complex::Complex64;
use std::fmt;

/// Diagonal entries at or below this magnitude are skipped when extracting a phase.
pub const DEFAULT_DIAGONAL_THRESHOLD: f64 = 1e-8;

/// A strategy for recovering the relative phase between two matrices.
pub trait PhaseEstimator {
    /// Returns the name of the strategy.
    fn name(&self) -> &str;

    /// Returns `φ` such that `e^{-iφ}·candidate` should match `reference`,
    /// or `None` if the phase cannot be determined.
    fn estimate(&self, reference: &DMatrix<Complex64>, candidate: &DMatrix<Complex64>)
        -> Option<f64>;
}

/// Phase of the Frobenius inner product `Σ conj(aᵢ)·bᵢ`.
#[derive(Debug, Clone, Copy, Default)]
pub struct InnerProductEstimate;

impl PhaseEstimator for InnerProductEstimate {
    fn name(&self) -> &str {
        "inner-product"
    }

    fn estimate(
        &self,
        reference: &DMatrix<Complex64>,
        candidate: &DMatrix<Complex64>,
    ) -> Option<f64> {
        let overlap: Complex64 = reference
            .iter()
            .zip(candidate.iter())
            .map(|(a, b)| a.conj() * b)
            .sum();
        Some(overlap.arg())
    }
}

/// Phase of the first significant diagonal entry of `candidate · reference†`.
#[derive(Debug, Clone, Copy)]
pub struct DiagonalExtraction {
    pub threshold: f64,
}

impl DiagonalExtraction {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl Default for DiagonalExtraction {
    fn default() -> Self {
        Self::new(DEFAULT_DIAGONAL_THRESHOLD)
    }
}

impl PhaseEstimator for DiagonalExtraction {
    fn name(&self) -> &str {
        "diagonal-extraction"
    }

    fn estimate(
        &self,
        reference: &DMatrix<Complex64>,
        candidate: &DMatrix<Complex64>,
    ) -> Option<f64> {
        let product = candidate * reference.adjoint();
        product
            .diagonal()
            .iter()
            .find(|entry| entry.norm() > self.threshold)
            .map(|entry| entry.arg())
    }
}

/// Outcome of a global-phase comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseVerdict {
    /// Equal once the estimated phase is removed.
    Equivalent,
    /// A phase was found but the matrices still differ.
    NotEquivalent,
    /// No phase could be determined, so equality was not verified.
    Indeterminate,
}

impl PhaseVerdict {
    pub fn is_equivalent(&self) -> bool {
        matches!(self, PhaseVerdict::Equivalent)
    }
}

impl fmt::Display for PhaseVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhaseVerdict::Equivalent => write!(f, "equivalent"),
            PhaseVerdict::NotEquivalent => write!(f, "not equivalent"),
            PhaseVerdict::Indeterminate => write!(f, "indeterminate"),
        }
    }
}

/// Elementwise absolute comparison: every `|aᵢ - bᵢ| <= tolerance`.
///
/// Matrices of different shapes are never equal.
pub fn approx_equal(a: &DMatrix<Complex64>, b: &DMatrix<Complex64>, tolerance: f64) -> bool {
    a.shape() == b.shape()
        && a.iter()
            .zip(b.iter())
            .all(|(x, y)| (x - y).norm() <= tolerance)
}

/// Multiplies `matrix` by `e^{-iφ}`.
pub fn remove_phase(matrix: &DMatrix<Complex64>, phase: f64) -> DMatrix<Complex64> {
    let factor = Complex64::from_polar(1.0, -phase);
    matrix.map(|z| z * factor)
}

/// Estimates the phase of `candidate` relative to `reference` and removes it.
///
/// Returns the phase together with the de-phased candidate.
pub fn align_phase<E: PhaseEstimator + ?Sized>(
    reference: &DMatrix<Complex64>,
    candidate: &DMatrix<Complex64>,
    estimator: &E,
) -> Option<(f64, DMatrix<Complex64>)> {
    if reference.shape() != candidate.shape() {
        return None;
    }
    let phase = estimator.estimate(reference, candidate)?;
    debug!("{} phase estimate: {:.9} rad", estimator.name(), phase);
    Some((phase, remove_phase(candidate, phase)))
}

/// Decides whether `candidate` equals `reference` up to a global phase.
pub fn compare_up_to_phase<E: PhaseEstimator + ?Sized>(
    reference: &DMatrix<Complex64>,
    candidate: &DMatrix<Complex64>,
    estimator: &E,
    tolerance: f64,
) -> PhaseVerdict {
    if reference.shape() != candidate.shape() {
        return PhaseVerdict::NotEquivalent;
    }
    match align_phase(reference, candidate, estimator) {
        None => PhaseVerdict::Indeterminate,
        Some((_, aligned)) if approx_equal(reference, &aligned, tolerance) => {
            PhaseVerdict::Equivalent
        }
        Some(_) => PhaseVerdict::NotEquivalent,
    }
}
