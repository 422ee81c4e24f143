use nalgebra::DMatrix;
use num_complex::Complex64;

/// Magnitudes at or below this are treated as zero during parameter extraction.
const EPSILON: f64 = 1e-10;

/// The three Euler angles of a U3 rotation, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationParams {
    pub theta: f64,
    pub phi: f64,
    pub lambda: f64,
}

impl RotationParams {
    pub fn new(theta: f64, phi: f64, lambda: f64) -> Self {
        Self { theta, phi, lambda }
    }

    /// Builds the 2x2 unitary for these angles. See [`u3`].
    pub fn matrix(&self) -> DMatrix<Complex64> {
        u3(self.theta, self.phi, self.lambda)
    }

    /// Returns `true` if all three angles are finite.
    pub fn is_finite(&self) -> bool {
        self.theta.is_finite() && self.phi.is_finite() && self.lambda.is_finite()
    }
}

/// U3 rotation matrix.
///
/// ```text
/// [ cos(θ/2)            -e^{iλ} sin(θ/2)     ]
/// [ e^{iφ} sin(θ/2)      e^{i(φ+λ)} cos(θ/2) ]
/// ```
///
/// Every real input is valid.
///
/// # Examples
///
/// ```
/// use q_decomp::linalg::rotation::u3;
/// let m = u3(0.0, 0.0, 0.0);
/// assert!((m[(0, 0)].re - 1.0).abs() < 1e-12);
/// ```
pub fn u3(theta: f64, phi: f64, lambda: f64) -> DMatrix<Complex64> {
    let c = (theta / 2.0).cos();
    let s = (theta / 2.0).sin();
    DMatrix::from_row_slice(
        2,
        2,
        &[
            Complex64::new(c, 0.0),
            -Complex64::from_polar(s, lambda),
            Complex64::from_polar(s, phi),
            Complex64::from_polar(c, phi + lambda),
        ],
    )
}

/// Recovers U3 angles from a 2x2 unitary, up to global phase.
///
/// `theta` lands in `[0, π]`. When `theta` is 0 the split between `phi` and
/// `lambda` is arbitrary and `phi` is pinned to 0; when `theta` is π, `phi`
/// is pinned to 0 instead.
pub fn u3_params(matrix: &DMatrix<Complex64>) -> RotationParams {
    debug_assert_eq!(matrix.shape(), (2, 2));
    let a = matrix[(0, 0)];
    let b = matrix[(0, 1)];
    let c = matrix[(1, 0)];
    let d = matrix[(1, 1)];

    let theta = 2.0 * c.norm().atan2(a.norm());

    // Rotate so the pivot element is real and non-negative.
    let pivot = if a.norm() > EPSILON { a } else { c };
    let unphase = Complex64::from_polar(1.0, -pivot.arg());
    let b = b * unphase;
    let c = c * unphase;
    let d = d * unphase;

    if c.norm() <= EPSILON {
        return RotationParams::new(theta, 0.0, d.arg());
    }
    RotationParams::new(theta, c.arg(), (-b).arg())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::phase::{compare_up_to_phase, DiagonalExtraction};
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    fn close(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-12
    }

    #[test]
    fn test_u3_identity() {
        let m = u3(0.0, 0.0, 0.0);
        assert!(close(m[(0, 0)], c(1.0, 0.0)));
        assert!(close(m[(0, 1)], c(0.0, 0.0)));
        assert!(close(m[(1, 0)], c(0.0, 0.0)));
        assert!(close(m[(1, 1)], c(1.0, 0.0)));
    }

    #[test]
    fn test_u3_entries_follow_parametrization() {
        let (theta, phi, lambda) = (0.7, -1.3, 2.1);
        let m = u3(theta, phi, lambda);
        let (cos, sin) = ((theta / 2.0).cos(), (theta / 2.0).sin());
        assert!(close(m[(0, 0)], c(cos, 0.0)));
        assert!(close(m[(0, 1)], -Complex64::from_polar(1.0, lambda) * sin));
        assert!(close(m[(1, 0)], Complex64::from_polar(1.0, phi) * sin));
        assert!(close(m[(1, 1)], Complex64::from_polar(1.0, phi + lambda) * cos));
    }

    #[test]
    fn test_u3_hadamard() {
        let m = u3(FRAC_PI_2, 0.0, PI);
        let s = 1.0 / 2.0_f64.sqrt();
        assert!(close(m[(0, 0)], c(s, 0.0)));
        assert!(close(m[(0, 1)], c(s, 0.0)));
        assert!(close(m[(1, 0)], c(s, 0.0)));
        assert!(close(m[(1, 1)], c(-s, 0.0)));
    }

    #[test]
    fn test_u3_is_unitary() {
        let m = u3(1.1, 0.4, -2.9);
        assert!(crate::linalg::is_unitary(&m, 1e-12));
    }

    #[test]
    fn test_u3_params_recovers_matrix() {
        let cases = [
            (0.7, -1.3, 2.1),
            (FRAC_PI_2, 0.0, PI),
            (0.0, 0.0, FRAC_PI_4),
            (PI, FRAC_PI_2, FRAC_PI_2),
            (PI, 0.0, PI),
        ];
        for (theta, phi, lambda) in cases {
            let expected = u3(theta, phi, lambda);
            let rebuilt = u3_params(&expected).matrix();
            let verdict = compare_up_to_phase(
                &expected,
                &rebuilt,
                &DiagonalExtraction::default(),
                1e-9,
            );
            assert!(
                verdict.is_equivalent(),
                "u3({}, {}, {}) did not round-trip",
                theta,
                phi,
                lambda
            );
        }
    }

    #[test]
    fn test_u3_params_ignores_global_phase() {
        let phase = Complex64::from_polar(1.0, 1.234);
        let m = u3(0.9, 0.3, -0.5).map(|z| z * phase);
        let params = u3_params(&m);
        assert!((params.theta - 0.9).abs() < 1e-12);
        assert!((params.phi - 0.3).abs() < 1e-12);
        assert!((params.lambda + 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_is_finite() {
        assert!(RotationParams::new(1.0, 2.0, 3.0).is_finite());
        assert!(!RotationParams::new(f64::NAN, 2.0, 3.0).is_finite());
    }
}
