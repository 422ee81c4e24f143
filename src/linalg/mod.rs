pub mod phase;
pub mod rotation;
pub mod unitary;

use nalgebra::DMatrix;
use num_complex::Complex64;

// Re-export for easier access
pub use phase::{
    approx_equal, compare_up_to_phase, DiagonalExtraction, InnerProductEstimate, PhaseEstimator,
    PhaseVerdict,
};
pub use rotation::{u3, RotationParams};

/// Returns `true` if `U·U† ≈ I` within `tolerance`.
pub fn is_unitary(matrix: &DMatrix<Complex64>, tolerance: f64) -> bool {
    let (rows, cols) = matrix.shape();
    rows == cols
        && approx_equal(
            &(matrix * matrix.adjoint()),
            &DMatrix::identity(rows, cols),
            tolerance,
        )
}

/// Formats a matrix row by row with entries rounded to 6 decimals.
///
/// ```text
/// [[0.707107+0.000000j, 0.000000-0.707107j],
///  [0.000000-0.707107j, 0.707107+0.000000j]]
/// ```
pub fn format_matrix(matrix: &DMatrix<Complex64>) -> String {
    let rows: Vec<String> = matrix
        .row_iter()
        .map(|row| {
            let entries: Vec<String> = row.iter().map(format_entry).collect();
            format!("[{}]", entries.join(", "))
        })
        .collect();
    format!("[{}]", rows.join(",\n "))
}

fn format_entry(z: &Complex64) -> String {
    let re = round6(z.re);
    let im = round6(z.im);
    let sign = if im.is_sign_negative() { '-' } else { '+' };
    format!("{:.6}{}{:.6}j", re, sign, im.abs())
}

// Rounds to 6 decimals and folds -0.0 into 0.0.
fn round6(x: f64) -> f64 {
    (x * 1e6).round() / 1e6 + 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_matrix_rounds_and_drops_negative_zero() {
        let m = DMatrix::from_row_slice(
            2,
            2,
            &[
                Complex64::new(1.0 / 2.0_f64.sqrt(), -1e-17),
                Complex64::new(-1e-12, -0.5),
                Complex64::new(0.0, 0.0),
                Complex64::new(-1.0, 0.25),
            ],
        );
        assert_eq!(
            format_matrix(&m),
            concat!(
                "[[0.707107+0.000000j, 0.000000-0.500000j],\n",
                " [0.000000+0.000000j, -1.000000+0.250000j]]"
            )
        );
    }

    #[test]
    fn test_is_unitary() {
        assert!(is_unitary(&u3(0.4, 1.0, -0.2), 1e-12));
        let scaled = u3(0.4, 1.0, -0.2).map(|z| z * 2.0);
        assert!(!is_unitary(&scaled, 1e-6));
        assert!(!is_unitary(&DMatrix::zeros(2, 3), 1e-6));
    }
}
