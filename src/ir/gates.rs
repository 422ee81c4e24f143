use crate::error::{Error, Result};
use crate::linalg::rotation::u3;
use nalgebra::DMatrix;
use num_complex::Complex64;
use std::f64::consts::FRAC_PI_4;

/// Quantum Gate Types
///
/// This enum represents the set of supported quantum gates: the standard
/// single-qubit Clifford+T gates, parameterized rotations, the generic U3
/// rotation, and the controlled gates the backend can build and translate.
///
/// # Examples
///
/// ```
/// use q_decomp::ir::GateType;
/// let h_gate = GateType::H;
/// let u3_gate = GateType::U3(1.57, 0.0, 3.14);
/// assert_eq!(u3_gate.name(), "u3");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum GateType {
    /// Hadamard gate
    H,
    /// Pauli-X gate (NOT)
    X,
    /// Pauli-Y gate
    Y,
    /// Pauli-Z gate
    Z,
    /// S gate (sqrt(Z))
    S,
    /// S-dagger gate (inverse of S)
    Sdg,
    /// T gate (sqrt(S))
    T,
    /// T-dagger gate (inverse of T)
    Tdg,
    /// sqrt(X) gate
    SX,
    /// Inverse of sqrt(X)
    SXdg,
    /// Rotation around X-axis with angle theta
    RX(f64),
    /// Rotation around Y-axis with angle theta
    RY(f64),
    /// Rotation around Z-axis with angle theta
    RZ(f64),
    /// General single-qubit rotation U3(theta, phi, lambda)
    U3(f64, f64, f64),
    /// Controlled-NOT gate
    CX,
    /// Controlled-Z gate
    CZ,
    /// Swap gate
    SWAP,
    /// Toffoli gate (CCX)
    CCX,
    /// Doubly-controlled Z gate
    CCZ,
}

impl GateType {
    /// Resolves a lowercase gate name.
    ///
    /// `mcx` is accepted as an alias for the multi-controlled X on
    /// `num_qubits` qubits (`cx` for two, `ccx` for three).
    pub fn from_name(name: &str, params: &[f64], num_qubits: usize) -> Result<Self> {
        let param = |expected: usize| -> Result<()> {
            if params.len() == expected {
                Ok(())
            } else {
                Err(Error::ParamMismatch {
                    gate: name.to_string(),
                    expected,
                    actual: params.len(),
                })
            }
        };

        let gate = match name {
            "h" => GateType::H,
            "x" => GateType::X,
            "y" => GateType::Y,
            "z" => GateType::Z,
            "s" => GateType::S,
            "sdg" => GateType::Sdg,
            "t" => GateType::T,
            "tdg" => GateType::Tdg,
            "sx" => GateType::SX,
            "sxdg" => GateType::SXdg,
            "rx" => {
                param(1)?;
                GateType::RX(params[0])
            }
            "ry" => {
                param(1)?;
                GateType::RY(params[0])
            }
            "rz" => {
                param(1)?;
                GateType::RZ(params[0])
            }
            "u3" => {
                param(3)?;
                GateType::U3(params[0], params[1], params[2])
            }
            "cx" => GateType::CX,
            "cz" => GateType::CZ,
            "swap" => GateType::SWAP,
            "ccx" => GateType::CCX,
            "ccz" => GateType::CCZ,
            "mcx" => match num_qubits {
                2 => GateType::CX,
                3 => GateType::CCX,
                _ => return Err(Error::UnknownGate(format!("mcx on {} qubits", num_qubits))),
            },
            _ => return Err(Error::UnknownGate(name.to_string())),
        };
        if !matches!(gate, GateType::RX(_) | GateType::RY(_) | GateType::RZ(_) | GateType::U3(..)) {
            param(0)?;
        }
        Ok(gate)
    }

    /// Lowercase name, as used in basis sets.
    pub fn name(&self) -> &'static str {
        match self {
            GateType::H => "h",
            GateType::X => "x",
            GateType::Y => "y",
            GateType::Z => "z",
            GateType::S => "s",
            GateType::Sdg => "sdg",
            GateType::T => "t",
            GateType::Tdg => "tdg",
            GateType::SX => "sx",
            GateType::SXdg => "sxdg",
            GateType::RX(_) => "rx",
            GateType::RY(_) => "ry",
            GateType::RZ(_) => "rz",
            GateType::U3(..) => "u3",
            GateType::CX => "cx",
            GateType::CZ => "cz",
            GateType::SWAP => "swap",
            GateType::CCX => "ccx",
            GateType::CCZ => "ccz",
        }
    }

    /// Number of qubits the gate acts on.
    pub fn num_qubits(&self) -> usize {
        match self {
            GateType::CX | GateType::CZ | GateType::SWAP => 2,
            GateType::CCX | GateType::CCZ => 3,
            _ => 1,
        }
    }

    pub fn params(&self) -> Vec<f64> {
        match *self {
            GateType::RX(theta) | GateType::RY(theta) | GateType::RZ(theta) => vec![theta],
            GateType::U3(theta, phi, lambda) => vec![theta, phi, lambda],
            _ => Vec::new(),
        }
    }

    /// The gate's unitary on its own operands.
    ///
    /// Operand `j` is bit `j` of the row/column index, so for `CX` on
    /// `[control, target]` the control is the low bit.
    pub fn matrix(&self) -> DMatrix<Complex64> {
        let z = Complex64::new(0.0, 0.0);
        let o = Complex64::new(1.0, 0.0);
        let i = Complex64::new(0.0, 1.0);
        match *self {
            GateType::H => {
                let s = Complex64::new(1.0 / 2.0_f64.sqrt(), 0.0);
                DMatrix::from_row_slice(2, 2, &[s, s, s, -s])
            }
            GateType::X => DMatrix::from_row_slice(2, 2, &[z, o, o, z]),
            GateType::Y => DMatrix::from_row_slice(2, 2, &[z, -i, i, z]),
            GateType::Z => DMatrix::from_row_slice(2, 2, &[o, z, z, -o]),
            GateType::S => DMatrix::from_row_slice(2, 2, &[o, z, z, i]),
            GateType::Sdg => DMatrix::from_row_slice(2, 2, &[o, z, z, -i]),
            GateType::T => phase_gate(FRAC_PI_4),
            GateType::Tdg => phase_gate(-FRAC_PI_4),
            GateType::SX => {
                let (p, m) = (Complex64::new(0.5, 0.5), Complex64::new(0.5, -0.5));
                DMatrix::from_row_slice(2, 2, &[p, m, m, p])
            }
            GateType::SXdg => {
                let (p, m) = (Complex64::new(0.5, 0.5), Complex64::new(0.5, -0.5));
                DMatrix::from_row_slice(2, 2, &[m, p, p, m])
            }
            GateType::RX(theta) => {
                let (c, s) = ((theta / 2.0).cos(), (theta / 2.0).sin());
                let (c, s) = (Complex64::new(c, 0.0), Complex64::new(0.0, -s));
                DMatrix::from_row_slice(2, 2, &[c, s, s, c])
            }
            GateType::RY(theta) => {
                let (c, s) = ((theta / 2.0).cos(), (theta / 2.0).sin());
                let (c, s) = (Complex64::new(c, 0.0), Complex64::new(s, 0.0));
                DMatrix::from_row_slice(2, 2, &[c, -s, s, c])
            }
            GateType::RZ(theta) => DMatrix::from_row_slice(
                2,
                2,
                &[
                    Complex64::from_polar(1.0, -theta / 2.0),
                    z,
                    z,
                    Complex64::from_polar(1.0, theta / 2.0),
                ],
            ),
            GateType::U3(theta, phi, lambda) => u3(theta, phi, lambda),
            GateType::CX => permutation(4, 1, 3),
            GateType::SWAP => permutation(4, 1, 2),
            GateType::CCX => permutation(8, 3, 7),
            GateType::CZ => {
                let mut m = DMatrix::identity(4, 4);
                m[(3, 3)] = -o;
                m
            }
            GateType::CCZ => {
                let mut m = DMatrix::identity(8, 8);
                m[(7, 7)] = -o;
                m
            }
        }
    }

    /// Short label used when drawing circuits.
    pub fn label(&self) -> String {
        let params = self.params();
        if params.is_empty() {
            return self.name().to_uppercase();
        }
        let params: Vec<String> = params.into_iter().map(format_param).collect();
        format!("{}({})", self.name().to_uppercase(), params.join(","))
    }
}

fn phase_gate(lambda: f64) -> DMatrix<Complex64> {
    let mut m = DMatrix::identity(2, 2);
    m[(1, 1)] = Complex64::from_polar(1.0, lambda);
    m
}

/// Identity of dimension `dim` with basis states `a` and `b` exchanged.
fn permutation(dim: usize, a: usize, b: usize) -> DMatrix<Complex64> {
    let mut m = DMatrix::identity(dim, dim);
    m.swap_rows(a, b);
    m
}

fn format_param(value: f64) -> String {
    let text = format!("{:.4}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}
