//! Translation of circuits into a restricted set of generator gates.
//!
//! Every gate outside the target basis is replaced by a fixed equivalent
//! sequence, and the replacement is expanded again until only basis gates
//! remain. The rules form a chain with no cycles (`ccz` -> `ccx` -> `cx` plus
//! one-qubit gates, named one-qubit gates -> `u3`), so expansion terminates.
//! `u3` and `cx` have no rule: they are the generators.

use super::pass::Pass;
use crate::error::{Error, Result};
use crate::ir::circuit::check_operands;
use crate::ir::{Circuit, GateType, Operation};
use log::debug;
use std::collections::BTreeSet;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};
use std::fmt;

/// Set of gate names a circuit may be expressed in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BasisGates(BTreeSet<String>);

impl BasisGates {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl fmt::Display for BasisGates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().collect();
        write!(f, "[{}]", names.join(", "))
    }
}

/// Rewrites every gate into the target basis.
pub struct BasisTranslator {
    basis: BasisGates,
}

impl BasisTranslator {
    pub fn new(basis: BasisGates) -> Self {
        Self { basis }
    }

    fn expand(&self, gate: &GateType, qubits: &[usize], out: &mut Circuit) -> Result<()> {
        if self.basis.contains(gate.name()) {
            out.add_op(Operation::gate(gate.clone(), qubits.to_vec()));
            return Ok(());
        }
        let rule = equivalent(gate, qubits).ok_or_else(|| Error::UnsupportedBasis {
            gate: gate.name().to_string(),
            basis: self.basis.to_string(),
        })?;
        debug!("expanding {} on {:?} into {} gates", gate.name(), qubits, rule.len());
        for (sub_gate, sub_qubits) in rule {
            self.expand(&sub_gate, &sub_qubits, out)?;
        }
        Ok(())
    }
}

impl Pass for BasisTranslator {
    fn name(&self) -> &str {
        "BasisTranslator"
    }

    fn run(&self, circuit: &Circuit) -> Result<Circuit> {
        let mut out = circuit.empty_like();
        for op in &circuit.operations {
            match op {
                Operation::Gate { name, qubits } => {
                    check_operands(name, qubits, circuit.num_qubits)?;
                    self.expand(name, qubits, &mut out)?
                }
                Operation::Barrier { .. } => out.add_op(op.clone()),
            }
        }
        Ok(out)
    }
}

/// Equivalent gate sequence for `gate` on `qubits`, or `None` for generators.
///
/// Sequences are exact up to global phase.
pub fn equivalent(gate: &GateType, qubits: &[usize]) -> Option<Vec<(GateType, Vec<usize>)>> {
    let u3 = |theta: f64, phi: f64, lambda: f64| {
        vec![(GateType::U3(theta, phi, lambda), qubits.to_vec())]
    };
    let rule = match *gate {
        GateType::H => u3(FRAC_PI_2, 0.0, PI),
        GateType::X => u3(PI, 0.0, PI),
        GateType::Y => u3(PI, FRAC_PI_2, FRAC_PI_2),
        GateType::Z => u3(0.0, 0.0, PI),
        GateType::S => u3(0.0, 0.0, FRAC_PI_2),
        GateType::Sdg => u3(0.0, 0.0, -FRAC_PI_2),
        GateType::T => u3(0.0, 0.0, FRAC_PI_4),
        GateType::Tdg => u3(0.0, 0.0, -FRAC_PI_4),
        GateType::SX => u3(FRAC_PI_2, -FRAC_PI_2, FRAC_PI_2),
        GateType::SXdg => u3(FRAC_PI_2, FRAC_PI_2, -FRAC_PI_2),
        GateType::RX(theta) => u3(theta, -FRAC_PI_2, FRAC_PI_2),
        GateType::RY(theta) => u3(theta, 0.0, 0.0),
        GateType::RZ(theta) => u3(0.0, 0.0, theta),
        GateType::U3(..) | GateType::CX => return None,
        GateType::CZ => {
            let (c, t) = (qubits[0], qubits[1]);
            vec![
                (GateType::H, vec![t]),
                (GateType::CX, vec![c, t]),
                (GateType::H, vec![t]),
            ]
        }
        GateType::SWAP => {
            let (a, b) = (qubits[0], qubits[1]);
            vec![
                (GateType::CX, vec![a, b]),
                (GateType::CX, vec![b, a]),
                (GateType::CX, vec![a, b]),
            ]
        }
        GateType::CCX => toffoli(qubits[0], qubits[1], qubits[2]),
        GateType::CCZ => {
            let (a, b, c) = (qubits[0], qubits[1], qubits[2]);
            vec![
                (GateType::H, vec![c]),
                (GateType::CCX, vec![a, b, c]),
                (GateType::H, vec![c]),
            ]
        }
    };
    Some(rule)
}

/// The standard 6-CNOT Toffoli network with controls `a`, `b` and target `c`.
fn toffoli(a: usize, b: usize, c: usize) -> Vec<(GateType, Vec<usize>)> {
    vec![
        (GateType::H, vec![c]),
        (GateType::CX, vec![b, c]),
        (GateType::Tdg, vec![c]),
        (GateType::CX, vec![a, c]),
        (GateType::T, vec![c]),
        (GateType::CX, vec![b, c]),
        (GateType::Tdg, vec![c]),
        (GateType::CX, vec![a, c]),
        (GateType::T, vec![b]),
        (GateType::T, vec![c]),
        (GateType::H, vec![c]),
        (GateType::CX, vec![a, b]),
        (GateType::T, vec![a]),
        (GateType::Tdg, vec![b]),
        (GateType::CX, vec![a, b]),
    ]
}
