//! Peephole optimizations applied after basis translation.

use super::pass::Pass;
use crate::error::Result;
use crate::ir::circuit::check_operands;
use crate::ir::{Circuit, GateType, Operation};
use crate::linalg::rotation::u3_params;
use nalgebra::DMatrix;
use num_complex::Complex64;
use std::collections::BTreeMap;

/// Tolerance for deciding a merged rotation is the identity.
const EPSILON: f64 = 1e-9;

/// Merges runs of consecutive `u3` gates on the same qubit.
///
/// Each run is multiplied out and re-emitted as a single `u3`; runs that
/// multiply to the identity (up to global phase) are dropped. Any other
/// operation touching a qubit ends the run on that qubit.
#[derive(Debug, Default)]
pub struct Optimize1qGates;

impl Pass for Optimize1qGates {
    fn name(&self) -> &str {
        "Optimize1qGates"
    }

    fn run(&self, circuit: &Circuit) -> Result<Circuit> {
        let mut out = circuit.empty_like();
        let mut pending: BTreeMap<usize, DMatrix<Complex64>> = BTreeMap::new();

        for op in &circuit.operations {
            if let Operation::Gate {
                name: gate @ GateType::U3(..),
                qubits,
            } = op
            {
                check_operands(gate, qubits, circuit.num_qubits)?;
                let q = qubits[0];
                let merged = match pending.remove(&q) {
                    Some(acc) => gate.matrix() * acc,
                    None => gate.matrix(),
                };
                pending.insert(q, merged);
                continue;
            }
            for q in op.qubits() {
                if let Some(acc) = pending.remove(q) {
                    flush(&mut out, *q, &acc);
                }
            }
            out.add_op(op.clone());
        }
        for (q, acc) in pending {
            flush(&mut out, q, &acc);
        }
        Ok(out)
    }
}

fn flush(out: &mut Circuit, qubit: usize, matrix: &DMatrix<Complex64>) {
    if is_identity_up_to_phase(matrix) {
        return;
    }
    let p = u3_params(matrix);
    out.add_op(Operation::gate(GateType::U3(p.theta, p.phi, p.lambda), vec![qubit]));
}

fn is_identity_up_to_phase(m: &DMatrix<Complex64>) -> bool {
    m[(0, 1)].norm() < EPSILON
        && m[(1, 0)].norm() < EPSILON
        && (m[(0, 0)] - m[(1, 1)]).norm() < EPSILON
}

/// Removes back-to-back identical `cx` pairs.
///
/// Two `cx` gates with the same control and target cancel when no operation
/// in between touches either qubit. Runs to a fixed point, so nested pairs
/// (`cx a,b; cx c,d; cx c,d; cx a,b`) disappear too.
#[derive(Debug, Default)]
pub struct CancelAdjacentCx;

impl Pass for CancelAdjacentCx {
    fn name(&self) -> &str {
        "CancelAdjacentCx"
    }

    fn run(&self, circuit: &Circuit) -> Result<Circuit> {
        let mut out = circuit.clone();
        while cancel_one_pair(&mut out.operations) {}
        Ok(out)
    }
}

fn cancel_one_pair(ops: &mut Vec<Operation>) -> bool {
    for i in 0..ops.len() {
        let Operation::Gate {
            name: GateType::CX,
            qubits,
        } = &ops[i]
        else {
            continue;
        };
        let next = ops[i + 1..]
            .iter()
            .position(|op| op.qubits().iter().any(|q| qubits.contains(q)));
        if let Some(offset) = next {
            let j = i + 1 + offset;
            if ops[j] == ops[i] {
                ops.remove(j);
                ops.remove(i);
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::linalg::phase::{compare_up_to_phase, DiagonalExtraction};
    use crate::linalg::unitary::embed;

    fn unitary(circuit: &Circuit) -> DMatrix<Complex64> {
        let dim = 1 << circuit.num_qubits;
        circuit
            .operations
            .iter()
            .fold(DMatrix::identity(dim, dim), |acc, op| match op {
                Operation::Gate { name, qubits } => {
                    embed(&name.matrix(), qubits, circuit.num_qubits) * acc
                }
                Operation::Barrier { .. } => acc,
            })
    }

    fn assert_same_unitary(a: &Circuit, b: &Circuit) {
        let verdict =
            compare_up_to_phase(&unitary(a), &unitary(b), &DiagonalExtraction::default(), 1e-9);
        assert!(verdict.is_equivalent());
    }

    #[test]
    fn test_merges_consecutive_u3() {
        let mut circuit = Circuit::new(1);
        circuit.apply(GateType::U3(0.3, 0.1, 0.2), &[0]).unwrap();
        circuit.apply(GateType::U3(1.1, -0.4, 0.9), &[0]).unwrap();
        circuit.apply(GateType::U3(0.0, 0.0, 0.5), &[0]).unwrap();
        let out = Optimize1qGates.run(&circuit).unwrap();
        assert_eq!(out.size(), 1);
        assert_same_unitary(&circuit, &out);
    }

    #[test]
    fn test_drops_identity_runs() {
        let mut circuit = Circuit::new(1);
        circuit.apply(GateType::U3(0.0, 0.0, 0.25), &[0]).unwrap();
        circuit.apply(GateType::U3(0.0, 0.0, -0.25), &[0]).unwrap();
        let out = Optimize1qGates.run(&circuit).unwrap();
        assert_eq!(out.size(), 0);
    }

    #[test]
    fn test_runs_are_broken_by_other_gates() {
        let mut circuit = Circuit::new(2);
        circuit.apply(GateType::U3(0.3, 0.0, 0.0), &[0]).unwrap();
        circuit.apply(GateType::U3(0.2, 0.0, 0.0), &[1]).unwrap();
        circuit.apply(GateType::CX, &[0, 1]).unwrap();
        circuit.apply(GateType::U3(0.4, 0.0, 0.0), &[0]).unwrap();
        circuit.apply(GateType::U3(0.5, 0.0, 0.0), &[0]).unwrap();
        let out = Optimize1qGates.run(&circuit).unwrap();
        assert_eq!(out.count_ops().get("u3"), Some(&3));
        assert_eq!(out.count_ops().get("cx"), Some(&1));
        assert_same_unitary(&circuit, &out);
    }

    #[test]
    fn test_u3_without_operand_is_an_error() {
        let mut circuit = Circuit::new(1);
        circuit.add_op(Operation::gate(GateType::U3(0.1, 0.2, 0.3), vec![]));
        assert!(matches!(
            Optimize1qGates.run(&circuit),
            Err(Error::ArityMismatch { expected: 1, actual: 0, .. })
        ));
    }

    #[test]
    fn test_cancels_adjacent_cx_pairs() {
        let mut circuit = Circuit::new(3);
        circuit.apply(GateType::CX, &[0, 1]).unwrap();
        circuit.apply(GateType::CX, &[1, 2]).unwrap();
        circuit.apply(GateType::CX, &[1, 2]).unwrap();
        circuit.apply(GateType::CX, &[0, 1]).unwrap();
        let out = CancelAdjacentCx.run(&circuit).unwrap();
        assert_eq!(out.size(), 0);
    }

    #[test]
    fn test_keeps_cx_pairs_separated_by_other_gates() {
        let mut circuit = Circuit::new(2);
        circuit.apply(GateType::CX, &[0, 1]).unwrap();
        circuit.apply(GateType::U3(0.1, 0.0, 0.0), &[1]).unwrap();
        circuit.apply(GateType::CX, &[0, 1]).unwrap();
        circuit.apply(GateType::CX, &[1, 0]).unwrap();
        let out = CancelAdjacentCx.run(&circuit).unwrap();
        assert_eq!(out.size(), 4);
    }
}
