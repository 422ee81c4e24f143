use nalgebra::DMatrix;
use num_complex::Complex64;

/// Lifts a gate matrix onto the full `num_qubits` register.
///
/// Basis states are little-endian: qubit `k` is bit `k` of the state index.
/// The gate matrix indexes its operands the same way, so `qubits[j]` is bit
/// `j` of the local index. Callers must pass distinct in-range qubits and a
/// `2^len × 2^len` gate.
pub fn embed(gate: &DMatrix<Complex64>, qubits: &[usize], num_qubits: usize) -> DMatrix<Complex64> {
    let dim = 1usize << num_qubits;
    let local_dim = 1usize << qubits.len();
    debug_assert_eq!(gate.shape(), (local_dim, local_dim));

    let mask = qubits.iter().fold(0usize, |m, &q| m | (1 << q));
    let mut full = DMatrix::zeros(dim, dim);
    for col in 0..dim {
        let local_in = gather(col, qubits);
        let rest = col & !mask;
        for local_out in 0..local_dim {
            full[(rest | scatter(local_out, qubits), col)] = gate[(local_out, local_in)];
        }
    }
    full
}

fn gather(index: usize, qubits: &[usize]) -> usize {
    qubits
        .iter()
        .enumerate()
        .fold(0, |acc, (j, &q)| acc | (((index >> q) & 1) << j))
}

fn scatter(local: usize, qubits: &[usize]) -> usize {
    qubits
        .iter()
        .enumerate()
        .fold(0, |acc, (j, &q)| acc | (((local >> j) & 1) << q))
}
