//! Plain-text circuit drawing.
//!
//! One wire per qubit and one column per operation:
//!
//! ```text
//! q_0: ───■───
//! q_1: ───■───
//! q_2: ─H─X─H─
//! ```

use super::circuit::Circuit;
use super::gates::GateType;
use super::operations::Operation;
use std::fmt;

const WIRE: char = '─';

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = (0..self.num_qubits)
            .map(|q| match self.bit(q).register {
                Some((reg, offset)) => format!("{}_{}", reg, offset),
                None => format!("q_{}", q),
            })
            .collect();
        let pad = names.iter().map(|n| n.chars().count()).max().unwrap_or(0);

        let mut rows: Vec<String> = names
            .iter()
            .map(|name| format!("{:>pad$}: {}", name, WIRE, pad = pad))
            .collect();

        for op in &self.operations {
            let cells = column(op, self.num_qubits);
            let width = cells.iter().map(|c| c.chars().count()).max().unwrap_or(1);
            for (row, cell) in rows.iter_mut().zip(cells) {
                row.push_str(&center(&cell, width));
                row.push(WIRE);
            }
        }

        for row in rows {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

fn column(op: &Operation, num_qubits: usize) -> Vec<String> {
    let mut cells = vec![WIRE.to_string(); num_qubits];
    let qubits = op.qubits();
    let mut set = |q: usize, text: &str| {
        if let Some(cell) = cells.get_mut(q) {
            *cell = text.to_string();
        }
    };

    match op {
        Operation::Barrier { .. } => qubits.iter().for_each(|&q| set(q, "░")),
        Operation::Gate { name, .. } => {
            // Wires between the outermost operands are crossed by the gate.
            if let (Some(&lo), Some(&hi)) = (qubits.iter().min(), qubits.iter().max()) {
                for q in lo + 1..hi {
                    set(q, "┼");
                }
            }
            match name {
                GateType::CX | GateType::CCX => {
                    if let Some((target, controls)) = qubits.split_last() {
                        controls.iter().for_each(|&q| set(q, "■"));
                        set(*target, "X");
                    }
                }
                GateType::CZ | GateType::CCZ => qubits.iter().for_each(|&q| set(q, "■")),
                GateType::SWAP => qubits.iter().for_each(|&q| set(q, "x")),
                single => {
                    let label = single.label();
                    qubits.iter().for_each(|&q| set(q, &label));
                }
            }
        }
    }
    cells
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let left = (width - len) / 2;
    let right = width - len - left;
    let mut out = String::with_capacity(width * 3);
    out.extend(std::iter::repeat(WIRE).take(left));
    out.push_str(text);
    out.extend(std::iter::repeat(WIRE).take(right));
    out
}
