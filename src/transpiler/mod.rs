pub mod basis;
pub mod optimize;
pub mod pass;

pub use basis::{BasisGates, BasisTranslator};
pub use optimize::{CancelAdjacentCx, Optimize1qGates};
pub use pass::{Pass, PassManager};

use crate::error::{Error, Result};
use crate::ir::Circuit;

/// Builds the pass pipeline for an optimization level.
///
/// * `0` - basis translation only; the canonical, unoptimized decomposition.
/// * `1` - additionally merges adjacent `u3` gates.
/// * `2` - additionally cancels adjacent `cx` pairs.
pub fn pass_manager(basis: &BasisGates, optimization_level: u8) -> Result<PassManager> {
    let mut pm = PassManager::new();
    pm.add_pass(Box::new(BasisTranslator::new(basis.clone())));
    match optimization_level {
        0 => {}
        1 => pm.add_pass(Box::new(Optimize1qGates)),
        2 => {
            pm.add_pass(Box::new(Optimize1qGates));
            pm.add_pass(Box::new(CancelAdjacentCx));
            // Cancelled pairs can bring u3 runs together again.
            pm.add_pass(Box::new(Optimize1qGates));
        }
        level => return Err(Error::InvalidOptimizationLevel(level)),
    }
    Ok(pm)
}

/// Rewrites `circuit` so it only uses gates in `basis`.
pub fn transpile(circuit: &Circuit, basis: &BasisGates, optimization_level: u8) -> Result<Circuit> {
    pass_manager(basis, optimization_level)?.run(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::GateType;

    #[test]
    fn test_pipeline_per_level() {
        let basis = BasisGates::new(["u3", "cx"]);
        assert_eq!(pass_manager(&basis, 0).unwrap().pass_names(), vec!["BasisTranslator"]);
        assert_eq!(
            pass_manager(&basis, 1).unwrap().pass_names(),
            vec!["BasisTranslator", "Optimize1qGates"]
        );
        assert_eq!(pass_manager(&basis, 2).unwrap().pass_names().len(), 4);
    }

    #[test]
    fn test_invalid_level() {
        let basis = BasisGates::new(["u3", "cx"]);
        assert!(matches!(
            transpile(&Circuit::new(1), &basis, 3),
            Err(Error::InvalidOptimizationLevel(3))
        ));
    }

    #[test]
    fn test_levels_never_grow_the_circuit() {
        let mut circuit = Circuit::new(3);
        circuit.apply(GateType::CCX, &[0, 1, 2]).unwrap();
        circuit.apply(GateType::CCZ, &[2, 0, 1]).unwrap();
        let basis = BasisGates::new(["u3", "cx"]);
        let sizes: Vec<usize> = (0..=2)
            .map(|level| transpile(&circuit, &basis, level).unwrap().size())
            .collect();
        assert!(sizes[1] <= sizes[0]);
        assert!(sizes[2] <= sizes[1]);
    }
}
