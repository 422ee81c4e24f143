use crate::error::Result;
use crate::ir::Circuit;
use log::debug;

/// A trait for transpiler passes.
///
/// A pass takes a circuit and returns a transformed circuit that implements
/// the same unitary, up to global phase.
pub trait Pass {
    /// Returns the name of the pass.
    fn name(&self) -> &str;

    /// Runs the pass on the given circuit.
    fn run(&self, circuit: &Circuit) -> Result<Circuit>;
}

/// Manages a sequence of transpiler passes.
#[derive(Default)]
pub struct PassManager {
    passes: Vec<Box<dyn Pass>>,
}

impl PassManager {
    /// Creates a new empty PassManager.
    pub fn new() -> Self {
        Self { passes: Vec::new() }
    }

    /// Adds a pass to the manager.
    pub fn add_pass(&mut self, pass: Box<dyn Pass>) {
        self.passes.push(pass);
    }

    /// Names of the scheduled passes, in order.
    pub fn pass_names(&self) -> Vec<&str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// Runs all passes in sequence on the given circuit.
    pub fn run(&self, circuit: &Circuit) -> Result<Circuit> {
        let mut current_circuit = circuit.clone();
        for pass in &self.passes {
            let before = current_circuit.size();
            current_circuit = pass.run(&current_circuit)?;
            debug!(
                "pass {}: {} -> {} gates",
                pass.name(),
                before,
                current_circuit.size()
            );
        }
        Ok(current_circuit)
    }
}
