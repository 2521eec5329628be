//! Simulation of a gadget network by fixed-point propagation

mod fixed_point;
mod trace;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::Result;
use crate::{Network, Signal};

pub use fixed_point::FixedPointSimulator;
pub use trace::{Trace, TraceEvent};

/// Parameters of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    /// Maximum number of passes over the gadgets
    pub max_iterations: usize,
    /// Record a trace of the run
    pub trace: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            max_iterations: 3,
            trace: false,
        }
    }
}

impl SimConfig {
    /// Default configuration with tracing enabled
    pub fn traced() -> Self {
        SimConfig {
            trace: true,
            ..Default::default()
        }
    }
}

/// Outcome of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunResult {
    /// Final value of every pleat
    pub values: BTreeMap<String, Signal>,
    /// Number of passes performed
    pub iterations: usize,
    /// Whether the last pass changed nothing
    pub stabilized: bool,
    /// Trace of the run, if requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Trace>,
}

impl RunResult {
    /// Final value of a pleat, if it exists
    pub fn get(&self, name: &str) -> Option<Signal> {
        self.values.get(name).copied()
    }
}

impl Network {
    /// Evaluate the network until a fixed point is reached, starting from the current pleat values
    ///
    /// Fails before any evaluation if the network has a dependency cycle.
    /// Pleat values are updated in place, so that a later run continues from this state.
    pub fn run(&mut self, config: &SimConfig) -> Result<RunResult> {
        let sim = FixedPointSimulator::new(self, config.trace)?;
        Ok(sim.run(config.max_iterations))
    }

    /// Drive the given pleats, then run the network
    pub fn simulate<K: AsRef<str>>(
        &mut self,
        inputs: impl IntoIterator<Item = (K, Signal)>,
        config: &SimConfig,
    ) -> Result<RunResult> {
        self.set_inputs(inputs);
        self.run(config)
    }
}

/// Drive the given pleats, then run the network
pub fn simulate<K: AsRef<str>>(
    net: &mut Network,
    inputs: impl IntoIterator<Item = (K, Signal)>,
    config: &SimConfig,
) -> Result<RunResult> {
    net.simulate(inputs, config)
}

/// Simulate every boolean combination of the given input pleats on a copy of the network
///
/// Returns, for each pattern, the values of the output pleats. Patterns are enumerated with the
/// first input as the least significant bit.
///
/// # Panics
///
/// Panics if there are as many inputs as bits in `usize`, since the patterns could not be
/// enumerated.
pub fn truth_table(
    net: &Network,
    inputs: &[&str],
    outputs: &[&str],
    config: &SimConfig,
) -> Result<Vec<(Vec<Signal>, Vec<Signal>)>> {
    assert!(
        inputs.len() < usize::BITS as usize,
        "Too many inputs for a truth table: {}",
        inputs.len()
    );
    let mut net = net.clone();
    let mut ret = Vec::new();
    for p in 0..1usize << inputs.len() {
        let pattern: Vec<Signal> = (0..inputs.len())
            .map(|i| Signal::from(p >> i & 1 != 0))
            .collect();
        simulate(&mut net, inputs.iter().copied().zip(pattern.iter().copied()), config)?;
        let values = outputs
            .iter()
            .map(|o| net.signal(o))
            .collect::<Result<Vec<_>>>()?;
        ret.push((pattern, values));
    }
    Ok(ret)
}
