use tracing::{debug, info};

use crate::error::Result;
use crate::sim::trace::{Trace, TraceEvent};
use crate::sim::RunResult;
use crate::{Network, Signal};

/// Structure for fixed-point simulation based directly on the network representation
///
/// Gadgets are evaluated in topological order, one pass after the other, until a pass changes no
/// pleat or the iteration budget is exhausted.
pub struct FixedPointSimulator<'a> {
    net: &'a mut Network,
    order: Vec<usize>,
    gadget_inputs: Vec<Vec<usize>>,
    gadget_outputs: Vec<Vec<usize>>,
    trace: Option<Trace>,
}

impl<'a> FixedPointSimulator<'a> {
    /// Prepare a simulation; fails if the network has a dependency cycle
    pub fn new(net: &'a mut Network, with_trace: bool) -> Result<FixedPointSimulator<'a>> {
        let order = net.topological_order()?;
        let gadget_inputs = net
            .gadgets()
            .iter()
            .map(|g| net.pleat_indices(g.inputs()))
            .collect();
        let gadget_outputs = net
            .gadgets()
            .iter()
            .map(|g| net.pleat_indices(g.outputs()))
            .collect();
        let mut trace = with_trace.then(Trace::new);
        if let Some(t) = &mut trace {
            t.push(TraceEvent::Order {
                gadgets: order
                    .iter()
                    .map(|g| net.gadget(*g).id().to_string())
                    .collect(),
            });
        }
        Ok(FixedPointSimulator {
            net,
            order,
            gadget_inputs,
            gadget_outputs,
            trace,
        })
    }

    /// Evaluate every gadget once, in order; returns whether any pleat changed
    pub fn run_pass(&mut self, iteration: usize) -> bool {
        if let Some(t) = &mut self.trace {
            t.push(TraceEvent::IterationStart { iteration });
        }
        let mut changed = false;
        for &g in &self.order {
            let values: Vec<Signal> = self.gadget_inputs[g]
                .iter()
                .map(|p| self.net.pleat_at(*p).signal())
                .collect();
            let gadget = self.net.gadget(g);
            if let Some(t) = &mut self.trace {
                t.push(TraceEvent::Evaluate {
                    gadget: gadget.id().to_string(),
                    kind: gadget.kind(),
                    inputs: gadget.inputs().iter().cloned().zip(values.iter().copied()).collect(),
                });
            }
            let new_values = gadget.evaluate(&values);
            for (&p, v) in self.gadget_outputs[g].iter().zip(new_values) {
                let pleat = self.net.pleat_at_mut(p);
                let old = pleat.set(v);
                if old != v {
                    changed = true;
                    if let Some(t) = &mut self.trace {
                        t.push(TraceEvent::Transition {
                            pleat: pleat.name().to_string(),
                            old,
                            new: v,
                        });
                    }
                }
            }
        }
        if let Some(t) = &mut self.trace {
            t.push(TraceEvent::IterationEnd { iteration, changed });
        }
        changed
    }

    /// Run passes until a fixed point is reached or `max_iterations` passes are done
    ///
    /// Exhausting the budget is not an error: the state reached is returned, with
    /// `stabilized` set to false.
    pub fn run(mut self, max_iterations: usize) -> RunResult {
        let mut iterations = 0;
        let mut stabilized = false;
        while !stabilized && iterations < max_iterations {
            iterations += 1;
            let changed = self.run_pass(iterations);
            debug!(iteration = iterations, changed, "pass done");
            stabilized = !changed;
        }
        if stabilized {
            info!(iterations, "fixed point reached");
        } else {
            info!(iterations, "iteration budget exhausted before a fixed point");
        }
        RunResult {
            values: self.net.values(),
            iterations,
            stabilized,
            trace: self.trace,
        }
    }
}
