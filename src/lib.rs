//! Ternary logic simulation by fixed-point propagation
//!
//! This crate simulates networks of combinational logic elements ("gadgets") connected by named
//! signal carriers ("pleats"). Each signal is true, false or unknown.
//!
//! # Usage
//!
//! Networks are described in JSON, and simulated from the command line:
//!
//! ```bash
//! # Show available commands
//! origami help
//! # Simulate a network, driving some inputs and printing the trace
//! origami run half_adder.json --set a=1 --set b=0 --trace
//! # Show statistics and the evaluation order
//! origami show half_adder.json
//! origami order half_adder.json
//! ```
//!
//! # Datastructures
//!
//! `Network` owns the pleats and gadgets. Gadgets reference pleats by name, and pleats are created
//! on first reference with an unknown value.
//! The four gadget kinds (Not, And, Or, Nand) are closed; an unknown input makes every output unknown.
//!
//! A gadget depends on another if it reads a pleat the other writes. The network must be acyclic
//! to be simulated: gadgets are evaluated in topological order, in passes, until a pass changes
//! nothing or the iteration budget is exhausted. Running out of budget is not an error; the
//! result reports whether a fixed point was reached.
//!
//! For example, here is a half adder:
//! ```
//! # use origami::{Gadget, Network, Signal, SimConfig};
//! let mut net = Network::new();
//! net.add_gadget(Gadget::or("g_or", &["a", "b"], "or_out").unwrap()).unwrap();
//! net.add_gadget(Gadget::nand("g_nand", &["a", "b"], "nand_out").unwrap()).unwrap();
//! net.add_gadget(Gadget::and("g_sum", &["or_out", "nand_out"], "sum").unwrap()).unwrap();
//! net.add_gadget(Gadget::and("g_carry", &["a", "b"], "carry").unwrap()).unwrap();
//! net.set_inputs([("a", Signal::True), ("b", Signal::False)]);
//! let res = net.run(&SimConfig::default()).unwrap();
//! assert!(res.stabilized);
//! assert_eq!(res.get("sum"), Some(Signal::True));
//! assert_eq!(res.get("carry"), Some(Signal::False));
//! ```
//!
//! The network keeps its state between runs: a new run continues from the values reached by the
//! previous one, after the caller drives new inputs.

#![warn(missing_docs)]

pub mod cmd;
pub mod error;
pub mod io;
pub mod network;
pub mod sim;

pub use error::{Error, Result};
pub use network::{
    stats, Gadget, GadgetKind, Network, NetworkDescription, Pleat, Signal,
};
pub use sim::{simulate, RunResult, SimConfig};
