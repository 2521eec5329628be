//! Compute network statistics
//!
//! ```
//! # use origami::Network;
//! # let net = Network::new();
//! use origami::network::stats::stats;
//! let stats = stats(&net);
//!
//! // Check that there is no Nand gadget
//! assert_eq!(stats.nb_nand, 0);
//!
//! // Show the statistics
//! println!("{}", stats);
//! ```

use std::fmt;

use crate::{GadgetKind, Network};

/// Number of pleats and gadgets in a network
#[derive(Clone, Debug, Default)]
pub struct NetworkStats {
    /// Number of pleats
    pub nb_pleats: usize,
    /// Number of pleats read by some gadget but written by none
    pub nb_inputs: usize,
    /// Number of pleats written by some gadget but read by none
    pub nb_outputs: usize,
    /// Number of pleats whose current value is unknown
    pub nb_unknown: usize,
    /// Number of Not gadgets
    pub nb_not: usize,
    /// Number of And gadgets
    pub nb_and: usize,
    /// Arity of And gadgets
    pub and_arity: Vec<usize>,
    /// Number of Or gadgets
    pub nb_or: usize,
    /// Arity of Or gadgets
    pub or_arity: Vec<usize>,
    /// Number of Nand gadgets
    pub nb_nand: usize,
    /// Arity of Nand gadgets
    pub nand_arity: Vec<usize>,
}

impl NetworkStats {
    /// Total number of gadgets
    pub fn nb_gadgets(&self) -> usize {
        self.nb_not + self.nb_and + self.nb_or + self.nb_nand
    }

    /// Record a new gadget
    fn add(&mut self, kind: GadgetKind, sz: usize) {
        let arity = match kind {
            GadgetKind::Not => {
                self.nb_not += 1;
                return;
            }
            GadgetKind::And => {
                self.nb_and += 1;
                &mut self.and_arity
            }
            GadgetKind::Or => {
                self.nb_or += 1;
                &mut self.or_arity
            }
            GadgetKind::Nand => {
                self.nb_nand += 1;
                &mut self.nand_arity
            }
        };
        if arity.len() <= sz {
            arity.resize(sz + 1, 0);
        }
        arity[sz] += 1;
    }
}

fn write_arity(f: &mut fmt::Formatter<'_>, name: &str, nb: usize, arity: &[usize]) -> fmt::Result {
    if nb != 0 {
        writeln!(f, "  {}: {}", name, nb)?;
        for (i, nb) in arity.iter().enumerate() {
            if *nb != 0 {
                writeln!(f, "      {}: {}", i, nb)?;
            }
        }
    }
    Ok(())
}

impl fmt::Display for NetworkStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Stats:")?;
        writeln!(f, "  Pleats: {}", self.nb_pleats)?;
        writeln!(f, "      inputs: {}", self.nb_inputs)?;
        writeln!(f, "      outputs: {}", self.nb_outputs)?;
        writeln!(f, "      unknown: {}", self.nb_unknown)?;
        writeln!(f, "  Gadgets: {}", self.nb_gadgets())?;
        if self.nb_not != 0 {
            writeln!(f, "  Not: {}", self.nb_not)?;
        }
        write_arity(f, "And", self.nb_and, &self.and_arity)?;
        write_arity(f, "Or", self.nb_or, &self.or_arity)?;
        write_arity(f, "Nand", self.nb_nand, &self.nand_arity)
    }
}

/// Compute the statistics of the network
pub fn stats(a: &Network) -> NetworkStats {
    let mut ret = NetworkStats {
        nb_pleats: a.nb_pleats(),
        ..Default::default()
    };
    let mut read = vec![false; a.nb_pleats()];
    let mut written = vec![false; a.nb_pleats()];
    for g in a.gadgets() {
        ret.add(g.kind(), g.inputs().len());
        for name in g.inputs() {
            if let Some(i) = a.pleat_index(name) {
                read[i] = true;
            }
        }
        for name in g.outputs() {
            if let Some(i) = a.pleat_index(name) {
                written[i] = true;
            }
        }
    }
    ret.nb_inputs = (0..a.nb_pleats()).filter(|i| read[*i] && !written[*i]).count();
    ret.nb_outputs = (0..a.nb_pleats()).filter(|i| written[*i] && !read[*i]).count();
    ret.nb_unknown = a.pleats().iter().filter(|p| !p.signal().is_known()).count();
    ret
}
