use core::fmt;
use std::collections::{BTreeSet, VecDeque};

use fxhash::FxHashMap;
use tracing::debug;

use crate::error::{Error, Result};
use crate::network::gadget::Gadget;
use crate::network::pleat::Pleat;
use crate::network::signal::Signal;

/// A network of gadgets connected by named pleats
///
/// Pleats and gadgets are kept in insertion order; this order determines the tie-breaking
/// in the topological sort, so that the evaluation order only depends on the construction history.
/// Every name referenced by a gadget exists as a pleat.
#[derive(Debug, Clone, Default)]
pub struct Network {
    pleats: Vec<Pleat>,
    pleat_ids: FxHashMap<String, usize>,
    gadgets: Vec<Gadget>,
    gadget_ids: FxHashMap<String, usize>,
    /// Extra (pleat, gadget) reader registrations made by connect
    bridges: Vec<(usize, usize)>,
}

impl Network {
    /// Create a new network
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the number of pleats
    pub fn nb_pleats(&self) -> usize {
        self.pleats.len()
    }

    /// Return the number of gadgets
    pub fn nb_gadgets(&self) -> usize {
        self.gadgets.len()
    }

    /// All pleats, in creation order
    pub fn pleats(&self) -> &[Pleat] {
        &self.pleats
    }

    /// All gadgets, in insertion order
    pub fn gadgets(&self) -> &[Gadget] {
        &self.gadgets
    }

    /// Get the gadget at index i
    pub fn gadget(&self, i: usize) -> &Gadget {
        &self.gadgets[i]
    }

    /// Get a gadget by id
    pub fn gadget_by_id(&self, id: &str) -> Option<&Gadget> {
        self.gadget_ids.get(id).map(|i| &self.gadgets[*i])
    }

    /// Index of a pleat, if it exists
    pub(crate) fn pleat_index(&self, name: &str) -> Option<usize> {
        self.pleat_ids.get(name).copied()
    }

    /// Indices of existing pleats
    pub(crate) fn pleat_indices(&self, names: &[String]) -> Vec<usize> {
        names.iter().map(|n| self.pleat_ids[n.as_str()]).collect()
    }

    pub(crate) fn pleat_at(&self, i: usize) -> &Pleat {
        &self.pleats[i]
    }

    pub(crate) fn pleat_at_mut(&mut self, i: usize) -> &mut Pleat {
        &mut self.pleats[i]
    }

    /// Returns whether a pleat with this name exists
    pub fn has_pleat(&self, name: &str) -> bool {
        self.pleat_ids.contains_key(name)
    }

    /// Add a new pleat; fails if the name is already used
    pub fn add_pleat(&mut self, name: &str, initial: Signal) -> Result<()> {
        if self.has_pleat(name) {
            return Err(Error::DuplicateName {
                kind: "pleat",
                name: name.to_string(),
            });
        }
        self.push_pleat(name, initial);
        Ok(())
    }

    fn push_pleat(&mut self, name: &str, initial: Signal) -> usize {
        let i = self.pleats.len();
        debug!(pleat = name, signal = %initial, "adding pleat");
        self.pleats.push(Pleat::new(name, initial));
        self.pleat_ids.insert(name.to_string(), i);
        i
    }

    /// Return the index of a pleat, creating it as unknown if needed
    fn ensure_pleat(&mut self, name: &str) -> usize {
        match self.pleat_index(name) {
            Some(i) => i,
            None => self.push_pleat(name, Signal::Unknown),
        }
    }

    /// Get a pleat by name
    pub fn get_pleat(&self, name: &str) -> Result<&Pleat> {
        self.pleat_index(name)
            .map(|i| &self.pleats[i])
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    /// Get the current value of a pleat
    pub fn signal(&self, name: &str) -> Result<Signal> {
        self.get_pleat(name).map(|p| p.signal())
    }

    /// Add a new gadget
    ///
    /// Fails if the id is already used or if the gadget's arity is invalid; the network is left
    /// untouched in that case. Pleats referenced by the gadget are created as needed.
    pub fn add_gadget(&mut self, gadget: Gadget) -> Result<()> {
        if self.gadget_ids.contains_key(gadget.id()) {
            return Err(Error::DuplicateName {
                kind: "gadget",
                name: gadget.id().to_string(),
            });
        }
        gadget.validate()?;
        for name in gadget.inputs().iter().chain(gadget.outputs()) {
            self.ensure_pleat(name);
        }
        debug!(gadget = gadget.id(), kind = %gadget.kind(), "adding gadget");
        self.gadget_ids
            .insert(gadget.id().to_string(), self.gadgets.len());
        self.gadgets.push(gadget);
        Ok(())
    }

    /// Bridge two pleats: gadgets currently reading `in_name` also become readers of `out_name`
    ///
    /// This only adds dependency edges. Input bindings of the gadgets are unchanged, and gadgets
    /// added after the call are not affected.
    pub fn connect(&mut self, out_name: &str, in_name: &str) {
        let out = self.ensure_pleat(out_name);
        self.ensure_pleat(in_name);
        for (i, g) in self.gadgets.iter().enumerate() {
            if g.reads(in_name) && !self.bridges.contains(&(out, i)) {
                debug!(from = out_name, to = in_name, gadget = g.id(), "bridging reader");
                self.bridges.push((out, i));
            }
        }
    }

    /// Drive a single pleat, creating it if needed
    pub fn set_input(&mut self, name: &str, signal: Signal) {
        match self.pleat_index(name) {
            Some(i) => {
                self.pleats[i].set(signal);
            }
            None => {
                self.push_pleat(name, signal);
            }
        }
    }

    /// Drive pleats directly, bypassing gadget evaluation
    ///
    /// Entries are applied in iteration order. Missing pleats are created with the given value.
    pub fn set_inputs<K: AsRef<str>>(&mut self, values: impl IntoIterator<Item = (K, Signal)>) {
        for (name, signal) in values {
            self.set_input(name.as_ref(), signal);
        }
    }

    /// Compute the readers of each pleat, by pleat index
    ///
    /// This is derived from the gadget inputs and the bridges, and never stored.
    /// Gadget indices are sorted and unique.
    pub(crate) fn reader_index(&self) -> Vec<Vec<usize>> {
        let mut readers = vec![Vec::new(); self.nb_pleats()];
        for (i, g) in self.gadgets.iter().enumerate() {
            for name in g.inputs() {
                readers[self.pleat_ids[name.as_str()]].push(i);
            }
        }
        for &(p, g) in &self.bridges {
            readers[p].push(g);
        }
        for r in readers.iter_mut() {
            r.sort_unstable();
            r.dedup();
        }
        readers
    }

    /// Ids of the gadgets that read a pleat, including those registered by [`connect`](Self::connect)
    pub fn readers(&self, name: &str) -> Result<Vec<&str>> {
        let p = self
            .pleat_index(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;
        Ok(self.reader_index()[p]
            .iter()
            .map(|g| self.gadgets[*g].id())
            .collect())
    }

    /// Compute the gadget dependency graph: successors of each gadget, by gadget index
    ///
    /// There is an edge from A to B if A writes a pleat that B reads. Self-loops are ignored.
    pub(crate) fn successors(&self) -> Vec<BTreeSet<usize>> {
        let readers = self.reader_index();
        let mut succ = vec![BTreeSet::new(); self.nb_gadgets()];
        for (a, g) in self.gadgets.iter().enumerate() {
            for name in g.outputs() {
                for &b in &readers[self.pleat_ids[name.as_str()]] {
                    if b != a {
                        succ[a].insert(b);
                    }
                }
            }
        }
        succ
    }

    /// Gadgets with one of their own outputs as an input, by gadget index
    ///
    /// Bridges are not considered: a gadget registered by [`connect`](Self::connect) as a reader
    /// of its own output does not form a loop.
    fn self_loops(&self) -> Vec<usize> {
        (0..self.nb_gadgets())
            .filter(|&a| {
                let g = &self.gadgets[a];
                g.outputs().iter().any(|name| g.reads(name))
            })
            .collect()
    }

    /// Compute a topological order of the gadgets, as gadget indices
    ///
    /// Fails if the dependency graph has a cycle, including a gadget feeding itself.
    pub fn topological_order(&self) -> Result<Vec<usize>> {
        let loops = self.self_loops();
        if !loops.is_empty() {
            return Err(Error::CyclicDependency(
                loops
                    .into_iter()
                    .map(|g| self.gadgets[g].id().to_string())
                    .collect(),
            ));
        }

        let succ = self.successors();

        // Count the dependencies of each gadget
        let mut count_deps = vec![0usize; self.nb_gadgets()];
        for s in &succ {
            for &b in s {
                count_deps[b] += 1;
            }
        }

        // Start with gadgets with no dependencies
        let mut to_visit: VecDeque<usize> =
            (0..self.nb_gadgets()).filter(|g| count_deps[*g] == 0).collect();
        let mut order = Vec::with_capacity(self.nb_gadgets());
        while let Some(a) = to_visit.pop_front() {
            order.push(a);
            for &b in &succ[a] {
                count_deps[b] -= 1;
                if count_deps[b] == 0 {
                    to_visit.push_back(b);
                }
            }
        }

        if order.len() != self.nb_gadgets() {
            let stuck = (0..self.nb_gadgets())
                .filter(|g| count_deps[*g] != 0)
                .map(|g| self.gadgets[g].id().to_string())
                .collect();
            return Err(Error::CyclicDependency(stuck));
        }
        Ok(order)
    }

    /// Compute a topological order of the gadgets, as gadget ids
    pub fn topological_ids(&self) -> Result<Vec<String>> {
        Ok(self
            .topological_order()?
            .into_iter()
            .map(|g| self.gadgets[g].id().to_string())
            .collect())
    }

    /// Returns whether the dependency graph is acyclic
    pub fn is_acyclic(&self) -> bool {
        self.topological_order().is_ok()
    }

    /// Current value of every pleat
    pub fn values(&self) -> std::collections::BTreeMap<String, Signal> {
        self.pleats
            .iter()
            .map(|p| (p.name().to_string(), p.signal()))
            .collect()
    }

    /// Check consistency of the datastructure
    pub fn check(&self) {
        assert_eq!(self.pleats.len(), self.pleat_ids.len());
        assert_eq!(self.gadgets.len(), self.gadget_ids.len());
        for (i, p) in self.pleats.iter().enumerate() {
            assert_eq!(self.pleat_ids[p.name()], i, "Inconsistent pleat {}", p.name());
        }
        for g in &self.gadgets {
            assert!(g.validate().is_ok(), "Invalid gadget {}", g.id());
            for name in g.inputs().iter().chain(g.outputs()) {
                assert!(self.has_pleat(name), "Missing pleat {name}");
            }
        }
        let readers = self.reader_index();
        for (i, g) in self.gadgets.iter().enumerate() {
            for name in g.inputs() {
                assert!(readers[self.pleat_ids[name.as_str()]].contains(&i));
            }
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Network with {} pleats, {} gadgets:",
            self.nb_pleats(),
            self.nb_gadgets()
        )?;
        for g in &self.gadgets {
            writeln!(f, "\t{g}")?;
        }
        for p in &self.pleats {
            writeln!(f, "\t{p}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, Gadget, Network, Signal};

    #[test]
    fn test_basic() {
        let mut net = Network::default();
        net.add_pleat("a", Signal::True).unwrap();
        net.add_gadget(Gadget::and("g", &["a", "b"], "o").unwrap())
            .unwrap();

        // Pleats are created on first reference
        assert_eq!(net.nb_pleats(), 3);
        assert_eq!(net.nb_gadgets(), 1);
        assert_eq!(net.signal("a").unwrap(), Signal::True);
        assert_eq!(net.signal("b").unwrap(), Signal::Unknown);
        assert_eq!(net.signal("o").unwrap(), Signal::Unknown);
        assert_eq!(net.readers("a").unwrap(), vec!["g"]);
        assert!(net.readers("o").unwrap().is_empty());
        net.check();
    }

    #[test]
    fn test_duplicates() {
        let mut net = Network::default();
        net.add_pleat("a", Signal::Unknown).unwrap();
        assert!(matches!(
            net.add_pleat("a", Signal::True),
            Err(Error::DuplicateName { kind: "pleat", .. })
        ));
        net.add_gadget(Gadget::not("n", "a", "b").unwrap()).unwrap();
        assert!(matches!(
            net.add_gadget(Gadget::not("n", "b", "c").unwrap()),
            Err(Error::DuplicateName { kind: "gadget", .. })
        ));
        // The failed gadget did not create its pleats
        assert!(!net.has_pleat("c"));
        assert_eq!(net.nb_gadgets(), 1);
    }

    #[test]
    fn test_not_found() {
        let net = Network::new();
        assert!(matches!(net.get_pleat("nope"), Err(Error::NotFound(n)) if n == "nope"));
        assert!(matches!(net.readers("nope"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_set_inputs() {
        let mut net = Network::new();
        net.add_pleat("a", Signal::Unknown).unwrap();
        net.set_inputs([("a", Signal::True), ("z", Signal::False)]);
        assert_eq!(net.signal("a").unwrap(), Signal::True);
        assert_eq!(net.signal("z").unwrap(), Signal::False);
        net.set_input("a", Signal::Unknown);
        assert_eq!(net.signal("a").unwrap(), Signal::Unknown);
    }

    #[test]
    fn test_connect() {
        let mut net = Network::new();
        net.add_gadget(Gadget::not("n1", "x", "y").unwrap()).unwrap();
        net.add_gadget(Gadget::not("n2", "p", "q").unwrap()).unwrap();
        assert!(net.readers("q").unwrap().is_empty());

        net.connect("q", "x");
        assert_eq!(net.readers("q").unwrap(), vec!["n1"]);
        // Idempotent, and does not rewire inputs
        net.connect("q", "x");
        assert_eq!(net.readers("q").unwrap(), vec!["n1"]);
        assert_eq!(net.gadget_by_id("n1").unwrap().inputs(), ["x"]);
        // n2 now precedes n1
        assert_eq!(net.topological_ids().unwrap(), vec!["n2", "n1"]);

        // Missing pleats are created
        net.connect("new_out", "new_in");
        assert!(net.has_pleat("new_out"));
        assert!(net.has_pleat("new_in"));

        // Gadgets added later are not bridged
        net.add_gadget(Gadget::not("n3", "x", "w").unwrap()).unwrap();
        assert_eq!(net.readers("q").unwrap(), vec!["n1"]);
        net.check();
    }

    #[test]
    fn test_topo_order() {
        let mut net = Network::new();
        // Inserted in reverse dependency order
        net.add_gadget(Gadget::not("n3", "c", "d").unwrap()).unwrap();
        net.add_gadget(Gadget::not("n2", "b", "c").unwrap()).unwrap();
        net.add_gadget(Gadget::not("n1", "a", "b").unwrap()).unwrap();
        net.add_gadget(Gadget::not("m", "a", "e").unwrap()).unwrap();
        assert_eq!(
            net.topological_ids().unwrap(),
            vec!["n1", "m", "n2", "n3"]
        );
        // Stable across calls
        assert_eq!(net.topological_order().unwrap(), net.topological_order().unwrap());
    }

    #[test]
    fn test_self_loop_cycle() {
        let mut net = Network::new();
        net.add_gadget(Gadget::not("n", "a", "a").unwrap()).unwrap();
        assert!(matches!(
            net.topological_order(),
            Err(Error::CyclicDependency(_))
        ));
    }

    #[test]
    fn test_bridged_self_reader() {
        let mut net = Network::new();
        net.add_gadget(Gadget::and("g", &["a", "b"], "o").unwrap())
            .unwrap();
        net.connect("o", "a");
        assert_eq!(net.readers("o").unwrap(), vec!["g"]);
        // Registered as a reader of its own output, but not an input of itself
        assert_eq!(net.topological_ids().unwrap(), vec!["g"]);

        net.set_inputs([("a", Signal::True), ("b", Signal::True)]);
        let res = net.run(&crate::SimConfig::default()).unwrap();
        assert!(res.stabilized);
        assert_eq!(res.get("o"), Some(Signal::True));
    }

    #[test]
    fn test_cycle() {
        let mut net = Network::new();
        net.add_gadget(Gadget::not("n0", "x", "a").unwrap()).unwrap();
        net.add_gadget(Gadget::and("g1", &["a", "c"], "b").unwrap())
            .unwrap();
        net.add_gadget(Gadget::not("g2", "b", "c").unwrap()).unwrap();
        match net.topological_order() {
            Err(Error::CyclicDependency(ids)) => assert_eq!(ids, vec!["g1", "g2"]),
            r => panic!("Expected a cycle, got {r:?}"),
        }
        assert!(!net.is_acyclic());
    }
}
