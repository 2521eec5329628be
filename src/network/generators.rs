//! Network generators and templates
//!
//! Generators panic on internal construction errors: the networks they build are valid by construction.

/// Adder generators
pub mod adder {
    use crate::{Gadget, Network};

    /// A half adder on pleats `a` and `b`, with outputs `sum` and `carry`
    ///
    /// The sum is built as (a | b) & !(a & b).
    pub fn half_adder() -> Network {
        let mut ret = Network::new();
        let gadgets = [
            Gadget::or("g_or", &["a", "b"], "or_out"),
            Gadget::and("g_and", &["a", "b"], "and_out"),
            Gadget::not("g_not", "and_out", "not_out"),
            Gadget::and("g_sum", &["or_out", "not_out"], "sum"),
            Gadget::and("g_carry", &["a", "b"], "carry"),
        ];
        for g in gadgets {
            ret.add_gadget(g.unwrap()).unwrap();
        }
        ret.check();
        ret
    }

    /// A full adder on pleats `{prefix}a`, `{prefix}b` and `{prefix}cin`, using only Nand gadgets
    ///
    /// Outputs are `{prefix}sum` and `{prefix}cout`.
    pub fn full_adder(prefix: &str) -> Network {
        let mut ret = Network::new();
        add_full_adder(
            &mut ret,
            prefix,
            &format!("{prefix}a"),
            &format!("{prefix}b"),
            &format!("{prefix}cin"),
            &format!("{prefix}sum"),
            &format!("{prefix}cout"),
        );
        ret.check();
        ret
    }

    /// Add a 9-Nand full adder to a network
    fn add_full_adder(
        net: &mut Network,
        prefix: &str,
        a: &str,
        b: &str,
        cin: &str,
        sum: &str,
        cout: &str,
    ) {
        let names: Vec<String> = (0..8).map(|i| format!("{prefix}n{i}")).collect();
        let n: Vec<&str> = names.iter().map(String::as_str).collect();
        let gadgets = [
            Gadget::nand(n[1], &[a, b], n[1]),
            Gadget::nand(n[2], &[a, n[1]], n[2]),
            Gadget::nand(n[3], &[b, n[1]], n[3]),
            Gadget::nand(n[4], &[n[2], n[3]], n[4]),
            Gadget::nand(n[5], &[n[4], cin], n[5]),
            Gadget::nand(n[6], &[n[4], n[5]], n[6]),
            Gadget::nand(n[7], &[cin, n[5]], n[7]),
            Gadget::nand(&format!("{prefix}s"), &[n[6], n[7]], sum),
            Gadget::nand(&format!("{prefix}c"), &[n[5], n[1]], cout),
        ];
        for g in gadgets {
            net.add_gadget(g.unwrap()).unwrap();
        }
    }

    /// A ripple-carry adder on pleats `a{i}`, `b{i}`, with outputs `s{i}` and carry out `c{len}`
    ///
    /// The carry in `c0` is a pleat as well, and must be driven like the other inputs.
    pub fn ripple_carry(len: usize) -> Network {
        let mut ret = Network::new();
        for i in 0..len {
            add_full_adder(
                &mut ret,
                &format!("fa{i}_"),
                &format!("a{i}"),
                &format!("b{i}"),
                &format!("c{i}"),
                &format!("s{i}"),
                &format!("c{}", i + 1),
            );
        }
        ret.check();
        ret
    }
}

/// Simple generators to test functionality
pub mod testcases {
    use rand::rngs::SmallRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    use crate::{Gadget, GadgetKind, Network};

    /// A single Not gadget reading its own output
    pub fn self_loop() -> Network {
        let mut ret = Network::new();
        ret.add_gadget(Gadget::not("n", "a", "a").unwrap()).unwrap();
        ret
    }

    /// A ring of Not gadgets `x0 -> x1 -> ... -> x0`; used to test cycle detection
    pub fn inverter_loop(len: usize) -> Network {
        assert!(len > 0);
        let mut ret = Network::new();
        for i in 0..len {
            let g = Gadget::not(
                &format!("n{i}"),
                &format!("x{i}"),
                &format!("x{}", (i + 1) % len),
            );
            ret.add_gadget(g.unwrap()).unwrap();
        }
        ret
    }

    /// A chain of two-input And gadgets over inputs `i0..i{len}`, with output `x{len-1}`
    ///
    /// Gadgets are inserted from the end of the chain, so the insertion order is the reverse of
    /// the evaluation order.
    pub fn and_chain(len: usize) -> Network {
        assert!(len > 0);
        let mut ret = Network::new();
        for i in (0..len).rev() {
            let prev = if i == 0 {
                "i0".to_string()
            } else {
                format!("x{}", i - 1)
            };
            let input = format!("i{}", i + 1);
            let g = Gadget::and(
                &format!("g{i}"),
                &[prev.as_str(), input.as_str()],
                &format!("x{i}"),
            );
            ret.add_gadget(g.unwrap()).unwrap();
        }
        ret.check();
        ret
    }

    /// A random acyclic network with inputs `i{k}` and gadget outputs `x{k}`
    ///
    /// Each gadget reads pleats created before it, so the network is always acyclic.
    /// Gadgets are inserted in shuffled order to exercise the topological sort.
    pub fn random_dag(nb_inputs: usize, nb_gadgets: usize, seed: u64) -> Network {
        assert!(nb_inputs >= 2);
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut names: Vec<String> = (0..nb_inputs).map(|i| format!("i{i}")).collect();
        let mut gadgets = Vec::new();
        for i in 0..nb_gadgets {
            let kind = GadgetKind::ALL[rng.gen_range(0..GadgetKind::ALL.len())];
            let arity = if kind == GadgetKind::Not {
                1
            } else {
                rng.gen_range(2..=4)
            };
            let inputs: Vec<String> = (0..arity)
                .map(|_| names[rng.gen_range(0..names.len())].clone())
                .collect();
            let output = format!("x{i}");
            let g = Gadget::new(kind, &format!("g{i}"), inputs, vec![output.clone()]);
            gadgets.push(g.unwrap());
            names.push(output);
        }
        gadgets.shuffle(&mut rng);

        let mut ret = Network::new();
        for i in 0..nb_inputs {
            ret.add_pleat(&format!("i{i}"), crate::Signal::Unknown).unwrap();
        }
        for g in gadgets {
            ret.add_gadget(g).unwrap();
        }
        ret.check();
        ret
    }
}

#[cfg(test)]
mod tests {
    use super::{adder, testcases};

    #[test]
    fn test_adder() {
        let net = adder::half_adder();
        assert_eq!(net.nb_gadgets(), 5);
        assert!(net.is_acyclic());
        let net = adder::full_adder("");
        assert_eq!(net.nb_gadgets(), 9);
        assert!(net.is_acyclic());
        for i in [0, 1, 2, 4, 8, 16] {
            let net = adder::ripple_carry(i);
            assert_eq!(net.nb_gadgets(), 9 * i);
            assert!(net.is_acyclic());
        }
    }

    #[test]
    fn test_loops() {
        assert!(!testcases::self_loop().is_acyclic());
        for i in [1, 2, 3, 8] {
            assert!(!testcases::inverter_loop(i).is_acyclic());
        }
    }

    #[test]
    fn test_and_chain() {
        for i in [1, 2, 4, 8] {
            let net = testcases::and_chain(i);
            assert_eq!(net.nb_gadgets(), i);
            let order = net.topological_order().unwrap();
            assert_eq!(order, (0..i).rev().collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_random_dag() {
        for seed in 0..10 {
            let net = testcases::random_dag(4, 30, seed);
            assert_eq!(net.nb_gadgets(), 30);
            assert!(net.is_acyclic());
        }
        // Same seed, same network
        let a = testcases::random_dag(3, 10, 42);
        let b = testcases::random_dag(3, 10, 42);
        assert_eq!(a.gadgets(), b.gadgets());
    }
}
