//! Declarative network descriptions, as read from JSON

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::network::gadget::{Gadget, GadgetKind};
use crate::network::network::Network;
use crate::network::signal::Signal;

/// A gadget in a network description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GadgetDescription {
    /// Gadget type (NOT, AND, OR, NAND), case-insensitive
    #[serde(rename = "type")]
    pub kind: String,
    /// Unique gadget id
    pub id: String,
    /// Pleats read, in order
    #[serde(default)]
    pub inputs: Vec<String>,
    /// Pleats written, in order
    #[serde(default)]
    pub outputs: Vec<String>,
}

/// A bridge between two pleats in a network description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionDescription {
    /// Pleat whose changes are relevant to the readers of `to`
    pub from: String,
    /// Pleat whose readers are registered on `from`
    pub to: String,
}

/// Declarative description of a network
///
/// ```
/// # use origami::{Network, NetworkDescription, Signal};
/// let desc: NetworkDescription = serde_json::from_str(r#"{
///     "gadgets": [{"type": "nand", "id": "g", "inputs": ["a", "b"], "outputs": ["o"]}],
///     "inputs": {"a": true, "b": null}
/// }"#).unwrap();
/// let net = Network::from_description(&desc).unwrap();
/// assert_eq!(net.signal("b").unwrap(), Signal::Unknown);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkDescription {
    /// Pleats declared upfront
    pub pleats: Vec<String>,
    /// Gadgets, added in order
    pub gadgets: Vec<GadgetDescription>,
    /// Bridges, applied after all gadgets
    pub connections: Vec<ConnectionDescription>,
    /// Initial values of the primary inputs; null is unknown
    pub inputs: BTreeMap<String, Signal>,
}

impl GadgetDescription {
    /// Build the corresponding gadget
    pub fn to_gadget(&self) -> Result<Gadget> {
        let kind: GadgetKind = self.kind.parse()?;
        Gadget::new(kind, &self.id, &self.inputs, &self.outputs)
    }
}

impl From<&Gadget> for GadgetDescription {
    fn from(g: &Gadget) -> GadgetDescription {
        GadgetDescription {
            kind: g.kind().name().to_string(),
            id: g.id().to_string(),
            inputs: g.inputs().to_vec(),
            outputs: g.outputs().to_vec(),
        }
    }
}

impl Network {
    /// Build a network from a description
    ///
    /// Pleats are declared first, then gadgets are added in order, then connections and
    /// initial inputs are applied. Nothing is returned unless every step succeeds.
    pub fn from_description(desc: &NetworkDescription) -> Result<Network> {
        let mut ret = Network::new();
        for name in &desc.pleats {
            ret.add_pleat(name, Signal::Unknown)?;
        }
        for g in &desc.gadgets {
            ret.add_gadget(g.to_gadget()?)?;
        }
        for c in &desc.connections {
            ret.connect(&c.from, &c.to);
        }
        ret.set_inputs(desc.inputs.iter().map(|(n, s)| (n, *s)));
        debug!(
            pleats = ret.nb_pleats(),
            gadgets = ret.nb_gadgets(),
            "built network from description"
        );
        Ok(ret)
    }

    /// Describe the structure of the network
    ///
    /// Bridges are not part of the output; current pleat values are exported as inputs.
    pub fn to_description(&self) -> NetworkDescription {
        NetworkDescription {
            pleats: self.pleats().iter().map(|p| p.name().to_string()).collect(),
            gadgets: self.gadgets().iter().map(GadgetDescription::from).collect(),
            connections: Vec::new(),
            inputs: self.values(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn gadget(kind: &str, id: &str, inputs: &[&str], outputs: &[&str]) -> GadgetDescription {
        GadgetDescription {
            kind: kind.to_string(),
            id: id.to_string(),
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            outputs: outputs.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_build() {
        let desc = NetworkDescription {
            pleats: vec!["a".to_string(), "b".to_string()],
            gadgets: vec![
                gadget("and", "g1", &["a", "b"], &["x"]),
                gadget("Not", "g2", &["x"], &["y"]),
            ],
            connections: vec![ConnectionDescription {
                from: "z".to_string(),
                to: "x".to_string(),
            }],
            inputs: [("a".to_string(), Signal::True)].into_iter().collect(),
        };
        let net = Network::from_description(&desc).unwrap();
        assert_eq!(net.nb_gadgets(), 2);
        assert_eq!(net.nb_pleats(), 5);
        assert_eq!(net.signal("a").unwrap(), Signal::True);
        assert_eq!(net.signal("b").unwrap(), Signal::Unknown);
        assert_eq!(net.readers("z").unwrap(), vec!["g2"]);
        net.check();
    }

    #[test]
    fn test_errors() {
        let mut desc = NetworkDescription {
            gadgets: vec![gadget("xor", "g", &["a", "b"], &["o"])],
            ..Default::default()
        };
        assert!(matches!(
            Network::from_description(&desc),
            Err(Error::UnknownGateType(t)) if t == "xor"
        ));

        desc.gadgets = vec![gadget("NOT", "g", &["a", "b"], &["o"])];
        assert!(matches!(
            Network::from_description(&desc),
            Err(Error::InvalidArity { .. })
        ));

        desc.gadgets = vec![
            gadget("NOT", "g", &["a"], &["o"]),
            gadget("NOT", "g", &["o"], &["p"]),
        ];
        assert!(matches!(
            Network::from_description(&desc),
            Err(Error::DuplicateName { .. })
        ));

        desc.gadgets.clear();
        desc.pleats = vec!["a".to_string(), "a".to_string()];
        assert!(matches!(
            Network::from_description(&desc),
            Err(Error::DuplicateName { kind: "pleat", .. })
        ));
    }

    #[test]
    fn test_json() {
        let desc: NetworkDescription = serde_json::from_str(
            r#"{
                "pleats": ["a"],
                "gadgets": [{"type": "OR", "id": "g", "inputs": ["a", "b"], "outputs": ["o"]}],
                "connections": [{"from": "o", "to": "a"}],
                "inputs": {"a": false, "b": null}
            }"#,
        )
        .unwrap();
        assert_eq!(desc.gadgets[0].kind, "OR");
        assert_eq!(desc.inputs["a"], Signal::False);
        assert_eq!(desc.inputs["b"], Signal::Unknown);

        let empty: NetworkDescription = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, NetworkDescription::default());
    }

    #[test]
    fn test_to_description() {
        let mut net = Network::new();
        net.add_gadget(Gadget::or("g", &["a", "b"], "o").unwrap())
            .unwrap();
        net.set_input("a", Signal::True);
        let desc = net.to_description();
        let rebuilt = Network::from_description(&desc).unwrap();
        assert_eq!(rebuilt.values(), net.values());
        assert_eq!(rebuilt.gadgets(), net.gadgets());
    }
}
