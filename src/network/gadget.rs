use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::network::signal::Signal;

/// Kinds of gadgets
///
/// All kinds have a single output. Not has a single input, the others take two or more.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
pub enum GadgetKind {
    /// Inverter
    Not,
    /// N-input And gate
    And,
    /// N-input Or gate
    Or,
    /// N-input Nand gate
    Nand,
}

impl GadgetKind {
    /// All gadget kinds
    pub const ALL: [GadgetKind; 4] = [
        GadgetKind::Not,
        GadgetKind::And,
        GadgetKind::Or,
        GadgetKind::Nand,
    ];

    /// Canonical uppercase name, as used in network descriptions
    pub fn name(&self) -> &'static str {
        match self {
            GadgetKind::Not => "NOT",
            GadgetKind::And => "AND",
            GadgetKind::Or => "OR",
            GadgetKind::Nand => "NAND",
        }
    }

    /// Human-readable arity contract
    fn arity_contract(&self) -> &'static str {
        match self {
            GadgetKind::Not => "exactly 1 input and 1 output",
            _ => "at least 2 inputs and exactly 1 output",
        }
    }

    /// Returns whether the given input/output counts are allowed for this kind
    pub fn accepts_arity(&self, nb_inputs: usize, nb_outputs: usize) -> bool {
        match self {
            GadgetKind::Not => nb_inputs == 1 && nb_outputs == 1,
            GadgetKind::And | GadgetKind::Or | GadgetKind::Nand => {
                nb_inputs >= 2 && nb_outputs == 1
            }
        }
    }

    /// Compute the output value from the input values
    ///
    /// Any unknown input makes the output unknown.
    pub fn evaluate(&self, inputs: &[Signal]) -> Signal {
        match self {
            GadgetKind::Not => inputs.first().map_or(Signal::Unknown, |s| !s),
            GadgetKind::And => and_all(inputs),
            GadgetKind::Or => inputs.iter().fold(Signal::zero(), |acc, s| acc | *s),
            GadgetKind::Nand => !and_all(inputs),
        }
    }
}

fn and_all(inputs: &[Signal]) -> Signal {
    inputs.iter().fold(Signal::one(), |acc, s| acc & *s)
}

impl FromStr for GadgetKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<GadgetKind> {
        match s.to_uppercase().as_str() {
            "NOT" => Ok(GadgetKind::Not),
            "AND" => Ok(GadgetKind::And),
            "OR" => Ok(GadgetKind::Or),
            "NAND" => Ok(GadgetKind::Nand),
            _ => Err(Error::UnknownGateType(s.to_string())),
        }
    }
}

impl fmt::Display for GadgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A combinational logic element reading and writing pleats by name
///
/// Gadgets are immutable once built, and always respect the arity of their kind.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct Gadget {
    id: String,
    kind: GadgetKind,
    inputs: Vec<String>,
    outputs: Vec<String>,
}

impl Gadget {
    /// Create a gadget, checking the number of inputs and outputs
    pub fn new<S: Into<String>>(
        kind: GadgetKind,
        id: &str,
        inputs: impl IntoIterator<Item = S>,
        outputs: impl IntoIterator<Item = S>,
    ) -> Result<Gadget> {
        let ret = Gadget {
            id: id.to_string(),
            kind,
            inputs: inputs.into_iter().map(Into::into).collect(),
            outputs: outputs.into_iter().map(Into::into).collect(),
        };
        ret.validate()?;
        Ok(ret)
    }

    /// Create a Not
    pub fn not(id: &str, input: &str, output: &str) -> Result<Gadget> {
        Gadget::new(GadgetKind::Not, id, [input], [output])
    }

    /// Create an n-input And
    pub fn and(id: &str, inputs: &[&str], output: &str) -> Result<Gadget> {
        Gadget::new(GadgetKind::And, id, inputs.iter().copied(), [output])
    }

    /// Create an n-input Or
    pub fn or(id: &str, inputs: &[&str], output: &str) -> Result<Gadget> {
        Gadget::new(GadgetKind::Or, id, inputs.iter().copied(), [output])
    }

    /// Create an n-input Nand
    pub fn nand(id: &str, inputs: &[&str], output: &str) -> Result<Gadget> {
        Gadget::new(GadgetKind::Nand, id, inputs.iter().copied(), [output])
    }

    /// Check the arity of the gadget against its kind
    pub fn validate(&self) -> Result<()> {
        if self.kind.accepts_arity(self.inputs.len(), self.outputs.len()) {
            Ok(())
        } else {
            Err(Error::InvalidArity {
                id: self.id.clone(),
                kind: self.kind,
                expected: self.kind.arity_contract(),
                inputs: self.inputs.len(),
                outputs: self.outputs.len(),
            })
        }
    }

    /// Unique identifier of the gadget
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Kind of the gadget
    pub fn kind(&self) -> GadgetKind {
        self.kind
    }

    /// Names of the pleats read, in order
    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    /// Names of the pleats written, in order
    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }

    /// Returns whether the gadget reads this pleat
    pub fn reads(&self, name: &str) -> bool {
        self.inputs.iter().any(|n| n == name)
    }

    /// Compute the output values from the input values, one per output pleat
    pub fn evaluate(&self, inputs: &[Signal]) -> Vec<Signal> {
        let v = self.kind.evaluate(inputs);
        vec![v; self.outputs.len()]
    }
}

impl fmt::Display for Gadget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {}({}) [{}]",
            self.outputs.join(", "),
            self.kind,
            self.inputs.join(", "),
            self.id
        )
    }
}
