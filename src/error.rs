//! Error type shared by network construction, simulation and IO

use thiserror::Error;

use crate::network::GadgetKind;

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or running a network
///
/// All of them are fatal to the operation that raised them.
#[derive(Debug, Error)]
pub enum Error {
    /// A pleat or gadget with this name already exists
    #[error("duplicate {kind} name: {name}")]
    DuplicateName {
        /// What was being added ("pleat" or "gadget")
        kind: &'static str,
        /// The offending name
        name: String,
    },

    /// A pleat lookup failed
    #[error("pleat not found: {0}")]
    NotFound(String),

    /// A gadget does not respect the input/output counts of its kind
    #[error("gadget {id}: {kind} requires {expected}, got {inputs} inputs and {outputs} outputs")]
    InvalidArity {
        /// Gadget id
        id: String,
        /// Gadget kind
        kind: GadgetKind,
        /// Human-readable arity contract
        expected: &'static str,
        /// Number of inputs given
        inputs: usize,
        /// Number of outputs given
        outputs: usize,
    },

    /// A description names a gadget type that does not exist
    #[error("unknown gadget type: {0}")]
    UnknownGateType(String),

    /// The gadget graph contains a cycle; the gadgets that could not be ordered are listed
    #[error("dependency cycle in the network (not a DAG), involving: {}", .0.join(", "))]
    CyclicDependency(Vec<String>),

    /// A textual signal value could not be parsed
    #[error("invalid signal value: {0}")]
    InvalidSignal(String),

    /// Failure reading or writing a file
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON description
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
