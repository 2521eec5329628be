//! Human-readable record of a run

use std::fmt;

use itertools::Itertools;
use serde::Serialize;

use crate::{GadgetKind, Signal};

/// A single step of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    /// Evaluation order chosen for the run, recorded once
    Order {
        /// Gadget ids
        gadgets: Vec<String>,
    },
    /// Start of a pass over all gadgets
    IterationStart {
        /// Pass number, starting at 1
        iteration: usize,
    },
    /// A gadget was evaluated
    Evaluate {
        /// Gadget id
        gadget: String,
        /// Gadget kind
        #[serde(serialize_with = "serialize_kind")]
        kind: GadgetKind,
        /// Input pleats and the values read
        inputs: Vec<(String, Signal)>,
    },
    /// An output pleat changed value
    Transition {
        /// Pleat name
        pleat: String,
        /// Previous value
        old: Signal,
        /// New value
        new: Signal,
    },
    /// End of a pass
    IterationEnd {
        /// Pass number, starting at 1
        iteration: usize,
        /// Whether any pleat changed during the pass
        changed: bool,
    },
}

fn serialize_kind<S: serde::Serializer>(kind: &GadgetKind, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(kind.name())
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use TraceEvent::*;
        match self {
            Order { gadgets } => write!(f, "Topological order: {}", gadgets.iter().join(", ")),
            IterationStart { iteration } => write!(f, "Iteration {iteration}"),
            Evaluate {
                gadget,
                kind,
                inputs,
            } => write!(
                f,
                "  Evaluating {gadget} ({kind}), inputs: [{}] -> [{}]",
                inputs.iter().map(|(n, _)| n).join(", "),
                inputs.iter().map(|(_, s)| s).join(", ")
            ),
            Transition { pleat, old, new } => write!(f, "    {pleat}: {old} -> {new}"),
            IterationEnd { iteration, changed } => {
                write!(f, "End of iteration {iteration}, changed={changed}")
            }
        }
    }
}

/// Ordered record of the events of a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Trace {
    events: Vec<TraceEvent>,
}

impl Trace {
    /// Create an empty trace
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    /// All events, in order
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Number of events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns whether the trace is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Render each event as a line of text
    pub fn lines(&self) -> Vec<String> {
        self.events.iter().map(|e| e.to_string()).collect()
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for e in &self.events {
            writeln!(f, "{e}")?;
        }
        Ok(())
    }
}
