use std::fmt;

use crate::network::signal::Signal;

/// A named holder of one signal value, the unit of wiring between gadgets
///
/// Pleats are owned by a [`Network`](crate::Network); their value is only modified through it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pleat {
    name: String,
    signal: Signal,
}

impl Pleat {
    pub(crate) fn new(name: &str, signal: Signal) -> Pleat {
        Pleat {
            name: name.to_string(),
            signal,
        }
    }

    /// Name of the pleat
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current value of the pleat
    pub fn signal(&self) -> Signal {
        self.signal
    }

    /// Overwrite the value; returns the previous one
    pub(crate) fn set(&mut self, signal: Signal) -> Signal {
        std::mem::replace(&mut self.signal, signal)
    }
}

impl fmt::Display for Pleat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.signal)
    }
}
