use std::fmt;
use std::ops::{BitAnd, BitOr, Not};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Representation of a ternary signal value
///
/// May be 0, 1 or unknown (X).
/// Unknown models an unconnected or not-yet-determined wire. It is absorbing for every
/// logic operation defined here: unlike Kleene logic, `0 & X` is X.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum Signal {
    /// Logic zero
    False,
    /// Logic one
    True,
    /// Undetermined value
    #[default]
    Unknown,
}

impl Signal {
    /// Constant zero signal
    pub fn zero() -> Signal {
        Signal::False
    }

    /// Constant one signal
    pub fn one() -> Signal {
        Signal::True
    }

    /// Unknown signal
    pub fn unknown() -> Signal {
        Signal::Unknown
    }

    /// Returns true if the signal has a definite boolean value
    pub fn is_known(&self) -> bool {
        !matches!(self, Signal::Unknown)
    }

    /// Returns the boolean value, if known
    pub fn to_bool(&self) -> Option<bool> {
        match self {
            Signal::False => Some(false),
            Signal::True => Some(true),
            Signal::Unknown => None,
        }
    }
}

impl From<bool> for Signal {
    fn from(b: bool) -> Signal {
        if b {
            Signal::one()
        } else {
            Signal::zero()
        }
    }
}

impl From<Option<bool>> for Signal {
    fn from(b: Option<bool>) -> Signal {
        b.map_or(Signal::Unknown, Signal::from)
    }
}

impl From<Signal> for Option<bool> {
    fn from(s: Signal) -> Option<bool> {
        s.to_bool()
    }
}

impl Not for Signal {
    type Output = Signal;
    fn not(self) -> Signal {
        match self {
            Signal::False => Signal::True,
            Signal::True => Signal::False,
            Signal::Unknown => Signal::Unknown,
        }
    }
}

impl Not for &'_ Signal {
    type Output = Signal;
    fn not(self) -> Signal {
        !*self
    }
}

impl BitAnd for Signal {
    type Output = Signal;
    fn bitand(self, rhs: Signal) -> Signal {
        match (self.to_bool(), rhs.to_bool()) {
            (Some(a), Some(b)) => Signal::from(a && b),
            _ => Signal::Unknown,
        }
    }
}

impl BitOr for Signal {
    type Output = Signal;
    fn bitor(self, rhs: Signal) -> Signal {
        match (self.to_bool(), rhs.to_bool()) {
            (Some(a), Some(b)) => Signal::from(a || b),
            _ => Signal::Unknown,
        }
    }
}

impl FromStr for Signal {
    type Err = Error;

    /// Parse 1/0/x and their spelled-out forms, case-insensitive
    fn from_str(s: &str) -> Result<Signal, Error> {
        match s.trim().to_lowercase().as_str() {
            "1" | "true" | "t" => Ok(Signal::True),
            "0" | "false" | "f" => Ok(Signal::False),
            "x" | "unknown" | "null" | "none" => Ok(Signal::Unknown),
            _ => Err(Error::InvalidSignal(s.to_string())),
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::False => write!(f, "0"),
            Signal::True => write!(f, "1"),
            Signal::Unknown => write!(f, "X"),
        }
    }
}

impl fmt::Debug for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
