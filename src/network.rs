//! Representation and handling of gadget networks

mod description;
mod gadget;
pub mod generators;
mod network;
mod pleat;
mod signal;
pub mod stats;

pub use description::{ConnectionDescription, GadgetDescription, NetworkDescription};
pub use gadget::{Gadget, GadgetKind};
pub use network::Network;
pub use pleat::Pleat;
pub use signal::Signal;
