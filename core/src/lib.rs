//! Cellular automaton grid storage, rules, and simulation backend.
//!
//! An [`Automaton`](automaton::Automaton) owns a bounds-checked
//! [`Grid`](grid::Grid) and a [`Rule`](sim::rule::Rule). Per-cell rules
//! compute each generation from an untouched copy of the previous one; agent
//! rules move agents around the grid in place. A
//! [`Controller`](controller::Controller) steps an automaton on request or
//! continuously in the background.

#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all)]
#![deny(clippy::correctness)]

#[macro_use]
mod macros;
pub mod automaton;
pub mod cell;
pub mod config;
pub mod controller;
pub mod coord;
pub mod error;
pub mod factory;
pub mod grid;
pub mod sim;

pub mod traits {
    //! Traits to bring into scope when working with automata.

    pub use crate::cell::Cell;
    pub use crate::sim::rule::{AgentRule, CellRule};
    pub use crate::sim::{AsSimulate, Simulate};
}

pub mod prelude {
    //! Most commonly used types and traits.

    pub use crate::traits::*;

    pub use crate::automaton::{AnyAutomaton, Automaton, Generation};
    pub use crate::config::{AutomatonConfig, AutomatonKind};
    pub use crate::controller::Controller;
    pub use crate::coord::{Coord, Direction, Edges};
    pub use crate::error::{BoundsError, SimError, SimResult, ValidationError};
    pub use crate::grid::Grid;
    pub use crate::sim::rule::*;
}

#[cfg(test)]
mod tests;
