//! Cell model shared by all automata.

use std::fmt;
use std::hash::Hash;

/// Value stored in each slot of an automaton's grid.
///
/// Every cell exposes a state from a small closed set, which is what a
/// frontend maps to a color or glyph. Cells may carry extra attributes beside
/// their state (health, counters, ...).
pub trait Cell: fmt::Debug + Clone + Send + Sync + 'static {
    /// Closed set of states this cell can be in.
    type State: fmt::Debug + Copy + Eq + Hash;

    /// Returns the current state of the cell.
    fn state(&self) -> Self::State;
}
