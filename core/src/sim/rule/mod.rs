//! Everything related to the description of a cellular automaton rule,
//! primarily the transition function.
//!
//! Rules come in two shapes. A [`CellRule`] computes each cell's next value
//! from a read-only view of the whole current generation, so every cell can be
//! computed independently. An [`AgentRule`] owns some state of its own (an
//! ant, a pulse schedule, a random number generator) and rewrites the grid in
//! place.

use std::fmt;
use std::sync::Arc;

mod brain;
mod codi;
mod elementary;
mod langton;
mod totalistic;
mod wator;

use crate::cell::Cell;
use crate::coord::{Coord, Edges};
use crate::error::SimResult;
use crate::grid::Grid;
pub use brain::*;
pub use codi::*;
pub use elementary::*;
pub use langton::*;
pub use totalistic::*;
pub use wator::*;

/// Rule that computes the next value of a cell from the current generation.
pub trait CellRule<C: Cell>: fmt::Debug + fmt::Display + Send + Sync {
    /// Returns the next value of the cell at `pos`.
    ///
    /// `grid` is the complete current generation and is never modified while
    /// a generation is being computed.
    fn transition(&self, pos: Coord, grid: &Grid<C>) -> C;

    /// Wraps the rule for use by an automaton.
    fn into_rule(self) -> Rule<C>
    where
        Self: 'static + Sized,
    {
        Rule::PerCell(Arc::new(self))
    }
}

/// Stateful rule that moves agents around the grid, modifying it in place.
pub trait AgentRule<C: Cell>: fmt::Debug + fmt::Display + Send {
    /// Advances the grid by one generation.
    fn advance(&mut self, grid: &mut Grid<C>) -> SimResult<()>;

    /// Wraps the rule for use by an automaton.
    fn into_rule(self) -> Rule<C>
    where
        Self: 'static + Sized,
    {
        Rule::Agent(Box::new(self))
    }
}

/// Update rule of an automaton, tagged by how generations are computed.
#[allow(missing_docs)]
#[derive(Debug)]
pub enum Rule<C: Cell> {
    PerCell(Arc<dyn CellRule<C>>),
    Agent(Box<dyn AgentRule<C>>),
}
impl<C: Cell> fmt::Display for Rule<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::PerCell(r) => write!(f, "{}", r),
            Rule::Agent(r) => write!(f, "{}", r),
        }
    }
}

/// Utility function that applies a per-cell rule to every cell of a grid,
/// returning the next generation.
pub fn transition_grid<C: Cell>(grid: &Grid<C>, rule: &dyn CellRule<C>) -> Grid<C> {
    grid.map(|pos, _| rule.transition(pos, grid))
}

/// Counts the Moore neighbors of `pos` whose value is `state`.
pub fn count_moore<C: Cell>(grid: &Grid<C>, pos: Coord, edges: Edges, state: C::State) -> usize {
    grid.moore_neighbors(pos, edges)
        .filter(|&n| grid.get(n).map_or(false, |cell| cell.state() == state))
        .count()
}
