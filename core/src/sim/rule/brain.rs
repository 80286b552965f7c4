use std::fmt;

use super::{count_moore, CellRule};
use crate::coord::{Coord, Edges};
use crate::grid::Grid;

/// State of a cell in Brian's Brain.
#[allow(missing_docs)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BrainState {
    Alive,
    Dying,
    Dead,
}
impl Default for BrainState {
    fn default() -> Self {
        Self::Dead
    }
}
impl_state_cell!(BrainState);

/// Brian's Brain: live cells always start dying, dying cells always die, and
/// dead cells come alive with exactly two live Moore neighbors.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct BryansBrain {
    /// Edge policy for neighbor lookups.
    pub edges: Edges,
}
impl fmt::Display for BryansBrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Brian's Brain")
    }
}
impl CellRule<BrainState> for BryansBrain {
    fn transition(&self, pos: Coord, grid: &Grid<BrainState>) -> BrainState {
        match grid.get(pos) {
            Ok(BrainState::Alive) => BrainState::Dying,
            Ok(BrainState::Dying) => BrainState::Dead,
            _ if count_moore(grid, pos, self.edges, BrainState::Alive) == 2 => BrainState::Alive,
            _ => BrainState::Dead,
        }
    }
}
