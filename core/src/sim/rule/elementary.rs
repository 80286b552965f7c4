use std::fmt;

use super::CellRule;
use crate::coord::{Coord, Edges};
use crate::grid::Grid;

/// State of a cell in an elementary automaton.
#[allow(missing_docs)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Rule110State {
    Alive,
    Dead,
}
impl Default for Rule110State {
    fn default() -> Self {
        Self::Dead
    }
}
impl_state_cell!(Rule110State);

/// One-dimensional, two-state, range-1 automaton identified by its Wolfram
/// code.
///
/// The automaton is laid out down the grid: row 0 holds the seed and each row
/// below it is the generation computed from the row above, so successive
/// rows render successive generations. Row 0 is never rewritten.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Elementary {
    code: u8,
    edges: Edges,
}
impl Default for Elementary {
    fn default() -> Self {
        Self::RULE_110
    }
}
impl fmt::Display for Elementary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rule {}", self.code)
    }
}
impl Elementary {
    /// Rule 110 with dead cells past the edges.
    pub const RULE_110: Self = Self {
        code: 110,
        edges: Edges::Bounded,
    };

    /// Constructs the elementary rule with the given Wolfram code.
    pub fn new(code: u8, edges: Edges) -> Self {
        Self { code, edges }
    }
    /// Returns the Wolfram code of the rule.
    pub fn code(&self) -> u8 {
        self.code
    }
    /// Returns the next state of a cell whose neighborhood is `(left, center,
    /// right)`.
    pub fn lookup(&self, left: bool, center: bool, right: bool) -> bool {
        let idx = (left as u8) << 2 | (center as u8) << 1 | right as u8;
        self.code >> idx & 1 == 1
    }
}
impl CellRule<Rule110State> for Elementary {
    fn transition(&self, pos: Coord, grid: &Grid<Rule110State>) -> Rule110State {
        let current = grid.get(pos).map_or(Rule110State::Dead, |&c| c);
        if pos.row == 0 {
            return current;
        }
        let alive = |dcol| {
            grid.neighbor(pos, -1, dcol, self.edges)
                .map_or(false, |n| grid.get(n) == Ok(&Rule110State::Alive))
        };
        if self.lookup(alive(-1), alive(0), alive(1)) {
            Rule110State::Alive
        } else {
            Rule110State::Dead
        }
    }
}
