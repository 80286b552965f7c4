use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

use super::{count_moore, CellRule};
use crate::coord::{Coord, Edges};
use crate::error::ValidationError;
use crate::grid::Grid;

/// State of a cell in a two-state life-like automaton.
#[allow(missing_docs)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LifeState {
    Alive,
    Dead,
}
impl Default for LifeState {
    fn default() -> Self {
        Self::Dead
    }
}
impl_state_cell!(LifeState);

/// A 2-state totalistic 2D range-1 Moore-neighborhood rule.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MooreTotalistic {
    birth: [bool; 9],
    survival: [bool; 9],
    edges: Edges,
}
impl Default for MooreTotalistic {
    fn default() -> Self {
        LIFE
    }
}

impl FromStr for MooreTotalistic {
    type Err = ValidationError;

    /// Parses a rule in `B3/S23` notation. The parsed rule wraps at the edges.
    fn from_str(s: &str) -> Result<Self, ValidationError> {
        lazy_static! {
            static ref RULE_REGEX: Regex = Regex::new(r"^[Bb](\d*)/?[Ss](\d*)$").unwrap();
        }
        let invalid = || ValidationError::InvalidRule(s.to_owned());
        let captures = RULE_REGEX.captures(s.trim()).ok_or_else(invalid)?;
        let mut conditions = [[false; 9]; 2];
        for (i, condition) in conditions.iter_mut().enumerate() {
            for ch in captures[i + 1].chars() {
                match ch.to_digit(10) {
                    Some(n) if n <= 8 => condition[n as usize] = true,
                    _ => return Err(invalid()),
                }
            }
        }
        Ok(Self {
            birth: conditions[0],
            survival: conditions[1],
            edges: Edges::Wrap,
        })
    }
}
impl fmt::Display for MooreTotalistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B")?;
        for i in 0..=8 {
            if self.birth[i] {
                write!(f, "{}", i)?;
            }
        }
        write!(f, "/S")?;
        for i in 0..=8 {
            if self.survival[i] {
                write!(f, "{}", i)?;
            }
        }
        Ok(())
    }
}

impl MooreTotalistic {
    /// Returns the same rule with a different edge policy.
    #[must_use = "This method returns a new value instead of mutating its input"]
    pub fn with_edges(self, edges: Edges) -> Self {
        Self { edges, ..self }
    }
    /// Returns the edge policy of the rule.
    pub fn edges(&self) -> Edges {
        self.edges
    }
}

impl CellRule<LifeState> for MooreTotalistic {
    fn transition(&self, pos: Coord, grid: &Grid<LifeState>) -> LifeState {
        let live_neighbors = count_moore(grid, pos, self.edges, LifeState::Alive);
        // Index LUT to get next cell state.
        let table = match grid.get(pos) {
            Ok(LifeState::Alive) => &self.survival,
            _ => &self.birth,
        };
        if table[live_neighbors] {
            LifeState::Alive
        } else {
            LifeState::Dead
        }
    }
}

/// Conway's Game of Life on a toroidal grid, simulated using a general
/// 2-state totalistic 2D range-1 Moore-neighborhood algorithm.
pub const LIFE: MooreTotalistic = MooreTotalistic {
    birth: [false, false, false, true, false, false, false, false, false],
    survival: [false, false, true, true, false, false, false, false, false],
    edges: Edges::Wrap,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rule::transition_grid;
    use super::LifeState::{Alive as A, Dead as D};

    #[test]
    fn test_life_rule_notation() {
        assert_eq!("B3/S23", LIFE.to_string());
        assert_eq!(Ok(LIFE), "B3/S23".parse());
        assert_eq!(Ok(LIFE), "b3s23".parse());
        let highlife: MooreTotalistic = "B36/S23".parse().unwrap();
        assert_eq!("B36/S23", highlife.to_string());
        assert!("B9/S23".parse::<MooreTotalistic>().is_err());
        assert!("S23/B3".parse::<MooreTotalistic>().is_err());
    }

    #[test]
    fn test_life_blinker() {
        let grid = Grid::from_rows(vec![
            vec![D, D, D, D, D],
            vec![D, D, A, D, D],
            vec![D, D, A, D, D],
            vec![D, D, A, D, D],
            vec![D, D, D, D, D],
        ])
        .unwrap();
        let expected = Grid::from_rows(vec![
            vec![D, D, D, D, D],
            vec![D, D, D, D, D],
            vec![D, A, A, A, D],
            vec![D, D, D, D, D],
            vec![D, D, D, D, D],
        ])
        .unwrap();
        for &edges in &[Edges::Wrap, Edges::Bounded] {
            let rule = LIFE.with_edges(edges);
            let next = transition_grid(&grid, &rule);
            assert_eq!(expected, next);
            assert_eq!(grid, transition_grid(&next, &rule));
        }
    }

    #[test]
    fn test_life_edges() {
        // A vertical blinker straddling the top/bottom seam only oscillates
        // when the grid wraps.
        let grid = Grid::from_rows(vec![
            vec![D, A, D],
            vec![D, A, D],
            vec![D, D, D],
            vec![D, D, D],
            vec![D, A, D],
        ])
        .unwrap();
        let wrapped = transition_grid(&grid, &LIFE);
        assert_eq!(3, wrapped.values().filter(|&&c| c == A).count());
        assert_eq!(Ok(&A), wrapped.get(Coord::new(0, 0)));

        let bounded = transition_grid(&grid, &LIFE.with_edges(Edges::Bounded));
        assert!(bounded.values().all(|&c| c == D));
    }
}
