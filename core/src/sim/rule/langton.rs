use std::fmt;

use super::AgentRule;
use crate::cell::Cell;
use crate::coord::{Coord, Direction, Edges};
use crate::error::SimResult;
use crate::grid::Grid;

/// Color of a square under Langton's Ant.
#[allow(missing_docs)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AntColor {
    White,
    Black,
}
impl Default for AntColor {
    fn default() -> Self {
        Self::White
    }
}
impl AntColor {
    /// Returns the other color.
    pub fn flipped(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }
}

/// What a frontend sees in a square under Langton's Ant.
#[allow(missing_docs)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LangtonState {
    White,
    Black,
    Ant,
}

/// Square under Langton's Ant: its color, plus the heading of the ant
/// standing on it, if any.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct AntCell {
    /// Color of the square.
    pub color: AntColor,
    /// Heading of the ant standing on the square.
    pub ant: Option<Direction>,
}
impl From<AntColor> for AntCell {
    fn from(color: AntColor) -> Self {
        Self { color, ant: None }
    }
}
impl Cell for AntCell {
    type State = LangtonState;

    fn state(&self) -> LangtonState {
        match (self.ant, self.color) {
            (Some(_), _) => LangtonState::Ant,
            (None, AntColor::White) => LangtonState::White,
            (None, AntColor::Black) => LangtonState::Black,
        }
    }
}

/// Mobile agent of Langton's Ant.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Ant {
    /// Square the ant stands on.
    pub pos: Coord,
    /// Direction the ant faces.
    pub heading: Direction,
}

/// Langton's Ant: on a white square turn right, on a black square turn left;
/// flip the square and step forward.
///
/// Any number of ants may share the grid; they move one after another in the
/// order they were added. Under bounded edges, an ant facing the edge turns
/// but stays where it is.
#[derive(Debug, Clone)]
pub struct LangtonsAnt {
    ants: Vec<Ant>,
    edges: Edges,
}
impl fmt::Display for LangtonsAnt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Langton's Ant")
    }
}
impl LangtonsAnt {
    /// Constructs the rule for a set of ants.
    pub fn new(ants: Vec<Ant>, edges: Edges) -> Self {
        Self { ants, edges }
    }
    /// Returns the ants, in the order they move.
    pub fn ants(&self) -> &[Ant] {
        &self.ants
    }
    /// Marks every ant on the grid so that frontends can see it.
    pub fn place_ants(&self, grid: &mut Grid<AntCell>) -> SimResult<()> {
        mark(&self.ants, grid)
    }
}

fn mark(ants: &[Ant], grid: &mut Grid<AntCell>) -> SimResult<()> {
    for ant in ants {
        grid.get_mut(ant.pos)?.ant = Some(ant.heading);
    }
    Ok(())
}
impl AgentRule<AntCell> for LangtonsAnt {
    fn advance(&mut self, grid: &mut Grid<AntCell>) -> SimResult<()> {
        // Ants are only updated once the whole generation succeeds.
        let mut ants = self.ants.clone();
        for ant in &ants {
            grid.get_mut(ant.pos)?.ant = None;
        }
        for ant in &mut ants {
            let square = grid.get_mut(ant.pos)?;
            let color = square.color;
            square.color = color.flipped();
            ant.heading = match color {
                AntColor::White => ant.heading.turn_right(),
                AntColor::Black => ant.heading.turn_left(),
            };
            let (drow, dcol) = ant.heading.offset();
            if let Some(next) = grid.neighbor(ant.pos, drow, dcol, self.edges) {
                ant.pos = next;
            }
        }
        mark(&ants, grid)?;
        self.ants = ants;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(width: usize, height: usize, ant: Ant, edges: Edges, steps: usize) -> (Grid<AntCell>, LangtonsAnt) {
        let mut grid = Grid::filled(width, height, AntCell::default()).unwrap();
        let mut rule = LangtonsAnt::new(vec![ant], edges);
        rule.place_ants(&mut grid).unwrap();
        for _ in 0..steps {
            rule.advance(&mut grid).unwrap();
        }
        (grid, rule)
    }

    #[test]
    fn test_ant_first_steps() {
        let start = Ant {
            pos: Coord::new(2, 2),
            heading: Direction::North,
        };
        let (grid, rule) = run(5, 5, start, Edges::Wrap, 1);
        // White square: turn right, flip, step east.
        assert_eq!(AntColor::Black, grid.get(Coord::new(2, 2)).unwrap().color);
        assert_eq!(
            Ant {
                pos: Coord::new(2, 3),
                heading: Direction::East
            },
            rule.ants()[0]
        );
        assert_eq!(LangtonState::Ant, grid.get(Coord::new(2, 3)).unwrap().state());
        assert_eq!(1, grid.values().filter(|c| c.state() == LangtonState::Ant).count());

        // Four steps on a blank grid trace a square back to the start, leaving
        // four black squares.
        let (grid, rule) = run(5, 5, start, Edges::Wrap, 4);
        assert_eq!(start.pos, rule.ants()[0].pos);
        assert_eq!(4, grid.values().filter(|c| c.color == AntColor::Black).count());

        // The fifth step lands on a black square and turns left.
        let (_, rule) = run(5, 5, start, Edges::Wrap, 5);
        assert_eq!(Direction::West, rule.ants()[0].heading);
    }

    #[test]
    fn test_ant_edges() {
        let corner = Ant {
            pos: Coord::new(0, 2),
            heading: Direction::West,
        };
        // Turning right from west faces north, off the top edge.
        let (_, rule) = run(3, 3, corner, Edges::Wrap, 1);
        assert_eq!(Coord::new(2, 2), rule.ants()[0].pos);
        let (grid, rule) = run(3, 3, corner, Edges::Bounded, 1);
        assert_eq!(corner.pos, rule.ants()[0].pos);
        assert_eq!(Direction::North, rule.ants()[0].heading);
        assert_eq!(LangtonState::Ant, grid.get(corner.pos).unwrap().state());
        assert_eq!(AntColor::Black, grid.get(corner.pos).unwrap().color);
    }

    #[test]
    fn test_ant_off_grid_keeps_ants() {
        let inside = Ant {
            pos: Coord::new(1, 1),
            heading: Direction::East,
        };
        let outside = Ant {
            pos: Coord::new(5, 5),
            heading: Direction::East,
        };
        let mut grid = Grid::filled(3, 3, AntCell::default()).unwrap();
        let mut rule = LangtonsAnt::new(vec![inside, outside], Edges::Wrap);
        assert!(rule.advance(&mut grid).is_err());
        assert_eq!(&[inside, outside], rule.ants());
    }
}
