//! High-level CA interface.

use log::trace;
use std::sync::Arc;

use crate::cell::Cell;
use crate::config::AutomatonKind;
use crate::error::SimResult;
use crate::grid::Grid;
use crate::sim::rule::*;
use crate::sim::{AsSimulate, Simulate};

/// Completed generation of an automaton.
///
/// The grid is shared with the automaton that produced it but is never
/// modified afterwards; the automaton copies it before writing if a snapshot
/// is still alive.
#[derive(Debug, Clone)]
pub struct Generation<C> {
    /// Number of generations elapsed when this snapshot was taken.
    pub index: u64,
    /// Cells of the generation.
    pub grid: Arc<Grid<C>>,
}
impl<C> Generation<C> {
    /// Returns the cells of the generation.
    pub fn grid(&self) -> &Grid<C> {
        &self.grid
    }
}

/// Cellular automaton simulation, including a grid of cells, a rule, and a
/// generation count.
#[derive(Debug)]
pub struct Automaton<C: Cell> {
    grid: Arc<Grid<C>>,
    rule: Rule<C>,
    generations: u64,
}
impl<C: Cell> Automaton<C> {
    /// Constructs an automaton at generation 0.
    pub fn new(grid: Grid<C>, rule: Rule<C>) -> Self {
        Self {
            grid: Arc::new(grid),
            rule,
            generations: 0,
        }
    }

    /// Returns the current generation's cells.
    pub fn grid(&self) -> &Grid<C> {
        &self.grid
    }
    /// Returns the rule of the automaton.
    pub fn rule(&self) -> &Rule<C> {
        &self.rule
    }
    /// Returns a snapshot of the current generation.
    pub fn snapshot(&self) -> Generation<C> {
        Generation {
            index: self.generations,
            grid: Arc::clone(&self.grid),
        }
    }
}
impl<C: Cell> Simulate for Automaton<C> {
    fn width(&self) -> usize {
        self.grid.width()
    }
    fn height(&self) -> usize {
        self.grid.height()
    }
    fn generation_count(&self) -> u64 {
        self.generations
    }
    fn step(&mut self) -> SimResult<()> {
        match &mut self.rule {
            Rule::PerCell(rule) => {
                // Every cell reads the untouched current generation.
                let next = transition_grid(&self.grid, &**rule);
                self.grid = Arc::new(next);
            }
            Rule::Agent(rule) => {
                // A failed generation must leave the current one installed.
                let mut next = Grid::clone(&self.grid);
                rule.advance(&mut next)?;
                self.grid = Arc::new(next);
            }
        }
        self.generations += 1;
        trace!("{} reached generation {}", self.rule, self.generations);
        Ok(())
    }
    fn rule_name(&self) -> String {
        self.rule.to_string()
    }
}

/// Cellular automaton of any kind.
#[allow(missing_docs)]
#[derive(Debug)]
pub enum AnyAutomaton {
    GameOfLife(Automaton<LifeState>),
    BryansBrain(Automaton<BrainState>),
    Rule110(Automaton<Rule110State>),
    LangtonsAnt(Automaton<AntCell>),
    Wator(Automaton<WatorCell>),
    CoDi(Automaton<CoDiCell>),
}
impl AsSimulate for AnyAutomaton {
    fn as_sim(&self) -> &dyn Simulate {
        match self {
            Self::GameOfLife(a) => a,
            Self::BryansBrain(a) => a,
            Self::Rule110(a) => a,
            Self::LangtonsAnt(a) => a,
            Self::Wator(a) => a,
            Self::CoDi(a) => a,
        }
    }
    fn as_sim_mut(&mut self) -> &mut dyn Simulate {
        match self {
            Self::GameOfLife(a) => a,
            Self::BryansBrain(a) => a,
            Self::Rule110(a) => a,
            Self::LangtonsAnt(a) => a,
            Self::Wator(a) => a,
            Self::CoDi(a) => a,
        }
    }
}
impl AnyAutomaton {
    /// Returns the kind of automaton.
    pub fn kind(&self) -> AutomatonKind {
        match self {
            Self::GameOfLife(_) => AutomatonKind::GameOfLife,
            Self::BryansBrain(_) => AutomatonKind::BryansBrain,
            Self::Rule110(_) => AutomatonKind::Rule110,
            Self::LangtonsAnt(_) => AutomatonKind::LangtonsAnt,
            Self::Wator(_) => AutomatonKind::Wator,
            Self::CoDi(_) => AutomatonKind::CoDi,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::{Coord, Direction, Edges};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_step_counts_generations() {
        let grid = Grid::filled(4, 4, LifeState::Dead).unwrap();
        let mut automaton = Automaton::new(grid, LIFE.into_rule());
        for i in 1..=5 {
            automaton.step().unwrap();
            assert_eq!(i, automaton.generation_count());
            assert_eq!((4, 4), (automaton.width(), automaton.height()));
        }
    }

    #[test]
    fn test_snapshots_are_not_mutated() {
        let mut grid = Grid::filled(5, 1, WatorCell::empty(10)).unwrap();
        grid.set(Coord::new(0, 0), WatorCell::new(WatorState::Prey, 3, 10).unwrap())
            .unwrap();
        let rule = Wator::new(WatorParams::default(), Edges::Bounded, StdRng::seed_from_u64(7))
            .unwrap()
            .into_rule();
        let mut automaton = Automaton::new(grid, rule);

        let before = automaton.snapshot();
        let frozen = (*before.grid).clone();
        automaton.step().unwrap();
        assert_eq!(0, before.index);
        assert_eq!(&frozen, before.grid());
        assert_ne!(&frozen, automaton.grid());
        assert_eq!(1, automaton.snapshot().index);
    }

    #[test]
    fn test_failed_step_keeps_generation() {
        let mut grid = Grid::filled(3, 3, AntCell::default()).unwrap();
        let inside = Ant {
            pos: Coord::new(1, 1),
            heading: Direction::North,
        };
        grid.get_mut(inside.pos).unwrap().ant = Some(inside.heading);
        let outside = Ant {
            pos: Coord::new(-1, 0),
            heading: Direction::North,
        };
        let rule = LangtonsAnt::new(vec![inside, outside], Edges::Wrap).into_rule();
        let mut automaton = Automaton::new(grid.clone(), rule);

        for _ in 0..2 {
            assert!(automaton.step().is_err());
            assert_eq!(0, automaton.generation_count());
            assert_eq!(&grid, automaton.grid());
            assert_eq!(&grid, automaton.snapshot().grid());
        }
    }

    #[test]
    fn test_any_automaton_dispatch() {
        let grid = Grid::filled(3, 2, BrainState::Dead).unwrap();
        let mut any = AnyAutomaton::BryansBrain(Automaton::new(
            grid,
            BryansBrain::default().into_rule(),
        ));
        assert_eq!(AutomatonKind::BryansBrain, any.kind());
        assert_eq!("Brian's Brain", any.rule_name());
        any.step().unwrap();
        assert_eq!(1, any.generation_count());
        assert_eq!((3, 2), (any.width(), any.height()));
    }
}
