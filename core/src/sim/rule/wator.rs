use itertools::Itertools;
use log::trace;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::fmt;

use super::AgentRule;
use crate::cell::Cell;
use crate::coord::{Coord, Edges};
use crate::error::{SimResult, ValidationError};
use crate::grid::Grid;

/// Occupant of a Wator cell.
#[allow(missing_docs)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum WatorState {
    Empty,
    Prey,
    Predator,
}

/// Smallest maximum health for which a full creature and its offspring both
/// keep a positive health.
pub const MIN_MAX_HEALTH: u32 = 2;

/// Health constants of Wator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct WatorParams {
    /// Health of a fully fed creature. Creatures reproduce at this health.
    pub max_health: u32,
    /// Health regained by prey each generation.
    pub prey_heal: u32,
    /// Health regained by a predator when it eats.
    pub predator_heal: u32,
    /// Health lost by a predator in a generation it doesn't eat.
    pub starve: u32,
}
impl Default for WatorParams {
    fn default() -> Self {
        Self {
            max_health: 10,
            prey_heal: 1,
            predator_heal: 5,
            starve: 1,
        }
    }
}
impl WatorParams {
    /// Checks that the constants describe a valid automaton.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_max_health(self.max_health)
    }
}

fn check_max_health(max_health: u32) -> Result<(), ValidationError> {
    if max_health < MIN_MAX_HEALTH {
        return Err(ValidationError::MaxHealthTooLow(max_health));
    }
    Ok(())
}

/// Cell of Wator: an occupant with bounded health and a flag recording
/// whether it already acted in the current generation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct WatorCell {
    state: WatorState,
    health: u32,
    max_health: u32,
    moved: bool,
}
impl Cell for WatorCell {
    type State = WatorState;

    fn state(&self) -> WatorState {
        self.state
    }
}
impl WatorCell {
    /// Constructs a cell, rejecting a health outside of `0..=max_health` and a
    /// `max_health` below `MIN_MAX_HEALTH`.
    pub fn new(state: WatorState, health: u32, max_health: u32) -> Result<Self, ValidationError> {
        check_max_health(max_health)?;
        let mut ret = Self {
            state,
            health: 0,
            max_health,
            moved: false,
        };
        ret.set_health(health)?;
        Ok(ret)
    }
    /// Constructs an empty cell.
    pub fn empty(max_health: u32) -> Self {
        Self {
            state: WatorState::Empty,
            health: 0,
            max_health,
            moved: false,
        }
    }

    /// Returns the health of the occupant.
    pub fn health(&self) -> u32 {
        self.health
    }
    /// Returns the maximum health of the occupant.
    pub fn max_health(&self) -> u32 {
        self.max_health
    }
    /// Sets the health of the occupant, rejecting a value outside of
    /// `0..=max_health`.
    pub fn set_health(&mut self, health: u32) -> Result<(), ValidationError> {
        if health > self.max_health {
            return Err(ValidationError::HealthOutOfRange {
                health,
                max_health: self.max_health,
            });
        }
        self.health = health;
        Ok(())
    }
    /// Returns whether the occupant is at full health.
    pub fn is_full(&self) -> bool {
        self.health == self.max_health
    }
    /// Returns whether the occupant has run out of health.
    pub fn is_dead(&self) -> bool {
        self.health == 0
    }
    /// Raises health by `amount`, capped at the maximum.
    pub fn heal(&mut self, amount: u32) {
        self.health = self.health.saturating_add(amount).min(self.max_health);
    }
    /// Lowers health by `amount`, stopping at zero.
    pub fn starve(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }
    /// Returns the cell this one leaves behind when it moves away.
    ///
    /// An occupant at full health splits its health with an offspring of the
    /// same kind; otherwise the cell left behind is empty.
    pub fn reproduce(&mut self) -> WatorCell {
        if self.is_full() {
            self.health = self.max_health / 2;
            Self {
                health: self.max_health / 2,
                moved: true,
                ..*self
            }
        } else {
            let mut empty = Self::empty(self.max_health);
            empty.moved = true;
            empty
        }
    }

    /// Returns whether the cell already acted this generation.
    pub fn has_moved(&self) -> bool {
        self.moved
    }
    /// Records that the cell acted this generation.
    pub fn mark_moved(&mut self) {
        self.moved = true;
    }
    /// Clears the record of acting, at the start of a generation.
    pub fn reset_movement(&mut self) {
        self.moved = false;
    }
}

/// Wator, a predator-prey automaton.
///
/// Cells are scanned in row-major order and every creature that hasn't acted
/// yet acts once. Prey heal and wander into an empty neighbor; predators eat a
/// neighboring prey or wander and starve. A creature moving away at full
/// health leaves an offspring behind. Each destination cell is claimed by at
/// most one creature per generation.
#[derive(Debug, Clone)]
pub struct Wator {
    params: WatorParams,
    edges: Edges,
    rng: StdRng,
}
impl fmt::Display for Wator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Wator")
    }
}
impl Wator {
    /// Constructs the rule. `rng` decides which neighbor a creature moves to.
    pub fn new(params: WatorParams, edges: Edges, rng: StdRng) -> Result<Self, ValidationError> {
        params.validate()?;
        Ok(Self { params, edges, rng })
    }
    /// Returns the health constants of the rule.
    pub fn params(&self) -> &WatorParams {
        &self.params
    }

    /// Returns the unclaimed neighbors of `pos` occupied by `state`.
    fn candidates(
        &self,
        grid: &Grid<WatorCell>,
        pos: Coord,
        state: WatorState,
        claimed: &HashSet<Coord>,
    ) -> Vec<Coord> {
        grid.moore_neighbors(pos, self.edges)
            .filter(|n| *n != pos && !claimed.contains(n))
            .filter(|&n| grid.get(n).map_or(false, |cell| cell.state == state))
            .unique()
            .collect()
    }

    /// Moves `creature` from `origin` to `dest`, leaving `left_behind` at the
    /// origin.
    fn relocate(
        grid: &mut Grid<WatorCell>,
        claimed: &mut HashSet<Coord>,
        origin: Coord,
        dest: Coord,
        creature: WatorCell,
        left_behind: WatorCell,
    ) -> SimResult<()> {
        assert!(
            claimed.insert(dest),
            "Wator destination {} claimed twice in one generation",
            dest,
        );
        grid.set(dest, creature)?;
        grid.set(origin, left_behind)?;
        Ok(())
    }

    fn act_prey(
        &mut self,
        grid: &mut Grid<WatorCell>,
        claimed: &mut HashSet<Coord>,
        pos: Coord,
        mut prey: WatorCell,
    ) -> SimResult<()> {
        prey.mark_moved();
        prey.heal(self.params.prey_heal);
        let empties = self.candidates(grid, pos, WatorState::Empty, claimed);
        match empties.choose(&mut self.rng) {
            Some(&dest) => {
                let offspring = prey.reproduce();
                Self::relocate(grid, claimed, pos, dest, prey, offspring)
            }
            None => {
                grid.set(pos, prey)?;
                Ok(())
            }
        }
    }

    fn act_predator(
        &mut self,
        grid: &mut Grid<WatorCell>,
        claimed: &mut HashSet<Coord>,
        pos: Coord,
        mut predator: WatorCell,
    ) -> SimResult<()> {
        predator.mark_moved();
        let prey = self.candidates(grid, pos, WatorState::Prey, claimed);
        let dest = match prey.choose(&mut self.rng) {
            Some(&dest) => {
                let offspring = predator.reproduce();
                predator.heal(self.params.predator_heal);
                Some((dest, offspring))
            }
            None => {
                let empties = self.candidates(grid, pos, WatorState::Empty, claimed);
                let dest = empties.choose(&mut self.rng).copied();
                let offspring = dest.map(|_| predator.reproduce());
                predator.starve(self.params.starve);
                dest.zip(offspring)
            }
        };
        if predator.is_dead() {
            trace!("Predator at {} starved", pos);
            predator = WatorCell {
                moved: true,
                ..WatorCell::empty(predator.max_health)
            };
        }
        match dest {
            Some((dest, offspring)) => Self::relocate(grid, claimed, pos, dest, predator, offspring),
            None => {
                grid.set(pos, predator)?;
                Ok(())
            }
        }
    }
}
impl AgentRule<WatorCell> for Wator {
    fn advance(&mut self, grid: &mut Grid<WatorCell>) -> SimResult<()> {
        // Rewind the random choices of a failed generation.
        let checkpoint = self.rng.clone();
        let result = self.scan(grid);
        if result.is_err() {
            self.rng = checkpoint;
        }
        result
    }
}
impl Wator {
    fn scan(&mut self, grid: &mut Grid<WatorCell>) -> SimResult<()> {
        grid.values_mut().for_each(WatorCell::reset_movement);
        let mut claimed = HashSet::new();
        for pos in grid.coords() {
            let cell = *grid.get(pos)?;
            if cell.has_moved() {
                continue;
            }
            match cell.state {
                WatorState::Empty => (),
                WatorState::Prey => self.act_prey(grid, &mut claimed, pos, cell)?,
                WatorState::Predator => self.act_predator(grid, &mut claimed, pos, cell)?,
            }
        }
        Ok(())
    }
}
