use std::collections::HashMap;
use std::convert::TryFrom;
use std::fmt;
use std::ops::{Index, IndexMut};

use super::AgentRule;
use crate::cell::Cell;
use crate::coord::{Coord, Direction, Edges};
use crate::error::{SimResult, ValidationError};
use crate::grid::Grid;

/// Signal role of a CoDi cell.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CoDiState {
    /// Inert: ignores pulses and never fires.
    Blank,
    /// Fires toward every direction once enough pulses have arrived.
    Neuron,
    /// Relays each pulse onward.
    Axon,
    /// Relays each pulse onward.
    Dendrite,
}

/// One value per direction.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DirectionMap<T>([T; 4]);
impl<T> Index<Direction> for DirectionMap<T> {
    type Output = T;

    #[inline]
    fn index(&self, dir: Direction) -> &T {
        &self.0[dir.index()]
    }
}
impl<T> IndexMut<Direction> for DirectionMap<T> {
    #[inline]
    fn index_mut(&mut self, dir: Direction) -> &mut T {
        &mut self.0[dir.index()]
    }
}
impl<T> DirectionMap<T> {
    /// Constructs a map by calling `f` for every direction.
    pub fn from_fn(mut f: impl FnMut(Direction) -> T) -> Self {
        let [n, e, s, w] = Direction::ALL;
        Self([f(n), f(e), f(s), f(w)])
    }
    /// Returns an iterator over every direction and its value.
    pub fn iter(&self) -> impl '_ + Iterator<Item = (Direction, &T)> {
        Direction::ALL.iter().copied().zip(&self.0)
    }
}

/// Cell of CoDi: a signal role, the number of pulses received since it last
/// fired, and which directions those pulses came from.
///
/// Construct one with [`CoDiCell::builder()`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CoDiCell {
    state: CoDiState,
    activation_counter: u32,
    inputs: DirectionMap<bool>,
}
impl Cell for CoDiCell {
    type State = CoDiState;

    fn state(&self) -> CoDiState {
        self.state
    }
}
impl CoDiCell {
    /// Returns a builder with no fields set.
    pub fn builder() -> CoDiCellBuilder {
        CoDiCellBuilder::default()
    }
    /// Returns a cell with the given role that has received nothing.
    pub fn idle(state: CoDiState) -> Self {
        Self {
            state,
            activation_counter: 0,
            inputs: DirectionMap::default(),
        }
    }

    /// Returns the number of pulses received since the cell last fired.
    pub fn activation_counter(&self) -> u32 {
        self.activation_counter
    }
    /// Returns which directions have sent a pulse since the cell last fired.
    pub fn inputs(&self) -> &DirectionMap<bool> {
        &self.inputs
    }
    /// Returns the counter value at which the cell fires, or `None` if it
    /// never fires.
    pub fn threshold(&self, neuron_threshold: u32) -> Option<u32> {
        match self.state {
            CoDiState::Blank => None,
            CoDiState::Neuron => Some(neuron_threshold),
            CoDiState::Axon | CoDiState::Dendrite => Some(1),
        }
    }

    /// Records a pulse arriving from the neighbor in direction `from`.
    /// Returns `false` if the cell ignores pulses.
    pub fn receive(&mut self, from: Direction) -> bool {
        if self.state == CoDiState::Blank {
            return false;
        }
        self.inputs[from] = true;
        self.activation_counter = self.activation_counter.saturating_add(1);
        true
    }
    /// Fires the cell, clearing its counter and inputs, and returns the
    /// directions to send pulses to.
    ///
    /// Neurons send everywhere; relays send everywhere they did not receive
    /// from.
    pub fn fire(&mut self) -> Vec<Direction> {
        let outputs = match self.state {
            CoDiState::Blank => vec![],
            CoDiState::Neuron => Direction::ALL.to_vec(),
            CoDiState::Axon | CoDiState::Dendrite => self
                .inputs
                .iter()
                .filter(|&(_, &received)| !received)
                .map(|(dir, _)| dir)
                .collect(),
        };
        self.activation_counter = 0;
        self.inputs = DirectionMap::default();
        outputs
    }
}

/// Builder for [`CoDiCell`]. Every field must be set before `build()`.
#[derive(Debug, Default, Clone)]
pub struct CoDiCellBuilder {
    state: Option<CoDiState>,
    activation_counter: Option<i64>,
    neighbors_input: Option<HashMap<Direction, bool>>,
}
impl CoDiCellBuilder {
    /// Sets the signal role.
    pub fn state(mut self, state: CoDiState) -> Self {
        self.state = Some(state);
        self
    }
    /// Sets the activation counter.
    pub fn activation_counter(mut self, activation_counter: i64) -> Self {
        self.activation_counter = Some(activation_counter);
        self
    }
    /// Sets the whole input map, replacing any inputs set before.
    pub fn neighbors_input(mut self, neighbors_input: HashMap<Direction, bool>) -> Self {
        self.neighbors_input = Some(neighbors_input);
        self
    }
    /// Sets the input from a single direction.
    pub fn input(mut self, dir: Direction, received: bool) -> Self {
        self.neighbors_input
            .get_or_insert_with(HashMap::new)
            .insert(dir, received);
        self
    }

    /// Validates all fields together and builds the cell.
    pub fn build(self) -> Result<CoDiCell, ValidationError> {
        let state = self.state.ok_or(ValidationError::MissingField("state"))?;
        let counter = self
            .activation_counter
            .ok_or(ValidationError::MissingField("activation_counter"))?;
        if counter < 0 {
            return Err(ValidationError::NegativeCounter(counter));
        }
        let activation_counter =
            u32::try_from(counter).map_err(|_| ValidationError::CounterOverflow(counter))?;
        let map = self
            .neighbors_input
            .ok_or(ValidationError::MissingField("neighbors_input"))?;
        if let Some(&dir) = Direction::ALL.iter().find(|dir| !map.contains_key(*dir)) {
            return Err(ValidationError::MissingDirection(dir));
        }
        Ok(CoDiCell {
            state,
            activation_counter,
            inputs: DirectionMap::from_fn(|dir| map[&dir]),
        })
    }
}

/// Pulse travelling to `target`, arriving from direction `from`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Pulse {
    /// Cell that receives the pulse.
    pub target: Coord,
    /// Direction of the sender, as seen from `target`.
    pub from: Direction,
}

/// CoDi, a signal-propagation automaton.
///
/// Each generation first delivers the pulses sent in the previous generation,
/// then scans the grid in row-major order and fires every cell whose counter
/// has reached its threshold. Pulses fired now arrive next generation. Pulses
/// leaving a bounded grid are lost.
#[derive(Debug, Clone)]
pub struct CoDi {
    threshold: u32,
    edges: Edges,
    pending: Vec<Pulse>,
}
impl fmt::Display for CoDi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CoDi (threshold {})", self.threshold)
    }
}
impl CoDi {
    /// Constructs the rule with the given neuron firing threshold.
    pub fn new(threshold: u32, edges: Edges) -> Result<Self, ValidationError> {
        if threshold == 0 {
            return Err(ValidationError::ZeroThreshold);
        }
        Ok(Self {
            threshold,
            edges,
            pending: vec![],
        })
    }
    /// Returns the neuron firing threshold.
    pub fn threshold(&self) -> u32 {
        self.threshold
    }
    /// Returns the pulses that will arrive next generation.
    pub fn pending(&self) -> &[Pulse] {
        &self.pending
    }
}
impl AgentRule<CoDiCell> for CoDi {
    fn advance(&mut self, grid: &mut Grid<CoDiCell>) -> SimResult<()> {
        for pulse in &self.pending {
            grid.get_mut(pulse.target)?.receive(pulse.from);
        }
        // Pulses in flight are only replaced once the whole generation succeeds.
        let mut fired = vec![];
        for pos in grid.coords() {
            let cell = grid.get_mut(pos)?;
            let ready = cell
                .threshold(self.threshold)
                .map_or(false, |t| cell.activation_counter >= t);
            if !ready {
                continue;
            }
            for dir in cell.fire() {
                let (drow, dcol) = dir.offset();
                if let Some(target) = grid.neighbor(pos, drow, dcol, self.edges) {
                    fired.push(Pulse {
                        target,
                        from: dir.opposite(),
                    });
                }
            }
        }
        self.pending = fired;
        Ok(())
    }
}
