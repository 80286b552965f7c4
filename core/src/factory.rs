//! Kind-keyed construction of automata from a configuration.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::automaton::{AnyAutomaton, Automaton};
use crate::config::{AutomatonConfig, AutomatonKind};
use crate::coord::{Coord, Direction, Edges};
use crate::error::SimResult;
use crate::grid::Grid;
use crate::sim::rule::*;

/// Builds an automaton of the kind named `kind`.
///
/// Fails with `SimError::UnsupportedAutomaton` if no automaton goes by that
/// name, or with a validation error if the configuration is invalid for it.
pub fn build(kind: &str, config: &AutomatonConfig) -> SimResult<AnyAutomaton> {
    build_kind(kind.parse()?, config)
}

/// Builds an automaton of the given kind.
pub fn build_kind(kind: AutomatonKind, config: &AutomatonConfig) -> SimResult<AnyAutomaton> {
    config.validate(kind)?;
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    debug!(
        "Building {} automaton on a {}x{} grid ({:?} edges, seed {:?})",
        kind, config.width, config.height, config.edges, config.seed,
    );
    Ok(match kind {
        AutomatonKind::GameOfLife => AnyAutomaton::GameOfLife(game_of_life(config, &mut rng)?),
        AutomatonKind::BryansBrain => AnyAutomaton::BryansBrain(bryans_brain(config, &mut rng)?),
        AutomatonKind::Rule110 => AnyAutomaton::Rule110(rule110(config, &mut rng)?),
        AutomatonKind::LangtonsAnt => AnyAutomaton::LangtonsAnt(langtons_ant(config, &mut rng)?),
        AutomatonKind::Wator => AnyAutomaton::Wator(wator(config, &mut rng)?),
        AutomatonKind::CoDi => AnyAutomaton::CoDi(codi(config, &mut rng)?),
    })
}

fn center(config: &AutomatonConfig) -> Coord {
    Coord::new((config.height / 2) as isize, (config.width / 2) as isize)
}

fn random_coord(config: &AutomatonConfig, rng: &mut StdRng) -> Coord {
    Coord::new(
        rng.gen_range(0..config.height) as isize,
        rng.gen_range(0..config.width) as isize,
    )
}

fn game_of_life(config: &AutomatonConfig, rng: &mut StdRng) -> SimResult<Automaton<LifeState>> {
    let density = config.life.density;
    let grid = Grid::new(config.width, config.height, |_| {
        if rng.gen_bool(density) {
            LifeState::Alive
        } else {
            LifeState::Dead
        }
    })?;
    let rule = config.life.rule.with_edges(config.edges);
    debug!("Life-like rule {}", rule);
    Ok(Automaton::new(grid, rule.into_rule()))
}

fn bryans_brain(config: &AutomatonConfig, rng: &mut StdRng) -> SimResult<Automaton<BrainState>> {
    let mut grid = if config.brain.random {
        let density = config.brain.density;
        Grid::new(config.width, config.height, |_| {
            if rng.gen_bool(density) {
                BrainState::Alive
            } else {
                BrainState::Dead
            }
        })?
    } else {
        Grid::filled(config.width, config.height, BrainState::Dead)?
    };
    if !config.brain.random {
        let mid = center(config);
        grid.set(mid, BrainState::Alive)?;
        if let Some(partner) = grid.neighbor(mid, 0, 1, Edges::Bounded) {
            grid.set(partner, BrainState::Alive)?;
        }
    }
    let rule = BryansBrain {
        edges: config.edges,
    };
    Ok(Automaton::new(grid, rule.into_rule()))
}

fn rule110(config: &AutomatonConfig, rng: &mut StdRng) -> SimResult<Automaton<Rule110State>> {
    let rightmost = config.width as isize - 1;
    let random_row = config.rule110.random_row;
    let grid = Grid::new(config.width, config.height, |pos| {
        let alive = pos.row == 0
            && if random_row {
                rng.gen_bool(0.5)
            } else {
                pos.col == rightmost
            };
        if alive {
            Rule110State::Alive
        } else {
            Rule110State::Dead
        }
    })?;
    let rule = Elementary::new(config.rule110.code, config.edges);
    Ok(Automaton::new(grid, rule.into_rule()))
}

fn langtons_ant(config: &AutomatonConfig, rng: &mut StdRng) -> SimResult<Automaton<AntCell>> {
    let mut grid = Grid::filled(config.width, config.height, AntCell::default())?;
    let ants = (0..config.ant.ants)
        .map(|i| Ant {
            pos: if i == 0 {
                center(config)
            } else {
                random_coord(config, rng)
            },
            heading: Direction::North,
        })
        .collect();
    let rule = LangtonsAnt::new(ants, config.edges);
    rule.place_ants(&mut grid)?;
    Ok(Automaton::new(grid, rule.into_rule()))
}

fn wator(config: &AutomatonConfig, rng: &mut StdRng) -> SimResult<Automaton<WatorCell>> {
    let params = config.wator.params;
    let prey_density = config.wator.prey_density;
    let predator_density = config.wator.predator_density;

    let mut grid = Grid::filled(config.width, config.height, WatorCell::empty(params.max_health))?;
    for cell in grid.values_mut() {
        let roll: f64 = rng.gen();
        let state = if roll < prey_density {
            WatorState::Prey
        } else if roll < prey_density + predator_density {
            WatorState::Predator
        } else {
            continue;
        };
        let health = rng.gen_range(1..=params.max_health);
        *cell = WatorCell::new(state, health, params.max_health)?;
    }

    let rule = Wator::new(params, config.edges, StdRng::seed_from_u64(rng.gen()))?;
    Ok(Automaton::new(grid, rule.into_rule()))
}

fn codi(config: &AutomatonConfig, rng: &mut StdRng) -> SimResult<Automaton<CoDiCell>> {
    let neuron_density = config.codi.neuron_density;
    let wire_density = config.codi.wire_density;
    let grid = Grid::new(config.width, config.height, |_| {
        let roll: f64 = rng.gen();
        let state = if roll < neuron_density {
            CoDiState::Neuron
        } else if roll < neuron_density + wire_density {
            if rng.gen_bool(0.5) {
                CoDiState::Axon
            } else {
                CoDiState::Dendrite
            }
        } else {
            CoDiState::Blank
        };
        CoDiCell::idle(state)
    })?;
    let rule = CoDi::new(config.codi.threshold, config.edges)?;
    Ok(Automaton::new(grid, rule.into_rule()))
}
