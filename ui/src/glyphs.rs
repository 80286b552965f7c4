//! Text rendering of generations.

use casim_core::prelude::*;

/// Maps a cell state to the character drawn for it.
pub trait Glyph {
    /// Returns the character drawn for the state.
    fn glyph(self) -> char;
}

/// Character for empty, dead, or otherwise uninteresting cells.
pub const BLANK: char = '.';

impl Glyph for LifeState {
    fn glyph(self) -> char {
        match self {
            LifeState::Alive => '#',
            LifeState::Dead => BLANK,
        }
    }
}

impl Glyph for BrainState {
    fn glyph(self) -> char {
        match self {
            BrainState::Alive => '#',
            BrainState::Dying => '+',
            BrainState::Dead => BLANK,
        }
    }
}

impl Glyph for Rule110State {
    fn glyph(self) -> char {
        match self {
            Rule110State::Alive => '#',
            Rule110State::Dead => BLANK,
        }
    }
}

impl Glyph for LangtonState {
    fn glyph(self) -> char {
        match self {
            LangtonState::White => BLANK,
            LangtonState::Black => '#',
            LangtonState::Ant => '@',
        }
    }
}

impl Glyph for WatorState {
    fn glyph(self) -> char {
        match self {
            WatorState::Empty => BLANK,
            WatorState::Prey => 'o',
            WatorState::Predator => 'X',
        }
    }
}

impl Glyph for CoDiState {
    fn glyph(self) -> char {
        match self {
            CoDiState::Blank => BLANK,
            CoDiState::Neuron => 'N',
            CoDiState::Axon => '-',
            CoDiState::Dendrite => '|',
        }
    }
}

/// Renders a generation as one line of glyphs per row, preceded by a header.
pub fn render<C>(generation: &Generation<C>) -> String
where
    C: Cell,
    C::State: Glyph,
{
    let grid = generation.grid();
    let mut ret = String::with_capacity((grid.width() + 1) * (grid.height() + 1));
    ret.push_str(&format!("generation {}\n", generation.index));
    for row in grid.rows() {
        ret.extend(row.iter().map(|cell| cell.state().glyph()));
        ret.push('\n');
    }
    ret
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let grid = Grid::from_rows(vec![
            vec![BrainState::Alive, BrainState::Dead],
            vec![BrainState::Dying, BrainState::Alive],
        ])
        .unwrap();
        let generation = Generation {
            index: 3,
            grid: std::sync::Arc::new(grid),
        };
        assert_eq!("generation 3\n#.\n+#\n", render(&generation));
    }
}
