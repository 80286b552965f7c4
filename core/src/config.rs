//! Engine-facing configuration of an automaton.

use std::fmt;
use std::str::FromStr;

use crate::coord::Edges;
use crate::error::{SimError, ValidationError};
use crate::sim::rule::{MooreTotalistic, WatorParams, LIFE};

/// Kind of automaton, as selected by a frontend.
#[allow(missing_docs)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AutomatonKind {
    GameOfLife,
    BryansBrain,
    Rule110,
    LangtonsAnt,
    Wator,
    CoDi,
}
impl AutomatonKind {
    /// Every kind of automaton.
    pub const ALL: [AutomatonKind; 6] = [
        Self::GameOfLife,
        Self::BryansBrain,
        Self::Rule110,
        Self::LangtonsAnt,
        Self::Wator,
        Self::CoDi,
    ];

    /// Returns the short name used to select this kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::GameOfLife => "life",
            Self::BryansBrain => "brain",
            Self::Rule110 => "rule110",
            Self::LangtonsAnt => "ant",
            Self::Wator => "wator",
            Self::CoDi => "codi",
        }
    }
}
impl fmt::Display for AutomatonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
impl FromStr for AutomatonKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, SimError> {
        let normalized = s.trim().to_ascii_lowercase().replace(|c| c == '-' || c == '_' || c == ' ', "");
        let kind = match normalized.as_str() {
            "life" | "gameoflife" => Self::GameOfLife,
            "brain" | "bryansbrain" | "briansbrain" => Self::BryansBrain,
            "rule110" => Self::Rule110,
            "ant" | "langtonsant" => Self::LangtonsAnt,
            "wator" => Self::Wator,
            "codi" => Self::CoDi,
            _ => return Err(SimError::UnsupportedAutomaton(s.to_owned())),
        };
        Ok(kind)
    }
}

/// Configuration shared by every kind of automaton, plus one section per kind.
///
/// Only the section matching the selected kind is read.
#[derive(Debug, Clone)]
pub struct AutomatonConfig {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// Number of layers. Only CoDi reads it, and only a single layer is
    /// supported.
    pub depth: Option<usize>,
    /// Whether the frontend should play continuously instead of stepping on
    /// request.
    pub automatic: bool,
    /// Edge policy for neighbor lookups.
    pub edges: Edges,
    /// Seed for random initial states and random choices. `None` seeds from
    /// the OS.
    pub seed: Option<u64>,

    /// Game of Life settings.
    pub life: LifeConfig,
    /// Brian's Brain settings.
    pub brain: BrainConfig,
    /// Rule110 settings.
    pub rule110: Rule110Config,
    /// Langton's Ant settings.
    pub ant: AntConfig,
    /// Wator settings.
    pub wator: WatorConfig,
    /// CoDi settings.
    pub codi: CoDiConfig,
}
impl Default for AutomatonConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 48,
            depth: None,
            automatic: false,
            edges: Edges::Wrap,
            seed: None,

            life: LifeConfig::default(),
            brain: BrainConfig::default(),
            rule110: Rule110Config::default(),
            ant: AntConfig::default(),
            wator: WatorConfig::default(),
            codi: CoDiConfig::default(),
        }
    }
}
impl AutomatonConfig {
    /// Checks the settings read when building an automaton of kind `kind`.
    pub fn validate(&self, kind: AutomatonKind) -> Result<(), ValidationError> {
        if self.width == 0 || self.height == 0 {
            return Err(ValidationError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }
        match kind {
            AutomatonKind::GameOfLife => check_density("life.density", self.life.density),
            AutomatonKind::BryansBrain => check_density("brain.density", self.brain.density),
            AutomatonKind::Rule110 | AutomatonKind::LangtonsAnt => Ok(()),
            AutomatonKind::Wator => {
                check_density("wator.prey_density", self.wator.prey_density)?;
                check_density("wator.predator_density", self.wator.predator_density)?;
                check_density(
                    "wator.prey_density + wator.predator_density",
                    self.wator.prey_density + self.wator.predator_density,
                )?;
                self.wator.params.validate()
            }
            AutomatonKind::CoDi => {
                match self.depth {
                    None | Some(1) => (),
                    Some(depth) => return Err(ValidationError::UnsupportedDepth(depth)),
                }
                if self.codi.threshold == 0 {
                    return Err(ValidationError::ZeroThreshold);
                }
                check_density("codi.neuron_density", self.codi.neuron_density)?;
                check_density("codi.wire_density", self.codi.wire_density)?;
                check_density(
                    "codi.neuron_density + codi.wire_density",
                    self.codi.neuron_density + self.codi.wire_density,
                )
            }
        }
    }
}

fn check_density(name: &'static str, value: f64) -> Result<(), ValidationError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::DensityOutOfRange { name, value })
    }
}

/// Game of Life settings.
#[derive(Debug, Clone)]
pub struct LifeConfig {
    /// Life-like rule. The edge policy comes from `AutomatonConfig::edges`.
    pub rule: MooreTotalistic,
    /// Fraction of cells alive at the start.
    pub density: f64,
}
impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            rule: LIFE,
            density: 0.3,
        }
    }
}

/// Brian's Brain settings.
#[derive(Debug, Clone)]
pub struct BrainConfig {
    /// Whether to seed the grid with random states. Otherwise it starts with
    /// a single live pair in the center.
    pub random: bool,
    /// Fraction of cells alive at the start, when seeding randomly.
    pub density: f64,
}
impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            random: true,
            density: 0.3,
        }
    }
}

/// Rule110 settings.
#[derive(Debug, Clone)]
pub struct Rule110Config {
    /// Wolfram code of the elementary rule.
    pub code: u8,
    /// Whether to seed the top row randomly. Otherwise it starts with a single
    /// live cell in the rightmost column.
    pub random_row: bool,
}
impl Default for Rule110Config {
    fn default() -> Self {
        Self {
            code: 110,
            random_row: false,
        }
    }
}

/// Langton's Ant settings.
#[derive(Debug, Clone)]
pub struct AntConfig {
    /// Number of ants. The first starts in the center; the rest start at
    /// random squares.
    pub ants: usize,
}
impl Default for AntConfig {
    fn default() -> Self {
        Self { ants: 1 }
    }
}

/// Wator settings.
#[derive(Debug, Clone)]
pub struct WatorConfig {
    /// Fraction of cells starting with prey.
    pub prey_density: f64,
    /// Fraction of cells starting with a predator.
    pub predator_density: f64,
    /// Health constants.
    pub params: WatorParams,
}
impl Default for WatorConfig {
    fn default() -> Self {
        Self {
            prey_density: 0.3,
            predator_density: 0.05,
            params: WatorParams::default(),
        }
    }
}

/// CoDi settings.
#[derive(Debug, Clone)]
pub struct CoDiConfig {
    /// Number of pulses a neuron collects before firing.
    pub threshold: u32,
    /// Fraction of cells starting as neurons.
    pub neuron_density: f64,
    /// Fraction of cells starting as axons or dendrites.
    pub wire_density: f64,
}
impl Default for CoDiConfig {
    fn default() -> Self {
        Self {
            threshold: 2,
            neuron_density: 0.05,
            wire_density: 0.45,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_round_trip() {
        for &kind in &AutomatonKind::ALL {
            assert_eq!(Ok(kind), kind.name().parse());
        }
        assert_eq!(Ok(AutomatonKind::LangtonsAnt), "Langtons-Ant".parse());
        assert_eq!(Ok(AutomatonKind::BryansBrain), "Bryans_Brain".parse());
        assert_eq!(
            Err(SimError::UnsupportedAutomaton("hashlife".to_owned())),
            "hashlife".parse::<AutomatonKind>()
        );
    }

    #[test]
    fn test_config_validation() {
        let config = AutomatonConfig::default();
        for &kind in &AutomatonKind::ALL {
            assert_eq!(Ok(()), config.validate(kind));
        }

        let flat = AutomatonConfig {
            height: 0,
            ..AutomatonConfig::default()
        };
        assert!(flat.validate(AutomatonKind::Rule110).is_err());

        let mut crowded = AutomatonConfig::default();
        crowded.wator.prey_density = 0.8;
        crowded.wator.predator_density = 0.5;
        assert!(crowded.validate(AutomatonKind::Wator).is_err());
        // Other kinds don't read the Wator section.
        assert!(crowded.validate(AutomatonKind::GameOfLife).is_ok());

        let deep = AutomatonConfig {
            depth: Some(3),
            ..AutomatonConfig::default()
        };
        assert_eq!(
            Err(ValidationError::UnsupportedDepth(3)),
            deep.validate(AutomatonKind::CoDi)
        );
    }
}
