//! Command-line arguments.

use anyhow::{Context, Result};
use clap::Parser;
use std::time::Duration;

use casim_core::prelude::*;

/// Runs a cellular automaton and prints each generation.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Automaton to run: life, brain, rule110, ant, wator, or codi.
    #[arg(default_value = "life")]
    pub kind: String,
    /// Number of columns.
    #[arg(long, default_value_t = 40)]
    pub width: usize,
    /// Number of rows.
    #[arg(long, default_value_t = 20)]
    pub height: usize,
    /// Number of layers (CoDi only).
    #[arg(long)]
    pub depth: Option<usize>,
    /// Number of generations to print.
    #[arg(short, long, default_value_t = 20)]
    pub generations: u64,
    /// Play continuously in the background instead of stepping on demand.
    #[arg(short, long)]
    pub automatic: bool,
    /// Milliseconds between generations when playing continuously.
    #[arg(long = "interval-ms", value_name = "MILLISECONDS", default_value_t = 100)]
    pub interval_ms: u64,
    /// Treat cells past the edges as empty instead of wrapping around.
    #[arg(long)]
    pub bounded: bool,
    /// Seed for the initial state and random choices.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Life-like rule in B/S notation (life only).
    #[arg(long, value_name = "RULE")]
    pub rule: Option<String>,
    /// Fraction of cells alive at the start (life and brain).
    #[arg(long)]
    pub density: Option<f64>,
    /// Start Brian's Brain from a single live pair instead of random noise.
    #[arg(long)]
    pub seeded_brain: bool,
    /// Wolfram code of the elementary rule (rule110 only).
    #[arg(long, default_value_t = 110)]
    pub code: u8,
    /// Seed the top row randomly (rule110 only).
    #[arg(long)]
    pub random_row: bool,
    /// Number of ants (ant only).
    #[arg(long, default_value_t = 1)]
    pub ants: usize,
    /// Fraction of cells starting with prey (wator only).
    #[arg(long)]
    pub prey: Option<f64>,
    /// Fraction of cells starting with a predator (wator only).
    #[arg(long)]
    pub predators: Option<f64>,
    /// Number of pulses a neuron collects before firing (codi only).
    #[arg(long)]
    pub threshold: Option<u32>,
}

impl Args {
    /// Returns the interval between generations when playing continuously.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Builds the engine configuration described by the arguments.
    pub fn to_config(&self) -> Result<AutomatonConfig> {
        let mut config = AutomatonConfig {
            width: self.width,
            height: self.height,
            depth: self.depth,
            automatic: self.automatic,
            edges: if self.bounded {
                Edges::Bounded
            } else {
                Edges::Wrap
            },
            seed: self.seed,
            ..AutomatonConfig::default()
        };

        if let Some(rule) = &self.rule {
            config.life.rule = rule.parse().context("Invalid --rule")?;
        }
        if let Some(density) = self.density {
            config.life.density = density;
            config.brain.density = density;
        }
        config.brain.random = !self.seeded_brain;
        config.rule110.code = self.code;
        config.rule110.random_row = self.random_row;
        config.ant.ants = self.ants;
        if let Some(prey) = self.prey {
            config.wator.prey_density = prey;
        }
        if let Some(predators) = self.predators {
            config.wator.predator_density = predators;
        }
        if let Some(threshold) = self.threshold {
            config.codi.threshold = threshold;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_to_config() {
        let args = Args::parse_from(&[
            "casim", "wator", "--width", "8", "--height", "6", "--bounded", "--prey", "0.5",
        ]);
        let config = args.to_config().unwrap();
        assert_eq!("wator", args.kind);
        assert_eq!((8, 6), (config.width, config.height));
        assert_eq!(Edges::Bounded, config.edges);
        assert_eq!(0.5, config.wator.prey_density);

        let args = Args::parse_from(&["casim", "--rule", "B36/S23"]);
        assert_eq!("B36/S23", args.to_config().unwrap().life.rule.to_string());

        let args = Args::parse_from(&["casim", "--rule", "highlife"]);
        assert!(args.to_config().is_err());
    }
}
