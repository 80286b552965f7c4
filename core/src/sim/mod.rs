//! Rules and simulation algorithms.

pub mod rule;
mod simulate;

pub use simulate::{AsSimulate, Simulate};
