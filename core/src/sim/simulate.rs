use crate::error::SimResult;

/// Cell-type-independent automaton simulation methods.
pub trait Simulate {
    /// Returns the number of columns in the grid.
    fn width(&self) -> usize;
    /// Returns the number of rows in the grid.
    fn height(&self) -> usize;
    /// Returns the number of generations that have elapsed in the simulation.
    fn generation_count(&self) -> u64;
    /// Steps forward in the simulation by one generation.
    fn step(&mut self) -> SimResult<()>;
    /// Returns a human-readable description of the rule.
    fn rule_name(&self) -> String;
}

/// Access to an inner `Simulate` implementation.
///
/// Wrappers such as `AnyAutomaton` implement these two methods and get
/// `Simulate` through the blanket impl below.
pub trait AsSimulate {
    /// Convert to an immutable Simulate trait object.
    fn as_sim(&self) -> &dyn Simulate;
    /// Convert to a mutable Simulate trait object.
    fn as_sim_mut(&mut self) -> &mut dyn Simulate;
}

impl<T> Simulate for T
where
    T: AsSimulate,
{
    fn width(&self) -> usize {
        self.as_sim().width()
    }
    fn height(&self) -> usize {
        self.as_sim().height()
    }
    fn generation_count(&self) -> u64 {
        self.as_sim().generation_count()
    }
    fn step(&mut self) -> SimResult<()> {
        self.as_sim_mut().step()
    }
    fn rule_name(&self) -> String {
        self.as_sim().rule_name()
    }
}
