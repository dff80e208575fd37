use super::{StepExecutor, StepOutcome};
use crate::error::Result;
use crate::plan::Step;
use std::collections::{HashMap, HashSet};
use std::thread;
use std::time::Duration;

/// Records every step it is given and answers with scripted outcomes.
///
/// Unscripted steps succeed with empty output. Outcomes can be keyed either by
/// execution order (0-based) or by the step's `describe()` text; order wins
/// when both match.
#[derive(Debug, Default)]
pub struct FakeExecutor {
    calls: Vec<Step>,
    by_position: HashMap<usize, StepOutcome>,
    by_description: HashMap<String, StepOutcome>,
    missing: HashSet<String>,
    delays: HashMap<usize, Duration>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// The `position`-th executed step returns `outcome`.
    pub fn at(mut self, position: usize, outcome: StepOutcome) -> Self {
        self.by_position.insert(position, outcome);
        self
    }

    /// Any step described as `description` returns `outcome`.
    pub fn on(mut self, description: impl Into<String>, outcome: StepOutcome) -> Self {
        self.by_description.insert(description.into(), outcome);
        self
    }

    /// The `position`-th executed step takes `duration` before answering.
    pub fn delay(mut self, position: usize, duration: Duration) -> Self {
        self.delays.insert(position, duration);
        self
    }

    /// Pretends `program` is not installed.
    pub fn without(mut self, program: impl Into<String>) -> Self {
        self.missing.insert(program.into());
        self
    }

    pub fn calls(&self) -> &[Step] {
        &self.calls
    }

    pub fn described_calls(&self) -> Vec<String> {
        self.calls.iter().map(Step::describe).collect()
    }
}

impl StepExecutor for FakeExecutor {
    fn locate(&self, program: &str) -> bool {
        !self.missing.contains(program)
    }

    fn execute(&mut self, step: &Step) -> Result<StepOutcome> {
        let position = self.calls.len();
        self.calls.push(step.clone());
        if let Some(duration) = self.delays.get(&position) {
            thread::sleep(*duration);
        }

        let outcome = self
            .by_position
            .get(&position)
            .or_else(|| self.by_description.get(&step.describe()))
            .cloned()
            .unwrap_or_else(StepOutcome::ok);
        Ok(outcome)
    }
}
