//! Frozen simulation outcome consumed by the advisory and web layers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::actions::ActionId;
use crate::numbers::percent_of;
use crate::simulator::Step;
use crate::state::{CraftingState, Recipe};

/// Overall classification of one rotation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CraftStatus {
    /// Completed with quality at the recipe ceiling.
    HqSuccess,
    /// Completed below the quality ceiling.
    Success,
    /// Durability exhausted before the progress target.
    FailedDurability,
    /// Rotation exhausted before the progress target.
    FailedIncomplete,
}

impl CraftStatus {
    /// Whether the craft completed at all.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::HqSuccess | Self::Success)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HqSuccess => "hq_success",
            Self::Success => "success",
            Self::FailedDurability => "failed_durability",
            Self::FailedIncomplete => "failed_incomplete",
        }
    }
}

impl fmt::Display for CraftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The complete, ordered trace of one rotation attempt.
///
/// Created once per run and never mutated afterwards; the advisory layer
/// reads it as a frozen trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub recipe: Recipe,
    pub steps: Vec<Step>,
    /// Final crafting state after the last recorded step.
    pub state: CraftingState,
    pub status: CraftStatus,
    /// Seed of a probabilistic run, absent for deterministic runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl SimulationResult {
    pub(crate) fn seal(
        recipe: Recipe,
        steps: Vec<Step>,
        state: CraftingState,
        status: CraftStatus,
        seed: Option<u64>,
    ) -> Self {
        Self {
            recipe,
            steps,
            state,
            status,
            seed,
        }
    }

    /// Progress toward the recipe target, clamped to 0..=100.
    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        percent_of(self.state.progress, self.recipe.progress)
    }

    /// Quality toward the recipe ceiling, clamped to 0..=100.
    #[must_use]
    pub fn quality_percent(&self) -> u8 {
        percent_of(self.state.quality, self.recipe.quality)
    }

    /// First step ordinal satisfying a predicate.
    ///
    /// Absent matches are `None`; callers must handle absence explicitly
    /// rather than letting a sentinel participate in ordering comparisons.
    #[must_use]
    pub fn first_index<F>(&self, predicate: F) -> Option<usize>
    where
        F: Fn(&Step) -> bool,
    {
        self.steps.iter().position(predicate)
    }

    /// First step ordinal where a given action was recorded.
    #[must_use]
    pub fn first_action_index(&self, action: ActionId) -> Option<usize> {
        self.first_index(|step| step.action == action)
    }

    /// Whether any step satisfies a predicate.
    #[must_use]
    pub fn any_step<F>(&self, predicate: F) -> bool
    where
        F: Fn(&Step) -> bool,
    {
        self.steps.iter().any(predicate)
    }
}
