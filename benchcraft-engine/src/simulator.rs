//! The simulation fold: applies an ordered rotation to an initial state.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::actions::{self, ActionId};
use crate::buffs::{BuffKind, Buffs};
use crate::result::{CraftStatus, SimulationResult};
use crate::state::{CraftParams, CrafterStats, CraftingState, Recipe};

/// Errors raised when a rotation or its inputs are rejected at ingestion,
/// before any step runs.
#[derive(Debug, Error, PartialEq)]
pub enum RotationError {
    #[error("unknown action identity `{name}`")]
    UnknownAction { name: String },
    #[error("recipe {field} must be positive (got {value})")]
    InvalidRecipe { field: &'static str, value: f64 },
    #[error("crafter {field} must be positive")]
    InvalidStats { field: &'static str },
}

/// Why a queued action could not be legally applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The action's CP cost exceeded the remaining pool.
    InsufficientCp,
    /// A non-CP precondition failed (first-step-only action used late,
    /// stack-consuming action without its buff).
    RequirementNotMet,
}

/// The recorded outcome of applying one action. Immutable once produced;
/// a step's ordinal position is itself meaningful data consumed by the
/// advisory layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub index: usize,
    pub action: ActionId,
    pub added_progress: u32,
    pub added_quality: u32,
    /// CP delta, negative when spent.
    pub cp_difference: i32,
    /// Net durability delta, including repair and manipulation restores.
    pub durability_difference: i32,
    pub success: bool,
    pub skipped: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<SkipReason>,
    /// Buff snapshot taken right after the application resolved.
    pub buffs: Buffs,
}

impl Step {
    fn skipped(index: usize, action: ActionId, reason: SkipReason, buffs: Buffs) -> Self {
        Self {
            index,
            action,
            added_progress: 0,
            added_quality: 0,
            cp_difference: 0,
            durability_difference: 0,
            success: false,
            skipped: true,
            skip_reason: Some(reason),
            buffs,
        }
    }
}

/// Simulator state machine phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunPhase {
    Running,
    Succeeded,
    FailedDurability,
}

/// One validated rotation attempt: recipe, crafter stats, and the resolved
/// action sequence. Running it is side-effect free; every run allocates
/// and owns its own state and result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Simulation {
    params: CraftParams,
    rotation: Vec<ActionId>,
}

impl Simulation {
    /// Build a simulation from already-resolved action identities.
    ///
    /// # Errors
    ///
    /// Returns a `RotationError` when the recipe or stats violate their
    /// invariants.
    pub fn new(
        recipe: Recipe,
        stats: CrafterStats,
        rotation: Vec<ActionId>,
    ) -> Result<Self, RotationError> {
        recipe.validate()?;
        stats.validate()?;
        Ok(Self {
            params: CraftParams { recipe, stats },
            rotation,
        })
    }

    /// Build a simulation from raw action identities as handed over by the
    /// UI layer or a persisted rotation.
    ///
    /// # Errors
    ///
    /// Returns `RotationError::UnknownAction` for the first identity that
    /// is not in the catalog, before any step is produced.
    pub fn from_names<S: AsRef<str>>(
        recipe: Recipe,
        stats: CrafterStats,
        names: &[S],
    ) -> Result<Self, RotationError> {
        let rotation = names
            .iter()
            .map(|name| {
                name.as_ref()
                    .parse::<ActionId>()
                    .map_err(|()| RotationError::UnknownAction {
                        name: name.as_ref().to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(recipe, stats, rotation)
    }

    #[must_use]
    pub fn params(&self) -> &CraftParams {
        &self.params
    }

    #[must_use]
    pub fn rotation(&self) -> &[ActionId] {
        &self.rotation
    }

    /// Deterministic run: success rates are treated as guaranteed, the
    /// mode interactive previews use. Repeated runs over the same inputs
    /// produce identical results.
    #[must_use]
    pub fn run(&self) -> SimulationResult {
        self.fold(None)
    }

    /// Probabilistic run: per-action success rolls drawn from a seeded
    /// stream, so a fixed seed reproduces the exact same trace.
    #[must_use]
    pub fn run_seeded(&self, seed: u64) -> SimulationResult {
        self.fold(Some(seed))
    }

    fn fold(&self, seed: Option<u64>) -> SimulationResult {
        let recipe = &self.params.recipe;
        let mut rng = seed.map(ChaCha20Rng::seed_from_u64);
        let mut state = CraftingState::initial(&self.params);
        let mut steps = Vec::with_capacity(self.rotation.len());
        let mut phase = RunPhase::Running;

        for id in &self.rotation {
            if phase != RunPhase::Running {
                // Terminal: remaining queued actions are not consumed.
                break;
            }
            let action = actions::action(*id);

            let cost = action.cp_cost(&state);
            let reason = if cost > state.craft_points {
                Some(SkipReason::InsufficientCp)
            } else if !action.can_execute(&state) {
                Some(SkipReason::RequirementNotMet)
            } else {
                None
            };
            if let Some(reason) = reason {
                steps.push(Step::skipped(
                    state.step_index,
                    *id,
                    reason,
                    state.buffs.clone(),
                ));
                state.last_action = None;
                state.step_index += 1;
                continue;
            }

            state.buffs.expire();

            let rate = action.success_rate(&state);
            let success = match rng.as_mut() {
                Some(rng) if rate < 100 => rng.gen_range(0u8..100) < rate,
                _ => true,
            };

            let progress_before = state.progress;
            let quality_before = state.quality;
            let durability_before = state.durability;
            let durability_cost = action.durability_cost(&state);

            if success {
                action.apply(&self.params, &mut state);
            }
            state.craft_points -= cost;
            state.durability -= durability_cost;
            let manipulation_step = state
                .buffs
                .get(BuffKind::Manipulation)
                .map(|buff| buff.applied_step);
            if state.durability > 0 && manipulation_step.is_some_and(|step| step != state.step_index)
            {
                state.restore_durability(actions::MANIPULATION_RESTORE, recipe.durability);
            }

            steps.push(Step {
                index: state.step_index,
                action: *id,
                added_progress: state.progress - progress_before,
                added_quality: state.quality - quality_before,
                cp_difference: -(cost as i32),
                durability_difference: state.durability - durability_before,
                success,
                skipped: false,
                skip_reason: None,
                buffs: state.buffs.clone(),
            });

            state.last_action = if success { Some(*id) } else { None };
            state.buffs.tick(state.step_index);

            if state.progress >= recipe.progress {
                phase = RunPhase::Succeeded;
            } else if state.durability <= 0 {
                phase = RunPhase::FailedDurability;
            }
            state.step_index += 1;
        }

        let status = match phase {
            RunPhase::Succeeded if state.quality >= recipe.quality => CraftStatus::HqSuccess,
            RunPhase::Succeeded => CraftStatus::Success,
            RunPhase::FailedDurability => CraftStatus::FailedDurability,
            RunPhase::Running => CraftStatus::FailedIncomplete,
        };

        SimulationResult::seal(recipe.clone(), steps, state, status, seed)
    }
}
