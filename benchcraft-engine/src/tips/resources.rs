//! Rules about CP, durability, and repair waste.

use crate::actions::{ActionId, MASTERS_MEND_RESTORE};
use crate::result::{CraftStatus, SimulationResult};
use crate::simulator::SkipReason;
use crate::tips::{RotationTip, TipType};

/// CP left over that would have paid for the cheapest quality action.
const LEFTOVER_CP_THRESHOLD: u32 = 18;

/// Some action could not be paid for and was skipped.
pub struct CpShortfall;

impl RotationTip for CpShortfall {
    fn tip_type(&self) -> TipType {
        TipType::Warning
    }

    fn message_key(&self) -> &'static str {
        "not_enough_cp"
    }

    fn can_be_applied_to(&self, result: &SimulationResult) -> bool {
        result.any_step(|step| step.skipped)
    }

    fn matches(&self, result: &SimulationResult) -> bool {
        result.any_step(|step| step.skip_reason == Some(SkipReason::InsufficientCp))
    }
}

/// Some action's precondition failed where it was queued.
pub struct UnusableActions;

impl RotationTip for UnusableActions {
    fn tip_type(&self) -> TipType {
        TipType::Warning
    }

    fn message_key(&self) -> &'static str {
        "action_requirements_not_met"
    }

    fn can_be_applied_to(&self, result: &SimulationResult) -> bool {
        result.any_step(|step| step.skipped)
    }

    fn matches(&self, result: &SimulationResult) -> bool {
        result.any_step(|step| step.skip_reason == Some(SkipReason::RequirementNotMet))
    }
}

/// A repair restored less than its nominal amount because the durability
/// cap clipped it.
pub struct WastedRepair;

impl RotationTip for WastedRepair {
    fn tip_type(&self) -> TipType {
        TipType::Info
    }

    fn message_key(&self) -> &'static str {
        "wasted_durability_repair"
    }

    fn can_be_applied_to(&self, result: &SimulationResult) -> bool {
        result.any_step(|step| step.action == ActionId::MastersMend)
    }

    fn matches(&self, result: &SimulationResult) -> bool {
        result.any_step(|step| {
            step.action == ActionId::MastersMend
                && step.success
                && step.durability_difference < MASTERS_MEND_RESTORE
        })
    }
}

/// The craft ended with CP that could still have bought quality.
pub struct LeftoverCp;

impl RotationTip for LeftoverCp {
    fn tip_type(&self) -> TipType {
        TipType::Info
    }

    fn message_key(&self) -> &'static str {
        "unspent_cp"
    }

    fn can_be_applied_to(&self, result: &SimulationResult) -> bool {
        !result.steps.is_empty() && result.status != CraftStatus::FailedDurability
    }

    fn matches(&self, result: &SimulationResult) -> bool {
        result.state.craft_points >= LEFTOVER_CP_THRESHOLD
            && result.state.quality < result.recipe.quality
    }
}
