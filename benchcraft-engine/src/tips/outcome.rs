//! Rules restating the terminal classification as advisories.

use crate::result::{CraftStatus, SimulationResult};
use crate::tips::{RotationTip, TipType};

/// The rotation ran out of actions before completing the craft.
pub struct RotationIncomplete;

impl RotationTip for RotationIncomplete {
    fn tip_type(&self) -> TipType {
        TipType::Warning
    }

    fn message_key(&self) -> &'static str {
        "rotation_incomplete"
    }

    fn can_be_applied_to(&self, result: &SimulationResult) -> bool {
        !result.steps.is_empty()
    }

    fn matches(&self, result: &SimulationResult) -> bool {
        result.status == CraftStatus::FailedIncomplete
    }
}

/// The craft broke before the progress target was reached.
pub struct DurabilityExhausted;

impl RotationTip for DurabilityExhausted {
    fn tip_type(&self) -> TipType {
        TipType::Warning
    }

    fn message_key(&self) -> &'static str {
        "durability_exhausted"
    }

    fn can_be_applied_to(&self, result: &SimulationResult) -> bool {
        !result.steps.is_empty()
    }

    fn matches(&self, result: &SimulationResult) -> bool {
        result.status == CraftStatus::FailedDurability
    }
}

/// The rotation completes the craft at the quality ceiling.
pub struct HqReached;

impl RotationTip for HqReached {
    fn tip_type(&self) -> TipType {
        TipType::Success
    }

    fn message_key(&self) -> &'static str {
        "rotation_reaches_hq"
    }

    fn can_be_applied_to(&self, result: &SimulationResult) -> bool {
        !result.steps.is_empty()
    }

    fn matches(&self, result: &SimulationResult) -> bool {
        result.status == CraftStatus::HqSuccess
    }
}
