//! Rules about the order buffs and effects appear in a rotation.

use crate::actions::{ActionCategory, ActionId, GREAT_STRIDES_STEPS};
use crate::result::SimulationResult;
use crate::simulator::Step;
use crate::tips::{RotationTip, TipType};

fn gained_quality(step: &Step) -> bool {
    step.added_quality > 0
}

fn granted_inner_quiet(step: &Step) -> bool {
    step.success && step.action.grants_inner_quiet()
}

/// Quality was raised but the stacking buff was never set up at all.
pub struct MissingInnerQuiet;

impl RotationTip for MissingInnerQuiet {
    fn tip_type(&self) -> TipType {
        TipType::Warning
    }

    fn message_key(&self) -> &'static str {
        "missing_inner_quiet"
    }

    fn can_be_applied_to(&self, result: &SimulationResult) -> bool {
        result.any_step(gained_quality)
    }

    fn matches(&self, result: &SimulationResult) -> bool {
        result.first_index(granted_inner_quiet).is_none()
    }
}

/// The stacking buff was set up only after quality had already been
/// raised, so the early gains missed their stacks.
pub struct UseInnerQuietBeforeQuality;

impl RotationTip for UseInnerQuietBeforeQuality {
    fn tip_type(&self) -> TipType {
        TipType::Warning
    }

    fn message_key(&self) -> &'static str {
        "use_inner_quiet_before_quality_increase"
    }

    fn can_be_applied_to(&self, result: &SimulationResult) -> bool {
        result.any_step(gained_quality) && result.any_step(granted_inner_quiet)
    }

    fn matches(&self, result: &SimulationResult) -> bool {
        // Both indices exist here thanks to the applicability gate; absence
        // is never allowed to masquerade as "before".
        match (
            result.first_index(granted_inner_quiet),
            result.first_index(gained_quality),
        ) {
            (Some(buff_index), Some(quality_index)) => buff_index > quality_index,
            _ => false,
        }
    }
}

/// A double-strike buff ran out without any quality action consuming it.
pub struct GreatStridesWasted;

impl GreatStridesWasted {
    fn grant_wasted(result: &SimulationResult, grant_index: usize) -> bool {
        let mut aged: u8 = 0;
        for step in result.steps.iter().skip(grant_index + 1) {
            if step.skipped {
                continue;
            }
            if step.action == ActionId::GreatStrides && step.success {
                // Re-granted before use: the first grant bought nothing.
                return true;
            }
            if step.action.category() == ActionCategory::Quality && step.success {
                return false;
            }
            aged += 1;
            if aged >= GREAT_STRIDES_STEPS {
                return true;
            }
        }
        true
    }
}

impl RotationTip for GreatStridesWasted {
    fn tip_type(&self) -> TipType {
        TipType::Warning
    }

    fn message_key(&self) -> &'static str {
        "great_strides_wasted"
    }

    fn can_be_applied_to(&self, result: &SimulationResult) -> bool {
        result.any_step(|step| step.action == ActionId::GreatStrides && step.success)
    }

    fn matches(&self, result: &SimulationResult) -> bool {
        result
            .steps
            .iter()
            .enumerate()
            .filter(|(_, step)| step.action == ActionId::GreatStrides && step.success)
            .any(|(index, _)| Self::grant_wasted(result, index))
    }
}
