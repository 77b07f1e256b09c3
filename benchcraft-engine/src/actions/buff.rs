//! Buff-granting actions.

use crate::actions::{ActionId, CraftingAction};
use crate::buffs::BuffKind;
use crate::state::{CraftParams, CraftingState};

pub const VENERATION_STEPS: u8 = 4;
pub const INNOVATION_STEPS: u8 = 4;
pub const GREAT_STRIDES_STEPS: u8 = 3;
pub const WASTE_NOT_STEPS: u8 = 4;
pub const WASTE_NOT_II_STEPS: u8 = 8;
pub const MANIPULATION_STEPS: u8 = 8;
/// Durability given back after each applied step while manipulation holds.
pub const MANIPULATION_RESTORE: i32 = 5;

pub struct InnerQuiet;

impl CraftingAction for InnerQuiet {
    fn id(&self) -> ActionId {
        ActionId::InnerQuiet
    }

    fn cp_cost(&self, _state: &CraftingState) -> u32 {
        18
    }

    fn base_durability_cost(&self) -> i32 {
        0
    }

    fn apply(&self, _params: &CraftParams, state: &mut CraftingState) {
        state
            .buffs
            .grant(BuffKind::InnerQuiet, 0, None, state.step_index);
    }
}

pub struct Veneration;

impl CraftingAction for Veneration {
    fn id(&self) -> ActionId {
        ActionId::Veneration
    }

    fn cp_cost(&self, _state: &CraftingState) -> u32 {
        18
    }

    fn base_durability_cost(&self) -> i32 {
        0
    }

    fn apply(&self, _params: &CraftParams, state: &mut CraftingState) {
        state
            .buffs
            .grant(BuffKind::Veneration, 1, Some(VENERATION_STEPS), state.step_index);
    }
}

pub struct Innovation;

impl CraftingAction for Innovation {
    fn id(&self) -> ActionId {
        ActionId::Innovation
    }

    fn cp_cost(&self, _state: &CraftingState) -> u32 {
        18
    }

    fn base_durability_cost(&self) -> i32 {
        0
    }

    fn apply(&self, _params: &CraftParams, state: &mut CraftingState) {
        state
            .buffs
            .grant(BuffKind::Innovation, 1, Some(INNOVATION_STEPS), state.step_index);
    }
}

pub struct GreatStrides;

impl CraftingAction for GreatStrides {
    fn id(&self) -> ActionId {
        ActionId::GreatStrides
    }

    fn cp_cost(&self, _state: &CraftingState) -> u32 {
        32
    }

    fn base_durability_cost(&self) -> i32 {
        0
    }

    fn apply(&self, _params: &CraftParams, state: &mut CraftingState) {
        state.buffs.grant(
            BuffKind::GreatStrides,
            1,
            Some(GREAT_STRIDES_STEPS),
            state.step_index,
        );
    }
}

pub struct WasteNot;

impl CraftingAction for WasteNot {
    fn id(&self) -> ActionId {
        ActionId::WasteNot
    }

    fn cp_cost(&self, _state: &CraftingState) -> u32 {
        56
    }

    fn base_durability_cost(&self) -> i32 {
        0
    }

    fn apply(&self, _params: &CraftParams, state: &mut CraftingState) {
        state
            .buffs
            .grant(BuffKind::WasteNot, 1, Some(WASTE_NOT_STEPS), state.step_index);
    }
}

pub struct WasteNotII;

impl CraftingAction for WasteNotII {
    fn id(&self) -> ActionId {
        ActionId::WasteNotII
    }

    fn cp_cost(&self, _state: &CraftingState) -> u32 {
        98
    }

    fn base_durability_cost(&self) -> i32 {
        0
    }

    fn apply(&self, _params: &CraftParams, state: &mut CraftingState) {
        state
            .buffs
            .grant(BuffKind::WasteNot, 1, Some(WASTE_NOT_II_STEPS), state.step_index);
    }
}

pub struct Manipulation;

impl CraftingAction for Manipulation {
    fn id(&self) -> ActionId {
        ActionId::Manipulation
    }

    fn cp_cost(&self, _state: &CraftingState) -> u32 {
        96
    }

    fn base_durability_cost(&self) -> i32 {
        0
    }

    fn apply(&self, _params: &CraftParams, state: &mut CraftingState) {
        state.buffs.grant(
            BuffKind::Manipulation,
            1,
            Some(MANIPULATION_STEPS),
            state.step_index,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CrafterStats, Recipe};

    fn params() -> CraftParams {
        CraftParams {
            recipe: Recipe {
                id: 1,
                level: 80,
                durability: 80,
                progress: 4000,
                quality: 5000,
                progress_divider: 50.0,
                quality_divider: 30.0,
                progress_modifier: 100.0,
                quality_modifier: 100.0,
            },
            stats: CrafterStats {
                craftsmanship: 1000,
                control: 900,
                craft_points: 500,
                level: 80,
            },
        }
    }

    #[test]
    fn buff_actions_cost_no_durability() {
        let state = CraftingState::initial(&params());
        for action in [
            ActionId::InnerQuiet,
            ActionId::Veneration,
            ActionId::Innovation,
            ActionId::GreatStrides,
            ActionId::WasteNot,
            ActionId::WasteNotII,
            ActionId::Manipulation,
        ] {
            assert_eq!(crate::actions::action(action).durability_cost(&state), 0);
        }
    }

    #[test]
    fn waste_not_variants_share_one_buff_slot() {
        let params = params();
        let mut state = CraftingState::initial(&params);
        WasteNot.apply(&params, &mut state);
        assert_eq!(
            state.buffs.get(BuffKind::WasteNot).unwrap().remaining,
            Some(WASTE_NOT_STEPS)
        );
        state.step_index = 1;
        WasteNotII.apply(&params, &mut state);
        assert_eq!(state.buffs.iter().count(), 1);
        assert_eq!(
            state.buffs.get(BuffKind::WasteNot).unwrap().remaining,
            Some(WASTE_NOT_II_STEPS)
        );
    }

    #[test]
    fn inner_quiet_starts_without_stacks() {
        let params = params();
        let mut state = CraftingState::initial(&params);
        InnerQuiet.apply(&params, &mut state);
        let buff = state.buffs.get(BuffKind::InnerQuiet).unwrap();
        assert_eq!(buff.stacks, 0);
        assert_eq!(buff.remaining, None);
    }
}
