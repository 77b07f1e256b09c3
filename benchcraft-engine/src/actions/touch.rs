//! Quality-increasing actions.

use crate::actions::{quality_multiplier, ActionId, CraftingAction};
use crate::buffs::BuffKind;
use crate::numbers::floor_f64_to_u32;
use crate::state::{CraftParams, CraftingState};

/// Discounted CP price when comboed directly after `BasicTouch`.
pub const STANDARD_TOUCH_COMBO_CP: u32 = 18;

const BASIC_TOUCH_POTENCY: u32 = 100;
const STANDARD_TOUCH_POTENCY: u32 = 125;
const STANDARD_TOUCH_CP: u32 = 32;
const HASTY_TOUCH_POTENCY: u32 = 100;
const HASTY_TOUCH_SUCCESS: u8 = 60;
const PREPARATORY_TOUCH_POTENCY: u32 = 200;
const BYREGOTS_BASE_POTENCY: u32 = 100;
const BYREGOTS_POTENCY_PER_STACK: u32 = 20;
const REFLECT_POTENCY: u32 = 100;
const REFLECT_STACKS: u8 = 2;

/// Shared effect body for quality actions: floor the buffed gain, clip it
/// at the recipe ceiling, consume the double-strike buff, and grow the
/// quality-stacking buff when it is active.
fn apply_quality(params: &CraftParams, state: &mut CraftingState, potency: u32, stack_gain: u8) {
    let gain = floor_f64_to_u32(
        params.base_quality() * f64::from(potency) / 100.0 * quality_multiplier(state),
    );
    state.add_quality(gain, params.recipe.quality);
    if state.buffs.has(BuffKind::GreatStrides) {
        state.buffs.consume(BuffKind::GreatStrides);
    }
    state.buffs.add_stacks(BuffKind::InnerQuiet, stack_gain);
}

pub struct BasicTouch;

impl CraftingAction for BasicTouch {
    fn id(&self) -> ActionId {
        ActionId::BasicTouch
    }

    fn cp_cost(&self, _state: &CraftingState) -> u32 {
        18
    }

    fn base_durability_cost(&self) -> i32 {
        10
    }

    fn apply(&self, params: &CraftParams, state: &mut CraftingState) {
        apply_quality(params, state, BASIC_TOUCH_POTENCY, 1);
    }
}

pub struct StandardTouch;

impl CraftingAction for StandardTouch {
    fn id(&self) -> ActionId {
        ActionId::StandardTouch
    }

    fn cp_cost(&self, state: &CraftingState) -> u32 {
        if state.last_action == Some(ActionId::BasicTouch) {
            STANDARD_TOUCH_COMBO_CP
        } else {
            STANDARD_TOUCH_CP
        }
    }

    fn base_durability_cost(&self) -> i32 {
        10
    }

    fn apply(&self, params: &CraftParams, state: &mut CraftingState) {
        apply_quality(params, state, STANDARD_TOUCH_POTENCY, 1);
    }
}

pub struct HastyTouch;

impl CraftingAction for HastyTouch {
    fn id(&self) -> ActionId {
        ActionId::HastyTouch
    }

    fn cp_cost(&self, _state: &CraftingState) -> u32 {
        0
    }

    fn base_durability_cost(&self) -> i32 {
        10
    }

    fn success_rate(&self, _state: &CraftingState) -> u8 {
        HASTY_TOUCH_SUCCESS
    }

    fn apply(&self, params: &CraftParams, state: &mut CraftingState) {
        apply_quality(params, state, HASTY_TOUCH_POTENCY, 1);
    }
}

pub struct PreparatoryTouch;

impl CraftingAction for PreparatoryTouch {
    fn id(&self) -> ActionId {
        ActionId::PreparatoryTouch
    }

    fn cp_cost(&self, _state: &CraftingState) -> u32 {
        40
    }

    fn base_durability_cost(&self) -> i32 {
        20
    }

    fn apply(&self, params: &CraftParams, state: &mut CraftingState) {
        apply_quality(params, state, PREPARATORY_TOUCH_POTENCY, 2);
    }
}

pub struct ByregotsBlessing;

impl CraftingAction for ByregotsBlessing {
    fn id(&self) -> ActionId {
        ActionId::ByregotsBlessing
    }

    fn cp_cost(&self, _state: &CraftingState) -> u32 {
        24
    }

    fn base_durability_cost(&self) -> i32 {
        10
    }

    fn can_execute(&self, state: &CraftingState) -> bool {
        state.buffs.has(BuffKind::InnerQuiet)
    }

    fn apply(&self, params: &CraftParams, state: &mut CraftingState) {
        let stacks = state.buffs.stacks(BuffKind::InnerQuiet);
        let potency = BYREGOTS_BASE_POTENCY + BYREGOTS_POTENCY_PER_STACK * u32::from(stacks);
        apply_quality(params, state, potency, 0);
        state.buffs.consume(BuffKind::InnerQuiet);
    }
}

pub struct Reflect;

impl CraftingAction for Reflect {
    fn id(&self) -> ActionId {
        ActionId::Reflect
    }

    fn cp_cost(&self, _state: &CraftingState) -> u32 {
        6
    }

    fn base_durability_cost(&self) -> i32 {
        10
    }

    fn can_execute(&self, state: &CraftingState) -> bool {
        state.step_index == 0
    }

    fn apply(&self, params: &CraftParams, state: &mut CraftingState) {
        apply_quality(params, state, REFLECT_POTENCY, 0);
        state
            .buffs
            .grant(BuffKind::InnerQuiet, REFLECT_STACKS, None, state.step_index);
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
                quality: 50_000,
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
    fn basic_touch_floors_buffless_gain() {
        let params = params();
        let mut state = CraftingState::initial(&params);
        BasicTouch.apply(&params, &mut state);
        // base 335 * 1.0 = 335
        assert_eq!(state.quality, 335);
    }

    #[test]
    fn standard_touch_discounts_only_after_basic_touch() {
        let params = params();
        let mut state = CraftingState::initial(&params);
        assert_eq!(StandardTouch.cp_cost(&state), STANDARD_TOUCH_CP);
        state.last_action = Some(ActionId::BasicTouch);
        assert_eq!(StandardTouch.cp_cost(&state), STANDARD_TOUCH_COMBO_CP);
        state.last_action = Some(ActionId::StandardTouch);
        assert_eq!(StandardTouch.cp_cost(&state), STANDARD_TOUCH_CP);
    }

    #[test]
    fn inner_quiet_stacks_grow_quality_gains() {
        let params = params();
        let mut state = CraftingState::initial(&params);
        state.buffs.grant(BuffKind::InnerQuiet, 0, None, 0);
        BasicTouch.apply(&params, &mut state);
        assert_eq!(state.quality, 335);
        assert_eq!(state.buffs.stacks(BuffKind::InnerQuiet), 1);
        BasicTouch.apply(&params, &mut state);
        // second touch at one stack: 335 * 1.1 = 368.5
        assert_eq!(state.quality, 335 + 368);
        assert_eq!(state.buffs.stacks(BuffKind::InnerQuiet), 2);
    }

    #[test]
    fn preparatory_touch_adds_two_stacks() {
        let params = params();
        let mut state = CraftingState::initial(&params);
        state.buffs.grant(BuffKind::InnerQuiet, 0, None, 0);
        PreparatoryTouch.apply(&params, &mut state);
        assert_eq!(state.buffs.stacks(BuffKind::InnerQuiet), 2);
    }

    #[test]
    fn great_strides_doubles_then_is_consumed() {
        let params = params();
        let mut state = CraftingState::initial(&params);
        state.buffs.grant(BuffKind::GreatStrides, 1, Some(3), 0);
        BasicTouch.apply(&params, &mut state);
        assert_eq!(state.quality, 670);
        assert!(!state.buffs.has(BuffKind::GreatStrides));
    }

    #[test]
    fn byregots_scales_with_stacks_and_consumes_them() {
        let params = params();
        let mut state = CraftingState::initial(&params);
        assert!(!ByregotsBlessing.can_execute(&state));

        state.buffs.grant(BuffKind::InnerQuiet, 5, None, 0);
        assert!(ByregotsBlessing.can_execute(&state));
        ByregotsBlessing.apply(&params, &mut state);
        // potency 200 at five stacks: 335 * 2.0 * 1.5 = 1005
        assert_eq!(state.quality, 1005);
        assert!(!state.buffs.has(BuffKind::InnerQuiet));
    }

    #[test]
    fn reflect_is_first_step_only_and_seeds_stacks() {
        let params = params();
        let mut state = CraftingState::initial(&params);
        assert!(Reflect.can_execute(&state));
        Reflect.apply(&params, &mut state);
        assert_eq!(state.quality, 335);
        assert_eq!(state.buffs.stacks(BuffKind::InnerQuiet), REFLECT_STACKS);
        state.step_index = 2;
        assert!(!Reflect.can_execute(&state));
    }
}
