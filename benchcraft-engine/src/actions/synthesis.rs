//! Progress-increasing actions.

use crate::actions::{progress_multiplier, ActionId, CraftingAction};
use crate::buffs::BuffKind;
use crate::numbers::floor_f64_to_u32;
use crate::state::{CraftParams, CraftingState};

/// Steps the first-strike progress buff stays active.
pub const MUSCLE_MEMORY_STEPS: u8 = 5;

const BASIC_SYNTHESIS_POTENCY: u32 = 120;
const CAREFUL_SYNTHESIS_POTENCY: u32 = 180;
const RAPID_SYNTHESIS_POTENCY: u32 = 500;
const RAPID_SYNTHESIS_SUCCESS: u8 = 50;
const GROUNDWORK_POTENCY: u32 = 360;
const MUSCLE_MEMORY_POTENCY: u32 = 300;

/// Shared effect body for progress actions: floor the buffed gain, then
/// consume the first-strike buff if it contributed.
fn apply_progress(params: &CraftParams, state: &mut CraftingState, potency: u32) {
    let gain = floor_f64_to_u32(
        params.base_progression() * f64::from(potency) / 100.0 * progress_multiplier(state),
    );
    state.add_progress(gain);
    if state.buffs.has(BuffKind::MuscleMemory) {
        state.buffs.consume(BuffKind::MuscleMemory);
    }
}

pub struct BasicSynthesis;

impl CraftingAction for BasicSynthesis {
    fn id(&self) -> ActionId {
        ActionId::BasicSynthesis
    }

    fn cp_cost(&self, _state: &CraftingState) -> u32 {
        0
    }

    fn base_durability_cost(&self) -> i32 {
        10
    }

    fn apply(&self, params: &CraftParams, state: &mut CraftingState) {
        apply_progress(params, state, BASIC_SYNTHESIS_POTENCY);
    }
}

pub struct CarefulSynthesis;

impl CraftingAction for CarefulSynthesis {
    fn id(&self) -> ActionId {
        ActionId::CarefulSynthesis
    }

    fn cp_cost(&self, _state: &CraftingState) -> u32 {
        7
    }

    fn base_durability_cost(&self) -> i32 {
        10
    }

    fn apply(&self, params: &CraftParams, state: &mut CraftingState) {
        apply_progress(params, state, CAREFUL_SYNTHESIS_POTENCY);
    }
}

pub struct RapidSynthesis;

impl CraftingAction for RapidSynthesis {
    fn id(&self) -> ActionId {
        ActionId::RapidSynthesis
    }

    fn cp_cost(&self, _state: &CraftingState) -> u32 {
        0
    }

    fn base_durability_cost(&self) -> i32 {
        10
    }

    fn success_rate(&self, _state: &CraftingState) -> u8 {
        RAPID_SYNTHESIS_SUCCESS
    }

    fn apply(&self, params: &CraftParams, state: &mut CraftingState) {
        apply_progress(params, state, RAPID_SYNTHESIS_POTENCY);
    }
}

pub struct Groundwork;

impl CraftingAction for Groundwork {
    fn id(&self) -> ActionId {
        ActionId::Groundwork
    }

    fn cp_cost(&self, _state: &CraftingState) -> u32 {
        18
    }

    fn base_durability_cost(&self) -> i32 {
        20
    }

    fn apply(&self, params: &CraftParams, state: &mut CraftingState) {
        // Potency halves when remaining durability cannot pay the full cost.
        let potency = if state.durability < self.durability_cost(state) {
            GROUNDWORK_POTENCY / 2
        } else {
            GROUNDWORK_POTENCY
        };
        apply_progress(params, state, potency);
    }
}

pub struct MuscleMemory;

impl CraftingAction for MuscleMemory {
    fn id(&self) -> ActionId {
        ActionId::MuscleMemory
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
        apply_progress(params, state, MUSCLE_MEMORY_POTENCY);
        state.buffs.grant(
            BuffKind::MuscleMemory,
            1,
            Some(MUSCLE_MEMORY_STEPS),
            state.step_index,
        );
    }
}
