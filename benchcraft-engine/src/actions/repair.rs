//! Durability-restoring actions.

use crate::actions::{ActionId, CraftingAction};
use crate::state::{CraftParams, CraftingState};

/// Nominal durability restored by a repair before the cap clips it.
pub const MASTERS_MEND_RESTORE: i32 = 30;

pub struct MastersMend;

impl CraftingAction for MastersMend {
    fn id(&self) -> ActionId {
        ActionId::MastersMend
    }

    fn cp_cost(&self, _state: &CraftingState) -> u32 {
        88
    }

    fn base_durability_cost(&self) -> i32 {
        0
    }

    fn apply(&self, params: &CraftParams, state: &mut CraftingState) {
        state.restore_durability(MASTERS_MEND_RESTORE, params.recipe.durability);
    }
}
