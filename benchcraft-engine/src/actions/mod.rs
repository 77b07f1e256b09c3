//! Action catalog: the closed set of executable crafting actions.
//!
//! Each action is an independent value implementing the [`CraftingAction`]
//! capability set; the catalog owns the canonical instances and the
//! simulator only ever borrows them.

pub mod buff;
pub mod repair;
pub mod synthesis;
pub mod touch;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::buffs::BuffKind;
use crate::state::{CraftParams, CraftingState};

pub use buff::{
    GreatStrides, InnerQuiet, Innovation, Manipulation, Veneration, WasteNot, WasteNotII,
    GREAT_STRIDES_STEPS, INNOVATION_STEPS, MANIPULATION_RESTORE, MANIPULATION_STEPS,
    VENERATION_STEPS, WASTE_NOT_II_STEPS, WASTE_NOT_STEPS,
};
pub use repair::{MastersMend, MASTERS_MEND_RESTORE};
pub use synthesis::{
    BasicSynthesis, CarefulSynthesis, Groundwork, MuscleMemory, RapidSynthesis,
    MUSCLE_MEMORY_STEPS,
};
pub use touch::{
    BasicTouch, ByregotsBlessing, HastyTouch, PreparatoryTouch, Reflect, StandardTouch,
    STANDARD_TOUCH_COMBO_CP,
};

/// Wire identity of an action, as supplied by the UI layer or a persisted
/// rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionId {
    BasicSynthesis,
    CarefulSynthesis,
    RapidSynthesis,
    Groundwork,
    MuscleMemory,
    BasicTouch,
    StandardTouch,
    HastyTouch,
    PreparatoryTouch,
    ByregotsBlessing,
    Reflect,
    InnerQuiet,
    Veneration,
    Innovation,
    GreatStrides,
    WasteNot,
    #[serde(rename = "waste_not_ii")]
    WasteNotII,
    Manipulation,
    MastersMend,
}

/// Broad effect family of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionCategory {
    Progress,
    Quality,
    Buff,
    Repair,
}

impl ActionId {
    /// Every catalog entry, in stable catalog order. Share codes and the
    /// per-action byte codes rely on this ordering.
    pub const ALL: [Self; 19] = [
        Self::BasicSynthesis,
        Self::CarefulSynthesis,
        Self::RapidSynthesis,
        Self::Groundwork,
        Self::MuscleMemory,
        Self::BasicTouch,
        Self::StandardTouch,
        Self::HastyTouch,
        Self::PreparatoryTouch,
        Self::ByregotsBlessing,
        Self::Reflect,
        Self::InnerQuiet,
        Self::Veneration,
        Self::Innovation,
        Self::GreatStrides,
        Self::WasteNot,
        Self::WasteNotII,
        Self::Manipulation,
        Self::MastersMend,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BasicSynthesis => "basic_synthesis",
            Self::CarefulSynthesis => "careful_synthesis",
            Self::RapidSynthesis => "rapid_synthesis",
            Self::Groundwork => "groundwork",
            Self::MuscleMemory => "muscle_memory",
            Self::BasicTouch => "basic_touch",
            Self::StandardTouch => "standard_touch",
            Self::HastyTouch => "hasty_touch",
            Self::PreparatoryTouch => "preparatory_touch",
            Self::ByregotsBlessing => "byregots_blessing",
            Self::Reflect => "reflect",
            Self::InnerQuiet => "inner_quiet",
            Self::Veneration => "veneration",
            Self::Innovation => "innovation",
            Self::GreatStrides => "great_strides",
            Self::WasteNot => "waste_not",
            Self::WasteNotII => "waste_not_ii",
            Self::Manipulation => "manipulation",
            Self::MastersMend => "masters_mend",
        }
    }

    #[must_use]
    pub const fn category(self) -> ActionCategory {
        match self {
            Self::BasicSynthesis
            | Self::CarefulSynthesis
            | Self::RapidSynthesis
            | Self::Groundwork
            | Self::MuscleMemory => ActionCategory::Progress,
            Self::BasicTouch
            | Self::StandardTouch
            | Self::HastyTouch
            | Self::PreparatoryTouch
            | Self::ByregotsBlessing
            | Self::Reflect => ActionCategory::Quality,
            Self::InnerQuiet
            | Self::Veneration
            | Self::Innovation
            | Self::GreatStrides
            | Self::WasteNot
            | Self::WasteNotII
            | Self::Manipulation => ActionCategory::Buff,
            Self::MastersMend => ActionCategory::Repair,
        }
    }

    /// Whether this action grants the quality-stacking buff.
    #[must_use]
    pub const fn grants_inner_quiet(self) -> bool {
        matches!(self, Self::InnerQuiet | Self::Reflect)
    }

    /// Stable byte code used by the share-code payload.
    #[must_use]
    pub fn code(self) -> u8 {
        Self::ALL
            .iter()
            .position(|id| *id == self)
            .map_or(0, |index| index as u8)
    }

    /// Inverse of [`ActionId::code`].
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|id| id.as_str() == s)
            .copied()
            .ok_or(())
    }
}

/// Capability set implemented by every catalog action.
pub trait CraftingAction: Sync {
    fn id(&self) -> ActionId;

    /// CP spent when the action is applied. May depend on the current
    /// state (combo pricing).
    fn cp_cost(&self, state: &CraftingState) -> u32;

    /// Durability consumed before waste-reduction buffs.
    fn base_durability_cost(&self) -> i32;

    /// Durability consumed under the current buff configuration.
    fn durability_cost(&self, state: &CraftingState) -> i32 {
        let base = self.base_durability_cost();
        if state.buffs.has(BuffKind::WasteNot) {
            base / 2
        } else {
            base
        }
    }

    /// Success probability in percent. 100 for guaranteed actions.
    fn success_rate(&self, _state: &CraftingState) -> u8 {
        100
    }

    /// Whether the action may legally execute beyond the CP check.
    fn can_execute(&self, _state: &CraftingState) -> bool {
        true
    }

    /// Apply the action's effect. Only called for successful applications;
    /// cost deduction and buff aging are owned by the simulator.
    fn apply(&self, params: &CraftParams, state: &mut CraftingState);
}

/// Look up the canonical instance for an identity.
#[must_use]
pub fn action(id: ActionId) -> &'static dyn CraftingAction {
    match id {
        ActionId::BasicSynthesis => &BasicSynthesis,
        ActionId::CarefulSynthesis => &CarefulSynthesis,
        ActionId::RapidSynthesis => &RapidSynthesis,
        ActionId::Groundwork => &Groundwork,
        ActionId::MuscleMemory => &MuscleMemory,
        ActionId::BasicTouch => &BasicTouch,
        ActionId::StandardTouch => &StandardTouch,
        ActionId::HastyTouch => &HastyTouch,
        ActionId::PreparatoryTouch => &PreparatoryTouch,
        ActionId::ByregotsBlessing => &ByregotsBlessing,
        ActionId::Reflect => &Reflect,
        ActionId::InnerQuiet => &InnerQuiet,
        ActionId::Veneration => &Veneration,
        ActionId::Innovation => &Innovation,
        ActionId::GreatStrides => &GreatStrides,
        ActionId::WasteNot => &WasteNot,
        ActionId::WasteNotII => &WasteNotII,
        ActionId::Manipulation => &Manipulation,
        ActionId::MastersMend => &MastersMend,
    }
}

/// Combined progress bonus from active buffs.
pub(crate) fn progress_multiplier(state: &CraftingState) -> f64 {
    let mut bonus = 1.0;
    if state.buffs.has(BuffKind::Veneration) {
        bonus += 0.5;
    }
    if state.buffs.has(BuffKind::MuscleMemory) {
        bonus += 1.0;
    }
    bonus
}

/// Combined quality bonus from stacks and active buffs.
pub(crate) fn quality_multiplier(state: &CraftingState) -> f64 {
    let stack_bonus = 1.0 + 0.1 * f64::from(state.buffs.stacks(BuffKind::InnerQuiet));
    let mut buff_bonus = 1.0;
    if state.buffs.has(BuffKind::Innovation) {
        buff_bonus += 0.5;
    }
    if state.buffs.has(BuffKind::GreatStrides) {
        buff_bonus += 1.0;
    }
    stack_bonus * buff_bonus
}
