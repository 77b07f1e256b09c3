//! Recipe and crafter inputs plus the per-run crafting state.

use serde::{Deserialize, Serialize};

use crate::actions::ActionId;
use crate::buffs::Buffs;
use crate::simulator::RotationError;

const PROGRESS_FLAT_BONUS: f64 = 2.0;
const QUALITY_FLAT_BONUS: f64 = 35.0;

const fn default_modifier() -> f64 {
    100.0
}

/// Recipe definition handed over by the external catalog service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: u32,
    pub level: u32,
    /// Durability pool; the craft fails when it is exhausted early.
    pub durability: i32,
    /// Progress required to complete the craft.
    pub progress: u32,
    /// Quality ceiling; reaching it classifies the result as HQ-producing.
    pub quality: u32,
    /// Divider applied to craftsmanship when deriving base progression.
    pub progress_divider: f64,
    /// Divider applied to control when deriving base quality.
    pub quality_divider: f64,
    #[serde(default = "default_modifier")]
    pub progress_modifier: f64,
    #[serde(default = "default_modifier")]
    pub quality_modifier: f64,
}

impl Recipe {
    /// Check recipe invariants before a simulation may consume it.
    ///
    /// # Errors
    ///
    /// Returns `RotationError::InvalidRecipe` naming the offending field.
    pub fn validate(&self) -> Result<(), RotationError> {
        if self.durability <= 0 {
            return Err(RotationError::InvalidRecipe {
                field: "durability",
                value: f64::from(self.durability),
            });
        }
        if self.progress == 0 {
            return Err(RotationError::InvalidRecipe {
                field: "progress",
                value: 0.0,
            });
        }
        if self.quality == 0 {
            return Err(RotationError::InvalidRecipe {
                field: "quality",
                value: 0.0,
            });
        }
        if self.progress_divider <= 0.0 {
            return Err(RotationError::InvalidRecipe {
                field: "progress_divider",
                value: self.progress_divider,
            });
        }
        if self.quality_divider <= 0.0 {
            return Err(RotationError::InvalidRecipe {
                field: "quality_divider",
                value: self.quality_divider,
            });
        }
        Ok(())
    }
}

/// Crafter attributes feeding the action effect formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrafterStats {
    pub craftsmanship: u32,
    pub control: u32,
    pub craft_points: u32,
    #[serde(default)]
    pub level: u32,
}

impl CrafterStats {
    /// Check stat invariants before a simulation may consume them.
    ///
    /// # Errors
    ///
    /// Returns `RotationError::InvalidStats` naming the offending field.
    pub fn validate(&self) -> Result<(), RotationError> {
        if self.craftsmanship == 0 {
            return Err(RotationError::InvalidStats {
                field: "craftsmanship",
            });
        }
        if self.control == 0 {
            return Err(RotationError::InvalidStats { field: "control" });
        }
        if self.craft_points == 0 {
            return Err(RotationError::InvalidStats {
                field: "craft_points",
            });
        }
        Ok(())
    }
}

/// Validated recipe + stats pair owned by one simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CraftParams {
    pub recipe: Recipe,
    pub stats: CrafterStats,
}

impl CraftParams {
    /// Progress gained by a 100-potency action before buff bonuses.
    #[must_use]
    pub fn base_progression(&self) -> f64 {
        (f64::from(self.stats.craftsmanship) * 10.0 / self.recipe.progress_divider
            + PROGRESS_FLAT_BONUS)
            * self.recipe.progress_modifier
            / 100.0
    }

    /// Quality gained by a 100-potency action before buff bonuses.
    #[must_use]
    pub fn base_quality(&self) -> f64 {
        (f64::from(self.stats.control) * 10.0 / self.recipe.quality_divider + QUALITY_FLAT_BONUS)
            * self.recipe.quality_modifier
            / 100.0
    }
}

/// Mutable snapshot threaded through one simulation run.
///
/// Progress and quality only ever grow, durability only shrinks outside
/// explicit repair effects, and craft points never go negative: actions
/// that cannot pay their cost are skipped instead of applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CraftingState {
    pub durability: i32,
    pub craft_points: u32,
    pub progress: u32,
    pub quality: u32,
    pub buffs: Buffs,
    /// Ordinal of the step currently resolving (0-based).
    pub step_index: usize,
    /// Last successfully applied action, used for combo pricing.
    /// Reset when a step is skipped or fails.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_action: Option<ActionId>,
}

impl CraftingState {
    /// Starting state for a craft: full durability and CP, empty buffs.
    #[must_use]
    pub fn initial(params: &CraftParams) -> Self {
        Self {
            durability: params.recipe.durability,
            craft_points: params.stats.craft_points,
            progress: 0,
            quality: 0,
            buffs: Buffs::new(),
            step_index: 0,
            last_action: None,
        }
    }

    pub fn add_progress(&mut self, gain: u32) {
        self.progress = self.progress.saturating_add(gain);
    }

    /// Add quality, clipping at the recipe ceiling. Returns the applied
    /// (possibly clipped) gain.
    pub fn add_quality(&mut self, gain: u32, cap: u32) -> u32 {
        let applied = gain.min(cap.saturating_sub(self.quality));
        self.quality += applied;
        applied
    }

    /// Restore durability, clipping at the recipe maximum. Returns the
    /// applied (possibly clipped) amount.
    pub fn restore_durability(&mut self, amount: i32, cap: i32) -> i32 {
        let applied = amount.min(cap.saturating_sub(self.durability)).max(0);
        self.durability += applied;
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_recipe() -> Recipe {
        Recipe {
            id: 3864,
            level: 80,
            durability: 80,
            progress: 2000,
            quality: 5200,
            progress_divider: 50.0,
            quality_divider: 30.0,
            progress_modifier: 100.0,
            quality_modifier: 100.0,
        }
    }

    fn sample_stats() -> CrafterStats {
        CrafterStats {
            craftsmanship: 1000,
            control: 900,
            craft_points: 500,
            level: 80,
        }
    }

    #[test]
    fn base_gains_follow_divider_formulas() {
        let params = CraftParams {
            recipe: sample_recipe(),
            stats: sample_stats(),
        };
        assert!((params.base_progression() - 202.0).abs() < f64::EPSILON);
        assert!((params.base_quality() - 335.0).abs() < f64::EPSILON);
    }

    #[test]
    fn modifiers_scale_base_gains() {
        let mut recipe = sample_recipe();
        recipe.progress_modifier = 80.0;
        recipe.quality_modifier = 70.0;
        let params = CraftParams {
            recipe,
            stats: sample_stats(),
        };
        assert!((params.base_progression() - 202.0 * 0.8).abs() < 1e-9);
        assert!((params.base_quality() - 335.0 * 0.7).abs() < 1e-9);
    }

    #[test]
    fn recipe_validation_names_offending_field() {
        let mut recipe = sample_recipe();
        recipe.progress_divider = 0.0;
        let err = recipe.validate().unwrap_err();
        assert_eq!(
            err,
            RotationError::InvalidRecipe {
                field: "progress_divider",
                value: 0.0,
            }
        );
    }

    #[test]
    fn stats_validation_rejects_empty_cp_pool() {
        let mut stats = sample_stats();
        stats.craft_points = 0;
        assert!(matches!(
            stats.validate(),
            Err(RotationError::InvalidStats {
                field: "craft_points"
            })
        ));
    }

    #[test]
    fn quality_gain_clips_at_recipe_ceiling() {
        let params = CraftParams {
            recipe: sample_recipe(),
            stats: sample_stats(),
        };
        let mut state = CraftingState::initial(&params);
        state.quality = 5100;
        let applied = state.add_quality(300, params.recipe.quality);
        assert_eq!(applied, 100);
        assert_eq!(state.quality, 5200);
    }

    #[test]
    fn durability_restore_clips_at_recipe_maximum() {
        let params = CraftParams {
            recipe: sample_recipe(),
            stats: sample_stats(),
        };
        let mut state = CraftingState::initial(&params);
        state.durability = 65;
        let applied = state.restore_durability(30, params.recipe.durability);
        assert_eq!(applied, 15);
        assert_eq!(state.durability, 80);
    }
}
