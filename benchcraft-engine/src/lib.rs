//! Benchcraft Engine
//!
//! Platform-agnostic core logic for the Benchcraft crafting rotation
//! planner. This crate simulates the turn-based crafting minigame and
//! evaluates advisory rules over the resulting trace, without UI or
//! platform-specific dependencies.

pub mod actions;
pub mod buffs;
pub mod numbers;
pub mod result;
pub mod share;
pub mod simulator;
pub mod state;
pub mod tips;

// Re-export commonly used types
pub use actions::{action, ActionCategory, ActionId, CraftingAction};
pub use buffs::{Buff, BuffKind, Buffs, INNER_QUIET_MAX_STACKS};
pub use result::{CraftStatus, SimulationResult};
pub use share::{decode_rotation, encode_rotation, ShareCodeError};
pub use simulator::{RotationError, Simulation, SkipReason, Step};
pub use state::{CraftParams, CrafterStats, CraftingState, Recipe};
pub use tips::{RotationTip, TipRegistry, TipType, TriggeredTip};

use serde::Serialize;

/// Trait for abstracting recipe lookups.
/// Platform-specific implementations should provide this.
pub trait RecipeSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Resolve a recipe definition from the platform-specific catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the recipe cannot be resolved.
    fn recipe(&self, recipe_id: u32) -> Result<Recipe, Self::Error>;
}

/// Simulation outcome plus the advisories it triggered; the payload the
/// presentation layer renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RotationReport {
    pub result: SimulationResult,
    pub tips: Vec<TriggeredTip>,
}

/// Facade combining a recipe source with the advisory registry.
pub struct CraftingPlanner<S>
where
    S: RecipeSource,
{
    source: S,
    registry: TipRegistry,
}

impl<S> CraftingPlanner<S>
where
    S: RecipeSource,
{
    /// Create a planner over the provided recipe source with the default
    /// rule registry.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self::with_registry(source, TipRegistry::default())
    }

    /// Create a planner with an explicit rule registry.
    #[must_use]
    pub fn with_registry(source: S, registry: TipRegistry) -> Self {
        Self { source, registry }
    }

    /// Simulate a rotation against a cataloged recipe and evaluate the
    /// advisory rules over the trace.
    ///
    /// # Errors
    ///
    /// Returns an error when the recipe cannot be resolved or the rotation
    /// is rejected at ingestion.
    pub fn plan<N: AsRef<str>>(
        &self,
        recipe_id: u32,
        stats: CrafterStats,
        action_names: &[N],
    ) -> Result<RotationReport, anyhow::Error> {
        let recipe = self.source.recipe(recipe_id)?;
        let simulation = Simulation::from_names(recipe, stats, action_names)?;
        let result = simulation.run();
        let tips = self.registry.evaluate(&result);
        Ok(RotationReport { result, tips })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fmt;

    #[derive(Debug)]
    struct MissingRecipe(u32);

    impl fmt::Display for MissingRecipe {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "no recipe with id {}", self.0)
        }
    }

    impl std::error::Error for MissingRecipe {}

    #[derive(Default)]
    struct FixtureCatalog {
        recipes: HashMap<u32, Recipe>,
    }

    impl RecipeSource for FixtureCatalog {
        type Error = MissingRecipe;

        fn recipe(&self, recipe_id: u32) -> Result<Recipe, Self::Error> {
            self.recipes
                .get(&recipe_id)
                .cloned()
                .ok_or(MissingRecipe(recipe_id))
        }
    }

    fn catalog() -> FixtureCatalog {
        let mut recipes = HashMap::new();
        recipes.insert(
            1035,
            Recipe {
                id: 1035,
                level: 80,
                durability: 80,
                progress: 1000,
                quality: 4000,
                progress_divider: 50.0,
                quality_divider: 30.0,
                progress_modifier: 100.0,
                quality_modifier: 100.0,
            },
        );
        FixtureCatalog { recipes }
    }

    fn stats() -> CrafterStats {
        CrafterStats {
            craftsmanship: 1000,
            control: 900,
            craft_points: 400,
            level: 80,
        }
    }

    #[test]
    fn planner_produces_result_and_tips() {
        let planner = CraftingPlanner::new(catalog());
        let report = planner
            .plan(
                1035,
                stats(),
                &["basic_touch", "inner_quiet", "careful_synthesis"],
            )
            .unwrap();
        assert_eq!(report.result.steps.len(), 3);
        assert!(report
            .tips
            .iter()
            .any(|tip| tip.message_key == "use_inner_quiet_before_quality_increase"));
    }

    #[test]
    fn planner_surfaces_catalog_misses() {
        let planner = CraftingPlanner::new(catalog());
        let err = planner.plan(9999, stats(), &["basic_touch"]).unwrap_err();
        assert!(err.to_string().contains("9999"));
    }

    #[test]
    fn planner_surfaces_unknown_identities() {
        let planner = CraftingPlanner::new(catalog());
        let err = planner
            .plan(1035, stats(), &["basic_touch", "polish"])
            .unwrap_err();
        assert_eq!(
            err.downcast::<RotationError>().unwrap(),
            RotationError::UnknownAction {
                name: "polish".to_string()
            }
        );
    }
}
