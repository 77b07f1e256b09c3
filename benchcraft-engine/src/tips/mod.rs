//! Rotation advisory rules evaluated over a finished simulation trace.
//!
//! Every rule implements the same two-predicate contract: a cheap
//! relevance filter (`can_be_applied_to`) gating the actual pattern check
//! (`matches`). The registry owns the canonical rule list and evaluates it
//! in declaration order; adding a rule never requires simulator changes.

pub mod ordering;
pub mod outcome;
pub mod resources;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::result::SimulationResult;

pub use ordering::{GreatStridesWasted, MissingInnerQuiet, UseInnerQuietBeforeQuality};
pub use outcome::{DurabilityExhausted, HqReached, RotationIncomplete};
pub use resources::{CpShortfall, LeftoverCp, UnusableActions, WastedRepair};

/// Severity tier of an advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipType {
    Success,
    Info,
    Warning,
}

impl TipType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for TipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Advisory rule over a frozen [`SimulationResult`].
///
/// Rules are stateless and reusable across many results. The message key
/// is resolved to localized text by the presentation layer, never here.
pub trait RotationTip: Send + Sync {
    fn tip_type(&self) -> TipType;

    fn message_key(&self) -> &'static str;

    /// Cheap relevance filter; `matches` only runs when this holds.
    fn can_be_applied_to(&self, result: &SimulationResult) -> bool;

    /// The actual pattern check.
    fn matches(&self, result: &SimulationResult) -> bool;
}

/// One fired advisory, ready for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggeredTip {
    pub tip_type: TipType,
    pub message_key: String,
}

/// The canonical advisory rule list.
///
/// Evaluation order is registry declaration order, deliberately not a
/// severity sort.
pub struct TipRegistry {
    tips: Vec<Box<dyn RotationTip>>,
}

impl TipRegistry {
    /// Build a registry from an explicit rule list.
    #[must_use]
    pub fn new(tips: Vec<Box<dyn RotationTip>>) -> Self {
        Self { tips }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tips.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tips.is_empty()
    }

    /// Evaluate every rule against a finished result, returning the fired
    /// advisories in declaration order.
    #[must_use]
    pub fn evaluate(&self, result: &SimulationResult) -> Vec<TriggeredTip> {
        self.tips
            .iter()
            .filter(|tip| tip.can_be_applied_to(result) && tip.matches(result))
            .map(|tip| TriggeredTip {
                tip_type: tip.tip_type(),
                message_key: tip.message_key().to_string(),
            })
            .collect()
    }
}

impl Default for TipRegistry {
    fn default() -> Self {
        Self::new(vec![
            Box::new(MissingInnerQuiet),
            Box::new(UseInnerQuietBeforeQuality),
            Box::new(GreatStridesWasted),
            Box::new(CpShortfall),
            Box::new(UnusableActions),
            Box::new(WastedRepair),
            Box::new(LeftoverCp),
            Box::new(RotationIncomplete),
            Box::new(DurabilityExhausted),
            Box::new(HqReached),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::ActionId;
    use crate::simulator::Simulation;
    use crate::state::{CrafterStats, Recipe};

    fn run(rotation: Vec<ActionId>) -> SimulationResult {
        let recipe = Recipe {
            id: 1,
            level: 80,
            durability: 80,
            progress: 1200,
            quality: 4000,
            progress_divider: 50.0,
            quality_divider: 30.0,
            progress_modifier: 100.0,
            quality_modifier: 100.0,
        };
        let stats = CrafterStats {
            craftsmanship: 1000,
            control: 900,
            craft_points: 400,
            level: 80,
        };
        Simulation::new(recipe, stats, rotation).unwrap().run()
    }

    #[test]
    fn registry_keeps_declaration_order_across_evaluations() {
        let registry = TipRegistry::default();
        let result = run(vec![ActionId::BasicTouch, ActionId::InnerQuiet]);
        let first = registry.evaluate(&result);
        let second = registry.evaluate(&result);
        assert_eq!(first, second);

        let keys: Vec<_> = first.iter().map(|tip| tip.message_key.as_str()).collect();
        let ordering_index = keys
            .iter()
            .position(|key| *key == "use_inner_quiet_before_quality_increase")
            .expect("ordering tip fired");
        let incomplete_index = keys
            .iter()
            .position(|key| *key == "rotation_incomplete")
            .expect("incomplete tip fired");
        assert!(ordering_index < incomplete_index);
    }

    #[test]
    fn empty_registry_fires_nothing() {
        let registry = TipRegistry::new(Vec::new());
        assert!(registry.is_empty());
        let result = run(vec![ActionId::BasicTouch]);
        assert!(registry.evaluate(&result).is_empty());
    }

    #[test]
    fn default_registry_has_the_full_rule_set() {
        assert_eq!(TipRegistry::default().len(), 10);
    }
}
