//! Buff stacking and duration accounting.
//!
//! Buffs are stored as immutable-per-step snapshots: every recorded step
//! clones the active set, so the advisory layer can inspect historical
//! buff state without aliasing the live one.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Maximum stack count for the quality-stacking buff.
pub const INNER_QUIET_MAX_STACKS: u8 = 10;

/// Modifiers that alter subsequent action effects while active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuffKind {
    InnerQuiet,
    Veneration,
    Innovation,
    GreatStrides,
    WasteNot,
    Manipulation,
    MuscleMemory,
}

impl BuffKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InnerQuiet => "inner_quiet",
            Self::Veneration => "veneration",
            Self::Innovation => "innovation",
            Self::GreatStrides => "great_strides",
            Self::WasteNot => "waste_not",
            Self::Manipulation => "manipulation",
            Self::MuscleMemory => "muscle_memory",
        }
    }

    /// Stack cap enforced when granting or accumulating stacks.
    #[must_use]
    pub const fn stack_cap(self) -> u8 {
        match self {
            Self::InnerQuiet => INNER_QUIET_MAX_STACKS,
            _ => 1,
        }
    }
}

impl fmt::Display for BuffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One active buff entry: stacks, remaining applications, and the step
/// ordinal that granted it.
///
/// `remaining: None` marks a buff that lasts for the rest of the craft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buff {
    pub kind: BuffKind,
    pub stacks: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining: Option<u8>,
    pub applied_step: usize,
}

/// The set of currently active buffs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Buffs {
    entries: SmallVec<[Buff; 8]>,
}

impl Buffs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, kind: BuffKind) -> Option<&Buff> {
        self.entries.iter().find(|buff| buff.kind == kind)
    }

    #[must_use]
    pub fn has(&self, kind: BuffKind) -> bool {
        self.get(kind).is_some()
    }

    /// Current stack count for a buff, zero when absent.
    #[must_use]
    pub fn stacks(&self, kind: BuffKind) -> u8 {
        self.get(kind).map_or(0, |buff| buff.stacks)
    }

    /// Grant a buff, replacing stacks and refreshing duration when the
    /// kind is already active. The per-kind stack cap is enforced.
    pub fn grant(&mut self, kind: BuffKind, stacks: u8, remaining: Option<u8>, step: usize) {
        let stacks = stacks.min(kind.stack_cap());
        if let Some(buff) = self.entries.iter_mut().find(|buff| buff.kind == kind) {
            buff.stacks = stacks;
            buff.remaining = remaining;
            buff.applied_step = step;
        } else {
            self.entries.push(Buff {
                kind,
                stacks,
                remaining,
                applied_step: step,
            });
        }
    }

    /// Accumulate stacks on an already-active buff, saturating at the cap.
    /// Absent buffs are left absent.
    pub fn add_stacks(&mut self, kind: BuffKind, amount: u8) {
        if let Some(buff) = self.entries.iter_mut().find(|buff| buff.kind == kind) {
            buff.stacks = buff.stacks.saturating_add(amount).min(kind.stack_cap());
        }
    }

    /// Remove a buff entry, returning it when present.
    pub fn consume(&mut self, kind: BuffKind) -> Option<Buff> {
        let position = self.entries.iter().position(|buff| buff.kind == kind)?;
        Some(self.entries.remove(position))
    }

    /// Drop buffs whose duration reached zero. Runs before an action's
    /// effect is computed.
    pub fn expire(&mut self) {
        self.entries.retain(|buff| buff.remaining != Some(0));
    }

    /// Count down one application for every timed buff not granted by the
    /// step currently resolving.
    pub fn tick(&mut self, current_step: usize) {
        for buff in &mut self.entries {
            if buff.applied_step == current_step {
                continue;
            }
            if let Some(remaining) = buff.remaining.as_mut() {
                *remaining = remaining.saturating_sub(1);
            }
        }
    }

    /// Iterate over active entries in grant order.
    pub fn iter(&self) -> impl Iterator<Item = &Buff> {
        self.entries.iter()
    }
}
