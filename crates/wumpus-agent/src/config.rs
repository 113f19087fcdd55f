#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use wumpus_core::Cell;
use wumpus_kb::{HazardKind, KnowledgeBase};

/// Scoring and loop limits for one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AgentConfig {
    pub gold_bounty: i64,
    pub move_cost: i64,
    pub arrow_cost: i64,
    pub death_penalty: i64,
    pub danger: DangerWeights,
    /// Hard cap on turns; reaching it ends the attempt with
    /// [`crate::Outcome::TurnLimit`].
    pub max_turns: u32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            gold_bounty: 1000,
            move_cost: 1,
            arrow_cost: 100,
            death_penalty: 1000,
            danger: DangerWeights::default(),
            max_turns: 10_000,
        }
    }
}

/// Per-hazard-kind penalties used to rank cells when no provably safe move
/// exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DangerWeights {
    pub certain: u32,
    pub suspected: u32,
    pub unknown: u32,
    pub safe: u32,
}

impl Default for DangerWeights {
    fn default() -> Self {
        Self {
            certain: 100,
            suspected: 10,
            unknown: 1,
            safe: 0,
        }
    }
}

impl DangerWeights {
    /// Sum over both hazard kinds; a certified safe cell scores `safe`.
    pub fn score(&self, kb: &KnowledgeBase, cell: Cell) -> u32 {
        if kb.is_safe(cell) {
            return self.safe;
        }
        HazardKind::ALL
            .into_iter()
            .map(|kind| {
                if kb.hazard_present(kind, cell) {
                    self.certain
                } else if kb.is_suspected(kind, cell) {
                    self.suspected
                } else if kb.is_ruled_out(kind, cell) {
                    self.safe
                } else {
                    self.unknown
                }
            })
            .sum()
    }
}
