//! Four-tier difficulty state machine.
//!
//! The tier drives the item scroll speed, both parallax layer speeds and the
//! spawn interval. All four values come from one table row, so raising and
//! lowering the tier can never drift apart.

use bevy::prelude::*;

/// Ordered difficulty levels, slowest first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Reflect)]
pub enum Tier {
    #[default]
    Slow,
    Normal,
    Fast,
    Fastest,
}

/// Parameters derived from a tier. Speeds are world units per tick and
/// negative because everything scrolls towards the left edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TierParams {
    pub item_speed: i32,
    pub near_layer_speed: i32,
    pub far_layer_speed: i32,
    /// Seconds between item spawns.
    pub spawn_interval: f32,
}

const TIER_TABLE: [TierParams; 4] = [
    TierParams {
        item_speed: -8,
        near_layer_speed: -6,
        far_layer_speed: -10,
        spawn_interval: 2.0,
    },
    TierParams {
        item_speed: -10,
        near_layer_speed: -8,
        far_layer_speed: -12,
        spawn_interval: 1.5,
    },
    TierParams {
        item_speed: -12,
        near_layer_speed: -10,
        far_layer_speed: -14,
        spawn_interval: 1.5,
    },
    TierParams {
        item_speed: -14,
        near_layer_speed: -12,
        far_layer_speed: -16,
        spawn_interval: 1.0,
    },
];

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Slow, Tier::Normal, Tier::Fast, Tier::Fastest];

    fn index(self) -> usize {
        self as usize
    }

    pub fn params(self) -> TierParams {
        TIER_TABLE[self.index()]
    }

    /// One tier towards `Fastest`, saturating.
    pub fn faster(self) -> Tier {
        Tier::ALL[(self.index() + 1).min(Tier::ALL.len() - 1)]
    }

    /// One tier towards `Slow`, saturating.
    pub fn slower(self) -> Tier {
        Tier::ALL[self.index().saturating_sub(1)]
    }
}

/// Owns the current tier for one running game.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DifficultyController {
    tier: Tier,
}

impl DifficultyController {
    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn params(&self) -> TierParams {
        self.tier.params()
    }

    /// Move one tier up. Returns whether the tier actually changed.
    pub fn escalate(&mut self) -> bool {
        self.set_tier(self.tier.faster())
    }

    /// Move one tier down. Returns whether the tier actually changed.
    pub fn deescalate(&mut self) -> bool {
        self.set_tier(self.tier.slower())
    }

    pub fn reset(&mut self) {
        self.tier = Tier::Slow;
    }

    fn set_tier(&mut self, tier: Tier) -> bool {
        if tier == self.tier {
            return false;
        }
        debug!("Difficulty tier {:?} -> {:?}", self.tier, tier);
        self.tier = tier;
        true
    }
}
