//! Character records.

use serde::{Deserialize, Serialize};

use crate::account::AccountId;
use crate::constants::REPUTATION_DEFAULT;
use crate::specialty::{self, Specialty};
use crate::stats::{StatBlock, StatTrack};

/// A member-owned character with its trainable stats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub owner: AccountId,
    pub name: String,
    pub specialty: Specialty,
    #[serde(default)]
    pub stats: StatBlock,
    #[serde(default = "CharacterRecord::default_reputation")]
    pub reputation: i32,
}

impl CharacterRecord {
    /// Create a character and settle its specialty's starting package.
    #[must_use]
    pub fn new(owner: AccountId, name: impl Into<String>, specialty: Specialty) -> Self {
        let bonus = specialty::creation_bonus(specialty.label());
        let mut stats = StatBlock::default();
        if let Some((stat, level)) = bonus.stat {
            *stats.track_mut(stat) = StatTrack::at_level(level);
        }
        Self {
            owner,
            name: name.into(),
            specialty,
            stats,
            reputation: bonus.reputation,
        }
    }

    const fn default_reputation() -> i32 {
        REPUTATION_DEFAULT
    }
}
