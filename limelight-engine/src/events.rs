//! Announcement events raised by engine operations.
//!
//! The engine never talks to a chat surface itself; operations hand back
//! the events worth announcing and the platform layer formats them.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::account::AccountId;
use crate::stats::StatKey;
use crate::tier::Tier;

/// Events raised by one operation. Two is the most any single operation can
/// produce today.
pub type EventList = SmallVec<[ProgressionEvent; 2]>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressionEvent {
    AccountLevelUp {
        account: AccountId,
        new_level: u32,
        levels_gained: u32,
    },
    TierChanged {
        account: AccountId,
        old_tier: Tier,
        new_tier: Tier,
    },
    CharacterTrained {
        owner: AccountId,
        name: String,
        stat: StatKey,
        reward: i64,
        levels_gained: u32,
    },
}

impl ProgressionEvent {
    /// The account the event is about.
    #[must_use]
    pub const fn subject(&self) -> AccountId {
        match self {
            Self::AccountLevelUp { account, .. } | Self::TierChanged { account, .. } => *account,
            Self::CharacterTrained { owner, .. } => *owner,
        }
    }
}
