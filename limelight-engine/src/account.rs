//! Account records and the message-activity mechanic.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{MESSAGE_XP_MAX, MESSAGE_XP_MIN};
use crate::curve;
use crate::events::{EventList, ProgressionEvent};
use crate::ledger;
use crate::tier::Tier;

/// Platform-assigned member identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AccountId(pub u64);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-member progression record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub id: AccountId,
    pub display_name: String,
    pub level: u32,
    pub xp: i64,
    pub messages: u64,
}

impl AccountRecord {
    /// Fresh record for a member seen for the first time.
    #[must_use]
    pub fn new(id: AccountId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            level: 1,
            xp: 0,
            messages: 0,
        }
    }

    /// Seniority tier the record's level falls in.
    #[must_use]
    pub const fn tier(&self) -> Tier {
        Tier::for_level(self.level)
    }
}

/// What a single counted message did to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityOutcome {
    pub account: AccountId,
    pub xp_gained: i64,
    pub level: u32,
    pub levels_gained: u32,
    pub old_tier: Tier,
    pub new_tier: Tier,
}

impl ActivityOutcome {
    #[must_use]
    pub const fn tier_changed(&self) -> bool {
        self.old_tier as u32 != self.new_tier as u32
    }

    /// Announcement-worthy events, level-up first.
    #[must_use]
    pub fn events(&self) -> EventList {
        let mut events = EventList::new();
        if self.levels_gained > 0 {
            events.push(ProgressionEvent::AccountLevelUp {
                account: self.account,
                new_level: self.level,
                levels_gained: self.levels_gained,
            });
        }
        if self.tier_changed() {
            events.push(ProgressionEvent::TierChanged {
                account: self.account,
                old_tier: self.old_tier,
                new_tier: self.new_tier,
            });
        }
        events
    }
}

/// Credit one counted message to `record`.
///
/// Draws the message reward, bumps the message counter, refreshes the stored
/// display name, and settles any level-ups against the account curve.
pub fn record_activity_with_rng(
    record: &mut AccountRecord,
    display_name: &str,
    rng: &mut impl Rng,
) -> ActivityOutcome {
    let old_tier = record.tier();
    let gain = rng.gen_range(MESSAGE_XP_MIN..=MESSAGE_XP_MAX);
    record.messages = record.messages.saturating_add(1);
    if record.display_name != display_name {
        record.display_name = display_name.to_string();
    }
    let resolution = ledger::resolve(record.level, record.xp, gain, curve::account_threshold);
    record.level = resolution.level;
    record.xp = resolution.xp;
    ActivityOutcome {
        account: record.id,
        xp_gained: gain,
        level: record.level,
        levels_gained: resolution.levels_gained,
        old_tier,
        new_tier: record.tier(),
    }
}

/// What wiping an account removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetOutcome {
    pub account: AccountId,
    pub account_deleted: bool,
    pub characters_deleted: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn fresh_record_starts_at_level_one() {
        let record = AccountRecord::new(AccountId(7), "Astra");
        assert_eq!(record.level, 1);
        assert_eq!(record.xp, 0);
        assert_eq!(record.messages, 0);
        assert_eq!(record.tier(), Tier::Newcomer);
    }

    #[test]
    fn activity_awards_a_small_reward_and_counts_the_message() {
        let mut record = AccountRecord::new(AccountId(1), "Astra");
        let mut rng = SmallRng::seed_from_u64(42);
        let outcome = record_activity_with_rng(&mut record, "Astra", &mut rng);
        assert!((3..=5).contains(&outcome.xp_gained));
        assert_eq!(record.messages, 1);
        assert_eq!(record.xp, outcome.xp_gained);
        assert_eq!(outcome.levels_gained, 0);
        assert!(outcome.events().is_empty());
    }

    #[test]
    fn activity_refreshes_a_stale_display_name() {
        let mut record = AccountRecord::new(AccountId(1), "Astra");
        let mut rng = SmallRng::seed_from_u64(42);
        record_activity_with_rng(&mut record, "Astra Nova", &mut rng);
        assert_eq!(record.display_name, "Astra Nova");
    }

    #[test]
    fn crossing_the_first_threshold_levels_up() {
        let mut record = AccountRecord::new(AccountId(1), "Astra");
        record.xp = curve::account_threshold(2) - 1;
        let mut rng = SmallRng::seed_from_u64(42);
        let outcome = record_activity_with_rng(&mut record, "Astra", &mut rng);
        assert_eq!(outcome.levels_gained, 1);
        assert_eq!(record.level, 2);
        assert_eq!(record.xp, outcome.xp_gained - 1);
        let events = outcome.events();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            ProgressionEvent::AccountLevelUp { new_level: 2, levels_gained: 1, .. }
        ));
    }

    #[test]
    fn crossing_a_tier_boundary_reports_both_events() {
        let mut record = AccountRecord::new(AccountId(1), "Astra");
        record.level = 9;
        record.xp = curve::account_threshold(10) - 1;
        let mut rng = SmallRng::seed_from_u64(42);
        let outcome = record_activity_with_rng(&mut record, "Astra", &mut rng);
        assert_eq!(record.level, 10);
        assert_eq!(outcome.old_tier, Tier::Newcomer);
        assert_eq!(outcome.new_tier, Tier::Rising);
        assert!(outcome.tier_changed());
        let events = outcome.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], ProgressionEvent::AccountLevelUp { .. }));
        assert!(matches!(
            events[1],
            ProgressionEvent::TierChanged { old_tier: Tier::Newcomer, new_tier: Tier::Rising, .. }
        ));
    }
}
