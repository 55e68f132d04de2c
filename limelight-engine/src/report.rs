//! Presentation-ready report rows.
//!
//! Pure projections of stored records; the platform layer owns formatting
//! and delivery. Progress values are unit ratios, not percentages.

use serde::Serialize;

use crate::account::{AccountId, AccountRecord};
use crate::character::CharacterRecord;
use crate::curve;
use crate::numbers::unit_ratio;
use crate::stats::StatKey;
use crate::tier::{Tier, TierLabels};

/// Profile card for one account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountSummary {
    pub account: AccountId,
    pub display_name: String,
    pub level: u32,
    pub xp: i64,
    /// Cost the current level charged.
    pub level_cost: i64,
    /// Cost the next level will charge.
    pub next_level_cost: i64,
    pub xp_missing: i64,
    pub messages: u64,
    pub tier: Tier,
    pub tier_label: String,
    pub progress: f64,
}

/// One trainable stat on a character sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatLine {
    pub stat: StatKey,
    pub level: u32,
    pub xp: i64,
    pub next_level_cost: i64,
    pub progress: f64,
}

/// Full sheet for one character.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterSheet {
    pub name: String,
    pub owner: AccountId,
    pub specialty_label: String,
    /// Six lines, in catalog order.
    pub stats: Vec<StatLine>,
    pub reputation: i32,
    pub total_level: u32,
}

/// Roster line for the owner's character list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterOverview {
    pub name: String,
    pub specialty_label: String,
    pub total_level: u32,
    pub reputation: i32,
}

/// Ranked community leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub account: AccountId,
    pub display_name: String,
    pub level: u32,
    pub xp: i64,
    pub messages: u64,
    pub tier_label: String,
}

#[must_use]
pub fn account_summary(record: &AccountRecord, labels: &TierLabels) -> AccountSummary {
    let tier = record.tier();
    let next_level_cost = curve::account_threshold(record.level.saturating_add(1));
    AccountSummary {
        account: record.id,
        display_name: record.display_name.clone(),
        level: record.level,
        xp: record.xp,
        level_cost: curve::account_threshold(record.level),
        next_level_cost,
        xp_missing: next_level_cost.saturating_sub(record.xp).max(0),
        messages: record.messages,
        tier,
        tier_label: labels.label(tier).to_string(),
        progress: unit_ratio(record.xp, next_level_cost),
    }
}

#[must_use]
pub fn character_sheet(record: &CharacterRecord) -> CharacterSheet {
    let stats = StatKey::ALL
        .into_iter()
        .map(|stat| {
            let track = record.stats.track(stat);
            let next_level_cost = curve::stat_threshold(track.level.saturating_add(1));
            StatLine {
                stat,
                level: track.level,
                xp: track.xp,
                next_level_cost,
                progress: unit_ratio(track.xp, next_level_cost),
            }
        })
        .collect();
    CharacterSheet {
        name: record.name.clone(),
        owner: record.owner,
        specialty_label: record.specialty.label().to_string(),
        stats,
        reputation: record.reputation,
        total_level: record.stats.total_level(),
    }
}

#[must_use]
pub fn character_overview(record: &CharacterRecord) -> CharacterOverview {
    CharacterOverview {
        name: record.name.clone(),
        specialty_label: record.specialty.label().to_string(),
        total_level: record.stats.total_level(),
        reputation: record.reputation,
    }
}

/// Rank already-ordered records into leaderboard rows, best first.
#[must_use]
pub fn leaderboard(records: &[AccountRecord], labels: &TierLabels) -> Vec<LeaderboardEntry> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| LeaderboardEntry {
            rank: index + 1,
            account: record.id,
            display_name: record.display_name.clone(),
            level: record.level,
            xp: record.xp,
            messages: record.messages,
            tier_label: labels.label(record.tier()).to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specialty::Specialty;

    #[test]
    fn summary_reports_both_curve_costs() {
        let mut record = AccountRecord::new(AccountId(5), "Astra");
        record.xp = 50;
        record.messages = 12;
        let summary = account_summary(&record, &TierLabels::default());
        assert_eq!(summary.level_cost, 200);
        assert_eq!(summary.next_level_cost, 280);
        assert_eq!(summary.xp_missing, 230);
        assert_eq!(summary.tier, Tier::Newcomer);
        assert_eq!(summary.tier_label, "newcomer");
        assert!((summary.progress - 50.0 / 280.0).abs() < 1e-12);
    }

    #[test]
    fn summary_progress_spans_the_unit_interval() {
        let mut record = AccountRecord::new(AccountId(5), "Astra");
        let summary = account_summary(&record, &TierLabels::default());
        assert!((summary.progress).abs() < f64::EPSILON);
        record.level = 30;
        let summary = account_summary(&record, &TierLabels::default());
        assert_eq!(summary.tier_label, "go outside touch some grass");
    }

    #[test]
    fn sheet_lists_all_six_stats_in_catalog_order() {
        let record = CharacterRecord::new(AccountId(1), "Nova", Specialty::Singer);
        let sheet = character_sheet(&record);
        assert_eq!(sheet.stats.len(), 6);
        let order: Vec<StatKey> = sheet.stats.iter().map(|line| line.stat).collect();
        assert_eq!(order, StatKey::ALL);
        assert_eq!(sheet.stats[0].level, 3);
        assert_eq!(sheet.stats[0].next_level_cost, curve::stat_threshold(4));
        assert_eq!(sheet.stats[1].next_level_cost, 5_240);
        assert_eq!(sheet.total_level, 8);
        assert_eq!(sheet.specialty_label, "Singer");
    }

    #[test]
    fn overview_carries_the_roster_columns() {
        let record = CharacterRecord::new(AccountId(1), "Kay", Specialty::Influencer);
        let overview = character_overview(&record);
        assert_eq!(overview.name, "Kay");
        assert_eq!(overview.specialty_label, "Influencer");
        assert_eq!(overview.total_level, 6);
        assert_eq!(overview.reputation, 1_000);
    }

    #[test]
    fn leaderboard_ranks_from_one_in_given_order() {
        let mut first = AccountRecord::new(AccountId(1), "Astra");
        first.level = 12;
        let second = AccountRecord::new(AccountId(2), "Briar");
        let rows = leaderboard(&[first, second], &TierLabels::default());
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].tier_label, "rising");
        assert_eq!(rows[1].rank, 2);
        assert_eq!(rows[1].display_name, "Briar");
    }
}
