//! Season scenario catalog.
//!
//! Each scenario fixes a season schedule whose outcome bounds hold for every
//! seed, so a failed expectation always points at an engine regression
//! rather than an unlucky draw.

use anyhow::Result;

use crate::harness::{SeasonConfig, SeasonPlan, SeasonSummary};

/// A named season plan with pass criteria attached.
#[derive(Debug, Clone)]
pub struct SeasonScenario {
    name: &'static str,
    description: &'static str,
    plan: SeasonPlan,
}

impl SeasonScenario {
    #[must_use]
    pub const fn new(name: &'static str, description: &'static str, plan: SeasonPlan) -> Self {
        Self {
            name,
            description,
            plan,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        self.description
    }

    #[must_use]
    pub const fn plan(&self) -> &SeasonPlan {
        &self.plan
    }
}

pub fn catalog_scenarios() -> Vec<SeasonScenario> {
    vec![
        SeasonScenario::new(
            "smoke",
            "Short mixed season touching every engine operation",
            SeasonPlan::new(
                SeasonConfig::new()
                    .with_members(3)
                    .with_days(5)
                    .with_messages_per_day(10)
                    .with_create_attempts(2)
                    .with_trainings(3),
            )
            .with_expectation(smoke_expectation),
        ),
        SeasonScenario::new(
            "steady-chatter",
            "Messages only; seniority must keep pace with the schedule",
            SeasonPlan::new(
                SeasonConfig::new()
                    .with_members(4)
                    .with_days(20)
                    .with_messages_per_day(25)
                    .with_create_attempts(0)
                    .with_trainings(0),
            )
            .with_expectation(steady_chatter_expectation),
        ),
        SeasonScenario::new(
            "roster-growth",
            "Heavy creation traffic against newcomer quotas and name uniqueness",
            SeasonPlan::new(
                SeasonConfig::new()
                    .with_members(4)
                    .with_days(15)
                    .with_messages_per_day(10)
                    .with_create_attempts(2)
                    .with_trainings(3),
            )
            .with_expectation(roster_growth_expectation),
        ),
        SeasonScenario::new(
            "training-grind",
            "Concentrated training; some stat must level despite spread sessions",
            SeasonPlan::new(
                SeasonConfig::new()
                    .with_members(2)
                    .with_days(60)
                    .with_messages_per_day(5)
                    .with_create_attempts(1)
                    .with_trainings(12),
            )
            .with_expectation(training_grind_expectation),
        ),
        SeasonScenario::new(
            "seniority-ladder",
            "Enough chatter to push every member out of the newcomer tier",
            SeasonPlan::new(
                SeasonConfig::new()
                    .with_members(3)
                    .with_days(80)
                    .with_messages_per_day(60)
                    .with_create_attempts(0)
                    .with_trainings(0),
            )
            .with_expectation(seniority_ladder_expectation),
        ),
        SeasonScenario::new(
            "quota-walls",
            "Low-level members slamming into the newcomer character quota",
            SeasonPlan::new(
                SeasonConfig::new()
                    .with_members(2)
                    .with_days(10)
                    .with_messages_per_day(2)
                    .with_create_attempts(2)
                    .with_trainings(0),
            )
            .with_expectation(quota_walls_expectation),
        ),
        SeasonScenario::new(
            "reset-sweep",
            "End-of-season account resets wipe records and free names",
            SeasonPlan::new(
                SeasonConfig::new()
                    .with_members(3)
                    .with_days(10)
                    .with_messages_per_day(10)
                    .with_create_attempts(2)
                    .with_trainings(2)
                    .with_resets(2),
            )
            .with_expectation(reset_sweep_expectation),
        ),
    ]
}

pub fn find_catalog_scenario(name: &str) -> Option<SeasonScenario> {
    catalog_scenarios()
        .into_iter()
        .find(|scenario| scenario.name() == name)
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    catalog_scenarios()
        .iter()
        .map(|scenario| (scenario.name(), scenario.description()))
        .collect()
}

fn scheduled_messages(config: &SeasonConfig) -> u64 {
    config.members * u64::from(config.days) * u64::from(config.messages_per_day)
}

fn smoke_expectation(summary: &SeasonSummary) -> Result<()> {
    anyhow::ensure!(
        summary.stats.messages == scheduled_messages(&summary.config),
        "Every scheduled message should be credited"
    );
    anyhow::ensure!(
        summary.stats.characters_created >= 1,
        "A smoke season should debut at least one character"
    );
    anyhow::ensure!(
        !summary.standings.is_empty(),
        "Standings should list active members"
    );
    Ok(())
}

fn steady_chatter_expectation(summary: &SeasonSummary) -> Result<()> {
    let expected = scheduled_messages(&summary.config);
    anyhow::ensure!(
        summary.stats.messages == expected,
        "Credited {} of {expected} scheduled messages",
        summary.stats.messages
    );
    anyhow::ensure!(
        summary.stats.account_levels_gained >= summary.config.members,
        "Chatter at this pace should level every member at least once"
    );
    anyhow::ensure!(
        summary.stats.characters_created == 0,
        "No creation attempts were scheduled"
    );
    Ok(())
}

fn roster_growth_expectation(summary: &SeasonSummary) -> Result<()> {
    let stats = &summary.stats;
    anyhow::ensure!(
        stats.characters_created >= 3,
        "Creation traffic should land at least a newcomer quota of characters"
    );
    anyhow::ensure!(
        stats.quota_rejections >= 1,
        "This attempt rate should overrun the newcomer quotas"
    );
    anyhow::ensure!(
        stats.duplicate_name_rejections >= 1,
        "Name probes should be turned away"
    );
    let scheduled =
        u64::from(summary.config.days) * u64::from(summary.config.trainings_per_day);
    anyhow::ensure!(
        stats.training_sessions == scheduled,
        "Ran {} of {scheduled} scheduled training sessions",
        stats.training_sessions
    );
    anyhow::ensure!(
        stats.min_training_reward >= 750 && stats.max_training_reward <= 1375,
        "Rewards escaped the 750..=1375 envelope: {} to {}",
        stats.min_training_reward,
        stats.max_training_reward
    );
    Ok(())
}

fn training_grind_expectation(summary: &SeasonSummary) -> Result<()> {
    let stats = &summary.stats;
    let scheduled =
        u64::from(summary.config.days) * u64::from(summary.config.trainings_per_day);
    anyhow::ensure!(
        stats.training_sessions == scheduled,
        "Ran {} of {scheduled} scheduled training sessions",
        stats.training_sessions
    );
    anyhow::ensure!(
        stats.stat_levels_gained >= 1,
        "This much training must level some stat somewhere"
    );
    anyhow::ensure!(
        stats.min_training_reward >= 750,
        "Minimum reward {} fell under the training floor",
        stats.min_training_reward
    );
    anyhow::ensure!(
        stats.max_training_reward <= 1375,
        "Maximum reward {} exceeded the boosted training cap",
        stats.max_training_reward
    );
    Ok(())
}

fn seniority_ladder_expectation(summary: &SeasonSummary) -> Result<()> {
    anyhow::ensure!(
        summary.stats.tier_promotions >= summary.config.members,
        "Every member should be promoted out of newcomer: {} promotions for {} members",
        summary.stats.tier_promotions,
        summary.config.members
    );
    anyhow::ensure!(
        summary.stats.account_levels_gained >= 9 * summary.config.members,
        "Every member should climb at least nine levels"
    );
    Ok(())
}

fn quota_walls_expectation(summary: &SeasonSummary) -> Result<()> {
    let stats = &summary.stats;
    anyhow::ensure!(
        stats.quota_rejections >= 1,
        "Newcomers should hit the character quota"
    );
    anyhow::ensure!(
        stats.duplicate_name_rejections >= 1,
        "Name probes should be turned away"
    );
    anyhow::ensure!(
        stats.characters_created <= 3 * summary.config.members,
        "Created {} characters past the newcomer quota",
        stats.characters_created
    );
    anyhow::ensure!(
        stats.account_levels_gained == 0,
        "This little chatter cannot reach the first level cost"
    );
    anyhow::ensure!(stats.tier_promotions == 0, "Nobody should leave newcomer");
    Ok(())
}

fn reset_sweep_expectation(summary: &SeasonSummary) -> Result<()> {
    anyhow::ensure!(
        summary.stats.accounts_reset == summary.config.resets_at_end,
        "Reset {} of {} scheduled accounts",
        summary.stats.accounts_reset,
        summary.config.resets_at_end
    );
    anyhow::ensure!(
        summary.stats.characters_created >= 1,
        "The season should debut characters before the sweep"
    );
    let remaining = summary.config.members - u64::from(summary.config.resets_at_end);
    anyhow::ensure!(
        summary.standings.len() == usize::try_from(remaining).unwrap_or(usize::MAX),
        "Standings should only list the {remaining} surviving accounts"
    );
    Ok(())
}
