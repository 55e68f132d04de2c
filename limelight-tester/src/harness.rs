//! Deterministic season simulation over a live progression engine.
//!
//! A season drives one in-memory engine through a schedule of member
//! chatter, character creation attempts, training sessions and end-of-season
//! account resets. Counters accumulate into a [`SeasonSummary`] and the
//! engine state left behind is audited against the progression invariants.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::{Context, Result, bail, ensure};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use thiserror::Error;

use limelight_engine::{
    AccountId, EngineError, LeaderboardEntry, MemoryStore, ProgressionEngine, Specialty,
    SpecialtyChooser, StatKey, Tier, numbers,
};

// Reward bands the auditor holds the engine to.
const MESSAGE_XP_MIN: i64 = 3;
const MESSAGE_XP_MAX: i64 = 5;
const TRAINING_XP_MIN: i64 = 750;
const TRAINING_XP_MAX: i64 = 1_250;
const BEST_MULTIPLIER: f64 = 1.10;

// Creation attempts are mostly fresh names; every interval-th attempt
// deliberately reuses a taken name to exercise the uniqueness wall.
const NAME_PROBE_INTERVAL: u64 = 7;
const NAME_PROBE_OFFSET: u64 = 3;

/// Knobs for one simulated season.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonConfig {
    pub members: u64,
    pub days: u32,
    pub messages_per_day: u32,
    pub create_attempts_per_day: u32,
    pub trainings_per_day: u32,
    pub resets_at_end: u32,
}

impl SeasonConfig {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            members: 6,
            days: 30,
            messages_per_day: 20,
            create_attempts_per_day: 2,
            trainings_per_day: 4,
            resets_at_end: 0,
        }
    }

    #[must_use]
    pub const fn with_members(mut self, members: u64) -> Self {
        self.members = members;
        self
    }

    #[must_use]
    pub const fn with_days(mut self, days: u32) -> Self {
        self.days = days;
        self
    }

    #[must_use]
    pub const fn with_messages_per_day(mut self, messages: u32) -> Self {
        self.messages_per_day = messages;
        self
    }

    #[must_use]
    pub const fn with_create_attempts(mut self, attempts: u32) -> Self {
        self.create_attempts_per_day = attempts;
        self
    }

    #[must_use]
    pub const fn with_trainings(mut self, trainings: u32) -> Self {
        self.trainings_per_day = trainings;
        self
    }

    #[must_use]
    pub const fn with_resets(mut self, resets: u32) -> Self {
        self.resets_at_end = resets;
        self
    }
}

impl Default for SeasonConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Counters accumulated over a season.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeasonStats {
    pub messages: u64,
    pub account_levels_gained: u64,
    pub tier_promotions: u64,
    pub characters_created: u64,
    pub quota_rejections: u64,
    pub duplicate_name_rejections: u64,
    pub training_sessions: u64,
    pub stat_levels_gained: u64,
    pub accounts_reset: u32,
    pub characters_removed: u32,
    pub min_training_reward: i64,
    pub max_training_reward: i64,
}

/// Complete record of a simulated season.
#[derive(Debug, Clone)]
pub struct SeasonSummary {
    pub seed: u64,
    pub config: SeasonConfig,
    pub stats: SeasonStats,
    /// Final community standings, best account first.
    pub standings: Vec<LeaderboardEntry>,
    /// Notable moments, oldest first.
    pub event_log: Vec<String>,
}

/// Assertion hook run against a finished season.
type SeasonExpectationFn = Arc<dyn Fn(&SeasonSummary) -> Result<()> + Send + Sync + 'static>;

#[derive(Clone)]
pub struct SeasonExpectation(SeasonExpectationFn);

impl fmt::Debug for SeasonExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeasonExpectation").finish()
    }
}

impl SeasonExpectation {
    #[must_use]
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&SeasonSummary) -> Result<()> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn evaluate(&self, summary: &SeasonSummary) -> Result<()> {
        (self.0)(summary)
    }
}

impl<F> From<F> for SeasonExpectation
where
    F: Fn(&SeasonSummary) -> Result<()> + Send + Sync + 'static,
{
    fn from(f: F) -> Self {
        Self(Arc::new(f))
    }
}

/// Declarative plan for running a season.
#[derive(Debug, Clone)]
pub struct SeasonPlan {
    pub config: SeasonConfig,
    pub expectations: Vec<SeasonExpectation>,
}

impl SeasonPlan {
    #[must_use]
    pub const fn new(config: SeasonConfig) -> Self {
        Self {
            config,
            expectations: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_expectation(mut self, expectation: impl Into<SeasonExpectation>) -> Self {
        self.expectations.push(expectation.into());
        self
    }
}

/// Raised when a creation attempt asks for a specialty the script ran out of.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("specialty script exhausted")]
pub struct ScriptExhausted;

/// Chooser double fed from a prepared list, newest pick first.
pub struct ScriptedChooser {
    script: Mutex<Vec<Specialty>>,
}

impl ScriptedChooser {
    #[must_use]
    pub fn new(script: Vec<Specialty>) -> Self {
        Self {
            script: Mutex::new(script),
        }
    }

    /// Queue the pick the next creation attempt will receive.
    pub fn push(&self, specialty: Specialty) {
        self.guard().push(specialty);
    }

    fn guard(&self) -> MutexGuard<'_, Vec<Specialty>> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SpecialtyChooser for ScriptedChooser {
    type Error = ScriptExhausted;

    fn choose(&self, _owner: AccountId, _name: &str) -> Result<Specialty, ScriptExhausted> {
        self.guard().pop().ok_or(ScriptExhausted)
    }
}

/// Run one season and audit the engine state it leaves behind.
///
/// # Errors
///
/// Returns an error when an engine call fails or a progression invariant is
/// violated mid-season.
pub fn run_plan(plan: &SeasonPlan, seed: u64) -> Result<SeasonSummary> {
    let mut season = Season::new(plan.config, seed);
    season.run()?;
    Ok(season.into_summary())
}

fn member_name(id: AccountId) -> String {
    format!("member-{:02}", id.0)
}

struct Season {
    engine: ProgressionEngine<MemoryStore>,
    rng: ChaCha20Rng,
    chooser: ScriptedChooser,
    config: SeasonConfig,
    seed: u64,
    stats: SeasonStats,
    /// Live characters as (owner, name).
    roster: Vec<(AccountId, String)>,
    standings: Vec<LeaderboardEntry>,
    event_log: Vec<String>,
    next_character: u64,
    creation_attempts: u64,
}

impl Season {
    fn new(config: SeasonConfig, seed: u64) -> Self {
        Self {
            engine: ProgressionEngine::new(MemoryStore::new()),
            rng: ChaCha20Rng::seed_from_u64(seed),
            chooser: ScriptedChooser::new(Vec::new()),
            config,
            seed,
            stats: SeasonStats::default(),
            roster: Vec::new(),
            standings: Vec::new(),
            event_log: Vec::new(),
            next_character: 1,
            creation_attempts: 0,
        }
    }

    fn run(&mut self) -> Result<()> {
        ensure!(self.config.members > 0, "a season needs at least one member");
        for day in 1..=self.config.days {
            self.day(day)?;
        }
        let resets = u64::from(self.config.resets_at_end).min(self.config.members);
        for member in 1..=resets {
            self.reset(AccountId(member))?;
        }
        self.audit()
    }

    fn day(&mut self, day: u32) -> Result<()> {
        for member in 1..=self.config.members {
            let id = AccountId(member);
            for _ in 0..self.config.messages_per_day {
                self.chat(day, id)?;
            }
        }
        for _ in 0..self.config.create_attempts_per_day {
            self.attempt_creation(day)?;
        }
        for _ in 0..self.config.trainings_per_day {
            self.training_session(day)?;
        }
        Ok(())
    }

    fn chat(&mut self, day: u32, id: AccountId) -> Result<()> {
        let name = member_name(id);
        let outcome = self
            .engine
            .record_activity(id, &name, &mut self.rng)
            .with_context(|| format!("crediting a message to {name}"))?;
        ensure!(
            (MESSAGE_XP_MIN..=MESSAGE_XP_MAX).contains(&outcome.xp_gained),
            "message reward {} escaped the {MESSAGE_XP_MIN}..={MESSAGE_XP_MAX} band",
            outcome.xp_gained
        );
        self.stats.messages += 1;
        self.stats.account_levels_gained += u64::from(outcome.levels_gained);
        if outcome.levels_gained > 0 {
            self.note(format!("day {day}: {name} reached level {}", outcome.level));
        }
        if outcome.tier_changed() {
            ensure!(
                outcome.new_tier as u32 > outcome.old_tier as u32,
                "{name} moved down from {} to {}",
                outcome.old_tier,
                outcome.new_tier
            );
            self.stats.tier_promotions += 1;
            self.note(format!(
                "day {day}: {name} was promoted to {}",
                outcome.new_tier
            ));
        }
        Ok(())
    }

    fn attempt_creation(&mut self, day: u32) -> Result<()> {
        self.creation_attempts += 1;
        if self.creation_attempts % NAME_PROBE_INTERVAL == NAME_PROBE_OFFSET
            && !self.roster.is_empty()
        {
            return self.probe_taken_name();
        }

        let owner = self.draw_member();
        let name = format!("star-{:04}", self.next_character);
        self.next_character += 1;
        let pick = self.draw_specialty();
        self.chooser.push(pick.clone());

        match self.engine.create_character_with(owner, &name, &self.chooser) {
            Ok(record) => {
                ensure!(
                    record.specialty == pick,
                    "{name} was stored with specialty '{}' instead of '{}'",
                    record.specialty.label(),
                    pick.label()
                );
                self.stats.characters_created += 1;
                self.roster.push((owner, name.clone()));
                self.note(format!(
                    "day {day}: {} debuted {name} as {}",
                    member_name(owner),
                    pick.label()
                ));
                Ok(())
            }
            Err(err) => match err.downcast_ref::<EngineError>() {
                Some(EngineError::QuotaExceeded { .. }) => {
                    self.stats.quota_rejections += 1;
                    self.note(format!(
                        "day {day}: {} hit their character quota",
                        member_name(owner)
                    ));
                    Ok(())
                }
                Some(EngineError::NameTaken(_)) => {
                    self.stats.duplicate_name_rejections += 1;
                    Ok(())
                }
                _ => Err(err).with_context(|| format!("creating {name} for {owner}")),
            },
        }
    }

    fn probe_taken_name(&mut self) -> Result<()> {
        let index = self.rng.gen_range(0..self.roster.len());
        let taken = self.roster[index].1.clone();
        let owner = self.draw_member();
        let specialty = self.draw_specialty();
        match self.engine.create_character(owner, &taken, specialty) {
            Err(EngineError::NameTaken(_)) => {
                self.stats.duplicate_name_rejections += 1;
                Ok(())
            }
            // the quota is checked before the name, so a full roster wins
            Err(EngineError::QuotaExceeded { .. }) => {
                self.stats.quota_rejections += 1;
                Ok(())
            }
            Err(err) => Err(err).with_context(|| format!("probing the taken name {taken}")),
            Ok(record) => bail!("the taken name {} was accepted twice", record.name),
        }
    }

    fn training_session(&mut self, day: u32) -> Result<()> {
        if self.roster.is_empty() {
            return Ok(());
        }
        let index = self.rng.gen_range(0..self.roster.len());
        let (owner, name) = self.roster[index].clone();
        let stat = StatKey::ALL[self.rng.gen_range(0..StatKey::ALL.len())];
        let outcome = self
            .engine
            .train(owner, &name, stat, &mut self.rng)
            .with_context(|| format!("training {name} in {stat}"))?;
        ensure!(
            (TRAINING_XP_MIN..=TRAINING_XP_MAX).contains(&outcome.base_xp),
            "training draw {} escaped the {TRAINING_XP_MIN}..={TRAINING_XP_MAX} band",
            outcome.base_xp
        );
        ensure!(
            outcome.reward >= outcome.base_xp,
            "the specialty bonus shrank a reward from {} to {}",
            outcome.base_xp,
            outcome.reward
        );
        let ceiling =
            numbers::trunc_f64_to_i64(numbers::i64_to_f64(outcome.base_xp) * BEST_MULTIPLIER);
        ensure!(
            outcome.reward <= ceiling,
            "reward {} exceeds the best-case ceiling {ceiling}",
            outcome.reward
        );
        self.stats.training_sessions += 1;
        self.stats.stat_levels_gained += u64::from(outcome.levels_gained);
        self.record_reward(outcome.reward);
        if outcome.levels_gained > 0 {
            self.note(format!(
                "day {day}: {name} pushed {stat} to level {}",
                outcome.level
            ));
        }
        Ok(())
    }

    fn record_reward(&mut self, reward: i64) {
        if self.stats.training_sessions == 1 {
            self.stats.min_training_reward = reward;
            self.stats.max_training_reward = reward;
        } else {
            self.stats.min_training_reward = self.stats.min_training_reward.min(reward);
            self.stats.max_training_reward = self.stats.max_training_reward.max(reward);
        }
    }

    fn reset(&mut self, id: AccountId) -> Result<()> {
        let outcome = self
            .engine
            .reset_account(id)
            .with_context(|| format!("resetting {id}"))?;
        if outcome.account_deleted {
            self.stats.accounts_reset += 1;
        }
        self.stats.characters_removed += outcome.characters_deleted;
        self.roster.retain(|(owner, _)| *owner != id);

        let again = self
            .engine
            .reset_account(id)
            .with_context(|| format!("repeating the reset of {id}"))?;
        ensure!(
            !again.account_deleted && again.characters_deleted == 0,
            "a repeated reset of {id} still found records to remove"
        );
        self.note(format!(
            "season end: {} left, {} characters removed",
            member_name(id),
            outcome.characters_deleted
        ));
        Ok(())
    }

    fn audit(&mut self) -> Result<()> {
        for member in 1..=self.config.members {
            let id = AccountId(member);
            let summary = self
                .engine
                .account_summary(id)
                .with_context(|| format!("reading the summary of {id}"))?;
            let Some(summary) = summary else {
                continue;
            };
            ensure!(summary.xp >= 0, "{id} holds negative xp {}", summary.xp);
            ensure!(
                summary.xp < summary.next_level_cost,
                "{id} banks {} xp against a next level costing only {}",
                summary.xp,
                summary.next_level_cost
            );
            ensure!(
                summary.tier == Tier::for_level(summary.level),
                "{id} reports tier {} at level {}",
                summary.tier,
                summary.level
            );
            ensure!(
                (0.0..1.0).contains(&summary.progress),
                "{id} reports progress {} outside the unit range",
                summary.progress
            );
        }

        for (owner, name) in &self.roster {
            let sheet = self
                .engine
                .character_sheet(*owner, name)
                .with_context(|| format!("reading the sheet of {name}"))?;
            let total: u32 = sheet.stats.iter().map(|line| line.level).sum();
            ensure!(
                sheet.total_level == total,
                "{name} reports total level {} but its lines sum to {total}",
                sheet.total_level
            );
            ensure!(
                sheet.stats.len() == StatKey::ALL.len(),
                "{name} lists {} stat lines",
                sheet.stats.len()
            );
        }

        let limit = usize::try_from(self.config.members).unwrap_or(usize::MAX);
        self.standings = self
            .engine
            .leaderboard(limit)
            .context("reading the final standings")?;
        for pair in self.standings.windows(2) {
            ensure!(
                (pair[1].level, pair[1].xp) <= (pair[0].level, pair[0].xp),
                "standings rank {} outranks rank {} above it",
                pair[1].rank,
                pair[0].rank
            );
            ensure!(
                pair[1].rank == pair[0].rank + 1,
                "standings ranks jump from {} to {}",
                pair[0].rank,
                pair[1].rank
            );
        }
        Ok(())
    }

    fn draw_member(&mut self) -> AccountId {
        AccountId(self.rng.gen_range(1..=self.config.members))
    }

    fn draw_specialty(&mut self) -> Specialty {
        let catalog = Specialty::catalog();
        let index = self.rng.gen_range(0..=catalog.len());
        catalog
            .into_iter()
            .nth(index)
            .unwrap_or_else(|| Specialty::Custom(format!("Opening Act {}", self.next_character)))
    }

    fn note(&mut self, entry: String) {
        log::debug!("{entry}");
        self.event_log.push(entry);
    }

    fn into_summary(self) -> SeasonSummary {
        SeasonSummary {
            seed: self.seed,
            config: self.config,
            stats: self.stats,
            standings: self.standings,
            event_log: self.event_log,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_config() -> SeasonConfig {
        SeasonConfig::new()
            .with_members(3)
            .with_days(5)
            .with_messages_per_day(10)
            .with_create_attempts(2)
            .with_trainings(3)
    }

    #[test]
    fn seasons_are_deterministic_per_seed() {
        let plan = SeasonPlan::new(quick_config());
        let first = run_plan(&plan, 99).expect("first season");
        let second = run_plan(&plan, 99).expect("second season");
        assert_eq!(first.stats, second.stats);
        assert_eq!(first.standings, second.standings);
        assert_eq!(first.event_log, second.event_log);
    }

    #[test]
    fn counters_match_the_schedule() {
        let summary = run_plan(&SeasonPlan::new(quick_config()), 7).expect("season");
        assert_eq!(summary.stats.messages, 3 * 5 * 10);
        assert!(summary.stats.characters_created >= 1);
        assert_eq!(summary.standings.len(), 3);
    }

    #[test]
    fn resets_empty_the_standings() {
        let config = quick_config().with_resets(3);
        let summary = run_plan(&SeasonPlan::new(config), 11).expect("season");
        assert_eq!(summary.stats.accounts_reset, 3);
        assert!(summary.standings.is_empty());
    }

    #[test]
    fn scripted_chooser_pops_newest_first() {
        let chooser = ScriptedChooser::new(vec![Specialty::Singer, Specialty::Dancer]);
        let first = chooser.choose(AccountId(1), "Nova").expect("first pick");
        assert_eq!(first, Specialty::Dancer);
        let second = chooser.choose(AccountId(1), "Nova").expect("second pick");
        assert_eq!(second, Specialty::Singer);
        assert_eq!(chooser.choose(AccountId(1), "Nova"), Err(ScriptExhausted));
    }

    #[test]
    fn expectations_evaluate_against_the_summary() {
        let plan = SeasonPlan::new(quick_config()).with_expectation(|summary: &SeasonSummary| {
            ensure!(summary.stats.messages == 0, "expected a silent season");
            Ok(())
        });
        let summary = run_plan(&plan, 5).expect("season");
        assert!(plan.expectations[0].evaluate(&summary).is_err());
    }
}
