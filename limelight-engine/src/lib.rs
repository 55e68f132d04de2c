//! Limelight Progression Engine
//!
//! Platform-agnostic core progression logic for the Limelight community
//! role-play system. This crate provides seniority leveling, character
//! management, and stat training without UI or platform-specific dependencies.

pub mod account;
pub mod character;
pub mod constants;
pub mod curve;
pub mod error;
pub mod events;
pub mod ledger;
pub mod numbers;
pub mod report;
pub mod specialty;
pub mod stats;
pub mod store;
pub mod tier;
pub mod training;

// Re-export commonly used types
pub use account::{
    AccountId, AccountRecord, ActivityOutcome, ResetOutcome, record_activity_with_rng,
};
pub use character::CharacterRecord;
pub use curve::{account_threshold, stat_threshold};
pub use error::EngineError;
pub use events::{EventList, ProgressionEvent};
pub use ledger::Resolution;
pub use report::{AccountSummary, CharacterOverview, CharacterSheet, LeaderboardEntry, StatLine};
pub use specialty::{
    CreationBonus, Specialty, SpecialtyChooser, creation_bonus, teaching_label,
    training_multiplier,
};
pub use stats::{StatBlock, StatKey, StatTrack};
pub use store::{MemoryStore, ProgressStore};
pub use tier::{CharacterQuota, Tier, TierLabels};
pub use training::{TrainingOutcome, resolve_training_with_rng};

use std::hash::Hasher;
use std::sync::{Mutex, MutexGuard, PoisonError};

use rand::Rng;
use twox_hash::XxHash64;

use crate::constants::LOCK_STRIPES;

/// Striped record locks serializing mutations per account or character.
///
/// Records hash onto a fixed set of stripes, so two records on the same
/// stripe contend even when unrelated. Guards are never held across a
/// chooser round-trip.
struct RecordLocks {
    stripes: Vec<Mutex<()>>,
}

impl RecordLocks {
    fn new() -> Self {
        Self {
            stripes: (0..LOCK_STRIPES).map(|_| Mutex::new(())).collect(),
        }
    }

    fn account_stripe(id: AccountId) -> usize {
        let mut hasher = XxHash64::with_seed(0);
        hasher.write_u8(0);
        hasher.write_u64(id.0);
        Self::stripe_of(hasher.finish())
    }

    fn character_stripe(name: &str) -> usize {
        let mut hasher = XxHash64::with_seed(0);
        hasher.write_u8(1);
        hasher.write(name.as_bytes());
        Self::stripe_of(hasher.finish())
    }

    fn stripe_of(hash: u64) -> usize {
        let stripes = u64::try_from(LOCK_STRIPES).unwrap_or(1).max(1);
        usize::try_from(hash % stripes).unwrap_or(0)
    }

    fn lock(&self, stripe: usize) -> MutexGuard<'_, ()> {
        self.stripes[stripe]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_account(&self, id: AccountId) -> MutexGuard<'_, ()> {
        self.lock(Self::account_stripe(id))
    }

    fn lock_character(&self, name: &str) -> MutexGuard<'_, ()> {
        self.lock(Self::character_stripe(name))
    }

    /// Lock an account stripe and a character stripe in index order, so
    /// concurrent creations can never wait on each other in a cycle.
    fn lock_account_and_character(
        &self,
        id: AccountId,
        name: &str,
    ) -> (MutexGuard<'_, ()>, Option<MutexGuard<'_, ()>>) {
        let account = Self::account_stripe(id);
        let character = Self::character_stripe(name);
        if account == character {
            return (self.lock(account), None);
        }
        let (low, high) = if account < character {
            (account, character)
        } else {
            (character, account)
        };
        (self.lock(low), Some(self.lock(high)))
    }
}

/// Main progression engine for one community.
pub struct ProgressionEngine<S>
where
    S: ProgressStore,
{
    store: S,
    labels: TierLabels,
    locks: RecordLocks,
}

impl<S> ProgressionEngine<S>
where
    S: ProgressStore,
{
    /// Create an engine over the provided store with the stock tier labels.
    pub fn new(store: S) -> Self {
        Self::with_labels(store, TierLabels::default())
    }

    /// Create an engine with community-configured tier labels.
    pub fn with_labels(store: S, labels: TierLabels) -> Self {
        Self {
            store,
            labels,
            locks: RecordLocks::new(),
        }
    }

    /// Tier labels used in reports.
    pub const fn labels(&self) -> &TierLabels {
        &self.labels
    }

    /// The backing store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Credit one counted message to `id`, creating the account record on
    /// first contact.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be read or written back.
    pub fn record_activity(
        &self,
        id: AccountId,
        display_name: &str,
        rng: &mut impl Rng,
    ) -> Result<ActivityOutcome, EngineError> {
        let _guard = self.locks.lock_account(id);
        let mut record = self
            .store
            .get_account(id)
            .map_err(EngineError::store)?
            .unwrap_or_else(|| AccountRecord::new(id, display_name));
        let outcome = account::record_activity_with_rng(&mut record, display_name, rng);
        self.store.put_account(&record).map_err(EngineError::store)?;
        Ok(outcome)
    }

    /// Create a character for `owner` with an already-chosen specialty.
    ///
    /// # Errors
    ///
    /// Fails when the owner has no account record yet, when their tier's
    /// character quota is already full, when the name is taken anywhere in
    /// the community, or when the store is unavailable.
    pub fn create_character(
        &self,
        owner: AccountId,
        name: &str,
        specialty: Specialty,
    ) -> Result<CharacterRecord, EngineError> {
        let _guards = self.locks.lock_account_and_character(owner, name);
        let account = self
            .store
            .get_account(owner)
            .map_err(EngineError::store)?
            .ok_or(EngineError::NoAccountRecord(owner))?;
        let tier = account.tier();
        let quota = tier.quota();
        let live = self.store.characters_of(owner).map_err(EngineError::store)?;
        let live_count = u32::try_from(live.len()).unwrap_or(u32::MAX);
        if !quota.allows(live_count) {
            return Err(EngineError::QuotaExceeded {
                tier,
                limit: quota.limit().unwrap_or(0),
            });
        }
        if self
            .store
            .get_character(name)
            .map_err(EngineError::store)?
            .is_some()
        {
            return Err(EngineError::NameTaken(name.to_string()));
        }
        let record = CharacterRecord::new(owner, name, specialty);
        self.store.put_character(&record).map_err(EngineError::store)?;
        Ok(record)
    }

    /// Create a character, asking `chooser` for the specialty first.
    ///
    /// The chooser runs before any record lock is taken; an interactive
    /// implementation may block on the owner for as long as it likes.
    ///
    /// # Errors
    ///
    /// Returns the chooser's error when selection fails, otherwise any
    /// [`create_character`] error.
    ///
    /// [`create_character`]: Self::create_character
    pub fn create_character_with<C>(
        &self,
        owner: AccountId,
        name: &str,
        chooser: &C,
    ) -> Result<CharacterRecord, anyhow::Error>
    where
        C: SpecialtyChooser,
    {
        let specialty = chooser.choose(owner, name)?;
        Ok(self.create_character(owner, name, specialty)?)
    }

    /// Run one training session on `owner`'s character.
    ///
    /// # Errors
    ///
    /// Fails when the character does not exist under this owner or the
    /// store is unavailable.
    pub fn train(
        &self,
        owner: AccountId,
        name: &str,
        stat: StatKey,
        rng: &mut impl Rng,
    ) -> Result<TrainingOutcome, EngineError> {
        let _guard = self.locks.lock_character(name);
        let mut record = self.owned_character(owner, name)?;
        let outcome = training::resolve_training_with_rng(&mut record, stat, rng);
        self.store.put_character(&record).map_err(EngineError::store)?;
        Ok(outcome)
    }

    /// Delete `owner`'s character.
    ///
    /// # Errors
    ///
    /// Fails when the character does not exist under this owner or the
    /// store is unavailable.
    pub fn delete_character(&self, owner: AccountId, name: &str) -> Result<(), EngineError> {
        let _guard = self.locks.lock_character(name);
        self.owned_character(owner, name)?;
        self.store.delete_character(name).map_err(EngineError::store)?;
        Ok(())
    }

    /// Wipe an account and every character it owns.
    ///
    /// Safe to repeat; a second call reports nothing deleted rather than
    /// erroring. Role revocation on the platform side is the caller's job.
    ///
    /// # Errors
    ///
    /// Returns an error when the store is unavailable.
    pub fn reset_account(&self, id: AccountId) -> Result<ResetOutcome, EngineError> {
        let owned = self.store.characters_of(id).map_err(EngineError::store)?;
        let mut characters_deleted = 0u32;
        for character in &owned {
            let _guard = self.locks.lock_character(&character.name);
            if self
                .store
                .delete_character(&character.name)
                .map_err(EngineError::store)?
            {
                characters_deleted = characters_deleted.saturating_add(1);
            }
        }
        let account_deleted = {
            let _guard = self.locks.lock_account(id);
            self.store.delete_account(id).map_err(EngineError::store)?
        };
        Ok(ResetOutcome {
            account: id,
            account_deleted,
            characters_deleted,
        })
    }

    /// Profile card for `id`, or `None` before any recorded activity.
    ///
    /// # Errors
    ///
    /// Returns an error when the store is unavailable.
    pub fn account_summary(&self, id: AccountId) -> Result<Option<AccountSummary>, EngineError> {
        let record = self.store.get_account(id).map_err(EngineError::store)?;
        Ok(record.map(|record| report::account_summary(&record, &self.labels)))
    }

    /// Full sheet for `owner`'s character.
    ///
    /// # Errors
    ///
    /// Fails when the character does not exist under this owner or the
    /// store is unavailable.
    pub fn character_sheet(&self, owner: AccountId, name: &str) -> Result<CharacterSheet, EngineError> {
        let record = self.owned_character(owner, name)?;
        Ok(report::character_sheet(&record))
    }

    /// Roster of `owner`'s characters, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns an error when the store is unavailable.
    pub fn characters_overview(
        &self,
        owner: AccountId,
    ) -> Result<Vec<CharacterOverview>, EngineError> {
        let owned = self.store.characters_of(owner).map_err(EngineError::store)?;
        Ok(owned.iter().map(report::character_overview).collect())
    }

    /// Ranked community leaderboard, best accounts first.
    ///
    /// # Errors
    ///
    /// Returns an error when the store is unavailable.
    pub fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, EngineError> {
        let records = self.store.top_accounts(limit).map_err(EngineError::store)?;
        Ok(report::leaderboard(&records, &self.labels))
    }

    /// Fetch a character and check it belongs to `owner`. Missing and
    /// not-yours collapse into the same answer so callers cannot probe
    /// other members' rosters.
    fn owned_character(&self, owner: AccountId, name: &str) -> Result<CharacterRecord, EngineError> {
        match self.store.get_character(name).map_err(EngineError::store)? {
            Some(record) if record.owner == owner => Ok(record),
            _ => Err(EngineError::NotFound(name.to_string())),
        }
    }
}
