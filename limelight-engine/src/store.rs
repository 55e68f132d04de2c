//! Storage boundary and the in-memory reference store.
//!
//! The engine talks to persistence through [`ProgressStore`] so platform
//! layers can bring their own backend. [`MemoryStore`] is the canonical
//! implementation used by the simulation harness and the test suites.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::account::{AccountId, AccountRecord};
use crate::character::CharacterRecord;

/// Record persistence for accounts and characters.
///
/// Character names are community-global keys, so the character methods take
/// the bare name. Reads return `None` rather than erroring for missing
/// records; deletes report whether anything was removed.
pub trait ProgressStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// # Errors
    ///
    /// Returns an error when the backend cannot be read.
    fn get_account(&self, id: AccountId) -> Result<Option<AccountRecord>, Self::Error>;

    /// Insert or replace an account record.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot be written.
    fn put_account(&self, record: &AccountRecord) -> Result<(), Self::Error>;

    /// Remove an account record, reporting whether it existed.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot be written.
    fn delete_account(&self, id: AccountId) -> Result<bool, Self::Error>;

    /// # Errors
    ///
    /// Returns an error when the backend cannot be read.
    fn get_character(&self, name: &str) -> Result<Option<CharacterRecord>, Self::Error>;

    /// Insert or replace a character record keyed by its name.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot be written.
    fn put_character(&self, record: &CharacterRecord) -> Result<(), Self::Error>;

    /// Remove a character record, reporting whether it existed.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot be written.
    fn delete_character(&self, name: &str) -> Result<bool, Self::Error>;

    /// Every character owned by `owner`, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot be read.
    fn characters_of(&self, owner: AccountId) -> Result<Vec<CharacterRecord>, Self::Error>;

    /// Up to `limit` account records, highest level first, ties broken by
    /// raw experience.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot be read.
    fn top_accounts(&self, limit: usize) -> Result<Vec<AccountRecord>, Self::Error>;
}

/// Process-local store backed by hash maps.
#[derive(Debug, Default)]
pub struct MemoryStore {
    accounts: RwLock<HashMap<AccountId, AccountRecord>>,
    characters: RwLock<HashMap<String, CharacterRecord>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn accounts_read(&self) -> RwLockReadGuard<'_, HashMap<AccountId, AccountRecord>> {
        self.accounts.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn accounts_write(&self) -> RwLockWriteGuard<'_, HashMap<AccountId, AccountRecord>> {
        self.accounts.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn characters_read(&self) -> RwLockReadGuard<'_, HashMap<String, CharacterRecord>> {
        self.characters.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn characters_write(&self) -> RwLockWriteGuard<'_, HashMap<String, CharacterRecord>> {
        self.characters.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ProgressStore for MemoryStore {
    type Error = Infallible;

    fn get_account(&self, id: AccountId) -> Result<Option<AccountRecord>, Self::Error> {
        Ok(self.accounts_read().get(&id).cloned())
    }

    fn put_account(&self, record: &AccountRecord) -> Result<(), Self::Error> {
        self.accounts_write().insert(record.id, record.clone());
        Ok(())
    }

    fn delete_account(&self, id: AccountId) -> Result<bool, Self::Error> {
        Ok(self.accounts_write().remove(&id).is_some())
    }

    fn get_character(&self, name: &str) -> Result<Option<CharacterRecord>, Self::Error> {
        Ok(self.characters_read().get(name).cloned())
    }

    fn put_character(&self, record: &CharacterRecord) -> Result<(), Self::Error> {
        self.characters_write()
            .insert(record.name.clone(), record.clone());
        Ok(())
    }

    fn delete_character(&self, name: &str) -> Result<bool, Self::Error> {
        Ok(self.characters_write().remove(name).is_some())
    }

    fn characters_of(&self, owner: AccountId) -> Result<Vec<CharacterRecord>, Self::Error> {
        let mut owned: Vec<CharacterRecord> = self
            .characters_read()
            .values()
            .filter(|record| record.owner == owner)
            .cloned()
            .collect();
        owned.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(owned)
    }

    fn top_accounts(&self, limit: usize) -> Result<Vec<AccountRecord>, Self::Error> {
        let mut records: Vec<AccountRecord> = self.accounts_read().values().cloned().collect();
        records.sort_by(|a, b| b.level.cmp(&a.level).then_with(|| b.xp.cmp(&a.xp)));
        records.truncate(limit);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specialty::Specialty;

    fn account(id: u64, level: u32, xp: i64) -> AccountRecord {
        let mut record = AccountRecord::new(AccountId(id), format!("member-{id}"));
        record.level = level;
        record.xp = xp;
        record
    }

    #[test]
    fn accounts_round_trip_and_delete() {
        let store = MemoryStore::new();
        let record = account(1, 4, 120);
        store.put_account(&record).unwrap();
        assert_eq!(store.get_account(AccountId(1)).unwrap(), Some(record));
        assert!(store.delete_account(AccountId(1)).unwrap());
        assert!(!store.delete_account(AccountId(1)).unwrap());
        assert_eq!(store.get_account(AccountId(1)).unwrap(), None);
    }

    #[test]
    fn put_replaces_an_existing_record() {
        let store = MemoryStore::new();
        store.put_account(&account(1, 1, 0)).unwrap();
        store.put_account(&account(1, 6, 50)).unwrap();
        let stored = store.get_account(AccountId(1)).unwrap().unwrap();
        assert_eq!(stored.level, 6);
    }

    #[test]
    fn characters_of_filters_by_owner_and_sorts_by_name() {
        let store = MemoryStore::new();
        for (owner, name) in [(1, "Zoe"), (1, "Ash"), (2, "Mina")] {
            let record = CharacterRecord::new(AccountId(owner), name, Specialty::Student);
            store.put_character(&record).unwrap();
        }
        let owned = store.characters_of(AccountId(1)).unwrap();
        let names: Vec<&str> = owned.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Ash", "Zoe"]);
        assert!(store.characters_of(AccountId(3)).unwrap().is_empty());
    }

    #[test]
    fn character_names_are_global_keys() {
        let store = MemoryStore::new();
        let first = CharacterRecord::new(AccountId(1), "Nova", Specialty::Singer);
        store.put_character(&first).unwrap();
        assert!(store.get_character("Nova").unwrap().is_some());
        assert!(store.delete_character("Nova").unwrap());
        assert!(!store.delete_character("Nova").unwrap());
    }

    #[test]
    fn top_accounts_orders_by_level_then_experience() {
        let store = MemoryStore::new();
        store.put_account(&account(1, 3, 10)).unwrap();
        store.put_account(&account(2, 5, 40)).unwrap();
        store.put_account(&account(3, 5, 90)).unwrap();
        store.put_account(&account(4, 1, 0)).unwrap();
        let top = store.top_accounts(3).unwrap();
        let ids: Vec<u64> = top.iter().map(|r| r.id.0).collect();
        assert_eq!(ids, [3, 2, 1]);
    }

    #[test]
    fn top_accounts_respects_the_limit() {
        let store = MemoryStore::new();
        for id in 0..10 {
            store.put_account(&account(id, 1, id as i64)).unwrap();
        }
        assert_eq!(store.top_accounts(4).unwrap().len(), 4);
        assert_eq!(store.top_accounts(0).unwrap().len(), 0);
    }
}
