//! Engine error type.

use thiserror::Error;

use crate::account::AccountId;
use crate::tier::Tier;

/// Errors raised by engine operations.
///
/// Rule violations get their own variants so platform layers can phrase
/// user-facing refusals; backend failures are boxed behind [`Store`].
///
/// [`Store`]: EngineError::Store
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("account {0} has no progression record yet")]
    NoAccountRecord(AccountId),
    #[error("{tier} accounts may keep at most {limit} characters")]
    QuotaExceeded { tier: Tier, limit: u32 },
    #[error("character name '{0}' is already taken")]
    NameTaken(String),
    #[error("no character named '{0}' under this account")]
    NotFound(String),
    #[error("record store unavailable")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl EngineError {
    /// Box a backend failure into the store variant.
    pub fn store<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Store(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("disk full")]
    struct DiskFull;

    #[test]
    fn messages_read_like_refusals() {
        let err = EngineError::QuotaExceeded {
            tier: Tier::Newcomer,
            limit: 3,
        };
        assert_eq!(err.to_string(), "newcomer accounts may keep at most 3 characters");
        assert_eq!(
            EngineError::NameTaken("Nova".to_string()).to_string(),
            "character name 'Nova' is already taken"
        );
        assert_eq!(
            EngineError::NoAccountRecord(AccountId(9)).to_string(),
            "account 9 has no progression record yet"
        );
    }

    #[test]
    fn store_failures_keep_their_source() {
        let err = EngineError::store(DiskFull);
        assert_eq!(err.to_string(), "record store unavailable");
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("disk full"));
    }
}
