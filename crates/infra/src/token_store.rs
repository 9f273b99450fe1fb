//! Process-wide access token storage
//!
//! The token obtained through the OAuth callback authorizes every
//! provider call. It is held behind an explicitly passed store rather
//! than hidden process-global state, so the orchestrator stays testable
//! with injected values.

use parking_lot::RwLock;
use slotbroker_domain::{Result, SchedulerError};

/// Shared holder for the provider access token.
#[derive(Debug, Default)]
pub struct AccessTokenStore {
    token: RwLock<Option<String>>,
}

impl AccessTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with a token already present (tests, pre-provisioned tokens).
    pub fn with_token(token: impl Into<String>) -> Self {
        Self { token: RwLock::new(Some(token.into())) }
    }

    /// Replace the current token.
    pub fn set(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
    }

    /// Current token, if one has been stored.
    pub fn get(&self) -> Option<String> {
        self.token.read().clone()
    }

    /// Current token, or an auth error when none has been stored yet.
    pub fn require(&self) -> Result<String> {
        self.get().ok_or_else(|| {
            SchedulerError::Auth("no access token; complete the OAuth flow first".to_owned())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_requires_auth() {
        let store = AccessTokenStore::new();
        assert!(store.get().is_none());
        assert!(matches!(store.require(), Err(SchedulerError::Auth(_))));
    }

    #[test]
    fn set_then_require_returns_token() {
        let store = AccessTokenStore::new();
        store.set("tok-123");
        assert_eq!(store.require().unwrap(), "tok-123");
    }

    #[test]
    fn set_replaces_previous_token() {
        let store = AccessTokenStore::with_token("old");
        store.set("new");
        assert_eq!(store.get().as_deref(), Some("new"));
    }
}
