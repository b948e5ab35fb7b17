// src/application/session_gate.rs
use crate::constants::{QUIZ_REQUIRED_KEY, SESSION_TOKEN_KEY};
use crate::domain::{DomainError, Token};
use std::rc::Rc;
use std::sync::Arc;
use tracing::{debug, info};

/// Secure key-value persistence scoped to this application
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError>;
    fn set(&self, key: &str, value: &str) -> Result<(), DomainError>;
    fn remove(&self, key: &str) -> Result<(), DomainError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), DomainError> {
        (**self).remove(key)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Rc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), DomainError> {
        (**self).remove(key)
    }
}

/// Decides from the persisted token whether protected screens are reachable.
///
/// Also owns the retry lock that a rejected login arms and a passed quiz
/// releases.
#[derive(Debug, Clone)]
pub struct SessionGate<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SessionGate<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn is_authenticated(&self) -> Result<bool, DomainError> {
        Ok(self.token()?.is_some())
    }

    pub fn token(&self) -> Result<Option<Token>, DomainError> {
        Ok(self
            .store
            .get(SESSION_TOKEN_KEY)?
            .filter(|t| !t.is_empty())
            .map(Token::new))
    }

    /// Token for a protected call, or `Auth` when logged out
    pub fn require(&self) -> Result<Token, DomainError> {
        self.token()?
            .ok_or_else(|| DomainError::Auth("Not logged in".to_string()))
    }

    pub fn establish(&self, token: &Token) -> Result<(), DomainError> {
        self.store.set(SESSION_TOKEN_KEY, token.as_str())?;
        info!("Session established");
        Ok(())
    }

    pub fn clear(&self) -> Result<(), DomainError> {
        self.store.remove(SESSION_TOKEN_KEY)?;
        info!("Session cleared");
        Ok(())
    }

    pub fn retry_locked(&self) -> Result<bool, DomainError> {
        Ok(self.store.get(QUIZ_REQUIRED_KEY)?.is_some())
    }

    pub fn arm_retry_lock(&self) -> Result<(), DomainError> {
        debug!("Arming login retry lock");
        self.store.set(QUIZ_REQUIRED_KEY, "1")
    }

    pub fn release_retry_lock(&self) -> Result<(), DomainError> {
        debug!("Releasing login retry lock");
        self.store.remove(QUIZ_REQUIRED_KEY)
    }
}
