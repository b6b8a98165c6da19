use std::sync::RwLock;

use super::{SessionError, SessionStore};

/// In-process session store for tests and throwaway runs.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: RwLock<Option<String>>,
}

impl MemorySessionStore {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn set(&self, token: &str) -> Result<(), SessionError> {
        let mut lock = self.token.write().map_err(|_| SessionError::Poisoned)?;
        *lock = Some(token.to_string());
        Ok(())
    }

    fn get(&self) -> Result<Option<String>, SessionError> {
        let lock = self.token.read().map_err(|_| SessionError::Poisoned)?;
        Ok(lock.clone())
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut lock = self.token.write().map_err(|_| SessionError::Poisoned)?;
        *lock = None;
        Ok(())
    }
}
