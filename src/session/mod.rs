mod memory;
mod persistent;

pub use memory::MemorySessionStore;
pub use persistent::RedbSessionStore;

use std::sync::Arc;

use thiserror::Error;

use crate::storage::DatabaseError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session storage error: {0}")]
    Storage(#[from] DatabaseError),
    #[error("Session store lock poisoned")]
    Poisoned,
}

/// Abstraction over where the session token lives.
/// One token at most; no expiry, no refresh.
pub trait SessionStore: Send + Sync {
    fn set(&self, token: &str) -> Result<(), SessionError>;
    fn get(&self) -> Result<Option<String>, SessionError>;
    fn clear(&self) -> Result<(), SessionError>;
}

/// The session context handed to every screen.
///
/// Created once at start-up and dropped at teardown. Cloning shares the
/// underlying store.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
}

impl Session {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Session backed by process memory only.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::default()))
    }

    pub fn token(&self) -> Result<Option<String>, SessionError> {
        self.store.get()
    }

    pub fn is_signed_in(&self) -> Result<bool, SessionError> {
        Ok(self.store.get()?.is_some())
    }

    pub fn sign_in(&self, token: &str) -> Result<(), SessionError> {
        self.store.set(token)?;
        tracing::info!("Session token stored");
        Ok(())
    }

    pub fn sign_out(&self) -> Result<(), SessionError> {
        self.store.clear()?;
        tracing::info!("Session cleared");
        Ok(())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}
