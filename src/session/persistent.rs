use std::path::Path;

use super::{SessionError, SessionStore};
use crate::storage::models::SessionRecord;
use crate::storage::Database;

/// Session store persisted in a redb file, surviving restarts.
pub struct RedbSessionStore {
    db: Database,
}

impl RedbSessionStore {
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, SessionError> {
        let db = Database::open(dir)?;
        Ok(Self { db })
    }

    /// When the stored token was written, if there is one.
    pub fn created_at(&self) -> Result<Option<chrono::DateTime<chrono::Utc>>, SessionError> {
        Ok(self.db.get_session()?.map(|record| record.created_at))
    }
}

impl SessionStore for RedbSessionStore {
    fn set(&self, token: &str) -> Result<(), SessionError> {
        self.db.put_session(&SessionRecord::new(token))?;
        Ok(())
    }

    fn get(&self) -> Result<Option<String>, SessionError> {
        Ok(self.db.get_session()?.map(|record| record.token))
    }

    fn clear(&self) -> Result<(), SessionError> {
        self.db.delete_session()?;
        Ok(())
    }
}
