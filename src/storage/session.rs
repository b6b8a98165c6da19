use redb::ReadableTable;

use super::db::{Database, DatabaseError};
use super::models::SessionRecord;
use super::tables::*;

impl Database {
    // ========================================================================
    // Session operations
    // ========================================================================

    /// Replace the stored session record
    pub fn put_session(&self, record: &SessionRecord) -> Result<(), DatabaseError> {
        debug_assert!(!record.token.is_empty(), "session token must not be empty");

        let write_txn = self.begin_write()?;
        {
            let mut table = write_txn.open_table(SESSION)?;
            let data = rmp_serde::to_vec_named(record)?;
            table.insert(SESSION_KEY, data.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Get the stored session record, if any
    pub fn get_session(&self) -> Result<Option<SessionRecord>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(SESSION)?;

        match table.get(SESSION_KEY)? {
            Some(data) => {
                let record: SessionRecord = rmp_serde::from_slice(data.value())?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    /// Remove the stored session record. Returns whether one existed.
    pub fn delete_session(&self) -> Result<bool, DatabaseError> {
        let write_txn = self.begin_write()?;
        let existed = {
            let mut table = write_txn.open_table(SESSION)?;
            let removed = table.remove(SESSION_KEY)?;
            removed.is_some()
        };
        write_txn.commit()?;
        Ok(existed)
    }
}
