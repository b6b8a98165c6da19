use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The persisted session, stored in redb
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub token: String,
    pub created_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            created_at: Utc::now(),
        }
    }
}
