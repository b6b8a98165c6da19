//! Shared test helpers for classroom-buddy unit tests.

use std::sync::Arc;

use crate::config::{ApiConfig, Config, SessionConfig};
use crate::session::{RedbSessionStore, Session};
use crate::AppContext;

/// Create a test AppContext with a temporary session database.
///
/// The base URL points at a closed local port; tests that need a backend
/// live under `tests/`.
pub fn test_context(temp_dir: &tempfile::TempDir) -> Arc<AppContext> {
    let session_dir = temp_dir.path().join("session");

    let config = Config {
        api: ApiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            page_size: 10,
        },
        session: SessionConfig {
            dir: session_dir.to_string_lossy().to_string(),
        },
        max_upload_size: 1024, // 1KB for tests
    };

    let store = RedbSessionStore::open(&session_dir).expect("Failed to open test session store");
    let session = Session::new(Arc::new(store));

    Arc::new(AppContext::new(config, session).expect("Failed to build test context"))
}
