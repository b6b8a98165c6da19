use std::sync::Arc;

use classroom_buddy::session::{MemorySessionStore, RedbSessionStore, Session, SessionStore};

#[test]
fn test_token_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();

    {
        let session = Session::new(Arc::new(RedbSessionStore::open(dir.path()).unwrap()));
        assert!(!session.is_signed_in().unwrap());
        session.sign_in("persisted-token").unwrap();
    }

    let store = RedbSessionStore::open(dir.path()).unwrap();
    assert_eq!(store.get().unwrap().as_deref(), Some("persisted-token"));
    assert!(store.created_at().unwrap().is_some());
}

#[test]
fn test_sign_in_replaces_previous_token() {
    let dir = tempfile::tempdir().unwrap();
    let session = Session::new(Arc::new(RedbSessionStore::open(dir.path()).unwrap()));

    session.sign_in("first").unwrap();
    session.sign_in("second").unwrap();
    assert_eq!(session.token().unwrap().as_deref(), Some("second"));
}

#[test]
fn test_sign_out_is_durable() {
    let dir = tempfile::tempdir().unwrap();

    {
        let session = Session::new(Arc::new(RedbSessionStore::open(dir.path()).unwrap()));
        session.sign_in("token").unwrap();
        session.sign_out().unwrap();
        // Clearing twice is not an error.
        session.sign_out().unwrap();
    }

    let store = RedbSessionStore::open(dir.path()).unwrap();
    assert_eq!(store.get().unwrap(), None);
    assert_eq!(store.created_at().unwrap(), None);
}

#[test]
fn test_clones_share_one_store() {
    let session = Session::new(Arc::new(MemorySessionStore::with_token("shared")));
    let other = session.clone();

    assert_eq!(other.token().unwrap().as_deref(), Some("shared"));
    other.sign_out().unwrap();
    assert!(!session.is_signed_in().unwrap());
}

#[test]
fn test_debug_does_not_leak_token() {
    let session = Session::in_memory();
    session.sign_in("very-secret-token").unwrap();
    assert!(!format!("{session:?}").contains("very-secret-token"));
}
