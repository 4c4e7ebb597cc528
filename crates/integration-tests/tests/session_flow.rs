//! Session store + persistence flows over the file-backed store.

use std::sync::Arc;

use shopfront_client::api::types::{AuthResponse, User};
use shopfront_client::persist::{FileStore, KeyValueStore};
use shopfront_client::stores::{SessionError, SessionStore};
use shopfront_core::{AccessToken, RefreshToken, UserId};
use shopfront_integration_tests::scratch_dir;

fn auth_response(token: &str) -> AuthResponse {
    AuthResponse {
        access: Some(AccessToken::new(token)),
        refresh: Some(RefreshToken::new("refresh-1")),
        user: Some(User {
            id: UserId::new(42),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
        }),
    }
}

#[test]
fn session_survives_restart_until_logout() {
    let dir = scratch_dir("session-restart");

    {
        let storage: Arc<dyn KeyValueStore> =
            Arc::new(FileStore::open(&dir).expect("create scratch store"));
        let session = SessionStore::new(storage);
        session
            .record_auth_success(&auth_response("token-abc"))
            .expect("auth success");
    }

    // New process, same data directory: still logged in
    let storage: Arc<dyn KeyValueStore> =
        Arc::new(FileStore::open(&dir).expect("reopen scratch store"));
    let session = SessionStore::new(storage);
    assert!(session.is_authenticated());
    assert_eq!(
        session.current_token().as_ref().map(AccessToken::reveal),
        Some("token-abc")
    );
    assert_eq!(session.current_user().map(|u| u.id), Some(UserId::new(42)));

    session.logout();

    // And after another restart: logged out for good
    let storage: Arc<dyn KeyValueStore> =
        Arc::new(FileStore::open(&dir).expect("reopen scratch store"));
    let session = SessionStore::new(storage);
    assert!(!session.is_authenticated());
    assert!(session.current_token().is_none());
    assert!(session.current_user().is_none());
}

#[test]
fn inconsistent_auth_response_leaves_no_trace() {
    let dir = scratch_dir("session-inconsistent");
    let storage: Arc<dyn KeyValueStore> =
        Arc::new(FileStore::open(&dir).expect("create scratch store"));
    let session = SessionStore::new(storage);

    session
        .record_auth_success(&auth_response("token-abc"))
        .expect("auth success");

    // A success response without a credential tears everything down
    let broken = AuthResponse {
        access: None,
        refresh: None,
        user: None,
    };
    assert!(matches!(
        session.record_auth_success(&broken),
        Err(SessionError::MissingAccessToken)
    ));

    let storage: Arc<dyn KeyValueStore> =
        Arc::new(FileStore::open(&dir).expect("reopen scratch store"));
    let restored = SessionStore::new(storage);
    assert!(!restored.is_authenticated());
    assert!(restored.current_token().is_none());
}

#[test]
fn authorization_failure_signal_clears_persisted_session() {
    let dir = scratch_dir("session-authz");
    let storage: Arc<dyn KeyValueStore> =
        Arc::new(FileStore::open(&dir).expect("create scratch store"));
    let session = SessionStore::new(storage);

    session
        .record_auth_success(&auth_response("token-abc"))
        .expect("auth success");

    // The gateway layer routes an observed 401 here; no explicit logout call
    session.note_authorization_failure();

    assert!(!session.is_authenticated());
    let storage: Arc<dyn KeyValueStore> =
        Arc::new(FileStore::open(&dir).expect("reopen scratch store"));
    assert!(!SessionStore::new(storage).is_authenticated());
}
