mod helpers;

use helpers::{spawn_fake_api, TestStore, MAINTENANCE_EMAIL, TRAINER_EMAIL, TRAINER_PASSWORD};
use pokenotes::application::{Authenticator, NoteStore, NotesScreen, Route, RouteGuard};
use pokenotes::domain::{DomainError, NoteDraft};

#[tokio::test]
async fn given_valid_login_when_server_returns_token_then_stores_it_and_opens_notes() {
    // Arrange
    let api = spawn_fake_api().await;
    let store = TestStore::new();
    let auth = Authenticator::new(api.client(), store.session());

    // Act
    let route = auth
        .login(TRAINER_EMAIL, TRAINER_PASSWORD)
        .await
        .expect("Login should succeed");

    // Assert
    assert_eq!(route, Route::Notes);
    assert_eq!(store.session().require().expect("Session present").as_str(), "abc");
    let guard = RouteGuard::new(store.session());
    assert_eq!(guard.enter(Route::Notes).expect("Should resolve"), Route::Notes);
}

#[tokio::test]
async fn given_established_session_when_using_note_store_then_attaches_stored_token() {
    // Arrange
    let api = spawn_fake_api().await;
    let store = TestStore::new();
    Authenticator::new(api.client(), store.session())
        .login(TRAINER_EMAIL, TRAINER_PASSWORD)
        .await
        .expect("Login should succeed");
    let notes = NoteStore::new(api.client(), store.session());

    // Act
    notes.list().await.expect("List should succeed");
    notes
        .create(&NoteDraft::new("Visit Lavender Town", ""))
        .await
        .expect("Create should succeed");

    // Assert
    assert_eq!(api.state.seen_auth(), vec!["Bearer abc", "Bearer abc"]);
}

#[tokio::test]
async fn given_malformed_email_when_logging_in_then_server_is_never_contacted() {
    let api = spawn_fake_api().await;
    let store = TestStore::new();
    let auth = Authenticator::new(api.client(), store.session());

    let result = auth.login("no-at-sign", TRAINER_PASSWORD).await;

    assert!(matches!(result, Err(DomainError::Form(_))));
    assert!(!store.session().retry_locked().expect("readable"));
}

#[tokio::test]
async fn given_no_session_when_listing_then_fails_without_request() {
    let api = spawn_fake_api().await;
    let store = TestStore::new();
    let notes = NoteStore::new(api.client(), store.session());

    let result = notes.list().await;

    assert!(matches!(result, Err(DomainError::Auth(_))));
    assert!(api.state.seen_auth().is_empty());
}

#[tokio::test]
async fn given_rejected_login_when_retrying_then_quiz_is_required_until_lock_released() {
    // Arrange
    let api = spawn_fake_api().await;
    let store = TestStore::new();
    let auth = Authenticator::new(api.client(), store.session());

    // Act
    let rejected = auth.login(TRAINER_EMAIL, "notmypassword").await;
    let locked = auth.login(TRAINER_EMAIL, TRAINER_PASSWORD).await;
    store.session().release_retry_lock().expect("Should release");
    let unlocked = auth.login(TRAINER_EMAIL, TRAINER_PASSWORD).await;

    // Assert
    assert!(matches!(rejected, Err(DomainError::Auth(_))));
    assert_eq!(locked, Err(DomainError::QuizRequired));
    assert_eq!(unlocked, Ok(Route::Notes));
}

#[tokio::test]
async fn given_server_outage_when_logging_in_then_retry_stays_unlocked() {
    // Arrange
    let api = spawn_fake_api().await;
    let store = TestStore::new();
    let auth = Authenticator::new(api.client(), store.session());

    // Act
    let first = auth.login(MAINTENANCE_EMAIL, TRAINER_PASSWORD).await;
    let second = auth.login(MAINTENANCE_EMAIL, TRAINER_PASSWORD).await;

    // Assert
    assert_eq!(first, Err(DomainError::Auth("maintenance".to_string())));
    assert_eq!(second, Err(DomainError::Auth("maintenance".to_string())));
    assert!(!store.session().retry_locked().expect("Store should be readable"));
}

#[tokio::test]
async fn given_missing_id_when_deleting_from_screen_then_visible_list_is_unchanged() {
    // Arrange
    let api = spawn_fake_api().await;
    let store = TestStore::new();
    Authenticator::new(api.client(), store.session())
        .login(TRAINER_EMAIL, TRAINER_PASSWORD)
        .await
        .expect("Login should succeed");
    let mut screen = NotesScreen::new(NoteStore::new(api.client(), store.session()));
    screen.on_focus().await.expect("Fetch should succeed");

    // Act
    let result = screen.delete(999).await;

    // Assert
    assert_eq!(result, Err(DomainError::NoteNotFound(999)));
    let ids: Vec<i64> = screen.notes().iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn given_logout_when_entering_notes_then_redirects_to_login() {
    let api = spawn_fake_api().await;
    let store = TestStore::new();
    let auth = Authenticator::new(api.client(), store.session());
    auth.login(TRAINER_EMAIL, TRAINER_PASSWORD)
        .await
        .expect("Login should succeed");

    let route = auth.logout().expect("Should log out");

    assert_eq!(route, Route::Login);
    let guard = RouteGuard::new(store.session());
    assert_eq!(guard.enter(Route::Notes).expect("Should resolve"), Route::Login);
}
