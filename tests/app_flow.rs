// ABOUTME: End-to-end tests of the app wiring without a terminal.
// ABOUTME: Keys go through handle_key/apply_action; library notifications come back through apply_update.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use rewardbot::app::{Services, UiUpdate, apply_action, apply_update};
use rewardbot::chat::Origin;
use rewardbot::chat::responder::LOGIN_REQUIRED;
use rewardbot::session::{TOKEN_KEY, USER_KEY};
use rewardbot::store::{FileStore, KeyValueStore, MemoryStore};
use rewardbot::tui::input::{InputResult, handle_key};
use rewardbot::tui::{RemoteStatus, Screen, Tab, TuiState};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

/// Type `text` then press Enter, applying every resulting action.
fn type_and_submit(state: &mut TuiState, services: &Services, text: &str) {
    for c in text.chars() {
        let action = handle_key(state, key(KeyCode::Char(c)));
        assert!(apply_action(state, services, action));
    }
    let action = handle_key(state, key(KeyCode::Enter));
    assert!(apply_action(state, services, action));
}

fn drain(state: &mut TuiState, rx: &mut mpsc::UnboundedReceiver<UiUpdate>) {
    while let Ok(update) = rx.try_recv() {
        apply_update(state, update);
    }
}

fn logged_out_services() -> Services {
    Services::new(Arc::new(MemoryStore::new()), None)
}

#[tokio::test]
async fn login_chat_logout_round_trip() {
    let services = logged_out_services();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let wiring = services.wire(tx);

    let mut state = TuiState::new(RemoteStatus::Disabled);
    state.set_messages(services.responder.messages());
    assert_eq!(state.screen, Screen::Login);

    type_and_submit(&mut state, &services, "9876543210");
    assert!(state.awaiting_code());
    assert!(!state.notice.as_ref().unwrap().is_error);

    type_and_submit(&mut state, &services, "123456");
    assert!(services.session.is_authenticated());
    drain(&mut state, &mut rx);
    assert_eq!(state.screen, Screen::Dashboard);
    assert_eq!(state.user_name.as_deref(), Some("Alex Johnson"));

    // Overview -> Analytics -> Chat
    handle_key(&mut state, key(KeyCode::Tab));
    handle_key(&mut state, key(KeyCode::Tab));
    assert_eq!(state.tab, Tab::Chat);

    type_and_submit(&mut state, &services, "hello");
    while state.messages.len() < 3 {
        let update = rx.recv().await.expect("channel open");
        apply_update(&mut state, update);
    }
    drain(&mut state, &mut rx);
    assert_eq!(state.messages[1].origin, Origin::User);
    assert_eq!(state.messages[1].text, "hello");
    assert_eq!(state.messages[2].origin, Origin::Assistant);
    assert!(!state.composing);

    let action = handle_key(&mut state, ctrl('l'));
    assert_eq!(action, InputResult::Logout);
    assert!(apply_action(&mut state, &services, action));
    drain(&mut state, &mut rx);

    assert!(!services.session.is_authenticated());
    assert_eq!(state.screen, Screen::Login);
    assert_eq!(state.messages.len(), 1);

    services.unwire(wiring);
}

#[tokio::test]
async fn wrong_code_keeps_code_step_with_error_notice() {
    let services = logged_out_services();
    let mut state = TuiState::new(RemoteStatus::Disabled);

    type_and_submit(&mut state, &services, "9876543210");
    type_and_submit(&mut state, &services, "000000");

    assert!(state.awaiting_code());
    assert!(state.notice.as_ref().unwrap().is_error);
    assert!(!services.session.is_authenticated());

    let action = handle_key(&mut state, key(KeyCode::Esc));
    assert_eq!(action, InputResult::BackToMobile);
    apply_action(&mut state, &services, action);
    assert!(!state.awaiting_code());
    assert!(state.notice.is_none());
}

#[tokio::test]
async fn invalid_mobile_number_is_reported() {
    let services = logged_out_services();
    let mut state = TuiState::new(RemoteStatus::Disabled);

    type_and_submit(&mut state, &services, "0123");

    assert!(!state.awaiting_code());
    assert!(state.notice.as_ref().unwrap().is_error);
}

#[tokio::test]
async fn quick_question_sends_without_typing() {
    let services = logged_out_services();
    services
        .session
        .establish("t", rewardbot::session::User {
            id: 1,
            mobile_number: "9876543210".to_string(),
            first_name: Some("Alex".to_string()),
            last_name: None,
            email: None,
            is_active: true,
        })
        .unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let wiring = services.wire(tx);

    let mut state = TuiState::new(RemoteStatus::Disabled);
    state.set_user(Some("Alex".to_string()));
    state.tab = Tab::Chat;

    let action = handle_key(&mut state, key(KeyCode::Char('1')));
    assert!(matches!(action, InputResult::Send(_)));
    apply_action(&mut state, &services, action);

    while state.messages.len() < 3 {
        let update = rx.recv().await.expect("channel open");
        apply_update(&mut state, update);
    }
    assert_eq!(state.messages[1].text, services.responder.quick_questions()[0]);

    services.unwire(wiring);
}

#[tokio::test]
async fn send_after_session_cleared_elsewhere_is_rejected() {
    let services = logged_out_services();
    let reply = services.responder.send_message("points").await;
    assert_eq!(reply, LOGIN_REQUIRED);
    assert_eq!(services.responder.messages().len(), 2);
}

#[test]
fn session_survives_restart_with_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    {
        let services = Services::new(Arc::new(FileStore::new(&path)), None);
        let mut flow = rewardbot::auth::LoginFlow::new();
        flow.submit_mobile("+919876543210").unwrap();
        flow.submit_code(&services.session, "123456").unwrap();
    }

    let store = Arc::new(FileStore::new(&path));
    assert!(store.get(TOKEN_KEY).unwrap().is_some());
    assert!(store.get(USER_KEY).unwrap().is_some());

    let services = Services::new(store, None);
    let user = services.session.current_user().expect("restored");
    assert_eq!(user.mobile_number, "+919876543210");
    assert!(
        services
            .session
            .token()
            .unwrap()
            .starts_with("mock-jwt-token-")
    );
}

#[test]
fn logout_removes_persisted_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&path));

    let services = Services::new(store.clone(), None);
    let mut flow = rewardbot::auth::LoginFlow::new();
    flow.submit_mobile("9876543210").unwrap();
    flow.submit_code(&services.session, "123456").unwrap();

    rewardbot::auth::logout(&services.session);

    assert!(store.get(TOKEN_KEY).unwrap().is_none());
    assert!(store.get(USER_KEY).unwrap().is_none());
}
