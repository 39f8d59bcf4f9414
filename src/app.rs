// ABOUTME: App orchestrator — wires session, responder, query client, and the TUI together.
// ABOUTME: Library notifications reach the UI through an mpsc channel; keys become library calls.

use std::sync::Arc;

use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

use crate::auth;
use crate::chat::{HttpQueryClient, Message, QueryClient, Responder};
use crate::config::Config;
use crate::observable::Subscription;
use crate::session::SessionHolder;
use crate::store::{FileStore, KeyValueStore};
use crate::tui::input::{InputResult, handle_key};
use crate::tui::state::{RemoteStatus, TuiState};
use crate::tui::ui;

/// Query sent by `--probe` to the unauthenticated test endpoint.
pub const PROBE_QUERY: &str = "How many points do I have?";

/// Command-line switches that change how the app starts.
#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    /// Never contact the query endpoint.
    pub offline: bool,
    /// Forget any stored session before starting.
    pub fresh: bool,
}

/// Changes pushed from library state to the UI loop.
#[derive(Debug)]
pub enum UiUpdate {
    Transcript(Vec<Message>),
    Composing(bool),
    Session(Option<String>),
    Remote(RemoteStatus),
}

/// The long-lived library objects behind one UI.
pub struct Services {
    pub session: Arc<SessionHolder>,
    pub responder: Arc<Responder>,
    pub client: Option<Arc<dyn QueryClient>>,
}

impl Services {
    /// Build the services and restore any persisted session.
    pub fn new(store: Arc<dyn KeyValueStore>, client: Option<Arc<dyn QueryClient>>) -> Self {
        let session = Arc::new(SessionHolder::new(store));
        session.restore();
        let responder = Arc::new(Responder::new(session.clone(), client.clone()));
        Self {
            session,
            responder,
            client,
        }
    }

    /// Forward every library change into `tx`. Returns the handles for [`unwire`](Self::unwire).
    pub fn wire(&self, tx: mpsc::UnboundedSender<UiUpdate>) -> Wiring {
        let transcript_tx = tx.clone();
        let transcript = self.responder.subscribe_messages(move |messages| {
            let _ = transcript_tx.send(UiUpdate::Transcript(messages.clone()));
        });
        let composing_tx = tx.clone();
        let composing = self.responder.subscribe_composing(move |on| {
            let _ = composing_tx.send(UiUpdate::Composing(on));
        });
        let session = self.session.subscribe(move |session| {
            let name = session.as_ref().map(|s| s.user.display_name());
            let _ = tx.send(UiUpdate::Session(name));
        });
        Wiring {
            transcript,
            composing,
            session,
        }
    }

    pub fn unwire(&self, wiring: Wiring) {
        self.responder.unsubscribe_messages(wiring.transcript);
        self.responder.unsubscribe_composing(wiring.composing);
        self.session.unsubscribe(wiring.session);
    }
}

/// Subscription handles created by [`Services::wire`].
pub struct Wiring {
    transcript: Subscription,
    composing: Subscription,
    session: Subscription,
}

/// Build the HTTP client unless disabled. A construction failure is logged
/// and leaves the app answering locally.
pub fn build_client(config: &Config, offline: bool) -> Option<Arc<dyn QueryClient>> {
    if offline || !config.api.enabled {
        return None;
    }
    match HttpQueryClient::new(&config.api.genai_url, config.api.timeout()) {
        Ok(client) => Some(Arc::new(client)),
        Err(e) => {
            tracing::warn!(error = %e, "could not build query client, using local replies");
            None
        }
    }
}

/// Apply one key action. Returns false when the app should exit.
pub fn apply_action(state: &mut TuiState, services: &Services, action: InputResult) -> bool {
    match action {
        InputResult::None => {}
        InputResult::SubmitMobile(text) => match state.login.submit_mobile(&text) {
            Ok(()) => state.set_notice("Verification code sent to your mobile number", false),
            Err(e) => state.set_notice(e.to_string(), true),
        },
        InputResult::SubmitCode(code) => {
            match state.login.submit_code(&services.session, &code) {
                Ok(_) => state.set_notice("Login successful!", false),
                Err(e) => state.set_notice(e.to_string(), true),
            }
        }
        InputResult::BackToMobile => {
            state.login.back();
            state.notice = None;
        }
        InputResult::Send(text) => {
            let responder = services.responder.clone();
            tokio::spawn(async move {
                responder.send_message(&text).await;
            });
        }
        InputResult::ClearChat => services.responder.clear(),
        InputResult::Logout => {
            auth::logout(&services.session);
            services.responder.clear();
            state.notice = None;
        }
        InputResult::Quit => return false,
    }
    true
}

/// Fold one library change into the UI state.
pub fn apply_update(state: &mut TuiState, update: UiUpdate) {
    match update {
        UiUpdate::Transcript(messages) => state.set_messages(messages),
        UiUpdate::Composing(on) => state.composing = on,
        UiUpdate::Session(name) => state.set_user(name),
        UiUpdate::Remote(status) => state.remote = status,
    }
}

/// Top-level application that orchestrates all subsystems.
pub struct App {
    config: Config,
    options: AppOptions,
}

impl App {
    pub fn new(config: Config, options: AppOptions) -> Self {
        Self { config, options }
    }

    /// Run the application: set up subsystems, then drive the TUI until quit.
    pub async fn run(self) -> anyhow::Result<()> {
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(self.config.session_path()));
        if self.options.fresh {
            for key in [crate::session::TOKEN_KEY, crate::session::USER_KEY] {
                store.remove(key)?;
            }
        }

        let client = build_client(&self.config, self.options.offline);
        let services = Services::new(store, client);

        let (tx, rx) = mpsc::unbounded_channel::<UiUpdate>();
        let wiring = services.wire(tx.clone());

        let mut state = TuiState::new(if services.client.is_some() {
            RemoteStatus::Checking
        } else {
            RemoteStatus::Disabled
        });
        state.set_user(services.session.current_user().map(|u| u.display_name()));
        state.set_messages(services.responder.messages());

        if let Some(client) = services.client.clone() {
            tokio::spawn(async move {
                let status = match client.health().await {
                    Ok(health) if health.is_up() => RemoteStatus::Online,
                    Ok(health) => {
                        tracing::warn!(status = %health.status, "query service reports not up");
                        RemoteStatus::Offline
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "query service health check failed");
                        RemoteStatus::Offline
                    }
                };
                let _ = tx.send(UiUpdate::Remote(status));
            });
        }

        let mut terminal = ratatui::init();
        let result = event_loop(&mut terminal, &mut state, &services, rx).await;
        ratatui::restore();

        services.unwire(wiring);
        print_exit_screen(&state);
        result
    }
}

async fn event_loop(
    terminal: &mut DefaultTerminal,
    state: &mut TuiState,
    services: &Services,
    rx: mpsc::UnboundedReceiver<UiUpdate>,
) -> anyhow::Result<()> {
    let mut events = EventStream::new();
    let mut updates = UnboundedReceiverStream::new(rx);

    loop {
        terminal.draw(|frame| ui::render(frame, state))?;

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    let action = handle_key(state, key);
                    if !apply_action(state, services, action) {
                        break;
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            Some(update) = updates.next() => apply_update(state, update),
        }
    }
    Ok(())
}

/// Check the query service without starting the TUI: health, then one test query.
pub async fn probe(config: &Config) -> anyhow::Result<()> {
    let client = HttpQueryClient::new(&config.api.genai_url, config.api.timeout())?;
    println!("Query service: {}", client.base_url());

    match client.health().await {
        Ok(health) => println!(
            "  health: {} ({})",
            health.status,
            health.service.as_deref().unwrap_or("unknown service")
        ),
        Err(e) => println!("  health: unreachable ({e})"),
    }

    match client.test_query(PROBE_QUERY).await {
        Ok(resp) if resp.success => println!(
            "  test query: {}",
            resp.response.as_deref().unwrap_or("(empty response)")
        ),
        Ok(resp) => println!(
            "  test query failed: {}",
            resp.error.as_deref().unwrap_or("(no error text)")
        ),
        Err(e) => println!("  test query: unreachable ({e})"),
    }
    Ok(())
}

/// Print a farewell screen after the TUI exits.
fn print_exit_screen(state: &TuiState) {
    let elapsed =
        crate::tui::widgets::status::format_elapsed(state.session_start.elapsed());
    let exchanged = state.messages.iter().filter(|m| m.is_user()).count();

    println!();
    println!("  \x1b[1mThanks for using RewardBot!\x1b[0m");
    println!("  Session lasted {elapsed}; you asked {exchanged} questions.");
    println!();
}
