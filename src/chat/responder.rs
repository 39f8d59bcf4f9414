// ABOUTME: Chat responder — owns the transcript and turns user text into assistant replies.
// ABOUTME: Gates on the session, tries the remote query endpoint, and falls back to local intents.

use std::sync::Arc;

use crate::chat::client::{QueryClient, QueryRequest};
use crate::chat::intent;
use crate::chat::message::{Message, MessageIds};
use crate::observable::{Observable, Subscription};
use crate::session::{Session, SessionHolder};

pub const GREETING: &str = "Hi! I'm your RewardBot assistant. I can help you with your reward points, card balances, and redemption options. What would you like to know?";

/// Sent instead of a reply when nobody is logged in.
pub const LOGIN_REQUIRED: &str = "Please log in to chat with RewardBot.";

/// Used when the endpoint reports success but sends no text.
pub const EMPTY_RESPONSE_FALLBACK: &str =
    "I apologize, but I couldn't process your request at the moment.";

/// Used when the endpoint reports failure without an error text.
pub const SERVICE_ERROR_FALLBACK: &str =
    "I apologize, but I'm experiencing some technical difficulties. Please try again later.";

/// Suggested prompts offered on the chat screen.
pub const QUICK_QUESTIONS: [&str; 4] = [
    "How many reward points do I have?",
    "When do my points expire?",
    "Show me cashback options",
    "What can I get for 5000 points?",
];

/// Holds a transcript and answers messages appended to it.
///
/// The responder is idle or composing. It is composing while at least one
/// `send_message` call is waiting on a reply; callers that want one request
/// at a time should check [`is_composing`](Self::is_composing) first.
pub struct Responder {
    session: Arc<SessionHolder>,
    client: Option<Arc<dyn QueryClient>>,
    ids: MessageIds,
    transcript: Observable<Vec<Message>>,
    pending: Observable<usize>,
}

impl Responder {
    /// Build a responder with a fresh greeting transcript. Without a client
    /// every reply comes from the local intent table.
    pub fn new(session: Arc<SessionHolder>, client: Option<Arc<dyn QueryClient>>) -> Self {
        let responder = Self {
            session,
            client,
            ids: MessageIds::new(),
            transcript: Observable::new(Vec::new()),
            pending: Observable::new(0),
        };
        responder.initialize();
        responder
    }

    /// Replace the transcript with the greeting alone.
    pub fn initialize(&self) {
        self.transcript
            .update(|messages| *messages = vec![self.ids.assistant(GREETING, None)]);
    }

    pub fn clear(&self) {
        self.initialize();
    }

    pub fn messages(&self) -> Vec<Message> {
        self.transcript.get()
    }

    pub fn is_composing(&self) -> bool {
        self.pending.get() > 0
    }

    pub fn has_remote(&self) -> bool {
        self.client.is_some()
    }

    /// Suggested prompts for a user who doesn't know what to ask.
    pub fn quick_questions(&self) -> &'static [&'static str] {
        &QUICK_QUESTIONS
    }

    /// Answer `text` and return the reply.
    ///
    /// Without a session only the [`LOGIN_REQUIRED`] message is appended; the
    /// user's text is not recorded and no request is made. Otherwise the
    /// user's text and the reply are appended, in that order.
    pub async fn send_message(&self, text: &str) -> String {
        let Some(session) = self.session.current() else {
            tracing::debug!("message rejected: no session");
            self.append(|ids| ids.assistant(LOGIN_REQUIRED, None));
            return LOGIN_REQUIRED.to_string();
        };

        self.append(|ids| ids.user(text));
        let _composing = ComposingGuard::enter(&self.pending);

        let (reply, intent) = self.respond(&session, text).await;
        self.append(|ids| ids.assistant(reply.clone(), intent));
        reply
    }

    async fn respond(&self, session: &Session, text: &str) -> (String, Option<String>) {
        if let Some(client) = &self.client {
            let request = QueryRequest {
                mobile_number: session.user.mobile_number.clone(),
                query: text.to_string(),
            };
            match client.query(&request, &session.token).await {
                Ok(response) if response.success => {
                    let reply = response
                        .response
                        .unwrap_or_else(|| EMPTY_RESPONSE_FALLBACK.to_string());
                    return (reply, response.intent);
                }
                Ok(response) => {
                    tracing::warn!(error = ?response.error, "query endpoint reported failure");
                    let reply = response
                        .error
                        .unwrap_or_else(|| SERVICE_ERROR_FALLBACK.to_string());
                    return (reply, response.intent);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "query endpoint unavailable, answering locally");
                }
            }
        }

        let local = intent::classify(text);
        tracing::debug!(intent = %local.intent, "classified locally");
        (local.text, Some(local.intent.as_str().to_string()))
    }

    /// Build and push under the transcript lock so ids follow transcript order.
    fn append(&self, build: impl FnOnce(&MessageIds) -> Message) {
        self.transcript
            .update(|messages| messages.push(build(&self.ids)));
    }

    pub fn subscribe_messages(
        &self,
        callback: impl Fn(&Vec<Message>) + Send + Sync + 'static,
    ) -> Subscription {
        self.transcript.subscribe(callback)
    }

    pub fn unsubscribe_messages(&self, subscription: Subscription) {
        self.transcript.unsubscribe(subscription);
    }

    /// Callback receives the new composing flag on every change of the
    /// in-flight count.
    pub fn subscribe_composing(
        &self,
        callback: impl Fn(bool) + Send + Sync + 'static,
    ) -> Subscription {
        self.pending.subscribe(move |count| callback(*count > 0))
    }

    pub fn unsubscribe_composing(&self, subscription: Subscription) {
        self.pending.unsubscribe(subscription);
    }
}

/// Counts one in-flight reply. Dropping it, even from a cancelled future,
/// releases the count.
struct ComposingGuard<'a> {
    pending: &'a Observable<usize>,
}

impl<'a> ComposingGuard<'a> {
    fn enter(pending: &'a Observable<usize>) -> Self {
        pending.update(|n| *n += 1);
        Self { pending }
    }
}

impl Drop for ComposingGuard<'_> {
    fn drop(&mut self) {
        self.pending.update(|n| *n = n.saturating_sub(1));
    }
}
