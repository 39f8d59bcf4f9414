// ABOUTME: Transcript message type — immutable text tagged with origin, time, and optional intent.
// ABOUTME: Ids come from a per-responder counter so they strictly increase in creation order.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    User,
    Assistant,
}

/// One entry in a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub text: String,
    pub origin: Origin,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
}

impl Message {
    pub fn is_user(&self) -> bool {
        self.origin == Origin::User
    }
}

/// Hands out message ids. Shared by everything appending to one transcript.
#[derive(Debug)]
pub struct MessageIds {
    next: AtomicU64,
}

impl MessageIds {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    pub fn user(&self, text: impl Into<String>) -> Message {
        self.build(text.into(), Origin::User, None)
    }

    pub fn assistant(&self, text: impl Into<String>, intent: Option<String>) -> Message {
        self.build(text.into(), Origin::Assistant, intent)
    }

    fn build(&self, text: String, origin: Origin, intent: Option<String>) -> Message {
        Message {
            id: self.next.fetch_add(1, Ordering::Relaxed),
            text,
            origin,
            created_at: Utc::now(),
            intent,
        }
    }
}

impl Default for MessageIds {
    fn default() -> Self {
        Self::new()
    }
}
