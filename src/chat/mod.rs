// ABOUTME: Chat module — transcript messages, local intent table, remote client, and the responder.
// ABOUTME: The Responder is the only writer of its transcript.

pub mod client;
pub mod intent;
pub mod message;
pub mod responder;

pub use client::{ClientError, HealthStatus, HttpQueryClient, QueryClient, QueryRequest, QueryResponse};
pub use intent::{Intent, LocalReply, classify};
pub use message::{Message, MessageIds, Origin};
pub use responder::{QUICK_QUESTIONS, Responder};
