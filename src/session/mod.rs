// ABOUTME: Session module — who is logged in, and how that survives a restart.
// ABOUTME: SessionHolder mirrors the in-memory login to a KeyValueStore.

pub mod holder;
pub mod user;

pub use holder::{SessionHolder, TOKEN_KEY, USER_KEY};
pub use user::{Session, User};
