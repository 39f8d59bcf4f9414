// ABOUTME: TUI widget sub-modules for login, overview, analytics, chat, and status bar.
// ABOUTME: Each widget is a pure rendering function producing ratatui Lines.

pub mod analytics;
pub mod cards;
pub mod chat;
pub mod login;
pub mod status;
