// ABOUTME: TUI module — ratatui full-screen interface for rewardbot.
// ABOUTME: Login form, dashboard tabs, chat display, input handling, and status bar.

pub mod input;
pub mod state;
pub mod ui;
pub mod widgets;

pub use state::*;
