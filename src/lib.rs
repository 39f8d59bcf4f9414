// ABOUTME: Library root for rewardbot — re-exports all modules for integration testing.
// ABOUTME: The binary entry point is in main.rs, which uses this crate as a library.

pub mod app;
pub mod auth;
pub mod chat;
pub mod config;
pub mod observable;
pub mod rewards;
pub mod session;
pub mod store;
pub mod tui;
