// Library root: re-exports all modules so integration tests and external
// consumers can access the crate's public API.

pub mod api;
pub mod app;
pub mod catalog;
pub mod config;
pub mod lobby;
pub mod poller;
pub mod protocol;
pub mod session;
pub mod tui;
