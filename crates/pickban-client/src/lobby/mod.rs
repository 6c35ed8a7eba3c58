// Lobby domain: wire snapshot, phase rules, board rules, countdown, and the
// view projection the dashboard renders.

pub mod board;
pub mod countdown;
pub mod phase;
pub mod snapshot;
pub mod view;

pub use snapshot::{GameState, LobbySnapshot, PlayerSlot, Role, TimerState};
