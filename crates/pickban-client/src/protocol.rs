// Messages exchanged between the TUI and the app orchestrator, plus the
// internal events background tasks feed back into the app loop.

use crate::api::ApiError;
use crate::lobby::board::ElementFilter;
use crate::lobby::countdown::TimerDisplay;
use crate::lobby::view::LobbyView;
use crate::lobby::{LobbySnapshot, Role};

/// Requests from the TUI. Validation of names and codes happens in the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    CreateLobby { player_name: String },
    JoinLobby { lobby_code: String, player_name: String },
    LeaveLobby,
    DeleteLobby,
    ResetLobby,
    /// Organizer claims an open seat.
    OrganizerJoin,
    MarkReady,
    /// Pick or ban, whichever the current turn calls for.
    Select { resonator_id: String },
    SetFilter(ElementFilter),
    /// Fetch a snapshot now and restart the poll cadence.
    Refresh,
    Quit,
}

/// State pushed from the app to the TUI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    /// Entered a lobby; the dashboard replaces the join form.
    SessionStarted {
        lobby_code: String,
        role: Role,
        player_name: String,
    },
    /// Fresh projection of the current lobby.
    Lobby(Box<LobbyView>),
    Timer(TimerDisplay),
    /// Local session cleared; back to the join form.
    SessionEnded,
    /// Modal notification for the user.
    Notice(String),
    /// A request is in flight (or finished).
    Busy(bool),
}

/// Events from background tasks, tagged with the generation that spawned
/// them so the app can drop results from tasks it already replaced.
#[derive(Debug)]
pub enum AppEvent {
    Snapshot {
        generation: u64,
        result: Result<LobbySnapshot, ApiError>,
    },
    CountdownTick {
        generation: u64,
    },
}

impl AppEvent {
    pub fn generation(&self) -> u64 {
        match self {
            AppEvent::Snapshot { generation, .. } | AppEvent::CountdownTick { generation } => {
                *generation
            }
        }
    }
}
