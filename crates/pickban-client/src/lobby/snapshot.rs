// Lobby snapshot wire types: the state the lobby service reports on every poll.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Game state
// ---------------------------------------------------------------------------

/// Server-reported draft phase. The service drives transitions; the client
/// only renders whichever tag it receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    #[default]
    Waiting,
    ReadyCheck,
    #[serde(rename = "ban1_p1")]
    Ban1P1,
    #[serde(rename = "ban1_p2")]
    Ban1P2,
    #[serde(rename = "pick1_p1")]
    Pick1P1,
    #[serde(rename = "pick1_p2")]
    Pick1P2,
    #[serde(rename = "pick1_p1_2")]
    Pick1P1Second,
    #[serde(rename = "pick1_p2_2")]
    Pick1P2Second,
    #[serde(rename = "ban2_p1")]
    Ban2P1,
    #[serde(rename = "ban2_p2")]
    Ban2P2,
    #[serde(rename = "pick2_p2")]
    Pick2P2,
    #[serde(rename = "pick2_p1")]
    Pick2P1,
    Complete,
}

impl GameState {
    /// Every tag in server turn order.
    pub const ALL: [GameState; 13] = [
        GameState::Waiting,
        GameState::ReadyCheck,
        GameState::Ban1P1,
        GameState::Ban1P2,
        GameState::Pick1P1,
        GameState::Pick1P2,
        GameState::Pick1P1Second,
        GameState::Pick1P2Second,
        GameState::Ban2P1,
        GameState::Ban2P2,
        GameState::Pick2P2,
        GameState::Pick2P1,
        GameState::Complete,
    ];

    /// The wire tag, as the service spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            GameState::Waiting => "waiting",
            GameState::ReadyCheck => "ready_check",
            GameState::Ban1P1 => "ban1_p1",
            GameState::Ban1P2 => "ban1_p2",
            GameState::Pick1P1 => "pick1_p1",
            GameState::Pick1P2 => "pick1_p2",
            GameState::Pick1P1Second => "pick1_p1_2",
            GameState::Pick1P2Second => "pick1_p2_2",
            GameState::Ban2P1 => "ban2_p1",
            GameState::Ban2P2 => "ban2_p2",
            GameState::Pick2P2 => "pick2_p2",
            GameState::Pick2P1 => "pick2_p1",
            GameState::Complete => "complete",
        }
    }

    /// True for the ban and pick turns (everything between ready check and complete).
    pub fn is_active_draft(&self) -> bool {
        !matches!(
            self,
            GameState::Waiting | GameState::ReadyCheck | GameState::Complete
        )
    }

    /// Phases in which no resonator can be selected at all.
    pub fn is_pre_draft(&self) -> bool {
        matches!(self, GameState::Waiting | GameState::ReadyCheck)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Players and roles
// ---------------------------------------------------------------------------

/// One of the two draft seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerSlot {
    Player1,
    Player2,
}

impl PlayerSlot {
    pub fn number(&self) -> u8 {
        match self {
            PlayerSlot::Player1 => 1,
            PlayerSlot::Player2 => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerSlot::Player1 => "player1",
            PlayerSlot::Player2 => "player2",
        }
    }

    /// Owner of a global pick index under the parity rule used for button state.
    pub fn by_parity(index: usize) -> Self {
        if index % 2 == 0 {
            PlayerSlot::Player1
        } else {
            PlayerSlot::Player2
        }
    }
}

/// What this client is allowed to do in the lobby.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Organizer,
    OrganizerPlayer,
    Player1,
    Player2,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Organizer => "organizer",
            Role::OrganizerPlayer => "organizer_player",
            Role::Player1 => "player1",
            Role::Player2 => "player2",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "organizer" => Some(Role::Organizer),
            "organizer_player" => Some(Role::OrganizerPlayer),
            "player1" => Some(Role::Player1),
            "player2" => Some(Role::Player2),
            _ => None,
        }
    }

    pub fn from_slot(slot: PlayerSlot) -> Self {
        match slot {
            PlayerSlot::Player1 => Role::Player1,
            PlayerSlot::Player2 => Role::Player2,
        }
    }

    /// The seat a plain player occupies. Organizer-players have no fixed seat.
    pub fn slot(&self) -> Option<PlayerSlot> {
        match self {
            Role::Player1 => Some(PlayerSlot::Player1),
            Role::Player2 => Some(PlayerSlot::Player2),
            Role::Organizer | Role::OrganizerPlayer => None,
        }
    }

    pub fn is_organizer(&self) -> bool {
        matches!(self, Role::Organizer | Role::OrganizerPlayer)
    }

    /// May submit picks and bans and mark ready.
    pub fn can_draft(&self) -> bool {
        !matches!(self, Role::Organizer)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Turn deadline descriptor. Times are epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub start_time: Option<i64>,
    #[serde(default)]
    pub duration: Option<i64>,
}

impl TimerState {
    /// Deadline in epoch ms, when the timer is active and fully specified.
    /// A deadline past `i64::MAX` counts as none.
    pub fn deadline_ms(&self) -> Option<i64> {
        if !self.is_active {
            return None;
        }
        match (self.start_time, self.duration) {
            (Some(start), Some(duration)) if start > 0 && duration > 0 => {
                start.checked_add(duration)
            }
            _ => None,
        }
    }
}

/// Full lobby state as returned by `GET /lobbies/{code}`. Replaced wholesale
/// on every poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LobbySnapshot {
    #[serde(default)]
    pub lobby_code: String,
    #[serde(default)]
    pub player1: String,
    #[serde(default)]
    pub player2: String,
    #[serde(default)]
    pub player1_ready: bool,
    #[serde(default)]
    pub player2_ready: bool,
    #[serde(default)]
    pub game_state: GameState,
    #[serde(default)]
    pub picks: Vec<String>,
    #[serde(default)]
    pub bans: Vec<String>,
    #[serde(default)]
    pub timer_state: TimerState,
}

impl LobbySnapshot {
    pub fn player_name(&self, slot: PlayerSlot) -> &str {
        match slot {
            PlayerSlot::Player1 => &self.player1,
            PlayerSlot::Player2 => &self.player2,
        }
    }

    pub fn is_ready(&self, slot: PlayerSlot) -> bool {
        match slot {
            PlayerSlot::Player1 => self.player1_ready,
            PlayerSlot::Player2 => self.player2_ready,
        }
    }

    /// First open seat, player1 before player2.
    pub fn open_slot(&self) -> Option<PlayerSlot> {
        if self.player1.is_empty() {
            Some(PlayerSlot::Player1)
        } else if self.player2.is_empty() {
            Some(PlayerSlot::Player2)
        } else {
            None
        }
    }

    pub fn both_players_present(&self) -> bool {
        !self.player1.is_empty() && !self.player2.is_empty()
    }

    /// Seat whose name matches `name`, if any. Used to place an organizer-player.
    pub fn slot_named(&self, name: &str) -> Option<PlayerSlot> {
        if name.is_empty() {
            return None;
        }
        if self.player1 == name {
            Some(PlayerSlot::Player1)
        } else if self.player2 == name {
            Some(PlayerSlot::Player2)
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
