// Lobby view projection.
//
// Pure function from (snapshot, local role, catalog, filter, timeout flag)
// to everything the dashboard draws. No I/O and no retained state: the app
// loop calls `project` after every snapshot, timeout, or filter change and
// ships the result to the TUI.

use super::board::{self, ButtonState, ElementFilter, BAN_SLOTS};
use super::phase::{self, ActiveSlot, Regions};
use super::snapshot::{GameState, LobbySnapshot, PlayerSlot, Role};
use crate::catalog::Catalog;

/// Shown for an empty seat.
pub const NO_PLAYER: &str = "None";
/// Shown for a pick or ban whose id is missing from the catalog.
pub const UNKNOWN_RESONATOR: &str = "?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Empty,
    Filled,
    /// The current turn fills this slot.
    Active,
    /// The local countdown expired; waiting for the service to auto-fill.
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotView {
    pub state: SlotState,
    pub resonator_id: Option<String>,
    /// Display name; `?` when the id is not in the catalog.
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerPanel {
    pub slot: PlayerSlot,
    pub name: String,
    pub highlighted: bool,
    pub picks: [SlotView; 3],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadyButton {
    pub label: &'static str,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadyPanel {
    pub player1_status: String,
    pub player2_status: String,
    pub button: Option<ReadyButton>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridButton {
    pub id: String,
    pub name: String,
    pub element_label: String,
    pub state: ButtonState,
    pub disabled: bool,
}

/// Lobby management actions the local role may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionButtons {
    pub delete: bool,
    pub reset: bool,
    pub join_as_player: bool,
    pub leave: bool,
}

impl ActionButtons {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Organizer => ActionButtons {
                delete: true,
                reset: true,
                join_as_player: true,
                leave: false,
            },
            Role::OrganizerPlayer => ActionButtons {
                delete: true,
                reset: true,
                join_as_player: false,
                leave: false,
            },
            Role::Player1 | Role::Player2 => ActionButtons {
                leave: true,
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LobbyView {
    pub lobby_code: String,
    pub role: Role,
    pub player_name: String,
    pub game_state: GameState,
    pub phase_label: &'static str,
    pub message: &'static str,
    pub regions: Regions,
    pub players: [PlayerPanel; 2],
    pub bans: [SlotView; BAN_SLOTS],
    pub ready: Option<ReadyPanel>,
    /// Catalog entries passing the current filter, in catalog order.
    pub grid: Vec<GridButton>,
    pub filter: ElementFilter,
    pub filter_options: Vec<ElementFilter>,
    pub actions: ActionButtons,
    pub timed_out: bool,
}

impl LobbyView {
    pub fn player(&self, slot: PlayerSlot) -> &PlayerPanel {
        match slot {
            PlayerSlot::Player1 => &self.players[0],
            PlayerSlot::Player2 => &self.players[1],
        }
    }
}

/// Everything `project` reads.
pub struct ViewInputs<'a> {
    pub snapshot: &'a LobbySnapshot,
    pub role: Role,
    pub player_name: &'a str,
    pub catalog: &'a Catalog,
    pub filter: &'a ElementFilter,
    pub timed_out: bool,
}

pub fn project(inputs: &ViewInputs<'_>) -> LobbyView {
    let snap = inputs.snapshot;
    let info = phase::project(snap.game_state);
    let regions = phase::regions(
        snap.game_state,
        !snap.player2.is_empty(),
        snap.both_players_present(),
    );

    let slot_view = |id: Option<&str>, is_active: bool| -> SlotView {
        let state = match (id.is_some(), is_active) {
            (true, _) => SlotState::Filled,
            (false, true) if inputs.timed_out => SlotState::Pending,
            (false, true) => SlotState::Active,
            (false, false) => SlotState::Empty,
        };
        SlotView {
            state,
            resonator_id: id.map(str::to_string),
            label: id.map(|id| {
                inputs
                    .catalog
                    .get(id)
                    .map(|r| r.name.clone())
                    .unwrap_or_else(|| UNKNOWN_RESONATOR.to_string())
            }),
        }
    };

    let panel = |slot: PlayerSlot| -> PlayerPanel {
        let picks = board::player_picks(&snap.picks, slot);
        let name = snap.player_name(slot);
        PlayerPanel {
            slot,
            name: if name.is_empty() {
                NO_PLAYER.to_string()
            } else {
                name.to_string()
            },
            highlighted: info.active_player == Some(slot),
            picks: std::array::from_fn(|k| {
                let is_active =
                    info.active_slot == Some(ActiveSlot::Pick { player: slot, index: k });
                slot_view(picks[k], is_active)
            }),
        }
    };

    let bans = board::ban_slots(&snap.bans);
    let ban_views =
        std::array::from_fn(|i| slot_view(bans[i], info.active_slot == Some(ActiveSlot::Ban(i))));

    let ready = regions
        .ready_check
        .then(|| ready_panel(snap, inputs.role, inputs.player_name));

    let grid = inputs
        .catalog
        .resonators()
        .iter()
        .filter(|r| inputs.filter.matches(r))
        .map(|r| {
            let state = board::button_state(&r.id, snap);
            GridButton {
                id: r.id.clone(),
                name: r.name.clone(),
                element_label: r.element_label(),
                state,
                disabled: board::button_disabled(state, snap, inputs.timed_out),
            }
        })
        .collect();

    LobbyView {
        lobby_code: snap.lobby_code.clone(),
        role: inputs.role,
        player_name: inputs.player_name.to_string(),
        game_state: snap.game_state,
        phase_label: info.label,
        message: info.message,
        regions,
        players: [panel(PlayerSlot::Player1), panel(PlayerSlot::Player2)],
        bans: ban_views,
        ready,
        grid,
        filter: inputs.filter.clone(),
        filter_options: ElementFilter::options(&inputs.catalog.elements()),
        actions: ActionButtons::for_role(inputs.role),
        timed_out: inputs.timed_out,
    }
}

fn ready_panel(snap: &LobbySnapshot, role: Role, player_name: &str) -> ReadyPanel {
    let status = |slot: PlayerSlot| {
        let word = if snap.is_ready(slot) { "Ready" } else { "Not Ready" };
        format!("Player {}: {word}", slot.number())
    };

    let own_slot = match role {
        Role::Player1 | Role::Player2 => role.slot(),
        Role::OrganizerPlayer => snap.slot_named(player_name),
        Role::Organizer => None,
    };

    ReadyPanel {
        player1_status: status(PlayerSlot::Player1),
        player2_status: status(PlayerSlot::Player2),
        button: own_slot.map(|slot| {
            if snap.is_ready(slot) {
                ReadyButton {
                    label: "Waiting...",
                    enabled: false,
                }
            } else {
                ReadyButton {
                    label: "Ready",
                    enabled: true,
                }
            }
        }),
    }
}
