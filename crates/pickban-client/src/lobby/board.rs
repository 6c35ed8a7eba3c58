// Board rules: which pick lands in which seat, ban row layout, button state
// for each catalog entry, and the element filter.

use super::snapshot::{LobbySnapshot, PlayerSlot};
use crate::catalog::Resonator;

/// Global pick indices owned by player1, in slot order.
pub const PLAYER1_PICK_INDICES: [usize; 3] = [0, 2, 5];
/// Global pick indices owned by player2, in slot order.
pub const PLAYER2_PICK_INDICES: [usize; 3] = [1, 3, 4];
/// Visible ban placeholders.
pub const BAN_SLOTS: usize = 4;

pub fn owned_pick_indices(player: PlayerSlot) -> [usize; 3] {
    match player {
        PlayerSlot::Player1 => PLAYER1_PICK_INDICES,
        PlayerSlot::Player2 => PLAYER2_PICK_INDICES,
    }
}

/// The three pick slots for one seat. Slot k holds `picks[owned[k]]` if present.
pub fn player_picks(picks: &[String], player: PlayerSlot) -> [Option<&str>; 3] {
    owned_pick_indices(player).map(|i| picks.get(i).map(String::as_str))
}

/// The ban row, filled in arrival order. Bans past the last slot are dropped.
pub fn ban_slots(bans: &[String]) -> [Option<&str>; BAN_SLOTS] {
    std::array::from_fn(|i| bans.get(i).map(String::as_str))
}

// ---------------------------------------------------------------------------
// Button state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonState {
    Available,
    Banned,
    Picked(PlayerSlot),
}

/// Exactly one state per id. Bans win over picks; a picked id belongs to the
/// parity of its first occurrence.
pub fn button_state(id: &str, snapshot: &LobbySnapshot) -> ButtonState {
    if snapshot.bans.iter().any(|b| b == id) {
        return ButtonState::Banned;
    }
    match snapshot.picks.iter().position(|p| p == id) {
        Some(index) => ButtonState::Picked(PlayerSlot::by_parity(index)),
        None => ButtonState::Available,
    }
}

pub fn button_disabled(state: ButtonState, snapshot: &LobbySnapshot, timed_out: bool) -> bool {
    state != ButtonState::Available || snapshot.game_state.is_pre_draft() || timed_out
}

// ---------------------------------------------------------------------------
// Element filter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ElementFilter {
    #[default]
    All,
    Element(String),
}

impl ElementFilter {
    pub fn matches(&self, resonator: &Resonator) -> bool {
        match self {
            ElementFilter::All => true,
            ElementFilter::Element(tag) => resonator.has_element(tag),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ElementFilter::All => "All",
            ElementFilter::Element(tag) => tag,
        }
    }

    /// "All" followed by the given tags.
    pub fn options(elements: &[String]) -> Vec<ElementFilter> {
        std::iter::once(ElementFilter::All)
            .chain(elements.iter().cloned().map(ElementFilter::Element))
            .collect()
    }

    /// Next entry of `options`, wrapping around. A filter that is not among
    /// the options restarts from the first one after "All".
    pub fn cycle(&self, options: &[ElementFilter]) -> ElementFilter {
        if options.is_empty() {
            return ElementFilter::All;
        }
        let pos = options.iter().position(|o| o == self).unwrap_or(0);
        options[(pos + 1) % options.len()].clone()
    }
}

// ---------------------------------------------------------------------------
// Leave detection
// ---------------------------------------------------------------------------

/// Names of players whose seat went from occupied to empty between snapshots.
pub fn departed_players(prev: &LobbySnapshot, next: &LobbySnapshot) -> Vec<String> {
    [PlayerSlot::Player1, PlayerSlot::Player2]
        .into_iter()
        .filter_map(|slot| {
            let before = prev.player_name(slot);
            let after = next.player_name(slot);
            (!before.is_empty() && after.is_empty()).then(|| before.to_string())
        })
        .collect()
}
