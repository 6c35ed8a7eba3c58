// Phase projection: game-state tag -> label, turn message, active seat and slot.

use super::snapshot::{GameState, PlayerSlot};

/// The placeholder that the current turn will fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActiveSlot {
    /// Shared ban row, slot 0..=3.
    Ban(usize),
    /// A player's own pick column, slot 0..=2.
    Pick { player: PlayerSlot, index: usize },
}

/// Everything the UI needs to know about the current phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseInfo {
    pub label: &'static str,
    pub message: &'static str,
    /// Seat whose section is highlighted.
    pub active_player: Option<PlayerSlot>,
    pub active_slot: Option<ActiveSlot>,
}

pub fn project(state: GameState) -> PhaseInfo {
    use GameState::*;
    use PlayerSlot::{Player1 as P1, Player2 as P2};

    let (label, message, active_player, active_slot) = match state {
        Waiting => ("Waiting", "Waiting for players to join...", None, None),
        ReadyCheck => (
            "Ready Check",
            "Waiting for both players to ready up...",
            None,
            None,
        ),
        Ban1P1 => ("Ban Phase 1", "Player 1: Ban 1st Resonator", Some(P1), Some(ActiveSlot::Ban(0))),
        Ban1P2 => ("Ban Phase 1", "Player 2: Ban 1st Resonator", Some(P2), Some(ActiveSlot::Ban(1))),
        Pick1P1 => ("Pick Phase 1", "Player 1: Pick 1st Resonator", Some(P1), Some(pick(P1, 0))),
        Pick1P2 => ("Pick Phase 1", "Player 2: Pick 1st Resonator", Some(P2), Some(pick(P2, 0))),
        Pick1P1Second => ("Pick Phase 1", "Player 1: Pick 2nd Resonator", Some(P1), Some(pick(P1, 1))),
        Pick1P2Second => ("Pick Phase 1", "Player 2: Pick 2nd Resonator", Some(P2), Some(pick(P2, 1))),
        Ban2P1 => ("Ban Phase 2", "Player 1: Ban 2nd Resonator", Some(P1), Some(ActiveSlot::Ban(2))),
        Ban2P2 => ("Ban Phase 2", "Player 2: Ban 2nd Resonator", Some(P2), Some(ActiveSlot::Ban(3))),
        Pick2P2 => ("Pick Phase 2", "Player 2: Pick Final Resonator", Some(P2), Some(pick(P2, 2))),
        Pick2P1 => ("Pick Phase 2", "Player 1: Pick Final Resonator", Some(P1), Some(pick(P1, 2))),
        Complete => ("Complete", "Pick/Ban Phase Complete!", None, None),
    };

    PhaseInfo {
        label,
        message,
        active_player,
        active_slot,
    }
}

fn pick(player: PlayerSlot, index: usize) -> ActiveSlot {
    ActiveSlot::Pick { player, index }
}

// ---------------------------------------------------------------------------
// Region visibility
// ---------------------------------------------------------------------------

/// Which dashboard regions are shown for a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Regions {
    pub phase_header: bool,
    pub pick_ban: bool,
    pub ready_check: bool,
    pub bans: bool,
    pub timer: bool,
    pub filter: bool,
    pub grid: bool,
    pub summary: bool,
    pub share_code: bool,
}

/// `player2_present` gates the share hint; `both_present` gates the ready panel.
pub fn regions(state: GameState, player2_present: bool, both_present: bool) -> Regions {
    let active = state.is_active_draft();
    let complete = state == GameState::Complete;
    Regions {
        phase_header: state != GameState::ReadyCheck,
        pick_ban: active || complete,
        ready_check: state == GameState::ReadyCheck && both_present,
        bans: active,
        timer: active,
        filter: active,
        grid: active,
        summary: complete,
        share_code: state == GameState::Waiting && !player2_present,
    }
}
