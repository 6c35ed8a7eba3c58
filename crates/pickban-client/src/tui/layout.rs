// Screen layout: panel arrangement and sizing.
//
// Divides the terminal area into fixed zones for the lobby dashboard:
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +--------------------------------------------------+
// | Phase Banner (4 rows)                             |
// +-----------+--------------------------+-----------+
// | Player 1  | Center (grid / ready /   | Player 2  |
// | (22%)     | summary / share hint)    | (22%)     |
// +-----------+--------------------------+-----------+
// | Bans (3 rows)                                     |
// +--------------------------------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each dashboard zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Lobby code, role, player name, busy marker.
    pub status_bar: Rect,
    /// Phase label, turn message, timer line.
    pub phase_banner: Rect,
    pub player1: Rect,
    /// Whatever the current phase shows in the middle.
    pub center: Rect,
    pub player2: Rect,
    /// Shared ban row.
    pub bans: Rect,
    pub help_bar: Rect,
}

/// Build the dashboard layout from the available terminal area.
pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Length(4), // phase banner
            Constraint::Min(8),    // players + center
            Constraint::Length(3), // bans
            Constraint::Length(1), // help bar
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(22),
            Constraint::Percentage(56),
            Constraint::Percentage(22),
        ])
        .split(vertical[2]);

    AppLayout {
        status_bar: vertical[0],
        phase_banner: vertical[1],
        player1: horizontal[0],
        center: horizontal[1],
        player2: horizontal[2],
        bans: vertical[3],
        help_bar: vertical[4],
    }
}

/// Join screen: status bar, centered form, help bar.
#[derive(Debug, Clone)]
pub struct JoinLayout {
    pub status_bar: Rect,
    pub form: Rect,
    pub help_bar: Rect,
}

pub fn build_join_layout(area: Rect) -> JoinLayout {
    let vertical = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(9),
        Constraint::Length(1),
    ])
    .split(area);

    JoinLayout {
        status_bar: vertical[0],
        form: vertical[1],
        help_bar: vertical[2],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
