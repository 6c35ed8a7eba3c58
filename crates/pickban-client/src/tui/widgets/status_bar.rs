// Status bar widget: lobby code, role, player name, request indicator.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::lobby::Role;
use crate::tui::ViewState;

/// Render the status bar into the given area.
///
/// Layout: [lobby code] [role] [name] [busy marker]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = Vec::new();

    match &state.session {
        Some(session) => {
            spans.push(Span::styled(
                format!(" Lobby {} ", session.lobby_code),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
            spans.push(Span::styled(
                role_label(session.role),
                Style::default().fg(role_color(session.role)),
            ));
            spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
            spans.push(Span::styled(
                session.player_name.clone(),
                Style::default().fg(Color::White),
            ));
        }
        None => spans.push(Span::styled(
            " Not in a lobby",
            Style::default().fg(Color::Gray),
        )),
    }

    if state.busy {
        spans.push(Span::styled(
            "  working...",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::DIM),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

pub fn role_label(role: Role) -> &'static str {
    match role {
        Role::Organizer => "Organizer",
        Role::OrganizerPlayer => "Organizer (playing)",
        Role::Player1 => "Player 1",
        Role::Player2 => "Player 2",
    }
}

fn role_color(role: Role) -> Color {
    match role {
        Role::Organizer | Role::OrganizerPlayer => Color::Magenta,
        Role::Player1 => Color::Blue,
        Role::Player2 => Color::Red,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
