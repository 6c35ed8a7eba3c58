// Phase banner widget: current phase, whose turn it is, and the turn timer.
//
// Line 1: "{phase label}: {turn message}"
// Line 2: timer during ban/pick turns, the share hint while waiting alone
// The banner body is hidden during the ready check.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::lobby::countdown::TimerDisplay;
use crate::lobby::view::LobbyView;

pub fn render(frame: &mut Frame, area: Rect, view: &LobbyView, timer: &TimerDisplay) {
    let lines = build_lines(view, timer);
    let border = if view.regions.timer && timer.warning {
        Color::Red
    } else {
        Color::Yellow
    };
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Phase")
            .border_style(Style::default().fg(border)),
    );
    frame.render_widget(paragraph, area);
}

/// Shown between entering a lobby and its first snapshot.
pub fn render_loading(frame: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new(Line::from(Span::styled(
        "  Loading lobby...",
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM),
    )))
    .block(Block::default().borders(Borders::ALL).title("Phase"));
    frame.render_widget(paragraph, area);
}

pub fn build_lines(view: &LobbyView, timer: &TimerDisplay) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if !view.regions.phase_header {
        return lines;
    }

    lines.push(Line::from(vec![
        Span::styled(
            format!(" {}: ", view.phase_label),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            view.message,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ]));

    if view.regions.timer {
        let style = if timer.warning {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        lines.push(Line::from(Span::styled(format!(" {}", timer.text), style)));
    } else if view.regions.share_code {
        lines.push(Line::from(vec![
            Span::styled(" Share lobby code ", Style::default().fg(Color::Gray)),
            Span::styled(
                view.lobby_code.clone(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                " with your opponent to start.",
                Style::default().fg(Color::Gray),
            ),
        ]));
    }
    lines
}
