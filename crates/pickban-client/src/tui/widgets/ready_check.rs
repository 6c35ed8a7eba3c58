// Ready-check panel: both players' readiness and the local Ready button.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::lobby::view::ReadyPanel;

pub const READY_MESSAGE: &str = "Waiting for both players to ready up...";

pub fn render(frame: &mut Frame, area: Rect, panel: &ReadyPanel) {
    let paragraph = Paragraph::new(build_lines(panel)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Ready Check")
            .border_style(Style::default().fg(Color::Green)),
    );
    frame.render_widget(paragraph, area);
}

pub fn build_lines(panel: &ReadyPanel) -> Vec<Line<'static>> {
    let status_style = |text: &str| {
        if text.ends_with(": Ready") {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        }
    };

    let mut lines = vec![
        Line::from(Span::styled(
            format!(" {READY_MESSAGE}"),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(" {}", panel.player1_status),
            status_style(&panel.player1_status),
        )),
        Line::from(Span::styled(
            format!(" {}", panel.player2_status),
            status_style(&panel.player2_status),
        )),
        Line::from(""),
    ];

    match &panel.button {
        Some(button) if button.enabled => lines.push(Line::from(vec![
            Span::raw(" "),
            Span::styled(
                format!("[ {} ]", button.label),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  press r", Style::default().fg(Color::DarkGray)),
        ])),
        Some(button) => lines.push(Line::from(Span::styled(
            format!(" [ {} ]", button.label),
            Style::default().fg(Color::DarkGray),
        ))),
        None => {}
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lobby::{GameState, Role};
    use crate::tui::test_support::{snapshot, view_for};

    fn text_of(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn unready_player_sees_ready_button() {
        let mut snap = snapshot(GameState::ReadyCheck);
        snap.player2_ready = true;
        let view = view_for(&snap, Role::Player1, "Andy");
        let text = text_of(&build_lines(view.ready.as_ref().unwrap()));
        assert!(text.contains("Player 1: Not Ready"));
        assert!(text.contains("Player 2: Ready"));
        assert!(text.contains("[ Ready ]  press r"));
    }

    #[test]
    fn ready_player_sees_waiting() {
        let mut snap = snapshot(GameState::ReadyCheck);
        snap.player1_ready = true;
        let view = view_for(&snap, Role::Player1, "Andy");
        let text = text_of(&build_lines(view.ready.as_ref().unwrap()));
        assert!(text.contains("[ Waiting... ]"));
        assert!(!text.contains("press r"));
    }

    #[test]
    fn organizer_has_no_button() {
        let view = view_for(&snapshot(GameState::ReadyCheck), Role::Organizer, "Org");
        let text = text_of(&build_lines(view.ready.as_ref().unwrap()));
        assert!(!text.contains("[ "));
        assert!(text.contains(READY_MESSAGE));
    }
}
