// Center panel outside the draft: the final "VS" summary once complete, or a
// waiting notice before the draft starts.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::lobby::view::{LobbyView, PlayerPanel};

use super::player_panel::player_color;

pub fn render(frame: &mut Frame, area: Rect, view: &LobbyView) {
    let paragraph = Paragraph::new(build_lines(view))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Final Teams")
                .border_style(Style::default().fg(Color::Green)),
        );
    frame.render_widget(paragraph, area);
}

pub fn build_lines(view: &LobbyView) -> Vec<Line<'static>> {
    let [p1, p2] = &view.players;
    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            name_span(p1),
            Span::styled(
                "  VS  ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            name_span(p2),
        ]),
        Line::from(""),
    ];
    for (a, b) in p1.picks.iter().zip(p2.picks.iter()) {
        let label = |slot: &crate::lobby::view::SlotView| {
            slot.label.clone().unwrap_or_else(|| "--".to_string())
        };
        lines.push(Line::from(format!("{}  |  {}", label(a), label(b))));
    }
    lines
}

fn name_span(panel: &PlayerPanel) -> Span<'static> {
    Span::styled(
        panel.name.clone(),
        Style::default()
            .fg(player_color(panel.slot))
            .add_modifier(Modifier::BOLD),
    )
}

/// Before the draft: who is here and what happens next.
pub fn render_waiting(frame: &mut Frame, area: Rect, view: &LobbyView) {
    let [p1, p2] = &view.players;
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            view.message,
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(vec![name_span(p1), Span::raw("  /  "), name_span(p2)]),
    ];
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Lobby"));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lobby::{GameState, Role};
    use crate::tui::test_support::{buffer_text, snapshot, view_for};

    #[test]
    fn summary_pairs_picks_side_by_side() {
        let mut snap = snapshot(GameState::Complete);
        snap.picks = ["jiyan", "encore", "verina", "calcharo", "lingyang", "danjin"]
            .map(String::from)
            .to_vec();
        let view = view_for(&snap, Role::Player1, "Andy");
        let text: Vec<String> = build_lines(&view)
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();

        assert_eq!(text[1], "Andy  VS  Bo");
        // player1 owns 0/2/5, player2 owns 1/3/4
        assert_eq!(text[3], "Jiyan  |  Encore");
        assert_eq!(text[4], "Verina  |  Calcharo");
        assert_eq!(text[5], "Danjin  |  Lingyang");
    }

    #[test]
    fn waiting_shows_message_and_names() {
        let mut snap = snapshot(GameState::Waiting);
        snap.player2.clear();
        let view = view_for(&snap, Role::Organizer, "Org");
        let backend = ratatui::backend::TestBackend::new(60, 8);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render_waiting(frame, frame.area(), &view))
            .unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Waiting for players to join..."));
        assert!(text.contains("Andy  /  None"));
    }
}
