// Player column: name, turn highlight, and the three pick slots.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::lobby::view::{PlayerPanel, SlotState, SlotView};
use crate::lobby::PlayerSlot;

/// `show_picks` is false outside the draft and summary phases.
pub fn render(frame: &mut Frame, area: Rect, panel: &PlayerPanel, show_picks: bool) {
    let accent = player_color(panel.slot);
    let border_style = if panel.highlighted {
        Style::default().fg(accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let title = if panel.highlighted {
        format!(" > Player {} < ", panel.slot.number())
    } else {
        format!(" Player {} ", panel.slot.number())
    };

    let mut lines = vec![Line::from(Span::styled(
        format!(" {}", panel.name),
        Style::default().fg(accent).add_modifier(Modifier::BOLD),
    ))];
    if show_picks {
        lines.push(Line::from(""));
        for (i, pick) in panel.picks.iter().enumerate() {
            lines.push(slot_line(&format!("Pick {}", i + 1), pick));
        }
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(border_style),
    );
    frame.render_widget(paragraph, area);
}

pub fn player_color(slot: PlayerSlot) -> Color {
    match slot {
        PlayerSlot::Player1 => Color::Blue,
        PlayerSlot::Player2 => Color::Red,
    }
}

/// One placeholder line, shared with the ban row.
pub fn slot_line(label: &str, slot: &SlotView) -> Line<'static> {
    let (text, style) = slot_text(slot);
    Line::from(vec![
        Span::styled(format!(" {label}: "), Style::default().fg(Color::Gray)),
        Span::styled(text, style),
    ])
}

pub fn slot_text(slot: &SlotView) -> (String, Style) {
    match slot.state {
        SlotState::Filled => (
            slot.label.clone().unwrap_or_default(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        SlotState::Active => (
            ">> choosing <<".to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::SLOW_BLINK),
        ),
        SlotState::Pending => (
            "... waiting".to_string(),
            Style::default().fg(Color::DarkGray),
        ),
        SlotState::Empty => ("--".to_string(), Style::default().fg(Color::DarkGray)),
    }
}
