// Ban row: the four shared ban slots, in ban order.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::lobby::board::BAN_SLOTS;
use crate::lobby::view::SlotView;

use super::player_panel::slot_text;

pub fn render(frame: &mut Frame, area: Rect, bans: &[SlotView; BAN_SLOTS]) {
    let paragraph = Paragraph::new(build_line(bans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Bans")
            .border_style(Style::default().fg(Color::Red)),
    );
    frame.render_widget(paragraph, area);
}

pub fn build_line(bans: &[SlotView; BAN_SLOTS]) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, ban) in bans.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  |  ", Style::default().fg(Color::DarkGray)));
        }
        let (text, style) = slot_text(ban);
        spans.push(Span::styled(
            format!(" {}: ", i + 1),
            Style::default().fg(Color::Gray),
        ));
        spans.push(Span::styled(text, style));
    }
    Line::from(spans)
}
