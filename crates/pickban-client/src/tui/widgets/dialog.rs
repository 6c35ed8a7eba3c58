// Modal overlays: quit confirmation, action confirmation, notifications.
//
// Each renders a centered dialog on top of the current screen.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::tui::Confirm;

const QUIT_WIDTH: u16 = 28;
const QUIT_HEIGHT: u16 = 5;
const MESSAGE_WIDTH: u16 = 60;

/// Render the quit confirmation overlay centered on the screen.
pub fn render_quit(frame: &mut Frame, area: Rect) {
    let block = dialog_block(" Quit? ", Color::Yellow);
    let mut spans = vec![Span::raw("  Really quit? (")];
    spans.extend(yes_no_spans());
    spans.push(Span::raw(")"));
    let text = Line::from(spans);
    draw(frame, area, QUIT_WIDTH, QUIT_HEIGHT, Paragraph::new(text).block(block));
}

/// Render a yes/no confirmation for a destructive lobby action.
pub fn render_confirm(frame: &mut Frame, area: Rect, confirm: Confirm) {
    let block = dialog_block(confirm.title(), Color::Red);
    let lines = vec![
        Line::from(confirm.prompt()),
        Line::from(""),
        Line::from(yes_no_spans().to_vec()),
    ];
    let height = message_height(confirm.prompt()) + 2;
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    draw(frame, area, MESSAGE_WIDTH, height, paragraph);
}

/// Render the front notification. `pending` counts it plus any queued behind.
pub fn render_notice(frame: &mut Frame, area: Rect, message: &str, pending: usize) {
    let title = if pending > 1 {
        format!(" Notice (1/{pending}) ")
    } else {
        " Notice ".to_string()
    };
    let block = dialog_block(&title, Color::Cyan);
    let lines = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "Enter to dismiss",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let height = message_height(message) + 2;
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    draw(frame, area, MESSAGE_WIDTH, height, paragraph);
}

fn dialog_block(title: &str, color: Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            title.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
}

fn yes_no_spans() -> [Span<'static>; 3] {
    [
        Span::styled(
            "y",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Span::raw("/"),
        Span::styled(
            "n",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    ]
}

/// Borders plus wrapped message lines.
fn message_height(message: &str) -> u16 {
    let inner = usize::from(MESSAGE_WIDTH - 2);
    let lines = message.chars().count().div_ceil(inner).max(1);
    u16::try_from(lines).unwrap_or(u16::MAX).saturating_add(2)
}

fn draw(frame: &mut Frame, area: Rect, width: u16, height: u16, paragraph: Paragraph<'_>) {
    let dialog_area = centered_rect(width, height, area);
    // Clear the area behind the dialog so it renders cleanly on top
    frame.render_widget(Clear, dialog_area);
    frame.render_widget(paragraph.style(Style::default().bg(Color::Black)), dialog_area);
}

/// Compute a centered rectangle of the given size within `area`, clamped to
/// the available space.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let clamped_width = width.min(area.width);
    let clamped_height = height.min(area.height);

    let vertical = Layout::vertical([Constraint::Length(clamped_height)])
        .flex(Flex::Center)
        .split(area);

    let horizontal = Layout::horizontal([Constraint::Length(clamped_width)])
        .flex(Flex::Center)
        .split(vertical[0]);

    horizontal[0]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
