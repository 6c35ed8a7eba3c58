// Join screen: name and lobby-code fields plus Create / Join buttons.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::{FormField, JoinForm};

const FORM_WIDTH: u16 = 48;
const FORM_HEIGHT: u16 = 9;

pub fn render(frame: &mut Frame, area: Rect, form: &JoinForm) {
    let [vertical] = Layout::vertical([Constraint::Length(FORM_HEIGHT.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [form_area] = Layout::horizontal([Constraint::Length(FORM_WIDTH.min(area.width))])
        .flex(Flex::Center)
        .areas(vertical);

    let lines = vec![
        Line::from(""),
        field_line("Your name ", &form.player_name, form.focus == FormField::Name),
        Line::from(""),
        field_line("Lobby code", &form.lobby_code, form.focus == FormField::Code),
        Line::from(""),
        Line::from(vec![
            Span::raw("   "),
            button("Create Lobby", form.focus == FormField::Create),
            Span::raw("   "),
            button("Join Lobby", form.focus == FormField::Join),
        ]),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Resonator Pick/Ban ")
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(paragraph, form_area);
}

fn field_line<'a>(label: &'a str, value: &'a str, focused: bool) -> Line<'a> {
    let value_style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::White)
    } else {
        Style::default().fg(Color::White).add_modifier(Modifier::UNDERLINED)
    };
    let cursor = if focused { "_" } else { "" };
    Line::from(vec![
        Span::styled(format!(" {label}: "), Style::default().fg(Color::Gray)),
        Span::styled(format!("{value}{cursor}"), value_style),
    ])
}

fn button(label: &str, focused: bool) -> Span<'static> {
    let style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    Span::styled(format!("[ {label} ]"), style)
}
