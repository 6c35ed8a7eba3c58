// Resonator grid: every catalog entry passing the element filter, with its
// availability and the local cursor.
//
// Banned and picked entries render dimmed with a marker; the cursor cell is
// reverse-video. The table scrolls to keep the cursor row on screen.
// Selection itself is handled in `tui::input`.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Row, Table, TableState};
use ratatui::Frame;

use crate::lobby::board::ButtonState;
use crate::lobby::view::{GridButton, LobbyView};
use crate::lobby::PlayerSlot;
use crate::tui::GRID_COLUMNS;

use super::player_panel::player_color;

pub fn render(frame: &mut Frame, area: Rect, view: &LobbyView, cursor: usize) {
    let rows: Vec<Row> = view
        .grid
        .chunks(GRID_COLUMNS)
        .enumerate()
        .map(|(r, chunk)| {
            let cells: Vec<Cell> = chunk
                .iter()
                .enumerate()
                .map(|(c, button)| cell(button, r * GRID_COLUMNS + c == cursor))
                .collect();
            Row::new(cells).height(2)
        })
        .collect();

    let widths = [Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS];
    let title = Line::from(vec![
        Span::raw("Resonators "),
        Span::styled(
            format!("[{}]", view.filter.label()),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(format!(" {} shown", view.grid.len())),
    ]);

    let table = Table::new(rows, widths).block(Block::default().borders(Borders::ALL).title(title));
    let mut state = TableState::default().with_selected(Some(cursor / GRID_COLUMNS));
    frame.render_stateful_widget(table, area, &mut state);
}

fn cell(button: &GridButton, under_cursor: bool) -> Cell<'static> {
    let (marker, marker_style) = marker(button.state);
    Cell::from(vec![
        Line::from(vec![
            Span::styled(button.name.clone(), name_style(button, under_cursor)),
            Span::styled(marker, marker_style),
        ]),
        Line::from(Span::styled(
            button.element_label.clone(),
            Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
        )),
    ])
}

fn name_style(button: &GridButton, under_cursor: bool) -> Style {
    let style = if button.disabled {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    };
    if under_cursor {
        style.add_modifier(Modifier::REVERSED)
    } else {
        style
    }
}

/// Suffix shown after the name for unavailable entries.
pub fn marker(state: ButtonState) -> (&'static str, Style) {
    match state {
        ButtonState::Available => ("", Style::default()),
        ButtonState::Banned => (" [banned]", Style::default().fg(Color::Red)),
        ButtonState::Picked(slot) => (
            match slot {
                PlayerSlot::Player1 => " [P1]",
                PlayerSlot::Player2 => " [P2]",
            },
            Style::default().fg(player_color(slot)),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lobby::{GameState, Role};
    use crate::tui::test_support::{buffer_text, snapshot, view_for};

    #[test]
    fn markers_by_state() {
        assert_eq!(marker(ButtonState::Available).0, "");
        assert_eq!(marker(ButtonState::Banned).0, " [banned]");
        assert_eq!(marker(ButtonState::Picked(PlayerSlot::Player2)).0, " [P2]");
    }

    #[test]
    fn grid_lists_names_and_states() {
        let mut snap = snapshot(GameState::Pick1P2);
        snap.bans = vec!["verina".into(), "danjin".into()];
        snap.picks = vec!["jiyan".into()];
        let view = view_for(&snap, Role::Player2, "Bo");

        let backend = ratatui::backend::TestBackend::new(100, 12);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), &view, 1))
            .unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("[All]"));
        assert!(text.contains("6 shown"));
        assert!(text.contains("Jiyan [P1]"));
        assert!(text.contains("Verina [banned]"));
        assert!(text.contains("Encore"));
    }

    #[test]
    fn cursor_row_stays_visible_on_short_terminal() {
        let snap = snapshot(GameState::Pick1P1);
        let mut view = view_for(&snap, Role::Player1, "Andy");
        view.grid.extend((0..20).map(|i| GridButton {
            id: format!("extra{i}"),
            name: format!("Extra{i}"),
            element_label: "Aero".into(),
            state: ButtonState::Available,
            disabled: false,
        }));
        let last = view.grid.len() - 1;

        // Three two-line rows fit inside the borders.
        let backend = ratatui::backend::TestBackend::new(100, 8);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), &view, last))
            .unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Extra19"), "cursor entry not drawn:\n{text}");
        assert!(!text.contains("Jiyan"));
    }

    #[test]
    fn cursor_and_disabled_styles() {
        let mut snap = snapshot(GameState::Ban1P2);
        snap.bans = vec!["jiyan".into()];
        let view = view_for(&snap, Role::Player2, "Bo");

        let banned = name_style(&view.grid[0], false);
        assert_eq!(banned.fg, Some(Color::DarkGray));
        let selected = name_style(&view.grid[1], true);
        assert!(selected.add_modifier.contains(Modifier::REVERSED));
        assert!(selected.add_modifier.contains(Modifier::BOLD));
    }
}
