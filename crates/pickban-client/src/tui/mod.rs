// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` that mirrors what the app orchestrator last
// projected. The orchestrator pushes `UiUpdate` messages over an mpsc
// channel; the TUI applies them to `ViewState` and re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::collections::VecDeque;
use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tokio::sync::mpsc;

use crate::lobby::countdown::TimerDisplay;
use crate::lobby::view::{GridButton, LobbyView};
use crate::lobby::Role;
use crate::protocol::{UiUpdate, UserCommand};

use layout::{build_join_layout, build_layout};

/// Resonator buttons per grid row. Cursor movement and rendering agree on it.
pub const GRID_COLUMNS: usize = 4;

// ---------------------------------------------------------------------------
// Join form
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    Code,
    Create,
    Join,
}

impl FormField {
    const ORDER: [FormField; 4] = [
        FormField::Name,
        FormField::Code,
        FormField::Create,
        FormField::Join,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    pub fn is_text(self) -> bool {
        matches!(self, FormField::Name | FormField::Code)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinForm {
    pub player_name: String,
    pub lobby_code: String,
    pub focus: FormField,
}

// ---------------------------------------------------------------------------
// Confirmation
// ---------------------------------------------------------------------------

/// Destructive actions that need a yes before the command goes out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirm {
    Leave,
    Delete,
    Reset,
}

impl Confirm {
    pub fn title(self) -> &'static str {
        match self {
            Confirm::Leave => " Leave Lobby ",
            Confirm::Delete => " Delete Lobby ",
            Confirm::Reset => " Reset Lobby ",
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            Confirm::Leave => "Leave the lobby? This will clear all current picks and bans.",
            Confirm::Delete => "Delete lobby permanently?",
            Confirm::Reset => {
                "Reset all picks and bans for this lobby? Players will remain in the lobby."
            }
        }
    }

    pub fn command(self) -> UserCommand {
        match self {
            Confirm::Leave => UserCommand::LeaveLobby,
            Confirm::Delete => UserCommand::DeleteLobby,
            Confirm::Reset => UserCommand::ResetLobby,
        }
    }
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// Identity of the lobby this client is in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub lobby_code: String,
    pub role: Role,
    pub player_name: String,
}

/// TUI-local state that mirrors the application state for rendering.
///
/// Updated incrementally via `UiUpdate` messages from the app orchestrator.
/// The `render_frame` function reads this struct to draw the screen.
#[derive(Debug, Default)]
pub struct ViewState {
    /// `None` shows the join form.
    pub session: Option<SessionInfo>,
    /// Latest projection; `None` until the first snapshot arrives.
    pub lobby: Option<Box<LobbyView>>,
    pub timer: TimerDisplay,
    pub form: JoinForm,
    /// Index into the visible (filtered) grid.
    pub cursor: usize,
    /// Pending notifications, oldest first. The front one is shown modally.
    pub notices: VecDeque<String>,
    pub confirm: Option<Confirm>,
    pub confirm_quit: bool,
    pub busy: bool,
}

impl ViewState {
    /// Fresh state with the join form's name pre-filled.
    pub fn with_player_name(name: Option<String>) -> Self {
        ViewState {
            form: JoinForm {
                player_name: name.unwrap_or_default(),
                ..JoinForm::default()
            },
            ..ViewState::default()
        }
    }

    pub fn in_lobby(&self) -> bool {
        self.session.is_some()
    }

    pub fn selected_button(&self) -> Option<&GridButton> {
        self.lobby.as_ref()?.grid.get(self.cursor)
    }

    fn clamp_cursor(&mut self) {
        let len = self.lobby.as_ref().map_or(0, |l| l.grid.len());
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::SessionStarted {
            lobby_code,
            role,
            player_name,
        } => {
            let same_lobby = state
                .session
                .as_ref()
                .is_some_and(|s| s.lobby_code == lobby_code);
            if !same_lobby {
                state.lobby = None;
                state.cursor = 0;
            }
            state.form.lobby_code.clear();
            state.session = Some(SessionInfo {
                lobby_code,
                role,
                player_name,
            });
        }
        UiUpdate::Lobby(view) => {
            state.lobby = Some(view);
            state.clamp_cursor();
        }
        UiUpdate::Timer(display) => {
            state.timer = display;
        }
        UiUpdate::SessionEnded => {
            state.session = None;
            state.lobby = None;
            state.confirm = None;
            state.cursor = 0;
            state.timer = TimerDisplay::inactive();
            state.form.focus = FormField::Name;
        }
        UiUpdate::Notice(message) => {
            state.notices.push_back(message);
        }
        UiUpdate::Busy(busy) => {
            state.busy = busy;
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete frame: join form or lobby dashboard, plus overlays.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let area = frame.area();

    if state.in_lobby() {
        render_dashboard(frame, state);
    } else {
        let layout = build_join_layout(area);
        widgets::status_bar::render(frame, layout.status_bar, state);
        widgets::join_form::render(frame, layout.form, &state.form);
        render_help_bar(frame, layout.help_bar, state);
    }

    if let Some(confirm) = state.confirm {
        widgets::dialog::render_confirm(frame, area, confirm);
    }
    if let Some(notice) = state.notices.front() {
        widgets::dialog::render_notice(frame, area, notice, state.notices.len());
    }
    if state.confirm_quit {
        widgets::dialog::render_quit(frame, area);
    }
}

fn render_dashboard(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());
    widgets::status_bar::render(frame, layout.status_bar, state);
    render_help_bar(frame, layout.help_bar, state);

    let Some(view) = state.lobby.as_deref() else {
        widgets::phase_banner::render_loading(frame, layout.phase_banner);
        return;
    };

    widgets::phase_banner::render(frame, layout.phase_banner, view, &state.timer);
    widgets::player_panel::render(frame, layout.player1, &view.players[0], view.regions.pick_ban);
    widgets::player_panel::render(frame, layout.player2, &view.players[1], view.regions.pick_ban);
    if view.regions.bans {
        widgets::bans::render(frame, layout.bans, &view.bans);
    }

    let regions = view.regions;
    if let (true, Some(ready)) = (regions.ready_check, view.ready.as_ref()) {
        widgets::ready_check::render(frame, layout.center, ready);
    } else if regions.grid {
        widgets::roster_grid::render(frame, layout.center, view, state.cursor);
    } else if regions.summary {
        widgets::summary::render(frame, layout.center, view);
    } else {
        widgets::summary::render_waiting(frame, layout.center, view);
    }
}

/// Key hints for whatever the current screen accepts.
pub fn help_text(state: &ViewState) -> String {
    if !state.in_lobby() {
        return " Tab:Next field | Enter:Activate | Esc:Quit".to_string();
    }

    let mut parts: Vec<&str> = Vec::new();
    if let Some(view) = state.lobby.as_deref() {
        if view.regions.grid {
            parts.extend(["Arrows:Move", "Enter:Select", "f:Filter"]);
        }
        if view
            .ready
            .as_ref()
            .and_then(|r| r.button.as_ref())
            .is_some_and(|b| b.enabled)
        {
            parts.push("r:Ready");
        }
        let actions = view.actions;
        if actions.join_as_player {
            parts.push("o:Join as player");
        }
        if actions.leave {
            parts.push("L:Leave");
        }
        if actions.reset {
            parts.push("R:Reset");
        }
        if actions.delete {
            parts.push("D:Delete");
        }
    }
    parts.extend(["F5:Refresh", "q:Quit"]);
    format!(" {}", parts.join(" | "))
}

fn render_help_bar(frame: &mut Frame, area: ratatui::layout::Rect, state: &ViewState) {
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        help_text(state),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// 1. Initializes the terminal (raw mode, alternate screen).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop: UI updates, keyboard input, render ticks.
/// 4. Restores the terminal on exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    player_name: Option<String>,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::with_player_name(player_name);
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    // App is shutting down.
                    None => break,
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quit {
                                break;
                            }
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(_)) | None => break,
                }
            }

            _ = render_tick.tick() => {
                terminal.draw(|frame| render_frame(frame, &view_state))?;
            }
        }
    }

    ratatui::restore();
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod test_support {
    use crate::catalog::{Catalog, Resonator};
    use crate::lobby::board::ElementFilter;
    use crate::lobby::view::{self, LobbyView, ViewInputs};
    use crate::lobby::{GameState, LobbySnapshot, Role};

    pub fn catalog() -> Catalog {
        let r = |id: &str, name: &str, element: &str| Resonator {
            id: id.into(),
            name: name.into(),
            elements: vec![element.into()],
            image: None,
            image_button: None,
            image_pick: None,
        };
        Catalog::new(vec![
            r("jiyan", "Jiyan", "Aero"),
            r("encore", "Encore", "Fusion"),
            r("verina", "Verina", "Spectro"),
            r("calcharo", "Calcharo", "Electro"),
            r("lingyang", "Lingyang", "Glacio"),
            r("danjin", "Danjin", "Havoc"),
        ])
    }

    pub fn snapshot(state: GameState) -> LobbySnapshot {
        LobbySnapshot {
            lobby_code: "ABC123".into(),
            player1: "Andy".into(),
            player2: "Bo".into(),
            game_state: state,
            ..Default::default()
        }
    }

    pub fn view_for(snapshot: &LobbySnapshot, role: Role, name: &str) -> LobbyView {
        let catalog = catalog();
        view::project(&ViewInputs {
            snapshot,
            role,
            player_name: name,
            catalog: &catalog,
            filter: &ElementFilter::All,
            timed_out: false,
        })
    }

    pub fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
        let area = buffer.area;
        let mut out = String::new();
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }
}
