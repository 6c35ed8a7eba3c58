// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages for the app
// orchestrator, or into local ViewState mutations (form editing, grid
// cursor, dialogs).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{Confirm, FormField, ViewState, GRID_COLUMNS};
use crate::protocol::UserCommand;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// app orchestrator. Returns `None` when it was handled locally.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Crossterm on Windows reports both press and release.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately regardless of mode.
    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }

    // Notices are modal: acknowledge before anything else.
    if !view_state.notices.is_empty() {
        if matches!(
            key_event.code,
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')
        ) {
            view_state.notices.pop_front();
        }
        return None;
    }

    if let Some(confirm) = view_state.confirm {
        return handle_confirm(key_event, view_state, confirm);
    }

    if view_state.in_lobby() {
        handle_lobby_key(key_event, view_state)
    } else {
        handle_form_key(key_event, view_state)
    }
}

/// `y`/`q` confirm, `n`/Esc cancel, everything else is blocked.
fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm_quit = false;
            None
        }
        _ => None,
    }
}

fn handle_confirm(
    key_event: KeyEvent,
    view_state: &mut ViewState,
    confirm: Confirm,
) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            view_state.confirm = None;
            Some(confirm.command())
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm = None;
            None
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Join form
// ---------------------------------------------------------------------------

fn handle_form_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    let form = &mut view_state.form;
    match key_event.code {
        KeyCode::Tab | KeyCode::Down => {
            form.focus = form.focus.next();
            None
        }
        KeyCode::BackTab | KeyCode::Up => {
            form.focus = form.focus.prev();
            None
        }
        KeyCode::Esc => {
            view_state.confirm_quit = true;
            None
        }
        KeyCode::Enter => match form.focus {
            FormField::Name | FormField::Code => {
                form.focus = form.focus.next();
                None
            }
            FormField::Create => Some(UserCommand::CreateLobby {
                player_name: form.player_name.clone(),
            }),
            FormField::Join => Some(UserCommand::JoinLobby {
                lobby_code: form.lobby_code.clone(),
                player_name: form.player_name.clone(),
            }),
        },
        KeyCode::Backspace => {
            match form.focus {
                FormField::Name => {
                    form.player_name.pop();
                }
                FormField::Code => {
                    form.lobby_code.pop();
                }
                _ => {}
            }
            None
        }
        KeyCode::Char(c) => {
            match form.focus {
                FormField::Name => form.player_name.push(c),
                FormField::Code => form.lobby_code.push(c),
                _ => {}
            }
            None
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Lobby dashboard
// ---------------------------------------------------------------------------

fn handle_lobby_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('q') => {
            view_state.confirm_quit = true;
            None
        }
        KeyCode::F(5) => Some(UserCommand::Refresh),

        KeyCode::Left | KeyCode::Char('h') => move_cursor(view_state, -1),
        KeyCode::Right | KeyCode::Char('l') => move_cursor(view_state, 1),
        KeyCode::Up | KeyCode::Char('k') => move_cursor(view_state, -(GRID_COLUMNS as isize)),
        KeyCode::Down | KeyCode::Char('j') => move_cursor(view_state, GRID_COLUMNS as isize),

        KeyCode::Enter | KeyCode::Char(' ') => select_current(view_state),
        KeyCode::Char('f') => cycle_filter(view_state),
        KeyCode::Char('r') => {
            let ready_enabled = view_state
                .lobby
                .as_ref()
                .and_then(|l| l.ready.as_ref())
                .and_then(|r| r.button.as_ref())
                .is_some_and(|b| b.enabled);
            ready_enabled.then_some(UserCommand::MarkReady)
        }
        KeyCode::Char('o') => {
            let allowed = view_state
                .lobby
                .as_ref()
                .is_some_and(|l| l.actions.join_as_player);
            allowed.then_some(UserCommand::OrganizerJoin)
        }
        KeyCode::Char('L') => ask(view_state, Confirm::Leave),
        KeyCode::Char('D') => ask(view_state, Confirm::Delete),
        KeyCode::Char('R') => ask(view_state, Confirm::Reset),
        _ => None,
    }
}

/// Open a confirmation if the current role has the action.
fn ask(view_state: &mut ViewState, confirm: Confirm) -> Option<UserCommand> {
    let Some(view) = view_state.lobby.as_ref() else {
        return None;
    };
    let allowed = match confirm {
        Confirm::Leave => view.actions.leave,
        Confirm::Delete => view.actions.delete,
        Confirm::Reset => view.actions.reset,
    };
    if allowed {
        view_state.confirm = Some(confirm);
    }
    None
}

fn move_cursor(view_state: &mut ViewState, delta: isize) -> Option<UserCommand> {
    let len = view_state.lobby.as_ref().map_or(0, |l| l.grid.len());
    if len == 0 {
        return None;
    }
    let target = view_state.cursor as isize + delta;
    if (0..len as isize).contains(&target) {
        view_state.cursor = target as usize;
    }
    None
}

/// Disabled buttons send nothing.
fn select_current(view_state: &mut ViewState) -> Option<UserCommand> {
    let view = view_state.lobby.as_ref()?;
    if !view.regions.grid {
        return None;
    }
    let button = view.grid.get(view_state.cursor)?;
    if button.disabled {
        return None;
    }
    Some(UserCommand::Select {
        resonator_id: button.id.clone(),
    })
}

fn cycle_filter(view_state: &mut ViewState) -> Option<UserCommand> {
    let view = view_state.lobby.as_ref()?;
    if !view.regions.filter || view.filter_options.is_empty() {
        return None;
    }
    let next = view.filter.cycle(&view.filter_options);
    view_state.cursor = 0;
    Some(UserCommand::SetFilter(next))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lobby::board::ElementFilter;
    use crate::lobby::{GameState, Role};
    use crate::protocol::UiUpdate;
    use crate::tui::apply_ui_update;
    use crate::tui::test_support::{snapshot, view_for};
    use crossterm::event::{KeyEventState, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl_key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn type_str(state: &mut ViewState, text: &str) {
        for c in text.chars() {
            handle_key(key(KeyCode::Char(c)), state);
        }
    }

    fn in_lobby(game_state: GameState, role: Role) -> ViewState {
        let mut state = ViewState::default();
        apply_ui_update(
            &mut state,
            UiUpdate::SessionStarted {
                lobby_code: "ABC123".into(),
                role,
                player_name: "Andy".into(),
            },
        );
        let snap = snapshot(game_state);
        apply_ui_update(
            &mut state,
            UiUpdate::Lobby(Box::new(view_for(&snap, role, "Andy"))),
        );
        state
    }

    // -- Join form --

    #[test]
    fn typing_fills_focused_field() {
        let mut state = ViewState::default();
        type_str(&mut state, "Andy");
        handle_key(key(KeyCode::Tab), &mut state);
        type_str(&mut state, "ABC123");
        handle_key(key(KeyCode::Backspace), &mut state);
        assert_eq!(state.form.player_name, "Andy");
        assert_eq!(state.form.lobby_code, "ABC12");
    }

    #[test]
    fn q_is_text_on_the_form() {
        let mut state = ViewState::default();
        type_str(&mut state, "qq");
        assert_eq!(state.form.player_name, "qq");
        assert!(!state.confirm_quit);
    }

    #[test]
    fn create_button_sends_create() {
        let mut state = ViewState::with_player_name(Some("Org".into()));
        state.form.focus = FormField::Create;
        assert_eq!(
            handle_key(key(KeyCode::Enter), &mut state),
            Some(UserCommand::CreateLobby {
                player_name: "Org".into()
            })
        );
    }

    #[test]
    fn join_button_sends_code_and_name() {
        let mut state = ViewState::with_player_name(Some("Bo".into()));
        state.form.lobby_code = "ABC123".into();
        state.form.focus = FormField::Join;
        assert_eq!(
            handle_key(key(KeyCode::Enter), &mut state),
            Some(UserCommand::JoinLobby {
                lobby_code: "ABC123".into(),
                player_name: "Bo".into()
            })
        );
    }

    #[test]
    fn enter_on_text_field_advances_focus() {
        let mut state = ViewState::default();
        assert!(handle_key(key(KeyCode::Enter), &mut state).is_none());
        assert_eq!(state.form.focus, FormField::Code);
    }

    #[test]
    fn esc_on_form_asks_to_quit() {
        let mut state = ViewState::default();
        handle_key(key(KeyCode::Esc), &mut state);
        assert!(state.confirm_quit);
        assert_eq!(
            handle_key(key(KeyCode::Char('y')), &mut state),
            Some(UserCommand::Quit)
        );
    }

    // -- Quit --

    #[test]
    fn ctrl_c_quits_immediately() {
        let mut state = in_lobby(GameState::Ban1P1, Role::Player1);
        state.confirm = Some(Confirm::Leave);
        assert_eq!(
            handle_key(ctrl_key(KeyCode::Char('c')), &mut state),
            Some(UserCommand::Quit)
        );
    }

    #[test]
    fn double_q_workflow_quits() {
        let mut state = in_lobby(GameState::Waiting, Role::Player1);
        assert!(handle_key(key(KeyCode::Char('q')), &mut state).is_none());
        assert!(state.confirm_quit);
        assert_eq!(
            handle_key(key(KeyCode::Char('q')), &mut state),
            Some(UserCommand::Quit)
        );
    }

    #[test]
    fn quit_confirmation_cancels_and_blocks() {
        let mut state = in_lobby(GameState::Waiting, Role::Player1);
        state.confirm_quit = true;
        assert!(handle_key(key(KeyCode::Char('x')), &mut state).is_none());
        assert!(state.confirm_quit);
        handle_key(key(KeyCode::Char('N')), &mut state);
        assert!(!state.confirm_quit);
    }

    // -- Notices --

    #[test]
    fn notice_blocks_until_acknowledged() {
        let mut state = in_lobby(GameState::Ban1P1, Role::Player1);
        state.notices.push_back("one".into());
        state.notices.push_back("two".into());

        assert!(handle_key(key(KeyCode::Char('f')), &mut state).is_none());
        assert_eq!(state.notices.len(), 2);

        handle_key(key(KeyCode::Enter), &mut state);
        assert_eq!(state.notices.front().map(String::as_str), Some("two"));
        handle_key(key(KeyCode::Esc), &mut state);
        assert!(state.notices.is_empty());
    }

    // -- Grid --

    #[test]
    fn cursor_moves_within_grid() {
        let mut state = in_lobby(GameState::Ban1P1, Role::Player1);
        handle_key(key(KeyCode::Right), &mut state);
        assert_eq!(state.cursor, 1);
        handle_key(key(KeyCode::Down), &mut state);
        assert_eq!(state.cursor, 1 + GRID_COLUMNS);
        // Out of range moves are ignored.
        handle_key(key(KeyCode::Down), &mut state);
        assert_eq!(state.cursor, 1 + GRID_COLUMNS);
        handle_key(key(KeyCode::Up), &mut state);
        handle_key(key(KeyCode::Left), &mut state);
        handle_key(key(KeyCode::Left), &mut state);
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn enter_selects_available_resonator() {
        let mut state = in_lobby(GameState::Ban1P1, Role::Player1);
        assert_eq!(
            handle_key(key(KeyCode::Enter), &mut state),
            Some(UserCommand::Select {
                resonator_id: "jiyan".into()
            })
        );
    }

    #[test]
    fn enter_on_disabled_button_sends_nothing() {
        let mut state = ViewState::default();
        apply_ui_update(
            &mut state,
            UiUpdate::SessionStarted {
                lobby_code: "ABC123".into(),
                role: Role::Player2,
                player_name: "Bo".into(),
            },
        );
        let mut snap = snapshot(GameState::Ban1P2);
        snap.bans = vec!["jiyan".into()];
        apply_ui_update(
            &mut state,
            UiUpdate::Lobby(Box::new(view_for(&snap, Role::Player2, "Bo"))),
        );
        assert!(handle_key(key(KeyCode::Enter), &mut state).is_none());
    }

    #[test]
    fn filter_key_cycles_to_next_element() {
        let mut state = in_lobby(GameState::Pick1P1, Role::Player1);
        state.cursor = 3;
        let cmd = handle_key(key(KeyCode::Char('f')), &mut state);
        assert_eq!(
            cmd,
            Some(UserCommand::SetFilter(ElementFilter::Element("Aero".into())))
        );
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn filter_key_ignored_outside_draft() {
        let mut state = in_lobby(GameState::Waiting, Role::Player1);
        assert!(handle_key(key(KeyCode::Char('f')), &mut state).is_none());
    }

    // -- Lobby actions --

    #[test]
    fn ready_only_when_button_enabled() {
        let mut state = in_lobby(GameState::ReadyCheck, Role::Player1);
        assert_eq!(
            handle_key(key(KeyCode::Char('r')), &mut state),
            Some(UserCommand::MarkReady)
        );

        let mut organizer = in_lobby(GameState::ReadyCheck, Role::Organizer);
        assert!(handle_key(key(KeyCode::Char('r')), &mut organizer).is_none());
    }

    #[test]
    fn leave_requires_confirmation() {
        let mut state = in_lobby(GameState::Pick1P2, Role::Player2);
        assert!(handle_key(key(KeyCode::Char('L')), &mut state).is_none());
        assert_eq!(state.confirm, Some(Confirm::Leave));
        assert_eq!(
            handle_key(key(KeyCode::Char('y')), &mut state),
            Some(UserCommand::LeaveLobby)
        );
        assert!(state.confirm.is_none());
    }

    #[test]
    fn cancelled_confirmation_sends_nothing() {
        let mut state = in_lobby(GameState::Waiting, Role::Organizer);
        handle_key(key(KeyCode::Char('D')), &mut state);
        assert_eq!(state.confirm, Some(Confirm::Delete));
        assert!(handle_key(key(KeyCode::Esc), &mut state).is_none());
        assert!(state.confirm.is_none());
    }

    #[test]
    fn actions_respect_role() {
        let mut player = in_lobby(GameState::Waiting, Role::Player1);
        handle_key(key(KeyCode::Char('D')), &mut player);
        handle_key(key(KeyCode::Char('R')), &mut player);
        assert!(player.confirm.is_none());
        assert!(handle_key(key(KeyCode::Char('o')), &mut player).is_none());

        let mut organizer = in_lobby(GameState::Waiting, Role::Organizer);
        handle_key(key(KeyCode::Char('L')), &mut organizer);
        assert!(organizer.confirm.is_none());
        assert_eq!(
            handle_key(key(KeyCode::Char('o')), &mut organizer),
            Some(UserCommand::OrganizerJoin)
        );
        handle_key(key(KeyCode::Char('R')), &mut organizer);
        assert_eq!(organizer.confirm, Some(Confirm::Reset));
    }

    #[test]
    fn f5_refreshes() {
        let mut state = in_lobby(GameState::Waiting, Role::Player1);
        assert_eq!(
            handle_key(key(KeyCode::F(5)), &mut state),
            Some(UserCommand::Refresh)
        );
    }

    #[test]
    fn release_events_are_ignored() {
        let mut state = in_lobby(GameState::Ban1P1, Role::Player1);
        let release = KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert!(handle_key(release, &mut state).is_none());
    }
}
