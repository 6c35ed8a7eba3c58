// Application state and orchestration logic.
//
// The central event loop that owns the lobby session. It consumes user
// commands from the TUI and events from the background poll/countdown tasks,
// talks to the lobby service, and pushes projected views to the TUI.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::api::{ApiError, LobbyApi};
use crate::catalog::Catalog;
use crate::config::Config;
use crate::lobby::board::{self, departed_players, ElementFilter};
use crate::lobby::countdown::{self, Countdown, TimerDisplay};
use crate::lobby::view::{self, ViewInputs};
use crate::lobby::{LobbySnapshot, Role};
use crate::poller::RepeatingTask;
use crate::protocol::{AppEvent, UiUpdate, UserCommand};
use crate::session::{SessionStore, StoredSession};

// ---------------------------------------------------------------------------
// LobbySession
// ---------------------------------------------------------------------------

/// Everything tied to one lobby visit. Built on entry, dropped on exit;
/// dropping it stops both background tasks.
pub struct LobbySession {
    pub lobby_code: String,
    pub role: Role,
    pub player_name: String,
    /// Previous snapshot, kept only for leave detection and re-projection.
    pub last_snapshot: Option<LobbySnapshot>,
    /// Local guess that the turn expired. Cleared by the next snapshot.
    pub timed_out: bool,
    pub countdown: Option<Countdown>,
    poller: RepeatingTask,
    countdown_task: RepeatingTask,
}

impl LobbySession {
    fn new(lobby_code: String, role: Role, player_name: String) -> Self {
        Self {
            lobby_code,
            role,
            player_name,
            last_snapshot: None,
            timed_out: false,
            countdown: None,
            poller: RepeatingTask::new(),
            countdown_task: RepeatingTask::new(),
        }
    }

    pub fn is_polling(&self) -> bool {
        self.poller.is_running()
    }

    pub fn countdown_running(&self) -> bool {
        self.countdown_task.is_running()
    }
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub config: Config,
    pub api: Arc<dyn LobbyApi>,
    pub store: SessionStore,
    pub catalog: Catalog,
    pub session: Option<LobbySession>,
    pub filter: ElementFilter,
    /// Identifies the current poller. Bumped whenever polling (re)starts or
    /// stops; snapshot events carrying an older value are discarded.
    pub poll_generation: u64,
    /// Same, for the countdown ticker.
    pub countdown_generation: u64,
    /// Wall clock in epoch ms. Swappable so tests can pin time.
    pub clock: fn() -> i64,
    event_tx: mpsc::Sender<AppEvent>,
}

impl AppState {
    pub fn new(
        config: Config,
        api: Arc<dyn LobbyApi>,
        store: SessionStore,
        catalog: Catalog,
        event_tx: mpsc::Sender<AppEvent>,
    ) -> Self {
        AppState {
            config,
            api,
            store,
            catalog,
            session: None,
            filter: ElementFilter::All,
            poll_generation: 0,
            countdown_generation: 0,
            clock: countdown::now_ms,
            event_tx,
        }
    }

    /// Enter a lobby: persist it, announce it, and start polling.
    async fn enter_session(
        &mut self,
        lobby_code: String,
        role: Role,
        player_name: String,
        ui_tx: &mpsc::Sender<UiUpdate>,
    ) {
        self.stop_session_tasks();
        let stored = StoredSession {
            lobby_code: lobby_code.clone(),
            role,
            player_name: player_name.clone(),
        };
        if let Err(e) = self.store.save_session(&stored) {
            warn!("failed to persist session: {e:#}");
        }

        info!("entering lobby {lobby_code} as {role}");
        self.filter = ElementFilter::All;
        self.session = Some(LobbySession::new(
            lobby_code.clone(),
            role,
            player_name.clone(),
        ));
        let _ = ui_tx
            .send(UiUpdate::SessionStarted {
                lobby_code,
                role,
                player_name,
            })
            .await;
        let _ = ui_tx.send(UiUpdate::Timer(TimerDisplay::inactive())).await;
        self.start_polling();
    }

    /// Leave the lobby locally: stop tasks, forget the stored session, and
    /// return the TUI to the join form.
    async fn end_session(&mut self, notice: Option<&str>, ui_tx: &mpsc::Sender<UiUpdate>) {
        self.stop_session_tasks();
        if let Some(session) = self.session.take() {
            info!("left lobby {}", session.lobby_code);
        }
        if let Err(e) = self.store.clear_session() {
            warn!("failed to clear stored session: {e:#}");
        }
        let _ = ui_tx.send(UiUpdate::SessionEnded).await;
        let _ = ui_tx.send(UiUpdate::Timer(TimerDisplay::inactive())).await;
        if let Some(message) = notice {
            notify(ui_tx, message).await;
        }
    }

    fn stop_session_tasks(&mut self) {
        self.poll_generation += 1;
        self.countdown_generation += 1;
        if let Some(session) = self.session.as_mut() {
            session.poller.stop();
            session.countdown_task.stop();
        }
    }

    /// Fetch now and then on the configured cadence. Replaces any running poller.
    pub fn start_polling(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        self.poll_generation += 1;
        let generation = self.poll_generation;
        let api = Arc::clone(&self.api);
        let tx = self.event_tx.clone();
        let code = session.lobby_code.clone();
        debug!("starting poller generation {generation} for {code}");

        session.poller.start(self.config.poll_interval(), move || {
            let api = Arc::clone(&api);
            let tx = tx.clone();
            let code = code.clone();
            async move {
                let result = api.get_lobby(&code).await;
                tx.send(AppEvent::Snapshot { generation, result })
                    .await
                    .is_ok()
            }
        });
    }

    /// Replace the countdown with one derived from `snapshot`, or disarm it.
    fn rearm_countdown(&mut self, snapshot: &LobbySnapshot) -> bool {
        let threshold = self.config.polling.warning_threshold_secs;
        let tick = self.config.countdown_tick();
        let Some(session) = self.session.as_mut() else {
            return false;
        };

        self.countdown_generation += 1;
        session.countdown_task.stop();
        session.countdown = Countdown::for_snapshot(snapshot, threshold);
        if session.countdown.is_none() {
            return false;
        }

        let generation = self.countdown_generation;
        let tx = self.event_tx.clone();
        session.countdown_task.start(tick, move || {
            let tx = tx.clone();
            async move {
                tx.send(AppEvent::CountdownTick { generation })
                    .await
                    .is_ok()
            }
        });
        true
    }

    /// Build the view for the current session, if a snapshot has arrived.
    pub fn current_view(&self) -> Option<view::LobbyView> {
        let session = self.session.as_ref()?;
        let snapshot = session.last_snapshot.as_ref()?;
        Some(view::project(&ViewInputs {
            snapshot,
            role: session.role,
            player_name: &session.player_name,
            catalog: &self.catalog,
            filter: &self.filter,
            timed_out: session.timed_out,
        }))
    }

    async fn push_view(&self, ui_tx: &mpsc::Sender<UiUpdate>) {
        if let Some(view) = self.current_view() {
            let _ = ui_tx.send(UiUpdate::Lobby(Box::new(view))).await;
        }
    }
}

async fn notify(ui_tx: &mpsc::Sender<UiUpdate>, message: impl Into<String>) {
    let _ = ui_tx.send(UiUpdate::Notice(message.into())).await;
}

// ---------------------------------------------------------------------------
// Background events
// ---------------------------------------------------------------------------

pub async fn handle_app_event(
    state: &mut AppState,
    event: AppEvent,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    match event {
        AppEvent::Snapshot { generation, result } => {
            if generation != state.poll_generation || state.session.is_none() {
                debug!(
                    "discarding stale snapshot (event gen: {generation}, current gen: {})",
                    state.poll_generation
                );
                return;
            }
            match result {
                Ok(snapshot) => apply_snapshot(state, snapshot, ui_tx).await,
                Err(e) if e.is_not_found() => {
                    info!("lobby gone (404), clearing session");
                    state
                        .end_session(Some("The lobby was closed by the organizer."), ui_tx)
                        .await;
                }
                Err(e) => {
                    warn!("lobby poll failed: {e} ({})", e.detail());
                    let message = format!("Lost access to the lobby: {}", e.detail());
                    state.end_session(Some(&message), ui_tx).await;
                }
            }
        }
        AppEvent::CountdownTick { generation } => {
            if generation != state.countdown_generation {
                debug!("discarding stale countdown tick (gen {generation})");
                return;
            }
            handle_countdown_tick(state, ui_tx).await;
        }
    }
}

async fn apply_snapshot(
    state: &mut AppState,
    snapshot: LobbySnapshot,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    let Some(session) = state.session.as_mut() else {
        return;
    };

    let departed = session
        .last_snapshot
        .as_ref()
        .map(|prev| departed_players(prev, &snapshot))
        .unwrap_or_default();
    if ban_overflow_changed(session.last_snapshot.as_ref(), &snapshot) {
        warn!(
            "lobby {} reported {} bans; showing the first {}",
            session.lobby_code,
            snapshot.bans.len(),
            board::BAN_SLOTS
        );
    }
    if let Some(prev) = &session.last_snapshot {
        if prev.game_state != snapshot.game_state {
            info!("lobby {}: {} -> {}", session.lobby_code, prev.game_state, snapshot.game_state);
        }
    }

    session.timed_out = false;
    session.last_snapshot = Some(snapshot.clone());

    for name in departed {
        info!("{name} left lobby {}", session.lobby_code);
        notify(ui_tx, format!("{name} has left the lobby.")).await;
    }

    // When armed, the ticker's first tick renders the timer line.
    if !state.rearm_countdown(&snapshot) {
        let _ = ui_tx.send(UiUpdate::Timer(TimerDisplay::inactive())).await;
    }
    state.push_view(ui_tx).await;
}

/// True when `next` carries more bans than the row shows and the previous
/// snapshot did not already report that same count.
fn ban_overflow_changed(prev: Option<&LobbySnapshot>, next: &LobbySnapshot) -> bool {
    next.bans.len() > board::BAN_SLOTS && prev.map_or(true, |p| p.bans.len() != next.bans.len())
}

async fn handle_countdown_tick(state: &mut AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    let now = (state.clock)();
    let Some(session) = state.session.as_mut() else {
        return;
    };
    let Some(countdown) = session.countdown else {
        return;
    };

    let expired = countdown.is_expired(now);
    let _ = ui_tx.send(UiUpdate::Timer(countdown.display(now))).await;

    if expired && !session.timed_out {
        info!("turn timer expired locally in {}", session.lobby_code);
        session.timed_out = true;
        session.countdown_task.stop();
        state.countdown_generation += 1;
        state.push_view(ui_tx).await;
    }
}

// ---------------------------------------------------------------------------
// User commands
// ---------------------------------------------------------------------------

pub async fn handle_user_command(
    state: &mut AppState,
    cmd: UserCommand,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    match cmd {
        UserCommand::CreateLobby { player_name } => create_lobby(state, &player_name, ui_tx).await,
        UserCommand::JoinLobby {
            lobby_code,
            player_name,
        } => join_lobby(state, &lobby_code, &player_name, ui_tx).await,
        UserCommand::LeaveLobby => leave_lobby(state, ui_tx).await,
        UserCommand::DeleteLobby => delete_lobby(state, ui_tx).await,
        UserCommand::ResetLobby => reset_lobby(state, ui_tx).await,
        UserCommand::OrganizerJoin => organizer_join(state, ui_tx).await,
        UserCommand::MarkReady => mark_ready(state, ui_tx).await,
        UserCommand::Select { resonator_id } => select(state, &resonator_id, ui_tx).await,
        UserCommand::SetFilter(filter) => {
            state.filter = filter;
            state.push_view(ui_tx).await;
        }
        UserCommand::Refresh => state.start_polling(),
        UserCommand::Quit => {}
    }
}

/// Wraps a request in Busy on/off updates.
async fn busy<T>(
    ui_tx: &mpsc::Sender<UiUpdate>,
    request: impl std::future::Future<Output = T>,
) -> T {
    let _ = ui_tx.send(UiUpdate::Busy(true)).await;
    let out = request.await;
    let _ = ui_tx.send(UiUpdate::Busy(false)).await;
    out
}

async fn create_lobby(state: &mut AppState, player_name: &str, ui_tx: &mpsc::Sender<UiUpdate>) {
    let player_name = player_name.trim();
    if player_name.is_empty() {
        notify(ui_tx, "Please enter your name first!").await;
        return;
    }

    info!("creating lobby as {player_name}");
    match busy(ui_tx, state.api.create_lobby(player_name)).await {
        Ok(created) => {
            state
                .enter_session(
                    created.lobby_code,
                    Role::Organizer,
                    player_name.to_string(),
                    ui_tx,
                )
                .await;
        }
        Err(ApiError::Network(e)) => {
            warn!("create lobby network error: {e}");
            notify(ui_tx, "Network error when creating lobby").await;
        }
        Err(e) => {
            notify(ui_tx, format!("Error creating lobby: {}", e.detail())).await;
        }
    }
}

async fn join_lobby(
    state: &mut AppState,
    lobby_code: &str,
    player_name: &str,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    let lobby_code = lobby_code.trim();
    let player_name = player_name.trim();
    match (lobby_code.is_empty(), player_name.is_empty()) {
        (true, true) => {
            notify(ui_tx, "Please enter both lobby code and your name!").await;
            return;
        }
        (true, false) => {
            notify(ui_tx, "Please enter a lobby code!").await;
            return;
        }
        (false, true) => {
            notify(ui_tx, "Please enter your name!").await;
            return;
        }
        (false, false) => {}
    }

    const FULL: &str = "Cannot join: This lobby is already full";
    const MISSING: &str = "Cannot join: This lobby code does not exist";
    const NETWORK: &str = "Network error when joining lobby. Please try again.";

    // Check-then-act: the service arbitrates if someone else takes the seat first.
    let snapshot = match busy(ui_tx, state.api.get_lobby(lobby_code)).await {
        Ok(snapshot) => snapshot,
        Err(e) if e.is_not_found() || e.server_message() == Some("Lobby not found") => {
            notify(ui_tx, MISSING).await;
            return;
        }
        Err(ApiError::Network(e)) => {
            warn!("join pre-check network error: {e}");
            notify(ui_tx, NETWORK).await;
            return;
        }
        Err(e) => {
            notify(ui_tx, format!("Error checking lobby: {}", e.detail())).await;
            return;
        }
    };

    let Some(slot) = snapshot.open_slot() else {
        info!("lobby {lobby_code} is full; not sending join");
        notify(ui_tx, FULL).await;
        return;
    };

    info!("joining lobby {lobby_code} as {} ({player_name})", slot.as_str());
    match busy(ui_tx, state.api.join_lobby(lobby_code, slot, player_name)).await {
        Ok(joined) => {
            let role = joined
                .role
                .as_deref()
                .and_then(Role::parse)
                .unwrap_or_else(|| Role::from_slot(slot));
            state
                .enter_session(lobby_code.to_string(), role, player_name.to_string(), ui_tx)
                .await;
        }
        Err(e) if e.status() == Some(409) || e.server_message() == Some("Lobby is full") => {
            notify(ui_tx, FULL).await;
        }
        Err(e) if e.is_not_found() || e.server_message() == Some("Lobby not found") => {
            notify(ui_tx, MISSING).await;
        }
        Err(ApiError::Network(e)) => {
            warn!("join network error: {e}");
            notify(ui_tx, NETWORK).await;
        }
        Err(e) => {
            notify(ui_tx, format!("Error joining lobby: {}", e.detail())).await;
        }
    }
}

async fn leave_lobby(state: &mut AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    let target = state
        .session
        .as_ref()
        .and_then(|s| s.role.slot().map(|slot| (s.lobby_code.clone(), slot)));
    let Some((code, slot)) = target else {
        state.end_session(Some("State cleared."), ui_tx).await;
        return;
    };

    info!("leaving lobby {code} from {}", slot.as_str());
    let result = busy(ui_tx, state.api.leave_lobby(&code, slot)).await;

    // Local state goes regardless of what the service says.
    let message = match result {
        Ok(()) => "You have left the lobby successfully.".to_string(),
        Err(ApiError::Network(e)) => {
            warn!("leave network error: {e}");
            "You have left the lobby. Note: Could not communicate with server, but local state has been cleared.".to_string()
        }
        Err(e) => match e.status() {
            Some(502) => "You have left the lobby. Note: The server experienced an error, but your local state has been cleared.".to_string(),
            Some(404) => "You have left the lobby. Note: The lobby was not found on the server.".to_string(),
            _ => match (e.server_message(), &e) {
                (Some(m), _) => format!("You have left the lobby. Server message: {m}"),
                (None, ApiError::Status { status, status_text, .. }) => {
                    format!("You have left the lobby. Server status: {status} {status_text}")
                }
                (None, other) => format!("You have left the lobby. Server message: {}", other.detail()),
            },
        },
    };
    state.end_session(Some(&message), ui_tx).await;
}

async fn delete_lobby(state: &mut AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    let target = state
        .session
        .as_ref()
        .filter(|s| s.role.is_organizer())
        .map(|s| (s.lobby_code.clone(), s.player_name.clone()));
    let Some((code, name)) = target else {
        notify(ui_tx, "No lobby code found or not organizer.").await;
        return;
    };

    info!("deleting lobby {code}");
    match busy(ui_tx, state.api.delete_lobby(&code, &name)).await {
        Ok(()) => state.end_session(Some("Lobby deleted."), ui_tx).await,
        Err(ApiError::Network(e)) => {
            warn!("delete network error: {e}");
            state
                .end_session(Some("Network error deleting lobby."), ui_tx)
                .await;
        }
        Err(e) => notify(ui_tx, format!("Error deleting lobby: {}", e.detail())).await,
    }
}

async fn reset_lobby(state: &mut AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    let target = state
        .session
        .as_ref()
        .filter(|s| s.role.is_organizer() && !s.player_name.trim().is_empty())
        .map(|s| (s.lobby_code.clone(), s.player_name.clone()));
    let Some((code, name)) = target else {
        notify(
            ui_tx,
            "Cannot reset: Missing required lobby information, role, or valid player name.",
        )
        .await;
        return;
    };

    info!("resetting lobby {code}");
    match busy(ui_tx, state.api.reset_lobby(&code, &name)).await {
        Ok(()) => {
            notify(ui_tx, "Lobby reset successfully.").await;
            state.start_polling();
        }
        Err(ApiError::Network(e)) => {
            warn!("reset network error: {e}");
            notify(ui_tx, "Network error resetting lobby.").await;
        }
        Err(e) => notify(ui_tx, format!("Error resetting lobby: {}", e.detail())).await,
    }
}

async fn organizer_join(state: &mut AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    let target = state
        .session
        .as_ref()
        .filter(|s| s.role == Role::Organizer)
        .map(|s| (s.lobby_code.clone(), s.player_name.clone()));
    let Some((code, name)) = target else {
        notify(ui_tx, "Error: Action only available for the organizer.").await;
        return;
    };

    info!("organizer {name} claiming a seat in {code}");
    match busy(ui_tx, state.api.organizer_join(&code, &name)).await {
        Ok(resp) if resp.new_role.as_deref() == Some(Role::OrganizerPlayer.as_str()) => {
            if let Some(session) = state.session.as_mut() {
                session.role = Role::OrganizerPlayer;
            }
            if let Err(e) = state.store.save_role(Role::OrganizerPlayer) {
                warn!("failed to persist role change: {e:#}");
            }
            let _ = ui_tx
                .send(UiUpdate::SessionStarted {
                    lobby_code: code,
                    role: Role::OrganizerPlayer,
                    player_name: name,
                })
                .await;
            state.push_view(ui_tx).await;
            state.start_polling();
            notify(ui_tx, "Successfully joined as a player!").await;
        }
        Ok(resp) => {
            warn!("organizer-join succeeded without role confirmation: {resp:?}");
            notify(ui_tx, "Error: Could not confirm role change with backend.").await;
        }
        Err(ApiError::Network(e)) => {
            warn!("organizer-join network error: {e}");
            notify(
                ui_tx,
                "Network error trying to join as player. Please check connection and try again.",
            )
            .await;
        }
        Err(e) => {
            let message = match e.status() {
                Some(409) => format!("Cannot join: {}", e.server_message().unwrap_or("Lobby is full")),
                Some(403) => format!("Error: {}", e.server_message().unwrap_or("Authorization failed.")),
                _ => format!("Error joining as player: {}", e.detail()),
            };
            notify(ui_tx, message).await;
        }
    }
}

async fn mark_ready(state: &mut AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    let Some(session) = state.session.as_ref().filter(|s| !s.player_name.is_empty()) else {
        notify(ui_tx, "Missing required data to mark ready.").await;
        return;
    };
    if !session.role.can_draft() {
        notify(ui_tx, "Only players can mark themselves as ready.").await;
        return;
    }
    let (code, role) = (session.lobby_code.clone(), session.role);

    info!("marking {role} ready in {code}");
    match busy(ui_tx, state.api.mark_ready(&code, role)).await {
        Ok(()) => state.start_polling(),
        Err(e) => {
            warn!("mark ready failed: {e}");
            notify(ui_tx, "Failed to mark ready. Please try again.").await;
        }
    }
}

async fn select(state: &mut AppState, resonator_id: &str, ui_tx: &mpsc::Sender<UiUpdate>) {
    let Some(session) = state.session.as_ref().filter(|s| s.role.can_draft()) else {
        notify(ui_tx, "Not in a valid lobby or role cannot make picks/bans.").await;
        return;
    };

    // A disabled control sends nothing.
    if let Some(snapshot) = &session.last_snapshot {
        let button = board::button_state(resonator_id, snapshot);
        if board::button_disabled(button, snapshot, session.timed_out) {
            debug!("ignoring selection of {resonator_id}: control is disabled");
            return;
        }
    }
    let (code, role) = (session.lobby_code.clone(), session.role);

    info!("{role} selects {resonator_id} in {code}");
    match busy(ui_tx, state.api.submit_action(&code, role, resonator_id)).await {
        Ok(()) => state.start_polling(),
        Err(ApiError::Network(e)) => {
            warn!("pick/ban network error: {e}");
            notify(ui_tx, "Network error making pick/ban.").await;
        }
        Err(e) => notify(ui_tx, format!("Error making pick/ban: {}", e.detail())).await,
    }
}

// ---------------------------------------------------------------------------
// Startup and shutdown
// ---------------------------------------------------------------------------

/// Re-enter the lobby remembered from a previous run, if any.
pub async fn restore_session(state: &mut AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    match state.store.load_session() {
        Ok(Some(stored)) => {
            state
                .enter_session(stored.lobby_code, stored.role, stored.player_name, ui_tx)
                .await;
        }
        Ok(None) => {}
        Err(e) => warn!("could not read stored session: {e:#}"),
    }
}

/// Best-effort goodbye on exit: players leave, organizers delete. The request
/// gets `cleanup_grace` to go out; exit never waits longer than that.
pub async fn cleanup_on_exit(state: &mut AppState) {
    state.stop_session_tasks();
    let Some(session) = state.session.take() else {
        return;
    };

    let api = Arc::clone(&state.api);
    let code = session.lobby_code.clone();
    let role = session.role;
    let name = session.player_name.clone();
    info!("exit cleanup for lobby {code} as {role}");

    let request = tokio::spawn(async move {
        match role.slot() {
            Some(slot) => api.leave_lobby(&code, slot).await,
            None => api.delete_lobby(&code, &name).await,
        }
    });

    // Dispatched; local state goes now whether or not it is acknowledged.
    if let Err(e) = state.store.clear_session() {
        warn!("failed to clear stored session: {e:#}");
    }

    match tokio::time::timeout(state.config.cleanup_grace(), request).await {
        Ok(Ok(Ok(()))) => info!("exit cleanup acknowledged"),
        Ok(Ok(Err(e))) => warn!("exit cleanup failed: {e}"),
        Ok(Err(e)) => warn!("exit cleanup task failed: {e}"),
        Err(_) => debug!("exit cleanup still in flight; not waiting"),
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the app loop until the TUI quits or its channel closes.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    mut event_rx: mpsc::Receiver<AppEvent>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Application event loop started");
    restore_session(&mut state, &ui_tx).await;

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("Quit command received, shutting down");
                        break;
                    }
                    Some(cmd) => handle_user_command(&mut state, cmd, &ui_tx).await,
                    None => {
                        info!("Command channel closed, shutting down");
                        break;
                    }
                }
            }

            Some(event) = event_rx.recv() => {
                handle_app_event(&mut state, event, &ui_tx).await;
            }
        }
    }

    cleanup_on_exit(&mut state).await;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
